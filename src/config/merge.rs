//! Recursive configuration merge: subproject overrides onto the root tree.

use serde_yaml::{Mapping, Value};

/// Merge `patch` onto `base`, returning a new mapping.
///
/// Keys present in the patch replace the base value; when both sides hold a
/// mapping the merge recurses instead of replacing wholesale. Scalars and
/// sequences replace wholesale. Neither input is mutated, so the root tree
/// stays available for re-activation.
pub fn merge_mappings(base: &Mapping, patch: &Mapping) -> Mapping {
    let mut merged = base.clone();
    for (key, patch_value) in patch {
        let next = match (merged.get(key), patch_value) {
            (Some(Value::Mapping(base_inner)), Value::Mapping(patch_inner)) => {
                Value::Mapping(merge_mappings(base_inner, patch_inner))
            }
            _ => patch_value.clone(),
        };
        merged.insert(key.clone(), next);
    }
    merged
}
