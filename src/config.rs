//! Configuration System
//!
//! Parses the project configuration document (YAML mapping syntax) and keeps
//! the raw tree around for subproject activation. Path settings are resolved
//! on demand with `paths`-section precedence, environment placeholder
//! expansion, and joining of output-relative keys.

use crate::error::ConfigError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

mod merge;
mod paths;

pub use merge::merge_mappings;
pub use paths::{expand_env, PathKey};

/// Top-level section holding project metadata.
pub const METADATA_KEY: &str = "metadata";
/// Optional top-level section overriding path settings.
pub const PATHS_KEY: &str = "paths";
/// Optional top-level mapping of named partial overrides.
pub const SUBPROJECTS_KEY: &str = "subprojects";
/// Metadata key naming the annotation table.
pub const SAMPLE_ANNOTATION_KEY: &str = "sample_annotation";

/// Typed view of the `metadata` section.
///
/// Recognized keys get explicit fields; everything else passes through in
/// declaration order via the flattened side-mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    /// Annotation table location, possibly relative to the config file.
    pub sample_annotation: PathBuf,

    /// Output directory root (defaults to the config file's directory).
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Pipeline interfaces location.
    #[serde(default)]
    pub pipeline_interfaces: Option<PathBuf>,

    /// Pass-through keys not modeled explicitly.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// A parsed project configuration document.
///
/// The raw mapping is preserved so subproject activation can merge onto a
/// pristine root; typed views (`metadata`) are extracted on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigTree {
    root: Mapping,
    /// Directory anchoring relative paths; the config file's parent.
    anchor: PathBuf,
}

impl ConfigTree {
    /// Parse a configuration document from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let root = match serde_yaml::from_str(&text)? {
            Value::Mapping(mapping) => mapping,
            Value::Null => Mapping::new(),
            _ => return Err(ConfigError::NotAMapping),
        };
        let anchor = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf();
        debug!(config = %path.display(), "parsed project configuration");
        Ok(Self { root, anchor })
    }

    /// Build a tree from an in-memory mapping, anchored at `anchor`.
    pub fn from_mapping(root: Mapping, anchor: impl Into<PathBuf>) -> Self {
        Self {
            root,
            anchor: anchor.into(),
        }
    }

    /// Raw document root.
    pub fn root(&self) -> &Mapping {
        &self.root
    }

    /// Directory against which relative config paths are resolved.
    pub fn anchor(&self) -> &Path {
        &self.anchor
    }

    /// Dotted-path lookup into the raw tree, e.g. `metadata.sample_annotation`.
    pub fn lookup(&self, dotted: &str) -> Option<&Value> {
        let mut segments = dotted.split('.');
        let mut current = self.root.get(segments.next()?)?;
        for segment in segments {
            current = current.as_mapping()?.get(segment)?;
        }
        Some(current)
    }

    /// Extract the typed `metadata` view.
    pub fn metadata(&self) -> Result<Metadata, ConfigError> {
        let section = self
            .root
            .get(METADATA_KEY)
            .ok_or(ConfigError::MissingSection(METADATA_KEY))?;
        let mapping = section.as_mapping().ok_or(ConfigError::NotAMapping)?;
        if !mapping.contains_key(SAMPLE_ANNOTATION_KEY) {
            return Err(ConfigError::MissingKey("metadata.sample_annotation"));
        }
        Ok(serde_yaml::from_value(section.clone())?)
    }

    /// Names of declared subprojects, in declaration order.
    pub fn subproject_names(&self) -> Vec<String> {
        self.root
            .get(SUBPROJECTS_KEY)
            .and_then(Value::as_mapping)
            .map(|subs| {
                subs.keys()
                    .filter_map(Value::as_str)
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Produce the effective tree for a named subproject.
    ///
    /// The override block is merged recursively onto this tree; this tree is
    /// left untouched so it can serve further activations.
    pub fn activate_subproject(&self, name: &str) -> Result<ConfigTree, ConfigError> {
        let patch = self
            .root
            .get(SUBPROJECTS_KEY)
            .and_then(Value::as_mapping)
            .and_then(|subs| subs.get(name))
            .ok_or_else(|| ConfigError::UnknownSubproject(name.to_string()))?;
        let patch = patch
            .as_mapping()
            .ok_or_else(|| ConfigError::InvalidSubproject(name.to_string()))?;
        debug!(subproject = name, "merging subproject override onto root");
        Ok(ConfigTree {
            root: merge_mappings(&self.root, patch),
            anchor: self.anchor.clone(),
        })
    }

    /// Resolve a named path setting.
    ///
    /// Precedence: the `paths` section when it defines the key, then
    /// `metadata`, then the built-in default. Output-relative keys
    /// (results/submission subfolders) are joined under the output
    /// directory. Environment placeholders expand here, at resolution time.
    pub fn resolve_path(&self, key: PathKey) -> PathBuf {
        if key == PathKey::OutputDir {
            return self.output_dir();
        }
        let configured = self
            .section_value(PATHS_KEY, key.key())
            .or_else(|| self.section_value(METADATA_KEY, key.key()));
        let raw = match (configured, key.default_value()) {
            (Some(value), _) => value,
            (None, Some(default)) => default.to_string(),
            // Absolute-as-given keys with no setting fall back to the anchor.
            (None, None) => return self.anchor.clone(),
        };
        let expanded = PathBuf::from(expand_env(&raw));
        if key.joins_output_dir() {
            self.output_dir().join(expanded)
        } else {
            self.anchored(expanded)
        }
    }

    /// The project output directory; defaults to the config file's folder.
    pub fn output_dir(&self) -> PathBuf {
        match self
            .section_value(PATHS_KEY, PathKey::OutputDir.key())
            .or_else(|| self.section_value(METADATA_KEY, PathKey::OutputDir.key()))
        {
            Some(raw) => self.anchored(PathBuf::from(expand_env(&raw))),
            None => self.anchor.clone(),
        }
    }

    /// Resolve a metadata file location (annotation table, pipeline
    /// interfaces) against the config anchor.
    pub fn resolve_metadata_path(&self, configured: &Path) -> PathBuf {
        let expanded = PathBuf::from(expand_env(&configured.to_string_lossy()));
        self.anchored(expanded)
    }

    fn anchored(&self, path: PathBuf) -> PathBuf {
        if path.is_absolute() {
            path
        } else {
            self.anchor.join(path)
        }
    }

    fn section_value(&self, section: &str, key: &str) -> Option<String> {
        let value = self.root.get(section)?.as_mapping()?.get(key)?;
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}
