//! Sample records materialized from sheet rows.
//!
//! A `Sample` carries every sheet column as an ordered attribute plus the
//! directory paths derived from the project's path settings. The owning
//! project is referenced through an opaque handle that never appears in the
//! sample's text representations.

use crate::sheet::PROTOCOL_COLUMN;
use indexmap::IndexMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Non-owning back-reference to the project a sample was materialized from.
///
/// Identifies the project by config location and active subproject; carried
/// for provenance, excluded from sample text output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectHandle {
    config_path: PathBuf,
    subproject: Option<String>,
}

impl ProjectHandle {
    pub(crate) fn new(config_path: PathBuf, subproject: Option<String>) -> Self {
        Self {
            config_path,
            subproject,
        }
    }

    /// Location of the owning project's config file.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Subproject active when the sample was materialized.
    pub fn subproject(&self) -> Option<&str> {
        self.subproject.as_deref()
    }
}

/// One sheet row plus derived path attributes.
///
/// Immutable once materialized; directory creation touches the filesystem
/// only, never the in-memory record.
#[derive(Clone)]
pub struct Sample {
    name: String,
    /// Sheet columns in original order; the sample-name column comes first.
    attributes: IndexMap<String, String>,
    results_path: PathBuf,
    submission_path: PathBuf,
    project: ProjectHandle,
}

impl Sample {
    pub(crate) fn new(
        name: String,
        attributes: IndexMap<String, String>,
        results_root: &Path,
        submission_root: &Path,
        project: ProjectHandle,
    ) -> Self {
        let results_path = results_root.join(&name);
        let submission_path = submission_root.join(&name);
        Self {
            name,
            attributes,
            results_path,
            submission_path,
            project,
        }
    }

    /// Unique sample name (first sheet column).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sheet attribute by column name.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.attributes.get(column).map(String::as_str)
    }

    /// Protocol/assay tag, when the sheet carries one.
    pub fn protocol(&self) -> Option<&str> {
        self.get(PROTOCOL_COLUMN)
    }

    /// All sheet attributes in original column order.
    pub fn attributes(&self) -> &IndexMap<String, String> {
        &self.attributes
    }

    /// Sheet-originated attributes in original column order, sample-name
    /// column first. Derived paths and the project handle are excluded.
    pub fn sheet_dict(&self) -> IndexMap<String, String> {
        self.attributes.clone()
    }

    /// Attribute values in sheet column order.
    pub(crate) fn sheet_row(&self) -> Vec<String> {
        self.attributes.values().cloned().collect()
    }

    /// Per-sample results directory: results subfolder joined with the name.
    pub fn results_path(&self) -> &Path {
        &self.results_path
    }

    /// Per-sample submission directory.
    pub fn submission_path(&self) -> &Path {
        &self.submission_path
    }

    /// Every derived directory attribute.
    pub fn paths(&self) -> Vec<&Path> {
        vec![&self.results_path, &self.submission_path]
    }

    /// Owning project reference.
    pub fn project(&self) -> &ProjectHandle {
        &self.project
    }

    /// Create the sample's directories. Safe to call when they exist.
    pub fn make_dirs(&self) -> io::Result<()> {
        for path in self.paths() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }
}

// The project handle does not participate in equality: two samples with the
// same sheet data and derived paths compare equal across activations.
impl PartialEq for Sample {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.attributes == other.attributes
            && self.results_path == other.results_path
            && self.submission_path == other.submission_path
    }
}

impl Eq for Sample {}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sample '{}'", self.name)?;
        if let Some(protocol) = self.protocol() {
            write!(f, " ({})", protocol)?;
        }
        Ok(())
    }
}

// Manual Debug: the project handle stays out of both representation forms.
impl fmt::Debug for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sample")
            .field("name", &self.name)
            .field("attributes", &self.attributes)
            .field("results_path", &self.results_path)
            .field("submission_path", &self.submission_path)
            .finish_non_exhaustive()
    }
}
