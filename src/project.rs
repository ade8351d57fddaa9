//! Project Orchestration
//!
//! Ties the configuration tree, the annotation sheet, and subproject
//! resolution together into an ordered sample collection. Activation fully
//! rebuilds derived state from the pristine root tree; a failed activation
//! leaves the previous state untouched.

use crate::config::{ConfigTree, Metadata, PathKey};
use crate::error::ProjectError;
use crate::sample::{ProjectHandle, Sample};
use crate::sheet::SampleSheet;
use indexmap::IndexMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A project: one active configuration tree plus the sample collection
/// materialized from its annotation sheet.
pub struct Project {
    config_path: PathBuf,
    root: ConfigTree,
    active_subproject: Option<String>,
    state: DerivedState,
}

/// Everything derived from the active tree. Rebuilt wholesale on
/// (de)activation and swapped in only after every step has succeeded.
struct DerivedState {
    active: ConfigTree,
    metadata: Metadata,
    sheet: SampleSheet,
    samples: Vec<Sample>,
}

impl DerivedState {
    fn materialize(
        root: &ConfigTree,
        config_path: &Path,
        subproject: Option<&str>,
    ) -> Result<Self, ProjectError> {
        let active = match subproject {
            Some(name) => root.activate_subproject(name)?,
            None => root.clone(),
        };
        let metadata = active.metadata()?;
        let annotation = active.resolve_metadata_path(&metadata.sample_annotation);
        let sheet = SampleSheet::from_file(&annotation)?;

        let results_root = active.resolve_path(PathKey::ResultsSubdir);
        let submission_root = active.resolve_path(PathKey::SubmissionSubdir);
        let handle = ProjectHandle::new(
            config_path.to_path_buf(),
            subproject.map(String::from),
        );

        let columns = sheet.columns().to_vec();
        let mut samples = Vec::with_capacity(sheet.len());
        for row in sheet.rows() {
            let mut attributes = IndexMap::with_capacity(columns.len());
            for (column, value) in columns.iter().zip(row) {
                attributes.insert(column.clone(), value.clone());
            }
            samples.push(Sample::new(
                row[0].clone(),
                attributes,
                &results_root,
                &submission_root,
                handle.clone(),
            ));
        }
        debug!(
            annotation = %annotation.display(),
            samples = samples.len(),
            subproject = subproject.unwrap_or("-"),
            "materialized sample collection"
        );

        Ok(DerivedState {
            active,
            metadata,
            sheet,
            samples,
        })
    }
}

impl Project {
    /// Construct a project from its configuration file.
    pub fn from_file(config_path: impl AsRef<Path>) -> Result<Self, ProjectError> {
        Self::build(config_path.as_ref(), None)
    }

    /// Construct a project with a subproject applied up front.
    pub fn with_subproject(
        config_path: impl AsRef<Path>,
        subproject: &str,
    ) -> Result<Self, ProjectError> {
        Self::build(config_path.as_ref(), Some(subproject))
    }

    /// Construct from an already-parsed configuration tree. The tree's
    /// anchor directory stands in for the config file location.
    pub fn from_config(root: ConfigTree) -> Result<Self, ProjectError> {
        let config_path = root.anchor().to_path_buf();
        let state = DerivedState::materialize(&root, &config_path, None)?;
        Ok(Self {
            config_path,
            root,
            active_subproject: None,
            state,
        })
    }

    fn build(config_path: &Path, subproject: Option<&str>) -> Result<Self, ProjectError> {
        let root = ConfigTree::from_file(config_path)?;
        let state = DerivedState::materialize(&root, config_path, subproject)?;
        Ok(Self {
            config_path: config_path.to_path_buf(),
            root,
            active_subproject: subproject.map(String::from),
            state,
        })
    }

    /// Replace the active tree with the named subproject's merge result and
    /// rebuild the sample collection. On error the project is unchanged.
    pub fn activate_subproject(&mut self, name: &str) -> Result<(), ProjectError> {
        let state = DerivedState::materialize(&self.root, &self.config_path, Some(name))?;
        self.state = state;
        self.active_subproject = Some(name.to_string());
        Ok(())
    }

    /// Restore the root configuration and rebuild.
    pub fn deactivate_subproject(&mut self) -> Result<(), ProjectError> {
        let state = DerivedState::materialize(&self.root, &self.config_path, None)?;
        self.state = state;
        self.active_subproject = None;
        Ok(())
    }

    /// Project name: the config file stem.
    pub fn name(&self) -> String {
        self.config_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.config_path.display().to_string())
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// The active configuration tree (root, or root merged with the
    /// activated subproject).
    pub fn config(&self) -> &ConfigTree {
        &self.state.active
    }

    /// The pristine root tree, regardless of activation.
    pub fn root_config(&self) -> &ConfigTree {
        &self.root
    }

    pub fn metadata(&self) -> &Metadata {
        &self.state.metadata
    }

    pub fn active_subproject(&self) -> Option<&str> {
        self.active_subproject.as_deref()
    }

    /// The annotation sheet as loaded.
    pub fn sheet(&self) -> &SampleSheet {
        &self.state.sheet
    }

    pub fn num_samples(&self) -> usize {
        self.state.samples.len()
    }

    /// Samples in sheet row order.
    pub fn samples(&self) -> &[Sample] {
        &self.state.samples
    }

    /// Sample names in sheet row order.
    pub fn sample_names(&self) -> impl Iterator<Item = &str> {
        self.state.samples.iter().map(Sample::name)
    }

    /// Build the filtered tabular view of the sample collection.
    ///
    /// An empty `protocols` slice means no filter: every sample is included.
    /// Given protocols, only samples whose protocol tag is in the set are
    /// kept, in original row order.
    pub fn build_sheet(&self, protocols: &[&str]) -> SampleSheet {
        let rows = self
            .state
            .samples
            .iter()
            .filter(|sample| {
                protocols.is_empty()
                    || sample
                        .protocol()
                        .map_or(false, |p| protocols.contains(&p))
            })
            .map(Sample::sheet_row)
            .collect();
        SampleSheet::from_parts(self.state.sheet.columns().to_vec(), rows)
    }

    /// Resolve a path setting against the active tree.
    pub fn resolve_path(&self, key: PathKey) -> PathBuf {
        self.state.active.resolve_path(key)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.resolve_path(PathKey::OutputDir)
    }

    pub fn results_subdir(&self) -> PathBuf {
        self.resolve_path(PathKey::ResultsSubdir)
    }

    pub fn submission_subdir(&self) -> PathBuf {
        self.resolve_path(PathKey::SubmissionSubdir)
    }

    /// Create every sample's directories. Existing directories are fine.
    pub fn make_sample_dirs(&self) -> Result<(), ProjectError> {
        for sample in &self.state.samples {
            sample.make_dirs()?;
        }
        Ok(())
    }

    /// Create the project-level directories: output dir plus the results
    /// and submission subfolders.
    pub fn make_project_dirs(&self) -> Result<(), ProjectError> {
        for key in [
            PathKey::OutputDir,
            PathKey::ResultsSubdir,
            PathKey::SubmissionSubdir,
        ] {
            fs::create_dir_all(self.resolve_path(key))?;
        }
        Ok(())
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Project '{}'", self.name())?;
        if let Some(subproject) = self.active_subproject() {
            write!(f, " [{}]", subproject)?;
        }
        write!(f, " ({} samples)", self.num_samples())
    }
}

impl fmt::Debug for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Project")
            .field("config_path", &self.config_path)
            .field("active_subproject", &self.active_subproject)
            .field("num_samples", &self.num_samples())
            .finish_non_exhaustive()
    }
}
