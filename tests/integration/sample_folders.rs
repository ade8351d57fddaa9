//! Tests for directory materialization from Project and Sample paths

use samplekit::config::PathKey;
use samplekit::project::Project;
use std::path::Path;
use tempfile::TempDir;

const ANNS_NAME: &str = "anns-fill.tsv";

/// Write a project whose path settings live either in the `paths` section
/// or directly in `metadata`; both declaration styles must behave alike.
fn write_project(dir: &Path, uses_paths_section: bool, num_samples: usize) -> std::path::PathBuf {
    let mut anns = String::from("sample_name\tdata\n");
    for i in 0..num_samples {
        anns.push_str(&format!("sample{}\t{}\n", i, i));
    }
    std::fs::write(dir.join(ANNS_NAME), anns).unwrap();

    let path_settings = format!(
        "  output_dir: {out}\n  results_subdir: results\n  submission_subdir: submission\n  input_dir: {input}\n  tools_folder: {tools}\n",
        out = dir.join("temporary/sequencing/results").display(),
        input = dir.join("dummy/sequencing/data").display(),
        tools = dir.join("arbitrary-seq-tools-folder").display(),
    );
    let config = if uses_paths_section {
        format!(
            "metadata:\n  sample_annotation: {anns}\npaths:\n{settings}",
            anns = ANNS_NAME,
            settings = path_settings,
        )
    } else {
        format!(
            "metadata:\n  sample_annotation: {anns}\n{settings}",
            anns = ANNS_NAME,
            settings = path_settings,
        )
    };
    let config_path = dir.join("proj-conf.yaml");
    std::fs::write(&config_path, config).unwrap();
    config_path
}

#[test]
fn test_sample_folders_creation_both_declaration_styles() {
    for uses_paths_section in [false, true] {
        for num_samples in 1..4 {
            let temp_dir = TempDir::new().unwrap();
            let config_path = write_project(temp_dir.path(), uses_paths_section, num_samples);
            let project = Project::from_file(&config_path).unwrap();
            assert_eq!(project.num_samples(), num_samples);

            for sample in project.samples() {
                assert!(
                    sample.paths().iter().all(|p| !p.exists()),
                    "paths_section={}: paths exist before materialization",
                    uses_paths_section
                );
            }

            project.make_sample_dirs().unwrap();
            for sample in project.samples() {
                assert!(
                    sample.paths().iter().all(|p| p.is_dir()),
                    "paths_section={}: missing sample dirs",
                    uses_paths_section
                );
            }

            // Re-running against existing directories is fine.
            project.make_sample_dirs().unwrap();
        }
    }
}

#[test]
fn test_sample_paths_land_under_output_dir() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = write_project(temp_dir.path(), true, 2);
    let project = Project::from_file(&config_path).unwrap();

    let out = temp_dir.path().join("temporary/sequencing/results");
    assert_eq!(project.output_dir(), out);
    assert_eq!(project.results_subdir(), out.join("results"));
    assert_eq!(project.submission_subdir(), out.join("submission"));

    let sample = &project.samples()[0];
    assert_eq!(sample.results_path(), out.join("results/sample0"));
    assert_eq!(sample.submission_path(), out.join("submission/sample0"));
}

#[test]
fn test_absolute_keys_resolve_as_given() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = write_project(temp_dir.path(), false, 1);
    let project = Project::from_file(&config_path).unwrap();

    assert_eq!(
        project.resolve_path(PathKey::InputDir),
        temp_dir.path().join("dummy/sequencing/data")
    );
    assert_eq!(
        project.resolve_path(PathKey::ToolsFolder),
        temp_dir.path().join("arbitrary-seq-tools-folder")
    );
}

#[test]
fn test_make_project_dirs() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = write_project(temp_dir.path(), true, 1);
    let project = Project::from_file(&config_path).unwrap();

    assert!(!project.output_dir().exists());
    project.make_project_dirs().unwrap();
    assert!(project.output_dir().is_dir());
    assert!(project.results_subdir().is_dir());
    assert!(project.submission_subdir().is_dir());

    project.make_project_dirs().unwrap();
}

#[test]
fn test_individual_sample_make_dirs() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = write_project(temp_dir.path(), false, 3);
    let project = Project::from_file(&config_path).unwrap();

    let sample = &project.samples()[1];
    sample.make_dirs().unwrap();
    assert!(sample.results_path().is_dir());
    assert!(sample.submission_path().is_dir());

    // Other samples' directories are untouched.
    assert!(!project.samples()[0].results_path().exists());
}
