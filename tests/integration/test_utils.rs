//! Shared test utilities for integration tests
//!
//! Provides fixture data mirroring a realistic sequencing project: a YAML
//! project config plus a four-sample annotation sheet spanning two protocols.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Global mutex to serialize environment variable access across all tests.
/// This prevents race conditions when tests run in parallel.
pub static ENV_MUTEX: Mutex<()> = Mutex::new(());

pub const ANNOTATIONS_NAME: &str = "annotations.csv";

pub const SAMPLE_NAMES: [&str; 4] = ["WGBS_mm10", "ATAC_mm10", "WGBS_rn6", "ATAC_rn6"];
pub const VALUES1: [&str; 4] = ["3", "-1", "0", "4"];
pub const VALUES2: [&str; 4] = ["5", "2", "-2", "1"];
pub const PROTOCOLS: [&str; 4] = ["WGBS", "ATAC", "WGBS", "ATAC"];

/// Write a config file plus annotation sheet into `dir`; returns the config path.
pub fn write_project_files(dir: &Path, config: &str, anns_name: &str, anns: &str) -> PathBuf {
    let config_path = dir.join("project_config.yaml");
    std::fs::write(&config_path, config).unwrap();
    std::fs::write(dir.join(anns_name), anns).unwrap();
    config_path
}

/// Minimal config: just the annotation table pointer.
pub fn basic_config() -> String {
    format!("metadata:\n  sample_annotation: {}\n", ANNOTATIONS_NAME)
}

/// The standard four-sample annotation table, with a configurable delimiter.
pub fn standard_annotations(delimiter: char) -> String {
    let sep = delimiter.to_string();
    let mut lines = vec![["sample_name", "val1", "val2", "protocol"].join(&sep)];
    for i in 0..SAMPLE_NAMES.len() {
        lines.push([SAMPLE_NAMES[i], VALUES1[i], VALUES2[i], PROTOCOLS[i]].join(&sep));
    }
    lines.join("\n") + "\n"
}
