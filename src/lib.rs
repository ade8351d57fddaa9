//! Samplekit: Project Metadata Modeling
//!
//! Merges a YAML project configuration with a delimited sample sheet into an
//! ordered collection of sample records, with named subproject override
//! activation and resolved output paths.

pub mod config;
pub mod error;
pub mod logging;
pub mod project;
pub mod sample;
pub mod sheet;
