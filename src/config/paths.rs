//! Path keys and environment-placeholder expansion.
//!
//! Path settings may live under the `paths` section or under `metadata`;
//! the lookup precedence itself is implemented on `ConfigTree`. This module
//! owns the key names, the built-in defaults, and the placeholder expansion
//! applied at resolution time.

/// A named path setting recognized in the project configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathKey {
    OutputDir,
    ResultsSubdir,
    SubmissionSubdir,
    InputDir,
    ToolsFolder,
    PipelineInterfaces,
}

impl PathKey {
    /// Key name as it appears in the config document.
    pub fn key(self) -> &'static str {
        match self {
            PathKey::OutputDir => "output_dir",
            PathKey::ResultsSubdir => "results_subdir",
            PathKey::SubmissionSubdir => "submission_subdir",
            PathKey::InputDir => "input_dir",
            PathKey::ToolsFolder => "tools_folder",
            PathKey::PipelineInterfaces => "pipeline_interfaces",
        }
    }

    /// Keys whose configured value is relative to the output directory.
    pub fn joins_output_dir(self) -> bool {
        matches!(self, PathKey::ResultsSubdir | PathKey::SubmissionSubdir)
    }

    /// Built-in default when neither `paths` nor `metadata` defines the key.
    pub fn default_value(self) -> Option<&'static str> {
        match self {
            PathKey::ResultsSubdir => Some("results_pipeline"),
            PathKey::SubmissionSubdir => Some("submission"),
            _ => None,
        }
    }
}

/// Expand environment placeholders in a path string.
///
/// Handles a leading `~`, `$VAR`, and `${VAR}`. Unset variables are left in
/// place verbatim. Expansion happens at resolution time so that two loads of
/// the same document under different environments resolve independently.
pub fn expand_env(input: &str) -> String {
    let tilde_expanded = if input == "~" || input.starts_with("~/") {
        match std::env::var("HOME") {
            Ok(home) => format!("{}{}", home, &input[1..]),
            Err(_) => input.to_string(),
        }
    } else {
        input.to_string()
    };

    let mut out = String::with_capacity(tilde_expanded.len());
    let mut chars = tilde_expanded.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('{') => {
                chars.next();
                let mut name = String::new();
                let mut closed = false;
                for n in chars.by_ref() {
                    if n == '}' {
                        closed = true;
                        break;
                    }
                    name.push(n);
                }
                match std::env::var(&name) {
                    Ok(value) if closed => out.push_str(&value),
                    _ => {
                        out.push_str("${");
                        out.push_str(&name);
                        if closed {
                            out.push('}');
                        }
                    }
                }
            }
            Some(&n) if n == '_' || n.is_ascii_alphanumeric() => {
                let mut name = String::new();
                while let Some(&n2) = chars.peek() {
                    if n2 == '_' || n2.is_ascii_alphanumeric() {
                        name.push(n2);
                        chars.next();
                    } else {
                        break;
                    }
                }
                match std::env::var(&name) {
                    Ok(value) => out.push_str(&value),
                    Err(_) => {
                        out.push('$');
                        out.push_str(&name);
                    }
                }
            }
            _ => out.push('$'),
        }
    }
    out
}
