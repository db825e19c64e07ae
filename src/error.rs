//! Error types for loading sources and assembling records.

use std::path::PathBuf;
use thiserror::Error;

/// Structural errors that abort an assembly run.
#[derive(Error, Debug)]
pub enum AssemblyError {
    /// Two entries claim the same function id.
    #[error("duplicate function id '{id}' in {spec}")]
    DuplicateId { id: String, spec: &'static str },

    /// A required join target has no entry for this id.
    #[error("no {spec} entry for function id '{id}'")]
    MissingJoin { id: String, spec: &'static str },

    /// Overrides name parameters the resolved signature does not have.
    #[error("function '{id}' overrides unknown parameter(s): {}", .names.join(", "))]
    UnmatchedOverride { id: String, names: Vec<String> },
}

/// Errors reading or parsing one of the input files.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid YAML in {}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("{}: {source}", .path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: AssemblyError,
    },
}
