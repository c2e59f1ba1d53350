//! Error types for the quiz loader and the redirector.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to load a problem set. Fatal: no question is shown.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The problems file could not be opened.
    #[error("failed to open problems file {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid CSV.
    #[error("failed to read problems: {0}")]
    Csv(#[from] csv::Error),

    /// A record did not have exactly a question and an answer.
    #[error("record {record} has {fields} fields, expected 2 (question, answer)")]
    Malformed { record: usize, fields: usize },
}

/// Failure to build a path map from a structured document.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("invalid YAML route document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON route document: {0}")]
    Json(#[from] serde_json::Error),
}
