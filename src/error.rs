use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(
        "No input schema for '{record_type}' matches the sample record (candidates: {})",
        join_candidates(.candidates)
    )]
    SchemaDetection {
        record_type: String,
        candidates: Vec<String>,
    },
    #[error("Transform for field '{field}' (source key '{source_key}') failed: {message}")]
    Transform {
        field: String,
        source_key: String,
        message: String,
    },
    #[error("{}", describe_validation(.record_type, .field.as_deref(), .message))]
    Validation {
        record_type: String,
        field: Option<String>,
        message: String,
    },
    #[error("No raw records supplied; pass a batch to translate() or at construction")]
    MissingInput,
    #[error("Unsupported record type '{0}'")]
    UnsupportedRecordType(String),
    #[error("Index {index} is out of range for a list of {len} item(s)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Reading {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl Error {
    pub(crate) fn validation(
        record_type: &str,
        field: Option<&str>,
        message: impl Into<String>,
    ) -> Self {
        Error::Validation {
            record_type: record_type.to_string(),
            field: field.map(str::to_string),
            message: message.into(),
        }
    }

    /// Per-record failures are recovered during batch translation; everything else is fatal.
    pub fn is_record_level(&self) -> bool {
        matches!(self, Error::Transform { .. } | Error::Validation { .. })
    }
}

fn join_candidates(candidates: &[String]) -> String {
    if candidates.is_empty() {
        "none registered".to_string()
    } else {
        candidates.join(", ")
    }
}

fn describe_validation(record_type: &str, field: Option<&str>, message: &str) -> String {
    match field {
        Some(field) => format!("Record does not validate as '{record_type}': field '{field}' {message}"),
        None => format!("Record does not validate as '{record_type}': {message}"),
    }
}
