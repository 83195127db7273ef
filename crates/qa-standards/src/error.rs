#![deny(unsafe_code)]

use std::path::PathBuf;

use qa_model::TestId;

#[derive(Debug, thiserror::Error)]
pub enum StandardsError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse header dictionary {origin}: {source}")]
    Toml {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("unsupported dictionary schema in {origin}: {schema} v{version}")]
    UnsupportedSchema {
        origin: String,
        schema: String,
        version: u32,
    },

    #[error("unknown test identifier '{name}' in {origin}")]
    UnknownTest { origin: String, name: String },

    #[error("empty {what} for test {test} in {origin}")]
    EmptyEntry {
        origin: String,
        test: TestId,
        what: &'static str,
    },

    #[error("header '{alias}' in test {test} maps to both {existing} and {field}")]
    ConflictingAlias {
        test: TestId,
        alias: String,
        existing: String,
        field: String,
    },

    #[error("invalid numbered pattern for test {test} in {origin}: {reason}")]
    InvalidNumbered {
        origin: String,
        test: TestId,
        reason: String,
    },

    #[error("section marker '{title}' refers to {test}, which has no headers")]
    MarkerWithoutHeaders { title: String, test: TestId },
}

impl StandardsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, StandardsError>;
