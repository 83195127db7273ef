use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown test identifier: {0}")]
    UnknownTest(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
