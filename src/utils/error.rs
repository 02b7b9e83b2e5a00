// src/utils/error.rs
use thiserror::Error;

// Exit codes reported to the invoking shell
pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_USAGE: u8 = 2;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Version cannot be empty")]
    InvalidInput,

    #[error("Could not find CHANGELOG section for version {0}")]
    SectionNotFound(String),

    #[error("Regular expression error: {0}")]
    RegexError(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Extraction(#[from] ExtractError), // Message is shown to the user as-is

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl AppError {
    /// Maps the error onto the process exit status.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Extraction(ExtractError::InvalidInput) => EXIT_USAGE,
            _ => EXIT_FAILURE,
        }
    }
}
