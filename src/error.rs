//! Error handling for the resume screener application

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScreenerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to split combined resume file: {0}")]
    Segmentation(String),

    #[error("Failed to read candidate document: {0}")]
    Extraction(String),

    #[error("Failed to read job description: {0}")]
    JdRead(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Input file is empty: {0}")]
    EmptyInput(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Report generation error: {0}")]
    Report(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScreenerError>;
