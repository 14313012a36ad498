use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranslocalError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read source file: {0}")]
    Read(String),

    #[error("Translation provider error: {0}")]
    Provider(String),

    #[error("Failed to write target file: {0}")]
    Write(String),
}

pub type Result<T> = std::result::Result<T, TranslocalError>;
