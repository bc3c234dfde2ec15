use thiserror::Error;

#[derive(Debug, Error)]
pub enum PrecRecError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("empty input: table has no records with a usable F1 value")]
    EmptyInput,
    #[error("unsupported output format: {0} (use .png or .svg)")]
    UnsupportedFormat(String),
    #[error("plot error: {0}")]
    Plot(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PrecRecError {
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        PrecRecError::Parse {
            line,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PrecRecError>;
