use thiserror::Error;

use crate::domain::REQUIRED_COLUMNS;

/// Process-level failure: carries the exit code the binary should return.
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Failure of a single render pass.
///
/// These never end the process on their own: the dashboard shows them inline
/// and waits for another file.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    /// One or more required columns are absent from the header row.
    #[error("File must contain columns: {}", REQUIRED_COLUMNS.join(", "))]
    MissingColumns { missing: Vec<String> },

    /// The file could not be opened or parsed, or a score was not numeric.
    #[error("Error reading file: {0}")]
    Read(String),
}

impl RenderError {
    pub fn read(message: impl Into<String>) -> Self {
        Self::Read(message.into())
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingColumns { .. } => "missing_columns",
            Self::Read(_) => "read",
        }
    }
}

impl From<RenderError> for AppError {
    fn from(err: RenderError) -> Self {
        AppError::new(2, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_columns_names_all_required() {
        let err = RenderError::MissingColumns {
            missing: vec!["Performance".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "File must contain columns: Name, HTO, Performance"
        );
    }

    #[test]
    fn read_error_passes_message_through() {
        let err = RenderError::read("invalid float literal");
        assert!(err.to_string().ends_with("invalid float literal"));
        assert_eq!(AppError::from(err).exit_code(), 2);
    }
}
