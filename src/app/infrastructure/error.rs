use thiserror::Error;

#[derive(Error, Debug)]
pub enum UiError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Platform error: {0}")]
    Platform(String),
}

/// Convenience type alias for Results with UiError
pub type Result<T> = std::result::Result<T, UiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let ui_err: UiError = io_err.into();
        assert!(matches!(ui_err, UiError::Io(_)));
        assert!(ui_err.to_string().contains("file not found"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let ui_err: UiError = json_err.into();
        assert!(matches!(ui_err, UiError::Json(_)));
    }

    #[test]
    fn test_error_display() {
        let err = UiError::Settings("threshold out of range".to_string());
        assert_eq!(err.to_string(), "Settings error: threshold out of range");

        let err = UiError::Storage("quota exceeded".to_string());
        assert_eq!(err.to_string(), "Storage error: quota exceeded");

        let err = UiError::Platform("no window".to_string());
        assert_eq!(err.to_string(), "Platform error: no window");
    }
}
