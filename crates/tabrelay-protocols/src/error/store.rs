//! Settings store errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Settings store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt settings data: {0}")]
    Corrupt(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Preset not found: {0}")]
    PresetNotFound(String),

    #[error("Built-in preset cannot be deleted: {0}")]
    BuiltinPreset(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Corrupt(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: StoreError = io_err.into();
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_store_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: StoreError = json_err.into();
        assert!(matches!(err, StoreError::Corrupt(_)));
    }

    #[test]
    fn test_preset_errors_name_the_key() {
        assert!(StoreError::PresetNotFound("scale".into()).to_string().contains("scale"));
        assert!(StoreError::BuiltinPreset("outlier".into()).to_string().contains("outlier"));
    }
}
