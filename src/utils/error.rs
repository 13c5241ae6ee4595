use thiserror::Error;

#[derive(Error, Debug)]
pub enum LogoError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Render error: {message}")]
    RenderError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl LogoError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            LogoError::HttpError(_) => ErrorSeverity::Medium,
            LogoError::RenderError { .. } | LogoError::ImageError(_) => ErrorSeverity::Low,
            LogoError::ConfigError { .. }
            | LogoError::ConfigValidationError { .. }
            | LogoError::InvalidConfigValueError { .. }
            | LogoError::TomlError(_) => ErrorSeverity::High,
            LogoError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for errors that abort a run.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            LogoError::HttpError(e) if e.is_timeout() => {
                "A logo service did not answer in time".to_string()
            }
            LogoError::HttpError(_) => "A logo service could not be reached".to_string(),
            LogoError::IoError(e) => format!("File system problem: {}", e),
            LogoError::ImageError(_) | LogoError::RenderError { .. } => {
                "The placeholder logo could not be drawn".to_string()
            }
            LogoError::TomlError(_) => "The configuration file is not valid TOML".to_string(),
            LogoError::ConfigError { message } => format!("Configuration problem: {}", message),
            LogoError::ConfigValidationError { field, message } => {
                format!("Setting '{}' is invalid: {}", field, message)
            }
            LogoError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            LogoError::HttpError(_) => {
                "Check the network connection or raise fetch.timeout_seconds"
            }
            LogoError::IoError(_) => "Make sure the logos directory exists and is writable",
            LogoError::ImageError(_) | LogoError::RenderError { .. } => {
                "Check placeholder.font_path or remove it to use the built-in font"
            }
            LogoError::TomlError(_)
            | LogoError::ConfigError { .. }
            | LogoError::ConfigValidationError { .. }
            | LogoError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or the command line flags and run again"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, LogoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_exit_with_one() {
        let err = LogoError::InvalidConfigValueError {
            field: "fetch.timeout_seconds".to_string(),
            value: "0".to_string(),
            reason: "Value must be at least 1".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(err.exit_code(), 1);
        assert!(err.user_friendly_message().contains("fetch.timeout_seconds"));
    }

    #[test]
    fn test_io_errors_are_critical() {
        let err = LogoError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.exit_code(), 3);
    }
}
