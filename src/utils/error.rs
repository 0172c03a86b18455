use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocError {
    #[error("Request failed with status {status}")]
    RequestFailed { status: u16 },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Could not save '{filename}': {source}")]
    SaveError {
        filename: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid form field '{input}': {reason}")]
    InvalidFieldError { input: String, reason: String },
}

pub type Result<T> = std::result::Result<T, DocError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Api,
    Storage,
    Configuration,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DocError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DocError::NetworkError(_) => ErrorCategory::Network,
            DocError::RequestFailed { .. } => ErrorCategory::Api,
            DocError::SaveError { .. } | DocError::IoError(_) => ErrorCategory::Storage,
            DocError::InvalidFieldError { .. } => ErrorCategory::Input,
            DocError::ConfigError { .. }
            | DocError::ConfigValidationError { .. }
            | DocError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network | ErrorCategory::Api => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Storage => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            DocError::RequestFailed { status } if *status >= 500 => {
                "The document service returned a server error; try again later".to_string()
            }
            DocError::RequestFailed { .. } => {
                "Check the submitted fields against what the document service expects".to_string()
            }
            DocError::NetworkError(_) => {
                "Make sure the document service is running and reachable from this host"
                    .to_string()
            }
            DocError::SaveError { .. } | DocError::IoError(_) => {
                "Check that the output directory exists and is writable".to_string()
            }
            DocError::InvalidFieldError { .. } => {
                "Pass form fields as name=value, e.g. -f cliente=\"Maria\"".to_string()
            }
            DocError::ConfigError { .. }
            | DocError::ConfigValidationError { .. }
            | DocError::InvalidConfigValueError { .. } => {
                "Review the configuration file and command-line flags".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DocError::RequestFailed { status } => {
                format!("The document service rejected the request (HTTP {})", status)
            }
            DocError::NetworkError(_) => "Could not reach the document service".to_string(),
            DocError::SaveError { filename, .. } => format!("Could not save '{}'", filename),
            other => other.to_string(),
        }
    }
}
