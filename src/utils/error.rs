use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("Empty response from server")]
    EmptyResponse,

    #[error("Response is not a PDF (Content-Type: {content_type})")]
    NotPdf { content_type: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required setting: {field}")]
    MissingConfigError { field: String },
}

pub type Result<T> = std::result::Result<T, ScraperError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Storage,
    Configuration,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ScraperError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::HttpError(_) | Self::UnexpectedStatus { .. } | Self::EmptyResponse => {
                ErrorCategory::Network
            }
            Self::IoError(_) => ErrorCategory::Storage,
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::SerializationError(_) | Self::NotPdf { .. } => ErrorCategory::Data,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // court sites are flaky; the same request may well succeed later
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data => ErrorSeverity::Low,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    /// Short reason stored in the `error` field of a case record.
    pub fn short_reason(&self) -> String {
        match self {
            Self::HttpError(e) if e.is_timeout() => "Request timeout".to_string(),
            Self::HttpError(e) if e.is_connect() => "Connection failed".to_string(),
            Self::UnexpectedStatus { status, .. } => format!("HTTP {}", status),
            other => other.to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::HttpError(e) if e.is_timeout() => {
                "The court server did not answer in time".to_string()
            }
            Self::HttpError(e) if e.is_connect() => {
                "Could not connect to the court server".to_string()
            }
            Self::HttpError(_) => "The request to the court server failed".to_string(),
            Self::UnexpectedStatus { status, .. } => {
                format!("The court server answered with HTTP {}", status)
            }
            Self::EmptyResponse => "The court server returned an empty page".to_string(),
            Self::NotPdf { .. } => "The court server did not return a PDF".to_string(),
            Self::IoError(e) => format!("Could not read or write a local file: {}", e),
            Self::SerializationError(e) => format!("Could not encode the report: {}", e),
            Self::ConfigValidationError { field, message } => {
                format!("Invalid setting '{}': {}", field, message)
            }
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            Self::MissingConfigError { field } => format!("Missing setting '{}'", field),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => {
                "Check your internet connection; eCourts may also be down or require a CAPTCHA"
            }
            ErrorCategory::Storage => "Check that the output directory exists and is writable",
            ErrorCategory::Configuration => "Review the command-line flags or the courts file",
            ErrorCategory::Data => "Inspect the saved debug HTML to see what the court returned",
        }
    }
}
