use thiserror::Error;

#[derive(Error, Debug)]
pub enum FizzBuzzError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid configuration value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("response too large: {size} bytes")]
    ResponseTooLarge { size: u64, limit: usize },

    #[error("response size unknown, will not process")]
    ResponseSizeUnknown,

    #[error("{context}: {source}")]
    DecodeError {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// 遠端服務回傳非 200 的結果
    #[error("{}", remote_status_message(.class, .status, .message))]
    RemoteStatusError {
        class: StatusClass,
        status: String,
        message: String,
    },

    #[error("Number {number} is out of range for the remote service")]
    NumberOutOfRange { number: u64 },

    #[error("Queue is closed for writes")]
    QueueClosed,

    #[error("Task failed: {0}")]
    TaskError(#[from] tokio::task::JoinError),
}

/// 遠端除法服務失敗回應的四種類別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    BadRequest,
    OtherClientError,
    ServerError,
    Unexpected,
}

impl StatusClass {
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        if status == reqwest::StatusCode::BAD_REQUEST {
            StatusClass::BadRequest
        } else if status.is_client_error() {
            StatusClass::OtherClientError
        } else if status.is_server_error() {
            StatusClass::ServerError
        } else {
            StatusClass::Unexpected
        }
    }
}

fn remote_status_message(class: &StatusClass, status: &str, message: &str) -> String {
    match class {
        StatusClass::Unexpected => format!("unexpected status code: {}: {}", status, message),
        _ => format!("{}: {}", status, message),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Data,
    Runtime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FizzBuzzError {
    pub fn config(field: &str, value: impl ToString, reason: impl Into<String>) -> Self {
        FizzBuzzError::InvalidConfigValueError {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            FizzBuzzError::InvalidConfigValueError { .. }
            | FizzBuzzError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            FizzBuzzError::ApiError(_)
            | FizzBuzzError::ResponseTooLarge { .. }
            | FizzBuzzError::ResponseSizeUnknown
            | FizzBuzzError::RemoteStatusError { .. } => ErrorCategory::Network,
            FizzBuzzError::DecodeError { .. }
            | FizzBuzzError::NumberOutOfRange { .. } => ErrorCategory::Data,
            FizzBuzzError::IoError(_)
            | FizzBuzzError::QueueClosed
            | FizzBuzzError::TaskError(_) => ErrorCategory::Runtime,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data => ErrorSeverity::Medium,
            ErrorCategory::Runtime => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FizzBuzzError::InvalidConfigValueError { field, value, .. } => {
                format!("Invalid value '{}' for {}", value, field)
            }
            FizzBuzzError::ConfigValidationError { field, .. } => {
                format!("Could not load configuration ({})", field)
            }
            FizzBuzzError::ApiError(_) => "Could not reach the division service".to_string(),
            FizzBuzzError::TaskError(_) => "The pipeline stopped unexpectedly".to_string(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            FizzBuzzError::InvalidConfigValueError { reason, .. } => reason.clone(),
            FizzBuzzError::ConfigValidationError { .. } => {
                "Check the TOML file syntax and that every ${VAR} is set".to_string()
            }
            FizzBuzzError::ApiError(_) | FizzBuzzError::RemoteStatusError { .. } => {
                "Check that the --endpoint service is running and reachable".to_string()
            }
            FizzBuzzError::ResponseTooLarge { limit, .. } => {
                format!("Raise --max-response-bytes above {} if the service is trusted", limit)
            }
            _ => "Re-run with --verbose for more detail".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FizzBuzzError>;
