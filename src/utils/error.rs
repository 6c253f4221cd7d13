use thiserror::Error;

/// 查詢失敗時一律回報給呼叫端的訊息
pub const LOOKUP_FAILURE_MESSAGE: &str = "Failed to check expiration";

/// Failure of a single registrar read, without domain context.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    #[error("RPC transport failed: {0}")]
    Transport(String),

    #[error("RPC endpoint returned HTTP {0}")]
    HttpStatus(u16),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Malformed registrar response: {0}")]
    Decode(String),

    #[error("Expiration value out of range: {0}")]
    OutOfRange(String),
}

/// 單一網域的查詢錯誤，會被轉成結果中的 `error` 欄位而不會中斷批次
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Expiration lookup failed for {domain}: {source}")]
pub struct LookupError {
    pub domain: String,
    #[source]
    pub source: OracleError,
}

impl LookupError {
    pub fn new(domain: impl Into<String>, source: OracleError) -> Self {
        Self {
            domain: domain.into(),
            source,
        }
    }
}

#[derive(Error, Debug)]
pub enum SnipeError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Failed to process ENS domains: {message}")]
    AggregateFailure { message: String },

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Processing,
    Network,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SnipeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SnipeError::InvalidInput { .. } => ErrorCategory::Input,
            SnipeError::AggregateFailure { .. } => ErrorCategory::Processing,
            SnipeError::HttpError(_) => ErrorCategory::Network,
            SnipeError::CsvError(_)
            | SnipeError::IoError(_)
            | SnipeError::SerializationError(_) => ErrorCategory::Storage,
            SnipeError::ConfigValidationError { .. }
            | SnipeError::InvalidConfigValueError { .. }
            | SnipeError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Processing | ErrorCategory::Storage => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SnipeError::InvalidInput { .. } => {
                "Check that the input CSV has the domain column and at least one row"
            }
            SnipeError::AggregateFailure { .. } => {
                "Re-run the scan; if it keeps failing, lower the batch size"
            }
            SnipeError::HttpError(_) => "Check the RPC endpoint and your network connection",
            SnipeError::CsvError(_) => "Make sure the input file is valid CSV with a header row",
            SnipeError::IoError(_) => "Check that the input and output paths exist and are accessible",
            SnipeError::SerializationError(_) => {
                "The existing output file is not valid JSON; move it away and retry"
            }
            SnipeError::ConfigValidationError { .. }
            | SnipeError::InvalidConfigValueError { .. } => {
                "Fix the configuration value and run again"
            }
            SnipeError::MissingConfigError { .. } => {
                "Provide --rpc-url or set ALCHEMY_API_KEY"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SnipeError::InvalidInput { message } => format!("No domains to scan: {}", message),
            SnipeError::AggregateFailure { .. } => "Failed to process ENS domains.".to_string(),
            SnipeError::MissingConfigError { field } => {
                format!("Missing required setting '{}'", field)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SnipeError>;
