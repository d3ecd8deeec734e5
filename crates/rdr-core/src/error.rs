use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("CliError: {0}")]
    Cli(#[from] CliError),
    #[error("ApiError: {0}")]
    Api(#[from] ApiError),
    #[error("ValidationError: {0}")]
    Validation(#[from] ValidationError),
    #[error("NotFoundError: {0}")]
    NotFound(#[from] ResourceNotFound),
    #[error("ConfigError: {0}")]
    Config(#[from] ConfigError),
    #[error("StorageError: {0}")]
    Storage(#[from] StorageError),
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Authentication required: {message}")]
    AuthRequired { message: String, hint: String },
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{method} /api/{endpoint} failed with status {status}: {message}")]
    RequestFailed {
        method: String,
        endpoint: String,
        status: u16,
        message: String,
    },
    #[error("{method} /api/{endpoint} could not be sent: {message}")]
    Transport {
        method: String,
        endpoint: String,
        message: String,
    },
    #[error("Unexpected response from /api/{endpoint}: {message}")]
    InvalidResponse { endpoint: String, message: String },
    #[error("Job {job_id} finished with status {status}: {message}")]
    JobFailed {
        job_id: String,
        status: u8,
        message: String,
    },
    #[error("Job {job_id} produced no result after {attempts} polls")]
    JobTimeout { job_id: String, attempts: u32 },
}

/// Caller-supplied arguments rejected before any request is sent.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A lookup by id or slug matched nothing in the service's response.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{resource_type} '{id}' not found")]
pub struct ResourceNotFound {
    pub resource_type: String,
    pub id: String,
}

impl ResourceNotFound {
    pub fn new(resource_type: impl Into<String>, id: impl ToString) -> Self {
        Self {
            resource_type: resource_type.into(),
            id: id.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("File I/O error at {path}: {source}")]
    FileIo {
        path: String,
        source: std::io::Error,
    },
    #[error("Configuration parse error: {message}")]
    ConfigParseError { message: String },
    #[error("Configuration directory not found")]
    ConfigDirNotFound,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for field '{field}': {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorSeverity {
    Critical,
    High,
    Medium,
    Low,
}

impl ErrorSeverity {
    pub fn emoji(&self) -> &'static str {
        match self {
            ErrorSeverity::Critical => "🚨",
            ErrorSeverity::High => "❌",
            ErrorSeverity::Medium => "⚠️",
            ErrorSeverity::Low => "ℹ️",
        }
    }
}

impl AppError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Cli(_) => ErrorSeverity::Medium,
            AppError::Api(api_error) => match api_error {
                ApiError::RequestFailed {
                    status: 401 | 403, ..
                } => ErrorSeverity::High,
                ApiError::RequestFailed { status, .. } if *status >= 500 => ErrorSeverity::High,
                ApiError::Transport { .. } => ErrorSeverity::High,
                _ => ErrorSeverity::Medium,
            },
            AppError::Validation(_) => ErrorSeverity::Low,
            AppError::NotFound(_) => ErrorSeverity::Medium,
            AppError::Config(_) => ErrorSeverity::High,
            AppError::Storage(_) => ErrorSeverity::Medium,
        }
    }

    pub fn troubleshooting_hint(&self) -> Option<String> {
        match self {
            AppError::Cli(CliError::AuthRequired { hint, .. }) => Some(hint.clone()),
            AppError::Api(ApiError::RequestFailed {
                status: 401 | 403, ..
            }) => Some("Check that RDR_API_KEY holds a valid user API key".to_string()),
            AppError::Api(ApiError::Transport { .. }) => Some(
                "Check that the Redash server is reachable ('rdr-cli config show')".to_string(),
            ),
            AppError::Api(ApiError::JobTimeout { .. }) => {
                Some("Fetch the result later with 'rdr-cli query job <id>'".to_string())
            }
            AppError::NotFound(ResourceNotFound { resource_type, .. })
                if resource_type == "dashboard" =>
            {
                Some("'rdr-cli dashboard list' shows the available dashboards".to_string())
            }
            _ => None,
        }
    }
}
