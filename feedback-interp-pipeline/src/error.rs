use feedback_interp::TransformationFailure;

/// Error types for interpretation providers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterpretError {
    /// Missing or invalid configuration (endpoint URL, environment)
    ConfigError(String),
    /// Transport failure: connection refused, timeout, broken body
    NetworkError(String),
    /// Non-success HTTP status, with the service's detail when it sent one
    StatusError { status: u16, detail: Option<String> },
    /// The service answered with a failure detail instead of output
    ServiceError(String),
    /// Response body did not have the expected shape
    MalformedResponse(String),
}

impl std::fmt::Display for InterpretError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InterpretError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            InterpretError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            InterpretError::StatusError {
                status,
                detail: Some(detail),
            } => write!(f, "Service returned status {}: {}", status, detail),
            InterpretError::StatusError {
                status,
                detail: None,
            } => write!(f, "Service returned status {}", status),
            InterpretError::ServiceError(detail) => write!(f, "Service error: {}", detail),
            InterpretError::MalformedResponse(msg) => write!(f, "Malformed response: {}", msg),
        }
    }
}

impl std::error::Error for InterpretError {}

impl From<reqwest::Error> for InterpretError {
    fn from(err: reqwest::Error) -> Self {
        InterpretError::NetworkError(err.to_string())
    }
}

/// Collapse provider errors into the single failure kind callers see
///
/// Service-provided details are surfaced as-is; transport and parsing problems
/// get a generic message, the specifics go to the logs.
impl From<InterpretError> for TransformationFailure {
    fn from(err: InterpretError) -> Self {
        match err {
            InterpretError::ConfigError(msg) => TransformationFailure::new(msg),
            InterpretError::NetworkError(_) => {
                TransformationFailure::new("Interpretation service is unreachable")
            }
            InterpretError::StatusError {
                detail: Some(detail),
                ..
            } => TransformationFailure::new(detail),
            InterpretError::StatusError {
                status,
                detail: None,
            } => TransformationFailure::new(format!(
                "Interpretation service returned status {}",
                status
            )),
            InterpretError::ServiceError(detail) => TransformationFailure::new(detail),
            InterpretError::MalformedResponse(_) => {
                TransformationFailure::new("Malformed response from interpretation service")
            }
        }
    }
}

/// Result type for interpretation operations
pub type InterpretResult<T> = Result<T, InterpretError>;
