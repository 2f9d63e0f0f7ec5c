//! Interpretation trait and shared HTTP helpers
//!
//! The `Interpreter` trait is the seam between the pipeline and the strategy that
//! actually rewrites feedback: deterministic local rules, a remote endpoint, or a
//! mock in tests.
//!
//! # Example
//!
//! ```ignore
//! use feedback_interp::{FeedbackOptions, TransformationRequest};
//! use feedback_interp_pipeline::{Interpreter, RemoteInterpreter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let interpreter = RemoteInterpreter::from_env()?;
//!     let request = TransformationRequest::new("Good job", FeedbackOptions::new());
//!     println!("{}", interpreter.interpret(&request).await?);
//!     Ok(())
//! }
//! ```

use crate::error::{InterpretError, InterpretResult};
use async_trait::async_trait;
use feedback_interp::TransformationRequest;
use std::time::Duration;

/// Timeout applied to every outgoing HTTP request
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Strategy that turns a request into output text
///
/// Implementations must give identical output for identical requests when they
/// implement the same rules, whether they run locally or over the network.
#[async_trait]
pub trait Interpreter: Send + Sync {
    /// Transform the request's text according to its options
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The rewritten text
    /// * `Err(InterpretError)` - If the provider could not produce output
    async fn interpret(&self, request: &TransformationRequest) -> InterpretResult<String>;

    /// Name of this provider, used in logs and CLI output
    fn provider_name(&self) -> &str;
}

/// Parse and check an HTTP(S) endpoint URL
pub fn parse_endpoint(endpoint: &str) -> InterpretResult<reqwest::Url> {
    let endpoint = endpoint.trim();
    if endpoint.is_empty() {
        return Err(InterpretError::ConfigError(
            "Endpoint URL cannot be empty".to_string(),
        ));
    }

    let url = reqwest::Url::parse(endpoint).map_err(|e| {
        InterpretError::ConfigError(format!("Invalid endpoint URL '{}': {}", endpoint, e))
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(InterpretError::ConfigError(format!(
            "Unsupported URL scheme '{}' in '{}'",
            scheme, endpoint
        ))),
    }
}

/// Read an endpoint URL from an environment variable
pub fn endpoint_from_env(key: &str) -> InterpretResult<reqwest::Url> {
    let value = std::env::var(key).map_err(|_| {
        InterpretError::ConfigError(format!("{} environment variable not set", key))
    })?;
    parse_endpoint(&value)
}

pub(crate) fn http_client() -> InterpretResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(|e| InterpretError::ConfigError(format!("Failed to create HTTP client: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_endpoint_valid() {
        let url = parse_endpoint("http://127.0.0.1:3000/api/interpret").unwrap();
        assert_eq!(url.path(), "/api/interpret");
        assert!(parse_endpoint("https://example.org/api/interpret").is_ok());
    }

    #[test]
    fn test_parse_endpoint_trims() {
        let url = parse_endpoint("  http://localhost:8000/api/interpret \n").unwrap();
        assert_eq!(url.host_str(), Some("localhost"));
    }

    #[test]
    fn test_parse_endpoint_empty() {
        match parse_endpoint("   ") {
            Err(InterpretError::ConfigError(msg)) => assert!(msg.contains("empty")),
            other => panic!("Expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_endpoint_not_a_url() {
        assert!(matches!(
            parse_endpoint("/api/interpret"),
            Err(InterpretError::ConfigError(_))
        ));
    }

    #[test]
    fn test_parse_endpoint_wrong_scheme() {
        match parse_endpoint("ftp://example.org/interpret") {
            Err(InterpretError::ConfigError(msg)) => assert!(msg.contains("ftp")),
            other => panic!("Expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_endpoint_from_env_missing() {
        match endpoint_from_env("FEEDBACK_INTERP_TEST_UNSET_VARIABLE") {
            Err(InterpretError::ConfigError(msg)) => assert!(msg.contains("not set")),
            other => panic!("Expected ConfigError, got {:?}", other),
        }
    }
}
