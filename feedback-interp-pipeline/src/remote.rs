//! Remote interpretation endpoint provider
//!
//! Sends the request as a single JSON `POST` and reads back either an `output`
//! field (success) or a `detail` field (failure). `output` wins when both are
//! present.
//!
//! # Configuration
//!
//! The endpoint is passed to [`RemoteInterpreter::new`] or read from the
//! `FEEDBACK_INTERPRET_URL` environment variable by [`RemoteInterpreter::from_env`].
//!
//! # Example
//!
//! ```ignore
//! use feedback_interp::{FeedbackOptions, TransformationRequest};
//! use feedback_interp_pipeline::{Interpreter, RemoteInterpreter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let interpreter = RemoteInterpreter::new("http://127.0.0.1:3000/api/interpret")?;
//!     let request = TransformationRequest::new(
//!         "Please utilize this.",
//!         FeedbackOptions::new().with_simplify(true),
//!     );
//!     println!("{}", interpreter.interpret(&request).await?);
//!     Ok(())
//! }
//! ```

use crate::error::{InterpretError, InterpretResult};
use crate::interpreter::{Interpreter, endpoint_from_env, http_client, parse_endpoint};
use async_trait::async_trait;
use feedback_interp::TransformationRequest;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;

/// Provider that delegates to an external interpretation service
#[derive(Debug, Clone)]
pub struct RemoteInterpreter {
    /// HTTP client for async requests
    client: reqwest::Client,
    /// Full URL of the interpret endpoint
    endpoint: reqwest::Url,
}

impl RemoteInterpreter {
    /// Environment variable holding the endpoint URL
    pub const ENDPOINT_ENV: &'static str = "FEEDBACK_INTERPRET_URL";

    /// Create a provider for an explicit endpoint URL
    ///
    /// # Returns
    ///
    /// * `Ok(Self)` - New provider instance
    /// * `Err(InterpretError)` - If the URL is empty or invalid, or the HTTP client cannot be built
    pub fn new(endpoint: &str) -> InterpretResult<Self> {
        Ok(Self {
            client: http_client()?,
            endpoint: parse_endpoint(endpoint)?,
        })
    }

    /// Create a provider from the `FEEDBACK_INTERPRET_URL` environment variable
    pub fn from_env() -> InterpretResult<Self> {
        Ok(Self {
            client: http_client()?,
            endpoint: endpoint_from_env(Self::ENDPOINT_ENV)?,
        })
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// Turn a status and raw body into output or an error
    ///
    /// Non-success statuses are always errors, carrying the `detail` text if the
    /// body has one. On success `output` takes priority over `detail`; a body with
    /// neither is malformed.
    fn read_reply(status: StatusCode, body: &str) -> InterpretResult<String> {
        let json: Option<Value> = serde_json::from_str(body).ok();
        let field = |name: &str| {
            json.as_ref()
                .and_then(|j| j.get(name))
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        if !status.is_success() {
            return Err(InterpretError::StatusError {
                status: status.as_u16(),
                detail: field("detail"),
            });
        }

        if json.is_none() {
            return Err(InterpretError::MalformedResponse(
                "response body is not JSON".to_string(),
            ));
        }

        if let Some(output) = field("output") {
            return Ok(output);
        }

        match field("detail") {
            Some(detail) => Err(InterpretError::ServiceError(detail)),
            None => Err(InterpretError::MalformedResponse(
                "missing 'output' and 'detail' fields".to_string(),
            )),
        }
    }
}

#[async_trait]
impl Interpreter for RemoteInterpreter {
    async fn interpret(&self, request: &TransformationRequest) -> InterpretResult<String> {
        debug!(
            endpoint = %self.endpoint,
            chars = request.text.chars().count(),
            options = %request.options.describe(),
            "sending interpretation request"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(%status, bytes = body.len(), "interpretation response received");

        Self::read_reply(status, &body)
    }

    fn provider_name(&self) -> &str {
        "Remote Service"
    }
}
