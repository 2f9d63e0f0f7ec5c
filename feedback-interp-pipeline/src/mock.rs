//! Mock interpreter for testing
//!
//! Deterministic, network-free provider used to exercise the pipeline's pending
//! gate and failure surfacing without standing up a server.
//!
//! # Example
//!
//! ```ignore
//! use feedback_interp_pipeline::{Interpreter, MockInterpreter, MockMode};
//!
//! #[tokio::test]
//! async fn test_fixed_reply() {
//!     let mock = MockInterpreter::new(MockMode::Fixed("rewritten".to_string()));
//!     let request = TransformationRequest::new("hello", FeedbackOptions::new());
//!     assert_eq!(mock.interpret(&request).await.unwrap(), "rewritten");
//! }
//! ```

use crate::error::{InterpretError, InterpretResult};
use crate::interpreter::Interpreter;
use async_trait::async_trait;
use feedback_interp::{TransformationRequest, apply_rules};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Mock behaviours for testing different scenarios
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Apply the local rules, same as `LocalInterpreter`
    Rules,

    /// Return the input text unchanged
    Echo,

    /// Always answer with this output
    Fixed(String),

    /// Answer with a failure detail, as the service does when it rejects a request
    Detail(String),

    /// Simulate a transport failure
    Unreachable,
}

/// Mock interpreter with an optional simulated latency
#[derive(Debug)]
pub struct MockInterpreter {
    mode: MockMode,
    /// Simulated network delay (in milliseconds)
    delay_ms: u64,
    calls: AtomicUsize,
}

impl MockInterpreter {
    pub fn new(mode: MockMode) -> Self {
        Self::with_delay(mode, 0)
    }

    /// Create a mock that sleeps `delay_ms` before answering
    pub fn with_delay(mode: MockMode, delay_ms: u64) -> Self {
        Self {
            mode,
            delay_ms,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `interpret` calls received so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn answer(&self, request: &TransformationRequest) -> InterpretResult<String> {
        match &self.mode {
            MockMode::Rules => Ok(apply_rules(&request.text, request.options)),
            MockMode::Echo => Ok(request.text.clone()),
            MockMode::Fixed(output) => Ok(output.clone()),
            MockMode::Detail(detail) => Err(InterpretError::ServiceError(detail.clone())),
            MockMode::Unreachable => Err(InterpretError::NetworkError(
                "simulated connection failure".to_string(),
            )),
        }
    }
}

#[async_trait]
impl Interpreter for MockInterpreter {
    async fn interpret(&self, request: &TransformationRequest) -> InterpretResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }
        self.answer(request)
    }

    fn provider_name(&self) -> &str {
        "Mock Interpreter"
    }
}
