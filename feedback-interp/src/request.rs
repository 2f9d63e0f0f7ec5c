use crate::options::FeedbackOptions;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shown in place of output when a failure carries no message of its own
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// Input text paired with the option snapshot it should be transformed with
///
/// Serializes to the request body of the interpretation endpoint:
/// `{ "text": "...", "options": { "simplify": .., "soften": .., "caseSupport": .. } }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformationRequest {
    pub text: String,
    #[serde(default)]
    pub options: FeedbackOptions,
}

impl TransformationRequest {
    pub fn new(text: impl Into<String>, options: FeedbackOptions) -> Self {
        Self {
            text: text.into(),
            options,
        }
    }

    /// True when the text is empty or whitespace only
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// The single failure kind surfaced to callers of a transformation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformationFailure {
    message: String,
}

impl TransformationFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The message exactly as reported, possibly empty
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The message to show in place of output
    ///
    /// Falls back to [`GENERIC_FAILURE_MESSAGE`] when the reported message is blank.
    pub fn display_message(&self) -> &str {
        if self.message.trim().is_empty() {
            GENERIC_FAILURE_MESSAGE
        } else {
            &self.message
        }
    }
}

impl fmt::Display for TransformationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_message())
    }
}

impl std::error::Error for TransformationFailure {}

/// Output text on success, a failure otherwise; never both
pub type TransformationResult = Result<String, TransformationFailure>;
