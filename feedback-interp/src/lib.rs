//! Written feedback interpretation
//!
//! This crate holds the data model shared by every interpretation strategy, the
//! deterministic local rules used to rewrite feedback without network access, and
//! text-only metrics for scoring a rewrite against its input.
//!
//! # Example
//!
//! ```
//! use feedback_interp::{FeedbackOptions, apply_rules};
//!
//! let options = FeedbackOptions::new().with_simplify(true).with_soften(true);
//! let output = apply_rules("Please utilize this.", options);
//! assert_eq!(output, "Consider the following suggestion:\n\nPlease use this.");
//! ```

pub mod metrics;
pub mod options;
pub mod request;
pub mod rules;

pub use metrics::{SimplifyMetrics, SoftenMetrics};

// Re-export the model for convenient access
pub use options::FeedbackOptions;
pub use request::{
    GENERIC_FAILURE_MESSAGE, TransformationFailure, TransformationRequest, TransformationResult,
};
pub use rules::{CASE_SUPPORT_SUFFIX, NO_INPUT_PLACEHOLDER, SOFTEN_PREFIX, apply_rules, simplify};
