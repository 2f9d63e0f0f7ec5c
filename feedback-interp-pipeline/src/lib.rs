//! Interpretation strategies for feedback-interp
//!
//! This crate runs the feedback transformation either locally or through a remote
//! interpretation service, behind a single `Interpreter` trait, and surfaces the
//! outcome to a presentation layer as a `TransformationResult`.
//!
//! # Workflow Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use feedback_interp::FeedbackOptions;
//! use feedback_interp_pipeline::{FeedbackForm, Pipeline, RemoteInterpreter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Pick a strategy
//!     let pipeline = Pipeline::new(Arc::new(RemoteInterpreter::from_env()?));
//!
//!     // 2. Fill in the form
//!     let mut form = FeedbackForm::new();
//!     form.input_text = "Please utilize this.".to_string();
//!     form.options = FeedbackOptions::new().with_simplify(true);
//!
//!     // 3. Submit; output or failure message lands in the form
//!     form.submit(&pipeline).await;
//!     println!("{}", form.output_text);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod form;
pub mod interpreter;
pub mod local;
pub mod mock;
pub mod pipeline;
pub mod records;
pub mod remote;

// Integration tests (only available during testing)
#[cfg(test)]
mod integration_tests;

// Re-export main types for convenient access
pub use error::{InterpretError, InterpretResult};
pub use form::FeedbackForm;
pub use interpreter::{HTTP_TIMEOUT, Interpreter, endpoint_from_env, parse_endpoint};
pub use local::LocalInterpreter;
pub use mock::{MockInterpreter, MockMode};
pub use pipeline::{Generation, Pipeline, PipelineStatus};
pub use records::{FeedbackRecord, RecordsClient, format_created_at};
pub use remote::RemoteInterpreter;
