//! Transformation pipeline
//!
//! Wraps an [`Interpreter`] so callers always receive a [`TransformationResult`]
//! rather than a provider error, and gates user-triggered generations so at most
//! one is in flight at a time.
//!
//! The gate rejects, it does not queue: a second [`Pipeline::generate`] while one
//! is pending returns [`Generation::Busy`] immediately, and the pending call runs
//! to completion regardless.

use crate::interpreter::Interpreter;
use crate::local::LocalInterpreter;
use feedback_interp::{TransformationRequest, TransformationResult};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};

/// What the presentation layer should show about the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStatus {
    Idle,
    Working,
}

/// Outcome of a user-triggered generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generation {
    /// The interpreter ran; holds its output or failure
    Completed(TransformationResult),
    /// Another generation was still pending; nothing ran
    Busy,
    /// The input was blank; nothing ran
    BlankInput,
}

impl Generation {
    /// The result, if the interpreter ran
    pub fn into_result(self) -> Option<TransformationResult> {
        match self {
            Generation::Completed(result) => Some(result),
            Generation::Busy | Generation::BlankInput => None,
        }
    }
}

/// Clears the pending flag when the generation ends, however it ends
struct PendingGuard<'a>(&'a AtomicBool);

impl<'a> PendingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| PendingGuard(flag))
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct Pipeline {
    interpreter: Arc<dyn Interpreter>,
    pending: AtomicBool,
}

impl Pipeline {
    pub fn new(interpreter: Arc<dyn Interpreter>) -> Self {
        Self {
            interpreter,
            pending: AtomicBool::new(false),
        }
    }

    /// Pipeline over the deterministic local rules
    pub fn local() -> Self {
        Self::new(Arc::new(LocalInterpreter))
    }

    pub fn provider_name(&self) -> &str {
        self.interpreter.provider_name()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    pub fn status(&self) -> PipelineStatus {
        if self.is_pending() {
            PipelineStatus::Working
        } else {
            PipelineStatus::Idle
        }
    }

    /// Run one transformation, collapsing any provider error into a failure
    ///
    /// Not gated: use [`Pipeline::generate`] for user-triggered calls.
    pub async fn transform(&self, request: &TransformationRequest) -> TransformationResult {
        match self.interpreter.interpret(request).await {
            Ok(output) => Ok(output),
            Err(err) => {
                warn!(
                    provider = self.interpreter.provider_name(),
                    error = %err,
                    "interpretation failed"
                );
                Err(err.into())
            }
        }
    }

    /// Run a user-triggered transformation on a request snapshot
    ///
    /// Blank input and calls made while another generation is pending are
    /// rejected without reaching the interpreter.
    pub async fn generate(&self, request: TransformationRequest) -> Generation {
        if request.is_blank() {
            debug!("generation skipped: blank input");
            return Generation::BlankInput;
        }

        let Some(_pending) = PendingGuard::acquire(&self.pending) else {
            debug!("generation rejected: another one is pending");
            return Generation::Busy;
        };

        Generation::Completed(self.transform(&request).await)
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("provider", &self.interpreter.provider_name())
            .field("pending", &self.is_pending())
            .finish()
    }
}
