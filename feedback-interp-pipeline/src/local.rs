use crate::error::InterpretResult;
use crate::interpreter::Interpreter;
use async_trait::async_trait;
use feedback_interp::{TransformationRequest, apply_rules};

/// Interpreter backed by the deterministic local rules
///
/// Needs no network access and never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalInterpreter;

#[async_trait]
impl Interpreter for LocalInterpreter {
    async fn interpret(&self, request: &TransformationRequest) -> InterpretResult<String> {
        Ok(apply_rules(&request.text, request.options))
    }

    fn provider_name(&self) -> &str {
        "Local Rules"
    }
}
