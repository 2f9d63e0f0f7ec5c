use crate::pipeline::{Generation, Pipeline};
use feedback_interp::{FeedbackOptions, TransformationRequest, TransformationResult};

/// Feedback form state owned by the presentation layer
///
/// The pipeline never holds any of this; each submission passes a snapshot in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackForm {
    pub input_text: String,
    pub options: FeedbackOptions,
    pub output_text: String,
}

impl FeedbackForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate is only offered for non-blank input
    pub fn can_generate(&self) -> bool {
        !self.input_text.trim().is_empty()
    }

    /// Snapshot of the current input and options
    pub fn request(&self) -> TransformationRequest {
        TransformationRequest::new(self.input_text.clone(), self.options)
    }

    /// Show a result: the output, or the failure message in its place
    pub fn show(&mut self, result: &TransformationResult) {
        self.output_text = match result {
            Ok(output) => output.clone(),
            Err(failure) => failure.display_message().to_string(),
        };
    }

    /// Reset input, output and every option
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Submit the form through `pipeline`
    ///
    /// Returns `true` when the output was updated. A busy pipeline or blank input
    /// leaves the form untouched.
    pub async fn submit(&mut self, pipeline: &Pipeline) -> bool {
        match pipeline.generate(self.request()).await {
            Generation::Completed(result) => {
                self.show(&result);
                true
            }
            Generation::Busy | Generation::BlankInput => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockInterpreter, MockMode};
    use feedback_interp::{GENERIC_FAILURE_MESSAGE, TransformationFailure};
    use std::sync::Arc;

    #[test]
    fn test_can_generate_requires_text() {
        let mut form = FeedbackForm::new();
        assert!(!form.can_generate());
        form.input_text = "   ".to_string();
        assert!(!form.can_generate());
        form.input_text = "Good job".to_string();
        assert!(form.can_generate());
    }

    #[test]
    fn test_request_snapshots_state() {
        let mut form = FeedbackForm::new();
        form.input_text = "Good job".to_string();
        form.options.soften = true;
        let request = form.request();

        form.options.soften = false;
        assert!(request.options.soften);
        assert_eq!(request.text, "Good job");
    }

    #[test]
    fn test_show_output_and_failure() {
        let mut form = FeedbackForm::new();
        form.show(&Ok("rewritten".to_string()));
        assert_eq!(form.output_text, "rewritten");

        form.show(&Err(TransformationFailure::new("error")));
        assert_eq!(form.output_text, "error");

        form.show(&Err(TransformationFailure::new("")));
        assert_eq!(form.output_text, GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut form = FeedbackForm {
            input_text: "text".to_string(),
            options: FeedbackOptions::new().with_simplify(true).with_soften(true),
            output_text: "output".to_string(),
        };
        form.clear();
        assert_eq!(form, FeedbackForm::new());
        assert!(form.options.is_empty());
    }

    #[tokio::test]
    async fn test_submit_local() {
        let pipeline = Pipeline::local();
        let mut form = FeedbackForm::new();
        form.input_text = "Please utilize this.".to_string();
        form.options = FeedbackOptions::new().with_simplify(true).with_soften(true);

        assert!(form.submit(&pipeline).await);
        assert_eq!(
            form.output_text,
            "Consider the following suggestion:\n\nPlease use this."
        );
    }

    #[tokio::test]
    async fn test_submit_blank_leaves_output() {
        let pipeline = Pipeline::local();
        let mut form = FeedbackForm::new();
        form.output_text = "previous".to_string();
        assert!(!form.submit(&pipeline).await);
        assert_eq!(form.output_text, "previous");
    }

    #[tokio::test]
    async fn test_submit_failure_shows_detail() {
        let pipeline = Pipeline::new(Arc::new(MockInterpreter::new(MockMode::Detail(
            "error".to_string(),
        ))));
        let mut form = FeedbackForm::new();
        form.input_text = "hello".to_string();
        assert!(form.submit(&pipeline).await);
        assert_eq!(form.output_text, "error");
    }
}
