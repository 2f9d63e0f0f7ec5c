use std::{
    collections::VecDeque,
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
};

use chrono::Utc;
use feedback_interp::FeedbackOptions;
use feedback_interp_pipeline::{FeedbackRecord, Interpreter};

#[derive(Clone)]
pub struct AppState {
    pub interpreter: Arc<dyn Interpreter>,
    pub records: Arc<RecordLog>,
}

impl AppState {
    pub fn new(interpreter: Arc<dyn Interpreter>, record_limit: usize) -> Self {
        Self {
            interpreter,
            records: Arc::new(RecordLog::new(record_limit)),
        }
    }
}

/// Most recent interpretations, newest first, held in memory only
pub struct RecordLog {
    entries: Mutex<VecDeque<FeedbackRecord>>,
    limit: usize,
    next_id: AtomicU64,
}

impl RecordLog {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(limit)),
            limit,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn push(&self, input_text: &str, options: FeedbackOptions, output_text: &str) {
        if self.limit == 0 {
            return;
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let record = FeedbackRecord::new(
            id.to_string(),
            Utc::now(),
            input_text,
            options,
            output_text,
        );

        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.push_front(record);
        entries.truncate(self.limit);
    }

    pub fn list(&self) -> Vec<FeedbackRecord> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.iter().cloned().collect()
    }
}
