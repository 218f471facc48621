// crates/campus-care-server/src/web/state.rs
// Web server state management

use std::sync::Arc;

use crate::assessment::{AssessmentService, ProgressSink};
use crate::chat::ChatService;
use crate::crisis::CrisisDetector;
use crate::llm::LlmClient;

/// Shared application state. Cloned per request; everything inside is shared.
#[derive(Clone)]
pub struct AppState {
    /// Crisis gate (also used by the chat proxy)
    pub detector: Arc<CrisisDetector>,

    /// Chat proxy
    pub chat: ChatService,

    /// Scored submissions with the single-flight guard
    pub assessments: AssessmentService,
}

impl AppState {
    /// Create new application state
    pub fn new(
        detector: Arc<CrisisDetector>,
        llm: Arc<dyn LlmClient>,
        progress: Arc<dyn ProgressSink>,
    ) -> Self {
        Self {
            chat: ChatService::new(detector.clone(), llm),
            detector,
            assessments: AssessmentService::new(progress),
        }
    }
}
