// crates/campus-care-server/src/chat/mod.rs
// Stateless chat proxy: crisis gate first, then one provider call

mod prompt;

pub use prompt::{FALLBACK_REPLY, SYSTEM_PROMPT};

use campus_care_types::{ChatMessage, ChatReply, ChatRole, ReplyKind};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::crisis::{CRISIS_REPLY, CrisisDetector};
use crate::error::{CareError, Result};
use crate::llm::{LlmClient, Message};

/// Most recent history messages forwarded with a turn
const MAX_HISTORY_MESSAGES: usize = 12;

/// One handled chat turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub message: String,
    pub is_crisis: bool,
    pub reply: String,
    pub kind: ReplyKind,
}

impl ChatTurn {
    pub fn to_reply(&self) -> ChatReply {
        ChatReply {
            reply: self.reply.clone(),
            kind: self.kind,
        }
    }
}

/// Chat proxy. Holds no per-conversation state; callers resend history.
#[derive(Clone)]
pub struct ChatService {
    detector: Arc<CrisisDetector>,
    llm: Arc<dyn LlmClient>,
}

impl ChatService {
    pub fn new(detector: Arc<CrisisDetector>, llm: Arc<dyn LlmClient>) -> Self {
        Self { detector, llm }
    }

    pub fn detector(&self) -> &CrisisDetector {
        &self.detector
    }

    /// Handle one turn.
    ///
    /// Errors only for an empty message. Provider failures become an
    /// `error`-kind turn with the fallback reply.
    #[instrument(skip_all, fields(message_len = message.len(), history = history.len()))]
    pub async fn handle_turn(&self, message: &str, history: &[ChatMessage]) -> Result<ChatTurn> {
        if message.trim().is_empty() {
            return Err(CareError::InvalidInput("message is required".to_string()));
        }

        if let Some(phrase) = self.detector.matched_phrase(message) {
            info!(phrase = %phrase, "Crisis phrase detected, returning safety message");
            return Ok(ChatTurn {
                message: message.to_string(),
                is_crisis: true,
                reply: CRISIS_REPLY.to_string(),
                kind: ReplyKind::Crisis,
            });
        }

        let messages = build_messages(message, history);
        let (reply, kind) = match self.llm.chat(messages).await {
            Ok(result) => match result.text() {
                Some(text) => (text.to_string(), ReplyKind::Normal),
                None => {
                    warn!(request_id = %result.request_id, "Provider returned an empty completion");
                    (FALLBACK_REPLY.to_string(), ReplyKind::Error)
                }
            },
            Err(e) => {
                warn!(model = %self.llm.model_name(), error = %e, "Chat provider call failed");
                (FALLBACK_REPLY.to_string(), ReplyKind::Error)
            }
        };

        Ok(ChatTurn {
            message: message.to_string(),
            is_crisis: false,
            reply,
            kind,
        })
    }
}

/// System prompt, the tail of the history, then the new message
fn build_messages(message: &str, history: &[ChatMessage]) -> Vec<Message> {
    let start = history.len().saturating_sub(MAX_HISTORY_MESSAGES);
    let mut messages = Vec::with_capacity(history.len() - start + 2);
    messages.push(Message::system(SYSTEM_PROMPT));
    messages.extend(
        history[start..]
            .iter()
            .filter(|m| !m.content.trim().is_empty())
            .map(|m| match m.role {
                ChatRole::User => Message::user(&m.content),
                ChatRole::Assistant => Message::assistant(&m.content),
            }),
    );
    messages.push(Message::user(message));
    messages
}
