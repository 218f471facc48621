// crates/campus-care-types/src/lib.rs
// Shared types for Campus Care (native + WASM compatible)
// No native-only dependencies allowed here

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ═══════════════════════════════════════
// ASSESSMENTS
// ═══════════════════════════════════════

/// Self-assessment questionnaires offered to students
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Instrument {
    Who5,
    Gad7,
    Phq9,
}

impl Instrument {
    pub const ALL: [Instrument; 3] = [Instrument::Who5, Instrument::Gad7, Instrument::Phq9];

    /// Parse an instrument tag; accepts `gad7`, `GAD-7`, `gad_7`
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "who5" => Some(Self::Who5),
            "gad7" => Some(Self::Gad7),
            "phq9" => Some(Self::Phq9),
            _ => None,
        }
    }

    /// Stable lowercase tag used in URLs and JSON
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Who5 => "who5",
            Self::Gad7 => "gad7",
            Self::Phq9 => "phq9",
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Who5 => write!(f, "WHO-5"),
            Self::Gad7 => write!(f, "GAD-7"),
            Self::Phq9 => write!(f, "PHQ-9"),
        }
    }
}

/// Question id (1-based) -> response value
pub type AssessmentResponse = BTreeMap<u32, u32>;

/// Named band derived from a total score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeverityTier {
    Minimal,
    Mild,
    Moderate,
    ModeratelySevere,
    Severe,
    Low,
    Good,
}

impl fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Minimal => "Minimal",
            Self::Mild => "Mild",
            Self::Moderate => "Moderate",
            Self::ModeratelySevere => "Moderately Severe",
            Self::Severe => "Severe",
            Self::Low => "Low",
            Self::Good => "Good",
        };
        f.write_str(label)
    }
}

/// Raw score for one category of an instrument
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: String,
    pub raw_score: u32,
    pub max_score: u32,
    pub percentage: u32,
}

/// Scored assessment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityResult {
    pub instrument: Instrument,
    pub total_score: u32,
    pub max_score: u32,
    pub tier: SeverityTier,
    pub guidance: String,
    pub category_breakdown: Vec<CategoryScore>,
    /// PHQ-9 item 9 answered above zero
    #[serde(default)]
    pub safety_alert: bool,
}

/// One question as rendered by a front-end
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionInfo {
    pub id: u32,
    pub prompt: String,
    pub category: String,
}

/// Questionnaire definition as rendered by a front-end
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstrumentInfo {
    pub instrument: Instrument,
    pub name: String,
    pub instructions: String,
    pub min_response: u32,
    pub max_response: u32,
    pub scale_labels: Vec<String>,
    pub questions: Vec<QuestionInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRequest {
    #[serde(default)]
    pub responses: AssessmentResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitRequest {
    pub student_id: String,
    #[serde(default)]
    pub responses: AssessmentResponse,
}

// ═══════════════════════════════════════
// CHAT
// ═══════════════════════════════════════

/// How a chat reply was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyKind {
    Normal,
    Crisis,
    Error,
}

/// Chat reply returned to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
    #[serde(rename = "type")]
    pub kind: ReplyKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// Prior turn resent by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrisisCheckRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrisisCheckResponse {
    pub is_crisis: bool,
    pub phrase: Option<String>,
}

// ═══════════════════════════════════════
// API ENVELOPE
// ═══════════════════════════════════════

/// Envelope for API error bodies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============================================================================
    // Instrument tests
    // ============================================================================

    #[test]
    fn test_instrument_parse_variants() {
        assert_eq!(Instrument::parse("who5"), Some(Instrument::Who5));
        assert_eq!(Instrument::parse("GAD-7"), Some(Instrument::Gad7));
        assert_eq!(Instrument::parse("phq_9"), Some(Instrument::Phq9));
        assert_eq!(Instrument::parse("bdi"), None);
        assert_eq!(Instrument::parse(""), None);
    }

    #[test]
    fn test_instrument_serde_tag() {
        let json = serde_json::to_string(&Instrument::Gad7).unwrap();
        assert_eq!(json, "\"gad7\"");
        for instrument in Instrument::ALL {
            assert_eq!(Instrument::parse(instrument.tag()), Some(instrument));
        }
    }

    #[test]
    fn test_instrument_display() {
        assert_eq!(Instrument::Phq9.to_string(), "PHQ-9");
    }

    // ============================================================================
    // Chat wire format tests
    // ============================================================================

    #[test]
    fn test_chat_reply_uses_type_field() {
        let reply = ChatReply {
            reply: "hi".to_string(),
            kind: ReplyKind::Crisis,
        };
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["type"], "crisis");
        assert_eq!(json["reply"], "hi");
    }

    #[test]
    fn test_chat_request_defaults() {
        let req: ChatRequest = serde_json::from_str("{}").unwrap();
        assert!(req.message.is_empty());
        assert!(req.history.is_empty());
    }

    #[test]
    fn test_score_request_string_keys() {
        let req: ScoreRequest = serde_json::from_str(r#"{"responses": {"1": 3, "2": 0}}"#).unwrap();
        assert_eq!(req.responses.get(&1), Some(&3));
        assert_eq!(req.responses.get(&2), Some(&0));
    }

    #[test]
    fn test_severity_tier_serializes_variant_name() {
        let json = serde_json::to_string(&SeverityTier::ModeratelySevere).unwrap();
        assert_eq!(json, "\"ModeratelySevere\"");
        assert_eq!(SeverityTier::ModeratelySevere.to_string(), "Moderately Severe");
    }

    // ============================================================================
    // ApiResponse tests
    // ============================================================================

    #[test]
    fn test_api_response_err() {
        let resp = ApiResponse::err("nope");
        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(json, r#"{"success":false,"error":"nope"}"#);
    }
}
