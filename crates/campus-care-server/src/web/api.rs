// crates/campus-care-server/src/web/api.rs
// REST API handlers

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    response::IntoResponse,
};
use campus_care_types::{
    ChatReply, ChatRequest, CrisisCheckRequest, CrisisCheckResponse, InstrumentInfo, ScoreRequest,
    SeverityResult, SubmitRequest,
};

use super::error::ApiError;
use super::state::AppState;
use crate::assessment::{self, instrument_spec, parse_instrument};

// ═══════════════════════════════════════
// HEALTH
// ═══════════════════════════════════════

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

// ═══════════════════════════════════════
// CHAT
// ═══════════════════════════════════════

/// One chat turn: `{message, history?}` -> `{reply, type}`
pub async fn chat(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, ApiError> {
    let Json(req) = body?;
    let turn = state.chat.handle_turn(&req.message, &req.history).await?;
    Ok(Json(turn.to_reply()))
}

pub async fn crisis_check(
    State(state): State<AppState>,
    body: Result<Json<CrisisCheckRequest>, JsonRejection>,
) -> Result<Json<CrisisCheckResponse>, ApiError> {
    let Json(req) = body?;
    let phrase = state.detector.matched_phrase(&req.text).map(str::to_string);
    Ok(Json(CrisisCheckResponse {
        is_crisis: phrase.is_some(),
        phrase,
    }))
}

// ═══════════════════════════════════════
// ASSESSMENTS
// ═══════════════════════════════════════

pub async fn list_instruments() -> Json<Vec<InstrumentInfo>> {
    Json(assessment::catalog())
}

pub async fn get_instrument(Path(tag): Path<String>) -> Result<Json<InstrumentInfo>, ApiError> {
    let instrument = parse_instrument(&tag)?;
    Ok(Json(instrument_spec(instrument).info()))
}

/// Score without recording
pub async fn score_assessment(
    Path(tag): Path<String>,
    body: Result<Json<ScoreRequest>, JsonRejection>,
) -> Result<Json<SeverityResult>, ApiError> {
    let instrument = parse_instrument(&tag)?;
    let Json(req) = body?;
    Ok(Json(assessment::score(&req.responses, instrument)))
}

/// Score and record; 409 while the same student's submission is in flight
pub async fn submit_assessment(
    State(state): State<AppState>,
    Path(tag): Path<String>,
    body: Result<Json<SubmitRequest>, JsonRejection>,
) -> Result<Json<SeverityResult>, ApiError> {
    let instrument = parse_instrument(&tag)?;
    let Json(req) = body?;
    let result = state
        .assessments
        .submit(&req.student_id, instrument, req.responses)
        .await?;
    Ok(Json(result))
}
