//! REST endpoints for the chat widget.
//!
//! Each chat turn is stateless on the server: the client sends the last
//! `conversationState` it received and gets the advanced one back.

use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{Instrument, info};
use uuid::Uuid;

use super::eligibility::evaluate;
use super::machine::ConversationMachine;
use super::prompts::{Tone, prompt_for, system_prompt};
use super::state::{ConversationState, EligibilityResult, UserInfo};
use super::tips::tips;
use crate::error::ApiError;
use crate::languages::Language;
use crate::sentiment::{SentimentAnalyzer, detect_tone};

/// Shared state for advisor routes.
#[derive(Clone)]
pub struct AdvisorRouteState {
    pub machine: Arc<ConversationMachine>,
    pub sentiment: Arc<dyn SentimentAnalyzer>,
    /// Used when a request doesn't name a language.
    pub default_language: Language,
}

impl AdvisorRouteState {
    pub fn new(sentiment: Arc<dyn SentimentAnalyzer>, default_language: Language) -> Self {
        Self {
            machine: Arc::new(ConversationMachine::new()),
            sentiment,
            default_language,
        }
    }
}

/// One message of the chat transcript.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub conversation_state: Option<ConversationState>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    /// Scripted prompt for the new stage.
    pub reply: String,
    /// System prompt for the downstream chat model.
    pub system_prompt: String,
    pub conversation_state: ConversationState,
    /// Language the reply should be rendered and spoken in.
    pub language: Language,
    pub tone: Tone,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityRequest {
    #[serde(default)]
    pub loan_type: Option<String>,
    #[serde(default)]
    pub user_info: Option<UserInfo>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EligibilityResponse {
    pub result: EligibilityResult,
    pub tips: Vec<String>,
}

/// GET /health
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "loan-advisor"
    }))
}

/// POST /api/chat
///
/// Advances the conversation with the last message if it came from the
/// user, then returns the next prompt and the updated state.
async fn chat(
    State(state): State<AdvisorRouteState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let span = tracing::info_span!("chat_turn", turn_id = %Uuid::new_v4());
    run_turn(state, req).instrument(span).await.map(Json)
}

async fn run_turn(state: AdvisorRouteState, req: ChatRequest) -> Result<ChatResponse, ApiError> {
    let Some(last) = req.messages.last() else {
        return Err(ApiError::BadRequest("messages must not be empty".to_string()));
    };

    let current = req.conversation_state.unwrap_or_default();
    let language = req
        .language
        .as_deref()
        .map(Language::resolve)
        .unwrap_or(state.default_language);

    let (next, tone) = if last.role == "user" {
        let next = state.machine.advance(&last.content, &current);
        let tone = detect_tone(state.sentiment.as_ref(), &last.content).await;
        (next, tone)
    } else {
        (current, Tone::Neutral)
    };

    let reply = prompt_for(&next);
    let system_prompt = system_prompt(&next, &reply, language.name, tone);

    info!(
        stage = %next.stage,
        language = %language,
        tone = ?tone,
        "Chat turn handled"
    );

    Ok(ChatResponse {
        reply,
        system_prompt,
        conversation_state: next,
        language,
        tone,
    })
}

/// POST /api/eligibility
///
/// Runs the eligibility check and tip selection directly, without a
/// conversation.
async fn eligibility(Json(req): Json<EligibilityRequest>) -> impl IntoResponse {
    let result = evaluate(req.loan_type.as_deref(), req.user_info.as_ref());
    let tips = tips(req.loan_type.as_deref(), req.user_info.as_ref(), Some(&result))
        .into_iter()
        .map(String::from)
        .collect();
    Json(EligibilityResponse { result, tips })
}

/// Build the advisor REST routes.
pub fn advisor_routes(state: AdvisorRouteState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/chat", post(chat))
        .route("/api/eligibility", post(eligibility))
        .with_state(state)
}
