use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize, Serializer};

use crate::models::{Intent, TimeSlot};
use crate::services::conversation;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ChatRequest {
    pub content: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub response: String,
    #[serde(serialize_with = "intent_or_empty")]
    pub intent: Option<Intent>,
    pub available_slots: Vec<TimeSlot>,
    pub next_step: &'static str,
}

/// A message with no extracted intent is reported as `{}`.
fn intent_or_empty<S: Serializer>(intent: &Option<Intent>, serializer: S) -> Result<S::Ok, S::Error> {
    match intent {
        Some(intent) => intent.serialize(serializer),
        None => serde_json::Map::new().serialize(serializer),
    }
}

pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let outcome = conversation::process_chat(&state, payload.content.trim()).await;

    Json(ChatResponse {
        response: outcome.response,
        intent: outcome.intent,
        available_slots: outcome.available_slots,
        next_step: outcome.next_step.as_str(),
    })
}
