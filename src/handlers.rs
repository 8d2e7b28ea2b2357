use crate::{
    AppState,
    bot::{Activity, BotResponse},
    errors::AppError,
    models::Template,
};
use axum::{Json, extract::State, response::IntoResponse};
use std::sync::Arc;
use tracing;

/// Handler for POST /activities: one inbound chat event in, the replies to deliver out.
pub async fn post_activity(
    State(state): State<Arc<AppState>>,
    Json(activity): Json<Activity>,
) -> Result<Json<Vec<BotResponse>>, AppError> {
    let trigger = activity
        .trigger()
        .ok_or_else(|| AppError::InvalidActivity("expected text or a card submission".to_string()))?;
    tracing::debug!(room_id = %activity.room_id, ?trigger, "Received activity via handler");

    let responses = state.bot.dispatch(&activity, trigger)?;
    tracing::info!(room_id = %activity.room_id, responses = responses.len(), "Handled activity");
    Ok(Json(responses))
}

/// Handler for GET /templates
pub async fn list_templates(State(state): State<Arc<AppState>>) -> Json<Vec<Template>> {
    let templates = state.bot.workflow().catalog().templates().to_vec();
    tracing::debug!("Listing {} templates via handler", templates.len());
    Json(templates)
}

/// Handler for GET /health
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok", "version": state.app_version }))
}
