use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{AgentId, Viewer};
use super::{CycleInputs, KpiConfig, KpiEngine, RankingPolicy, ScoringError};

/// Scoring request. Omitted configuration falls back to the service defaults.
#[derive(Debug, Deserialize)]
pub struct ScoreboardRequest {
    #[serde(flatten)]
    pub inputs: CycleInputs,
    #[serde(default)]
    pub config: Option<KpiConfig>,
    #[serde(default)]
    pub ranking: Option<RankingPolicy>,
    /// Omitting the viewer grants full admin visibility. The embedding service must
    /// fill this from the authenticated session, never from untrusted clients.
    #[serde(default)]
    pub viewer: Option<Viewer>,
}

/// Router builder exposing the scoring endpoints.
pub fn scoreboard_router(defaults: KpiConfig) -> Router {
    Router::new()
        .route("/api/v1/kpi/scoreboard", post(scoreboard_handler))
        .route("/api/v1/kpi/scorecards/:agent_id", post(scorecard_handler))
        .with_state(Arc::new(defaults))
}

fn engine_for(defaults: &KpiConfig, request: &ScoreboardRequest) -> KpiEngine {
    KpiEngine::new(request.config.unwrap_or(*defaults))
        .with_policy(request.ranking.unwrap_or_default())
}

fn scoring_error(error: ScoringError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
}

pub(crate) async fn scoreboard_handler(
    State(defaults): State<Arc<KpiConfig>>,
    Json(request): Json<ScoreboardRequest>,
) -> Response {
    let engine = engine_for(&defaults, &request);
    match engine.evaluate(&request.inputs) {
        Ok(board) => {
            let board = match &request.viewer {
                Some(viewer) => board.visible_to(viewer),
                None => board,
            };
            (StatusCode::OK, Json(board)).into_response()
        }
        Err(error) => scoring_error(error),
    }
}

pub(crate) async fn scorecard_handler(
    State(defaults): State<Arc<KpiConfig>>,
    Path(agent_id): Path<String>,
    Json(request): Json<ScoreboardRequest>,
) -> Response {
    let agent_id = AgentId(agent_id);
    if let Some(viewer) = &request.viewer {
        if !viewer.can_see(&agent_id) {
            let payload = json!({ "error": "agents may only view their own scorecard" });
            return (StatusCode::FORBIDDEN, Json(payload)).into_response();
        }
    }

    let engine = engine_for(&defaults, &request);
    match engine.evaluate(&request.inputs) {
        Ok(board) => match board.scorecard(&agent_id) {
            Some(card) => (StatusCode::OK, Json(card)).into_response(),
            None => {
                let payload = json!({
                    "error": format!("agent {agent_id} is not on the cycle roster"),
                });
                (StatusCode::NOT_FOUND, Json(payload)).into_response()
            }
        },
        Err(error) => scoring_error(error),
    }
}
