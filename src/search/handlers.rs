use super::orchestrator::SearchOrchestrator;
use super::protocol::{ErrorResponse, GraphResponse, SearchResponse, TierSummary};
use super::types::SearchOutcome;
use crate::model::types::{CoexpressionQueryCommand, GraphSize};
use axum::extract::Path;
use axum::http::StatusCode;
use axum::{Extension, Json};
use std::sync::Arc;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
}

pub async fn handle_search(
    Extension(orchestrator): Extension<Arc<SearchOrchestrator>>,
    Json(command): Json<CoexpressionQueryCommand>,
) -> Result<Json<SearchResponse>, ApiError> {
    match orchestrator.execute(command).await {
        SearchOutcome::Completed(results) => Ok(Json(SearchResponse {
            sequence: results.sequence,
            grid_results: results.raw.grid_results.clone(),
            graph_edge_count: results.raw.graph_results.len(),
            tiers: TierSummary::all(&results.tiers),
        })),
        SearchOutcome::Failed(e) => Err(api_error(StatusCode::BAD_GATEWAY, format!("{:#}", e))),
        SearchOutcome::Superseded => {
            tracing::debug!("Search request superseded by a newer one");
            Err(api_error(
                StatusCode::CONFLICT,
                "Search was superseded by a newer request",
            ))
        }
    }
}

pub async fn handle_graph(
    Extension(orchestrator): Extension<Arc<SearchOrchestrator>>,
    Path(size): Path<String>,
) -> Result<Json<GraphResponse>, ApiError> {
    let size: GraphSize = match size.parse() {
        Ok(size) => size,
        Err(e) => {
            tracing::warn!("Rejected graph request: {}", e);
            return Err(api_error(StatusCode::BAD_REQUEST, e.to_string()));
        }
    };

    let Some(tiers) = orchestrator.latest_tiers().await else {
        return Err(api_error(
            StatusCode::NOT_FOUND,
            "No completed coexpression search",
        ));
    };

    Ok(Json(GraphResponse {
        tier: tiers.tier(size).clone(),
        reduced: tiers.tier_is_reduced(size),
        notice: tiers.trim_notice(size),
    }))
}
