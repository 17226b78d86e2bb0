use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use sentinel_dns_domain::DomainError;
use tracing::debug;

use super::doh;
use crate::{
    dto::{AddRuleRequest, RemoveRuleRequest, RuleResponse, StatusResponse},
    errors::ApiError,
    extract::JsonBody,
    state::AppState,
};

/// Management is matched on method and path together; any other method on
/// these paths falls through to DoH.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/add_rule", post(add_rule).fallback(doh::query))
        .route("/remove_rule", post(remove_rule).fallback(doh::query))
        .route("/rules", get(missing_user_id).fallback(doh::query))
        .route("/rules/", get(missing_user_id).fallback(doh::query))
        .route("/rules/{user_id}", get(get_rules).fallback(doh::query))
}

async fn add_rule(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<AddRuleRequest>,
) -> Result<(StatusCode, Json<StatusResponse>), ApiError> {
    state
        .rules
        .add_rule
        .execute(&req.user_id, &req.domain)
        .await?;
    Ok((StatusCode::CREATED, Json(StatusResponse::rule_added())))
}

async fn remove_rule(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RemoveRuleRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    state
        .rules
        .remove_rule
        .execute(&req.user_id, req.rule_id)
        .await?;
    Ok(Json(StatusResponse::rule_removed()))
}

async fn get_rules(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<RuleResponse>>, ApiError> {
    let rules = state.rules.get_rules.execute(&user_id).await?;
    debug!(user = %user_id, count = rules.len(), "Rules retrieved");
    Ok(Json(rules.into_iter().map(RuleResponse::from_rule).collect()))
}

async fn missing_user_id() -> ApiError {
    ApiError(DomainError::InvalidUserId("User ID is required".to_string()))
}
