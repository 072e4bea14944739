use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tcm_core::TradeId;
use tcm_ports::{Clock, ViolationDetector};

use crate::application::{
    AmendOutcome, DeleteTradeUseCase, FindAllViolationsUseCase, FindViolationsUseCase,
    GetTradeUseCase, Identity, ListTradesUseCase, Permission, ReportTradeUseCase, TokenVerifier,
    TradeDraft, UpdateTradeUseCase, bearer_token,
};
use crate::presentation::rest::{ApiError, dto::*};

use super::AppState;

/// GET /healthz
pub async fn health<C: Clock>(State(state): State<Arc<AppState<C>>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        detector: state.detector.name().to_string(),
        holding_period_days: state.detector.rule().max_days,
    })
}

/// GET /api/trades
pub async fn list_trades<C: Clock>(
    headers: HeaderMap,
    State(state): State<Arc<AppState<C>>>,
) -> Result<Response, ApiError> {
    let identity = authorize(&state, &headers, Permission::GetTrades).await?;

    let trades = ListTradesUseCase::new(Arc::clone(&state.trade_repo))
        .execute_for(&identity.email)
        .await;

    if trades.is_empty() {
        return Ok(no_content());
    }
    Ok(Json(trades).into_response())
}

/// POST /api/trades
pub async fn report_trade<C: Clock>(
    headers: HeaderMap,
    State(state): State<Arc<AppState<C>>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let identity = authorize(&state, &headers, Permission::PostTrades).await?;
    let draft = parse_draft(&body)?;

    let use_case = ReportTradeUseCase::new(
        Arc::clone(&state.clock),
        Arc::clone(&state.trade_repo),
    );
    let trade = use_case.execute(&identity.email, draft).await?;

    Ok(Json(trade).into_response())
}

/// GET /api/trades/{id}
pub async fn get_trade<C: Clock>(
    headers: HeaderMap,
    State(state): State<Arc<AppState<C>>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let identity = authorize(&state, &headers, Permission::GetTrades).await?;
    let id = parse_id(&id)?;

    let trade = GetTradeUseCase::new(Arc::clone(&state.trade_repo))
        .execute(&identity.email, id)
        .await?;

    Ok(Json(trade).into_response())
}

/// PATCH /api/trades/{id}
pub async fn update_trade<C: Clock>(
    headers: HeaderMap,
    State(state): State<Arc<AppState<C>>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let identity = authorize(&state, &headers, Permission::PatchTrades).await?;
    let id = parse_id(&id)?;
    let draft = parse_draft(&body)?;

    let use_case = UpdateTradeUseCase::new(
        Arc::clone(&state.clock),
        Arc::clone(&state.trade_repo),
    );

    match use_case.execute(&identity.email, id, draft).await? {
        AmendOutcome::Updated(trade) => Ok(Json(trade).into_response()),
        AmendOutcome::Unchanged => Ok(no_content()),
    }
}

/// DELETE /api/trades/{id}
pub async fn delete_trade<C: Clock>(
    headers: HeaderMap,
    State(state): State<Arc<AppState<C>>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let identity = authorize(&state, &headers, Permission::DeleteTrades).await?;
    let id = parse_id(&id)?;

    DeleteTradeUseCase::new(Arc::clone(&state.clock), Arc::clone(&state.trade_repo))
        .execute(&identity.email, id)
        .await?;

    Ok(no_content())
}

/// GET /api/violations
pub async fn violations<C: Clock>(
    headers: HeaderMap,
    State(state): State<Arc<AppState<C>>>,
) -> Result<Response, ApiError> {
    let identity = authorize(&state, &headers, Permission::GetViolations).await?;

    let use_case = FindViolationsUseCase::new(
        Arc::clone(&state.trade_repo),
        Arc::clone(&state.detector),
    );

    match use_case.execute(&identity.email).await?.into_report() {
        Some(report) => Ok(Json(report).into_response()),
        None => Ok(no_content()),
    }
}

/// GET /api/all-trades
pub async fn all_trades<C: Clock>(
    headers: HeaderMap,
    State(state): State<Arc<AppState<C>>>,
) -> Result<Response, ApiError> {
    authorize(&state, &headers, Permission::GetAllTrades).await?;

    let trades = ListTradesUseCase::new(Arc::clone(&state.trade_repo))
        .execute_all()
        .await;

    if trades.is_empty() {
        return Ok(no_content());
    }
    Ok(Json(trades).into_response())
}

/// GET /api/all-violations
pub async fn all_violations<C: Clock>(
    headers: HeaderMap,
    State(state): State<Arc<AppState<C>>>,
) -> Result<Response, ApiError> {
    authorize(&state, &headers, Permission::GetAllViolations).await?;

    let use_case = FindAllViolationsUseCase::new(
        Arc::clone(&state.trade_repo),
        Arc::clone(&state.detector),
    );
    let found = use_case.execute().await?;

    if found.is_empty() {
        return Ok(no_content());
    }
    Ok(Json(found).into_response())
}

/// Resolve the bearer token and check it carries `permission`
async fn authorize<C: Clock>(
    state: &AppState<C>,
    headers: &HeaderMap,
    permission: Permission,
) -> Result<Identity, ApiError> {
    let header = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    let token = bearer_token(header)?;

    let identity = state.token_verifier.verify(token).await?;
    identity.require(permission).inspect_err(|_| {
        tracing::warn!(
            email = %identity.email,
            permission = %permission,
            "Request rejected for missing permission"
        );
    })?;
    Ok(identity)
}

/// Decode a trade submission; empty submissions are a bad request
fn parse_draft(body: &Bytes) -> Result<TradeDraft, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::no_input());
    }

    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| ApiError::bad_request(format!("Failed to decode JSON object: {}", e)))?;

    let is_empty = match &value {
        serde_json::Value::Null => true,
        serde_json::Value::Object(fields) => fields.is_empty(),
        serde_json::Value::Array(items) => items.is_empty(),
        _ => false,
    };
    if is_empty {
        return Err(ApiError::no_input());
    }

    serde_json::from_value(value).map_err(|e| ApiError::unprocessable(e.to_string()))
}

/// Non-numeric ids cannot name a trade
fn parse_id(raw: &str) -> Result<TradeId, ApiError> {
    raw.parse().map_err(|_| ApiError::not_found())
}

fn no_content() -> Response {
    StatusCode::NO_CONTENT.into_response()
}
