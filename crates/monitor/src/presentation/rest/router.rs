use axum::{Router, routing::get};
use std::sync::Arc;
use tcm_matching::FifoViolationDetector;
use tcm_ports::Clock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::infrastructure::{InMemoryTradeRepository, StaticTokenVerifier};

/// Application state shared across handlers - uses concrete infrastructure types
pub struct AppState<C: Clock> {
    pub clock: Arc<C>,
    pub trade_repo: Arc<InMemoryTradeRepository>,
    pub token_verifier: Arc<StaticTokenVerifier>,
    pub detector: Arc<FifoViolationDetector>,
}

impl<C: Clock> AppState<C> {
    pub fn new(
        clock: Arc<C>,
        trade_repo: Arc<InMemoryTradeRepository>,
        token_verifier: Arc<StaticTokenVerifier>,
        detector: Arc<FifoViolationDetector>,
    ) -> Self {
        AppState {
            clock,
            trade_repo,
            token_verifier,
            detector,
        }
    }
}

/// Create the REST API router
pub fn create_router<C: Clock + 'static>(state: Arc<AppState<C>>) -> Router {
    Router::new()
        .route("/healthz", get(handlers::health::<C>))
        // Reporter endpoints
        .route(
            "/api/trades",
            get(handlers::list_trades::<C>).post(handlers::report_trade::<C>),
        )
        .route(
            "/api/trades/{id}",
            get(handlers::get_trade::<C>)
                .patch(handlers::update_trade::<C>)
                .delete(handlers::delete_trade::<C>),
        )
        .route("/api/violations", get(handlers::violations::<C>))
        // Compliance officer endpoints
        .route("/api/all-trades", get(handlers::all_trades::<C>))
        .route("/api/all-violations", get(handlers::all_violations::<C>))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
