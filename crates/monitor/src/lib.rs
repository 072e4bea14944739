//! Trade Compliance Monitor
//!
//! Reporters submit their securities trades; the monitor flags holding-period
//! violations, i.e. securities bought and sold at a profit within the holding
//! period.
//!
//! # Architecture
//!
//! - **Application**: Use cases, input validation and port interfaces
//!   (TradeRepository, TokenVerifier)
//! - **Infrastructure**: Implementations of ports (InMemoryTradeRepository,
//!   StaticTokenVerifier) and configuration loading
//! - **Presentation**: REST API
//!
//! Domain types live in `tcm-core` and the lot matcher in `tcm-matching`.
//!
//! # Example
//!
//! ```ignore
//! use tcm_monitor::{ComplianceMonitor, MonitorConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = MonitorConfig::from_file("monitor.json").unwrap();
//!     ComplianceMonitor::new(config).run().await.unwrap();
//! }
//! ```

pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use application::{
    ScanError, TokenVerifier, TradeRepository, scan_all_reporters, scan_trade_file,
};
pub use infrastructure::{
    ConfigError, InMemoryTradeRepository, MonitorConfig, StaticTokenVerifier,
};
pub use presentation::{AppState, create_router};

use axum::Router;
use std::sync::Arc;
use tcm_clock::SystemClock;
use tcm_matching::FifoViolationDetector;
use tcm_ports::Clock;
use tokio::net::TcpListener;

/// The monitor service
pub struct ComplianceMonitor<C: Clock + 'static> {
    pub config: MonitorConfig,
    pub clock: Arc<C>,
    pub trade_repo: Arc<InMemoryTradeRepository>,
    pub token_verifier: Arc<StaticTokenVerifier>,
    pub detector: Arc<FifoViolationDetector>,
}

impl<C: Clock + 'static> ComplianceMonitor<C> {
    /// Create a monitor with the given clock
    pub fn with_clock(config: MonitorConfig, clock: Arc<C>) -> Self {
        let token_verifier = Arc::new(StaticTokenVerifier::from_config(&config.tokens));
        let detector = Arc::new(FifoViolationDetector::new(config.holding_period.rule()));

        ComplianceMonitor {
            config,
            clock,
            trade_repo: Arc::new(InMemoryTradeRepository::new()),
            token_verifier,
            detector,
        }
    }

    /// Create the REST API router
    pub fn router(&self) -> Router {
        let state = Arc::new(AppState::new(
            Arc::clone(&self.clock),
            Arc::clone(&self.trade_repo),
            Arc::clone(&self.token_verifier),
            Arc::clone(&self.detector),
        ));

        create_router(state)
    }

    /// Serve the REST API until the process is stopped
    pub async fn run(self) -> anyhow::Result<()> {
        let addr = self.config.bind_address();
        if self.token_verifier.is_empty() {
            tracing::warn!("No tokens configured; every API request will be rejected");
        }

        tracing::info!(
            clock = self.clock.name(),
            max_days = self.config.holding_period.max_days,
            "Compliance monitor listening on {}",
            addr
        );

        let listener = TcpListener::bind(&addr).await?;
        axum::serve(listener, self.router()).await?;

        Ok(())
    }
}

impl ComplianceMonitor<SystemClock> {
    /// Create a monitor on the wall clock
    pub fn new(config: MonitorConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock::new()))
    }
}
