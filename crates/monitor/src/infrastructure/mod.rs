pub mod auth;
pub mod config;
pub mod repositories;

pub use auth::StaticTokenVerifier;
pub use config::{ConfigError, HoldingPeriodConfig, MonitorConfig, ServerConfig, TokenConfig};
pub use repositories::InMemoryTradeRepository;
