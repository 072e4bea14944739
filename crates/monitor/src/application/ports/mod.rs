mod token_verifier;
mod trade_repository;

pub use token_verifier::{AuthError, Identity, Permission, TokenVerifier, bearer_token};
pub use trade_repository::TradeRepository;
