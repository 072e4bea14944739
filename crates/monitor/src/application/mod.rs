pub mod ports;
pub mod use_cases;
pub mod validation;

pub use ports::{AuthError, Identity, Permission, TokenVerifier, TradeRepository, bearer_token};
pub use use_cases::{
    AmendOutcome, DeleteTradeUseCase, FindAllViolationsUseCase, FindViolationsUseCase,
    GetTradeUseCase, ListTradesUseCase, ReportTradeUseCase, ScanError, TradeError,
    UpdateTradeUseCase, scan_all_reporters, scan_trade_file, scan_trades_json,
};
pub use validation::{TradeDraft, TradeValidator, ValidationErrors};
