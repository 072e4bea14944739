mod delete_trade;
mod error;
mod find_violations;
mod query_trades;
mod report_trade;
mod scan_trades;
mod update_trade;

pub use delete_trade::DeleteTradeUseCase;
pub use error::TradeError;
pub use find_violations::{FindAllViolationsUseCase, FindViolationsUseCase, scan_all_reporters};
pub use query_trades::{GetTradeUseCase, ListTradesUseCase};
pub use report_trade::ReportTradeUseCase;
pub use scan_trades::{ScanError, scan_trade_file, scan_trades_json};
pub use update_trade::{AmendOutcome, UpdateTradeUseCase};
