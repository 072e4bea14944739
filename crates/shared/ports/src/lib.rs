//! Trade Compliance Monitor Ports
//!
//! Port definitions (traits) for the trade compliance monitor.
//! These define the boundaries between domain logic and infrastructure.

mod clock;
mod detection;
mod error;

pub use clock::Clock;
pub use detection::ViolationDetector;
pub use error::{MatchingError, MatchingResult};
