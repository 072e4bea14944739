//! Clock implementations
//!
//! - [`SystemClock`]: wall-clock time for the running service
//! - [`FixedClock`]: frozen, manually advanced time for deterministic tests
//!
//! The service uses the clock for `reported_at` / `trailed_at` stamps and to
//! reject trade dates in the future.

mod fixed;
mod system;

pub use fixed::FixedClock;
pub use system::SystemClock;

// Re-export the Clock trait for convenience
pub use tcm_ports::Clock;
