//! Core utilities, configuration, errors, and the quota tracker

pub mod config;
pub mod error;
pub mod logging;
pub mod process;
pub mod quota;
pub mod utils;

// Re-exports for convenience
pub use error::{AppError, AppResult};
pub use logging::{init_logger, log_broker_configuration};
pub use quota::{QuotaReservation, QuotaTracker};
