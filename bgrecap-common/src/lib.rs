//! Common error types and domain models for the bgrecap pipeline

pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use error::{RecapError, Result};
pub use logging::{init_default_logging, init_logging, LoggingConfig};
pub use types::{GameId, PlayRecord};
pub use utils::validate_non_empty;
