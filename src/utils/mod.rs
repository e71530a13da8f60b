//! Utility modules for the engine
//!
//! ## Module Organization
//!
//! - **error**: Error handling and the crate-wide `Result` alias
//! - **logging**: Structured logging initialisation

pub mod error;
pub mod logging;

pub use error::{EngineError, Result};
pub use logging::init_logging;
