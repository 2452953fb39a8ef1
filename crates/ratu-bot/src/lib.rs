//! Ratu market-making bot.
//!
//! Binary crate wiring: configuration, logging, session construction,
//! and the engine run. Protocol and trading logic live in the library
//! crates (`ratu-fix`, `ratu-session`, `ratu-feed`, `ratu-mm`).

pub mod app;
pub mod config;
pub mod error;
pub mod logging;

pub use app::Application;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use logging::init_logging;
