//! Shared utilities for the Pedal economy.

pub mod logging;
pub mod time;

pub use logging::init_tracing_config;
pub use time::format_duration;
