//! Economy facade — the call-based API consumed by the UI/CLI layer.
//!
//! One call is one atomic operation: a single lock around the composed
//! rental/insurance/token state gives whole-call atomicity, and every
//! mutating operation is threaded with the authenticated caller identity
//! supplied by the external wallet provider.

pub mod clock;
pub mod config;
pub mod economy;
pub mod error;
pub mod snapshot;

pub use clock::Clock;
pub use config::EconomyConfig;
pub use economy::Economy;
pub use error::EconomyError;
pub use snapshot::EconomySnapshot;
