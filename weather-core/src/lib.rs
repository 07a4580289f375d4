//! Core library for the `weather-cards` CLI.
//!
//! This crate defines:
//! - The weather card model and raw form input parsing
//! - `CardStore`, the only place the card collection is mutated
//! - Pluggable key-value persistence (file or in-memory)
//! - Derived display values (condition icon, elapsed-time label)
//! - Configuration handling
//!
//! It is used by `weather-cli`, but can also back any other front end.

pub mod config;
pub mod display;
pub mod error;
pub mod model;
pub mod storage;
pub mod store;

pub use config::{Config, StorageConfig};
pub use display::{ConditionIcon, derive_elapsed_label, derive_icon};
pub use error::{NotFoundError, StorageError, ValidationError};
pub use model::{CardInput, TemperatureUnit, WeatherCard, WindUnit};
pub use storage::{Storage, StorageKind, file::FileStorage, memory::MemoryStorage};
pub use store::CardStore;
