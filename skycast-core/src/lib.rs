//! Core library for the SkyCast weather dashboard.
//!
//! This crate defines:
//! - Configuration & credential handling
//! - The weather gateway (live provider with synthetic fallback)
//! - Condition classification, unit conversion and descriptive bands
//! - Dashboard session state with persisted favorites and recent searches
//!
//! It is used by `skycast-cli`, but can also be reused by other front-ends.

pub mod advice;
pub mod classify;
pub mod config;
pub mod gateway;
pub mod geocode;
pub mod model;
pub mod provider;
pub mod session;
pub mod store;
pub mod synthetic;
pub mod units;

pub use advice::{Advice, advise};
pub use classify::{ConditionSymbol, classify};
pub use config::Config;
pub use gateway::{FallbackReason, Resolution, WeatherGateway};
pub use geocode::{ReverseGeocoder, UNKNOWN_LOCATION};
pub use model::{
    ConditionCategory, Coordinates, DataSource, ForecastEntry, UnitSystem, WeatherBundle,
    WeatherSnapshot,
};
pub use provider::{ProviderError, WeatherProvider};
pub use session::{DashboardSession, SessionError};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use synthetic::{Clock, FixedClock, RandomSource, SeededRandom, SyntheticGenerator, SystemClock};
pub use units::{HumidityBand, TemperatureBand};
