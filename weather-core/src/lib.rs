//! Core library for the weather advice service.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather provider abstraction and its Visual Crossing client
//! - Temperature conversion and the clothing recommendation rules
//! - Request/response models and the error taxonomy
//!
//! It is used by `weather-server`, but carries no HTTP server code itself.

pub mod auth;
pub mod config;
pub mod error;
pub mod lookup;
pub mod model;
pub mod provider;
pub mod recommend;

pub use auth::authenticate;
pub use config::{Config, ProviderConfig};
pub use error::WeatherError;
pub use lookup::lookup;
pub use model::{DayObservation, ResponseEnvelope, WeatherRequest, WeatherResult};
pub use provider::{WeatherProvider, provider_from_config};
pub use recommend::{advice, fahrenheit_to_celsius, recommend};
