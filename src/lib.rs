//! Energy yield estimation for utility-scale PV plants.
//!
//! Simulates a full typical meteorological year hour by hour — solar
//! geometry, plane-of-array transposition, cell temperature, DC power with
//! temperature derating, the loss chain and inverter clipping — then
//! aggregates the run into annual KPIs, monthly summaries, a loss
//! waterfall and a multi-year degradation forecast. Weather comes from
//! PVGIS, geocoding from Nominatim, both behind traits so the simulation
//! core stays deterministic and offline-testable.

pub mod config;
pub mod errors;
pub mod models;
pub mod services;
pub mod session;

pub use config::PlantConfig;
pub use errors::SimError;
pub use models::results::{ComparisonResult, SimulationResult};
pub use models::weather::WeatherSeries;
pub use services::geocoding::GeocodingProvider;
pub use services::weather_provider::WeatherProvider;
pub use session::SimulationSession;
