pub mod analytics;
pub mod cell_temperature;
pub mod comparison;
pub mod export;
pub mod geocoding;
pub mod pv_power;
pub mod solar_geometry;
pub mod transposition;
pub mod weather_provider;
