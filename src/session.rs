/// Interactive analysis session state.
///
/// Holds the named scenario snapshots, the last resolved location and two
/// caches: fetched weather keyed by rounded coordinates, and simulation
/// results keyed by the full plant configuration. Scenarios are frozen
/// copies — editing the live configuration never alters a saved snapshot.
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PlantConfig;
use crate::errors::SimError;
use crate::models::results::SimulationResult;
use crate::models::weather::WeatherSeries;
use crate::services::geocoding::ResolvedLocation;
use crate::services::pv_power;
use crate::services::weather_provider::WeatherProvider;

/// A named, frozen copy of a plant configuration taken at save time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub location_name: Option<String>,
    pub config: PlantConfig,
    pub saved_at: DateTime<Utc>,
}

#[derive(Default)]
pub struct SimulationSession {
    scenarios: Vec<Scenario>,
    last_location: Option<ResolvedLocation>,
    weather_cache: HashMap<String, WeatherSeries>,
    result_cache: HashMap<String, SimulationResult>,
}

/// Cache key for a fetched weather series. Coordinates are rounded to
/// four decimals (~11 m), well below the resolution of the TMY grid.
fn weather_key(latitude: f64, longitude: f64) -> String {
    format!("{latitude:.4},{longitude:.4}")
}

impl SimulationSession {
    pub fn new() -> Self {
        Self::default()
    }

    // ─── Scenarios ───────────────────────────────────────────────────────────

    /// Saves a snapshot of the given configuration under a name. Saving
    /// under an existing name replaces that scenario in place, keeping its
    /// position in the insertion order.
    pub fn save_scenario(
        &mut self,
        name: impl Into<String>,
        location_name: Option<String>,
        config: &PlantConfig,
    ) {
        let scenario = Scenario {
            name: name.into(),
            location_name,
            config: config.clone(),
            saved_at: Utc::now(),
        };
        match self.scenarios.iter_mut().find(|s| s.name == scenario.name) {
            Some(existing) => *existing = scenario,
            None => self.scenarios.push(scenario),
        }
    }

    pub fn scenario(&self, name: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.name == name)
    }

    /// Names in insertion order.
    pub fn scenario_names(&self) -> Vec<&str> {
        self.scenarios.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn clear_scenarios(&mut self) {
        self.scenarios.clear();
    }

    // ─── Location ────────────────────────────────────────────────────────────

    pub fn set_last_location(&mut self, location: ResolvedLocation) {
        self.last_location = Some(location);
    }

    pub fn last_location(&self) -> Option<&ResolvedLocation> {
        self.last_location.as_ref()
    }

    // ─── Cached simulation ───────────────────────────────────────────────────

    /// Runs a simulation for the configuration, reusing cached weather for
    /// the site and a cached result for an identical configuration. Returns
    /// an owned copy; cached entries are never handed out by reference.
    pub async fn run_simulation(
        &mut self,
        provider: &dyn WeatherProvider,
        config: &PlantConfig,
    ) -> Result<SimulationResult, SimError> {
        config.validate()?;

        // The memo key is the full serialized configuration; serialization
        // of these plain structs cannot fail.
        let result_key = serde_json::to_string(config).ok();
        if let Some(key) = &result_key {
            if let Some(cached) = self.result_cache.get(key) {
                debug!("simulation result served from cache");
                return Ok(cached.clone());
            }
        }

        let weather = self
            .weather_for(provider, config.site.latitude, config.site.longitude)
            .await?;
        let result = pv_power::simulate(config, &weather)?;

        if let Some(key) = result_key {
            self.result_cache.insert(key, result.clone());
        }
        Ok(result)
    }

    async fn weather_for(
        &mut self,
        provider: &dyn WeatherProvider,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherSeries, SimError> {
        let key = weather_key(latitude, longitude);
        if let Some(cached) = self.weather_cache.get(&key) {
            debug!(%key, "weather series served from cache");
            return Ok(cached.clone());
        }
        let series = provider.fetch_tmy(latitude, longitude).await?;
        self.weather_cache.insert(key, series.clone());
        Ok(series)
    }
}
