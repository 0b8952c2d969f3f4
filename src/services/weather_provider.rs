/// TMY weather retrieval.
///
/// The `WeatherProvider` trait is the seam between the simulation core and
/// the network; `PvgisClient` is the production implementation against the
/// PVGIS TMY API. Failures are always surfaced as typed errors — the
/// provider never substitutes synthetic data.
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use crate::errors::SimError;
use crate::models::weather::{WeatherRecord, WeatherSeries};

/// PVGIS v5.3 API root (JRC, European Commission)
pub const PVGIS_BASE_URL: &str = "https://re.jrc.ec.europa.eu/api/v5_3";

/// Recommended network timeout for the TMY download
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// TMY months are sampled from different source years; all timestamps are
/// remapped onto this non-leap reference year so the series is a strictly
/// increasing single calendar year.
const REFERENCE_YEAR: i32 = 1990;

/// Supplies the hourly typical-meteorological-year series for a location.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn fetch_tmy(&self, latitude: f64, longitude: f64) -> Result<WeatherSeries, SimError>;
}

// ─── PVGIS wire types ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct PvgisResponse {
    outputs: PvgisOutputs,
}

#[derive(Debug, Deserialize)]
struct PvgisOutputs {
    tmy_hourly: Vec<PvgisHour>,
}

#[derive(Debug, Deserialize)]
struct PvgisHour {
    /// "YYYYMMDD:HHMM"
    #[serde(rename = "time(UTC)")]
    time: String,
    #[serde(rename = "T2m")]
    temp_air: f64,
    #[serde(rename = "G(h)")]
    ghi: f64,
    #[serde(rename = "Gb(n)")]
    dni: f64,
    #[serde(rename = "Gd(h)")]
    dhi: f64,
    #[serde(rename = "WS10m")]
    wind_speed: f64,
}

fn parse_pvgis_timestamp(raw: &str) -> Result<chrono::DateTime<Utc>, SimError> {
    let naive = NaiveDateTime::parse_from_str(raw, "%Y%m%d:%H%M")
        .map_err(|e| SimError::weather(format!("bad timestamp {raw:?}: {e}")))?;
    let remapped = naive
        .with_year(REFERENCE_YEAR)
        .ok_or_else(|| SimError::weather(format!("timestamp {raw:?} has no equivalent in {REFERENCE_YEAR}")))?;
    Ok(remapped.and_utc())
}

fn records_from_wire(hours: Vec<PvgisHour>) -> Result<Vec<WeatherRecord>, SimError> {
    hours
        .into_iter()
        .map(|h| {
            Ok(WeatherRecord {
                timestamp: parse_pvgis_timestamp(&h.time)?,
                ghi_w_m2: h.ghi,
                dni_w_m2: h.dni,
                dhi_w_m2: h.dhi,
                temp_air_c: h.temp_air,
                wind_speed_m_s: h.wind_speed,
            })
        })
        .collect()
}

// ─── PVGIS client ────────────────────────────────────────────────────────────

pub struct PvgisClient {
    client: Client,
    base_url: String,
}

impl PvgisClient {
    pub fn new() -> Result<Self, SimError> {
        Self::with_base_url(PVGIS_BASE_URL)
    }

    /// Client against a non-default API root (used to point at a stub
    /// server in tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, SimError> {
        let client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(SimError::weather)?;
        Ok(Self { client, base_url: base_url.into() })
    }
}

#[async_trait]
impl WeatherProvider for PvgisClient {
    async fn fetch_tmy(&self, latitude: f64, longitude: f64) -> Result<WeatherSeries, SimError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(SimError::config(format!(
                "coordinates ({latitude}, {longitude}) out of range"
            )));
        }

        let url = format!("{}/tmy", self.base_url);
        debug!(latitude, longitude, %url, "fetching TMY weather");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("outputformat", "json".to_string()),
            ])
            .send()
            .await
            .map_err(SimError::weather)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SimError::weather(format!("PVGIS returned HTTP {status}")));
        }

        let payload: PvgisResponse = response.json().await.map_err(SimError::weather)?;
        let records = records_from_wire(payload.outputs.tmy_hourly)?;
        let series = WeatherSeries::new(records)?;
        info!(latitude, longitude, hours = series.len(), "TMY weather retrieved");
        Ok(series)
    }
}
