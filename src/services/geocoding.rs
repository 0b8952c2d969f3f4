/// Free-text address resolution.
///
/// `NominatimClient` talks to the OpenStreetMap Nominatim search API. The
/// outcome type keeps "no match" distinct from "lookup failed"; the default
/// fallback location is applied only by the explicit helper, never inside
/// the client.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::SimError;

pub const NOMINATIM_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Documented fallback site when an address cannot be resolved.
pub const DEFAULT_LATITUDE: f64 = 37.38;
pub const DEFAULT_LONGITUDE: f64 = -5.98;
pub const DEFAULT_LOCATION_NAME: &str = "Seville, Spain (default)";

const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: String,
}

impl ResolvedLocation {
    pub fn default_site() -> Self {
        Self {
            latitude: DEFAULT_LATITUDE,
            longitude: DEFAULT_LONGITUDE,
            display_name: DEFAULT_LOCATION_NAME.to_string(),
        }
    }
}

/// Result of a geocoding attempt that reached the service.
#[derive(Debug, Clone, PartialEq)]
pub enum GeocodeOutcome {
    Found(ResolvedLocation),
    NotFound,
}

#[async_trait]
pub trait GeocodingProvider: Send + Sync {
    async fn resolve(&self, address: &str) -> Result<GeocodeOutcome, SimError>;
}

/// Resolves an address, falling back to the default site when the address
/// is unknown or the geocoder is unreachable. Returns the location and
/// whether the default was substituted, so callers can report the
/// substitution to the user.
pub async fn resolve_or_default(
    provider: &dyn GeocodingProvider,
    address: &str,
) -> (ResolvedLocation, bool) {
    match provider.resolve(address).await {
        Ok(GeocodeOutcome::Found(location)) => (location, false),
        Ok(GeocodeOutcome::NotFound) => {
            warn!(address, fallback = DEFAULT_LOCATION_NAME, "address not found, using default site");
            (ResolvedLocation::default_site(), true)
        }
        Err(e) => {
            warn!(address, error = %e, fallback = DEFAULT_LOCATION_NAME, "geocoding failed, using default site");
            (ResolvedLocation::default_site(), true)
        }
    }
}

// ─── Nominatim wire types ────────────────────────────────────────────────────

/// Nominatim serializes coordinates as strings.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: String,
}

fn place_to_location(place: NominatimPlace, address: &str) -> Result<ResolvedLocation, SimError> {
    let parse = |field: &str, raw: &str| {
        raw.parse::<f64>().map_err(|e| SimError::LocationResolution {
            address: address.to_string(),
            reason: format!("bad {field} {raw:?}: {e}"),
        })
    };
    Ok(ResolvedLocation {
        latitude: parse("latitude", &place.lat)?,
        longitude: parse("longitude", &place.lon)?,
        display_name: place.display_name,
    })
}

// ─── Nominatim client ────────────────────────────────────────────────────────

pub struct NominatimClient {
    client: Client,
    base_url: String,
}

impl NominatimClient {
    pub fn new() -> Result<Self, SimError> {
        Self::with_base_url(NOMINATIM_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, SimError> {
        let client = Client::builder()
            .timeout(LOOKUP_TIMEOUT)
            .user_agent("solar-yield-sim")
            .build()
            .map_err(|e| SimError::LocationResolution {
                address: String::new(),
                reason: e.to_string(),
            })?;
        Ok(Self { client, base_url: base_url.into() })
    }
}

#[async_trait]
impl GeocodingProvider for NominatimClient {
    async fn resolve(&self, address: &str) -> Result<GeocodeOutcome, SimError> {
        let url = format!("{}/search", self.base_url);
        debug!(address, %url, "resolving address");

        let fail = |reason: String| SimError::LocationResolution {
            address: address.to_string(),
            reason,
        };

        let response = self
            .client
            .get(&url)
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| fail(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fail(format!("geocoder returned HTTP {status}")));
        }

        let places: Vec<NominatimPlace> = response.json().await.map_err(|e| fail(e.to_string()))?;
        match places.into_iter().next() {
            Some(place) => Ok(GeocodeOutcome::Found(place_to_location(place, address)?)),
            None => Ok(GeocodeOutcome::NotFound),
        }
    }
}
