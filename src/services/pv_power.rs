/// Full-year PV performance simulation.
///
/// Per-hour chain, driven by the TMY weather series:
///   1. Sun position from timestamp + site coordinates
///   2. Plane-of-array irradiance (isotropic transposition)
///   3. Cell temperature (SAPM, mount-specific coefficients)
///   4. DC power with linear temperature derating
///   5. DC-side losses (soiling, wiring)
///   6. Inversion with efficiency and a hard clip at AC nameplate
///   7. AC-side losses (wiring, availability)
///
/// Deterministic and free of hidden state: the same configuration and
/// weather always produce the same result.
use tracing::{debug, info};

use crate::config::PlantConfig;
use crate::errors::SimError;
use crate::models::results::{HourlyOutput, SimulationResult};
use crate::models::weather::WeatherSeries;
use crate::services::analytics;
use crate::services::cell_temperature::cell_temperature;
use crate::services::solar_geometry::solar_position;
use crate::services::transposition::poa_irradiance;
use crate::services::weather_provider::WeatherProvider;

/// Linear power derating per °C of cell temperature above STC —
/// typical crystalline silicon coefficient.
pub const TEMP_COEFF_PER_C: f64 = 0.004;

/// Standard test condition irradiance (W/m²)
pub const STC_IRRADIANCE_W_M2: f64 = 1000.0;

/// Runs the hourly performance chain over one weather year.
///
/// Zero or negative irradiance hours simply contribute zero power; the
/// temperature derating term is never clamped, so an unusually cold, bright
/// hour may legitimately exceed nameplate DC before the inverter clip.
pub fn simulate(config: &PlantConfig, weather: &WeatherSeries) -> Result<SimulationResult, SimError> {
    config.validate()?;

    let dc_capacity_kw = config.array.dc_capacity_kw();
    let ac_capacity_kw = config.inverter.ac_capacity_kw();
    let thermal = config.mount.thermal_params();
    let losses = &config.losses;

    debug!(
        dc_capacity_kw,
        ac_capacity_kw,
        hours = weather.len(),
        "starting simulation run"
    );

    let mut hours = Vec::with_capacity(weather.len());
    for rec in weather.iter() {
        let sun = solar_position(rec.timestamp, config.site.latitude, config.site.longitude);
        let poa = poa_irradiance(
            rec.ghi_w_m2,
            rec.dni_w_m2,
            rec.dhi_w_m2,
            &sun,
            config.site.tilt_deg,
            config.site.azimuth_deg,
        );
        let cell_temp = cell_temperature(poa.global_w_m2, rec.temp_air_c, rec.wind_speed_m_s, thermal);

        // DC at the array terminals, derated for temperature
        let dc_raw_kw = poa.global_w_m2 / STC_IRRADIANCE_W_M2
            * dc_capacity_kw
            * (1.0 - TEMP_COEFF_PER_C * (cell_temp - 25.0));

        // DC-side losses, then inversion with a hard clip at AC nameplate
        let dc_net_kw = dc_raw_kw * (1.0 - losses.soiling) * (1.0 - losses.dc_wiring);
        let ac_kw = (dc_net_kw * config.inverter.efficiency).min(ac_capacity_kw);
        let ac_final_kw = ac_kw * (1.0 - losses.ac_wiring) * (1.0 - losses.availability);

        hours.push(HourlyOutput {
            timestamp: rec.timestamp,
            poa_global_w_m2: poa.global_w_m2,
            cell_temp_c: cell_temp,
            ac_power_kw: ac_final_kw,
        });
    }

    let kpis = analytics::annual_kpis(&hours, dc_capacity_kw);
    info!(
        annual_yield_kwh = kpis.annual_yield_kwh,
        annual_poa_kwh_m2 = kpis.annual_poa_kwh_m2,
        "simulation run complete"
    );

    Ok(SimulationResult { hours, kpis })
}

/// Fetches the TMY series for the configured site and simulates it.
///
/// A weather failure is surfaced as-is: no retry, no substitute data — the
/// caller decides what to do with a run that could not be fed.
pub async fn simulate_with_provider(
    provider: &dyn WeatherProvider,
    config: &PlantConfig,
) -> Result<SimulationResult, SimError> {
    config.validate()?;
    let weather = provider
        .fetch_tmy(config.site.latitude, config.site.longitude)
        .await?;
    simulate(config, &weather)
}
