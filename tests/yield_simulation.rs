//! End-to-end simulation runs over a synthetic clear-sky Seville year.
//!
//! The weather generator below builds a physically plausible 8760-hour
//! series from the crate's own solar geometry: Kasten–Young air mass,
//! a Meinel clear-sky beam model scaled for average cloudiness, and a
//! simple diffuse and temperature climatology. The resulting KPIs for the
//! reference plant must land in the ranges expected of a southern-Spain
//! utility-scale site.

use chrono::{Datelike, Duration, TimeZone, Timelike, Utc};

use solar_yield_sim::config::{
    AnalysisParams, ArrayConfig, InverterConfig, LossConfig, MountType, PlantConfig, SiteConfig,
};
use solar_yield_sim::errors::SimError;
use solar_yield_sim::models::weather::{HOURS_PER_YEAR, WeatherRecord, WeatherSeries};
use solar_yield_sim::services::analytics;
use solar_yield_sim::services::comparison;
use solar_yield_sim::services::export::{self, ExportMeta};
use solar_yield_sim::services::pv_power;
use solar_yield_sim::services::solar_geometry::solar_position;
use solar_yield_sim::services::weather_provider::WeatherProvider;
use solar_yield_sim::session::SimulationSession;

use async_trait::async_trait;

const LAT: f64 = 37.38;
const LON: f64 = -5.98;

/// Reference plant: 990 kWp / 800 kWac, south-facing at latitude tilt.
fn seville_plant() -> PlantConfig {
    PlantConfig {
        site: SiteConfig { latitude: LAT, longitude: LON, tilt_deg: 37.0, azimuth_deg: 180.0 },
        array: ArrayConfig { module_wp: 550.0, modules_per_string: 18, strings: 100 },
        inverter: InverterConfig { count: 4, rating_kw: 200.0, efficiency: 0.98 },
        losses: LossConfig::default(),
        mount: MountType::OpenRack,
        analysis: AnalysisParams::default(),
    }
}

/// Clear-sky year with a flat 0.85 clearness factor, hourly for 1990.
fn synthetic_seville_year() -> WeatherSeries {
    let start = Utc.with_ymd_and_hms(1990, 1, 1, 0, 0, 0).unwrap();
    let records: Vec<WeatherRecord> = (0..HOURS_PER_YEAR)
        .map(|i| {
            let timestamp = start + Duration::hours(i as i64);
            let sun = solar_position(timestamp, LAT, LON);
            let sin_e = sun.elevation_deg().to_radians().sin();

            let (ghi, dni, dhi) = if sun.is_daylight() && sin_e > 0.01 {
                // Kasten–Young relative air mass
                let z = sun.zenith_deg;
                let air_mass =
                    1.0 / (z.to_radians().cos() + 0.50572 * (96.07995 - z).powf(-1.6364));
                // Meinel clear-sky beam, scaled for average cloudiness
                let dni = 1353.0 * 0.7_f64.powf(air_mass.powf(0.678)) * 0.85;
                let dhi = 120.0 * sin_e;
                (dni * sin_e + dhi, dni, dhi)
            } else {
                (0.0, 0.0, 0.0)
            };

            // Seasonal + diurnal temperature climatology, afternoon peak
            let doy = timestamp.ordinal() as f64;
            let lst = timestamp.hour() as f64 + LON / 15.0;
            let temp_air_c = 22.0
                + 8.0 * (2.0 * std::f64::consts::PI * (doy - 200.0) / 365.0).cos()
                + 6.0 * (2.0 * std::f64::consts::PI * (lst - 14.0) / 24.0).cos();

            WeatherRecord {
                timestamp,
                ghi_w_m2: ghi,
                dni_w_m2: dni,
                dhi_w_m2: dhi,
                temp_air_c,
                wind_speed_m_s: 1.0,
            }
        })
        .collect();
    WeatherSeries::new(records).expect("synthetic year must satisfy the series invariants")
}

struct SyntheticProvider(WeatherSeries);

#[async_trait]
impl WeatherProvider for SyntheticProvider {
    async fn fetch_tmy(&self, _latitude: f64, _longitude: f64) -> Result<WeatherSeries, SimError> {
        Ok(self.0.clone())
    }
}

#[test]
fn reference_plant_kpis_in_expected_ranges() {
    let config = seville_plant();
    let weather = synthetic_seville_year();
    let result = pv_power::simulate(&config, &weather).unwrap();

    let pr = result.kpis.performance_ratio_pct.unwrap();
    assert!(
        pr > 75.0 && pr < 85.0,
        "performance ratio {pr:.1}% outside the expected 75-85% band"
    );

    let specific = result.kpis.specific_yield_kwh_per_kwp.unwrap();
    assert!(
        specific > 1400.0 && specific < 1900.0,
        "specific yield {specific:.0} kWh/kWp outside 1400-1900"
    );

    // Southern Spain at latitude tilt: well above 1800 kWh/m² in plane
    assert!(
        result.kpis.annual_poa_kwh_m2 > 1800.0,
        "annual POA was only {:.0} kWh/m²",
        result.kpis.annual_poa_kwh_m2
    );

    // Nothing above nameplate after losses
    let net_cap = 800.0 * (1.0 - config.losses.ac_wiring) * (1.0 - config.losses.availability);
    assert!(result.hours.iter().all(|h| h.ac_power_kw <= net_cap + 1e-9));
}

#[test]
fn monthly_rows_sum_to_annual_and_peak_in_summer() {
    let config = seville_plant();
    let weather = synthetic_seville_year();
    let result = pv_power::simulate(&config, &weather).unwrap();

    let rows = analytics::monthly_aggregate(&weather, &result, config.array.dc_capacity_kw());
    assert_eq!(rows.len(), 12);

    let total: f64 = rows.iter().map(|r| r.energy_kwh).sum();
    assert!((total - result.kpis.annual_yield_kwh).abs() < 1e-6 * total);

    // July beats January at a south-facing site in the northern hemisphere
    assert!(rows[6].energy_kwh > rows[0].energy_kwh);
    for row in &rows {
        assert!(row.performance_ratio_pct.is_some());
    }
}

#[test]
fn waterfall_and_degradation_derive_from_the_run() {
    let config = seville_plant();
    let weather = synthetic_seville_year();
    let result = pv_power::simulate(&config, &weather).unwrap();

    let wf = analytics::loss_waterfall(&result.kpis, &config);
    let losses: f64 = wf.steps.iter().map(|s| s.loss_kwh).sum();
    assert!((wf.theoretical_kwh - losses - wf.net_yield_kwh).abs() <= 1e-6 * wf.theoretical_kwh);
    assert!(wf.net_yield_kwh < wf.theoretical_kwh);

    let forecast = analytics::degradation_summary(result.kpis.annual_yield_kwh, &config.analysis);
    assert_eq!(forecast.annual_kwh.len(), 25);
    assert_eq!(forecast.annual_kwh[0], result.kpis.annual_yield_kwh);
    assert!(forecast.annual_kwh[24] < forecast.annual_kwh[0]);
    assert!(forecast.cumulative_kwh < 25.0 * result.kpis.annual_yield_kwh);
    assert!(forecast.cumulative_kwh > 24.0 * forecast.annual_kwh[24]);
}

#[tokio::test]
async fn scenario_snapshot_survives_live_edits() {
    let weather = synthetic_seville_year();
    let provider = SyntheticProvider(weather);
    let mut session = SimulationSession::new();

    let mut config = seville_plant();
    session.save_scenario("baseline", Some("Seville".to_string()), &config);

    // Mutate the live configuration after saving
    config.array.strings = 140;
    config.site.tilt_deg = 20.0;

    let saved_config = {
        let saved = session.scenario("baseline").unwrap();
        assert_eq!(saved.config.array.strings, 100);
        assert_eq!(saved.config.site.tilt_deg, 37.0);
        saved.config.clone()
    };

    // The snapshot still simulates to the baseline result
    let baseline = session
        .run_simulation(&provider, &saved_config)
        .await
        .unwrap();
    let reference = pv_power::simulate(&seville_plant(), &synthetic_seville_year()).unwrap();
    assert!(
        (baseline.kpis.annual_yield_kwh - reference.kpis.annual_yield_kwh).abs() < 1e-6
    );
}

#[tokio::test]
async fn comparing_a_larger_array_reports_positive_deltas() {
    let weather = synthetic_seville_year();
    let provider = SyntheticProvider(weather.clone());
    let mut session = SimulationSession::new();

    let config = seville_plant();
    let current = session.run_simulation(&provider, &config).await.unwrap();

    let mut bigger = config.clone();
    bigger.array.strings = 140;
    session.save_scenario("expanded", None, &bigger);

    let cmp = comparison::compare(&mut session, &provider, &current, "expanded")
        .await
        .unwrap();
    assert!(cmp.annual_yield_kwh.delta_absolute > 0.0);
    assert!(cmp.annual_yield_kwh.delta_pct.unwrap() > 0.0);
    // More DC behind the same inverters clips more: specific yield drops
    assert!(cmp.specific_yield_kwh_per_kwp.unwrap().delta_absolute < 0.0);
    // Identical geometry, identical in-plane irradiation
    assert!(cmp.annual_poa_kwh_m2.delta_absolute.abs() < 1e-6);

    assert!(cmp.revenue_delta(0.10) > 0.0);
}

#[tokio::test]
async fn identical_scenario_compares_flat() {
    let weather = synthetic_seville_year();
    let provider = SyntheticProvider(weather);
    let mut session = SimulationSession::new();

    let config = seville_plant();
    let current = session.run_simulation(&provider, &config).await.unwrap();
    session.save_scenario("same", None, &config);

    let cmp = comparison::compare(&mut session, &provider, &current, "same")
        .await
        .unwrap();
    assert_eq!(cmp.annual_yield_kwh.delta_absolute, 0.0);
    assert_eq!(cmp.annual_yield_kwh.delta_pct, Some(0.0));
}

#[test]
fn csv_exports_cover_the_whole_run() {
    let config = seville_plant();
    let weather = synthetic_seville_year();
    let result = pv_power::simulate(&config, &weather).unwrap();
    let rows = analytics::monthly_aggregate(&weather, &result, config.array.dc_capacity_kw());

    let meta = ExportMeta {
        generated_at: Utc::now(),
        location_name: "Seville, Spain",
        latitude: LAT,
        longitude: LON,
        dc_capacity_kw: config.array.dc_capacity_kw(),
        ac_capacity_kw: config.inverter.ac_capacity_kw(),
        tilt_deg: config.site.tilt_deg,
        azimuth_deg: config.site.azimuth_deg,
        kpis: &result.kpis,
    };

    let monthly = export::monthly_csv(&rows, &meta);
    let data_rows = monthly.lines().filter(|l| !l.starts_with('#')).count();
    assert_eq!(data_rows, 1 + 12);

    let hourly = export::hourly_csv(&weather, &result, &meta);
    let data_rows = hourly.lines().filter(|l| !l.starts_with('#')).count();
    assert_eq!(data_rows, 1 + HOURS_PER_YEAR);
}
