/// Aggregation of an hourly simulation run into reporting figures:
/// annual KPIs, calendar-month sums, the annual loss waterfall and the
/// multi-year degradation forecast.
use chrono::Datelike;

use crate::config::{AnalysisParams, PlantConfig};
use crate::models::results::{
    AnnualKpis, DegradationForecast, HourlyOutput, LossWaterfall, MonthlyRow, SimulationResult,
    WaterfallStep,
};
use crate::models::weather::WeatherSeries;

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Fraction of theoretical energy booked as temperature loss in the
/// waterfall. A reporting simplification, not a per-hour integral.
pub const WATERFALL_TEMPERATURE_FRACTION: f64 = 0.08;

// ─── Annual KPIs ─────────────────────────────────────────────────────────────

/// Computes the scalar KPIs for one simulated year.
///
/// Each record covers one hour, so summing kW over the series yields kWh.
/// Ratios against a zero capacity are reported as None.
pub fn annual_kpis(hours: &[HourlyOutput], dc_capacity_kw: f64) -> AnnualKpis {
    let annual_poa_kwh_m2 = hours.iter().map(|h| h.poa_global_w_m2).sum::<f64>() / 1000.0;
    let annual_yield_kwh = hours.iter().map(|h| h.ac_power_kw).sum::<f64>();

    let specific_yield_kwh_per_kwp =
        (dc_capacity_kw > 0.0).then(|| annual_yield_kwh / dc_capacity_kw);
    let theoretical = annual_poa_kwh_m2 * dc_capacity_kw;
    let performance_ratio_pct = (theoretical > 0.0).then(|| annual_yield_kwh / theoretical * 100.0);

    AnnualKpis {
        annual_poa_kwh_m2,
        annual_yield_kwh,
        specific_yield_kwh_per_kwp,
        performance_ratio_pct,
    }
}

// ─── Monthly aggregation ─────────────────────────────────────────────────────

/// Groups the hourly series by calendar month (12 rows, month boundaries,
/// not rolling windows), summing GHI, POA and AC energy, with a per-month
/// performance ratio.
pub fn monthly_aggregate(
    weather: &WeatherSeries,
    result: &SimulationResult,
    dc_capacity_kw: f64,
) -> Vec<MonthlyRow> {
    let mut ghi = [0.0f64; 12];
    let mut poa = [0.0f64; 12];
    let mut energy = [0.0f64; 12];

    for (rec, hour) in weather.iter().zip(result.hours.iter()) {
        let m = rec.timestamp.month0() as usize;
        ghi[m] += rec.ghi_w_m2 / 1000.0;
        poa[m] += hour.poa_global_w_m2 / 1000.0;
        energy[m] += hour.ac_power_kw;
    }

    (0..12)
        .map(|m| {
            let theoretical = poa[m] * dc_capacity_kw;
            MonthlyRow {
                month: m as u32 + 1,
                label: MONTH_LABELS[m].to_string(),
                ghi_kwh_m2: ghi[m],
                poa_kwh_m2: poa[m],
                energy_kwh: energy[m],
                performance_ratio_pct: (theoretical > 0.0).then(|| energy[m] / theoretical * 100.0),
            }
        })
        .collect()
}

// ─── Loss waterfall ──────────────────────────────────────────────────────────

/// Decomposes annual theoretical energy into sequential deductions.
///
/// Each deduction is a fraction of the energy *remaining* after the prior
/// steps (cascading, not independent percentages of the total), ending at
/// the net yield. The ordering — temperature, soiling, DC wiring, inverter,
/// AC wiring, availability — mirrors the physical chain and must not be
/// reordered or the steps stop summing to the net.
pub fn loss_waterfall(kpis: &AnnualKpis, config: &PlantConfig) -> LossWaterfall {
    let theoretical_kwh = kpis.annual_poa_kwh_m2 * config.array.dc_capacity_kw();
    let mut remaining = theoretical_kwh;
    let mut steps = Vec::with_capacity(6);

    let mut deduct = |label: &'static str, fraction: f64, remaining: &mut f64| {
        let loss = *remaining * fraction;
        *remaining -= loss;
        steps.push(WaterfallStep { label, loss_kwh: loss });
    };

    deduct("Temperature", WATERFALL_TEMPERATURE_FRACTION, &mut remaining);
    deduct("Soiling", config.losses.soiling, &mut remaining);
    deduct("DC wiring", config.losses.dc_wiring, &mut remaining);
    deduct("Inverter", 1.0 - config.inverter.efficiency, &mut remaining);
    deduct("AC wiring", config.losses.ac_wiring, &mut remaining);
    deduct("Availability", config.losses.availability, &mut remaining);

    LossWaterfall { theoretical_kwh, steps, net_yield_kwh: remaining }
}

// ─── Degradation forecast ────────────────────────────────────────────────────

/// Lazy per-year energy forecast: `annual · (1 − rate)^y` for y = 0..years.
/// Year 1 (index 0) carries no degradation.
pub fn degradation_forecast(
    annual_yield_kwh: f64,
    years: u32,
    degradation_rate: f64,
) -> impl Iterator<Item = f64> {
    (0..years).map(move |y| annual_yield_kwh * (1.0 - degradation_rate).powi(y as i32))
}

/// Collects the forecast over the configured horizon with its cumulative sum.
pub fn degradation_summary(annual_yield_kwh: f64, params: &AnalysisParams) -> DegradationForecast {
    let annual_kwh: Vec<f64> =
        degradation_forecast(annual_yield_kwh, params.horizon_years, params.degradation_rate)
            .collect();
    let cumulative_kwh = annual_kwh.iter().sum();
    DegradationForecast { annual_kwh, cumulative_kwh }
}
