use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─── Hourly simulation output ────────────────────────────────────────────────

/// One simulated hour, aligned 1:1 by timestamp with the weather series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourlyOutput {
    pub timestamp: DateTime<Utc>,
    /// Plane-of-array global irradiance (W/m²)
    pub poa_global_w_m2: f64,
    /// Cell temperature (°C)
    pub cell_temp_c: f64,
    /// Net AC power after all losses (kW)
    pub ac_power_kw: f64,
}

// ─── Annual KPIs ─────────────────────────────────────────────────────────────

/// Scalar yield KPIs for one simulated year. Ratios that would divide by a
/// zero capacity are reported as None rather than raising or producing NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnualKpis {
    /// Annual in-plane irradiation (kWh/m²)
    pub annual_poa_kwh_m2: f64,
    /// First-year AC energy (kWh)
    pub annual_yield_kwh: f64,
    /// Energy per installed kWp (kWh/kWp); None when DC capacity is zero
    pub specific_yield_kwh_per_kwp: Option<f64>,
    /// Performance ratio (%), IEC 61724 style; None when undefined
    pub performance_ratio_pct: Option<f64>,
}

/// Result of one full-year run. Created fresh per run and never mutated
/// afterwards; clones are handed out so every caller owns its copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub hours: Vec<HourlyOutput>,
    pub kpis: AnnualKpis,
}

// ─── Monthly aggregation ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRow {
    /// Calendar month, 1..=12
    pub month: u32,
    /// Short month label, e.g. "Jan"
    pub label: String,
    pub ghi_kwh_m2: f64,
    pub poa_kwh_m2: f64,
    pub energy_kwh: f64,
    pub performance_ratio_pct: Option<f64>,
}

// ─── Loss waterfall ──────────────────────────────────────────────────────────

/// Output-only report row; serialized into reports but never read back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaterfallStep {
    pub label: &'static str,
    /// Energy removed at this step (kWh)
    pub loss_kwh: f64,
}

/// Annual theoretical energy decomposed into sequential deductions.
/// Each step is a fraction of the energy remaining after the previous
/// steps, so `theoretical - Σ losses == net_yield` exactly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LossWaterfall {
    pub theoretical_kwh: f64,
    pub steps: Vec<WaterfallStep>,
    pub net_yield_kwh: f64,
}

// ─── Degradation forecast ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegradationForecast {
    /// Energy per year over the horizon (kWh); index 0 is year 1, undegraded
    pub annual_kwh: Vec<f64>,
    /// Total energy over the horizon (kWh)
    pub cumulative_kwh: f64,
}

// ─── Scenario comparison ─────────────────────────────────────────────────────

/// One KPI compared between the active run and a stored scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KpiDelta {
    pub current: f64,
    pub other: f64,
    pub delta_absolute: f64,
    /// (other - current) / current × 100; None when current is zero
    pub delta_pct: Option<f64>,
}

impl KpiDelta {
    pub fn new(current: f64, other: f64) -> Self {
        let delta_absolute = other - current;
        let delta_pct = (current != 0.0).then(|| delta_absolute / current * 100.0);
        Self { current, other, delta_absolute, delta_pct }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub scenario_name: String,
    pub annual_yield_kwh: KpiDelta,
    pub annual_poa_kwh_m2: KpiDelta,
    /// None when either run has zero DC capacity
    pub specific_yield_kwh_per_kwp: Option<KpiDelta>,
    pub performance_ratio_pct: Option<KpiDelta>,
}

impl ComparisonResult {
    /// First-year revenue difference at a flat electricity price ($/kWh).
    /// Illustrative only: no discounting, no tariff model.
    pub fn revenue_delta(&self, price_per_kwh: f64) -> f64 {
        self.annual_yield_kwh.delta_absolute * price_per_kwh
    }

    /// Undiscounted revenue difference over a multi-year horizon.
    pub fn horizon_revenue_delta(&self, price_per_kwh: f64, years: u32) -> f64 {
        self.revenue_delta(price_per_kwh) * years as f64
    }
}
