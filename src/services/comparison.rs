/// Scenario comparison: re-simulates a stored snapshot and reports KPI
/// deltas against the active run. The stored scenario is never mutated,
/// and a failure in the secondary run leaves the primary result untouched.
use tracing::info;

use crate::errors::SimError;
use crate::models::results::{ComparisonResult, KpiDelta, SimulationResult};
use crate::services::weather_provider::WeatherProvider;
use crate::session::SimulationSession;

/// Compares the active run against a named stored scenario.
///
/// The scenario's configuration is simulated through the session (reusing
/// its weather and result caches), then each KPI is reported as
/// current-vs-scenario. Ratio KPIs are compared only when both runs define
/// them.
pub async fn compare(
    session: &mut SimulationSession,
    provider: &dyn WeatherProvider,
    current: &SimulationResult,
    scenario_name: &str,
) -> Result<ComparisonResult, SimError> {
    let scenario = session
        .scenario(scenario_name)
        .ok_or_else(|| SimError::UnknownScenario(scenario_name.to_string()))?
        .clone();

    let other = session.run_simulation(provider, &scenario.config).await?;

    let pair = |cur: Option<f64>, oth: Option<f64>| match (cur, oth) {
        (Some(c), Some(o)) => Some(KpiDelta::new(c, o)),
        _ => None,
    };

    let comparison = ComparisonResult {
        scenario_name: scenario.name,
        annual_yield_kwh: KpiDelta::new(current.kpis.annual_yield_kwh, other.kpis.annual_yield_kwh),
        annual_poa_kwh_m2: KpiDelta::new(
            current.kpis.annual_poa_kwh_m2,
            other.kpis.annual_poa_kwh_m2,
        ),
        specific_yield_kwh_per_kwp: pair(
            current.kpis.specific_yield_kwh_per_kwp,
            other.kpis.specific_yield_kwh_per_kwp,
        ),
        performance_ratio_pct: pair(
            current.kpis.performance_ratio_pct,
            other.kpis.performance_ratio_pct,
        ),
    };

    info!(
        scenario = %comparison.scenario_name,
        yield_delta_kwh = comparison.annual_yield_kwh.delta_absolute,
        "scenario comparison complete"
    );
    Ok(comparison)
}
