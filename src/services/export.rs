/// CSV report generation.
///
/// Two exports share a `#`-prefixed metadata preamble: the 12-row monthly
/// summary (energy in MWh) and the full 8760-row hourly trace. Both are
/// plain strings; the caller decides where to write them.
use chrono::{DateTime, Utc};

use crate::models::results::{AnnualKpis, MonthlyRow, SimulationResult};
use crate::models::weather::WeatherSeries;

/// Report header fields, shared by both exports.
pub struct ExportMeta<'a> {
    pub generated_at: DateTime<Utc>,
    pub location_name: &'a str,
    pub latitude: f64,
    pub longitude: f64,
    pub dc_capacity_kw: f64,
    pub ac_capacity_kw: f64,
    pub tilt_deg: f64,
    pub azimuth_deg: f64,
    pub kpis: &'a AnnualKpis,
}

fn preamble(meta: &ExportMeta<'_>, out: &mut String) {
    out.push_str(&format!(
        "# Generated: {}\n",
        meta.generated_at.format("%Y-%m-%d %H:%M UTC")
    ));
    out.push_str(&format!("# Location: {}\n", meta.location_name));
    out.push_str(&format!(
        "# Coordinates: {:.4}, {:.4}\n",
        meta.latitude, meta.longitude
    ));
    out.push_str(&format!(
        "# System: {:.1} kWp DC / {:.1} kW AC, tilt {:.1} deg, azimuth {:.1} deg\n",
        meta.dc_capacity_kw, meta.ac_capacity_kw, meta.tilt_deg, meta.azimuth_deg
    ));
    out.push_str(&format!(
        "# Annual yield: {:.0} kWh\n",
        meta.kpis.annual_yield_kwh
    ));
    match meta.kpis.performance_ratio_pct {
        Some(pr) => out.push_str(&format!("# Performance ratio: {pr:.1}%\n")),
        None => out.push_str("# Performance ratio: n/a\n"),
    }
}

fn format_opt_pct(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.1}"),
        None => String::new(),
    }
}

/// Monthly summary CSV: one row per calendar month, energy in MWh.
pub fn monthly_csv(rows: &[MonthlyRow], meta: &ExportMeta<'_>) -> String {
    let mut out = String::new();
    preamble(meta, &mut out);
    out.push_str("Month,GHI_kWh_m2,POA_kWh_m2,Energy_MWh,PR_%\n");
    for row in rows {
        out.push_str(&format!(
            "{},{:.1},{:.1},{:.1},{}\n",
            row.label,
            row.ghi_kwh_m2,
            row.poa_kwh_m2,
            row.energy_kwh / 1000.0,
            format_opt_pct(row.performance_ratio_pct),
        ));
    }
    out
}

/// Full hourly trace CSV: weather inputs alongside the simulated outputs,
/// one row per hour of the year.
pub fn hourly_csv(
    weather: &WeatherSeries,
    result: &SimulationResult,
    meta: &ExportMeta<'_>,
) -> String {
    let mut out = String::new();
    preamble(meta, &mut out);
    out.push_str(
        "Timestamp,GHI_W_m2,DNI_W_m2,DHI_W_m2,POA_W_m2,Temp_Air_C,Wind_Speed_m_s,Temp_Cell_C,AC_Power_kW\n",
    );
    for (rec, hour) in weather.iter().zip(result.hours.iter()) {
        out.push_str(&format!(
            "{},{:.1},{:.1},{:.1},{:.1},{:.1},{:.1},{:.1},{:.3}\n",
            hour.timestamp.format("%Y-%m-%d %H:%M"),
            rec.ghi_w_m2,
            rec.dni_w_m2,
            rec.dhi_w_m2,
            hour.poa_global_w_m2,
            rec.temp_air_c,
            rec.wind_speed_m_s,
            hour.cell_temp_c,
            hour.ac_power_kw,
        ));
    }
    out
}
