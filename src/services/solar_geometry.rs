/// Solar position from timestamp and geographic coordinates.
///
/// Algorithm:
///  1. Declination and Equation of Time — Spencer (1971) Fourier series
///  2. Local solar time from longitude + time correction
///  3. Hour angle → elevation / zenith
///  4. Azimuth from north, clockwise
use chrono::{DateTime, Datelike, Timelike, Utc};
use std::f64::consts::PI;

const DEG: f64 = PI / 180.0;

/// Sun position for one timestamp. Angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarPosition {
    /// Angle from the local vertical; > 90° means the sun is below the horizon
    pub zenith_deg: f64,
    /// Compass direction of the sun, 0=N, 90=E, 180=S, clockwise
    pub azimuth_deg: f64,
}

impl SolarPosition {
    pub fn elevation_deg(&self) -> f64 {
        90.0 - self.zenith_deg
    }

    pub fn is_daylight(&self) -> bool {
        self.zenith_deg < 90.0
    }
}

/// Computes sun zenith and azimuth for the given UTC instant.
///
/// # Arguments
///
/// * 'utc' - instant to evaluate
/// * 'lat_deg' - geographic latitude (−90 … +90)
/// * 'lon_deg' - geographic longitude (−180 … +180)
pub fn solar_position(utc: DateTime<Utc>, lat_deg: f64, lon_deg: f64) -> SolarPosition {
    // ── 1. Time decomposition ──────────────────────────────────
    let doy = utc.ordinal() as f64; // 1-365/366
    let ut_h = utc.hour() as f64
        + utc.minute() as f64 / 60.0
        + utc.second() as f64 / 3600.0; // UTC decimal hour

    // ── 2. Solar geometry ──────────────────────────────────────
    // a) Declination (Spencer 1971, degrees)
    let b = 2.0 * PI * (doy - 1.0) / 365.0;
    let decl_deg = (180.0 / PI)
        * (0.006918
            - 0.399912 * b.cos()
            + 0.070257 * b.sin()
            - 0.006758 * (2.0 * b).cos()
            + 0.000907 * (2.0 * b).sin()
            - 0.002697 * (3.0 * b).cos()
            + 0.00148 * (3.0 * b).sin());
    let decl = decl_deg * DEG;

    // b) Equation of Time (minutes, Spencer 1971)
    let eot_min = 229.18
        * (0.000075
            + 0.001868 * b.cos()
            - 0.032077 * b.sin()
            - 0.014615 * (2.0 * b).cos()
            - 0.04089 * (2.0 * b).sin());

    // c) Local Solar Time (hours)
    let lstm_deg = 15.0 * (lon_deg / 15.0).round(); // Standard meridian
    let tc_min = 4.0 * (lon_deg - lstm_deg) + eot_min; // Time correction
    let utc_offset_h = (lon_deg / 15.0).round();
    let local_clock_h = (ut_h + utc_offset_h).rem_euclid(24.0);
    let lst_h = local_clock_h + tc_min / 60.0;

    // d) Hour angle (degrees; negative in morning, positive afternoon)
    let omega_deg = 15.0 * (lst_h - 12.0);
    let omega = omega_deg * DEG;

    // e) Solar elevation angle
    let lat = lat_deg * DEG;
    let sin_alpha = lat.sin() * decl.sin() + lat.cos() * decl.cos() * omega.cos();
    let alpha_rad = sin_alpha.clamp(-1.0, 1.0).asin();

    // f) Solar azimuth (degrees from North, clockwise)
    let cos_az = if alpha_rad.cos().abs() > 1e-9 && lat.cos().abs() > 1e-9 {
        (decl.sin() - sin_alpha * lat.sin()) / (alpha_rad.cos() * lat.cos())
    } else {
        0.0
    };
    let az_abs = cos_az.clamp(-1.0, 1.0).acos() / DEG;
    let azimuth_deg = if omega_deg > 0.0 { 360.0 - az_abs } else { az_abs };

    SolarPosition {
        zenith_deg: 90.0 - alpha_rad / DEG,
        azimuth_deg,
    }
}
