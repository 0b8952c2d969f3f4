use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::SimError;

/// Hourly records in a typical meteorological year.
pub const HOURS_PER_YEAR: usize = 8760;

/// One hourly weather record from a TMY dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub timestamp: DateTime<Utc>,
    /// Global horizontal irradiance (W/m²)
    pub ghi_w_m2: f64,
    /// Direct normal irradiance (W/m²)
    pub dni_w_m2: f64,
    /// Diffuse horizontal irradiance (W/m²)
    pub dhi_w_m2: f64,
    /// Ambient air temperature (°C)
    pub temp_air_c: f64,
    /// Wind speed (m/s)
    pub wind_speed_m_s: f64,
}

/// A full typical-meteorological-year series: exactly 8760 records at
/// exactly one-hour spacing (which pins the series to a single year) with
/// non-negative irradiance. The invariants are checked once at
/// construction; everything downstream relies on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSeries {
    records: Vec<WeatherRecord>,
}

impl WeatherSeries {
    pub fn new(records: Vec<WeatherRecord>) -> Result<Self, SimError> {
        if records.len() != HOURS_PER_YEAR {
            return Err(SimError::weather(format!(
                "expected {HOURS_PER_YEAR} hourly records, got {}",
                records.len()
            )));
        }
        for pair in records.windows(2) {
            if pair[1].timestamp - pair[0].timestamp != Duration::hours(1) {
                return Err(SimError::weather(format!(
                    "expected one-hour spacing between {} and {}",
                    pair[0].timestamp, pair[1].timestamp
                )));
            }
        }
        for rec in &records {
            if rec.ghi_w_m2 < 0.0 || rec.dni_w_m2 < 0.0 || rec.dhi_w_m2 < 0.0 {
                return Err(SimError::weather(format!(
                    "negative irradiance at {}",
                    rec.timestamp
                )));
            }
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[WeatherRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WeatherRecord> {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn hourly_records(n: usize) -> Vec<WeatherRecord> {
        let start = Utc.with_ymd_and_hms(1990, 1, 1, 0, 0, 0).unwrap();
        (0..n)
            .map(|i| WeatherRecord {
                timestamp: start + Duration::hours(i as i64),
                ghi_w_m2: 100.0,
                dni_w_m2: 200.0,
                dhi_w_m2: 50.0,
                temp_air_c: 15.0,
                wind_speed_m_s: 2.0,
            })
            .collect()
    }

    #[test]
    fn test_accepts_full_year() {
        let series = WeatherSeries::new(hourly_records(HOURS_PER_YEAR)).unwrap();
        assert_eq!(series.len(), HOURS_PER_YEAR);
    }

    #[test]
    fn test_rejects_short_series() {
        assert!(WeatherSeries::new(hourly_records(100)).is_err());
    }

    #[test]
    fn test_rejects_duplicate_timestamps() {
        let mut records = hourly_records(HOURS_PER_YEAR);
        records[10].timestamp = records[9].timestamp;
        assert!(WeatherSeries::new(records).is_err());
    }

    #[test]
    fn test_rejects_non_hourly_spacing() {
        // 8760 records at two-hour spacing would spill into a second
        // calendar year and double-count each month's energy
        let start = Utc.with_ymd_and_hms(1990, 1, 1, 0, 0, 0).unwrap();
        let records: Vec<_> = (0..HOURS_PER_YEAR)
            .map(|i| WeatherRecord {
                timestamp: start + Duration::hours(2 * i as i64),
                ghi_w_m2: 100.0,
                dni_w_m2: 200.0,
                dhi_w_m2: 50.0,
                temp_air_c: 15.0,
                wind_speed_m_s: 2.0,
            })
            .collect();
        assert!(WeatherSeries::new(records).is_err());
    }

    #[test]
    fn test_rejects_negative_irradiance() {
        let mut records = hourly_records(HOURS_PER_YEAR);
        records[42].dni_w_m2 = -1.0;
        assert!(WeatherSeries::new(records).is_err());
    }
}
