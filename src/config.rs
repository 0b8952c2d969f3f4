use serde::{Deserialize, Serialize};

use crate::errors::SimError;

// ─── Site ────────────────────────────────────────────────────────────────────

/// Geographic location and array orientation. Immutable per simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Latitude in degrees, [-90, 90]
    pub latitude: f64,
    /// Longitude in degrees, [-180, 180]
    pub longitude: f64,
    /// Array tilt from horizontal in degrees, [0, 90]
    pub tilt_deg: f64,
    /// Array azimuth in degrees from north, clockwise: 0=N, 90=E, 180=S
    pub azimuth_deg: f64,
}

impl SiteConfig {
    pub fn validate(&self) -> Result<(), SimError> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(SimError::config(format!("latitude {} out of range [-90, 90]", self.latitude)));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(SimError::config(format!("longitude {} out of range [-180, 180]", self.longitude)));
        }
        if !(0.0..=90.0).contains(&self.tilt_deg) {
            return Err(SimError::config(format!("tilt {}° out of range [0, 90]", self.tilt_deg)));
        }
        if !(0.0..=360.0).contains(&self.azimuth_deg) {
            return Err(SimError::config(format!("azimuth {}° out of range [0, 360]", self.azimuth_deg)));
        }
        Ok(())
    }
}

// ─── Array ───────────────────────────────────────────────────────────────────

/// Module and string layout. The array is modeled as a single lumped DC
/// source; series/parallel counts only size the total capacity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrayConfig {
    /// Module rated power at STC (Wp)
    pub module_wp: f64,
    /// Modules per string
    pub modules_per_string: u32,
    /// Parallel string count
    pub strings: u32,
}

impl ArrayConfig {
    /// Total DC capacity in kWp: series × parallel × Wp / 1000
    pub fn dc_capacity_kw(&self) -> f64 {
        self.modules_per_string as f64 * self.strings as f64 * self.module_wp / 1000.0
    }

    pub fn module_count(&self) -> u32 {
        self.modules_per_string * self.strings
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if self.module_wp <= 0.0 {
            return Err(SimError::config(format!("module power {} Wp must be > 0", self.module_wp)));
        }
        if self.modules_per_string == 0 || self.strings == 0 {
            return Err(SimError::config("module and string counts must be >= 1"));
        }
        Ok(())
    }
}

// ─── Inverter ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InverterConfig {
    /// Number of inverter units
    pub count: u32,
    /// AC nameplate rating per unit (kW)
    pub rating_kw: f64,
    /// Conversion efficiency as a fraction, (0, 1]
    pub efficiency: f64,
}

impl InverterConfig {
    /// Total AC capacity in kWac: count × rating
    pub fn ac_capacity_kw(&self) -> f64 {
        self.count as f64 * self.rating_kw
    }

    /// DC/AC ratio against the given array; None when AC capacity is zero.
    pub fn dc_ac_ratio(&self, array: &ArrayConfig) -> Option<f64> {
        let ac = self.ac_capacity_kw();
        (ac > 0.0).then(|| array.dc_capacity_kw() / ac)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if self.count == 0 {
            return Err(SimError::config("inverter count must be >= 1"));
        }
        if self.rating_kw < 0.0 {
            return Err(SimError::config(format!("inverter rating {} kW must be >= 0", self.rating_kw)));
        }
        if !(self.efficiency > 0.0 && self.efficiency <= 1.0) {
            return Err(SimError::config(format!("inverter efficiency {} out of range (0, 1]", self.efficiency)));
        }
        Ok(())
    }
}

// ─── Losses ──────────────────────────────────────────────────────────────────

/// Installation loss fractions, each in [0, 1), applied multiplicatively at
/// the stage each represents: soiling and DC wiring before inversion, AC
/// wiring and availability after.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LossConfig {
    pub soiling: f64,
    pub dc_wiring: f64,
    pub ac_wiring: f64,
    pub availability: f64,
}

impl LossConfig {
    pub fn validate(&self) -> Result<(), SimError> {
        for (name, value) in [
            ("soiling", self.soiling),
            ("dc_wiring", self.dc_wiring),
            ("ac_wiring", self.ac_wiring),
            ("availability", self.availability),
        ] {
            if !(0.0..1.0).contains(&value) {
                return Err(SimError::config(format!("{name} loss {value} out of range [0, 1)")));
            }
        }
        Ok(())
    }
}

impl Default for LossConfig {
    fn default() -> Self {
        // Typical utility-scale assumptions
        Self { soiling: 0.02, dc_wiring: 0.03, ac_wiring: 0.015, availability: 0.01 }
    }
}

// ─── Mounting ────────────────────────────────────────────────────────────────

/// Mounting selects the empirical back-of-module thermal coefficient set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MountType {
    OpenRack,
    RoofMounted,
}

// ─── Analysis ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisParams {
    /// Analysis horizon in years, >= 1
    pub horizon_years: u32,
    /// Annual degradation as a fraction, [0, 1)
    pub degradation_rate: f64,
}

impl AnalysisParams {
    pub fn validate(&self) -> Result<(), SimError> {
        if self.horizon_years == 0 {
            return Err(SimError::config("analysis horizon must be >= 1 year"));
        }
        if !(0.0..1.0).contains(&self.degradation_rate) {
            return Err(SimError::config(format!(
                "degradation rate {} out of range [0, 1)",
                self.degradation_rate
            )));
        }
        Ok(())
    }
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self { horizon_years: 25, degradation_rate: 0.005 }
    }
}

// ─── Full plant configuration ────────────────────────────────────────────────

/// Everything a simulation run needs besides the weather itself. This is
/// also the payload captured when a scenario snapshot is saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantConfig {
    pub site: SiteConfig,
    pub array: ArrayConfig,
    pub inverter: InverterConfig,
    pub losses: LossConfig,
    pub mount: MountType,
    pub analysis: AnalysisParams,
}

impl PlantConfig {
    pub fn validate(&self) -> Result<(), SimError> {
        self.site.validate()?;
        self.array.validate()?;
        self.inverter.validate()?;
        self.losses.validate()?;
        self.analysis.validate()?;
        Ok(())
    }
}
