/// Back-of-module cell temperature — SAPM empirical model (King 2004).
///
///   T_module = POA · exp(a + b·wind) + T_air
///   T_cell   = T_module + (POA / 1000) · ΔT
///
/// The (a, b, ΔT) triples are the standard coefficient sets for the two
/// supported mounting configurations.
use crate::config::MountType;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SapmThermalParams {
    pub a: f64,
    pub b: f64,
    pub delta_t: f64,
}

/// Open rack, glass/glass module
pub const OPEN_RACK_GLASS_GLASS: SapmThermalParams =
    SapmThermalParams { a: -3.47, b: -0.0594, delta_t: 3.0 };

/// Insulated back (roof mounted), glass/polymer module
pub const INSULATED_BACK_GLASS_POLYMER: SapmThermalParams =
    SapmThermalParams { a: -2.81, b: -0.0455, delta_t: 0.0 };

impl MountType {
    pub fn thermal_params(self) -> SapmThermalParams {
        match self {
            MountType::OpenRack => OPEN_RACK_GLASS_GLASS,
            MountType::RoofMounted => INSULATED_BACK_GLASS_POLYMER,
        }
    }
}

/// Cell temperature (°C) from in-plane irradiance, air temperature and wind.
pub fn cell_temperature(
    poa_w_m2: f64,
    temp_air_c: f64,
    wind_m_s: f64,
    params: SapmThermalParams,
) -> f64 {
    let module = poa_w_m2 * (params.a + params.b * wind_m_s).exp() + temp_air_c;
    module + poa_w_m2 / 1000.0 * params.delta_t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_irradiance_tracks_air_temperature() {
        let t = cell_temperature(0.0, 17.5, 3.0, OPEN_RACK_GLASS_GLASS);
        assert_eq!(t, 17.5);
    }

    #[test]
    fn test_open_rack_plausible_operating_point() {
        // 800 W/m², 20 °C air, light wind → roughly 45 °C cell
        let t = cell_temperature(800.0, 20.0, 1.0, OPEN_RACK_GLASS_GLASS);
        assert!(t > 40.0 && t < 52.0, "cell temperature was {t:.1} °C");
    }

    #[test]
    fn test_insulated_back_runs_hotter_than_open_rack() {
        let open = cell_temperature(800.0, 20.0, 1.0, MountType::OpenRack.thermal_params());
        let roof = cell_temperature(800.0, 20.0, 1.0, MountType::RoofMounted.thermal_params());
        assert!(roof > open, "roof {roof:.1} °C vs open rack {open:.1} °C");
    }

    #[test]
    fn test_wind_cools_the_module() {
        let calm = cell_temperature(800.0, 20.0, 0.5, OPEN_RACK_GLASS_GLASS);
        let breezy = cell_temperature(800.0, 20.0, 6.0, OPEN_RACK_GLASS_GLASS);
        assert!(breezy < calm);
    }
}
