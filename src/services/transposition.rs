/// Plane-of-array irradiance from horizontal components (isotropic sky).
///
/// The horizontal GHI/DNI/DHI triple is transposed onto the tilted module
/// plane as three contributions:
///   beam      = DNI · cos θ          (θ = sun-to-panel-normal incidence)
///   diffuse   = DHI · (1 + cos β)/2  (isotropic sky dome)
///   reflected = GHI · ρ · (1 − cos β)/2
use crate::services::solar_geometry::SolarPosition;

/// Ground albedo — typical grass/soil surround
pub const GROUND_ALBEDO: f64 = 0.20;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoaIrradiance {
    pub beam_w_m2: f64,
    pub diffuse_w_m2: f64,
    pub ground_reflected_w_m2: f64,
    pub global_w_m2: f64,
}

/// Transposes horizontal irradiance onto a tilted plane.
///
/// # Arguments
///
/// * 'ghi' / 'dni' / 'dhi' - horizontal irradiance components (W/m²)
/// * 'sun' - sun position for the same instant
/// * 'tilt_deg' - surface tilt from horizontal (0 … 90)
/// * 'azimuth_deg' - surface azimuth from north, clockwise (0=N, 180=S)
pub fn poa_irradiance(
    ghi: f64,
    dni: f64,
    dhi: f64,
    sun: &SolarPosition,
    tilt_deg: f64,
    azimuth_deg: f64,
) -> PoaIrradiance {
    let tilt = tilt_deg.to_radians();
    let zenith = sun.zenith_deg.to_radians();

    // Angle of incidence between sun and panel normal; the beam term is
    // zero whenever the sun is behind the panel or below the horizon.
    let cos_theta = if sun.is_daylight() {
        let az_diff = (sun.azimuth_deg - azimuth_deg).to_radians();
        (zenith.cos() * tilt.cos() + zenith.sin() * tilt.sin() * az_diff.cos()).max(0.0)
    } else {
        0.0
    };

    let beam = dni * cos_theta;
    let diffuse = dhi * (1.0 + tilt.cos()) / 2.0;
    let reflected = ghi * GROUND_ALBEDO * (1.0 - tilt.cos()) / 2.0;

    PoaIrradiance {
        beam_w_m2: beam,
        diffuse_w_m2: diffuse,
        ground_reflected_w_m2: reflected,
        global_w_m2: beam + diffuse + reflected,
    }
}
