use std::f64::consts::PI;

use serde::Serialize;

use crate::config::CraterCalibration;

// Collins–Melosh π-group scaling for the transient crater.
const PI_COEFFICIENT: f64 = 1.161;
const DIAMETER_EXPONENT: f64 = 0.783;
const VELOCITY_EXPONENT: f64 = 0.44;
const GRAVITY_EXPONENT: f64 = -0.217;
const FINAL_TO_TRANSIENT: f64 = 1.25;

// Angle correction coefficients.
const SHALLOW_SLOPE: f64 = 0.85;
const SHALLOW_OFFSET: f64 = 0.10;
const STEEP_BASE: f64 = 0.95;
const STEEP_SLOPE: f64 = 0.05;

const MIN_SIN: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CraterShape {
    Circular,
    Elliptical,
}

#[derive(Debug, Clone, Copy)]
pub struct CraterInput {
    pub diameter_m: f64,
    pub speed_km_s: f64,
    pub angle_deg: f64,
    pub impactor_density: f64,
    pub target_density: f64,
    /// Shared request energy, echoed into the geometry.
    pub energy_mt: f64,
}

/// Final (rim-to-rim) simple-crater geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CraterGeometry {
    /// Equal to `width_km`; kept for renderers keyed on the legacy field.
    pub diameter_km: f64,
    pub depth_km: f64,
    pub ejecta_mass_kg: f64,
    pub rim_height_m: f64,
    pub shape: CraterShape,
    pub width_km: f64,
    pub length_km: f64,
    pub elongation: f64,
    pub transient_diameter_km: f64,
    pub energy_mt: f64,
}

pub fn crater(input: &CraterInput, cal: &CraterCalibration) -> CraterGeometry {
    let velocity = input.speed_km_s * 1000.0;
    let sin_theta = input.angle_deg.to_radians().sin().max(0.0);
    let shallow = input.angle_deg < cal.shallow_angle_deg;

    let transient_m = PI_COEFFICIENT
        * (input.impactor_density / input.target_density).cbrt()
        * input.diameter_m.powf(DIAMETER_EXPONENT)
        * velocity.powf(VELOCITY_EXPONENT)
        * cal.gravity.powf(GRAVITY_EXPONENT)
        * sin_theta.cbrt();

    let eff = sin_theta.max(cal.angle_floor);
    let angle_factor = if shallow {
        SHALLOW_SLOPE * eff + SHALLOW_OFFSET
    } else {
        STEEP_BASE + STEEP_SLOPE * eff
    };
    let final_m = FINAL_TO_TRANSIENT * transient_m * angle_factor * cal.calibration;

    let (shape, elongation) = if shallow {
        let elongation = (1.0 / sin_theta.max(MIN_SIN)).min(cal.max_elongation);
        (CraterShape::Elliptical, elongation)
    } else {
        (CraterShape::Circular, 1.0)
    };
    let width_m = final_m;
    let length_m = final_m * elongation;

    let depth_m = if shallow {
        cal.depth_ratio * final_m * sin_theta
    } else {
        cal.depth_ratio * final_m * (0.9 + 0.1 * eff)
    };
    let rim_height_m = cal.rim_ratio * final_m;

    let footprint_m2 = PI / 4.0 * width_m * length_m;
    let ejecta_mass_kg = footprint_m2 * depth_m * input.target_density;

    log::debug!(
        "crater: D_tr={transient_m:.1} m -> D={final_m:.1} m, shape={shape:?}, L={length_m:.1} m, depth={depth_m:.1} m, ejecta={ejecta_mass_kg:.3e} kg"
    );

    CraterGeometry {
        diameter_km: width_m / 1000.0,
        depth_km: depth_m / 1000.0,
        ejecta_mass_kg,
        rim_height_m,
        shape,
        width_km: width_m / 1000.0,
        length_km: length_m / 1000.0,
        elongation,
        transient_diameter_km: transient_m / 1000.0,
        energy_mt: input.energy_mt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn input(diameter_m: f64, speed_km_s: f64, angle_deg: f64) -> CraterInput {
        CraterInput {
            diameter_m,
            speed_km_s,
            angle_deg,
            impactor_density: 3000.0,
            target_density: 2750.0,
            energy_mt: 0.0,
        }
    }

    #[test]
    fn reference_case_is_about_900_meters() {
        let geometry = crater(&input(49.0, 20.0, 80.0), &CraterCalibration::default());
        assert_relative_eq!(geometry.diameter_km, 0.9, epsilon = 0.02);
        assert_eq!(geometry.shape, CraterShape::Circular);
        assert_eq!(geometry.width_km, geometry.length_km);
    }

    #[test]
    fn shallow_impact_is_elliptical_and_capped() {
        let cal = CraterCalibration::default();
        let geometry = crater(&input(100.0, 20.0, 10.0), &cal);
        assert_eq!(geometry.shape, CraterShape::Elliptical);
        assert_relative_eq!(geometry.elongation, 3.0);
        assert_relative_eq!(geometry.length_km, geometry.width_km * 3.0);

        let moderate = crater(&input(100.0, 20.0, 25.0), &cal);
        let expected = 1.0 / 25.0_f64.to_radians().sin();
        assert_relative_eq!(moderate.elongation, expected, max_relative = 1e-12);
    }

    #[test]
    fn thirty_degrees_is_circular() {
        let geometry = crater(&input(100.0, 20.0, 30.0), &CraterCalibration::default());
        assert_eq!(geometry.shape, CraterShape::Circular);
        assert_eq!(geometry.elongation, 1.0);
    }

    #[test]
    fn rim_and_depth_follow_diameter() {
        let geometry = crater(&input(200.0, 15.0, 90.0), &CraterCalibration::default());
        let diameter_m = geometry.diameter_km * 1000.0;
        assert_relative_eq!(geometry.rim_height_m, 0.04 * diameter_m, max_relative = 1e-12);
        assert_relative_eq!(geometry.depth_km * 1000.0, 0.2 * diameter_m, max_relative = 1e-12);
    }

    #[test]
    fn denser_target_shrinks_crater() {
        let cal = CraterCalibration::default();
        let rock = crater(&input(80.0, 18.0, 60.0), &cal);
        let mut dense = input(80.0, 18.0, 60.0);
        dense.target_density = 5000.0;
        assert!(crater(&dense, &cal).diameter_km < rock.diameter_km);
    }
}
