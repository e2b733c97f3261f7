use serde::{Deserialize, Serialize};

use super::RenderableZone;
use crate::config::ThermalCalibration;

const ENERGY_FLOOR_MT: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BurnDegree {
    Third,
    Second,
    First,
}

impl BurnDegree {
    pub fn as_str(self) -> &'static str {
        match self {
            BurnDegree::Third => "third_degree_burns",
            BurnDegree::Second => "second_degree_burns",
            BurnDegree::First => "first_degree_burns",
        }
    }

    fn temperature_c(self) -> f64 {
        match self {
            BurnDegree::Third => 2000.0,
            BurnDegree::Second => 1000.0,
            BurnDegree::First => 400.0,
        }
    }

    fn effects(self) -> &'static str {
        match self {
            BurnDegree::Third => "Third-degree burns",
            BurnDegree::Second => "Second-degree burns",
            BurnDegree::First => "First-degree burns",
        }
    }

    fn casualties(self) -> &'static str {
        match self {
            BurnDegree::Third => "Critical burns, high fatality",
            BurnDegree::Second => "Severe burns, hospitalisation required",
            BurnDegree::First => "Painful but not life-threatening",
        }
    }

    fn ignition(self) -> &'static str {
        match self {
            BurnDegree::Third => "All flammable material ignites",
            BurnDegree::Second => "Clothing and wood ignite",
            BurnDegree::First => "Skin reddening",
        }
    }

    fn color(self) -> &'static str {
        match self {
            BurnDegree::Third => "#FF0000",
            BurnDegree::Second => "#FF6347",
            BurnDegree::First => "#FFA07A",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThermalZone {
    #[serde(rename = "type")]
    pub degree: BurnDegree,
    pub radius_km: f64,
    pub temperature_c: f64,
    pub effects: &'static str,
    pub casualties: &'static str,
    pub ignition: &'static str,
    pub color: &'static str,
}

impl RenderableZone for ThermalZone {
    fn zone_name(&self) -> String {
        self.degree.as_str().to_string()
    }

    fn radius_km(&self) -> f64 {
        self.radius_km
    }

    fn color(&self) -> &'static str {
        self.color
    }
}

/// Burn-severity radii, `k * E^0.41`, most severe first.
pub fn thermal_zones(energy_mt: f64, cal: &ThermalCalibration) -> Vec<ThermalZone> {
    let scale = energy_mt.max(ENERGY_FLOOR_MT).powf(cal.exponent);
    cal.bands
        .iter()
        .map(|band| ThermalZone {
            degree: band.degree,
            radius_km: band.coefficient * scale,
            temperature_c: band.degree.temperature_c(),
            effects: band.degree.effects(),
            casualties: band.degree.casualties(),
            ignition: band.degree.ignition(),
            color: band.degree.color(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn unit_energy_returns_coefficients() {
        let zones = thermal_zones(1.0, &ThermalCalibration::default());
        let radii: Vec<f64> = zones.iter().map(|z| z.radius_km).collect();
        assert_eq!(radii, vec![0.6, 0.9, 1.5]);
        assert_eq!(zones[0].degree, BurnDegree::Third);
    }

    #[test]
    fn scales_with_power_041() {
        let cal = ThermalCalibration::default();
        let a = thermal_zones(10.0, &cal);
        let b = thermal_zones(1000.0, &cal);
        assert_relative_eq!(b[1].radius_km / a[1].radius_km, 100f64.powf(0.41), max_relative = 1e-9);
    }
}
