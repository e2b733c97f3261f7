use serde::{Deserialize, Serialize};

use super::RenderableZone;
use crate::config::TsunamiCalibration;

const ENERGY_FLOOR_MT: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TsunamiLevel {
    Extreme,
    Major,
    Moderate,
    Minor,
    Information,
}

impl TsunamiLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            TsunamiLevel::Extreme => "tsunami_extreme",
            TsunamiLevel::Major => "tsunami_major",
            TsunamiLevel::Moderate => "tsunami_moderate",
            TsunamiLevel::Minor => "tsunami_minor",
            TsunamiLevel::Information => "tsunami_information",
        }
    }

    fn advisory(self) -> &'static str {
        match self {
            TsunamiLevel::Extreme => "Catastrophic inundation; evacuate far inland immediately",
            TsunamiLevel::Major => "Widespread coastal flooding; evacuate to high ground",
            TsunamiLevel::Moderate => "Flooding of low-lying coast and harbours",
            TsunamiLevel::Minor => "Strong currents; stay out of the water",
            TsunamiLevel::Information => "Sea-level change detectable; no threat expected",
        }
    }

    fn color(self) -> &'static str {
        match self {
            TsunamiLevel::Extreme => "#001F54",
            TsunamiLevel::Major => "#034078",
            TsunamiLevel::Moderate => "#0077BE",
            TsunamiLevel::Minor => "#1282A2",
            TsunamiLevel::Information => "#7FC8F8",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TsunamiRing {
    pub level: TsunamiLevel,
    pub threshold_height_m: f64,
    pub radius_km: f64,
    pub arrival_time_min: f64,
    pub runup_m: f64,
    pub advisory: &'static str,
    pub color: &'static str,
}

impl RenderableZone for TsunamiRing {
    fn zone_name(&self) -> String {
        self.level.as_str().to_string()
    }

    fn radius_km(&self) -> f64 {
        self.radius_km
    }

    fn color(&self) -> &'static str {
        self.color
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TsunamiReport {
    pub water_depth_m: f64,
    pub wave_speed_ms: f64,
    pub wave_speed_kmh: f64,
    pub wave_period_s: f64,
    pub wavelength_km: f64,
    pub initial_height_m: f64,
    pub initial_runup_m: f64,
    pub warning_time_min: f64,
    pub rings: Vec<TsunamiRing>,
}

/// Offshore wave-height rings for a water impact.
///
/// Ring radii never decrease from one threshold to the next, and none
/// exceeds `max_radius_km`.
pub fn tsunami(energy_mt: f64, water_depth_m: f64, cal: &TsunamiCalibration) -> TsunamiReport {
    let energy_mt = energy_mt.max(ENERGY_FLOOR_MT);
    let wave_speed_ms = (cal.gravity * water_depth_m).sqrt();
    let wave_speed_kmh = wave_speed_ms * 3.6;
    let initial_height_m = cal.height_coefficient * energy_mt.sqrt();
    let r0 = cal.reference_radius_km;

    let mut rings = Vec::with_capacity(cal.thresholds.len());
    let mut previous_radius = 0.0_f64;
    for threshold in &cal.thresholds {
        let decay_radius = if threshold.level == TsunamiLevel::Information {
            cal.information_radius_km
        } else if threshold.height_m >= initial_height_m {
            0.0
        } else {
            r0 * ((initial_height_m / threshold.height_m).powi(2) - 1.0)
        };
        let radius_km = decay_radius.min(cal.max_radius_km).max(previous_radius);
        previous_radius = radius_km;

        rings.push(TsunamiRing {
            level: threshold.level,
            threshold_height_m: threshold.height_m,
            radius_km,
            arrival_time_min: radius_km / wave_speed_kmh * 60.0,
            runup_m: threshold.height_m * cal.runup_factor,
            advisory: threshold.level.advisory(),
            color: threshold.level.color(),
        });
    }

    log::debug!(
        "tsunami: E={energy_mt:.3} Mt, depth={water_depth_m} m, H0={initial_height_m:.2} m, c={wave_speed_kmh:.1} km/h"
    );

    TsunamiReport {
        water_depth_m,
        wave_speed_ms,
        wave_speed_kmh,
        wave_period_s: cal.wave_period_s,
        wavelength_km: wave_speed_ms * cal.wave_period_s / 1000.0,
        initial_height_m,
        initial_runup_m: initial_height_m * cal.runup_factor,
        warning_time_min: cal.warning_distance_km / wave_speed_kmh * 60.0,
        rings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn decay_law_is_inverted_exactly() {
        let cal = TsunamiCalibration::default();
        let report = tsunami(75.0, 4000.0, &cal);
        let h0 = 0.25 * 75f64.sqrt();
        assert_relative_eq!(report.initial_height_m, h0);

        let moderate = report
            .rings
            .iter()
            .find(|r| r.level == TsunamiLevel::Moderate)
            .unwrap();
        let height_at_radius = h0 * (10.0 / (moderate.radius_km + 10.0)).sqrt();
        assert_relative_eq!(height_at_radius, 1.0, max_relative = 1e-9);
    }

    #[test]
    fn thresholds_above_initial_height_collapse_to_zero() {
        let report = tsunami(75.0, 4000.0, &TsunamiCalibration::default());
        assert_eq!(report.rings[0].radius_km, 0.0);
        assert_eq!(report.rings[1].radius_km, 0.0);
    }

    #[test]
    fn information_ring_is_raised_to_stay_monotonic() {
        let cal = TsunamiCalibration::default();
        let report = tsunami(5_000.0, 4000.0, &cal);
        let minor = report.rings[3].radius_km;
        let info = report.rings[4].radius_km;
        assert!(minor > cal.information_radius_km);
        assert_eq!(info, minor);
    }

    #[test]
    fn radii_never_exceed_antipode() {
        let cal = TsunamiCalibration::default();
        let report = tsunami(1e8, 4000.0, &cal);
        assert!(report.rings.iter().all(|r| r.radius_km <= cal.max_radius_km));
    }

    #[test]
    fn wave_speed_and_arrival() {
        let report = tsunami(10.0, 4000.0, &TsunamiCalibration::default());
        assert_relative_eq!(report.wave_speed_ms, (9.81_f64 * 4000.0).sqrt());
        let info = report.rings.last().unwrap();
        assert_relative_eq!(
            info.arrival_time_min,
            info.radius_km / report.wave_speed_kmh * 60.0
        );
        assert_relative_eq!(report.wavelength_km, report.wave_speed_ms * 900.0 / 1000.0);
    }
}
