use serde::{Deserialize, Serialize};

use super::RenderableZone;
use crate::config::{BlastCalibration, BlastThreshold};

/// Overpressure bands, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlastSeverity {
    TotalDestruction,
    HeavyDamage,
    ModerateDamage,
    LightDamage,
    GlassBreakage,
}

impl BlastSeverity {
    pub fn as_str(self) -> &'static str {
        match self {
            BlastSeverity::TotalDestruction => "total_destruction",
            BlastSeverity::HeavyDamage => "heavy_damage",
            BlastSeverity::ModerateDamage => "moderate_damage",
            BlastSeverity::LightDamage => "light_damage",
            BlastSeverity::GlassBreakage => "glass_breakage",
        }
    }

    fn effects(self) -> &'static str {
        match self {
            BlastSeverity::TotalDestruction => "Complete destruction of buildings",
            BlastSeverity::HeavyDamage => "Buildings collapse, walls fail",
            BlastSeverity::ModerateDamage => "Roofs damaged, chimneys topple",
            BlastSeverity::LightDamage => "Windows blown out, roofing damaged",
            BlastSeverity::GlassBreakage => "Windows shattered",
        }
    }

    fn casualties(self) -> &'static str {
        match self {
            BlastSeverity::TotalDestruction => "Near 100% fatality",
            BlastSeverity::HeavyDamage => "50-90% fatality from collapse",
            BlastSeverity::ModerateDamage => "Debris injuries, up to 25% fatality",
            BlastSeverity::LightDamage => "Injuries from flying glass",
            BlastSeverity::GlassBreakage => "Minor cuts",
        }
    }

    fn color(self) -> &'static str {
        match self {
            BlastSeverity::TotalDestruction => "#8B0000",
            BlastSeverity::HeavyDamage => "#DC143C",
            BlastSeverity::ModerateDamage => "#FF4500",
            BlastSeverity::LightDamage => "#FFA500",
            BlastSeverity::GlassBreakage => "#FFD700",
        }
    }
}

/// How the blast couples to the ground.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum BurstMode {
    Surface,
    /// Detonation at an explicit height (km).
    Air { height_km: f64 },
    /// Air burst; without a height, the optimum for the 5 kPa band is used.
    Auto { height_km: Option<f64> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlastZone {
    #[serde(rename = "type")]
    pub severity: BlastSeverity,
    pub radius_km: f64,
    pub pressure_kpa: f64,
    pub effects: &'static str,
    pub casualties: &'static str,
    pub color: &'static str,
    pub wind_speed_kmh: f64,
    /// Radius multiplier relative to a surface burst.
    pub hob_multiplier: f64,
    pub note: String,
}

impl RenderableZone for BlastZone {
    fn zone_name(&self) -> String {
        self.severity.as_str().to_string()
    }

    fn radius_km(&self) -> f64 {
        self.radius_km
    }

    fn color(&self) -> &'static str {
        self.color
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlastReport {
    pub burst: BurstMode,
    /// Height actually modelled (km); `None` for surface bursts.
    pub burst_height_km: Option<f64>,
    pub energy_mt: f64,
    pub zones: Vec<BlastZone>,
}

impl BlastReport {
    pub fn zone(&self, severity: BlastSeverity) -> Option<&BlastZone> {
        self.zones.iter().find(|zone| zone.severity == severity)
    }

    pub fn outer_radius_km(&self) -> f64 {
        self.zones.last().map_or(0.0, |zone| zone.radius_km)
    }
}

/// Overpressure rings for `energy_mt`, ordered most severe first.
pub fn blast_zones(energy_mt: f64, mode: BurstMode, cal: &BlastCalibration) -> BlastReport {
    let energy_mt = energy_mt.max(cal.energy_floor_mt);
    let scale = energy_mt.cbrt();

    let height_km = match mode {
        BurstMode::Surface => None,
        BurstMode::Air { height_km } => Some(height_km),
        BurstMode::Auto { height_km } => {
            Some(height_km.unwrap_or_else(|| auto_height_km(cal, scale)))
        }
    };

    let zones = cal
        .thresholds
        .iter()
        .map(|row| {
            let multiplier = height_km.map_or(1.0, |h| hob_multiplier(row, h, scale, cal.hob_floor));
            let note = match height_km {
                None => "Modelled as surface burst".to_string(),
                Some(h) => format!("Modelled as air burst at {h:.2} km (x{multiplier:.2})"),
            };
            BlastZone {
                severity: row.severity,
                radius_km: row.base_radius_km * scale * multiplier,
                pressure_kpa: row.pressure_kpa,
                effects: row.severity.effects(),
                casualties: row.severity.casualties(),
                color: row.severity.color(),
                wind_speed_kmh: row.wind_speed_kmh,
                hob_multiplier: multiplier,
                note,
            }
        })
        .collect::<Vec<_>>();

    log::debug!(
        "blast: E={energy_mt:.3} Mt, height={height_km:?}, radii={:?}",
        zones.iter().map(|z| z.radius_km).collect::<Vec<_>>()
    );

    BlastReport {
        burst: mode,
        burst_height_km: height_km,
        energy_mt,
        zones,
    }
}

/// Height that maximises the heavy-damage (5 kPa) radius.
fn auto_height_km(cal: &BlastCalibration, scale: f64) -> f64 {
    cal.thresholds
        .iter()
        .find(|row| row.severity == BlastSeverity::LightDamage)
        .or_else(|| cal.thresholds.get(cal.thresholds.len() / 2))
        .map_or(0.0, |row| row.optimal_hob_km * scale)
}

fn hob_multiplier(row: &BlastThreshold, height_km: f64, scale: f64, floor: f64) -> f64 {
    let optimum = row.optimal_hob_km * scale;
    let sigma = row.hob_width * optimum;
    let x = (height_km - optimum) / sigma;
    ((1.0 + row.peak_gain) * (-0.5 * x * x).exp()).max(floor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn one_megaton_surface_matches_base_table() {
        let report = blast_zones(1.0, BurstMode::Surface, &BlastCalibration::default());
        assert_eq!(report.zones.len(), 5);
        assert_relative_eq!(report.zones[0].radius_km, 3.0, epsilon = 1e-9);
        assert_relative_eq!(report.zones[4].radius_km, 20.0, epsilon = 1e-9);
        assert!(report.zones.iter().all(|z| z.hob_multiplier == 1.0));
        assert_eq!(report.burst_height_km, None);
    }

    #[test]
    fn radii_scale_with_cube_root() {
        let cal = BlastCalibration::default();
        let small = blast_zones(1.0, BurstMode::Surface, &cal);
        let large = blast_zones(1000.0, BurstMode::Surface, &cal);
        for (a, b) in small.zones.iter().zip(&large.zones) {
            assert_relative_eq!(b.radius_km / a.radius_km, 10.0, max_relative = 1e-9);
        }
    }

    #[test]
    fn zero_energy_is_floored() {
        let report = blast_zones(0.0, BurstMode::Surface, &BlastCalibration::default());
        assert!(report.energy_mt > 0.0);
        assert!(report.zones.iter().all(|z| z.radius_km.is_finite() && z.radius_km > 0.0));
    }

    #[test]
    fn auto_burst_uses_light_damage_optimum() {
        let cal = BlastCalibration::default();
        let report = blast_zones(8.0, BurstMode::Auto { height_km: None }, &cal);
        assert_relative_eq!(report.burst_height_km.unwrap(), 2.6 * 2.0, max_relative = 1e-12);

        let light = report.zone(BlastSeverity::LightDamage).unwrap();
        assert_relative_eq!(light.hob_multiplier, 1.35, max_relative = 1e-12);
        assert!(light.note.contains("air burst"));
    }

    #[test]
    fn high_burst_hits_floor_for_severe_band() {
        let cal = BlastCalibration::default();
        let report = blast_zones(1.0, BurstMode::Air { height_km: 30.0 }, &cal);
        let total = report.zone(BlastSeverity::TotalDestruction).unwrap();
        assert_relative_eq!(total.hob_multiplier, 0.7);
    }

    #[test]
    fn air_burst_keeps_radius_ordering() {
        let cal = BlastCalibration::default();
        for step in 0..60 {
            let height_km = step as f64 * 0.25;
            let report = blast_zones(1.0, BurstMode::Air { height_km }, &cal);
            for pair in report.zones.windows(2) {
                assert!(pair[1].radius_km > pair[0].radius_km, "h={height_km}");
            }
        }
    }

    #[test]
    fn surface_note_mentions_surface() {
        let report = blast_zones(2.0, BurstMode::Surface, &BlastCalibration::default());
        assert!(report.zones[0].note.contains("surface"));
    }
}
