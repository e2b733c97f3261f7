use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::casualties::{rates_for, zone_area};
use super::population::PopulationContext;
use crate::config::{ConsequenceCalibration, InfrastructureBracket};
use crate::models::{BlastSeverity, BlastZone, ThermalZone};

/// Infrastructure value bracket, densest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InfrastructureClass {
    Megacity,
    UrbanDense,
    Urban,
    Suburban,
    Rural,
}

impl InfrastructureClass {
    /// Urban or denser areas carry industrial assets.
    pub fn is_urban(self) -> bool {
        matches!(
            self,
            InfrastructureClass::Megacity
                | InfrastructureClass::UrbanDense
                | InfrastructureClass::Urban
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneDamage {
    #[serde(rename = "type")]
    pub severity: BlastSeverity,
    pub area_km2: f64,
    pub destruction_fraction: f64,
    pub damage_usd: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EconomicDamage {
    pub total_damage_usd: f64,
    pub blast_damage_usd: f64,
    pub fire_damage_usd: f64,
    pub industrial_factor: f64,
    pub affected_area_km2: f64,
    pub infrastructure_type: InfrastructureClass,
    pub damage_per_km2: f64,
    pub zones: Vec<ZoneDamage>,
}

fn bracket_for(cal: &ConsequenceCalibration, density: f64) -> Option<&InfrastructureBracket> {
    cal.infrastructure
        .iter()
        .find(|bracket| density > bracket.min_density)
        .or_else(|| cal.infrastructure.last())
}

pub fn economic_damage(
    blast: &[BlastZone],
    thermal: &[ThermalZone],
    population: &PopulationContext,
    cal: &ConsequenceCalibration,
) -> EconomicDamage {
    let (infrastructure_type, value_per_km2) = bracket_for(cal, population.density)
        .map_or((InfrastructureClass::Rural, 0.0), |b| (b.class, b.value_per_km2));

    let zones: Vec<ZoneDamage> = blast
        .iter()
        .take(cal.damaged_zone_count)
        .map(|zone| {
            let area_km2 = zone_area(zone);
            let destruction_fraction =
                rates_for(cal, zone.severity).map_or(0.0, |rates| rates.destruction_fraction);
            ZoneDamage {
                severity: zone.severity,
                area_km2,
                destruction_fraction,
                damage_usd: value_per_km2 * area_km2 * destruction_fraction,
            }
        })
        .collect();

    let blast_damage_usd: f64 = zones.iter().map(|zone| zone.damage_usd).sum();
    let affected_area_km2: f64 = zones.iter().map(|zone| zone.area_km2).sum();

    let fire_damage_usd = thermal.first().map_or(0.0, |zone| {
        PI * zone.radius_km * zone.radius_km * value_per_km2 * cal.fire_surcharge
    });

    let industrial_factor = if infrastructure_type.is_urban() {
        cal.industrial_multiplier
    } else {
        1.0
    };
    let total_damage_usd = ((blast_damage_usd + fire_damage_usd) * industrial_factor).floor();

    log::debug!("economic: class={infrastructure_type:?}, total=${total_damage_usd:.3e}");

    EconomicDamage {
        total_damage_usd,
        blast_damage_usd,
        fire_damage_usd,
        industrial_factor,
        affected_area_km2,
        infrastructure_type,
        damage_per_km2: value_per_km2,
        zones,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BlastCalibration, ThermalCalibration};
    use crate::consequence::AreaType;
    use crate::models::{blast_zones, thermal_zones, BurstMode};
    use approx::assert_relative_eq;

    fn context(density: f64) -> PopulationContext {
        PopulationContext {
            area_type: AreaType::Suburban,
            density,
            nearest_location: "Test".into(),
            distance_km: 0.0,
        }
    }

    fn damage(density: f64) -> EconomicDamage {
        let blast = blast_zones(1.0, BurstMode::Surface, &BlastCalibration::default());
        let thermal = thermal_zones(1.0, &ThermalCalibration::default());
        economic_damage(
            &blast.zones,
            &thermal,
            &context(density),
            &ConsequenceCalibration::default(),
        )
    }

    #[test]
    fn brackets_follow_density() {
        assert_eq!(damage(20_000.0).infrastructure_type, InfrastructureClass::Megacity);
        assert_eq!(damage(5_000.0).infrastructure_type, InfrastructureClass::UrbanDense);
        assert_eq!(damage(1_000.0).infrastructure_type, InfrastructureClass::Urban);
        assert_eq!(damage(500.0).infrastructure_type, InfrastructureClass::Suburban);
        assert_eq!(damage(200.0).infrastructure_type, InfrastructureClass::Rural);
        assert_eq!(damage(0.0).infrastructure_type, InfrastructureClass::Rural);
    }

    #[test]
    fn only_three_most_severe_zones_are_costed() {
        let result = damage(500.0);
        assert_eq!(result.zones.len(), 3);
        assert_eq!(result.zones[0].severity, BlastSeverity::TotalDestruction);
        assert_eq!(result.zones[2].severity, BlastSeverity::ModerateDamage);
    }

    #[test]
    fn suburban_total_is_blast_plus_fire() {
        let result = damage(500.0);
        assert_eq!(result.industrial_factor, 1.0);
        let fire = PI * 0.6 * 0.6 * 5_000_000.0 * 0.3;
        assert_relative_eq!(result.fire_damage_usd, fire, max_relative = 1e-12);
        assert_relative_eq!(
            result.total_damage_usd,
            (result.blast_damage_usd + fire).floor(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn urban_areas_get_industrial_multiplier() {
        let result = damage(1_000.0);
        assert_eq!(result.industrial_factor, 1.5);
        assert_relative_eq!(
            result.total_damage_usd,
            ((result.blast_damage_usd + result.fire_damage_usd) * 1.5).floor(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn damaged_area_is_each_zone_disc() {
        let result = damage(500.0);
        assert_relative_eq!(result.zones[1].area_km2, PI * 16.0, max_relative = 1e-12);
        assert_relative_eq!(
            result.affected_area_km2,
            PI * (9.0 + 16.0 + 5.8 * 5.8),
            max_relative = 1e-12
        );
    }

    #[test]
    fn core_zone_is_fully_destroyed() {
        let result = damage(500.0);
        let core = &result.zones[0];
        assert_relative_eq!(core.damage_usd, 5_000_000.0 * PI * 9.0, max_relative = 1e-12);
    }
}
