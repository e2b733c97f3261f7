use std::f64::consts::PI;

use serde::Serialize;

use super::population::{AreaType, PopulationContext};
use crate::config::{ConsequenceCalibration, ZoneRates};
use crate::models::{BlastSeverity, BlastZone};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneCasualties {
    #[serde(rename = "type")]
    pub severity: BlastSeverity,
    pub radius_km: f64,
    /// Full disc area inside this ring.
    pub area_km2: f64,
    pub population: u64,
    pub deaths: u64,
    pub injuries: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CasualtyReport {
    pub total_deaths: u64,
    pub total_injuries: u64,
    pub affected_population: u64,
    pub population_density: f64,
    pub area_type: AreaType,
    pub nearest_city: String,
    pub zones: Vec<ZoneCasualties>,
}

pub(crate) fn rates_for(cal: &ConsequenceCalibration, severity: BlastSeverity) -> Option<&ZoneRates> {
    cal.zone_rates.iter().find(|rates| rates.severity == severity)
}

/// Disc area enclosed by a zone's radius. Zones overlap, so sums over zones
/// count the inner population once per enclosing ring.
pub(crate) fn zone_area(zone: &BlastZone) -> f64 {
    PI * zone.radius_km.powi(2)
}

pub fn casualties(
    zones: &[BlastZone],
    population: &PopulationContext,
    cal: &ConsequenceCalibration,
) -> CasualtyReport {
    let mut report = CasualtyReport {
        total_deaths: 0,
        total_injuries: 0,
        affected_population: 0,
        population_density: population.density,
        area_type: population.area_type,
        nearest_city: population.nearest_location.clone(),
        zones: Vec::with_capacity(zones.len()),
    };

    for zone in zones {
        let area_km2 = zone_area(zone);
        let people = (population.density * area_km2).floor();
        let (death_fraction, injury_fraction) = rates_for(cal, zone.severity)
            .map_or((0.0, 0.0), |rates| (rates.death_fraction, rates.injury_fraction));
        let deaths = (people * death_fraction).floor() as u64;
        let injuries = (people * injury_fraction).floor() as u64;
        let people = people as u64;

        report.total_deaths += deaths;
        report.total_injuries += injuries;
        report.affected_population += people;
        report.zones.push(ZoneCasualties {
            severity: zone.severity,
            radius_km: zone.radius_km,
            area_km2,
            population: people,
            deaths,
            injuries,
        });
    }

    log::debug!(
        "casualties: density={} /km², deaths={}, injuries={}",
        population.density,
        report.total_deaths,
        report.total_injuries
    );
    report
}
