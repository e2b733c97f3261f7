use serde::Serialize;

use super::population::{great_circle_km, PopulationContext};
use crate::config::ConsequenceCalibration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskKind {
    MajorCity,
    Industrial,
    Nuclear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskSeverity {
    Critical,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategicRisk {
    #[serde(rename = "type")]
    pub kind: RiskKind,
    pub description: String,
    pub severity: RiskSeverity,
}

struct NuclearSite {
    name: &'static str,
    lat: f64,
    lon: f64,
}

const NUCLEAR_SITES: [NuclearSite; 7] = [
    NuclearSite { name: "Chernobyl", lat: 51.39, lon: 30.10 },
    NuclearSite { name: "Zaporizhzhia", lat: 47.51, lon: 34.59 },
    NuclearSite { name: "Fukushima Daiichi", lat: 37.42, lon: 141.03 },
    NuclearSite { name: "Kashiwazaki-Kariwa", lat: 37.43, lon: 138.60 },
    NuclearSite { name: "Gravelines", lat: 51.01, lon: 2.14 },
    NuclearSite { name: "Bruce", lat: 44.33, lon: -81.60 },
    NuclearSite { name: "Palo Verde", lat: 33.39, lon: -112.86 },
];

/// Qualitative flags for assets near the impact point.
///
/// `radius_km` is the blast radius inside which a nuclear plant is at risk.
pub fn strategic_risks(
    lat: f64,
    lon: f64,
    radius_km: f64,
    population: &PopulationContext,
    cal: &ConsequenceCalibration,
) -> Vec<StrategicRisk> {
    let mut risks = Vec::new();

    if population.density > cal.major_city_density {
        risks.push(StrategicRisk {
            kind: RiskKind::MajorCity,
            description: format!(
                "Major city ({}) inside the affected area",
                population.nearest_location
            ),
            severity: RiskSeverity::Critical,
        });
    }

    if population.density > cal.industrial_density {
        risks.push(StrategicRisk {
            kind: RiskKind::Industrial,
            description: "Likely secondary explosions at industrial facilities".to_string(),
            severity: RiskSeverity::High,
        });
    }

    for site in &NUCLEAR_SITES {
        let distance = great_circle_km(lat, lon, site.lat, site.lon);
        if distance < radius_km {
            risks.push(StrategicRisk {
                kind: RiskKind::Nuclear,
                description: format!(
                    "{} nuclear power plant inside the blast zone ({distance:.1} km)",
                    site.name
                ),
                severity: RiskSeverity::Critical,
            });
        }
    }

    risks
}
