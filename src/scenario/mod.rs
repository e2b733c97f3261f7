//! Scenario composition.
//!
//! Each [`ScenarioKind`] maps to a fixed [`ScenarioPlan`]: which models run,
//! what energy each one sees, and how many zones of each model end up in
//! the rendered layer list.

mod layers;
mod presets;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ScenarioCalibration;
use crate::error::EngineError;
use crate::models::BurstMode;
use crate::params::ImpactParameters;

pub use layers::{Layer, LayerBudget, LayerKind, LayerStack};
pub use presets::{Preset, PresetLoader};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    Ground,
    Water,
    Airburst,
    Fragmentation,
}

/// Energy fed into the blast model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlastEnergy {
    /// Fraction of the total kinetic energy.
    Scaled(f64),
    /// Energy of the largest fragment.
    LargestFragment,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioPlan {
    pub crater: bool,
    pub fragmentation: bool,
    pub blast_energy: BlastEnergy,
    pub burst: BurstMode,
    /// Fraction of the total energy coupled into ground shaking.
    pub seismic_energy_scale: Option<f64>,
    pub tsunami: bool,
    /// Population, casualties, economic damage and strategic risks.
    pub consequences: bool,
    pub layers: LayerBudget,
}

impl ScenarioKind {
    pub const ALL: [ScenarioKind; 4] = [
        ScenarioKind::Ground,
        ScenarioKind::Water,
        ScenarioKind::Airburst,
        ScenarioKind::Fragmentation,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ScenarioKind::Ground => "ground",
            ScenarioKind::Water => "water",
            ScenarioKind::Airburst => "airburst",
            ScenarioKind::Fragmentation => "fragmentation",
        }
    }

    pub fn is_water(self) -> bool {
        self == ScenarioKind::Water
    }

    pub fn plan(self, params: &ImpactParameters, cal: &ScenarioCalibration) -> ScenarioPlan {
        match self {
            ScenarioKind::Ground => ScenarioPlan {
                crater: true,
                fragmentation: false,
                blast_energy: BlastEnergy::Scaled(1.0),
                burst: BurstMode::Surface,
                seismic_energy_scale: Some(1.0),
                tsunami: false,
                consequences: true,
                layers: LayerBudget {
                    crater: true,
                    fragments: 0,
                    blast: 3,
                    thermal: 2,
                    seismic: 2,
                    tsunami: 0,
                },
            },
            ScenarioKind::Water => ScenarioPlan {
                crater: false,
                fragmentation: false,
                blast_energy: BlastEnergy::Scaled(cal.water_blast_energy_scale),
                burst: BurstMode::Surface,
                seismic_energy_scale: None,
                tsunami: true,
                consequences: false,
                layers: LayerBudget {
                    crater: false,
                    fragments: 0,
                    blast: 2,
                    thermal: 2,
                    seismic: 0,
                    tsunami: 4,
                },
            },
            ScenarioKind::Airburst => ScenarioPlan {
                crater: false,
                fragmentation: false,
                blast_energy: BlastEnergy::Scaled(1.0),
                burst: match params.burst_height_km {
                    Some(height_km) => BurstMode::Air { height_km },
                    None => BurstMode::Auto { height_km: None },
                },
                seismic_energy_scale: Some(cal.airburst_seismic_energy_scale),
                tsunami: false,
                consequences: true,
                layers: LayerBudget {
                    crater: false,
                    fragments: 0,
                    blast: 4,
                    thermal: 2,
                    seismic: 2,
                    tsunami: 0,
                },
            },
            ScenarioKind::Fragmentation => ScenarioPlan {
                crater: false,
                fragmentation: true,
                blast_energy: BlastEnergy::LargestFragment,
                burst: BurstMode::Surface,
                seismic_energy_scale: None,
                tsunami: false,
                consequences: true,
                layers: LayerBudget {
                    crater: false,
                    fragments: usize::MAX,
                    blast: 2,
                    thermal: 2,
                    seismic: 0,
                    tsunami: 0,
                },
            },
        }
    }
}

impl FromStr for ScenarioKind {
    type Err = EngineError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ScenarioKind::ALL
            .into_iter()
            .find(|kind| value.trim().eq_ignore_ascii_case(kind.as_str()))
            .ok_or_else(|| EngineError::UnknownScenario {
                tag: value.to_string(),
            })
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
