use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Impactor composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    Stone,
    Iron,
    Ice,
}

/// Static physical properties of a [`Material`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MaterialProps {
    /// Bulk density (kg/m³).
    pub density: f64,
    /// Dimensionless strength multiplier, reported but not folded into energy.
    pub strength: f64,
    pub name: &'static str,
}

const STONE: MaterialProps = MaterialProps {
    density: 3000.0,
    strength: 1.0,
    name: "Stony",
};

const IRON: MaterialProps = MaterialProps {
    density: 7800.0,
    strength: 2.5,
    name: "Iron",
};

const ICE: MaterialProps = MaterialProps {
    density: 917.0,
    strength: 0.3,
    name: "Icy",
};

impl Material {
    pub const ALL: [Material; 3] = [Material::Stone, Material::Iron, Material::Ice];

    pub fn props(self) -> MaterialProps {
        match self {
            Material::Stone => STONE,
            Material::Iron => IRON,
            Material::Ice => ICE,
        }
    }

    pub fn density(self) -> f64 {
        self.props().density
    }

    pub fn key(self) -> &'static str {
        match self {
            Material::Stone => "stone",
            Material::Iron => "iron",
            Material::Ice => "ice",
        }
    }
}

impl FromStr for Material {
    type Err = EngineError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "stone" => Ok(Material::Stone),
            "iron" => Ok(Material::Iron),
            "ice" => Ok(Material::Ice),
            _ => Err(EngineError::UnknownMaterial {
                key: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Material block echoed back in every result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialInfo {
    pub key: Material,
    pub name: &'static str,
    pub density: f64,
    pub strength: f64,
}

impl From<Material> for MaterialInfo {
    fn from(material: Material) -> Self {
        let props = material.props();
        Self {
            key: material,
            name: props.name,
            density: props.density,
            strength: props.strength,
        }
    }
}
