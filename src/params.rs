//! Impact request parsing and validation.
//!
//! [`ImpactRequest`] is the loose wire shape (string keys, optional scenario
//! options). [`ImpactParameters`] is the checked form the engine consumes.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::CraterCalibration;
use crate::error::EngineError;
use crate::material::Material;
use crate::scenario::ScenarioKind;

fn default_material() -> String {
    "stone".to_string()
}

fn default_scenario() -> String {
    "ground".to_string()
}

/// Impact request as received from a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactRequest {
    pub lat: f64,
    pub lon: f64,
    /// Impactor diameter (m).
    pub size: f64,
    /// Entry speed (km/s).
    pub speed: f64,
    /// Entry angle from the horizontal (degrees).
    pub angle: f64,
    #[serde(default = "default_material")]
    pub material: String,
    #[serde(default = "default_scenario")]
    pub scenario: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_depth_m: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub burst_height_km: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fragments: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

/// Ground type under a land impact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    #[default]
    Rock,
    Sand,
    Soil,
}

impl TargetKind {
    pub fn density(self, cal: &CraterCalibration) -> f64 {
        match self {
            TargetKind::Rock => cal.target_density,
            TargetKind::Sand => cal.sand_density,
            TargetKind::Soil => cal.soil_density,
        }
    }
}

impl FromStr for TargetKind {
    type Err = EngineError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "rock" => Ok(TargetKind::Rock),
            "sand" => Ok(TargetKind::Sand),
            "soil" => Ok(TargetKind::Soil),
            _ => Err(EngineError::UnknownTarget {
                key: value.to_string(),
            }),
        }
    }
}

/// Validated impactor and site description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactParameters {
    pub lat: f64,
    pub lon: f64,
    pub diameter_m: f64,
    pub speed_km_s: f64,
    pub angle_deg: f64,
    pub material: Material,
    pub scenario: ScenarioKind,
    pub target: TargetKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_depth_m: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub burst_height_km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fragments: Option<u32>,
}

impl ImpactParameters {
    /// Builds and validates the core parameter set; scenario options start empty.
    pub fn new(
        lat: f64,
        lon: f64,
        diameter_m: f64,
        speed_km_s: f64,
        angle_deg: f64,
        material: Material,
        scenario: ScenarioKind,
    ) -> Result<Self, EngineError> {
        let params = Self {
            lat,
            lon,
            diameter_m,
            speed_km_s,
            angle_deg,
            material,
            scenario,
            target: TargetKind::default(),
            water_depth_m: None,
            burst_height_km: None,
            fragments: None,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn with_target(mut self, target: TargetKind) -> Self {
        self.target = target;
        self
    }

    pub fn with_water_depth(mut self, depth_m: f64) -> Self {
        self.water_depth_m = Some(depth_m);
        self
    }

    pub fn with_burst_height(mut self, height_km: f64) -> Self {
        self.burst_height_km = Some(height_km);
        self
    }

    pub fn with_fragments(mut self, count: u32) -> Self {
        self.fragments = Some(count);
        self
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        positive("size", self.diameter_m)?;
        positive("speed", self.speed_km_s)?;
        finite("angle", self.angle_deg)?;
        if !(self.angle_deg > 0.0 && self.angle_deg <= 90.0) {
            return Err(EngineError::invalid(
                "angle",
                self.angle_deg,
                "must lie in (0, 90] degrees",
            ));
        }
        finite("lat", self.lat)?;
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(EngineError::invalid("lat", self.lat, "must lie in [-90, 90]"));
        }
        finite("lon", self.lon)?;
        if !(-180.0..=180.0).contains(&self.lon) {
            return Err(EngineError::invalid("lon", self.lon, "must lie in [-180, 180]"));
        }
        if let Some(depth) = self.water_depth_m {
            positive("water_depth_m", depth)?;
        }
        if let Some(height) = self.burst_height_km {
            finite("burst_height_km", height)?;
            if height < 0.0 {
                return Err(EngineError::invalid(
                    "burst_height_km",
                    height,
                    "must not be negative",
                ));
            }
        }
        if self.fragments == Some(0) {
            return Err(EngineError::invalid("fragments", 0.0, "must be at least 1"));
        }
        Ok(())
    }
}

fn finite(name: &'static str, value: f64) -> Result<(), EngineError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(EngineError::invalid(name, value, "must be a finite number"))
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), EngineError> {
    finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(EngineError::invalid(name, value, "must be positive"))
    }
}

impl TryFrom<ImpactRequest> for ImpactParameters {
    type Error = EngineError;

    fn try_from(request: ImpactRequest) -> Result<Self, Self::Error> {
        ImpactParameters::try_from(&request)
    }
}

impl TryFrom<&ImpactRequest> for ImpactParameters {
    type Error = EngineError;

    fn try_from(request: &ImpactRequest) -> Result<Self, Self::Error> {
        let material: Material = request.material.parse()?;
        let scenario: ScenarioKind = request.scenario.parse()?;
        let target = request
            .target
            .as_deref()
            .map(TargetKind::from_str)
            .transpose()?
            .unwrap_or_default();

        let params = Self {
            lat: request.lat,
            lon: request.lon,
            diameter_m: request.size,
            speed_km_s: request.speed,
            angle_deg: request.angle,
            material,
            scenario,
            target,
            water_depth_m: request.water_depth_m,
            burst_height_km: request.burst_height_km,
            fragments: request.fragments,
        };
        params.validate()?;
        Ok(params)
    }
}
