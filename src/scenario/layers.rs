use serde::Serialize;

use crate::models::{CraterGeometry, RenderableZone};

const CRATER_COLOR: &str = "#888888";

/// Renderer-facing layer family. Blast rings keep the `airburst` tag map
/// clients already key on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    Crater,
    Fragment,
    #[serde(rename = "airburst")]
    Blast,
    Thermal,
    Seismic,
    Tsunami,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layer {
    #[serde(rename = "type")]
    pub kind: LayerKind,
    pub zone: String,
    pub radius_km: f64,
    pub color: &'static str,
}

impl Layer {
    pub fn from_zone<Z: RenderableZone>(kind: LayerKind, zone: &Z) -> Self {
        Self {
            kind,
            zone: zone.zone_name(),
            radius_km: zone.radius_km(),
            color: zone.color(),
        }
    }

    pub fn crater(geometry: &CraterGeometry) -> Self {
        Self {
            kind: LayerKind::Crater,
            zone: "crater".to_string(),
            radius_km: geometry.diameter_km / 2.0,
            color: CRATER_COLOR,
        }
    }
}

/// How many zones of each family a scenario renders, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerBudget {
    pub crater: bool,
    pub fragments: usize,
    pub blast: usize,
    pub thermal: usize,
    pub seismic: usize,
    pub tsunami: usize,
}

impl LayerBudget {
    fn limit(&self, kind: LayerKind) -> usize {
        match kind {
            LayerKind::Crater => usize::from(self.crater),
            LayerKind::Fragment => self.fragments,
            LayerKind::Blast => self.blast,
            LayerKind::Thermal => self.thermal,
            LayerKind::Seismic => self.seismic,
            LayerKind::Tsunami => self.tsunami,
        }
    }
}

/// Accumulates layers in push order, truncating each family to its budget.
pub struct LayerStack {
    budget: LayerBudget,
    layers: Vec<Layer>,
}

impl LayerStack {
    pub fn new(budget: LayerBudget) -> Self {
        Self {
            budget,
            layers: Vec::new(),
        }
    }

    pub fn crater(&mut self, geometry: Option<&CraterGeometry>) -> &mut Self {
        if self.budget.crater {
            self.layers.extend(geometry.map(Layer::crater));
        }
        self
    }

    pub fn zones<Z: RenderableZone>(&mut self, kind: LayerKind, zones: &[Z]) -> &mut Self {
        let limit = self.budget.limit(kind);
        self.layers.extend(
            zones
                .iter()
                .take(limit)
                .map(|zone| Layer::from_zone(kind, zone)),
        );
        self
    }

    pub fn finish(&mut self) -> Vec<Layer> {
        std::mem::take(&mut self.layers)
    }
}
