pub mod config;
pub mod consequence;
pub mod engine;
pub mod error;
pub mod facts;
pub mod material;
pub mod models;
pub mod params;
pub mod rng;
pub mod scenario;
pub mod web;

pub use config::EngineConfig;
pub use engine::{Engine, EngineBuilder, ImpactResult};
pub use error::EngineError;
pub use material::Material;
pub use params::{ImpactParameters, ImpactRequest, TargetKind};
pub use scenario::{Layer, LayerKind, Preset, PresetLoader, ScenarioKind};
