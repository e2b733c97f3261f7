//! Physical impact models.
//!
//! Each model is a pure function of the shared [`EnergyResult`] (or the raw
//! geometry for the crater) and its calibration block.

mod blast;
mod crater;
mod energy;
mod fragmentation;
mod seismic;
mod thermal;
mod tsunami;

pub use blast::{blast_zones, BlastReport, BlastSeverity, BlastZone, BurstMode};
pub use crater::{crater, CraterGeometry, CraterInput, CraterShape};
pub use energy::{kinetic_energy, EnergyResult, HIROSHIMA_MT, JOULES_PER_MT};
pub use fragmentation::{fragment, FragmentRecord, FragmentationReport};
pub use seismic::{seismic_zones, SeismicReport, SeismicZone};
pub use thermal::{thermal_zones, BurnDegree, ThermalZone};
pub use tsunami::{tsunami, TsunamiLevel, TsunamiReport, TsunamiRing};

/// A concentric severity band that can be drawn on a map.
pub trait RenderableZone {
    /// Stable zone identifier, e.g. `"heavy_damage"` or `"seismic_mmi_8"`.
    fn zone_name(&self) -> String;
    fn radius_km(&self) -> f64;
    fn color(&self) -> &'static str;
}
