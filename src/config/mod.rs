//! Calibration constants for every impact model.
//!
//! All tunable numbers live here rather than inline in the formulas, so a YAML
//! file can override any subset of them without touching model code.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::consequence::InfrastructureClass;
use crate::error::EngineError;
use crate::models::{BlastSeverity, BurnDegree, TsunamiLevel};

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub crater: CraterCalibration,
    pub blast: BlastCalibration,
    pub thermal: ThermalCalibration,
    pub seismic: SeismicCalibration,
    pub tsunami: TsunamiCalibration,
    pub fragmentation: FragmentationCalibration,
    pub consequence: ConsequenceCalibration,
    pub scenario: ScenarioCalibration,
    pub rng: RngConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CraterCalibration {
    /// Crystalline rock target density (kg/m³).
    pub target_density: f64,
    pub sand_density: f64,
    pub soil_density: f64,
    /// Surface gravity (m/s²).
    pub gravity: f64,
    /// Lower clamp on sin(angle) used by the angle correction.
    pub angle_floor: f64,
    /// Impacts below this angle (degrees) are shallow and elliptical.
    pub shallow_angle_deg: f64,
    /// Global multiplier tuned against the 49 m / 20 km/s / 80° reference.
    pub calibration: f64,
    pub max_elongation: f64,
    pub depth_ratio: f64,
    pub rim_ratio: f64,
}

impl Default for CraterCalibration {
    fn default() -> Self {
        Self {
            target_density: 2750.0,
            sand_density: 1650.0,
            soil_density: 1500.0,
            gravity: 9.81,
            angle_floor: 0.35,
            shallow_angle_deg: 30.0,
            calibration: 0.605,
            max_elongation: 3.0,
            depth_ratio: 0.2,
            rim_ratio: 0.04,
        }
    }
}

/// One overpressure threshold row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlastThreshold {
    pub severity: BlastSeverity,
    pub pressure_kpa: f64,
    /// Surface-burst radius at 1 Mt (km); scales with E^(1/3).
    pub base_radius_km: f64,
    /// Height of burst maximising this radius at 1 Mt (km).
    pub optimal_hob_km: f64,
    /// Radius gain at the optimal height, as a fraction.
    pub peak_gain: f64,
    /// Gaussian width relative to the optimal height.
    pub hob_width: f64,
    pub wind_speed_kmh: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlastCalibration {
    pub energy_floor_mt: f64,
    pub hob_floor: f64,
    pub thresholds: Vec<BlastThreshold>,
}

impl Default for BlastCalibration {
    fn default() -> Self {
        let row = |severity, pressure_kpa, base_radius_km, optimal_hob_km, peak_gain, hob_width, wind_speed_kmh| {
            BlastThreshold {
                severity,
                pressure_kpa,
                base_radius_km,
                optimal_hob_km,
                peak_gain,
                hob_width,
                wind_speed_kmh,
            }
        };
        Self {
            energy_floor_mt: 1e-9,
            hob_floor: 0.7,
            thresholds: vec![
                row(BlastSeverity::TotalDestruction, 100.0, 3.0, 0.8, 0.0, 0.8, 700.0),
                row(BlastSeverity::HeavyDamage, 50.0, 4.0, 1.2, 0.10, 1.0, 420.0),
                row(BlastSeverity::ModerateDamage, 20.0, 5.8, 1.8, 0.20, 1.2, 200.0),
                row(BlastSeverity::LightDamage, 5.0, 10.3, 2.6, 0.35, 1.4, 60.0),
                row(BlastSeverity::GlassBreakage, 1.0, 20.0, 3.6, 0.30, 1.6, 15.0),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermalBand {
    pub degree: BurnDegree,
    pub coefficient: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThermalCalibration {
    pub exponent: f64,
    pub bands: Vec<ThermalBand>,
}

impl Default for ThermalCalibration {
    fn default() -> Self {
        Self {
            exponent: 0.41,
            bands: vec![
                ThermalBand {
                    degree: BurnDegree::Third,
                    coefficient: 0.6,
                },
                ThermalBand {
                    degree: BurnDegree::Second,
                    coefficient: 0.9,
                },
                ThermalBand {
                    degree: BurnDegree::First,
                    coefficient: 1.5,
                },
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeismicBand {
    pub mmi: u8,
    pub coefficient: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeismicCalibration {
    pub radius_exponent: f64,
    pub magnitude_slope: f64,
    pub magnitude_offset: f64,
    pub bands: Vec<SeismicBand>,
}

impl Default for SeismicCalibration {
    fn default() -> Self {
        Self {
            radius_exponent: 0.33,
            magnitude_slope: 0.67,
            magnitude_offset: 4.87,
            bands: [(12, 0.1), (10, 0.3), (8, 0.6), (6, 1.2), (4, 2.5)]
                .into_iter()
                .map(|(mmi, coefficient)| SeismicBand { mmi, coefficient })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TsunamiThreshold {
    pub level: TsunamiLevel,
    pub height_m: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TsunamiCalibration {
    pub default_water_depth_m: f64,
    /// Informational only; feeds the wavelength.
    pub wave_period_s: f64,
    pub gravity: f64,
    /// H0 = height_coefficient * sqrt(E_Mt).
    pub height_coefficient: f64,
    /// Stabilising radius r0 in H(r) = H0 * sqrt(r0 / (r + r0)).
    pub reference_radius_km: f64,
    pub information_radius_km: f64,
    /// Antipodal distance; no ring extends past it.
    pub max_radius_km: f64,
    pub runup_factor: f64,
    pub warning_distance_km: f64,
    pub thresholds: Vec<TsunamiThreshold>,
}

impl Default for TsunamiCalibration {
    fn default() -> Self {
        Self {
            default_water_depth_m: 4000.0,
            wave_period_s: 900.0,
            gravity: 9.81,
            height_coefficient: 0.25,
            reference_radius_km: 10.0,
            information_radius_km: 2000.0,
            max_radius_km: 20_015.0,
            runup_factor: 2.5,
            warning_distance_km: 50.0,
            thresholds: [
                (TsunamiLevel::Extreme, 10.0),
                (TsunamiLevel::Major, 3.0),
                (TsunamiLevel::Moderate, 1.0),
                (TsunamiLevel::Minor, 0.3),
                (TsunamiLevel::Information, 0.1),
            ]
            .into_iter()
            .map(|(level, height_m)| TsunamiThreshold { level, height_m })
            .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FragmentationCalibration {
    pub default_count: u32,
    pub size_exponent: f64,
    pub energy_exponent: f64,
    pub separation_min_km: f64,
    pub separation_max_km: f64,
    pub blast_coefficient: f64,
    pub altitude_mean_km: f64,
    pub altitude_spread_km: f64,
}

impl Default for FragmentationCalibration {
    fn default() -> Self {
        Self {
            default_count: 3,
            size_exponent: 0.7,
            energy_exponent: 1.5,
            separation_min_km: 2.0,
            separation_max_km: 10.0,
            blast_coefficient: 0.5,
            altitude_mean_km: 20.0,
            altitude_spread_km: 5.0,
        }
    }
}

/// Human and structural loss rates for one blast severity band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneRates {
    pub severity: BlastSeverity,
    pub death_fraction: f64,
    pub injury_fraction: f64,
    pub destruction_fraction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfrastructureBracket {
    pub class: InfrastructureClass,
    /// Bracket applies when density is strictly above this value.
    pub min_density: f64,
    pub value_per_km2: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsequenceCalibration {
    pub city_radius_km: f64,
    pub city_decay_floor: f64,
    pub fire_surcharge: f64,
    pub industrial_multiplier: f64,
    pub damaged_zone_count: usize,
    pub major_city_density: f64,
    pub industrial_density: f64,
    pub zone_rates: Vec<ZoneRates>,
    /// Ordered densest first.
    pub infrastructure: Vec<InfrastructureBracket>,
}

impl Default for ConsequenceCalibration {
    fn default() -> Self {
        let rates = |severity, death_fraction, injury_fraction, destruction_fraction| ZoneRates {
            severity,
            death_fraction,
            injury_fraction,
            destruction_fraction,
        };
        let bracket = |class, min_density, value_per_km2| InfrastructureBracket {
            class,
            min_density,
            value_per_km2,
        };
        Self {
            city_radius_km: 50.0,
            city_decay_floor: 0.1,
            fire_surcharge: 0.3,
            industrial_multiplier: 1.5,
            damaged_zone_count: 3,
            major_city_density: 3000.0,
            industrial_density: 1000.0,
            zone_rates: vec![
                rates(BlastSeverity::TotalDestruction, 0.95, 0.05, 1.0),
                rates(BlastSeverity::HeavyDamage, 0.70, 0.25, 0.7),
                rates(BlastSeverity::ModerateDamage, 0.25, 0.60, 0.4),
                rates(BlastSeverity::LightDamage, 0.05, 0.50, 0.1),
                rates(BlastSeverity::GlassBreakage, 0.0, 0.15, 0.1),
            ],
            infrastructure: vec![
                bracket(InfrastructureClass::Megacity, 10_000.0, 500_000_000.0),
                bracket(InfrastructureClass::UrbanDense, 3_000.0, 100_000_000.0),
                bracket(InfrastructureClass::Urban, 800.0, 30_000_000.0),
                bracket(InfrastructureClass::Suburban, 200.0, 5_000_000.0),
                bracket(InfrastructureClass::Rural, 0.0, 500_000.0),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioCalibration {
    pub water_blast_energy_scale: f64,
    pub airburst_seismic_energy_scale: f64,
}

impl Default for ScenarioCalibration {
    fn default() -> Self {
        Self {
            water_blast_energy_scale: 0.5,
            airburst_seismic_energy_scale: 0.3,
        }
    }
}

/// Random source selection. A fixed seed makes every request reproducible.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RngConfig {
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: EngineConfig = serde_yaml::from_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid calibration in {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to YAML file
    pub fn to_yaml(&self, path: impl AsRef<Path>) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;
        Ok(())
    }

    /// Checks the ordering invariants the models rely on.
    pub fn validate(&self) -> Result<(), EngineError> {
        let crater = &self.crater;
        if !(crater.angle_floor > 0.0 && crater.angle_floor <= 1.0) {
            return Err(invalid("crater.angle_floor must lie in (0, 1]"));
        }
        if crater.max_elongation < 1.0 {
            return Err(invalid("crater.max_elongation must be at least 1"));
        }
        if crater.target_density <= 0.0 || crater.sand_density <= 0.0 || crater.soil_density <= 0.0
        {
            return Err(invalid("crater target densities must be positive"));
        }

        let blast = &self.blast;
        if blast.thresholds.is_empty() {
            return Err(invalid("blast.thresholds must not be empty"));
        }
        if !(blast.hob_floor > 0.0 && blast.hob_floor <= 1.0) {
            return Err(invalid("blast.hob_floor must lie in (0, 1]"));
        }
        for pair in blast.thresholds.windows(2) {
            if pair[1].pressure_kpa >= pair[0].pressure_kpa {
                return Err(invalid("blast thresholds must be ordered by decreasing pressure"));
            }
            if pair[1].base_radius_km <= pair[0].base_radius_km {
                return Err(invalid("blast base radii must increase as pressure decreases"));
            }
        }
        if blast
            .thresholds
            .iter()
            .any(|row| row.optimal_hob_km <= 0.0 || row.hob_width <= 0.0)
        {
            return Err(invalid("blast HOB optimum and width must be positive"));
        }

        if self
            .thermal
            .bands
            .windows(2)
            .any(|pair| pair[1].coefficient <= pair[0].coefficient)
        {
            return Err(invalid("thermal coefficients must increase as severity decreases"));
        }

        if self
            .seismic
            .bands
            .windows(2)
            .any(|pair| pair[1].mmi >= pair[0].mmi || pair[1].coefficient <= pair[0].coefficient)
        {
            return Err(invalid("seismic bands must be ordered from highest MMI outward"));
        }

        let tsunami = &self.tsunami;
        if tsunami
            .thresholds
            .windows(2)
            .any(|pair| pair[1].height_m >= pair[0].height_m)
        {
            return Err(invalid("tsunami thresholds must be ordered by decreasing height"));
        }
        if tsunami.thresholds.iter().any(|row| row.height_m <= 0.0) {
            return Err(invalid("tsunami threshold heights must be positive"));
        }
        if tsunami.reference_radius_km <= 0.0 || tsunami.default_water_depth_m <= 0.0 {
            return Err(invalid("tsunami reference radius and depth must be positive"));
        }

        let fragmentation = &self.fragmentation;
        if fragmentation.default_count == 0 {
            return Err(invalid("fragmentation.default_count must be at least 1"));
        }
        if fragmentation.separation_min_km > fragmentation.separation_max_km {
            return Err(invalid("fragmentation separation range is inverted"));
        }

        if self.consequence.infrastructure.is_empty() {
            return Err(invalid("consequence.infrastructure must not be empty"));
        }
        Ok(())
    }
}

fn invalid(message: &str) -> EngineError {
    EngineError::InvalidConfig(message.to_string())
}
