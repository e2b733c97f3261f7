use serde::Serialize;

use crate::{
    config::EngineConfig,
    consequence::{
        casualties, economic_damage, strategic_risks, CasualtyReport, ClassifierChain,
        EconomicDamage, PopulationContext, RegionClassifier, StrategicRisk,
    },
    error::EngineError,
    facts,
    material::MaterialInfo,
    models::{
        blast_zones, crater, fragment, kinetic_energy, seismic_zones, thermal_zones, tsunami,
        BlastReport, CraterGeometry, CraterInput, EnergyResult, FragmentationReport,
        SeismicReport, ThermalZone, TsunamiReport,
    },
    params::{ImpactParameters, ImpactRequest},
    rng::{RngManager, FACTS_STREAM, FRAGMENTATION_STREAM},
    scenario::{BlastEnergy, Layer, LayerKind, LayerStack, ScenarioKind},
};

/// Everything computed for one impact.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactResult {
    pub scenario: ScenarioKind,
    pub is_water: bool,
    /// Master seed behind the randomized fields; replaying it reproduces them.
    pub seed: u64,
    pub input: ImpactParameters,
    pub material: MaterialInfo,
    pub energy: EnergyResult,
    /// Megatons rounded to two decimals.
    #[serde(rename = "energy_Mt")]
    pub energy_mt: f64,
    pub crater_diameter_km: f64,
    /// Headline shaking intensity, capped at XII.
    pub mmi: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crater: Option<CraterGeometry>,
    pub blast: BlastReport,
    pub thermal: Vec<ThermalZone>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seismic: Option<SeismicReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tsunami: Option<TsunamiReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fragmentation: Option<FragmentationReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub population: Option<PopulationContext>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub casualties: Option<CasualtyReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub economic_damage: Option<EconomicDamage>,
    pub strategic_risks: Vec<StrategicRisk>,
    pub layers: Vec<Layer>,
    pub fun_fact: &'static str,
}

pub struct EngineBuilder {
    config: EngineConfig,
    classifier: Option<ClassifierChain>,
}

impl EngineBuilder {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            classifier: None,
        }
    }

    /// Replaces the default city-table/latitude-band population lookup.
    pub fn with_classifier(mut self, classifier: ClassifierChain) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Prepends a rule ahead of the default lookup chain.
    pub fn with_region_rule(mut self, rule: impl RegionClassifier + 'static) -> Self {
        let standard = self.standard_chain();
        let chain = self.classifier.take().unwrap_or(standard);
        self.classifier = Some(ClassifierChain::new().with_rule(rule).with_rule(chain));
        self
    }

    fn standard_chain(&self) -> ClassifierChain {
        ClassifierChain::standard(
            self.config.consequence.city_radius_km,
            self.config.consequence.city_decay_floor,
        )
    }

    pub fn build(self) -> Result<Engine, EngineError> {
        self.config.validate()?;
        let classifier = match self.classifier {
            Some(chain) => chain,
            None => self.standard_chain(),
        };
        Ok(Engine {
            config: self.config,
            classifier,
        })
    }
}

/// Stateless impact calculator; safe to share across threads.
pub struct Engine {
    config: EngineConfig,
    classifier: ClassifierChain,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        EngineBuilder::new(config).build()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Parses, validates and computes a raw request.
    pub fn compute_request(&self, request: &ImpactRequest) -> Result<ImpactResult, EngineError> {
        let params = ImpactParameters::try_from(request)?;
        self.compute(&params)
    }

    /// Uses the configured fixed seed when present, fresh entropy otherwise.
    pub fn compute(&self, params: &ImpactParameters) -> Result<ImpactResult, EngineError> {
        let mut rng = match self.config.rng.seed {
            Some(seed) => RngManager::new(seed),
            None => RngManager::from_entropy(),
        };
        self.compute_with_rng(params, &mut rng)
    }

    pub fn compute_seeded(
        &self,
        params: &ImpactParameters,
        seed: u64,
    ) -> Result<ImpactResult, EngineError> {
        self.compute_with_rng(params, &mut RngManager::new(seed))
    }

    pub fn compute_with_rng(
        &self,
        params: &ImpactParameters,
        rng: &mut RngManager,
    ) -> Result<ImpactResult, EngineError> {
        params.validate()?;
        let cfg = &self.config;
        let scenario = params.scenario;
        let plan = scenario.plan(params, &cfg.scenario);

        let energy = kinetic_energy(params.diameter_m, params.speed_km_s, params.material);
        let total_mt = energy.energy_mt;

        let crater = plan.crater.then(|| {
            let input = CraterInput {
                diameter_m: params.diameter_m,
                speed_km_s: params.speed_km_s,
                angle_deg: params.angle_deg,
                impactor_density: params.material.density(),
                target_density: params.target.density(&cfg.crater),
                energy_mt: total_mt,
            };
            crater(&input, &cfg.crater)
        });

        let fragmentation = plan.fragmentation.then(|| {
            let count = params.fragments.unwrap_or(cfg.fragmentation.default_count);
            fragment(
                params.diameter_m,
                total_mt,
                count,
                &cfg.fragmentation,
                &mut rng.stream(FRAGMENTATION_STREAM),
            )
        });

        let blast_mt = match plan.blast_energy {
            BlastEnergy::Scaled(scale) => total_mt * scale,
            BlastEnergy::LargestFragment => fragmentation
                .as_ref()
                .and_then(FragmentationReport::largest)
                .map_or(total_mt, |largest| largest.energy_mt),
        };
        let blast = blast_zones(blast_mt, plan.burst, &cfg.blast);
        let thermal = thermal_zones(total_mt, &cfg.thermal);
        let seismic = plan
            .seismic_energy_scale
            .map(|scale| seismic_zones(total_mt * scale, &cfg.seismic));
        let tsunami = plan.tsunami.then(|| {
            let depth = params
                .water_depth_m
                .unwrap_or(cfg.tsunami.default_water_depth_m);
            tsunami(total_mt, depth, &cfg.tsunami)
        });

        let (population, casualty_report, economic, risks) = if plan.consequences {
            let population = self.classifier.resolve(params.lat, params.lon);
            let casualty_report = casualties(&blast.zones, &population, &cfg.consequence);
            let economic = economic_damage(&blast.zones, &thermal, &population, &cfg.consequence);
            let risks = strategic_risks(
                params.lat,
                params.lon,
                blast.outer_radius_km(),
                &population,
                &cfg.consequence,
            );
            (Some(population), Some(casualty_report), Some(economic), risks)
        } else {
            (None, None, None, Vec::new())
        };

        let mut stack = LayerStack::new(plan.layers);
        stack.crater(crater.as_ref());
        if let Some(report) = &fragmentation {
            stack.zones(LayerKind::Fragment, &report.fragments);
        }
        stack
            .zones(LayerKind::Blast, &blast.zones)
            .zones(LayerKind::Thermal, &thermal);
        if let Some(report) = &seismic {
            stack.zones(LayerKind::Seismic, &report.zones);
        }
        if let Some(report) = &tsunami {
            stack.zones(LayerKind::Tsunami, &report.rings);
        }
        let layers = stack.finish();

        let fun_fact = facts::pick(&mut rng.stream(FACTS_STREAM));

        log::info!(
            "impact: scenario={scenario}, d={} m, v={} km/s, angle={}°, material={}, E={total_mt:.3} Mt, layers={}",
            params.diameter_m,
            params.speed_km_s,
            params.angle_deg,
            params.material,
            layers.len()
        );

        Ok(ImpactResult {
            scenario,
            is_water: scenario.is_water(),
            seed: rng.master_seed(),
            input: params.clone(),
            material: params.material.into(),
            energy_mt: (total_mt * 100.0).round() / 100.0,
            crater_diameter_km: crater.as_ref().map_or(0.0, |geometry| geometry.diameter_km),
            mmi: headline_mmi(total_mt),
            energy,
            crater,
            blast,
            thermal,
            seismic,
            tsunami,
            fragmentation,
            population,
            casualties: casualty_report,
            economic_damage: economic,
            strategic_risks: risks,
            layers,
            fun_fact,
        })
    }
}

fn headline_mmi(energy_mt: f64) -> u8 {
    (3.0 + 2.0 * (energy_mt.max(0.0) + 1.0).log10())
        .floor()
        .min(12.0) as u8
}
