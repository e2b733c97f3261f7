//! Human and economic consequences of the ground-level blast field.

mod casualties;
mod economic;
mod population;
mod strategic;

pub use casualties::{casualties, CasualtyReport, ZoneCasualties};
pub use economic::{economic_damage, EconomicDamage, InfrastructureClass, ZoneDamage};
pub use population::{
    great_circle_km, AreaType, CityProximity, ClassifierChain, LatitudeBands, PopulationContext,
    ReferenceCity, RegionClassifier,
};
pub use strategic::{strategic_risks, RiskKind, RiskSeverity, StrategicRisk};
