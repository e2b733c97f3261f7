//! Population density lookup.
//!
//! Density comes from an ordered chain of [`RegionClassifier`] rules: the
//! first rule that recognises a coordinate wins. The default chain checks the
//! major-city table, then falls back to coarse latitude/longitude bands.

use serde::Serialize;

const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaType {
    Urban,
    Suburban,
    Rural,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopulationContext {
    pub area_type: AreaType,
    /// People per km².
    pub density: f64,
    pub nearest_location: String,
    pub distance_km: f64,
}

/// Capability that maps coordinates to a population estimate.
pub trait RegionClassifier: Send + Sync {
    fn classify(&self, lat: f64, lon: f64) -> Option<PopulationContext>;
}

/// Great-circle distance in km (haversine).
pub fn great_circle_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();
    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceCity {
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
    pub density: f64,
}

const MAJOR_CITIES: [ReferenceCity; 9] = [
    ReferenceCity { name: "Tokyo", lat: 35.6, lon: 139.7, density: 15_000.0 },
    ReferenceCity { name: "Dhaka", lat: 23.8, lon: 90.4, density: 20_000.0 },
    ReferenceCity { name: "Manhattan", lat: 40.7, lon: -74.0, density: 28_000.0 },
    ReferenceCity { name: "Mumbai", lat: 19.0, lon: 72.8, density: 20_000.0 },
    ReferenceCity { name: "Kyiv", lat: 50.4, lon: 30.5, density: 3_500.0 },
    ReferenceCity { name: "London", lat: 51.5, lon: -0.1, density: 5_700.0 },
    ReferenceCity { name: "Paris", lat: 48.8, lon: 2.3, density: 21_000.0 },
    ReferenceCity { name: "Moscow", lat: 55.7, lon: 37.6, density: 4_900.0 },
    ReferenceCity { name: "Shanghai", lat: 31.2, lon: 121.5, density: 7_700.0 },
];

/// Matches coordinates within `radius_km` of a known city, with density
/// decaying linearly away from the centre down to `decay_floor`.
pub struct CityProximity {
    cities: Vec<ReferenceCity>,
    radius_km: f64,
    decay_floor: f64,
}

impl CityProximity {
    pub fn new(radius_km: f64, decay_floor: f64) -> Self {
        Self {
            cities: MAJOR_CITIES.to_vec(),
            radius_km,
            decay_floor,
        }
    }

    pub fn with_cities(mut self, cities: Vec<ReferenceCity>) -> Self {
        self.cities = cities;
        self
    }
}

impl RegionClassifier for CityProximity {
    fn classify(&self, lat: f64, lon: f64) -> Option<PopulationContext> {
        self.cities.iter().find_map(|city| {
            let distance = great_circle_km(lat, lon, city.lat, city.lon);
            (distance < self.radius_km).then(|| {
                let decay = (1.0 - distance / self.radius_km).max(self.decay_floor);
                PopulationContext {
                    area_type: AreaType::Urban,
                    density: (city.density * decay).floor(),
                    nearest_location: city.name.to_string(),
                    distance_km: distance,
                }
            })
        })
    }
}

/// Coarse latitude-band by longitude-region heuristic. Always answers.
pub struct LatitudeBands;

impl LatitudeBands {
    fn context(area_type: AreaType, density: f64, label: &str) -> PopulationContext {
        PopulationContext {
            area_type,
            density,
            nearest_location: label.to_string(),
            distance_km: 0.0,
        }
    }
}

impl RegionClassifier for LatitudeBands {
    fn classify(&self, lat: f64, lon: f64) -> Option<PopulationContext> {
        let abs_lat = lat.abs();
        let asia = lon > 60.0 && lon < 150.0;
        let context = if abs_lat < 23.5 {
            if asia {
                Self::context(AreaType::Suburban, 400.0, "Region")
            } else {
                Self::context(AreaType::Rural, 80.0, "Region")
            }
        } else if abs_lat < 50.0 {
            if lon > -10.0 && lon < 50.0 {
                Self::context(AreaType::Suburban, 500.0, "Europe")
            } else if asia {
                Self::context(AreaType::Suburban, 600.0, "Asia")
            } else if lon > -130.0 && lon < -60.0 {
                Self::context(AreaType::Suburban, 200.0, "America")
            } else {
                Self::context(AreaType::Rural, 50.0, "Region")
            }
        } else {
            Self::context(AreaType::Rural, 5.0, "Remote region")
        };
        Some(context)
    }
}

/// Ordered list of classifier rules.
#[derive(Default)]
pub struct ClassifierChain {
    rules: Vec<Box<dyn RegionClassifier>>,
}

impl ClassifierChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rule(mut self, rule: impl RegionClassifier + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// City table first, latitude bands as the catch-all.
    pub fn standard(city_radius_km: f64, decay_floor: f64) -> Self {
        Self::new()
            .with_rule(CityProximity::new(city_radius_km, decay_floor))
            .with_rule(LatitudeBands)
    }

    /// First matching rule, or an empty rural context when nothing matches.
    pub fn resolve(&self, lat: f64, lon: f64) -> PopulationContext {
        self.classify(lat, lon).unwrap_or(PopulationContext {
            area_type: AreaType::Rural,
            density: 0.0,
            nearest_location: "Unknown".to_string(),
            distance_km: 0.0,
        })
    }
}

impl RegionClassifier for ClassifierChain {
    fn classify(&self, lat: f64, lon: f64) -> Option<PopulationContext> {
        self.rules.iter().find_map(|rule| rule.classify(lat, lon))
    }
}
