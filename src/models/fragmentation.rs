use rand::RngCore;
use serde::Serialize;

use super::RenderableZone;
use crate::config::FragmentationCalibration;
use crate::rng::RngExt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FragmentRecord {
    pub id: u32,
    pub size_m: f64,
    /// Fraction of the total energy; all shares sum to 1.
    pub energy_share: f64,
    pub energy_mt: f64,
    /// Lateral distance from the primary impact point (km).
    pub separation_km: f64,
    pub blast_radius_km: f64,
}

impl RenderableZone for FragmentRecord {
    fn zone_name(&self) -> String {
        format!("fragment_{}", self.id)
    }

    fn radius_km(&self) -> f64 {
        self.blast_radius_km
    }

    fn color(&self) -> &'static str {
        "#9B59B6"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FragmentationReport {
    pub total_energy_mt: f64,
    pub fragmentation_altitude_km: f64,
    pub fragments: Vec<FragmentRecord>,
}

impl FragmentationReport {
    pub fn largest(&self) -> Option<&FragmentRecord> {
        self.fragments.first()
    }
}

/// Splits an impactor into `count` energy-weighted fragments, largest first.
///
/// `count` must be at least 1; separations and altitude come from `rng`.
pub fn fragment<R: RngCore>(
    diameter_m: f64,
    total_energy_mt: f64,
    count: u32,
    cal: &FragmentationCalibration,
    rng: &mut R,
) -> FragmentationReport {
    let n = f64::from(count.max(1));
    let size_factors: Vec<f64> = (0..count.max(1))
        .map(|i| (n - f64::from(i)) / n)
        .collect();
    let weight_sum: f64 = size_factors
        .iter()
        .map(|factor| factor.powf(cal.energy_exponent))
        .sum();

    let fragments = size_factors
        .iter()
        .zip(1u32..)
        .map(|(&factor, id)| {
            let energy_share = factor.powf(cal.energy_exponent) / weight_sum;
            let energy_mt = total_energy_mt * energy_share;
            let separation_km =
                rng.uniform(cal.separation_min_km, cal.separation_max_km) * f64::from(id);
            FragmentRecord {
                id,
                size_m: diameter_m * factor.powf(cal.size_exponent),
                energy_share,
                energy_mt,
                separation_km,
                blast_radius_km: cal.blast_coefficient * energy_mt.max(0.0).cbrt(),
            }
        })
        .collect();

    let fragmentation_altitude_km =
        cal.altitude_mean_km + rng.uniform(-cal.altitude_spread_km, cal.altitude_spread_km);

    log::debug!("fragmentation: n={count}, altitude={fragmentation_altitude_km:.1} km");

    FragmentationReport {
        total_energy_mt,
        fragmentation_altitude_km,
        fragments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{RngManager, FRAGMENTATION_STREAM};
    use approx::assert_relative_eq;

    fn split(count: u32, seed: u64) -> FragmentationReport {
        let mut rng = RngManager::new(seed);
        fragment(
            100.0,
            75.0,
            count,
            &FragmentationCalibration::default(),
            &mut rng.stream(FRAGMENTATION_STREAM),
        )
    }

    #[test]
    fn shares_sum_to_total() {
        for count in 1..=10 {
            let report = split(count, 1);
            let total: f64 = report.fragments.iter().map(|f| f.energy_mt).sum();
            assert_relative_eq!(total, 75.0, max_relative = 1e-9);
            assert_eq!(report.fragments.len(), count as usize);
        }
    }

    #[test]
    fn single_fragment_keeps_everything() {
        let report = split(1, 5);
        let only = &report.fragments[0];
        assert_relative_eq!(only.energy_share, 1.0);
        assert_relative_eq!(only.size_m, 100.0);
        assert_relative_eq!(only.blast_radius_km, 0.5 * 75f64.cbrt());
    }

    #[test]
    fn fragments_shrink_with_index() {
        let report = split(4, 2);
        for pair in report.fragments.windows(2) {
            assert!(pair[1].size_m < pair[0].size_m);
            assert!(pair[1].energy_mt < pair[0].energy_mt);
        }
        assert_eq!(report.largest().map(|f| f.id), Some(1));
    }

    #[test]
    fn separation_and_altitude_stay_in_range() {
        for seed in 0..20 {
            let report = split(3, seed);
            for fragment in &report.fragments {
                let scale = f64::from(fragment.id);
                assert!(fragment.separation_km >= 2.0 * scale);
                assert!(fragment.separation_km < 10.0 * scale);
            }
            assert!((15.0..25.0).contains(&report.fragmentation_altitude_km));
        }
    }

    #[test]
    fn fixed_seed_is_reproducible() {
        assert_eq!(split(3, 11), split(3, 11));
        assert_ne!(split(3, 11), split(3, 12));
    }
}
