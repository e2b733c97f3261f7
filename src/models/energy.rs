use std::f64::consts::PI;

use serde::Serialize;

use crate::material::Material;

/// Joules per megaton of TNT.
pub const JOULES_PER_MT: f64 = 4.184e15;
/// Yield of the Hiroshima bomb in megatons.
pub const HIROSHIMA_MT: f64 = 0.015;

/// Mass and kinetic energy of the impactor, computed once per request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnergyResult {
    pub volume_m3: f64,
    pub mass_kg: f64,
    pub energy_j: f64,
    pub energy_mt: f64,
    pub hiroshima_eq: f64,
    pub tnt_kg: f64,
}

/// Kinetic energy of a spherical impactor.
///
/// `diameter_m` in meters, `speed_km_s` in km/s. The material strength
/// multiplier is not folded into the megaton figure.
pub fn kinetic_energy(diameter_m: f64, speed_km_s: f64, material: Material) -> EnergyResult {
    let radius = diameter_m / 2.0;
    let volume_m3 = 4.0 / 3.0 * PI * radius.powi(3);
    let mass_kg = volume_m3 * material.density();
    let velocity = speed_km_s * 1000.0;

    let energy_j = 0.5 * mass_kg * velocity * velocity;
    let energy_mt = energy_j / JOULES_PER_MT;

    log::debug!(
        "energy: d={diameter_m} m, v={speed_km_s} km/s, material={material}, mass={mass_kg:.3e} kg, E={energy_j:.3e} J = {energy_mt:.3} Mt"
    );

    EnergyResult {
        volume_m3,
        mass_kg,
        energy_j,
        energy_mt,
        hiroshima_eq: energy_mt / HIROSHIMA_MT,
        tnt_kg: energy_mt * 1e9,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn hundred_meter_stone_is_about_75_megatons() {
        let energy = kinetic_energy(100.0, 20.0, Material::Stone);
        assert_relative_eq!(energy.energy_mt, 75.0, max_relative = 0.01);
    }

    #[test]
    fn equivalents_follow_megatons() {
        let energy = kinetic_energy(50.0, 17.0, Material::Iron);
        assert_relative_eq!(energy.hiroshima_eq, energy.energy_mt / 0.015);
        assert_relative_eq!(energy.tnt_kg, energy.energy_mt * 1e9);
        assert_relative_eq!(energy.energy_j / JOULES_PER_MT, energy.energy_mt);
    }

    #[test]
    fn denser_material_carries_more_energy() {
        let ice = kinetic_energy(60.0, 20.0, Material::Ice);
        let stone = kinetic_energy(60.0, 20.0, Material::Stone);
        let iron = kinetic_energy(60.0, 20.0, Material::Iron);
        assert!(ice.energy_j < stone.energy_j);
        assert!(stone.energy_j < iron.energy_j);
        assert_relative_eq!(iron.mass_kg / stone.mass_kg, 7800.0 / 3000.0, max_relative = 1e-12);
    }
}
