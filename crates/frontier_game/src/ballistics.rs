//! Projectile energy model.
//!
//! Deliberately simple: muzzle velocity is a linear interpolation of the
//! round's velocity range by where the weapon's barrel length falls in the
//! round's supported barrel range, clamped to that range. Impact energy is
//! plain kinetic energy; no drag, no falloff over distance.

use crate::stats::{AmmoStats, WeaponStats};

/// Kinetic energy that removes one full point of health.
pub const ENERGY_PER_HEALTH: f32 = 400.0;

pub fn lerp(v0: f32, v1: f32, t: f32) -> f32 {
    v0 + t * (v1 - v0)
}

pub fn inverse_lerp(v0: f32, v1: f32, v: f32) -> f32 {
    (v - v0) / (v1 - v0)
}

/// Muzzle velocity of a round fired from a given weapon, m/s.
#[must_use]
pub fn muzzle_velocity(weapon: &WeaponStats, ammo: &AmmoStats) -> f32 {
    let barrel = weapon
        .barrel_length
        .clamp(ammo.barrel_length_min, ammo.barrel_length_max);
    let t = inverse_lerp(ammo.barrel_length_min, ammo.barrel_length_max, barrel);
    lerp(ammo.velocity_min, ammo.velocity_max, t)
}

/// Kinetic energy of a round fired from a given weapon, joules.
#[must_use]
pub fn kinetic_energy(weapon: &WeaponStats, ammo: &AmmoStats) -> f32 {
    let velocity = muzzle_velocity(weapon, ammo);
    (ammo.projectile_mass / 2.0) * velocity * velocity
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{item_stats, ItemStats};
    use frontier_net::ItemKind;

    fn rifle_and_round() -> (&'static WeaponStats, &'static AmmoStats) {
        let ItemStats::Weapon(weapon) = item_stats(ItemKind::Win1906) else {
            panic!("not a weapon");
        };
        let ItemStats::Ammo(ammo) = item_stats(ItemKind::Ammo22Short) else {
            panic!("not ammo");
        };
        (weapon, ammo)
    }

    #[test]
    fn test_muzzle_velocity_interpolates_by_barrel_length() {
        let (weapon, ammo) = rifle_and_round();
        // (0.508 - 0.08) / (0.62 - 0.08) of the way from 175 to 400 m/s.
        let velocity = muzzle_velocity(weapon, ammo);
        assert!((velocity - 353.3333).abs() < 0.01, "velocity {velocity}");
    }

    #[test]
    fn test_barrel_length_is_clamped_to_round_range() {
        let (_, ammo) = rifle_and_round();
        let stub = WeaponStats {
            display_name: "stub",
            barrel_length: 2.0,
            use_while_moving: false,
            ammo: Some(ItemKind::Ammo22Short),
        };
        assert_eq!(muzzle_velocity(&stub, ammo), ammo.velocity_max);
    }

    #[test]
    fn test_kinetic_energy_known_value() {
        let (weapon, ammo) = rifle_and_round();
        let energy = kinetic_energy(weapon, ammo);
        assert!((energy - 118.60).abs() < 0.05, "energy {energy}");
        // About 0.3 health per hit, four hits to drop a full-health target.
        let damage = energy / ENERGY_PER_HEALTH;
        assert!(damage > 0.25 && damage < 0.34);
    }
}
