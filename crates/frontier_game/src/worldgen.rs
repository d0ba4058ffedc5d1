//! Procedural scenery.
//!
//! Fixtures are pure set dressing: created once at startup from the seeded
//! RNG and replicated to observers, never consulted by the simulation.

use std::collections::BTreeSet;

use frontier_net::FixtureKind;
use glam::Vec2;
use rand::Rng;
use tracing::info;

use crate::server::{ServerState, WORLD_HALF_EXTENT};

/// World units per grass grid cell.
const GRASS_CELL_SIZE: f32 = 10.0;
/// Fraction of feathered grass cells that survive thinning.
const GRASS_KEEP: f64 = 0.05;

/// Scatters ground patches and grass tufts across the map.
pub fn generate(server: &mut ServerState, rng: &mut impl Rng) {
    for _ in 0..100 {
        let position = Vec2::new(
            rng.gen_range(-WORLD_HALF_EXTENT..WORLD_HALF_EXTENT),
            rng.gen_range(-WORLD_HALF_EXTENT..WORLD_HALF_EXTENT),
        );
        let rotation = rng.gen_range(0.0..std::f32::consts::TAU);
        let scale = rng.gen_range(24.0..40.0);
        server.create_fixture(FixtureKind::PatchLarge, position, rotation, scale);
    }

    // Grass grows in feathered circular patches on a coarse grid: cells near
    // a patch centre survive more often, and the whole field is thinned hard.
    // Ordered set: fixture ids are handed out in iteration order, and the
    // same seed must assign the same id to the same cell every run.
    let mut cells: BTreeSet<(i32, i32)> = BTreeSet::new();
    for _ in 0..100 {
        let cx = rng.gen_range(-400..400);
        let cy = rng.gen_range(-400..400);
        let radius = rng.gen_range(10..30);
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let distance = f64::from(dx * dx + dy * dy).sqrt();
                if distance >= f64::from(radius) {
                    continue;
                }
                let feather = 1.0 - distance / f64::from(radius);
                if rng.gen_bool(feather * GRASS_KEEP) {
                    cells.insert((cx + dx, cy + dy));
                }
            }
        }
    }
    for (x, y) in &cells {
        let position = Vec2::new(*x as f32 * GRASS_CELL_SIZE, *y as f32 * GRASS_CELL_SIZE);
        server.create_fixture(FixtureKind::GrassSmall, position, 0.0, 1.0);
    }
    info!(grass = cells.len(), "scenery generated");
}
