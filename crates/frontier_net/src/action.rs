//! The closed catalogue of replayable state mutations.
//!
//! Every mutating call on the authoritative [`WorldState`](crate::WorldState)
//! is recorded as one [`Action`] and replayed verbatim on mirrors. The enum is
//! closed and tagged by mutation name, so application is an exhaustive match —
//! an unknown mutation is unrepresentable in memory and fails at decode on the
//! wire.

use frontier_ecs::EntityId;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::id::{FixtureId, ItemId};
use crate::kind::{EntityKind, FixtureKind, ItemKind};
use crate::view::ComponentView;

/// One recorded mutation to the state container.
///
/// All variants are safe to replay against a container where the target may
/// already be gone: mutations of a missing target are silent no-ops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "camelCase")]
pub enum Action {
    /// Register an entity record.
    CreateEntity {
        /// The entity id.
        id: EntityId,
        /// The kind it was composed as.
        kind: EntityKind,
    },
    /// Remove an entity record.
    DeleteEntity {
        /// The entity id.
        id: EntityId,
    },
    /// Overwrite one named component projection on an entity.
    SetComponent {
        /// The entity id.
        id: EntityId,
        /// The projection; its name keys the entity's component map.
        view: ComponentView,
    },
    /// Register an item record.
    CreateItem {
        /// The item id.
        id: ItemId,
        /// The item kind.
        kind: ItemKind,
        /// Stack size.
        quantity: u32,
    },
    /// Overwrite an item's stack size.
    SetItemQuantity {
        /// The item id.
        id: ItemId,
        /// New stack size.
        quantity: u32,
    },
    /// Remove an item record.
    DeleteItem {
        /// The item id.
        id: ItemId,
    },
    /// Register a scenery fixture.
    CreateFixture {
        /// The fixture id.
        id: FixtureId,
        /// The fixture kind.
        kind: FixtureKind,
        /// World position.
        #[serde(with = "crate::codec::vec2_xy")]
        position: Vec2,
        /// Rotation in radians.
        rotation: f32,
        /// Uniform scale.
        scale: f32,
    },
    /// Remove a scenery fixture.
    DeleteFixture {
        /// The fixture id.
        id: FixtureId,
    },
    /// Set the world's display name.
    SetWorldName {
        /// The new name. `name` itself keys the mutation tag.
        world_name: String,
    },
    /// Set the simulation tick rate in Hz.
    SetTickRate {
        /// Ticks per second.
        ticks_per_second: u32,
    },
    /// Replace the team roster.
    SetTeams {
        /// Team names; indices are the team ids components carry.
        teams: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_action_is_tagged_by_mutation_name() {
        let action = Action::SetWorldName {
            world_name: "Artimes".to_string(),
        };
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(
            value,
            json!({"name": "setWorldName", "world_name": "Artimes"})
        );
    }

    #[test]
    fn test_action_roundtrip() {
        let actions = vec![
            Action::CreateEntity {
                id: EntityId::from_raw(3),
                kind: EntityKind::Pawn,
            },
            Action::SetComponent {
                id: EntityId::from_raw(3),
                view: ComponentView::Position {
                    position: Vec2::new(10.0, -4.5),
                },
            },
            Action::SetItemQuantity {
                id: ItemId(7),
                quantity: 9,
            },
            Action::SetTeams {
                teams: vec!["Crimson".to_string(), "Cobalt".to_string()],
            },
        ];
        let json = serde_json::to_string(&actions).unwrap();
        let restored: Vec<Action> = serde_json::from_str(&json).unwrap();
        assert_eq!(actions, restored);
    }

    #[test]
    fn test_unknown_mutation_fails_closed() {
        let result: Result<Action, _> =
            serde_json::from_value(json!({"name": "formatHardDrive"}));
        assert!(result.is_err());
    }
}
