//! Wire frames exchanged between the server and its observers.
//!
//! Every frame is a JSON object of the shape `{"tag": ..., "payload": ...}`.
//! Server-to-observer frames carry state (a full snapshot or a delta batch)
//! or a transient event; observer-to-server frames carry intents. Both
//! directions are closed enums, so an unknown frame fails at decode.

use frontier_ecs::EntityId;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::kind::{EntityKind, InstantKind, ItemKind};
use crate::state::WorldState;

/// A transient, unreplicated event: fire-and-forget presentation data.
///
/// Instants are broadcast once to currently synced observers and never enter
/// the state container, so a late joiner simply never sees them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstantEvent {
    /// What happened.
    pub kind: InstantKind,
    /// Where it originated.
    #[serde(with = "crate::codec::vec2_xy")]
    pub origin: Vec2,
    /// Velocity of the effect, world units per second.
    #[serde(with = "crate::codec::vec2_xy")]
    pub velocity: Vec2,
    /// Team index of the instigator.
    pub team: i32,
}

/// A frame sent from the server to an observer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tag", content = "payload", rename_all = "camelCase")]
pub enum ServerFrame {
    /// A complete snapshot of the state container. Sent once per observer,
    /// on first sync.
    FullState {
        /// The container at the instant the frame was built.
        state: WorldState,
    },
    /// The ordered batch of mutations recorded during one tick.
    DeltaState {
        /// The drained action log, in application order.
        actions: Vec<Action>,
    },
    /// A transient event outside the replicated state. "Class B" is the
    /// protocol's term for unreplicated fire-and-forget data.
    ClassBInstant(InstantEvent),
}

/// An observer's request to the simulation.
///
/// Intents are requests, not commands: the server validates each against the
/// live simulation and drops the ones that no longer apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Intent {
    /// Order an entity to move to a map position.
    #[serde(rename_all = "camelCase")]
    Move {
        /// The entity to move.
        entity_id: EntityId,
        /// Destination in world coordinates.
        #[serde(with = "crate::codec::vec2_xy")]
        target: Vec2,
    },
    /// Spawn an entity of a kind at a position.
    #[serde(rename_all = "camelCase")]
    Spawn {
        /// The kind to compose.
        kind: EntityKind,
        /// Spawn position.
        #[serde(with = "crate::codec::vec2_xy")]
        position: Vec2,
        /// Team index; defaults to unaligned.
        #[serde(default)]
        team: Option<i32>,
    },
    /// Grant an item to an entity's inventory.
    #[serde(rename_all = "camelCase")]
    AddItem {
        /// The receiving entity.
        entity_id: EntityId,
        /// The item kind.
        kind: ItemKind,
        /// Stack size; defaults to 1.
        #[serde(default)]
        quantity: Option<u32>,
    },
    /// Queue a production order on an entity's factory.
    #[serde(rename_all = "camelCase")]
    SubmitOrder {
        /// The producing entity.
        entity_id: EntityId,
        /// The kind to produce.
        kind: EntityKind,
    },
}

/// A frame sent from an observer to the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tag", content = "payload", rename_all = "camelCase")]
pub enum ClientFrame {
    /// A request to the simulation.
    Intent(Intent),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_delta_frame_wire_shape() {
        let frame = ServerFrame::DeltaState {
            actions: vec![Action::DeleteEntity {
                id: EntityId::from_raw(4),
            }],
        };
        let value = serde_json::to_value(&frame).unwrap();
        assert_eq!(
            value,
            json!({
                "tag": "deltaState",
                "payload": {"actions": [{"name": "deleteEntity", "id": 4}]}
            })
        );
    }

    #[test]
    fn test_full_state_frame_wraps_state_in_payload() {
        let frame = ServerFrame::FullState {
            state: WorldState::authoritative(),
        };
        let value = serde_json::to_value(&frame).unwrap();
        assert_eq!(value["tag"], "fullState");
        assert!(value["payload"]["state"].is_object());
    }

    #[test]
    fn test_instant_frame_wire_shape() {
        let frame = ServerFrame::ClassBInstant(InstantEvent {
            kind: InstantKind::AttackBulletLight,
            origin: Vec2::new(10.0, 20.0),
            velocity: Vec2::new(2000.0, 0.0),
            team: 1,
        });
        let value = serde_json::to_value(&frame).unwrap();
        assert_eq!(
            value,
            json!({
                "tag": "classBInstant",
                "payload": {
                    "kind": "ATTACK_BULLET_LIGHT",
                    "origin": {"x": 10.0, "y": 20.0},
                    "velocity": {"x": 2000.0, "y": 0.0},
                    "team": 1
                }
            })
        );
        let restored: ServerFrame = serde_json::from_value(value).unwrap();
        assert_eq!(frame, restored);
    }

    #[test]
    fn test_intent_wire_shape() {
        let frame = ClientFrame::Intent(Intent::Move {
            entity_id: EntityId::from_raw(3),
            target: Vec2::new(100.0, -50.0),
        });
        let value = serde_json::to_value(&frame).unwrap();
        assert_eq!(
            value,
            json!({
                "tag": "intent",
                "payload": {
                    "action": "move",
                    "entityId": 3,
                    "target": {"x": 100.0, "y": -50.0}
                }
            })
        );
    }

    #[test]
    fn test_intent_optional_fields_default() {
        let intent: Intent = serde_json::from_value(json!({
            "action": "spawn",
            "kind": "Pawn",
            "position": {"x": 0.0, "y": 0.0}
        }))
        .unwrap();
        assert!(matches!(intent, Intent::Spawn { team: None, .. }));
    }

    #[test]
    fn test_unknown_frame_fails_closed() {
        let result: Result<ClientFrame, _> =
            serde_json::from_value(json!({"tag": "shutdown", "payload": null}));
        assert!(result.is_err());
    }
}
