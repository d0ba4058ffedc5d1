//! Named component projections.
//!
//! A [`ComponentView`] is the serializable projection a simulation component
//! publishes into the state container — the only shape of component data an
//! observer ever sees. The enum is closed and internally tagged by `__type`,
//! so a projection with a missing or unknown tag fails decoding.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::id::ItemId;
use crate::kind::EntityKind;

/// Combat posture, replicated for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatStance {
    /// Not engaging anyone.
    Idle,
    /// Locked onto a target.
    Engaged,
}

/// An action an observer may request on an entity.
///
/// A closed catalogue rather than method-name strings: observers render the
/// text, the server resolves the variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "camelCase")]
pub enum Ability {
    /// Order the entity to move to a map position.
    Move {
        /// Menu label.
        text: String,
    },
    /// Queue a production order on the entity's factory.
    SubmitOrder {
        /// Menu label.
        text: String,
        /// The entity kind to produce.
        kind: EntityKind,
    },
}

/// A production order as observers see it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderView {
    /// The kind being produced.
    pub kind: EntityKind,
    /// Fraction of the production time elapsed, 0..1.
    pub percent: f32,
}

/// The serializable projection of one simulation component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "__type")]
pub enum ComponentView {
    /// Current map position.
    Position {
        /// World coordinates.
        #[serde(with = "crate::codec::vec2_xy")]
        position: Vec2,
    },
    /// Display name and flavour text.
    Identity {
        /// Short display name.
        display_name: String,
        /// Longer description.
        description: String,
    },
    /// Advertises that the entity can be ordered to move.
    Movement {
        /// Abilities contributed by this component.
        abilities: Vec<Ability>,
    },
    /// Team membership.
    Team {
        /// Team index into the roster.
        team: i32,
    },
    /// Item ids held by the entity.
    Inventory {
        /// Held item ids, in acquisition order.
        items: Vec<ItemId>,
    },
    /// Combat posture.
    Combat {
        /// Idle or engaged.
        state: CombatStance,
    },
    /// Remaining health, 0..1.
    Health {
        /// Current health value.
        health: f32,
    },
    /// Footprint of a building.
    Dimension {
        /// Width in world units.
        width: f32,
        /// Height in world units.
        height: f32,
    },
    /// Production queue state.
    Factory {
        /// Pending orders with completion fractions.
        orders: Vec<OrderView>,
        /// Order abilities, one per producible kind.
        abilities: Vec<Ability>,
    },
}

impl ComponentView {
    /// The name keying this projection in an entity record's component map.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            ComponentView::Position { .. } => "Position",
            ComponentView::Identity { .. } => "Identity",
            ComponentView::Movement { .. } => "Movement",
            ComponentView::Team { .. } => "Team",
            ComponentView::Inventory { .. } => "Inventory",
            ComponentView::Combat { .. } => "Combat",
            ComponentView::Health { .. } => "Health",
            ComponentView::Dimension { .. } => "Dimension",
            ComponentView::Factory { .. } => "Factory",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_view_carries_type_tag() {
        let view = ComponentView::Health { health: 0.5 };
        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value, json!({"__type": "Health", "health": 0.5}));
    }

    #[test]
    fn test_position_view_serializes_coordinates_as_object() {
        let view = ComponentView::Position {
            position: Vec2::new(1.5, -2.0),
        };
        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(
            value,
            json!({"__type": "Position", "position": {"x": 1.5, "y": -2.0}})
        );
    }

    #[test]
    fn test_view_without_tag_is_rejected() {
        let result: Result<ComponentView, _> = serde_json::from_value(json!({"health": 0.5}));
        assert!(result.is_err());
    }

    #[test]
    fn test_ability_roundtrip() {
        let ability = Ability::SubmitOrder {
            text: "Order Simple Pawn".to_string(),
            kind: EntityKind::Pawn,
        };
        let json = serde_json::to_string(&ability).unwrap();
        let restored: Ability = serde_json::from_str(&json).unwrap();
        assert_eq!(ability, restored);
    }
}
