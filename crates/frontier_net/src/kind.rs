//! Closed catalogues of replicated object kinds.
//!
//! Kinds are part of the wire vocabulary: records carry them, and both sides
//! resolve them against static stat tables. Item and fixture kinds keep their
//! historical wire names for compatibility with existing observers.

use serde::{Deserialize, Serialize};

/// Kinds of simulated entities the server can create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Inert test target.
    Dummy,
    /// Mobile unit with senses, inventory, and combat.
    Pawn,
    /// Team base building with a production queue.
    #[serde(rename = "BUILDING_SETTLEMENT")]
    Settlement,
}

/// Kinds of freestanding items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Winchester 1906 .22 rifle.
    #[serde(rename = "WEAPON_WIN1906")]
    Win1906,
    /// .22 Short ammunition.
    #[serde(rename = "AMMO_22_SHORT")]
    Ammo22Short,
    /// Boonie hat.
    #[serde(rename = "BODY_HEAD_BOONIE")]
    BoonieHat,
}

/// Kinds of transient, non-authoritative visual events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstantKind {
    /// Light bullet trail emitted per ranged attack.
    #[serde(rename = "ATTACK_BULLET_LIGHT")]
    AttackBulletLight,
}

/// Kinds of static scenery fixtures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FixtureKind {
    /// Large ground patch.
    #[serde(rename = "PATCH_L_0")]
    PatchLarge,
    /// Small grass tuft.
    #[serde(rename = "GRASS_S_0")]
    GrassSmall,
}
