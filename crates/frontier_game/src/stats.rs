//! Static tuning tables.
//!
//! One entry per entity and item kind, resolved by exhaustive match so a new
//! kind without stats is a compile error. Values are game balance, not
//! systems contracts; systems read them, never hard-code them.

use frontier_net::{EntityKind, ItemKind};

/// Per-entity-kind tuning.
#[derive(Debug, Clone, Copy)]
pub struct EntityStats {
    /// Name shown in observer menus, e.g. factory order buttons.
    pub display_name: &'static str,
    /// Movement speed in world units per second.
    pub speed: f32,
    /// Time a factory needs to produce one, in seconds. Zero for kinds that
    /// are never produced.
    pub production_seconds: f64,
}

/// Per-weapon tuning.
#[derive(Debug, Clone, Copy)]
pub struct WeaponStats {
    pub display_name: &'static str,
    /// Barrel length in metres, fed into the muzzle-velocity interpolation.
    pub barrel_length: f32,
    /// Whether the weapon can fire while its wielder is moving.
    pub use_while_moving: bool,
    /// The ammunition kind this weapon consumes, if any.
    pub ammo: Option<ItemKind>,
}

/// Per-ammunition tuning.
#[derive(Debug, Clone, Copy)]
pub struct AmmoStats {
    pub display_name: &'static str,
    /// Projectile mass in kilograms.
    pub projectile_mass: f32,
    /// Muzzle velocity at the shortest supported barrel, m/s.
    pub velocity_min: f32,
    /// Muzzle velocity at the longest supported barrel, m/s.
    pub velocity_max: f32,
    /// Shortest barrel the round is specified for, metres.
    pub barrel_length_min: f32,
    /// Longest barrel the round is specified for, metres.
    pub barrel_length_max: f32,
}

/// Per-armor tuning.
#[derive(Debug, Clone, Copy)]
pub struct ArmorStats {
    pub display_name: &'static str,
    /// Fraction of melee damage absorbed.
    pub protection_melee: f32,
}

/// Stats carried by an item kind.
#[derive(Debug, Clone, Copy)]
pub enum ItemStats {
    Weapon(&'static WeaponStats),
    Ammo(&'static AmmoStats),
    Armor(&'static ArmorStats),
}

impl ItemStats {
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            ItemStats::Weapon(s) => s.display_name,
            ItemStats::Ammo(s) => s.display_name,
            ItemStats::Armor(s) => s.display_name,
        }
    }

    #[must_use]
    pub fn as_weapon(&self) -> Option<&'static WeaponStats> {
        match self {
            ItemStats::Weapon(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_ammo(&self) -> Option<&'static AmmoStats> {
        match self {
            ItemStats::Ammo(s) => Some(s),
            _ => None,
        }
    }
}

/// Unarmed fallback: zero-energy attacks, usable on the move, no ammunition.
pub static FISTS: WeaponStats = WeaponStats {
    display_name: "Fists",
    barrel_length: 0.0,
    use_while_moving: true,
    ammo: None,
};

static DUMMY: EntityStats = EntityStats {
    display_name: "Dummy",
    speed: 0.0,
    production_seconds: 0.0,
};

static PAWN: EntityStats = EntityStats {
    display_name: "Simple Pawn",
    speed: 50.0,
    production_seconds: 8.0,
};

static SETTLEMENT: EntityStats = EntityStats {
    display_name: "Settlement",
    speed: 0.0,
    production_seconds: 0.0,
};

static WIN1906: WeaponStats = WeaponStats {
    display_name: "Winchester 1906 .22",
    barrel_length: 0.508,
    use_while_moving: false,
    ammo: Some(ItemKind::Ammo22Short),
};

static AMMO_22_SHORT: AmmoStats = AmmoStats {
    display_name: ".22 Short",
    projectile_mass: 0.0019,
    velocity_min: 175.0,
    velocity_max: 400.0,
    barrel_length_min: 0.08,
    barrel_length_max: 0.62,
};

static BOONIE_HAT: ArmorStats = ArmorStats {
    display_name: "Boonie Hat",
    protection_melee: 0.01,
};

/// Looks up the tuning entry for an entity kind.
#[must_use]
pub fn entity_stats(kind: EntityKind) -> &'static EntityStats {
    match kind {
        EntityKind::Dummy => &DUMMY,
        EntityKind::Pawn => &PAWN,
        EntityKind::Settlement => &SETTLEMENT,
    }
}

/// Looks up the tuning entry for an item kind.
#[must_use]
pub fn item_stats(kind: ItemKind) -> ItemStats {
    match kind {
        ItemKind::Win1906 => ItemStats::Weapon(&WIN1906),
        ItemKind::Ammo22Short => ItemStats::Ammo(&AMMO_22_SHORT),
        ItemKind::BoonieHat => ItemStats::Armor(&BOONIE_HAT),
    }
}
