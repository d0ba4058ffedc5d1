//! Concrete simulation components.
//!
//! [`GameComponent`] is the closed component enum stored in the ECS world;
//! [`ComponentKind`] is its tag, so "at most one component of a kind per
//! entity" holds by construction. Components are data plus focused methods —
//! per-tick logic lives in the systems, and each component that observers
//! should see translates itself into a [`ComponentView`] projection.

use std::collections::VecDeque;

use frontier_ecs::{Component, ComponentTag, EntityId, World};
use frontier_net::{Ability, CombatStance, ComponentView, EntityKind, ItemId, OrderView};
use glam::Vec2;

use crate::ballistics::ENERGY_PER_HEALTH;
use crate::stats::entity_stats;

/// Axis distance to the move target below which an entity counts as arrived.
pub const MOVEMENT_DEAD_ZONE: f32 = 2.0;

/// Current and ordered map position.
#[derive(Debug, Clone, Copy)]
pub struct Position {
    pub position: Vec2,
    target: Vec2,
}

impl Position {
    #[must_use]
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            target: position,
        }
    }

    /// `true` while either axis is at least the dead zone away from the
    /// target. Inside the dead zone the entity holds position; the movement
    /// system writes nothing.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        (self.position.x - self.target.x).abs() >= MOVEMENT_DEAD_ZONE
            || (self.position.y - self.target.y).abs() >= MOVEMENT_DEAD_ZONE
    }

    #[must_use]
    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn set_target(&mut self, target: Vec2) {
        self.target = target;
    }

    #[must_use]
    pub fn view(&self) -> ComponentView {
        ComponentView::Position {
            position: self.position,
        }
    }
}

/// Display name and flavour text.
#[derive(Debug, Clone)]
pub struct Identity {
    pub display_name: String,
    pub description: String,
}

impl Identity {
    #[must_use]
    pub fn new(display_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            description: description.into(),
        }
    }

    #[must_use]
    pub fn view(&self) -> ComponentView {
        ComponentView::Identity {
            display_name: self.display_name.clone(),
            description: self.description.clone(),
        }
    }
}

/// Ability to move, and how fast.
#[derive(Debug, Clone, Copy)]
pub struct Movement {
    /// World units per second.
    pub speed: f32,
}

impl Movement {
    #[must_use]
    pub fn new(speed: f32) -> Self {
        Self { speed }
    }

    #[must_use]
    pub fn view(&self) -> ComponentView {
        ComponentView::Movement {
            abilities: vec![Ability::Move {
                text: "Move".to_string(),
            }],
        }
    }
}

/// Team membership, an index into the replicated roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Team {
    pub team: i32,
}

impl Team {
    #[must_use]
    pub fn new(team: i32) -> Self {
        Self { team }
    }

    #[must_use]
    pub fn view(&self) -> ComponentView {
        ComponentView::Team { team: self.team }
    }
}

/// Range-based perception. Not replicated.
#[derive(Debug, Clone, Copy)]
pub struct Senses {
    /// Perception radius in world units.
    pub range: f32,
}

impl Senses {
    #[must_use]
    pub fn new(range: f32) -> Self {
        Self { range }
    }
}

/// Item ids held by an entity. Item data itself lives in the replicated
/// container; the inventory only joins against it.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    item_ids: Vec<ItemId>,
}

impl Inventory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn items(&self) -> &[ItemId] {
        &self.item_ids
    }

    #[must_use]
    pub fn has(&self, id: ItemId) -> bool {
        self.item_ids.contains(&id)
    }

    /// Adds an item id; duplicates are ignored.
    pub fn add(&mut self, id: ItemId) {
        if !self.has(id) {
            self.item_ids.push(id);
        }
    }

    /// Removes an item id, reporting whether it was held.
    pub fn remove(&mut self, id: ItemId) -> bool {
        let before = self.item_ids.len();
        self.item_ids.retain(|held| *held != id);
        self.item_ids.len() != before
    }

    #[must_use]
    pub fn view(&self) -> ComponentView {
        ComponentView::Inventory {
            items: self.item_ids.clone(),
        }
    }
}

/// The weapon a combatant has settled on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeaponChoice {
    /// No usable weapon in the inventory; fall back to fists.
    Unarmed,
    /// A weapon item of this kind from the inventory.
    Weapon(frontier_net::ItemKind),
}

/// Combat posture and target.
///
/// The target is held as an id and re-resolved by lookup every tick; a
/// despawned target is noticed on the next tick and dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct Combat {
    target: Option<EntityId>,
    /// Cached weapon pick; `None` means unresolved, re-picked lazily and on
    /// each slow tick.
    weapon: Option<WeaponChoice>,
}

impl Combat {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn stance(&self) -> CombatStance {
        if self.target.is_some() {
            CombatStance::Engaged
        } else {
            CombatStance::Idle
        }
    }

    #[must_use]
    pub fn target(&self) -> Option<EntityId> {
        self.target
    }

    /// Locks onto a target, reporting whether the engagement took.
    ///
    /// Callers hand in the target's [`Health`] lookup; a target without one
    /// cannot be engaged, and re-engaging the current target is a no-op.
    pub fn engage(&mut self, target: EntityId, target_health: Option<Health>) -> bool {
        if self.target == Some(target) || target_health.is_none() {
            return false;
        }
        self.target = Some(target);
        true
    }

    pub fn disengage(&mut self) {
        self.target = None;
    }

    #[must_use]
    pub fn weapon(&self) -> Option<WeaponChoice> {
        self.weapon
    }

    pub fn set_weapon(&mut self, choice: WeaponChoice) {
        self.weapon = Some(choice);
    }

    /// Forgets the cached weapon so the next tick re-picks it.
    pub fn clear_weapon(&mut self) {
        self.weapon = None;
    }

    #[must_use]
    pub fn view(&self) -> ComponentView {
        ComponentView::Combat {
            state: self.stance(),
        }
    }
}

/// Remaining health. Entities start at full health; reaching zero is the
/// only way an entity leaves the simulation.
#[derive(Debug, Clone, Copy)]
pub struct Health {
    pub health: f32,
}

impl Default for Health {
    fn default() -> Self {
        Self { health: 1.0 }
    }
}

impl Health {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies impact energy and reports whether the entity died. The caller
    /// owns destruction; the component only keeps score.
    pub fn take_damage(&mut self, kinetic_energy: f32) -> bool {
        self.health -= kinetic_energy / ENERGY_PER_HEALTH;
        self.health <= 0.0
    }

    #[must_use]
    pub fn view(&self) -> ComponentView {
        ComponentView::Health {
            health: self.health,
        }
    }
}

/// Building footprint.
#[derive(Debug, Clone, Copy)]
pub struct Dimension {
    pub width: f32,
    pub height: f32,
}

impl Dimension {
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn view(&self) -> ComponentView {
        ComponentView::Dimension {
            width: self.width,
            height: self.height,
        }
    }
}

/// One queued production order.
#[derive(Debug, Clone, Copy)]
pub struct Order {
    pub kind: EntityKind,
    pub elapsed_seconds: f64,
}

/// FIFO production queue over a fixed set of producible kinds.
#[derive(Debug, Clone)]
pub struct Factory {
    orders: VecDeque<Order>,
    options: Vec<EntityKind>,
}

// Accumulated 1/tick_rate steps can land a hair under the exact total;
// completion compares with this slack.
const PRODUCTION_EPSILON: f64 = 1e-9;

impl Factory {
    #[must_use]
    pub fn new(options: Vec<EntityKind>) -> Self {
        Self {
            orders: VecDeque::new(),
            options,
        }
    }

    /// Queues an order, reporting whether the kind is producible here.
    pub fn submit(&mut self, kind: EntityKind) -> bool {
        if !self.options.contains(&kind) {
            return false;
        }
        self.orders.push_back(Order {
            kind,
            elapsed_seconds: 0.0,
        });
        true
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    #[must_use]
    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
    }

    /// Advances the head order by `dt_seconds`. Returns the produced kind
    /// when the order completes, popping it from the queue.
    pub fn advance_head(&mut self, dt_seconds: f64) -> Option<EntityKind> {
        let head = self.orders.front_mut()?;
        head.elapsed_seconds += dt_seconds;
        let production_seconds = entity_stats(head.kind).production_seconds;
        if head.elapsed_seconds + PRODUCTION_EPSILON >= production_seconds {
            self.orders.pop_front().map(|order| order.kind)
        } else {
            None
        }
    }

    #[must_use]
    pub fn view(&self) -> ComponentView {
        ComponentView::Factory {
            orders: self
                .orders
                .iter()
                .map(|order| OrderView {
                    kind: order.kind,
                    percent: (order.elapsed_seconds
                        / entity_stats(order.kind).production_seconds)
                        .min(1.0) as f32,
                })
                .collect(),
            abilities: self
                .options
                .iter()
                .map(|kind| Ability::SubmitOrder {
                    text: format!("Order {}", entity_stats(*kind).display_name),
                    kind: *kind,
                })
                .collect(),
        }
    }
}

/// Tags of the closed component set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Position,
    Identity,
    Movement,
    Team,
    Senses,
    Inventory,
    Combat,
    Health,
    Dimension,
    Factory,
}

impl ComponentTag for ComponentKind {}

/// The closed component enum stored in the ECS world.
#[derive(Debug, Clone)]
pub enum GameComponent {
    Position(Position),
    Identity(Identity),
    Movement(Movement),
    Team(Team),
    Senses(Senses),
    Inventory(Inventory),
    Combat(Combat),
    Health(Health),
    Dimension(Dimension),
    Factory(Factory),
}

impl Component for GameComponent {
    type Tag = ComponentKind;

    fn tag(&self) -> ComponentKind {
        match self {
            GameComponent::Position(_) => ComponentKind::Position,
            GameComponent::Identity(_) => ComponentKind::Identity,
            GameComponent::Movement(_) => ComponentKind::Movement,
            GameComponent::Team(_) => ComponentKind::Team,
            GameComponent::Senses(_) => ComponentKind::Senses,
            GameComponent::Inventory(_) => ComponentKind::Inventory,
            GameComponent::Combat(_) => ComponentKind::Combat,
            GameComponent::Health(_) => ComponentKind::Health,
            GameComponent::Dimension(_) => ComponentKind::Dimension,
            GameComponent::Factory(_) => ComponentKind::Factory,
        }
    }
}

impl GameComponent {
    /// The projection this component publishes to observers, if any.
    /// Perception is server-internal and publishes nothing.
    #[must_use]
    pub fn view(&self) -> Option<ComponentView> {
        match self {
            GameComponent::Position(c) => Some(c.view()),
            GameComponent::Identity(c) => Some(c.view()),
            GameComponent::Movement(c) => Some(c.view()),
            GameComponent::Team(c) => Some(c.view()),
            GameComponent::Senses(_) => None,
            GameComponent::Inventory(c) => Some(c.view()),
            GameComponent::Combat(c) => Some(c.view()),
            GameComponent::Health(c) => Some(c.view()),
            GameComponent::Dimension(c) => Some(c.view()),
            GameComponent::Factory(c) => Some(c.view()),
        }
    }
}

macro_rules! component_accessors {
    ($( $get:ident, $get_mut:ident: $kind:ident => $ty:ty; )*) => {
        /// Typed component lookups on `World<GameComponent>`.
        pub trait ComponentAccess {
            $(
                fn $get(&self, id: EntityId) -> Option<&$ty>;
                fn $get_mut(&mut self, id: EntityId) -> Option<&mut $ty>;
            )*
        }

        impl ComponentAccess for World<GameComponent> {
            $(
                fn $get(&self, id: EntityId) -> Option<&$ty> {
                    match self.component(id, ComponentKind::$kind) {
                        Some(GameComponent::$kind(c)) => Some(c),
                        _ => None,
                    }
                }

                fn $get_mut(&mut self, id: EntityId) -> Option<&mut $ty> {
                    match self.component_mut(id, ComponentKind::$kind) {
                        Some(GameComponent::$kind(c)) => Some(c),
                        _ => None,
                    }
                }
            )*
        }
    };
}

component_accessors! {
    position, position_mut: Position => Position;
    identity, identity_mut: Identity => Identity;
    movement, movement_mut: Movement => Movement;
    team, team_mut: Team => Team;
    senses, senses_mut: Senses => Senses;
    inventory, inventory_mut: Inventory => Inventory;
    combat, combat_mut: Combat => Combat;
    health, health_mut: Health => Health;
    dimension, dimension_mut: Dimension => Dimension;
    factory, factory_mut: Factory => Factory;
}
