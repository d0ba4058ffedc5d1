//! The replicated state container.
//!
//! [`WorldState`] is the single source of truth for everything remote
//! observers see: world metadata, entity records with their component
//! projections, freestanding items, scenery fixtures, the tick rate, and the
//! team roster. It is mutated exclusively through its declared mutation
//! methods so that every mutation is captured as an [`Action`].
//!
//! One type serves both ends of the wire. The authoritative container records
//! each mutation into a pending log that the replication driver drains once
//! per tick; a mirror never records, it only replays actions it receives —
//! the mutation body is identical in both roles, only the single append in
//! [`WorldState::submit`] is role-gated.

use frontier_ecs::EntityId;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::action::Action;
use crate::codec;
use crate::error::NetError;
use crate::id::{FixtureId, ItemId};
use crate::kind::{EntityKind, FixtureKind, ItemKind};
use crate::tagged::{
    EntityRecordTag, FixtureRecordTag, ItemRecordTag, TaggedMap, WorldStateTag,
};
use crate::view::ComponentView;

/// Which end of the replication stream a container serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The writer: applies mutations locally and records them for observers.
    Authoritative,
    /// A reader: applies only replayed actions, never records.
    Mirror,
}

impl Default for Role {
    /// Deserialized snapshots come up as mirrors.
    fn default() -> Self {
        Role::Mirror
    }
}

/// Replicated record of one simulated entity.
///
/// This is a projection written by ECS components — not the ECS entity
/// itself, which never leaves the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    #[serde(rename = "__type")]
    tag: EntityRecordTag,
    /// The kind the entity was composed as.
    pub kind: EntityKind,
    /// Named component projections, keyed by component name.
    pub components: TaggedMap<String, ComponentView>,
}

impl EntityRecord {
    /// Creates an empty record of the given kind.
    #[must_use]
    pub fn new(kind: EntityKind) -> Self {
        Self {
            tag: EntityRecordTag::default(),
            kind,
            components: TaggedMap::new(),
        }
    }
}

/// Replicated record of a freestanding item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    #[serde(rename = "__type")]
    tag: ItemRecordTag,
    /// The item kind.
    pub kind: ItemKind,
    /// Stack size.
    pub quantity: u32,
}

impl ItemRecord {
    /// Creates an item record.
    #[must_use]
    pub fn new(kind: ItemKind, quantity: u32) -> Self {
        Self {
            tag: ItemRecordTag::default(),
            kind,
            quantity,
        }
    }
}

/// Replicated record of a static scenery fixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureRecord {
    #[serde(rename = "__type")]
    tag: FixtureRecordTag,
    /// The fixture kind.
    pub kind: FixtureKind,
    /// World position.
    #[serde(with = "crate::codec::vec2_xy")]
    pub position: Vec2,
    /// Rotation in radians.
    pub rotation: f32,
    /// Uniform scale.
    pub scale: f32,
}

impl FixtureRecord {
    /// Creates a fixture record.
    #[must_use]
    pub fn new(kind: FixtureKind, position: Vec2, rotation: f32, scale: f32) -> Self {
        Self {
            tag: FixtureRecordTag::default(),
            kind,
            position,
            rotation,
            scale,
        }
    }
}

/// The replicated state container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldState {
    #[serde(rename = "__type")]
    tag: WorldStateTag,
    #[serde(skip)]
    role: Role,
    #[serde(skip)]
    pending: Vec<Action>,
    world_name: String,
    tick_rate: u32,
    teams: Vec<String>,
    entities: TaggedMap<EntityId, EntityRecord>,
    items: TaggedMap<ItemId, ItemRecord>,
    fixtures: TaggedMap<FixtureId, FixtureRecord>,
}

impl WorldState {
    /// Default world display name until the server sets one.
    pub const DEFAULT_WORLD_NAME: &'static str = "Pandora";

    /// Default tick rate in Hz.
    pub const DEFAULT_TICK_RATE: u32 = 5;

    fn with_role(role: Role) -> Self {
        Self {
            tag: WorldStateTag::default(),
            role,
            pending: Vec::new(),
            world_name: Self::DEFAULT_WORLD_NAME.to_string(),
            tick_rate: Self::DEFAULT_TICK_RATE,
            teams: Vec::new(),
            entities: TaggedMap::new(),
            items: TaggedMap::new(),
            fixtures: TaggedMap::new(),
        }
    }

    /// Creates the writer container. One per process, tick-loop owned.
    #[must_use]
    pub fn authoritative() -> Self {
        Self::with_role(Role::Authoritative)
    }

    /// Creates an empty mirror container.
    #[must_use]
    pub fn mirror() -> Self {
        Self::with_role(Role::Mirror)
    }

    /// The container's role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    // ── Mutation methods ────────────────────────────────────────────────────
    //
    // Each builds the corresponding Action and routes it through `submit`,
    // so recording cannot drift from application.

    /// Registers an entity record.
    pub fn create_entity(&mut self, id: EntityId, kind: EntityKind) {
        self.submit(Action::CreateEntity { id, kind });
    }

    /// Removes an entity record.
    pub fn delete_entity(&mut self, id: EntityId) {
        self.submit(Action::DeleteEntity { id });
    }

    /// Overwrites one named component projection on an entity.
    pub fn set_component(&mut self, id: EntityId, view: ComponentView) {
        self.submit(Action::SetComponent { id, view });
    }

    /// Registers an item record.
    pub fn create_item(&mut self, id: ItemId, kind: ItemKind, quantity: u32) {
        self.submit(Action::CreateItem { id, kind, quantity });
    }

    /// Overwrites an item's stack size.
    pub fn set_item_quantity(&mut self, id: ItemId, quantity: u32) {
        self.submit(Action::SetItemQuantity { id, quantity });
    }

    /// Removes an item record.
    pub fn delete_item(&mut self, id: ItemId) {
        self.submit(Action::DeleteItem { id });
    }

    /// Registers a scenery fixture.
    pub fn create_fixture(
        &mut self,
        id: FixtureId,
        kind: FixtureKind,
        position: Vec2,
        rotation: f32,
        scale: f32,
    ) {
        self.submit(Action::CreateFixture {
            id,
            kind,
            position,
            rotation,
            scale,
        });
    }

    /// Removes a scenery fixture.
    pub fn delete_fixture(&mut self, id: FixtureId) {
        self.submit(Action::DeleteFixture { id });
    }

    /// Sets the world's display name.
    pub fn set_world_name(&mut self, name: impl Into<String>) {
        self.submit(Action::SetWorldName {
            world_name: name.into(),
        });
    }

    /// Sets the simulation tick rate in Hz.
    pub fn set_tick_rate(&mut self, ticks_per_second: u32) {
        self.submit(Action::SetTickRate { ticks_per_second });
    }

    /// Replaces the team roster.
    pub fn set_teams(&mut self, teams: Vec<String>) {
        self.submit(Action::SetTeams { teams });
    }

    // ── Log plumbing ────────────────────────────────────────────────────────

    /// Applies a mutation and, on the authoritative side, records it.
    ///
    /// This is the single point where role matters.
    pub fn submit(&mut self, action: Action) {
        self.apply(&action);
        if self.role == Role::Authoritative {
            self.pending.push(action);
        }
    }

    /// Replays a received action on a mirror without re-recording it, so a
    /// relaying mirror cannot amplify the log.
    pub fn apply_remote(&mut self, action: &Action) {
        self.apply(action);
    }

    /// Returns and clears the pending action log.
    ///
    /// The replication driver calls this exactly once per tick, after all
    /// mutations for the tick have been applied, so every observer sees one
    /// consistent ordered batch.
    pub fn drain_actions(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.pending)
    }

    /// Number of recorded, not yet drained actions.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    fn apply(&mut self, action: &Action) {
        match action {
            Action::CreateEntity { id, kind } => {
                self.entities.insert(*id, EntityRecord::new(*kind));
            }
            Action::DeleteEntity { id } => {
                self.entities.remove(id);
            }
            Action::SetComponent { id, view } => match self.entities.get_mut(id) {
                Some(record) => {
                    record
                        .components
                        .insert(view.name().to_string(), view.clone());
                }
                // Expected under replication races; tolerated for idempotence.
                None => warn!(%id, component = view.name(), "setComponent on missing entity"),
            },
            Action::CreateItem { id, kind, quantity } => {
                self.items.insert(*id, ItemRecord::new(*kind, *quantity));
            }
            Action::SetItemQuantity { id, quantity } => match self.items.get_mut(id) {
                Some(record) => record.quantity = *quantity,
                None => warn!(%id, "setItemQuantity on missing item"),
            },
            Action::DeleteItem { id } => {
                self.items.remove(id);
            }
            Action::CreateFixture {
                id,
                kind,
                position,
                rotation,
                scale,
            } => {
                self.fixtures
                    .insert(*id, FixtureRecord::new(*kind, *position, *rotation, *scale));
            }
            Action::DeleteFixture { id } => {
                self.fixtures.remove(id);
            }
            Action::SetWorldName { world_name } => {
                self.world_name = world_name.clone();
            }
            Action::SetTickRate { ticks_per_second } => {
                self.tick_rate = *ticks_per_second;
            }
            Action::SetTeams { teams } => {
                self.teams = teams.clone();
            }
        }
    }

    // ── Snapshots ───────────────────────────────────────────────────────────

    /// Serializes the entire container for a first-connect snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`NetError::Encode`] if serialisation fails.
    pub fn snapshot(&self) -> Result<String, NetError> {
        codec::encode(self)
    }

    /// Restores a container from a snapshot. The result is a mirror.
    ///
    /// # Errors
    ///
    /// Returns [`NetError::Decode`] if the payload is malformed or missing a
    /// type tag.
    pub fn from_snapshot(json: &str) -> Result<Self, NetError> {
        codec::decode(json)
    }

    // ── Read access ─────────────────────────────────────────────────────────

    /// The world's display name.
    #[must_use]
    pub fn world_name(&self) -> &str {
        &self.world_name
    }

    /// The tick rate in Hz.
    #[must_use]
    pub fn tick_rate(&self) -> u32 {
        self.tick_rate
    }

    /// The team roster.
    #[must_use]
    pub fn teams(&self) -> &[String] {
        &self.teams
    }

    /// Looks up an entity record.
    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<&EntityRecord> {
        self.entities.get(&id)
    }

    /// All entity records.
    #[must_use]
    pub fn entities(&self) -> &TaggedMap<EntityId, EntityRecord> {
        &self.entities
    }

    /// Looks up an item record.
    #[must_use]
    pub fn item(&self, id: ItemId) -> Option<&ItemRecord> {
        self.items.get(&id)
    }

    /// All item records.
    #[must_use]
    pub fn items(&self) -> &TaggedMap<ItemId, ItemRecord> {
        &self.items
    }

    /// Looks up a fixture record.
    #[must_use]
    pub fn fixture(&self, id: FixtureId) -> Option<&FixtureRecord> {
        self.fixtures.get(&id)
    }

    /// All fixture records.
    #[must_use]
    pub fn fixtures(&self) -> &TaggedMap<FixtureId, FixtureRecord> {
        &self.fixtures
    }
}

/// Replicated-state equality: two containers are equal when an observer
/// cannot tell them apart. Role and the pending log are not compared.
impl PartialEq for WorldState {
    fn eq(&self, other: &Self) -> bool {
        self.world_name == other.world_name
            && self.tick_rate == other.tick_rate
            && self.teams == other.teams
            && self.entities == other.entities
            && self.items == other.items
            && self.fixtures == other.fixtures
    }
}
