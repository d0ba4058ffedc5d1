//! Server-side orchestration.
//!
//! [`ServerState`] owns the ECS world, the system schedule, and the shared
//! per-tick [`GameContext`] (authoritative container, RNG, instant sink,
//! spatial index). All inbound intents and all simulation ticks funnel
//! through it, so the container only ever has one writer.

use frontier_ecs::{EcsError, EntityId, Schedule, World};
use frontier_net::{
    EntityKind, FixtureId, FixtureKind, InstantEvent, Intent, ItemId, ItemKind, WorldState,
};
use frontier_spatial::{Aabb, QuadTree};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::components::{ComponentAccess, ComponentKind, GameComponent};
use crate::library;
use crate::systems::{CombatSystem, MovementSystem, ProductionSystem, ReactionSystem};

/// Half extent of the playable square, world units.
pub const WORLD_HALF_EXTENT: f32 = 5000.0;

/// The region covered by the spatial index.
#[must_use]
pub fn world_bounds() -> Aabb {
    Aabb::new(Vec2::ZERO, WORLD_HALF_EXTENT)
}

/// Shared mutable context threaded through every system.
pub struct GameContext {
    /// The authoritative replicated container.
    pub state: WorldState,
    /// Transient events produced this tick, drained by the replication driver.
    pub instants: Vec<InstantEvent>,
    /// Seeded RNG; the only source of randomness in the simulation.
    pub rng: StdRng,
    /// Position index, rebuilt before each slow tick.
    pub spatial: QuadTree<EntityId, ()>,
    next_item_id: u64,
    next_fixture_id: u64,
}

impl GameContext {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            state: WorldState::authoritative(),
            instants: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
            spatial: QuadTree::new(world_bounds()),
            next_item_id: 1,
            next_fixture_id: 1,
        }
    }

    /// Hands out a fresh item record id.
    pub fn allocate_item_id(&mut self) -> ItemId {
        let id = ItemId(self.next_item_id);
        self.next_item_id += 1;
        id
    }

    /// Hands out a fresh fixture record id.
    pub fn allocate_fixture_id(&mut self) -> FixtureId {
        let id = FixtureId(self.next_fixture_id);
        self.next_fixture_id += 1;
        id
    }

    /// Rebuilds the spatial index from every positioned entity.
    pub fn rebuild_spatial(&mut self, world: &World<GameComponent>) {
        self.spatial = QuadTree::new(world_bounds());
        for id in world.entities_with(&[ComponentKind::Position]) {
            if let Some(position) = world.position(id) {
                self.spatial.insert(position.position, id, ());
            }
        }
    }
}

/// Composes an entity, registers its record, and mirrors every component
/// projection into the container.
///
/// # Errors
///
/// Returns an [`EcsError`] if the recipe is broken.
pub(crate) fn spawn_entity(
    world: &mut World<GameComponent>,
    ctx: &mut GameContext,
    kind: EntityKind,
    position: Vec2,
    team: i32,
) -> Result<EntityId, EcsError> {
    let id = library::compose(world, kind, position, team)?;
    ctx.state.create_entity(id, kind);
    for component in world.components(id) {
        if let Some(view) = component.view() {
            ctx.state.set_component(id, view);
        }
    }
    Ok(id)
}

/// The authoritative simulation.
pub struct ServerState {
    world: World<GameComponent>,
    schedule: Schedule<GameComponent, GameContext>,
    ctx: GameContext,
    ticks: u64,
}

impl ServerState {
    /// Creates a simulation with the full system schedule and a seeded RNG.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        info!(seed, "creating server state");
        Self {
            world: World::new(),
            schedule: Schedule::new()
                .with_system(MovementSystem)
                .with_system(ReactionSystem)
                .with_system(CombatSystem::default())
                .with_system(ProductionSystem),
            ctx: GameContext::new(seed),
            ticks: 0,
        }
    }

    /// Runs one fast tick over all systems.
    pub fn tick(&mut self) {
        self.ticks += 1;
        self.schedule.tick(&mut self.world, &mut self.ctx);
    }

    /// Rebuilds the spatial index and runs one slow tick over all systems.
    pub fn tick_slow(&mut self) {
        self.ctx.rebuild_spatial(&self.world);
        self.schedule.tick_slow(&mut self.world, &mut self.ctx);
    }

    /// Number of fast ticks run so far.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Spawns a composed entity and replicates it.
    ///
    /// # Errors
    ///
    /// Returns an [`EcsError`] if the recipe is broken.
    pub fn create_entity(
        &mut self,
        kind: EntityKind,
        position: Vec2,
        team: i32,
    ) -> Result<EntityId, EcsError> {
        spawn_entity(&mut self.world, &mut self.ctx, kind, position, team)
    }

    /// Removes an entity from the simulation and the container.
    pub fn delete_entity(&mut self, id: EntityId) -> bool {
        let existed = self.world.despawn(id);
        self.ctx.state.delete_entity(id);
        existed
    }

    /// Orders an entity to move; a no-op for entities without a position.
    pub fn set_move_target(&mut self, id: EntityId, target: Vec2) {
        match self.world.position_mut(id) {
            Some(position) => position.set_target(target),
            None => debug!(%id, "move order for unpositioned entity"),
        }
    }

    /// Creates an item record and places it in an entity's inventory.
    ///
    /// Returns the item id, or `None` if the entity has no inventory.
    pub fn add_item(&mut self, entity: EntityId, kind: ItemKind, quantity: u32) -> Option<ItemId> {
        if self.world.inventory(entity).is_none() {
            warn!(%entity, ?kind, "item grant to entity without inventory");
            return None;
        }
        let id = self.ctx.allocate_item_id();
        self.ctx.state.create_item(id, kind, quantity);
        let view = {
            let inventory = self.world.inventory_mut(entity)?;
            inventory.add(id);
            inventory.view()
        };
        self.ctx.state.set_component(entity, view);
        Some(id)
    }

    /// Queues a production order on an entity's factory.
    pub fn submit_order(&mut self, entity: EntityId, kind: EntityKind) {
        let Some(factory) = self.world.factory_mut(entity) else {
            debug!(%entity, ?kind, "order for entity without factory");
            return;
        };
        if !factory.submit(kind) {
            warn!(%entity, ?kind, "order for kind the factory cannot produce");
            return;
        }
        let view = factory.view();
        self.ctx.state.set_component(entity, view);
    }

    /// Registers a scenery fixture.
    pub fn create_fixture(
        &mut self,
        kind: FixtureKind,
        position: Vec2,
        rotation: f32,
        scale: f32,
    ) -> FixtureId {
        let id = self.ctx.allocate_fixture_id();
        self.ctx
            .state
            .create_fixture(id, kind, position, rotation, scale);
        id
    }

    /// Applies one observer intent. Intents are requests: anything that no
    /// longer applies is dropped with a log line, never an error.
    pub fn apply_intent(&mut self, intent: Intent) {
        match intent {
            Intent::Move { entity_id, target } => self.set_move_target(entity_id, target),
            Intent::Spawn {
                kind,
                position,
                team,
            } => {
                if let Err(error) = self.create_entity(kind, position, team.unwrap_or(-1)) {
                    warn!(%error, ?kind, "spawn intent rejected");
                }
            }
            Intent::AddItem {
                entity_id,
                kind,
                quantity,
            } => {
                let _ = self.add_item(entity_id, kind, quantity.unwrap_or(1));
            }
            Intent::SubmitOrder { entity_id, kind } => self.submit_order(entity_id, kind),
        }
    }

    /// Hands this tick's transient events to the replication driver.
    pub fn drain_instants(&mut self) -> Vec<InstantEvent> {
        std::mem::take(&mut self.ctx.instants)
    }

    #[must_use]
    pub fn world(&self) -> &World<GameComponent> {
        &self.world
    }

    #[must_use]
    pub fn world_mut(&mut self) -> &mut World<GameComponent> {
        &mut self.world
    }

    #[must_use]
    pub fn state(&self) -> &WorldState {
        &self.ctx.state
    }

    /// Mutable access to the container, for metadata writes and the
    /// replication drain.
    #[must_use]
    pub fn state_mut(&mut self) -> &mut WorldState {
        &mut self.ctx.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frontier_net::ComponentView;

    #[test]
    fn test_spawn_mirrors_every_projection() {
        let mut server = ServerState::new(1);
        let id = server
            .create_entity(EntityKind::Pawn, Vec2::new(3.0, 4.0), 1)
            .unwrap();

        let record = server.state().entity(id).unwrap();
        assert_eq!(record.kind, EntityKind::Pawn);
        for name in [
            "Position",
            "Identity",
            "Movement",
            "Team",
            "Inventory",
            "Combat",
            "Health",
        ] {
            assert!(record.components.contains_key(name), "missing {name}");
        }
        // Perception is server-internal.
        assert!(!record.components.contains_key("Senses"));
        match record.components.get("Position") {
            Some(ComponentView::Position { position }) => {
                assert_eq!(*position, Vec2::new(3.0, 4.0));
            }
            other => panic!("unexpected position projection {other:?}"),
        }
    }

    #[test]
    fn test_delete_removes_both_sides() {
        let mut server = ServerState::new(1);
        let id = server
            .create_entity(EntityKind::Dummy, Vec2::ZERO, 0)
            .unwrap();
        assert!(server.delete_entity(id));
        assert!(!server.world().contains(id));
        assert!(server.state().entity(id).is_none());
        assert!(!server.delete_entity(id));
    }

    #[test]
    fn test_add_item_requires_inventory() {
        let mut server = ServerState::new(1);
        let pawn = server
            .create_entity(EntityKind::Pawn, Vec2::ZERO, 0)
            .unwrap();
        let dummy = server
            .create_entity(EntityKind::Dummy, Vec2::ZERO, 0)
            .unwrap();

        let item = server.add_item(pawn, ItemKind::Win1906, 1).unwrap();
        assert_eq!(
            server.state().item(item).map(|r| r.kind),
            Some(ItemKind::Win1906)
        );
        assert!(server.add_item(dummy, ItemKind::Win1906, 1).is_none());
    }

    #[test]
    fn test_intents_are_presence_validated() {
        let mut server = ServerState::new(1);
        // None of these targets exist; all must be dropped quietly.
        server.apply_intent(Intent::Move {
            entity_id: EntityId::from_raw(99),
            target: Vec2::ONE,
        });
        server.apply_intent(Intent::SubmitOrder {
            entity_id: EntityId::from_raw(99),
            kind: EntityKind::Pawn,
        });
        server.apply_intent(Intent::AddItem {
            entity_id: EntityId::from_raw(99),
            kind: ItemKind::BoonieHat,
            quantity: None,
        });
        assert!(server.world().is_empty());
    }

    #[test]
    fn test_submit_order_mirrors_accepted_orders_only() {
        let mut server = ServerState::new(1);
        let settlement = server
            .create_entity(EntityKind::Settlement, Vec2::ZERO, 0)
            .unwrap();

        let queued = |server: &ServerState| {
            match server
                .state()
                .entity(settlement)
                .unwrap()
                .components
                .get("Factory")
            {
                Some(ComponentView::Factory { orders, .. }) => orders.len(),
                other => panic!("unexpected factory projection {other:?}"),
            }
        };

        server.submit_order(settlement, EntityKind::Pawn);
        assert_eq!(queued(&server), 1);
        // A settlement cannot produce another settlement.
        server.submit_order(settlement, EntityKind::Settlement);
        assert_eq!(queued(&server), 1);
    }

    #[test]
    fn test_spawn_intent_creates_entity() {
        let mut server = ServerState::new(1);
        server.apply_intent(Intent::Spawn {
            kind: EntityKind::Pawn,
            position: Vec2::new(10.0, 10.0),
            team: Some(1),
        });
        assert_eq!(server.world().len(), 1);
    }
}
