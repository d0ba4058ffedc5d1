//! Systems and the tick schedule.
//!
//! A [`System`] declares the component tags an entity must carry to be
//! eligible and is invoked once per eligible entity per tick. Expensive
//! systems implement [`System::on_tick_slow`] instead, which the driver runs
//! at a lower cadence (every Nth tick).
//!
//! Systems receive `&mut World` and may read or write any entity's
//! components — interactions such as combat reading an opponent's health
//! depend on this. The eligible set is collected before iteration, so a
//! system may spawn or despawn entities mid-pass; liveness is re-checked per
//! entity via lookup.

use tracing::trace;

use crate::component::Component;
use crate::entity::EntityId;
use crate::world::World;

/// Per-entity simulation logic.
///
/// `Ctx` is the shared per-tick context the game threads through every
/// system (authoritative state container, RNG, event sinks, spatial index).
pub trait System<C: Component, Ctx>: Send {
    /// Human-readable system name, used in logging.
    fn name(&self) -> &'static str;

    /// The component tags an entity must carry to be visited.
    fn dependencies(&self) -> &'static [C::Tag];

    /// Fast-path logic, run every tick for each eligible entity.
    fn on_tick(&mut self, _entity: EntityId, _world: &mut World<C>, _ctx: &mut Ctx) {}

    /// Slow-path logic, run every Nth tick for each eligible entity.
    fn on_tick_slow(&mut self, _entity: EntityId, _world: &mut World<C>, _ctx: &mut Ctx) {}
}

/// An ordered list of systems driven by the tick loop.
pub struct Schedule<C: Component, Ctx> {
    systems: Vec<Box<dyn System<C, Ctx>>>,
}

impl<C: Component, Ctx> Schedule<C, Ctx> {
    /// Creates an empty schedule.
    #[must_use]
    pub fn new() -> Self {
        Self {
            systems: Vec::new(),
        }
    }

    /// Adds a system to the end of the schedule.
    #[must_use]
    pub fn with_system(mut self, system: impl System<C, Ctx> + 'static) -> Self {
        self.systems.push(Box::new(system));
        self
    }

    /// Returns the number of registered systems.
    #[must_use]
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    /// Returns `true` if no systems are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Runs the fast path of every system over its eligible entities.
    pub fn tick(&mut self, world: &mut World<C>, ctx: &mut Ctx) {
        for system in &mut self.systems {
            let eligible = world.entities_with(system.dependencies());
            trace!(system = system.name(), count = eligible.len(), "tick");
            for id in eligible {
                // An earlier entity in this pass may have despawned this one.
                if world.contains(id) {
                    system.on_tick(id, world, ctx);
                }
            }
        }
    }

    /// Runs the slow path of every system over its eligible entities.
    pub fn tick_slow(&mut self, world: &mut World<C>, ctx: &mut Ctx) {
        for system in &mut self.systems {
            let eligible = world.entities_with(system.dependencies());
            trace!(system = system.name(), count = eligible.len(), "tick_slow");
            for id in eligible {
                if world.contains(id) {
                    system.on_tick_slow(id, world, ctx);
                }
            }
        }
    }
}

impl<C: Component, Ctx> Default for Schedule<C, Ctx> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentTag;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Tag {
        Counter,
        Marker,
    }
    impl ComponentTag for Tag {}

    enum Comp {
        Counter(u32),
        Marker,
    }
    impl Component for Comp {
        type Tag = Tag;
        fn tag(&self) -> Tag {
            match self {
                Comp::Counter(_) => Tag::Counter,
                Comp::Marker => Tag::Marker,
            }
        }
    }

    struct Increment;
    impl System<Comp, ()> for Increment {
        fn name(&self) -> &'static str {
            "increment"
        }
        fn dependencies(&self) -> &'static [Tag] {
            &[Tag::Counter]
        }
        fn on_tick(&mut self, entity: EntityId, world: &mut World<Comp>, _ctx: &mut ()) {
            if let Some(Comp::Counter(n)) = world.component_mut(entity, Tag::Counter) {
                *n += 1;
            }
        }
    }

    /// Despawns every marked entity it visits.
    struct Reaper;
    impl System<Comp, ()> for Reaper {
        fn name(&self) -> &'static str {
            "reaper"
        }
        fn dependencies(&self) -> &'static [Tag] {
            &[Tag::Marker]
        }
        fn on_tick(&mut self, entity: EntityId, world: &mut World<Comp>, _ctx: &mut ()) {
            world.despawn(entity);
        }
    }

    #[test]
    fn test_system_visits_only_eligible_entities() {
        let mut world: World<Comp> = World::new();
        let counted = world.spawn();
        world.attach(counted, Comp::Counter(0)).unwrap();
        let other = world.spawn();
        world.attach(other, Comp::Marker).unwrap();

        let mut schedule = Schedule::new().with_system(Increment);
        schedule.tick(&mut world, &mut ());
        schedule.tick(&mut world, &mut ());

        match world.component(counted, Tag::Counter) {
            Some(Comp::Counter(n)) => assert_eq!(*n, 2),
            _ => panic!("counter missing"),
        }
    }

    #[test]
    fn test_despawn_during_pass_is_safe() {
        let mut world: World<Comp> = World::new();
        for _ in 0..4 {
            let e = world.spawn();
            world.attach(e, Comp::Marker).unwrap();
        }

        let mut schedule = Schedule::new().with_system(Reaper);
        schedule.tick(&mut world, &mut ());
        assert!(world.is_empty());
    }

    #[test]
    fn test_slow_tick_default_is_noop() {
        let mut world: World<Comp> = World::new();
        let e = world.spawn();
        world.attach(e, Comp::Counter(0)).unwrap();

        let mut schedule = Schedule::new().with_system(Increment);
        schedule.tick_slow(&mut world, &mut ());

        match world.component(e, Tag::Counter) {
            Some(Comp::Counter(n)) => assert_eq!(*n, 0),
            _ => panic!("counter missing"),
        }
    }
}
