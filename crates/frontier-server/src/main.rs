use std::time::{Duration, Instant};

use clap::Parser;
use frontier_game::{worldgen, IntentQueue, ServerState};
use frontier_net::{EntityKind, ItemKind, Replicator};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

#[derive(Parser)]
#[command(name = "frontier-server", about = "Authoritative game simulation server")]
struct Args {
    /// Simulation tick rate in Hz
    #[arg(long, env = "FRONTIER_TICK_RATE", default_value_t = 5)]
    tick_rate: u32,

    /// Run the slow systems every Nth tick
    #[arg(long, env = "FRONTIER_SLOW_EVERY", default_value_t = 10)]
    slow_every: u64,

    /// World seed; random when omitted
    #[arg(long, env = "FRONTIER_SEED")]
    seed: Option<u64>,

    /// World display name
    #[arg(long, env = "FRONTIER_WORLD_NAME", default_value = "Pandora")]
    world_name: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, tick_rate = args.tick_rate, "starting server");

    let mut server = ServerState::new(seed);
    bootstrap(&mut server, &args, seed)?;

    let mut replicator = Replicator::new();
    let mut intents = IntentQueue::new();
    let budget = Duration::from_secs_f64(1.0 / f64::from(args.tick_rate.max(1)));
    let mut interval = tokio::time::interval(budget);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        interval.tick().await;
        let started = Instant::now();

        for intent in intents.drain() {
            server.apply_intent(intent);
        }
        server.tick();
        if server.ticks() % args.slow_every.max(1) == 0 {
            server.tick_slow();
        }
        replicator.replicate(server.state_mut())?;
        replicator.broadcast_instants(&server.drain_instants())?;

        let elapsed = started.elapsed();
        if elapsed > budget {
            warn!(?elapsed, ?budget, "tick overran its budget");
        }
        debug!(
            tick = server.ticks(),
            observers = replicator.observer_count(),
            "tick complete"
        );
    }
}

/// Seeds the map: teams, one settlement and two armed pawns per team, and
/// the generated scenery.
fn bootstrap(server: &mut ServerState, args: &Args, seed: u64) -> anyhow::Result<()> {
    server.state_mut().set_world_name(args.world_name.clone());
    server.state_mut().set_tick_rate(args.tick_rate);
    server
        .state_mut()
        .set_teams(vec!["Crimson".to_string(), "Cobalt".to_string()]);

    for (team, base) in [(0, Vec2::new(-200.0, 0.0)), (1, Vec2::new(200.0, 0.0))] {
        server.create_entity(EntityKind::Settlement, base, team)?;
        for offset in [Vec2::new(0.0, 60.0), Vec2::new(0.0, -60.0)] {
            let pawn = server.create_entity(EntityKind::Pawn, base + offset, team)?;
            for (kind, quantity) in [
                (ItemKind::Win1906, 1),
                (ItemKind::Ammo22Short, 20),
                (ItemKind::BoonieHat, 1),
            ] {
                server
                    .add_item(pawn, kind, quantity)
                    .ok_or_else(|| anyhow::anyhow!("pawn {pawn} has no inventory"))?;
            }
        }
    }

    let mut rng = StdRng::seed_from_u64(seed);
    worldgen::generate(server, &mut rng);
    info!(
        entities = server.world().len(),
        fixtures = server.state().fixtures().len(),
        "world bootstrapped"
    );
    Ok(())
}
