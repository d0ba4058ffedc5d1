//! Writer-to-observer replication over the full stack.

use frontier_game::ServerState;
use frontier_net::{
    decode, EntityKind, InstantEvent, ItemKind, Replicator, ServerFrame, WorldState,
};
use glam::Vec2;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

/// Replays every received frame into a mirror, the way a client would.
fn replay(rx: &mut UnboundedReceiver<String>, mirror: &mut WorldState) -> Vec<InstantEvent> {
    let mut instants = Vec::new();
    while let Ok(json) = rx.try_recv() {
        match decode::<ServerFrame>(&json).unwrap() {
            ServerFrame::FullState { state } => *mirror = state,
            ServerFrame::DeltaState { actions } => {
                for action in &actions {
                    mirror.apply_remote(action);
                }
            }
            ServerFrame::ClassBInstant(instant) => instants.push(instant),
        }
    }
    instants
}

#[test]
fn observer_mirror_tracks_live_simulation() {
    let mut server = ServerState::new(9);
    let mut replicator = Replicator::new();
    let (tx, mut rx) = unbounded_channel();
    replicator.attach(tx);

    let pawn = server
        .create_entity(EntityKind::Pawn, Vec2::ZERO, 0)
        .unwrap();
    server.set_move_target(pawn, Vec2::new(50.0, 0.0));
    server.tick();
    replicator.replicate(server.state_mut()).unwrap();

    let mut mirror = WorldState::mirror();
    replay(&mut rx, &mut mirror);
    assert_eq!(&mirror, server.state());

    // Keep simulating: the mirror follows through deltas alone.
    for _ in 0..6 {
        server.tick();
        replicator.replicate(server.state_mut()).unwrap();
    }
    replay(&mut rx, &mut mirror);
    assert_eq!(&mirror, server.state());
}

#[test]
fn late_joiner_sees_no_gap_and_no_duplicate() {
    let mut server = ServerState::new(9);
    let mut replicator = Replicator::new();

    let (early_tx, mut early_rx) = unbounded_channel();
    replicator.attach(early_tx);
    server
        .create_entity(EntityKind::Settlement, Vec2::new(10.0, 10.0), 0)
        .unwrap();
    server.tick();
    replicator.replicate(server.state_mut()).unwrap();

    // A second observer joins mid-stream.
    let (late_tx, mut late_rx) = unbounded_channel();
    replicator.attach(late_tx);
    server
        .create_entity(EntityKind::Pawn, Vec2::new(20.0, 20.0), 1)
        .unwrap();
    server.tick();
    replicator.replicate(server.state_mut()).unwrap();

    server
        .create_entity(EntityKind::Dummy, Vec2::ZERO, 0)
        .unwrap();
    server.tick();
    replicator.replicate(server.state_mut()).unwrap();

    let mut early = WorldState::mirror();
    replay(&mut early_rx, &mut early);
    let mut late = WorldState::mirror();
    replay(&mut late_rx, &mut late);
    assert_eq!(&early, server.state());
    assert_eq!(&late, server.state());
}

#[test]
fn combat_instants_reach_synced_observers() {
    let mut server = ServerState::new(9);
    let mut replicator = Replicator::new();
    let (tx, mut rx) = unbounded_channel();
    replicator.attach(tx);
    replicator.replicate(server.state_mut()).unwrap();

    let attacker = server
        .create_entity(EntityKind::Pawn, Vec2::ZERO, 0)
        .unwrap();
    server
        .create_entity(EntityKind::Pawn, Vec2::new(30.0, 0.0), 1)
        .unwrap();
    server.add_item(attacker, ItemKind::Win1906, 1).unwrap();
    server.add_item(attacker, ItemKind::Ammo22Short, 5).unwrap();

    server.tick_slow();
    server.tick();
    replicator.replicate(server.state_mut()).unwrap();
    replicator
        .broadcast_instants(&server.drain_instants())
        .unwrap();

    let mut mirror = WorldState::mirror();
    let instants = replay(&mut rx, &mut mirror);
    assert_eq!(instants.len(), 1);
    assert_eq!(instants[0].team, 0);
    assert_eq!(&mirror, server.state());
}

#[test]
fn snapshot_of_running_game_restores_equal_container() {
    let mut server = ServerState::new(9);
    let settlement = server
        .create_entity(EntityKind::Settlement, Vec2::new(-40.0, 12.0), 2)
        .unwrap();
    server.submit_order(settlement, EntityKind::Pawn);
    server
        .create_entity(EntityKind::Pawn, Vec2::new(5.0, 5.0), 2)
        .unwrap();
    for _ in 0..10 {
        server.tick();
    }

    let snapshot = server.state().snapshot().unwrap();
    let restored = WorldState::from_snapshot(&snapshot).unwrap();
    assert_eq!(&restored, server.state());
}
