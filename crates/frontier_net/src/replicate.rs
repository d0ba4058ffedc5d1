//! Per-observer replication sessions.
//!
//! The [`Replicator`] tracks every connected observer and drives the
//! replication protocol once per tick:
//!
//! 1. Drain the authoritative container's pending actions once.
//! 2. Send the batch as a delta frame to every already-synced observer.
//! 3. Send a fresh full snapshot to every observer still waiting for one,
//!    then mark them synced.
//!
//! Deltas go out before snapshots: the snapshot is taken after the tick's
//! mutations, so a new observer's first delta (next tick) continues exactly
//! where its snapshot ended — no gap, no duplicated action.
//!
//! Frames are handed to observers as encoded JSON strings over unbounded
//! channels; the transport behind the channel is not this crate's concern.

use std::collections::HashMap;

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::codec;
use crate::error::NetError;
use crate::frames::{InstantEvent, ServerFrame};
use crate::state::WorldState;

/// Identifies one observer session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(pub Uuid);

impl ObserverId {
    /// Creates a fresh random observer id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ObserverId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ObserverId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "observer:{}", self.0)
    }
}

/// Where a session is in the replication protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Attached, waiting for its first snapshot.
    Connected,
    /// Snapshot delivered; receives deltas from now on.
    Synced,
}

struct Session {
    phase: Phase,
    tx: UnboundedSender<String>,
}

/// Drives replication to all observers.
#[derive(Default)]
pub struct Replicator {
    sessions: HashMap<ObserverId, Session>,
}

impl Replicator {
    /// Creates a replicator with no observers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new observer and returns its session id.
    ///
    /// The observer receives nothing until the next [`replicate`](Self::replicate)
    /// call, which snapshots the post-tick state for it.
    pub fn attach(&mut self, tx: UnboundedSender<String>) -> ObserverId {
        let id = ObserverId::new();
        self.sessions.insert(
            id,
            Session {
                phase: Phase::Connected,
                tx,
            },
        );
        info!(observer = %id, "observer attached");
        id
    }

    /// Removes an observer session, if present.
    pub fn detach(&mut self, id: ObserverId) {
        if self.sessions.remove(&id).is_some() {
            info!(observer = %id, "observer detached");
        }
    }

    /// Number of attached observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.sessions.len()
    }

    /// Runs one replication pass against the authoritative container.
    ///
    /// Call exactly once per tick, after all simulation mutations. Drains the
    /// pending action log even when no observer is attached, so the log never
    /// grows across idle ticks.
    ///
    /// # Errors
    ///
    /// Returns [`NetError::Encode`] if a frame fails to serialize. Closed
    /// observer channels are not errors; those sessions are pruned.
    pub fn replicate(&mut self, state: &mut WorldState) -> Result<(), NetError> {
        let actions = state.drain_actions();

        if !actions.is_empty() && self.sessions.values().any(|s| s.phase == Phase::Synced) {
            let delta = codec::encode(&ServerFrame::DeltaState { actions })?;
            for (id, session) in &self.sessions {
                if session.phase == Phase::Synced && session.tx.send(delta.clone()).is_err() {
                    debug!(observer = %id, "delta send to closed channel");
                }
            }
        }

        if self.sessions.values().any(|s| s.phase == Phase::Connected) {
            let snapshot = codec::encode(&ServerFrame::FullState {
                state: state.clone(),
            })?;
            for (id, session) in &mut self.sessions {
                if session.phase != Phase::Connected {
                    continue;
                }
                if session.tx.send(snapshot.clone()).is_ok() {
                    session.phase = Phase::Synced;
                    debug!(observer = %id, "observer synced");
                } else {
                    warn!(observer = %id, "snapshot send to closed channel");
                }
            }
        }

        self.prune_closed();
        Ok(())
    }

    /// Broadcasts transient events to every synced observer.
    ///
    /// Instants bypass the state container entirely; unsynced observers are
    /// skipped since they have no state to anchor the event to.
    ///
    /// # Errors
    ///
    /// Returns [`NetError::Encode`] if an event fails to serialize.
    pub fn broadcast_instants(&mut self, instants: &[InstantEvent]) -> Result<(), NetError> {
        for instant in instants {
            let frame = codec::encode(&ServerFrame::ClassBInstant(instant.clone()))?;
            for session in self.sessions.values() {
                if session.phase == Phase::Synced {
                    // Closed channels are caught on the next replicate pass.
                    let _ = session.tx.send(frame.clone());
                }
            }
        }
        Ok(())
    }

    fn prune_closed(&mut self) {
        self.sessions.retain(|id, session| {
            let open = !session.tx.is_closed();
            if !open {
                info!(observer = %id, "pruning closed observer channel");
            }
            open
        });
    }
}
