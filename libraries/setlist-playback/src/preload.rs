//! Concurrent preload scheduler
//!
//! Speculatively resolves a playable URL for every track of the open set before
//! the listener asks for it. At most `max_concurrency` resolutions run at any
//! time; each one holds a semaphore permit for its whole lifetime. Whenever a
//! resolution finishes (success, failure or panic) its permit is returned and
//! the queue is drained again, so the pending list always empties while the
//! runtime is alive.
//!
//! Results are written back only if the set has not been replaced in the
//! meantime (generation check), which keeps a late result from landing on a
//! reused track id.

use crate::error::{PlaybackError, Result};
use crate::resolve::resolve_and_cache;
use setlist_core::{Generation, Resolver, Track, TrackId, TrackQueue};
use futures_util::FutureExt;
use std::collections::{HashSet, VecDeque};
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::runtime::Handle;
use tokio::sync::{Notify, OwnedSemaphorePermit, Semaphore};
use tracing::{debug, info};

/// Background URL resolution with bounded concurrency
///
/// Cloning yields another handle to the same scheduler.
#[derive(Clone)]
pub struct PreloadScheduler {
    shared: Arc<Shared>,
}

struct Shared {
    tracks: TrackQueue,
    resolver: Arc<dyn Resolver>,
    permits: Arc<Semaphore>,
    max_concurrency: usize,
    queue: Mutex<PreloadQueue>,
    idle: Notify,
    runtime: Handle,
}

#[derive(Debug, Default)]
struct PreloadQueue {
    /// Ids waiting for a slot, front first; never contains duplicates
    pending: VecDeque<TrackId>,
    /// Ids currently being resolved (an id may appear once per generation)
    in_flight: Vec<TrackId>,
    generation: Generation,
}

impl Shared {
    fn lock_queue(&self) -> MutexGuard<'_, PreloadQueue> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PreloadScheduler {
    /// Create a scheduler running its tasks on the current tokio runtime
    pub fn new(
        tracks: TrackQueue,
        resolver: Arc<dyn Resolver>,
        max_concurrency: usize,
    ) -> Result<Self> {
        let runtime =
            Handle::try_current().map_err(|e| PlaybackError::NoRuntime(e.to_string()))?;
        Self::with_runtime(tracks, resolver, max_concurrency, runtime)
    }

    /// Create a scheduler running its tasks on `runtime`
    pub fn with_runtime(
        tracks: TrackQueue,
        resolver: Arc<dyn Resolver>,
        max_concurrency: usize,
        runtime: Handle,
    ) -> Result<Self> {
        if max_concurrency == 0 {
            return Err(PlaybackError::InvalidConfig(
                "preload concurrency must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            shared: Arc::new(Shared {
                tracks,
                resolver,
                permits: Arc::new(Semaphore::new(max_concurrency)),
                max_concurrency,
                queue: Mutex::new(PreloadQueue::default()),
                idle: Notify::new(),
                runtime,
            }),
        })
    }

    /// Replace the pending queue with every unresolved track of `tracks`
    ///
    /// Keeps list order and drops duplicates. Work already in flight is left
    /// alone and still counts toward the concurrency bound. Returns the number
    /// of queued ids.
    pub fn seed(&self, tracks: &[Track]) -> usize {
        let generation = self.shared.tracks.generation();

        let queued = {
            let mut queue = self.shared.lock_queue();
            let same_generation = queue.generation == generation;

            let mut seen = HashSet::new();
            let pending: VecDeque<TrackId> = tracks
                .iter()
                .filter(|t| !t.is_resolved() && self.shared.tracks.cached_url(&t.id).is_none())
                .filter(|t| !(same_generation && queue.in_flight.contains(&t.id)))
                .filter(|t| seen.insert(t.id.clone()))
                .map(|t| t.id.clone())
                .collect();

            queue.pending = pending;
            queue.generation = generation;
            queue.pending.len()
        };

        info!(
            generation = generation.value(),
            pending = queued,
            "Seeded preload queue"
        );

        drain(&self.shared);
        queued
    }

    /// Move a pending track to the front of the queue ("hover priority")
    ///
    /// Returns `false` when the track is not pending (already resolved, in
    /// flight, unknown) or already first. Drains either way.
    pub fn promote(&self, track_id: &TrackId) -> bool {
        let moved = {
            let mut queue = self.shared.lock_queue();
            match queue.pending.iter().position(|id| id == track_id) {
                None | Some(0) => false,
                Some(pos) => match queue.pending.remove(pos) {
                    Some(id) => {
                        queue.pending.push_front(id);
                        true
                    }
                    None => false,
                },
            }
        };

        if moved {
            debug!(track_id = %track_id, "Promoted track in preload queue");
        }

        drain(&self.shared);
        moved
    }

    /// Start resolutions until the bound is reached or nothing is pending
    pub fn drain(&self) {
        drain(&self.shared);
    }

    /// Pending ids, front first
    pub fn pending(&self) -> Vec<TrackId> {
        self.shared.lock_queue().pending.iter().cloned().collect()
    }

    /// Ids currently being resolved
    pub fn in_flight_ids(&self) -> Vec<TrackId> {
        self.shared.lock_queue().in_flight.clone()
    }

    /// Number of resolutions currently running
    pub fn in_flight(&self) -> usize {
        self.shared.max_concurrency - self.shared.permits.available_permits()
    }

    /// Concurrency bound
    pub fn max_concurrency(&self) -> usize {
        self.shared.max_concurrency
    }

    /// Generation of the set the queue was last seeded from
    pub fn generation(&self) -> Generation {
        self.shared.lock_queue().generation
    }

    /// Nothing pending and nothing in flight
    pub fn is_idle(&self) -> bool {
        let queue = self.shared.lock_queue();
        queue.pending.is_empty() && queue.in_flight.is_empty()
    }

    /// Wait until the scheduler is idle
    pub async fn wait_idle(&self) {
        loop {
            let mut notified = std::pin::pin!(self.shared.idle.notified());
            notified.as_mut().enable();

            if self.is_idle() {
                return;
            }

            notified.await;
        }
    }
}

fn drain(shared: &Arc<Shared>) {
    let (generation, started) = {
        let mut queue = shared.lock_queue();
        let mut started = Vec::new();

        while !queue.pending.is_empty() {
            let Ok(permit) = Arc::clone(&shared.permits).try_acquire_owned() else {
                break;
            };
            let Some(track_id) = queue.pending.pop_front() else {
                break;
            };
            queue.in_flight.push(track_id.clone());
            started.push((track_id, permit));
        }

        if queue.pending.is_empty() && queue.in_flight.is_empty() {
            shared.idle.notify_waiters();
        }

        (queue.generation, started)
    };

    for (track_id, permit) in started {
        debug!(track_id = %track_id, "Starting preload");

        let mut slot = Slot {
            shared: Arc::clone(shared),
            track_id,
            permit: Some(permit),
            finished: false,
        };

        shared.runtime.spawn(async move {
            let outcome = AssertUnwindSafe(preload_one(&slot.shared, &slot.track_id, generation))
                .catch_unwind()
                .await;
            if outcome.is_err() {
                debug!(track_id = %slot.track_id, "Preload panicked");
            }
            slot.finished = true;
        });
    }
}

async fn preload_one(shared: &Shared, track_id: &TrackId, generation: Generation) {
    if shared.tracks.generation() != generation {
        debug!(track_id = %track_id, "Set replaced before preload started");
        return;
    }

    let Some(track) = shared.tracks.get(track_id) else {
        return;
    };
    if track.is_resolved() {
        return;
    }

    match resolve_and_cache(&shared.tracks, shared.resolver.as_ref(), &track, generation).await {
        Ok(_) => debug!(track_id = %track_id, "Preloaded"),
        // Best effort: the foreground path retries when the track is requested
        Err(e) => debug!(track_id = %track_id, error = %e, "Preload failed"),
    }
}

/// One occupied concurrency slot
///
/// Dropping it always returns the permit. The queue is drained again only
/// once the task finished (panics included); a task cancelled by runtime
/// shutdown leaves the rest of the queue alone, since every further spawn
/// would be cancelled on the spot.
struct Slot {
    shared: Arc<Shared>,
    track_id: TrackId,
    permit: Option<OwnedSemaphorePermit>,
    finished: bool,
}

impl Drop for Slot {
    fn drop(&mut self) {
        {
            let mut queue = self.shared.lock_queue();
            if let Some(pos) = queue.in_flight.iter().position(|id| *id == self.track_id) {
                queue.in_flight.remove(pos);
            }
            drop(self.permit.take());
        }

        if self.finished {
            drain(&self.shared);
        } else {
            debug!(track_id = %self.track_id, "Preload cancelled");
        }
    }
}
