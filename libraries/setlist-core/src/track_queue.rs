//! Track queue model for the currently open set
//!
//! Ordered, id-indexed list of tracks shared between the preload scheduler, the
//! playback controller and the surrounding application. Every `replace()` bumps
//! a generation token so background work started against an older set can be
//! told apart from work for the current one.

use crate::types::{Track, TrackId};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Monotonically increasing token identifying one version of the open set
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Generation(u64);

impl Generation {
    /// Raw counter value
    pub fn value(self) -> u64 {
        self.0
    }

    fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of writing a resolved URL back into the queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOutcome {
    /// URL written
    Stored,
    /// Another writer got there first; carries the URL that is kept
    AlreadyCached(String),
    /// The set was replaced since the write was requested
    Stale,
    /// Track id is not part of the set
    Missing,
}

#[derive(Debug, Default)]
struct TrackList {
    tracks: Vec<Track>,
    index: HashMap<TrackId, usize>,
    generation: Generation,
}

/// Shared handle to the open set's tracks
///
/// Cloning is cheap; all clones observe the same list.
#[derive(Debug, Clone, Default)]
pub struct TrackQueue {
    inner: Arc<RwLock<TrackList>>,
}

impl TrackQueue {
    /// Create an empty queue (generation 0)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a queue already holding `tracks`
    pub fn with_tracks(tracks: Vec<Track>) -> Self {
        let queue = Self::new();
        queue.replace(tracks);
        queue
    }

    /// Replace the whole set and return the new generation
    ///
    /// Duplicate ids keep the first occurrence in the index.
    pub fn replace(&self, tracks: Vec<Track>) -> Generation {
        let mut index = HashMap::with_capacity(tracks.len());
        for (i, track) in tracks.iter().enumerate() {
            index.entry(track.id.clone()).or_insert(i);
        }

        let mut list = self.write();
        list.tracks = tracks;
        list.index = index;
        list.generation = list.generation.next();
        list.generation
    }

    /// Current generation
    pub fn generation(&self) -> Generation {
        self.read().generation
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.read().tracks.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.read().tracks.is_empty()
    }

    /// Copy of a track by id
    pub fn get(&self, id: &TrackId) -> Option<Track> {
        let list = self.read();
        list.index.get(id).map(|&i| list.tracks[i].clone())
    }

    /// Whether `id` is part of the set
    pub fn contains(&self, id: &TrackId) -> bool {
        self.read().index.contains_key(id)
    }

    /// Position of `id` in the ordered list
    pub fn index_of(&self, id: &TrackId) -> Option<usize> {
        self.read().index.get(id).copied()
    }

    /// Copy of the track at `index`
    pub fn track_at(&self, index: usize) -> Option<Track> {
        self.read().tracks.get(index).cloned()
    }

    /// Copy of all tracks in order
    pub fn snapshot(&self) -> Vec<Track> {
        self.read().tracks.clone()
    }

    /// Resolved URL for `id`, if any
    pub fn cached_url(&self, id: &TrackId) -> Option<String> {
        let list = self.read();
        list.index
            .get(id)
            .and_then(|&i| list.tracks[i].cached_url.clone())
    }

    /// Write a resolved URL, at most once per track and only for `generation`
    pub fn store_url(
        &self,
        id: &TrackId,
        url: impl Into<String>,
        generation: Generation,
    ) -> StoreOutcome {
        let mut list = self.write();

        if list.generation != generation {
            return StoreOutcome::Stale;
        }

        let Some(&i) = list.index.get(id) else {
            return StoreOutcome::Missing;
        };

        let track = &mut list.tracks[i];
        match &track.cached_url {
            Some(existing) => StoreOutcome::AlreadyCached(existing.clone()),
            None => {
                track.cached_url = Some(url.into());
                StoreOutcome::Stored
            }
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, TrackList> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, TrackList> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
