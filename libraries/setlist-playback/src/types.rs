//! Core types for playback management

use serde::{Deserialize, Serialize};
use setlist_core::TrackId;

/// Playback status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackStatus {
    /// No track targeted
    #[default]
    Idle,

    /// Resolving a URL or waiting for the device to start
    Loading,

    /// Currently playing
    Playing,

    /// Paused mid-track (or settled after a failure)
    Paused,

    /// Transient: a start or resolution just failed
    Error,
}

/// Configuration for the playback controller and preload scheduler
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Volume used when nothing is persisted (0-100, default: 80)
    pub volume: u8,

    /// `previous()` restarts the current track past this position (default: 2.0s)
    pub restart_threshold_secs: f64,

    /// Concurrent background resolutions (default: 2)
    pub max_concurrency: usize,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: 80,
            restart_threshold_secs: 2.0,
            max_concurrency: 2,
        }
    }
}

/// Horizontal extent of the progress element, in the pointer's coordinate space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementBounds {
    /// Left edge
    pub left: f64,
    /// Width
    pub width: f64,
}

impl ElementBounds {
    /// Create bounds from left edge and width
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    /// Map a pointer x-coordinate to a fraction in `[0, 1]`
    ///
    /// Degenerate bounds (zero, negative or non-finite width) map everything to 0.
    pub fn fraction_at(&self, pointer_x: f64) -> f64 {
        if !self.width.is_finite() || self.width <= 0.0 {
            return 0.0;
        }

        let fraction = (pointer_x - self.left) / self.width;
        if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        }
    }
}

/// Pointer event delivered by the platform during a drag gesture
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Horizontal pointer position
    pub client_x: f64,
}

impl PointerEvent {
    /// Create an event at `client_x`
    pub fn at(client_x: f64) -> Self {
        Self { client_x }
    }
}

/// Outcome of `next()`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Moved on to the given track
    Advanced(TrackId),
    /// Nothing follows; session returned to idle
    NoAdvance,
}

/// Outcome of `previous()`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rewind {
    /// Moved back to the given track
    Previous(TrackId),
    /// First track: restarted in place
    Restarted,
    /// First track near its start, or nothing playing
    Unchanged,
}

/// Read-only view of the session for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackSnapshot {
    pub status: PlaybackStatus,
    pub current_track_id: Option<TrackId>,
    pub current_time: f64,
    pub duration: f64,
    pub progress_percent: f64,
    pub volume: u8,
    pub muted: bool,
    pub drag_in_progress: bool,
}
