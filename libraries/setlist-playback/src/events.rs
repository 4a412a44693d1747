//! Playback Events
//!
//! Event-based communication for UI synchronization.
//! Events are emitted at key points:
//! - Status changes (loading/playing/paused/idle)
//! - Track changes (new target selected or cleared)
//! - Position updates (device time advance, seeks)
//! - Volume changes
//! - User-visible notifications (resolution failed, could not start)

use crate::types::PlaybackStatus;
use serde::Serialize;
use setlist_core::TrackId;

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PlaybackEvent {
    /// Playback status changed
    StateChanged {
        /// The new status
        status: PlaybackStatus,
    },

    /// Playback target changed
    TrackChanged {
        /// New target (None when cleared)
        track_id: Option<TrackId>,
        /// Previous target (if any)
        previous_track_id: Option<TrackId>,
    },

    /// Position update
    PositionUpdate {
        /// Current position in seconds
        current_time: f64,
        /// Track duration in seconds (0 while unknown)
        duration: f64,
        /// Progress in percent (0-100)
        progress_percent: f64,
    },

    /// Volume changed
    VolumeChanged {
        /// New volume level (0-100)
        level: u8,
        /// Whether audio is muted
        is_muted: bool,
    },

    /// Non-blocking notification for the listener
    Notification(Notice),
}

/// User-visible, non-blocking notifications
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Notice {
    /// No playable URL could be found for the requested track
    ResolveFailed { track_id: TrackId, message: String },

    /// The device refused to start (e.g. autoplay policy)
    CouldNotStart { track_id: Option<TrackId>, message: String },

    /// The device reported an error during playback
    PlaybackFailed { track_id: Option<TrackId>, message: String },
}

impl Notice {
    /// Short text suitable for a toast
    pub fn headline(&self) -> &'static str {
        match self {
            Notice::ResolveFailed { .. } => "No playable source found",
            Notice::CouldNotStart { .. } => "Playback could not start",
            Notice::PlaybackFailed { .. } => "Playback error",
        }
    }

    /// Track the notice refers to
    pub fn track_id(&self) -> Option<&TrackId> {
        match self {
            Notice::ResolveFailed { track_id, .. } => Some(track_id),
            Notice::CouldNotStart { track_id, .. } | Notice::PlaybackFailed { track_id, .. } => {
                track_id.as_ref()
            }
        }
    }
}
