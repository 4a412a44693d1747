//! Playback session state machine
//!
//! `PlaybackSession` is the observable state of the single playback device.
//! Device events are folded into it by one transition function so the rules
//! stay platform-neutral and testable without a device.

use crate::device::DeviceEvent;
use crate::events::Notice;
use crate::types::{PlaybackSnapshot, PlaybackStatus};
use crate::volume::Volume;
use setlist_core::TrackId;

/// Observable session state
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSession {
    pub status: PlaybackStatus,
    pub current_track_id: Option<TrackId>,
    /// Position in seconds
    pub current_time: f64,
    /// Duration in seconds (0 while unknown)
    pub duration: f64,
    /// Progress in percent (0-100)
    pub progress_percent: f64,
    pub volume: Volume,
    /// Suppresses device time updates while the listener scrubs
    pub drag_in_progress: bool,
}

impl PlaybackSession {
    /// Fresh idle session
    pub fn new(volume: Volume) -> Self {
        Self {
            status: PlaybackStatus::Idle,
            current_track_id: None,
            current_time: 0.0,
            duration: 0.0,
            progress_percent: 0.0,
            volume,
            drag_in_progress: false,
        }
    }

    /// Target `track_id` and enter `Loading`
    ///
    /// Returns the previous target.
    pub fn begin_load(&mut self, track_id: TrackId) -> Option<TrackId> {
        let previous = self.current_track_id.replace(track_id);
        self.status = PlaybackStatus::Loading;
        self.reset_position();
        previous
    }

    /// Drop the target and return to `Idle`
    pub fn clear_target(&mut self) -> Option<TrackId> {
        self.status = PlaybackStatus::Idle;
        self.reset_position();
        self.current_track_id.take()
    }

    /// Settle after a failed resolution: no source, nothing targeted
    pub fn fail_resolution(&mut self, message: impl Into<String>) -> Option<Notice> {
        let track_id = self.current_track_id.take()?;
        self.status = PlaybackStatus::Paused;
        self.reset_position();

        Some(Notice::ResolveFailed {
            track_id,
            message: message.into(),
        })
    }

    /// Record a new playback position
    pub fn set_position(&mut self, current_time: f64, duration: f64) {
        self.current_time = current_time.max(0.0);
        self.duration = duration;
        self.progress_percent = if duration > 0.0 {
            (self.current_time / duration * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };
    }

    /// Presentation-layer view
    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            status: self.status,
            current_track_id: self.current_track_id.clone(),
            current_time: self.current_time,
            duration: self.duration,
            progress_percent: self.progress_percent,
            volume: self.volume.level(),
            muted: self.volume.is_muted(),
            drag_in_progress: self.drag_in_progress,
        }
    }

    fn reset_position(&mut self) {
        self.current_time = 0.0;
        self.duration = 0.0;
        self.progress_percent = 0.0;
    }
}

/// What the controller has to do after a device event was applied
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// Event did not apply to the current state
    Ignored,
    /// Session updated; nothing further to do
    Updated,
    /// Current media ended; advance to the next track
    Advance,
    /// Passed through `Error` and settled; surface the notice
    Failed(Notice),
}

/// Fold a device event into the session
pub fn transition(session: &mut PlaybackSession, event: &DeviceEvent) -> Transition {
    match event {
        DeviceEvent::TimeAdvance {
            current_time,
            duration,
        } => {
            if session.drag_in_progress || session.current_track_id.is_none() {
                return Transition::Ignored;
            }

            let duration = duration
                .filter(|d| d.is_finite() && *d > 0.0)
                .unwrap_or(session.duration);
            session.set_position(*current_time, duration);
            Transition::Updated
        }

        // Not subject to drag suppression
        DeviceEvent::Ended => {
            if session.current_track_id.is_some() {
                Transition::Advance
            } else {
                Transition::Ignored
            }
        }

        // Clearing the source makes some devices report an error; with no
        // target there is nothing that failed
        DeviceEvent::Error(message) => {
            let Some(track_id) = session.current_track_id.take() else {
                return Transition::Ignored;
            };
            session.status = PlaybackStatus::Paused;
            session.reset_position();

            Transition::Failed(Notice::PlaybackFailed {
                track_id: Some(track_id),
                message: message.clone(),
            })
        }

        DeviceEvent::StartAccepted => match session.status {
            PlaybackStatus::Loading | PlaybackStatus::Paused if session.current_track_id.is_some() => {
                session.status = PlaybackStatus::Playing;
                Transition::Updated
            }
            _ => Transition::Ignored,
        },

        DeviceEvent::StartRejected(message) => match session.status {
            PlaybackStatus::Loading | PlaybackStatus::Paused | PlaybackStatus::Playing => {
                session.status = PlaybackStatus::Paused;

                Transition::Failed(Notice::CouldNotStart {
                    track_id: session.current_track_id.clone(),
                    message: message.clone(),
                })
            }
            _ => Transition::Ignored,
        },
    }
}
