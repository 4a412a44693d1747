//! Playback session controller
//!
//! Owns the single playback device and turns user commands and device events
//! into session state. Commands never fail: runtime problems (no URL found,
//! device refused to start, decode error) surface as `Notice`s in the event
//! stream and leave the session settled in `Paused`.
//!
//! Every load takes a ticket. A resolution or start outcome whose ticket has
//! been superseded is discarded, so the last request always wins on the device.

use crate::device::{DeviceEvent, MediaDevice, NoopCapture, PointerCapture};
use crate::drag::{DragSession, SharedCapture};
use crate::events::PlaybackEvent;
use crate::resolve::resolve_and_cache;
use crate::session::{transition, PlaybackSession, Transition};
use crate::types::{
    Advance, ElementBounds, PlaybackConfig, PlaybackSnapshot, PlaybackStatus, PointerEvent, Rewind,
};
use crate::volume::{Volume, VOLUME_SETTINGS_KEY};
use setlist_core::{Resolver, SettingsStore, Track, TrackId, TrackQueue};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Playback controller
///
/// All commands take `&self`; share the controller behind an `Arc` to drive it
/// from several tasks. Lock order is session state, then device.
pub struct PlaybackController {
    tracks: TrackQueue,
    resolver: Arc<dyn Resolver>,
    settings: Arc<dyn SettingsStore>,
    device: Mutex<Box<dyn MediaDevice>>,
    capture: SharedCapture,
    state: Mutex<ControllerState>,
    config: PlaybackConfig,
}

struct ControllerState {
    session: PlaybackSession,
    drag: Option<DragSession>,
    /// Ticket of the latest foreground load or resume
    ticket: u64,
    pending_events: Vec<PlaybackEvent>,
}

enum ToggleAction {
    Load(u64, Track),
    Resume(u64),
    Done,
}

impl PlaybackController {
    /// Create a controller
    ///
    /// The volume level is restored from `settings` (falling back to
    /// `config.volume`) and applied to the device right away.
    pub fn new(
        tracks: TrackQueue,
        resolver: Arc<dyn Resolver>,
        settings: Arc<dyn SettingsStore>,
        mut device: Box<dyn MediaDevice>,
        config: PlaybackConfig,
    ) -> Self {
        let volume = settings
            .load(VOLUME_SETTINGS_KEY)
            .and_then(|raw| Volume::parse_persisted(&raw))
            .unwrap_or_else(|| Volume::new(config.volume));

        debug!(level = volume.level(), "Restored volume");
        device.set_volume(volume.gain());

        Self {
            tracks,
            resolver,
            settings,
            device: Mutex::new(device),
            capture: Arc::new(Mutex::new(Box::new(NoopCapture))),
            state: Mutex::new(ControllerState {
                session: PlaybackSession::new(volume),
                drag: None,
                ticket: 0,
                pending_events: Vec::new(),
            }),
            config,
        }
    }

    /// Use `capture` for drag gestures instead of the no-op capture
    pub fn with_pointer_capture(mut self, capture: Box<dyn PointerCapture>) -> Self {
        self.capture = Arc::new(Mutex::new(capture));
        self
    }

    // ===== Playback Control =====

    /// Play or pause `track_id`
    ///
    /// - Another (or no) track targeted: load `track_id` and start it
    /// - `track_id` playing: pause
    /// - `track_id` paused: resume (retries start after a refused start)
    /// - `track_id` still loading: nothing
    pub async fn toggle(&self, track_id: &TrackId) {
        let action = {
            let mut state = self.lock_state();

            if state.session.current_track_id.as_ref() == Some(track_id) {
                match state.session.status {
                    PlaybackStatus::Playing => {
                        self.lock_device().pause();
                        state.set_status(PlaybackStatus::Paused);
                        ToggleAction::Done
                    }
                    PlaybackStatus::Paused | PlaybackStatus::Error | PlaybackStatus::Idle => {
                        state.ticket += 1;
                        ToggleAction::Resume(state.ticket)
                    }
                    PlaybackStatus::Loading => ToggleAction::Done,
                }
            } else {
                match self.tracks.get(track_id) {
                    Some(track) => {
                        state.ticket += 1;
                        self.lock_device().pause();

                        let previous = state.session.begin_load(track_id.clone());
                        state.push(PlaybackEvent::TrackChanged {
                            track_id: Some(track_id.clone()),
                            previous_track_id: previous,
                        });
                        state.push(PlaybackEvent::StateChanged {
                            status: PlaybackStatus::Loading,
                        });
                        state.push_position();

                        ToggleAction::Load(state.ticket, track)
                    }
                    None => {
                        warn!(track_id = %track_id, "Toggle for track outside the open set");
                        ToggleAction::Done
                    }
                }
            }
        };

        match action {
            ToggleAction::Load(ticket, track) => self.load(ticket, track).await,
            ToggleAction::Resume(ticket) => self.start(ticket).await,
            ToggleAction::Done => {}
        }
    }

    /// Resolve `track` and hand its URL to the device
    async fn load(&self, ticket: u64, track: Track) {
        let generation = self.tracks.generation();
        let resolved =
            resolve_and_cache(&self.tracks, self.resolver.as_ref(), &track, generation).await;

        let start = {
            let mut state = self.lock_state();
            if state.ticket != ticket {
                debug!(track_id = %track.id, "Load superseded; dropping resolution");
                return;
            }

            match resolved {
                Ok(url) => {
                    let mut device = self.lock_device();
                    device.set_source(&url);
                    device.set_volume(state.session.volume.gain());
                    device.start()
                }
                Err(e) => {
                    warn!(track_id = %track.id, error = %e, "Could not resolve track");

                    self.lock_device().clear_source();
                    state.push(PlaybackEvent::StateChanged {
                        status: PlaybackStatus::Error,
                    });
                    if let Some(notice) = state.session.fail_resolution(e.to_string()) {
                        state.push(PlaybackEvent::Notification(notice));
                    }
                    state.push(PlaybackEvent::TrackChanged {
                        track_id: None,
                        previous_track_id: Some(track.id.clone()),
                    });
                    let status = state.session.status;
                    state.push(PlaybackEvent::StateChanged { status });
                    return;
                }
            }
        };

        let outcome = start.await;
        self.finish_start(ticket, outcome);
    }

    /// Ask the device to (re)start its current source
    async fn start(&self, ticket: u64) {
        let start = self.lock_device().start();
        let outcome = start.await;
        self.finish_start(ticket, outcome);
    }

    fn finish_start(&self, ticket: u64, outcome: crate::error::Result<()>) {
        let mut state = self.lock_state();
        if state.ticket != ticket {
            debug!(ticket, "Start outcome superseded");
            return;
        }

        let event = match outcome {
            Ok(()) => DeviceEvent::StartAccepted,
            Err(e) => DeviceEvent::StartRejected(e.to_string()),
        };

        match state.apply(&event) {
            Transition::Updated => {
                if let Some(track_id) = &state.session.current_track_id {
                    info!(track_id = %track_id, "Playback started");
                }
            }
            Transition::Failed(notice) => {
                warn!(track_id = ?notice.track_id(), "Device refused to start playback");
            }
            Transition::Ignored | Transition::Advance => {}
        }
    }

    /// Advance to the track after the current target
    ///
    /// At the end of the set (or with nothing targeted) the session is cleared
    /// and returns to `Idle`.
    pub async fn next(&self) -> Advance {
        let following = {
            let state = self.lock_state();
            state
                .session
                .current_track_id
                .as_ref()
                .and_then(|id| self.tracks.index_of(id))
                .and_then(|index| self.tracks.track_at(index + 1))
        };

        match following {
            Some(track) => {
                self.toggle(&track.id).await;
                Advance::Advanced(track.id)
            }
            None => {
                self.stop();
                Advance::NoAdvance
            }
        }
    }

    /// Go back to the previous track
    ///
    /// On the first track (or a track outside the set) this restarts playback
    /// once the position is past the restart threshold, and does nothing
    /// otherwise.
    pub async fn previous(&self) -> Rewind {
        let preceding = {
            let mut state = self.lock_state();
            let Some(current) = state.session.current_track_id.clone() else {
                return Rewind::Unchanged;
            };

            match self.tracks.index_of(&current) {
                Some(index) if index > 0 => self.tracks.track_at(index - 1),
                _ => {
                    if state.session.current_time <= self.config.restart_threshold_secs {
                        return Rewind::Unchanged;
                    }

                    self.lock_device().set_position(0.0);
                    let duration = state.session.duration;
                    state.session.set_position(0.0, duration);
                    state.push_position();

                    debug!(track_id = %current, "Restarted track");
                    return Rewind::Restarted;
                }
            }
        };

        match preceding {
            Some(track) => {
                self.toggle(&track.id).await;
                Rewind::Previous(track.id)
            }
            None => Rewind::Unchanged,
        }
    }

    /// Clear the target and detach the device source
    fn stop(&self) {
        let mut state = self.lock_state();
        state.ticket += 1;

        {
            let mut device = self.lock_device();
            device.pause();
            device.clear_source();
        }

        let status = state.session.status;
        if let Some(previous) = state.session.clear_target() {
            info!(track_id = %previous, "Reached end of set");
            state.push(PlaybackEvent::TrackChanged {
                track_id: None,
                previous_track_id: Some(previous),
            });
        }
        if status != PlaybackStatus::Idle {
            state.push(PlaybackEvent::StateChanged {
                status: PlaybackStatus::Idle,
            });
        }
        state.push_position();
    }

    // ===== Seeking =====

    /// Seek to the position under the pointer
    ///
    /// Returns the new position in seconds, or `None` while the device does
    /// not know the duration.
    pub fn seek(&self, pointer_x: f64, bounds: ElementBounds) -> Option<f64> {
        let fraction = bounds.fraction_at(pointer_x);
        let mut state = self.lock_state();
        self.seek_within(&mut state, |duration| fraction * duration)
    }

    /// Seek to `seconds`, clamped to the track duration
    pub fn seek_to(&self, seconds: f64) -> Option<f64> {
        if seconds.is_nan() {
            return None;
        }

        let mut state = self.lock_state();
        self.seek_within(&mut state, |duration| seconds.clamp(0.0, duration))
    }

    /// Move the device to `target(duration)` when the duration is known
    fn seek_within(
        &self,
        state: &mut ControllerState,
        target: impl FnOnce(f64) -> f64,
    ) -> Option<f64> {
        let position = {
            let mut device = self.lock_device();
            let duration = device.duration().filter(|d| d.is_finite() && *d > 0.0)?;
            let position = target(duration);
            device.set_position(position);
            state.session.set_position(position, duration);
            position
        };

        state.push_position();
        Some(position)
    }

    // ===== Drag Seeking =====

    /// Begin a drag gesture on the progress element
    ///
    /// Acquires the global pointer capture and seeks to the pointer. An active
    /// drag is replaced (its capture released first).
    pub fn start_drag(&self, event: PointerEvent, bounds: ElementBounds) -> Option<f64> {
        let mut state = self.lock_state();
        state.drag = None;
        state.session.drag_in_progress = false;

        let drag = DragSession::begin(Arc::clone(&self.capture), bounds);
        let fraction = drag.fraction_at(event.client_x);
        let position = self.seek_within(&mut state, |duration| fraction * duration);

        state.drag = Some(drag);
        state.session.drag_in_progress = true;
        position
    }

    /// Pointer moved during a drag
    ///
    /// The session is held outside the state while the device seeks, so a
    /// device panic unwinds through it and releases the capture.
    pub fn drag_move(&self, event: PointerEvent) -> Option<f64> {
        let mut state = self.lock_state();
        let drag = state.drag.take()?;

        let fraction = drag.fraction_at(event.client_x);
        state.session.drag_in_progress = false;
        let position = self.seek_within(&mut state, |duration| fraction * duration);

        state.drag = Some(drag);
        state.session.drag_in_progress = true;
        position
    }

    /// Pointer released: final seek, then release the capture
    pub fn end_drag(&self, event: PointerEvent) -> Option<f64> {
        let mut state = self.lock_state();
        let drag = state.drag.take()?;

        let fraction = drag.fraction_at(event.client_x);
        state.session.drag_in_progress = false;
        let position = self.seek_within(&mut state, |duration| fraction * duration);
        drop(drag);

        position
    }

    /// Abort the drag without a final seek
    ///
    /// Returns whether a drag was active.
    pub fn cancel_drag(&self) -> bool {
        let mut state = self.lock_state();
        let active = state.drag.take().is_some();
        state.session.drag_in_progress = false;
        active
    }

    /// Whether a drag gesture is active
    pub fn is_dragging(&self) -> bool {
        self.lock_state().drag.is_some()
    }

    // ===== Volume Control =====

    /// Set volume (0-100)
    pub fn set_volume(&self, level: u8) {
        self.update_volume(|volume| volume.set_level(level));
    }

    /// Get current volume (0-100)
    pub fn get_volume(&self) -> u8 {
        self.lock_state().session.volume.level()
    }

    /// Mute audio
    pub fn mute(&self) {
        self.update_volume(Volume::mute);
    }

    /// Unmute audio
    pub fn unmute(&self) {
        self.update_volume(Volume::unmute);
    }

    /// Toggle mute
    pub fn toggle_mute(&self) {
        self.update_volume(Volume::toggle_mute);
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.lock_state().session.volume.is_muted()
    }

    fn update_volume(&self, change: impl FnOnce(&mut Volume)) {
        let level = {
            let mut state = self.lock_state();
            change(&mut state.session.volume);

            let volume = state.session.volume.clone();
            self.lock_device().set_volume(volume.gain());
            state.push(PlaybackEvent::VolumeChanged {
                level: volume.level(),
                is_muted: volume.is_muted(),
            });
            volume.level()
        };

        if let Err(e) = self.settings.save(VOLUME_SETTINGS_KEY, &level.to_string()) {
            warn!(error = %e, "Failed to persist volume");
        }
    }

    // ===== Device Events =====

    /// Apply an event reported by the device
    ///
    /// `Ended` advances to the next track even while a drag is active.
    pub async fn handle_device_event(&self, event: DeviceEvent) {
        let outcome = {
            let mut state = self.lock_state();
            let outcome = state.apply(&event);

            if let Transition::Failed(notice) = &outcome {
                if matches!(event, DeviceEvent::Error(_)) {
                    warn!(track_id = ?notice.track_id(), "Playback device error");
                    state.ticket += 1;
                    self.lock_device().clear_source();
                }
            }
            outcome
        };

        if outcome == Transition::Advance {
            self.next().await;
        }
    }

    // ===== State Queries =====

    /// Presentation-layer view of the session
    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.lock_state().session.snapshot()
    }

    /// Current status
    pub fn status(&self) -> PlaybackStatus {
        self.lock_state().session.status
    }

    /// Current target
    pub fn current_track_id(&self) -> Option<TrackId> {
        self.lock_state().session.current_track_id.clone()
    }

    /// Controller configuration
    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    // ===== Event System =====

    /// Drain pending events
    ///
    /// Returns all events emitted since the last call, oldest first.
    pub fn drain_events(&self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.lock_state().pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.lock_state().pending_events.is_empty()
    }

    fn lock_state(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_device(&self) -> MutexGuard<'_, Box<dyn MediaDevice>> {
        self.device.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ControllerState {
    fn push(&mut self, event: PlaybackEvent) {
        self.pending_events.push(event);
    }

    fn push_position(&mut self) {
        self.pending_events.push(PlaybackEvent::PositionUpdate {
            current_time: self.session.current_time,
            duration: self.session.duration,
            progress_percent: self.session.progress_percent,
        });
    }

    fn set_status(&mut self, status: PlaybackStatus) {
        if self.session.status != status {
            self.session.status = status;
            self.push(PlaybackEvent::StateChanged { status });
        }
    }

    /// Run the transition function and emit the resulting events
    fn apply(&mut self, event: &DeviceEvent) -> Transition {
        let status = self.session.status;
        let track_id = self.session.current_track_id.clone();

        let outcome = transition(&mut self.session, event);

        match &outcome {
            Transition::Updated => {
                if matches!(event, DeviceEvent::TimeAdvance { .. }) {
                    self.push_position();
                }
            }
            Transition::Failed(notice) => {
                self.push(PlaybackEvent::StateChanged {
                    status: PlaybackStatus::Error,
                });
                self.push(PlaybackEvent::Notification(notice.clone()));
            }
            Transition::Ignored | Transition::Advance => {}
        }

        let settled = self.session.status;
        if settled != status || matches!(outcome, Transition::Failed(_)) {
            self.push(PlaybackEvent::StateChanged { status: settled });
        }
        if self.session.current_track_id != track_id {
            let current = self.session.current_track_id.clone();
            self.push(PlaybackEvent::TrackChanged {
                track_id: current,
                previous_track_id: track_id,
            });
            self.push_position();
        }

        outcome
    }
}
