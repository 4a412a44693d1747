//! Set Player facade
//!
//! Wires the track queue, preload scheduler and playback controller together
//! and exposes the command surface the UI talks to.

use crate::config::PlayerConfig;
use crate::error::Result;
use serde::Serialize;
use setlist_core::{
    Generation, JsonSettingsStore, Resolver, SettingsStore, Track, TrackId, TrackQueue,
};
use setlist_playback::{
    Advance, DeviceEvent, ElementBounds, MediaDevice, PlaybackController, PlaybackEvent,
    PlaybackSnapshot, PointerCapture, PointerEvent, PreloadScheduler, Rewind,
};
use setlist_resolver::{CachingResolver, HttpResolver};
use std::sync::Arc;
use tracing::info;

/// Combined view of playback and preloading for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerStatus {
    pub playback: PlaybackSnapshot,
    pub track_count: usize,
    pub resolved_count: usize,
    pub pending_preloads: usize,
    pub in_flight_preloads: usize,
}

/// Media core for one open set
///
/// All commands take `&self`; share the player behind an `Arc` to drive it from
/// several tasks. Must be created inside a tokio runtime.
pub struct SetPlayer {
    tracks: TrackQueue,
    scheduler: PreloadScheduler,
    controller: PlaybackController,
}

impl SetPlayer {
    /// Build a player talking to the configured HTTP resolver
    ///
    /// Resolutions are memoised in an LRU cache and the volume is persisted to
    /// `storage.settings_path`.
    pub fn from_config(config: &PlayerConfig, device: Box<dyn MediaDevice>) -> Result<Self> {
        config.validate()?;

        let http = HttpResolver::new(config.resolver_config())?;
        let resolver = Arc::new(CachingResolver::new(http, config.resolver.cache_size));
        let settings = Arc::new(JsonSettingsStore::new(&config.storage.settings_path));

        Self::new(config, resolver, settings, device)
    }

    /// Build a player from explicit collaborators
    pub fn new(
        config: &PlayerConfig,
        resolver: Arc<dyn Resolver>,
        settings: Arc<dyn SettingsStore>,
        device: Box<dyn MediaDevice>,
    ) -> Result<Self> {
        config.validate()?;

        let playback = config.playback_config();
        let tracks = TrackQueue::new();
        let scheduler =
            PreloadScheduler::new(tracks.clone(), Arc::clone(&resolver), playback.max_concurrency)?;

        info!(
            max_concurrency = playback.max_concurrency,
            resolver = %config.resolver.base_url,
            "Set player ready"
        );

        let controller = PlaybackController::new(tracks.clone(), resolver, settings, device, playback);

        Ok(Self {
            tracks,
            scheduler,
            controller,
        })
    }

    /// Use `capture` for drag-seek gestures
    pub fn with_pointer_capture(self, capture: Box<dyn PointerCapture>) -> Self {
        Self {
            controller: self.controller.with_pointer_capture(capture),
            ..self
        }
    }

    // ===== Set =====

    /// Replace the open set and start preloading it
    pub fn open_set(&self, tracks: Vec<Track>) -> Generation {
        let track_count = tracks.len();
        let generation = self.tracks.replace(tracks);
        let queued = self.scheduler.seed(&self.tracks.snapshot());

        info!(
            generation = generation.value(),
            tracks = track_count,
            queued,
            "Opened set"
        );
        generation
    }

    /// Re-seed the preload queue from the open set
    pub fn seed_preload(&self) -> usize {
        self.scheduler.seed(&self.tracks.snapshot())
    }

    /// Preload `track_id` next (e.g. while the pointer hovers it)
    pub fn promote(&self, track_id: &TrackId) -> bool {
        self.scheduler.promote(track_id)
    }

    /// Wait until every queued preload has finished
    pub async fn wait_preloaded(&self) {
        self.scheduler.wait_idle().await;
    }

    // ===== Playback =====

    pub async fn toggle(&self, track_id: &TrackId) {
        self.controller.toggle(track_id).await;
    }

    pub async fn next(&self) -> Advance {
        self.controller.next().await
    }

    pub async fn previous(&self) -> Rewind {
        self.controller.previous().await
    }

    pub fn seek(&self, pointer_x: f64, bounds: ElementBounds) -> Option<f64> {
        self.controller.seek(pointer_x, bounds)
    }

    pub fn seek_to(&self, seconds: f64) -> Option<f64> {
        self.controller.seek_to(seconds)
    }

    pub fn start_drag(&self, event: PointerEvent, bounds: ElementBounds) -> Option<f64> {
        self.controller.start_drag(event, bounds)
    }

    pub fn drag_move(&self, event: PointerEvent) -> Option<f64> {
        self.controller.drag_move(event)
    }

    pub fn end_drag(&self, event: PointerEvent) -> Option<f64> {
        self.controller.end_drag(event)
    }

    pub fn cancel_drag(&self) -> bool {
        self.controller.cancel_drag()
    }

    pub fn set_volume(&self, level: u8) {
        self.controller.set_volume(level);
    }

    pub fn mute(&self) {
        self.controller.mute();
    }

    pub fn unmute(&self) {
        self.controller.unmute();
    }

    pub fn toggle_mute(&self) {
        self.controller.toggle_mute();
    }

    /// Forward an event from the playback device
    pub async fn handle_device_event(&self, event: DeviceEvent) {
        self.controller.handle_device_event(event).await;
    }

    // ===== State =====

    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.controller.snapshot()
    }

    pub fn status(&self) -> PlayerStatus {
        let tracks = self.tracks.snapshot();

        PlayerStatus {
            playback: self.controller.snapshot(),
            track_count: tracks.len(),
            resolved_count: tracks.iter().filter(|t| t.is_resolved()).count(),
            pending_preloads: self.scheduler.pending().len(),
            in_flight_preloads: self.scheduler.in_flight(),
        }
    }

    pub fn drain_events(&self) -> Vec<PlaybackEvent> {
        self.controller.drain_events()
    }

    pub fn tracks(&self) -> &TrackQueue {
        &self.tracks
    }

    pub fn scheduler(&self) -> &PreloadScheduler {
        &self.scheduler
    }

    pub fn controller(&self) -> &PlaybackController {
        &self.controller
    }
}
