//! Set Player - Preloading and Playback Control
//!
//! Platform-agnostic media core for a DJ-set library.
//!
//! This crate provides:
//! - Concurrent preload scheduling (bounded background URL resolution)
//! - A shared, idempotent resolve-and-cache step
//! - Playback session control (toggle, next/previous, seek, drag-seek)
//! - Logarithmic volume with persisted level
//! - Event queue for UI synchronization
//!
//! # Architecture
//!
//! `setlist-playback` knows nothing about browsers, HTTP or storage formats:
//! - The playback device is reached through [`MediaDevice`]
//! - Global pointer capture through [`PointerCapture`]
//! - URL resolution through [`setlist_core::Resolver`]
//! - Persisted settings through [`setlist_core::SettingsStore`]
//!
//! # Example: Preloading a set
//!
//! ```rust,no_run
//! use setlist_core::{Resolver, Track, TrackQueue};
//! use setlist_playback::PreloadScheduler;
//! use std::sync::Arc;
//!
//! # async fn example(resolver: Arc<dyn Resolver>) -> setlist_playback::Result<()> {
//! let tracks = TrackQueue::new();
//! tracks.replace(vec![
//!     Track::new("1", "Artist", "Opener", 0),
//!     Track::new("2", "Artist", "Closer", 1),
//! ]);
//!
//! let scheduler = PreloadScheduler::new(tracks.clone(), resolver, 2)?;
//! scheduler.seed(&tracks.snapshot());
//! scheduler.wait_idle().await;
//! # Ok(())
//! # }
//! ```
//!
//! # Example: Driving playback
//!
//! ```rust,no_run
//! use setlist_core::{MemorySettingsStore, Resolver, TrackId, TrackQueue};
//! use setlist_playback::{MediaDevice, PlaybackConfig, PlaybackController};
//! use std::sync::Arc;
//!
//! # async fn example(resolver: Arc<dyn Resolver>, device: Box<dyn MediaDevice>) {
//! let controller = PlaybackController::new(
//!     TrackQueue::new(),
//!     resolver,
//!     Arc::new(MemorySettingsStore::new()),
//!     device,
//!     PlaybackConfig::default(),
//! );
//!
//! controller.toggle(&TrackId::new("1")).await;
//! controller.set_volume(60);
//!
//! for event in controller.drain_events() {
//!     println!("{event:?}");
//! }
//! # }
//! ```

pub mod controller;
pub mod device;
pub mod drag;
pub mod error;
pub mod events;
pub mod preload;
pub mod resolve;
pub mod session;
pub mod types;
pub mod volume;

pub use controller::PlaybackController;
pub use device::{DeviceEvent, MediaDevice, NoopCapture, PointerCapture, StartFuture};
pub use drag::DragSession;
pub use error::{PlaybackError, Result};
pub use events::{Notice, PlaybackEvent};
pub use preload::PreloadScheduler;
pub use resolve::resolve_and_cache;
pub use session::{transition, PlaybackSession, Transition};
pub use types::{
    Advance, ElementBounds, PlaybackConfig, PlaybackSnapshot, PlaybackStatus, PointerEvent, Rewind,
};
pub use volume::{Volume, VOLUME_SETTINGS_KEY};
