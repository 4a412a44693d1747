//! Set Player Core
//!
//! Platform-agnostic core types, traits, and error handling for Set Player.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `TrackId`
//! - **Track Queue**: `TrackQueue`, the ordered, id-indexed list of the open set
//!   with a generation token that changes whenever the set is replaced
//! - **Collaborator Traits**: `Resolver` (query to playable URL) and
//!   `SettingsStore` (persisted key-value settings)
//! - **Error Handling**: Unified `SetlistError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use setlist_core::{Track, TrackId, TrackQueue};
//!
//! let queue = TrackQueue::new();
//! let generation = queue.replace(vec![
//!     Track::new("1", "Floating Points", "Silhouettes", 1),
//!     Track::new("2", "Four Tet", "Baby", 2),
//! ]);
//!
//! queue.store_url(&TrackId::new("1"), "https://cdn.example/1.m4a", generation);
//! assert!(queue.cached_url(&TrackId::new("1")).is_some());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod storage;
pub mod track_queue;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{Result, SetlistError};
pub use storage::{JsonSettingsStore, MemorySettingsStore};
pub use track_queue::{Generation, StoreOutcome, TrackQueue};
pub use traits::{Resolver, SettingsStore};
pub use types::{Track, TrackId};
