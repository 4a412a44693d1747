//! Set Player - HTTP URL Resolver
//!
//! [`setlist_core::Resolver`] implementations backed by the backend's
//! resolve-audio endpoint:
//!
//! - [`HttpResolver`] posts the track query and returns the playable URL
//! - [`CachingResolver`] memoises successful results in an LRU cache
//!
//! # Protocol
//!
//! ```text
//! POST {base_url}/api/resolve_audio
//! {"query": "Artist - Title"}
//!
//! 200 {"ok": true, "url": "https://..."}
//! 404 {"ok": false}
//! ```

pub mod cache;
pub mod client;
pub mod error;
pub mod types;

pub use cache::{CachingResolver, DEFAULT_CACHE_SIZE};
pub use client::HttpResolver;
pub use error::{ResolverError, Result};
pub use types::{ResolverConfig, DEFAULT_TIMEOUT, RESOLVE_PATH};
