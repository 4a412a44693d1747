//! Shared resolve-and-cache step
//!
//! Used by both the preload scheduler and the foreground playback path. The
//! step is idempotent: an already cached URL short-circuits, and the write-back
//! is write-once, so a preload and a user request racing on the same track
//! converge on a single cached URL.

use crate::error::{PlaybackError, Result};
use setlist_core::{Generation, Resolver, StoreOutcome, Track, TrackQueue};

/// Produce a playable URL for `track` and cache it in `tracks`
///
/// Order of preference: URL already cached in the queue, URL on the passed
/// track, embedded http(s) source (no network), resolver call. The write-back
/// only lands when `generation` is still the queue's generation; stale or
/// unknown tracks still get their URL returned, just not cached.
pub async fn resolve_and_cache(
    tracks: &TrackQueue,
    resolver: &dyn Resolver,
    track: &Track,
    generation: Generation,
) -> Result<String> {
    if let Some(url) = tracks
        .cached_url(&track.id)
        .or_else(|| track.cached_url.clone())
    {
        return Ok(url);
    }

    let url = if let Some(source) = track.embedded_source() {
        source.to_string()
    } else {
        let query = track.query();
        if query.is_empty() {
            return Err(PlaybackError::EmptyQuery(track.id.clone()));
        }

        resolver
            .resolve(&query)
            .await
            .map_err(|e| PlaybackError::Resolution(e.to_string()))?
    };

    match tracks.store_url(&track.id, url.clone(), generation) {
        StoreOutcome::Stored => {
            tracing::debug!(track_id = %track.id, "Cached resolved URL");
            Ok(url)
        }
        StoreOutcome::AlreadyCached(existing) => Ok(existing),
        StoreOutcome::Stale => {
            tracing::debug!(
                track_id = %track.id,
                generation = generation.value(),
                "Set changed while resolving; result not cached"
            );
            Ok(url)
        }
        StoreOutcome::Missing => Ok(url),
    }
}
