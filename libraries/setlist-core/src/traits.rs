/// Collaborator traits for Set Player
use crate::error::Result;
use async_trait::async_trait;

/// URL resolver
///
/// Turns a track's descriptive query ("artist - title") into a playable URL.
/// Implementations own their own latency bounds; the playback core never
/// imposes a timeout.
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Resolve `query` to a playable URL
    ///
    /// # Errors
    /// Returns an error if no playable source could be found
    async fn resolve(&self, query: &str) -> Result<String>;
}

/// Persisted key-value settings
///
/// Used for the small amount of state that outlives a session (last volume).
pub trait SettingsStore: Send + Sync {
    /// Read a value; missing or unreadable entries read as `None`
    fn load(&self, key: &str) -> Option<String>;

    /// Write a value
    ///
    /// # Errors
    /// Returns an error if the value could not be persisted
    fn save(&self, key: &str, value: &str) -> Result<()>;
}
