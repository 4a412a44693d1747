/// Logging setup for hosts embedding the player
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "set_player=info,setlist_playback=info,setlist_resolver=info";

/// Install the global `tracing` subscriber
///
/// Honours `RUST_LOG` and falls back to `default_filter`. Returns `false` when
/// a subscriber was already installed.
pub fn init_logging(default_filter: &str) -> bool {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}
