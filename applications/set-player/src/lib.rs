//! Set Player
//!
//! Client-side media core for a DJ-set library: opening a set preloads a
//! playable URL for every track in the background while the listener browses,
//! and playback commands reuse those URLs (or resolve on demand).
//!
//! # Example
//!
//! ```rust,no_run
//! use set_player::{PlayerConfig, SetPlayer};
//! use setlist_core::{Track, TrackId};
//! # use setlist_playback::MediaDevice;
//!
//! # async fn example(device: Box<dyn MediaDevice>) -> set_player::Result<()> {
//! let config = PlayerConfig::load(Some("config.toml".as_ref()))?;
//! let player = SetPlayer::from_config(&config, device)?;
//!
//! player.open_set(vec![
//!     Track::new("1", "Bicep", "Glue", 0),
//!     Track::new("2", "Bicep", "Apricots", 1),
//! ]);
//!
//! player.toggle(&TrackId::new("1")).await;
//! println!("{:?}", player.status());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod player;

pub use config::{
    PlayerConfig, PlaybackSettings, PreloadSettings, ResolverSettings, StorageSettings,
};
pub use error::{AppError, Result};
pub use logging::{init_logging, DEFAULT_LOG_FILTER};
pub use player::{PlayerStatus, SetPlayer};
