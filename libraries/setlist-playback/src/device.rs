//! Platform-agnostic playback device adapter
//!
//! Abstracts the single physical playback device (an HTML media element in the
//! browser, a native player elsewhere) and the global pointer capture used by
//! drag-seek. The controller is the only caller of these traits.

use crate::error::Result;
use futures_util::future::BoxFuture;

/// Pending outcome of a start request
///
/// Mirrors the promise returned by a media element's `play()`: resolves once
/// playback actually started, or fails if the platform refused (autoplay
/// policy, unsupported source, ...). The future must not borrow the device so
/// the controller can release its lock before awaiting.
pub type StartFuture = BoxFuture<'static, Result<()>>;

/// Platform-agnostic playback device
///
/// Implementors own the platform media handle. Positions and durations are in
/// seconds.
pub trait MediaDevice: Send {
    /// Assign a new source URL (last assignment wins)
    fn set_source(&mut self, url: &str);

    /// Detach the current source
    fn clear_source(&mut self);

    /// Request playback of the assigned source
    fn start(&mut self) -> StartFuture;

    /// Pause playback
    fn pause(&mut self);

    /// Current playback position
    fn position(&self) -> f64;

    /// Move the playback position
    fn set_position(&mut self, seconds: f64);

    /// Total duration, `None` until the source metadata has loaded
    fn duration(&self) -> Option<f64>;

    /// Apply a linear gain (0.0 - 1.0)
    fn set_volume(&mut self, gain: f32);
}

/// Events reported by the device
///
/// Platform glue forwards these to `PlaybackController::handle_device_event`.
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceEvent {
    /// Periodic time update
    TimeAdvance {
        /// Current position in seconds
        current_time: f64,
        /// Duration in seconds, if known
        duration: Option<f64>,
    },

    /// Source played to the end
    Ended,

    /// Decoding or network failure during playback
    Error(String),

    /// Start request accepted; audio is playing
    StartAccepted,

    /// Start request refused
    StartRejected(String),
}

/// Global pointer capture
///
/// While acquired, pointer-move and pointer-release events are delivered
/// regardless of which element is under the pointer.
pub trait PointerCapture: Send {
    /// Attach global move/release listeners
    fn acquire(&mut self);

    /// Detach them again
    fn release(&mut self);
}

/// Capture used when the platform needs no explicit listener management
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCapture;

impl PointerCapture for NoopCapture {
    fn acquire(&mut self) {}

    fn release(&mut self) {}
}
