//! Volume control with logarithmic scaling
//!
//! Provides human-perceptual volume control using dB scaling.
//! Volume range is 0-100%, mapped to -60 dB to 0 dB internally; the device
//! receives the resulting linear gain.

/// Settings key the last-used level is persisted under
pub const VOLUME_SETTINGS_KEY: &str = "volume";

/// Volume controller with logarithmic scaling
///
/// 0% = silence, 1% = -60 dB, 100% = 0 dB (unity gain)
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    /// Volume level (0-100)
    level: u8,

    /// Mute state (preserves volume level)
    muted: bool,

    /// Cached linear gain multiplier
    linear_gain: f32,
}

impl Volume {
    /// Create new volume controller
    ///
    /// # Arguments
    /// * `level` - Initial volume (0-100, clamped)
    pub fn new(level: u8) -> Self {
        let level = level.min(100);

        Self {
            level,
            muted: false,
            linear_gain: Self::calculate_linear_gain(level),
        }
    }

    /// Parse a persisted level
    ///
    /// Accepts integer percentages ("35") as well as the fractional form
    /// browsers store for media elements ("0.35"). Anything else is rejected.
    pub fn parse_persisted(raw: &str) -> Option<Self> {
        let raw = raw.trim();

        if let Ok(level) = raw.parse::<u8>() {
            return (level <= 100).then(|| Self::new(level));
        }

        let fraction = raw.parse::<f64>().ok()?;
        if fraction.is_finite() && (0.0..=1.0).contains(&fraction) {
            Some(Self::new((fraction * 100.0).round() as u8))
        } else {
            None
        }
    }

    /// Set volume level (0-100)
    pub fn set_level(&mut self, level: u8) {
        self.level = level.min(100);
        self.linear_gain = Self::calculate_linear_gain(self.level);
    }

    /// Get current volume level (0-100)
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Mute audio (preserves volume level)
    pub fn mute(&mut self) {
        self.muted = true;
    }

    /// Unmute audio (restores previous volume)
    pub fn unmute(&mut self) {
        self.muted = false;
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Linear gain handed to the playback device
    ///
    /// Returns 0.0 if muted, otherwise logarithmic gain based on level
    pub fn gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.linear_gain
        }
    }

    /// Convert volume percentage to linear gain
    ///
    /// Formula: gain = 10^((level% - 100) * 0.6 / 20)
    /// - 0%   → silence
    /// - 50%  → -30 dB → 0.0316 gain
    /// - 80%  → -12 dB → 0.251 gain (default)
    /// - 100% →   0 dB → 1.0 gain (unity)
    fn calculate_linear_gain(level: u8) -> f32 {
        if level == 0 {
            return 0.0;
        }

        let db = (f32::from(level) - 100.0) * 0.6;
        10.0_f32.powf(db / 20.0)
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(80)
    }
}
