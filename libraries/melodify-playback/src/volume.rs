//! Volume control
//!
//! Linear volume in `[0, 1]`, the scale the audio resource understands.
//! Out-of-range input is clamped rather than rejected; non-finite input is
//! ignored.

/// Volume controller
#[derive(Debug, Clone)]
pub struct Volume {
    /// Volume level in [0, 1]
    level: f32,

    /// Mute state (preserves volume level)
    muted: bool,
}

impl Volume {
    /// Create new volume controller, clamping `level` into range
    pub fn new(level: f32) -> Self {
        let mut volume = Self {
            level: 1.0,
            muted: false,
        };
        volume.set_level(level);
        volume
    }

    /// Set volume level
    ///
    /// Returns false (and leaves the level alone) for NaN or infinite input.
    pub fn set_level(&mut self, level: f32) -> bool {
        if !level.is_finite() {
            return false;
        }
        self.level = level.clamp(0.0, 1.0);
        true
    }

    /// Current volume level in [0, 1]
    pub fn level(&self) -> f32 {
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

    /// Level actually sent to the resource: 0 when muted
    pub fn gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.level
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(0.7)
    }
}
