/// Countdown state for a single summoner spell slot.
///
/// Invariants:
/// - `remaining <= base_cooldown` immediately after `activate()`
/// - `remaining` never underflows; `deduct` saturates at zero
/// - `remaining` is non-increasing while running except via `activate()`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpellTimer {
    name: String,
    base_cooldown: u32,
    remaining: u32,
}

impl SpellTimer {
    /// Create an idle timer with the given base cooldown in seconds.
    pub fn new(name: impl Into<String>, base_cooldown: u32) -> Self {
        Self {
            name: name.into(),
            base_cooldown,
            remaining: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_cooldown(&self) -> u32 {
        self.base_cooldown
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Whether a countdown is in flight.
    pub fn is_running(&self) -> bool {
        self.remaining > 0
    }

    /// Fraction of the cooldown still remaining, in `[0.0, 1.0]`.
    ///
    /// Used by the overlay for the darkening fill height.
    pub fn fraction_remaining(&self) -> f32 {
        if self.base_cooldown == 0 {
            return 0.0;
        }
        (self.remaining as f32 / self.base_cooldown as f32).clamp(0.0, 1.0)
    }

    /// Start (or restart) the full cooldown. Valid in any state; an
    /// in-progress countdown is overwritten.
    pub fn activate(&mut self) {
        self.remaining = self.base_cooldown;
    }

    /// Advance the countdown by one second. No-op when idle.
    pub fn tick(&mut self) {
        if self.remaining > 0 {
            self.remaining -= 1;
        }
    }

    /// Subtract `secs` from the countdown, clamped at zero.
    pub fn deduct(&mut self, secs: u32) {
        self.remaining = self.remaining.saturating_sub(secs);
    }

    /// Stop the countdown and mark the spell available.
    pub fn reset(&mut self) {
        self.remaining = 0;
    }

    /// Accept an authoritative base cooldown, but only while idle.
    ///
    /// A running countdown reflects what the user (or the feed) observed at
    /// activation time; overwriting its denominator mid-flight would corrupt
    /// both the fill fraction and the re-arm duration. Returns whether the
    /// update was applied.
    pub fn update_base_cooldown(&mut self, new_value: u32) -> bool {
        if self.remaining == 0 {
            self.base_cooldown = new_value;
            true
        } else {
            false
        }
    }
}
