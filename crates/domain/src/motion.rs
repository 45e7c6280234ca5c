//! Motion debouncer: turns a noisy PIR signal into a sustained-motion count.

/// Counter that rises by one on every cycle with motion and falls by one on
/// every cycle without, never going below zero.
///
/// A cycle where the motion sensor could not be read leaves the counter
/// untouched: an unknown reading is neither evidence of motion nor of its
/// absence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MotionDebouncer {
    count: u32,
    cap: Option<u32>,
}

impl MotionDebouncer {
    /// Create a debouncer starting at zero with no upper bound.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a debouncer whose counter never exceeds `cap`.
    ///
    /// The cap only shortens how long motion keeps counting after it stops;
    /// callers must keep it at or above the trigger threshold.
    #[must_use]
    pub fn with_cap(cap: u32) -> Self {
        Self {
            count: 0,
            cap: Some(cap),
        }
    }

    /// Current counter value.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Fold one cycle's motion result into the counter and return the new value.
    pub fn update(&mut self, motion: Option<bool>) -> u32 {
        match motion {
            Some(true) => {
                let next = self.count.saturating_add(1);
                self.count = self.cap.map_or(next, |cap| next.min(cap));
            }
            Some(false) => self.count = self.count.saturating_sub(1),
            None => {}
        }
        self.count
    }

    /// Whether the counter has reached `threshold`.
    #[must_use]
    pub fn is_sustained(&self, threshold: u32) -> bool {
        self.count >= threshold
    }
}
