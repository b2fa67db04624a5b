use std::time::{Duration, Instant};

/// A fixed point in monotonic time that a search phase must stop by.
/// Wraps `Instant` rather than a raw float so deadlines can't drift across
/// `SystemTime` adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline(Instant);

impl Deadline {
    pub fn after_secs(secs: f64) -> Self {
        Deadline(Instant::now() + secs_to_duration(secs))
    }

    pub fn at(instant: Instant) -> Self {
        Deadline(instant)
    }

    pub fn instant(&self) -> Instant {
        self.0
    }

    pub fn has_passed(&self) -> bool {
        Instant::now() >= self.0
    }

    pub fn remaining_secs(&self) -> f64 {
        self.0.saturating_duration_since(Instant::now()).as_secs_f64()
    }

    /// A deadline `secs` earlier than this one, clamped to not precede now.
    pub fn minus_secs(&self, secs: f64) -> Self {
        let back = secs_to_duration(secs);
        let floor = Instant::now();
        Deadline(self.0.checked_sub(back).filter(|t| *t >= floor).unwrap_or(floor))
    }
}

fn secs_to_duration(secs: f64) -> Duration {
    Duration::from_secs_f64(secs.max(0.0))
}
