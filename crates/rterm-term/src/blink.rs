//! The monotonic blink clock driving cursor and SGR blink. Lives entirely
//! outside the interpreter: screen state is a pure function of the byte
//! stream, and blink phase is never fed back into it.

use std::time::Duration;

/// Accumulates elapsed wall-clock time and flips a phase bit once every
/// `interval`. An embedder advances this from its own timer; the core never
/// reads the system clock itself.
#[derive(Clone, Copy, Debug)]
pub struct BlinkClock {
    interval: Duration,
    accumulated: Duration,
    phase: bool,
}

impl BlinkClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            accumulated: Duration::ZERO,
            phase: false,
        }
    }

    /// Current blink phase: `true` means blinking cells should render
    /// hidden this frame.
    pub fn phase(&self) -> bool {
        self.phase
    }

    /// Advances the clock by `elapsed`; returns `true` if the phase flipped,
    /// in which case the caller should re-render blinking cells.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        self.accumulated += elapsed;
        let mut flipped = false;
        while self.accumulated >= self.interval {
            self.accumulated -= self.interval;
            self.phase = !self.phase;
            flipped = true;
        }
        flipped
    }
}

impl Default for BlinkClock {
    fn default() -> Self {
        Self::new(Duration::from_millis(400))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flips_once_per_interval() {
        let mut clock = BlinkClock::new(Duration::from_millis(400));
        assert!(!clock.advance(Duration::from_millis(399)));
        assert!(clock.advance(Duration::from_millis(1)));
        assert!(clock.phase());
    }

    #[test]
    fn catches_up_across_multiple_intervals() {
        let mut clock = BlinkClock::new(Duration::from_millis(400));
        let initial_phase = clock.phase();
        assert!(clock.advance(Duration::from_millis(1000)));
        assert_ne!(clock.phase(), initial_phase);
    }
}
