//! Animation tick scheduler (§4.9, C10).
//!
//! Shaped like the teacher's `TickEventSource` but deliberately inert: it
//! carries no task of its own. The reference runtime inspects `interval()`
//! and `is_enabled()` to decide whether to arm a timer; the engine only
//! ever records the instant a tick message carried, so it never spawns
//! anything and stays free of any executor dependency.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationTicker {
    enabled: bool,
    interval: Duration,
}

impl AnimationTicker {
    pub fn new(interval: Duration) -> Self {
        Self {
            enabled: true,
            interval,
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            interval: Duration::from_millis(250),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }
}

impl Default for AnimationTicker {
    fn default() -> Self {
        Self::new(Duration::from_millis(250))
    }
}

/// Last `AnimationTick` instant observed, if any. Kept separate from
/// `AnimationTicker` since the ticker is static configuration and this is
/// runtime state the engine updates on every `Msg::AnimationTick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickState {
    pub last_tick: Option<Instant>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_ticker_reports_disabled() {
        let ticker = AnimationTicker::disabled();
        assert!(!ticker.is_enabled());
    }

    #[test]
    fn set_enabled_toggles() {
        let mut ticker = AnimationTicker::default();
        ticker.set_enabled(false);
        assert!(!ticker.is_enabled());
    }
}
