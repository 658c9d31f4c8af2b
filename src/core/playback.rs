//! Play/pause auto-advance.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Playback {
    playing: bool,
    interval: Duration,
    elapsed: Duration,
}

impl Playback {
    pub fn new(interval: Duration) -> Self {
        Self {
            playing: false,
            interval,
            elapsed: Duration::ZERO,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Flip between playing and paused. Returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.playing = !self.playing;
        self.elapsed = Duration::ZERO;
        self.playing
    }

    pub fn stop(&mut self) {
        self.playing = false;
        self.elapsed = Duration::ZERO;
    }

    /// Restart the countdown, e.g. after a manual step change.
    pub fn restart_interval(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    /// Advance the clock by `dt`. Returns `true` when it is time to move to
    /// the next step. If `can_advance` is false playback stops instead.
    pub fn on_tick(&mut self, dt: Duration, can_advance: bool) -> bool {
        if !self.playing {
            return false;
        }
        if !can_advance {
            self.stop();
            return false;
        }
        self.elapsed += dt;
        if self.elapsed >= self.interval {
            self.elapsed = Duration::ZERO;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(50);

    #[test]
    fn test_paused_never_fires() {
        let mut p = Playback::new(Duration::from_millis(100));
        for _ in 0..10 {
            assert!(!p.on_tick(TICK, true));
        }
    }

    #[test]
    fn test_fires_once_per_interval() {
        let mut p = Playback::new(Duration::from_millis(100));
        assert!(p.toggle());
        assert!(!p.on_tick(TICK, true));
        assert!(p.on_tick(TICK, true));
        assert!(!p.on_tick(TICK, true));
        assert!(p.on_tick(TICK, true));
    }

    #[test]
    fn test_stops_at_end() {
        let mut p = Playback::new(Duration::from_millis(100));
        p.toggle();
        assert!(!p.on_tick(TICK, false));
        assert!(!p.is_playing());
    }

    #[test]
    fn test_restart_interval() {
        let mut p = Playback::new(Duration::from_millis(100));
        p.toggle();
        p.on_tick(TICK, true);
        p.restart_interval();
        assert!(!p.on_tick(TICK, true));
        assert!(p.on_tick(TICK, true));
    }

    #[test]
    fn test_toggle_twice_pauses() {
        let mut p = Playback::new(Duration::from_secs(3));
        assert!(p.toggle());
        assert!(!p.toggle());
        assert!(!p.is_playing());
    }
}
