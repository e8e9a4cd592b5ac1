use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use crate::config::TimingConfig;

/// Cosmetic loading-bar animation. It is not tied to transferred bytes:
/// every tick adds a fixed step and the value never exceeds the ceiling.
/// Cancelling the token freezes it for good.
#[derive(Debug)]
pub struct ProgressAnimation {
    token: CancellationToken,
    percent: u8,
    next_tick: Instant,
    tick: Duration,
    step: u8,
    ceiling: u8,
}

impl ProgressAnimation {
    pub fn start(now: Instant, timing: &TimingConfig) -> Self {
        let tick = timing.progress_tick();
        Self {
            token: CancellationToken::new(),
            percent: 0,
            next_tick: now + tick,
            tick,
            step: timing.progress_step_percent,
            ceiling: timing.progress_ceiling_percent,
        }
    }

    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    /// Next instant `advance` would change anything, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        if self.is_cancelled() || self.percent >= self.ceiling {
            None
        } else {
            Some(self.next_tick)
        }
    }

    /// Apply every tick due by `now`. Returns the new percent when it changed.
    pub fn advance(&mut self, now: Instant) -> Option<u8> {
        let before = self.percent;
        while !self.is_cancelled() && now >= self.next_tick && self.percent < self.ceiling {
            self.percent = self.percent.saturating_add(self.step).min(self.ceiling);
            self.next_tick += self.tick;
        }
        (self.percent != before).then_some(self.percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_by_step_per_tick() {
        let t0 = Instant::now();
        let mut anim = ProgressAnimation::start(t0, &TimingConfig::default());
        assert_eq!(anim.advance(t0), None);
        assert_eq!(anim.advance(t0 + Duration::from_millis(100)), Some(5));
        assert_eq!(anim.advance(t0 + Duration::from_millis(350)), Some(15));
    }

    #[test]
    fn stops_at_ceiling() {
        let t0 = Instant::now();
        let mut anim = ProgressAnimation::start(t0, &TimingConfig::default());
        assert_eq!(anim.advance(t0 + Duration::from_secs(60)), Some(90));
        assert_eq!(anim.advance(t0 + Duration::from_secs(120)), None);
        assert_eq!(anim.next_deadline(), None);
    }

    #[test]
    fn cancelled_animation_is_frozen() {
        let t0 = Instant::now();
        let mut anim = ProgressAnimation::start(t0, &TimingConfig::default());
        anim.advance(t0 + Duration::from_millis(200));
        anim.token().cancel();
        assert_eq!(anim.advance(t0 + Duration::from_secs(5)), None);
        assert_eq!(anim.percent(), 10);
        assert!(anim.next_deadline().is_none());
    }
}
