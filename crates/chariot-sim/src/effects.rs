//! Timed global effects owned by the engine.

use chariot_core::events::GameEvent;
use chariot_rules::upgrades::SlowTimeParams;

/// Active Slow Time window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlowTime {
    pub factor: f64,
    pub expires_at_ms: f64,
}

/// Effects that outlive a single tick. At most one Slow Time is active; a new
/// trigger replaces it, so the most recent trigger alone decides expiry.
#[derive(Debug, Clone, Default)]
pub struct ActiveEffects {
    slow_time: Option<SlowTime>,
}

impl ActiveEffects {
    pub fn trigger_slow_time(&mut self, params: SlowTimeParams, now_ms: f64) -> GameEvent {
        self.slow_time = Some(SlowTime {
            factor: params.factor,
            expires_at_ms: now_ms + params.duration_ms,
        });
        GameEvent::SlowTimeStarted {
            factor: params.factor,
            duration_ms: params.duration_ms,
        }
    }

    /// Enemy speed multiplier, 1.0 without Slow Time.
    pub fn slow_factor(&self) -> f64 {
        self.slow_time.map_or(1.0, |s| s.factor)
    }

    pub fn slow_time(&self) -> Option<SlowTime> {
        self.slow_time
    }

    /// Drop expired effects, reporting the end of Slow Time.
    pub fn expire(&mut self, now_ms: f64) -> Option<GameEvent> {
        match self.slow_time {
            Some(s) if now_ms >= s.expires_at_ms => {
                self.slow_time = None;
                Some(GameEvent::SlowTimeEnded)
            }
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.slow_time = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVEL_ONE: SlowTimeParams = SlowTimeParams {
        factor: 0.3,
        duration_ms: 2000.0,
    };

    #[test]
    fn test_slow_time_expires() {
        let mut effects = ActiveEffects::default();
        assert_eq!(effects.slow_factor(), 1.0);
        effects.trigger_slow_time(LEVEL_ONE, 1000.0);
        assert_eq!(effects.slow_factor(), 0.3);
        assert!(effects.expire(2999.0).is_none());
        assert!(matches!(effects.expire(3000.0), Some(GameEvent::SlowTimeEnded)));
        assert_eq!(effects.slow_factor(), 1.0);
        assert!(effects.expire(4000.0).is_none());
    }

    #[test]
    fn test_retrigger_replaces_timer() {
        let mut effects = ActiveEffects::default();
        effects.trigger_slow_time(LEVEL_ONE, 0.0);
        let stronger = SlowTimeParams {
            factor: 0.15,
            duration_ms: 3000.0,
        };
        effects.trigger_slow_time(stronger, 1500.0);
        // The first window would have closed at 2000 ms.
        assert!(effects.expire(2500.0).is_none());
        assert_eq!(effects.slow_factor(), 0.15);
        assert_eq!(effects.slow_time().map(|s| s.expires_at_ms), Some(4500.0));
    }
}
