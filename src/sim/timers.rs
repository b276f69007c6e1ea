//! Deterministic periodic timers
//!
//! Replaces engine-provided timer events with a polled, tick-counted set so
//! tests can drive time with a fake clock. Handles stay valid for the life
//! of the set; a reset timer re-arms from its full period and can never
//! double-fire stale callbacks.

/// Handle to a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerId(usize);

#[derive(Debug, Clone)]
struct Timer {
    period: u32,
    remaining: u32,
    repeating: bool,
    paused: bool,
    armed: bool,
}

/// A set of tick-counted timers advanced in lockstep with the simulation
#[derive(Debug, Default)]
pub struct Timers {
    timers: Vec<Timer>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a timer that fires after `period_ticks` sim ticks.
    /// Repeating timers re-arm from the full period on every fire.
    pub fn schedule(&mut self, period_ticks: u32, repeating: bool) -> TimerId {
        let period = period_ticks.max(1);
        self.timers.push(Timer {
            period,
            remaining: period,
            repeating,
            paused: false,
            armed: true,
        });
        TimerId(self.timers.len() - 1)
    }

    /// Stop the timer from firing; remaining time is preserved.
    pub fn pause(&mut self, id: TimerId) {
        self.timers[id.0].paused = true;
    }

    /// Continue counting down from where the timer was paused.
    pub fn resume(&mut self, id: TimerId) {
        self.timers[id.0].paused = false;
    }

    /// Pause every timer in the set (game over / offer stall).
    pub fn pause_all(&mut self) {
        for timer in &mut self.timers {
            timer.paused = true;
        }
    }

    /// Re-arm the timer from a full `period_ticks` and unpause it.
    pub fn reset(&mut self, id: TimerId, period_ticks: u32) {
        let timer = &mut self.timers[id.0];
        timer.period = period_ticks.max(1);
        timer.remaining = timer.period;
        timer.paused = false;
        timer.armed = true;
    }

    pub fn is_paused(&self, id: TimerId) -> bool {
        self.timers[id.0].paused
    }

    /// Advance the set by one sim tick. Returns the timers that fired,
    /// in schedule order.
    pub fn tick(&mut self) -> Vec<TimerId> {
        let mut fired = Vec::new();
        for (i, timer) in self.timers.iter_mut().enumerate() {
            if timer.paused || !timer.armed {
                continue;
            }
            timer.remaining -= 1;
            if timer.remaining == 0 {
                fired.push(TimerId(i));
                if timer.repeating {
                    timer.remaining = timer.period;
                } else {
                    timer.armed = false;
                }
            }
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fire_counts(timers: &mut Timers, id: TimerId, ticks: u32) -> u32 {
        let mut count = 0;
        for _ in 0..ticks {
            if timers.tick().contains(&id) {
                count += 1;
            }
        }
        count
    }

    #[test]
    fn test_repeating_fires_on_period() {
        let mut timers = Timers::new();
        let id = timers.schedule(3, true);

        assert!(timers.tick().is_empty());
        assert!(timers.tick().is_empty());
        assert_eq!(timers.tick(), vec![id]);
        // Re-armed from full period
        assert!(timers.tick().is_empty());
        assert!(timers.tick().is_empty());
        assert_eq!(timers.tick(), vec![id]);
    }

    #[test]
    fn test_one_shot_fires_once() {
        let mut timers = Timers::new();
        let id = timers.schedule(2, false);
        assert_eq!(fire_counts(&mut timers, id, 10), 1);
    }

    #[test]
    fn test_pause_preserves_remaining() {
        let mut timers = Timers::new();
        let id = timers.schedule(5, true);

        assert_eq!(fire_counts(&mut timers, id, 3), 0);
        timers.pause(id);
        assert!(timers.is_paused(id));
        assert_eq!(fire_counts(&mut timers, id, 100), 0);
        timers.resume(id);
        // 2 ticks were left before the pause
        assert!(timers.tick().is_empty());
        assert_eq!(timers.tick(), vec![id]);
    }

    #[test]
    fn test_reset_rearms_from_full() {
        let mut timers = Timers::new();
        let id = timers.schedule(4, true);

        assert_eq!(fire_counts(&mut timers, id, 3), 0);
        timers.reset(id, 4);
        // Full period again, no carry-over from the first countdown
        assert_eq!(fire_counts(&mut timers, id, 3), 0);
        assert_eq!(timers.tick(), vec![id]);
    }

    #[test]
    fn test_reset_unpauses_without_double_fire() {
        let mut timers = Timers::new();
        let id = timers.schedule(2, true);
        timers.pause(id);
        timers.reset(id, 2);

        assert!(!timers.is_paused(id));
        assert_eq!(fire_counts(&mut timers, id, 4), 2);
    }

    #[test]
    fn test_independent_timers() {
        let mut timers = Timers::new();
        let fast = timers.schedule(1, true);
        let slow = timers.schedule(3, true);

        assert_eq!(timers.tick(), vec![fast]);
        assert_eq!(timers.tick(), vec![fast]);
        assert_eq!(timers.tick(), vec![fast, slow]);
    }
}
