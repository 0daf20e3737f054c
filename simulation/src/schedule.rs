//! Virtual clock multiplexing the state tick and the animation frame timers.

use std::time::Duration;

/// Work that falls due on the schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Advance the simulation by one tick.
    Tick,
    /// Advance cosmetic animation stages and redraw.
    Frame,
}

/// Two fixed-interval timers merged into a single ordered stream.
///
/// Times are offsets from the start of the run. When both timers fall due at
/// the same instant the tick runs first.
#[derive(Clone, Debug)]
pub struct Schedule {
    tick_interval: Duration,
    frame_interval: Duration,
    next_tick: Duration,
    next_frame: Duration,
}

impl Schedule {
    /// Creates a schedule whose first tick and frame fall due one interval in.
    ///
    /// Zero intervals are raised to one millisecond.
    #[must_use]
    pub fn new(tick_interval: Duration, frame_interval: Duration) -> Self {
        let tick_interval = tick_interval.max(Duration::from_millis(1));
        let frame_interval = frame_interval.max(Duration::from_millis(1));
        Self {
            tick_interval,
            frame_interval,
            next_tick: tick_interval,
            next_frame: frame_interval,
        }
    }

    /// Pops the earliest due phase together with its offset from the start.
    pub fn next_due(&mut self) -> (Duration, Phase) {
        if self.next_tick <= self.next_frame {
            let due = self.next_tick;
            self.next_tick += self.tick_interval;
            (due, Phase::Tick)
        } else {
            let due = self.next_frame;
            self.next_frame += self.frame_interval;
            (due, Phase::Frame)
        }
    }
}
