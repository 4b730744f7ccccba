//! Step counters for the animated views
//!
//! Each animated view owns an [`AnimationState`]. Actions and ticks take the
//! state by value and hand back a [`Tick`] carrying the next state, whether
//! to redraw and when to tick again, so a session never shares a counter
//! with anything else.

use std::time::Duration;

/// Fractal growth starts at this many rows
pub const FRACTAL_START_ROWS: usize = 8;
/// Fractal growth stops at this many rows
pub const FRACTAL_MAX_ROWS: usize = 32;
/// Rows added per fractal tick
pub const FRACTAL_GROWTH: usize = 2;
/// Fixed pause between fractal growth steps
pub const FRACTAL_TICK: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationKind {
    /// Reveals one diagonal per tick
    Fibonacci,
    /// Grows the fractal triangle by two rows per tick
    Fractal,
}

impl AnimationKind {
    /// Counter value at rest
    pub fn initial(self) -> usize {
        match self {
            AnimationKind::Fibonacci => 0,
            AnimationKind::Fractal => FRACTAL_START_ROWS,
        }
    }

    pub fn increment(self) -> usize {
        match self {
            AnimationKind::Fibonacci => 1,
            AnimationKind::Fractal => FRACTAL_GROWTH,
        }
    }

    /// Pause after a tick; the Fibonacci pace is user-controlled
    pub fn delay(self, fibonacci_delay: Duration) -> Duration {
        match self {
            AnimationKind::Fibonacci => fibonacci_delay,
            AnimationKind::Fractal => FRACTAL_TICK,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Playing,
    Finished,
}

/// Counter plus play flag for one animated view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationState {
    kind: AnimationKind,
    counter: usize,
    playing: bool,
    max: usize,
}

/// Outcome of an action or a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub state: AnimationState,
    /// The counter moved and the view should be drawn again
    pub redraw: bool,
    /// How long to wait before the next tick, if another is due
    pub delay: Option<Duration>,
}

impl AnimationState {
    pub fn new(kind: AnimationKind, max: usize) -> Self {
        let max = max.max(kind.initial());
        Self {
            kind,
            counter: kind.initial(),
            playing: false,
            max,
        }
    }

    pub fn fibonacci(diagonals: usize) -> Self {
        Self::new(AnimationKind::Fibonacci, diagonals)
    }

    pub fn fractal() -> Self {
        Self::new(AnimationKind::Fractal, FRACTAL_MAX_ROWS)
    }

    pub fn kind(&self) -> AnimationKind {
        self.kind
    }

    pub fn counter(&self) -> usize {
        self.counter
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn phase(&self) -> Phase {
        if self.playing {
            Phase::Playing
        } else if self.counter >= self.max && self.counter != self.kind.initial() {
            Phase::Finished
        } else {
            Phase::Idle
        }
    }

    /// Begin playing. A Fibonacci counter at 0 jumps to 1 so the first
    /// diagonal shows immediately. A counter already at its maximum stays
    /// put until reset.
    pub fn start(self, fibonacci_delay: Duration) -> Tick {
        let mut next = self;
        if next.counter >= next.max {
            tracing::debug!(kind = ?next.kind, counter = next.counter, "start ignored at max");
            return next.settle(self, None);
        }
        if next.counter == 0 {
            next.counter = 1;
        }
        next.playing = true;
        tracing::debug!(kind = ?next.kind, counter = next.counter, "animation started");
        next.settle(self, Some(next.kind.delay(fibonacci_delay)))
    }

    pub fn pause(self) -> Tick {
        let mut next = self;
        if next.playing {
            tracing::debug!(kind = ?next.kind, counter = next.counter, "animation paused");
        }
        next.playing = false;
        next.settle(self, None)
    }

    pub fn reset(self) -> Tick {
        let mut next = self;
        next.counter = next.kind.initial();
        next.playing = false;
        tracing::debug!(kind = ?next.kind, "animation reset");
        next.settle(self, None)
    }

    /// Package an action's outcome; the view is redrawn whenever the state moved
    fn settle(self, before: Self, delay: Option<Duration>) -> Tick {
        Tick {
            state: self,
            redraw: self != before,
            delay,
        }
    }

    /// Change the upper bound, pulling the counter back inside it
    pub fn with_max(mut self, max: usize) -> Self {
        self.max = max.max(self.kind.initial());
        self.counter = self.counter.min(self.max);
        self
    }

    /// Advance while playing. Reaching the maximum clears the play flag on
    /// the following tick without scheduling another.
    pub fn tick(mut self, fibonacci_delay: Duration) -> Tick {
        if !self.playing {
            return Tick {
                state: self,
                redraw: false,
                delay: None,
            };
        }

        if self.counter < self.max {
            self.counter = (self.counter + self.kind.increment()).min(self.max);
            Tick {
                state: self,
                redraw: true,
                delay: Some(self.kind.delay(fibonacci_delay)),
            }
        } else {
            self.playing = false;
            tracing::debug!(kind = ?self.kind, counter = self.counter, "animation finished");
            Tick {
                state: self,
                redraw: false,
                delay: None,
            }
        }
    }
}
