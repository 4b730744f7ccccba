//! Session-scoped state: one viewer's mode, sliders and animations

use crate::animation::{AnimationState, Tick};
use crate::error::Result;
use crate::fibonacci::FibonacciPlan;
use crate::mode::{ModeParams, ViewMode, MIN_ROWS};
use crate::render::{render_frame, Frame, RenderInput};
use crate::triangle::{Triangle, MAX_ROWS};
use std::time::Duration;

/// User actions routed through a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SelectMode(ViewMode),
    Start,
    Pause,
    Reset,
    /// Nudge the mode's main slider
    AdjustPrimary(i32),
    /// Nudge the mode's second slider
    AdjustSecondary(i32),
    /// Grow or shrink the base triangle
    AdjustRows(i32),
}

pub struct Session {
    base: Triangle,
    plan: FibonacciPlan,
    /// Fractal triangle, rebuilt when the fractal row count changes
    fractal_triangle: Triangle,
    mode: ViewMode,
    params: ModeParams,
    fibonacci: AnimationState,
    fractal: AnimationState,
}

impl Session {
    pub fn new(rows: usize, mode: ViewMode, mut params: ModeParams) -> Result<Self> {
        let base = Triangle::build(rows)?;
        let plan = FibonacciPlan::plan(&base);
        let fractal = AnimationState::fractal();
        let fractal_triangle = Triangle::build(fractal.counter())?;
        params.fit_to(rows);

        tracing::debug!(rows, ?mode, "session created");
        Ok(Self {
            fibonacci: AnimationState::fibonacci(plan.len()),
            base,
            plan,
            fractal_triangle,
            mode,
            params,
            fractal,
        })
    }

    pub fn rows(&self) -> usize {
        self.base.len()
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn params(&self) -> &ModeParams {
        &self.params
    }

    pub fn base(&self) -> &Triangle {
        &self.base
    }

    pub fn plan(&self) -> &FibonacciPlan {
        &self.plan
    }

    pub fn fibonacci(&self) -> &AnimationState {
        &self.fibonacci
    }

    pub fn fractal(&self) -> &AnimationState {
        &self.fractal
    }

    /// Triangle drawn for the current mode
    pub fn display_triangle(&self) -> &Triangle {
        match self.mode {
            ViewMode::Fractal => &self.fractal_triangle,
            _ => &self.base,
        }
    }

    /// Animation driven by the current mode, if it has one
    pub fn active_animation(&self) -> Option<&AnimationState> {
        match self.mode {
            ViewMode::Fibonacci => Some(&self.fibonacci),
            ViewMode::Fractal => Some(&self.fractal),
            _ => None,
        }
    }

    /// Rebuild the base triangle and its diagonals for a new row count
    pub fn set_rows(&mut self, rows: usize) -> Result<()> {
        if rows == self.base.len() {
            return Ok(());
        }
        self.base = Triangle::build(rows)?;
        self.plan = FibonacciPlan::plan(&self.base);
        self.fibonacci = self.fibonacci.with_max(self.plan.len());
        self.params.fit_to(rows);
        tracing::debug!(rows, "base triangle rebuilt");
        Ok(())
    }

    /// Apply an action. Returns true when the view changed.
    pub fn apply(&mut self, action: Action) -> bool {
        let rows = self.rows();
        match action {
            Action::SelectMode(mode) => {
                if mode == self.mode {
                    return false;
                }
                tracing::debug!(from = ?self.mode, to = ?mode, "mode selected");
                self.mode = mode;
                self.params.reset_for(mode, rows);
                true
            }
            Action::Start => self.update_animation(AnimationState::start),
            Action::Pause => self.update_animation(|state, _| state.pause()),
            Action::Reset => self.update_animation(|state, _| state.reset()),
            Action::AdjustPrimary(delta) => {
                let before = self.params.clone();
                self.params.adjust_primary(self.mode, delta, rows);
                before != self.params
            }
            Action::AdjustSecondary(delta) => {
                let before = self.params.clone();
                self.params.adjust_secondary(self.mode, delta, rows);
                before != self.params
            }
            Action::AdjustRows(delta) => {
                let target = (rows as i64 + delta as i64).clamp(MIN_ROWS as i64, MAX_ROWS as i64);
                let target = target as usize;
                if target == rows {
                    return false;
                }
                match self.set_rows(target) {
                    Ok(()) => true,
                    Err(err) => {
                        tracing::warn!(rows = target, %err, "row count unchanged");
                        false
                    }
                }
            }
        }
    }

    fn update_animation(&mut self, f: fn(AnimationState, Duration) -> Tick) -> bool {
        let fib_delay = self.params.fibonacci_delay();
        let Some(slot) = self.active_animation_mut() else {
            return false;
        };
        let tick = f(*slot, fib_delay);
        *slot = tick.state;
        if tick.redraw {
            self.sync_fractal_triangle();
        }
        tick.redraw
    }

    fn active_animation_mut(&mut self) -> Option<&mut AnimationState> {
        match self.mode {
            ViewMode::Fibonacci => Some(&mut self.fibonacci),
            ViewMode::Fractal => Some(&mut self.fractal),
            _ => None,
        }
    }

    /// Advance the current mode's animation by one tick
    pub fn tick(&mut self) -> Option<Tick> {
        let fib_delay = self.params.fibonacci_delay();
        let slot = self.active_animation_mut()?;
        let tick = slot.tick(fib_delay);
        *slot = tick.state;
        self.sync_fractal_triangle();
        Some(tick)
    }

    /// Delay before the next tick if the active animation is playing
    pub fn tick_delay(&self) -> Option<Duration> {
        self.active_animation()
            .filter(|anim| anim.is_playing())
            .map(|anim| anim.kind().delay(self.params.fibonacci_delay()))
    }

    fn sync_fractal_triangle(&mut self) {
        let rows = self.fractal.counter();
        if rows == self.fractal_triangle.len() {
            return;
        }
        match Triangle::build(rows) {
            Ok(tri) => self.fractal_triangle = tri,
            Err(err) => tracing::warn!(rows, %err, "fractal triangle not rebuilt"),
        }
    }

    pub fn frame(&self) -> Frame {
        render_frame(&RenderInput {
            triangle: self.display_triangle(),
            base: &self.base,
            plan: &self.plan,
            mode: self.mode,
            params: &self.params,
            fibonacci: &self.fibonacci,
            fractal: &self.fractal,
        })
    }
}
