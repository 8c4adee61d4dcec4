//! Platform abstraction layer
//!
//! The simulation never talks to a device directly. The loop is wired to
//! three seams instead:
//! - input: polled {left, right, start} booleans, current-state sampling
//! - render: write-only snapshot of the world, once per frame
//! - terminal notifier: the single end-of-session signal
//!
//! The adapters here cover headless runs and tests; a real frontend
//! implements the same traits over its event loop and drawing surface.

use std::collections::VecDeque;

use crate::sim::{GameState, TerminalEvent};

/// Input snapshot for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub start: bool,
}

/// Polled input source; no debouncing or queuing beyond current-state
/// sampling.
pub trait InputSource {
    /// Sample the current input state. Called once per frame.
    fn poll(&mut self) -> InputState;
}

/// Write-only view of the world.
pub trait RenderSink {
    /// Present the world as it stands before this frame's simulation step.
    fn render(&mut self, state: &GameState);
}

/// Receives the WIN/LOSS signal; invoked exactly once per game.
pub trait TerminalNotifier {
    fn notify(&mut self, event: TerminalEvent);
}

/// Input source that reports the same state every frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedInput(pub InputState);

impl InputSource for FixedInput {
    fn poll(&mut self) -> InputState {
        self.0
    }
}

/// Input source that replays a prepared sequence, then holds the last state.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<InputState>,
    held: InputState,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = InputState>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            held: InputState::default(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> InputState {
        if let Some(next) = self.frames.pop_front() {
            self.held = next;
        }
        self.held
    }
}

/// Render sink that discards every frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRender;

impl RenderSink for NullRender {
    fn render(&mut self, _state: &GameState) {}
}

/// Render sink that periodically reports the HUD line through the log
/// facade. Stands in for a drawing surface on headless runs.
#[derive(Debug, Clone)]
pub struct HudLog {
    every: u64,
    frames: u64,
}

impl HudLog {
    /// Log one HUD line every `every` frames.
    pub fn every(every: u64) -> Self {
        Self {
            every: every.max(1),
            frames: 0,
        }
    }
}

impl RenderSink for HudLog {
    fn render(&mut self, state: &GameState) {
        if self.frames % self.every == 0 {
            log::info!(
                "tick {}: score {} lives {} balls {} items {}",
                state.time_ticks,
                state.score,
                state.lives,
                state.balls.len(),
                state.items.len()
            );
        }
        self.frames += 1;
    }
}

/// Notifier that reports the outcome through the log facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl TerminalNotifier for LogNotifier {
    fn notify(&mut self, event: TerminalEvent) {
        match event {
            TerminalEvent::Won => log::info!("session over: WIN"),
            TerminalEvent::Lost => log::info!("session over: LOSS"),
        }
    }
}
