//! Cooperative game loop
//!
//! One `frame()` per external scheduler tick: poll the input snapshot,
//! present the pre-tick state to the render sink, then advance the
//! simulation. A terminal event is forwarded to the notifier exactly once,
//! after which the loop reports that scheduling should stop. Restarting
//! means constructing a fresh `Game` - terminal states are never reset in
//! place.

use crate::platform::{InputSource, RenderSink, TerminalNotifier};
use crate::sim::{GameState, TerminalEvent, TickInput, tick};

/// Whether the external scheduler should keep ticking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Stop,
}

/// The game loop: exclusive owner of the world, wired to injected
/// input/render/notifier collaborators.
pub struct Game<I, R, N> {
    state: GameState,
    input: I,
    render: R,
    notifier: N,
    /// Demo mode, passed through to the tick
    pub autopilot: bool,
    outcome: Option<TerminalEvent>,
}

impl<I: InputSource, R: RenderSink, N: TerminalNotifier> Game<I, R, N> {
    pub fn new(state: GameState, input: I, render: R, notifier: N) -> Self {
        Self {
            state,
            input,
            render,
            notifier,
            autopilot: false,
            outcome: None,
        }
    }

    /// Read-only view of the world.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The terminal event, once one has fired.
    pub fn outcome(&self) -> Option<TerminalEvent> {
        self.outcome
    }

    /// Run one scheduled frame.
    ///
    /// The render sink sees the state *before* this frame's motion is
    /// applied; the first frame after a terminal event neither renders nor
    /// ticks.
    pub fn frame(&mut self) -> FrameOutcome {
        if self.state.phase.is_terminal() {
            return FrameOutcome::Stop;
        }

        let sample = self.input.poll();
        self.render.render(&self.state);

        let input = TickInput {
            left: sample.left,
            right: sample.right,
            start: sample.start,
            autopilot: self.autopilot,
        };
        if let Some(event) = tick(&mut self.state, &input) {
            self.outcome = Some(event);
            self.notifier.notify(event);
            return FrameOutcome::Stop;
        }
        FrameOutcome::Continue
    }

    /// Drive frames until a terminal event fires or the budget runs out.
    pub fn run(&mut self, max_frames: u64) -> Option<TerminalEvent> {
        for _ in 0..max_frames {
            if self.frame() == FrameOutcome::Stop {
                break;
            }
        }
        self.outcome
    }
}
