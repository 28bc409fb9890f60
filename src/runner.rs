//! Session runner
//!
//! Owns the frame loop: read the clock, poll input, tick, render, then wait
//! for the next frame. Runs until the input source asks to quit or the frame
//! limit is hit.

use serde::Serialize;

use crate::platform::{Clock, FramePacer, InputSource};
use crate::renderer::Renderer;
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState, TickOutcome, tick};

/// Final numbers of a finished session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub seed: u64,
    pub frames: u64,
    pub score: u64,
    pub level: u32,
    pub lives: u32,
    pub phase: GamePhase,
    pub games_played: u32,
    /// True when the input source quit, false when the frame limit ended the run
    pub quit: bool,
}

/// One running game session
pub struct Session<C: Clock, I: InputSource, R: Renderer> {
    pub state: GameState,
    clock: C,
    input: I,
    renderer: R,
    pacer: Option<FramePacer>,
    frame_ms: u64,
    frames: u64,
}

impl<C: Clock, I: InputSource, R: Renderer> Session<C, I, R> {
    pub fn new(settings: &Settings, seed: u64, clock: C, input: I, renderer: R) -> Self {
        let now = clock.now_ms();
        Self {
            state: GameState::new(settings, seed, now),
            clock,
            input,
            renderer,
            pacer: None,
            frame_ms: settings.frame_ms(),
            frames: 0,
        }
    }

    /// Sleep between frames to hold the given rate
    pub fn paced(mut self, target_fps: u32) -> Self {
        self.pacer = Some(FramePacer::new(target_fps));
        self
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Run one frame; returns what the tick decided
    pub fn step(&mut self) -> TickOutcome {
        let now = self.clock.now_ms();
        let events = self.input.poll(&self.state, now);
        let outcome = tick(&mut self.state, &events, now);
        if outcome == TickOutcome::Continue {
            self.renderer.render(&self.state, now);
        }
        self.frames += 1;

        if let Some(pacer) = &mut self.pacer {
            pacer.wait();
        }
        self.clock.advance_frame(self.frame_ms);
        outcome
    }

    /// Run until quit, or until `max_frames` frames when given
    pub fn run(&mut self, max_frames: Option<u64>) -> SessionSummary {
        let mut quit = false;
        while max_frames.is_none_or(|max| self.frames < max) {
            if self.step() == TickOutcome::Quit {
                quit = true;
                break;
            }
        }

        let summary = self.summary(quit);
        log::info!(
            "Session finished after {} frames: score={} level={} games={}",
            summary.frames,
            summary.score,
            summary.level,
            summary.games_played
        );
        summary
    }

    pub fn summary(&self, quit: bool) -> SessionSummary {
        let session = &self.state.session;
        SessionSummary {
            seed: self.state.seed,
            frames: self.frames,
            score: session.score,
            level: session.level,
            lives: session.lives,
            phase: session.phase,
            games_played: session.games_played,
            quit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{Autopilot, ManualClock, ScriptedInput};
    use crate::renderer::HeadlessRenderer;
    use crate::sim::InputEvent;

    #[test]
    fn test_frame_limit() {
        let settings = Settings::default();
        let mut session = Session::new(
            &settings,
            7,
            ManualClock::new(0),
            ScriptedInput::default(),
            HeadlessRenderer::new(),
        );
        let summary = session.run(Some(10));
        assert_eq!(summary.frames, 10);
        assert!(!summary.quit);
        assert_eq!(summary.phase, GamePhase::Waiting);
        assert_eq!(session.renderer().frames_rendered(), 10);
    }

    #[test]
    fn test_scripted_quit_stops_loop() {
        let settings = Settings::default();
        let mut session = Session::new(
            &settings,
            7,
            ManualClock::new(0),
            ScriptedInput::new([(5, InputEvent::Quit)]),
            HeadlessRenderer::new(),
        );
        let summary = session.run(None);
        assert!(summary.quit);
        assert_eq!(summary.frames, 6);
        // The quitting frame is not rendered
        assert_eq!(session.renderer().frames_rendered(), 5);
    }

    #[test]
    fn test_wait_elapses_on_manual_clock() {
        let settings = Settings::default();
        let mut session = Session::new(
            &settings,
            7,
            ManualClock::new(0),
            ScriptedInput::default(),
            HeadlessRenderer::new(),
        );
        // 3000 ms at 16 ms per frame
        session.run(Some(190));
        assert_eq!(session.state.session.phase, GamePhase::Playing);
        assert!(!session.state.obstacles.is_empty());
    }

    #[test]
    fn test_autopilot_session_is_deterministic() {
        let settings = Settings::default();
        let run = || {
            let mut session = Session::new(
                &settings,
                1234,
                ManualClock::new(0),
                Autopilot::new(1),
                HeadlessRenderer::new(),
            );
            session.run(Some(2000))
        };
        assert_eq!(run(), run());
    }
}
