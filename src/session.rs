//! Game session
//!
//! Owns everything a running game needs (config, simulation state, RNG,
//! input handle, frame driver) and walks the NotStarted -> Running ->
//! GameOver -> Running lifecycle. UI code listens through
//! [`SessionObserver`] and sends `start` / `restart` commands.

use std::fmt;

use crate::config::GameConfig;
use crate::driver::{FixedStepScheduler, FrameDriver, FrameScheduler};
use crate::input::SharedInput;
use crate::renderer::{DrawSurface, render_scene};
use crate::sim::{GameEvent, GamePhase, RandomSource, SimulationState, TickInput, tick};

/// Rejected session commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// The command is not valid in the current phase
    InvalidTransition {
        from: GamePhase,
        command: &'static str,
    },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::InvalidTransition { from, command } => {
                write!(f, "cannot {command} a session in phase {from:?}")
            }
        }
    }
}

impl std::error::Error for SessionError {}

/// UI notifications
pub trait SessionObserver {
    fn on_score_changed(&mut self, score: u64);
    fn on_lives_changed(&mut self, lives: u32);
    fn on_game_over(&mut self, final_score: u64);
}

/// One player's game, from the title screen through any number of restarts
pub struct GameSession<R: RandomSource, S: FrameScheduler> {
    config: GameConfig,
    state: SimulationState,
    rng: R,
    input: SharedInput,
    driver: FrameDriver<S>,
    observers: Vec<Box<dyn SessionObserver>>,
}

impl<R: RandomSource, S: FrameScheduler> GameSession<R, S> {
    pub fn new(config: GameConfig, rng: R, scheduler: S) -> Self {
        let state = SimulationState::new(&config);
        Self {
            config,
            state,
            rng,
            input: SharedInput::new(),
            driver: FrameDriver::new(scheduler),
            observers: Vec::new(),
        }
    }

    pub fn add_observer(&mut self, observer: Box<dyn SessionObserver>) {
        self.observers.push(observer);
    }

    /// Handle for the key source; the session only reads from it
    pub fn input_handle(&self) -> SharedInput {
        self.input.clone()
    }

    /// First start from the title screen
    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.state.phase != GamePhase::NotStarted {
            return Err(self.rejected("start"));
        }
        log::info!("Starting game");
        self.begin();
        Ok(())
    }

    /// Fresh game after a game over
    pub fn restart(&mut self) -> Result<(), SessionError> {
        if self.state.phase != GamePhase::GameOver {
            return Err(self.rejected("restart"));
        }
        log::info!("Restarting game (previous score {})", self.state.score);
        self.begin();
        Ok(())
    }

    /// Teardown: cancels the pending frame; nothing is stepped afterwards
    pub fn stop(&mut self) {
        if self.driver.is_active() {
            log::info!("Stopping frame driver");
        }
        self.driver.stop();
    }

    fn rejected(&self, command: &'static str) -> SessionError {
        let err = SessionError::InvalidTransition {
            from: self.state.phase,
            command,
        };
        log::warn!("{err}");
        err
    }

    fn begin(&mut self) {
        self.state.reset(&self.config);
        self.dispatch_events();
        self.driver.start();
    }

    /// One delivered frame: step, render, notify, then request the next
    /// frame unless the game just ended. Returns false if nothing ran.
    pub fn on_frame(&mut self, now_ms: f64, surface: &mut impl DrawSurface) -> bool {
        if !self.driver.begin_frame() {
            return false;
        }
        if !self.state.is_running() {
            self.driver.end_frame(false);
            return false;
        }

        let input = TickInput {
            flags: self.input.snapshot(),
            now_ms,
        };
        tick(&mut self.state, &input, &self.config, &mut self.rng);
        render_scene(&self.state, surface);
        self.dispatch_events();

        let keep_running = self.state.is_running();
        if !keep_running {
            log::info!(
                "Game over after {} frames, final score {}",
                self.state.frame,
                self.state.score
            );
        }
        self.driver.end_frame(keep_running);
        true
    }

    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            for observer in &mut self.observers {
                match event {
                    GameEvent::ScoreChanged(score) => observer.on_score_changed(score),
                    GameEvent::LivesChanged(lives) => observer.on_lives_changed(lives),
                    GameEvent::GameOver { final_score } => observer.on_game_over(final_score),
                }
            }
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn driver(&self) -> &FrameDriver<S> {
        &self.driver
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        self.driver.scheduler_mut()
    }
}

impl<R: RandomSource> GameSession<R, FixedStepScheduler> {
    /// Deliver pending frames until none is requested or `max_frames` ran.
    /// Returns the number of frames stepped.
    pub fn run_pending(&mut self, max_frames: u64, surface: &mut impl DrawSurface) -> u64 {
        let mut ran = 0;
        while ran < max_frames {
            let Some(now_ms) = self.driver.scheduler_mut().take_pending() else {
                break;
            };
            if self.on_frame(now_ms, surface) {
                ran += 1;
            }
        }
        ran
    }
}
