//! The simulation driver: owns the game state, the run state machine and
//! the persisted high score.

use rand::Rng;
use tracing::{debug, info, warn};

use crate::entities::{Bird, Cloud, Obstacle};
use crate::error::Result;
use crate::physics;
use crate::profile::Difficulty;
use crate::scheduler::{Presenter, Schedule};
use crate::score_store::ScoreStore;
use crate::state::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Before the first start.
    Idle,
    Running,
    Over,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    ScoreChanged(u32),
    RunOver { score: u32, new_high_score: bool },
}

/// Read-only view handed to the presentation layer each frame.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub phase: Phase,
    pub bird: &'a Bird,
    pub obstacles: &'a [Obstacle],
    pub clouds: &'a [Cloud],
    pub gap: f64,
    pub score: u32,
    pub high_score: u32,
    /// Difficulty the next `start` will use.
    pub selected: Difficulty,
}

pub struct Game<S, R> {
    state: GameState,
    phase: Phase,
    selected: Difficulty,
    active: Difficulty,
    high_score: u32,
    store: S,
    rng: R,
}

impl<S: ScoreStore, R: Rng> Game<S, R> {
    /// Reads the previous best from `store`; an unreadable store counts as 0.
    pub fn new(difficulty: Difficulty, mut store: S, mut rng: R) -> Self {
        let high_score = store.load().unwrap_or_else(|err| {
            warn!(%err, "could not read high score, starting from 0");
            0
        });
        let state = GameState::new(difficulty.profile(), &mut rng);
        Self {
            state,
            phase: Phase::Idle,
            selected: difficulty,
            active: difficulty,
            high_score,
            store,
            rng,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.state.run.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn selected_difficulty(&self) -> Difficulty {
        self.selected
    }

    /// Difficulty the current (or last) run was started with.
    pub fn active_difficulty(&self) -> Difficulty {
        self.active
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Selects the profile for the next run. The run in flight keeps its own.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        debug!(%difficulty, phase = ?self.phase, "difficulty selected");
        self.selected = difficulty;
    }

    pub fn start(&mut self, difficulty: Difficulty) {
        self.set_difficulty(difficulty);
        self.restart();
    }

    /// Starts a fresh run with the selected difficulty, from any phase.
    pub fn restart(&mut self) {
        self.active = self.selected;
        self.state.reset(self.active.profile());
        self.phase = Phase::Running;
        info!(difficulty = %self.active, high_score = self.high_score, "run started");
    }

    /// Ignored unless a run is in progress.
    pub fn jump(&mut self) {
        if self.phase == Phase::Running {
            self.state.bird.jump();
        }
    }

    /// One simulation step. Does nothing outside `Running`.
    pub fn tick(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.phase != Phase::Running {
            return events;
        }

        let outcome = physics::step(&mut self.state, &mut self.rng);
        if outcome.scored > 0 {
            debug!(score = self.state.run.score, speed = self.state.run.speed, "scored");
            events.push(GameEvent::ScoreChanged(self.state.run.score));
        }
        if outcome.died {
            events.push(self.finish_run());
        }
        events
    }

    fn finish_run(&mut self) -> GameEvent {
        self.phase = Phase::Over;
        let score = self.state.run.score;
        let new_high_score = score > self.high_score;
        if new_high_score {
            self.high_score = score;
            if let Err(err) = self.store.save(score) {
                warn!(%err, "could not persist high score");
            }
        }
        info!(
            score,
            new_high_score,
            frames = self.state.run.frame_count,
            "run over"
        );
        GameEvent::RunOver {
            score,
            new_high_score,
        }
    }

    /// Tick then hand the result to `presenter`. The host calls this once per
    /// frame and may stop calling it once it returns `Schedule::Suspend`.
    pub fn frame<P: Presenter>(&mut self, presenter: &mut P) -> Result<Schedule> {
        let events = self.tick();
        presenter.present(&self.snapshot(), &events)?;
        Ok(match self.phase {
            Phase::Running => Schedule::Continue,
            Phase::Idle | Phase::Over => Schedule::Suspend,
        })
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.phase,
            bird: &self.state.bird,
            obstacles: &self.state.obstacles,
            clouds: &self.state.clouds,
            gap: self.state.profile.gap,
            score: self.state.run.score,
            high_score: self.high_score,
            selected: self.selected,
        }
    }
}
