//! Flappy Bird as a deterministic, frame-stepped simulation.
//!
//! [`Game`] owns all mutable state and advances it one tick per call to
//! [`Game::frame`]; a host (the terminal front end in `main.rs`, or
//! [`FixedStep`] for tests and headless runs) decides when to call it.

pub mod entities;
pub mod error;
pub mod game;
pub mod physics;
pub mod profile;
pub mod render;
pub mod scheduler;
pub mod score_store;
pub mod spawner;
pub mod state;

pub use error::{FlappyError, Result};
pub use game::{Game, GameEvent, Phase, Snapshot};
pub use profile::{Difficulty, DifficultyProfile, select_profile};
pub use render::TerminalPresenter;
pub use scheduler::{FixedStep, NullPresenter, Presenter, Schedule};
pub use score_store::{JsonFileStore, MemoryStore, ScoreStore, data_dir};
pub use state::{GameState, RunState};
