//! Host-agnostic frame scheduling.
//!
//! The driver never loops by itself: a host calls [`Game::frame`] once per
//! display refresh (or as fast as it likes, for a fixed-step harness) and
//! stops when told to suspend.

use rand::Rng;

use crate::error::Result;
use crate::game::{Game, GameEvent, Snapshot};
use crate::score_store::ScoreStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// Run in progress; call again next frame.
    Continue,
    /// No run in progress; nothing will change until input arrives.
    Suspend,
}

/// Draws a frame. Gets the events the tick produced alongside the view.
pub trait Presenter {
    fn present(&mut self, view: &Snapshot<'_>, events: &[GameEvent]) -> Result<()>;
}

/// Discards every frame.
#[derive(Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn present(&mut self, _view: &Snapshot<'_>, _events: &[GameEvent]) -> Result<()> {
        Ok(())
    }
}

/// Drives a game with no clock: frames back to back until the run ends or
/// `max_ticks` is reached.
#[derive(Debug, Clone, Copy)]
pub struct FixedStep {
    pub max_ticks: u64,
}

impl FixedStep {
    pub fn new(max_ticks: u64) -> Self {
        Self { max_ticks }
    }

    /// Returns how many frames were driven.
    pub fn run<S, R, P>(&self, game: &mut Game<S, R>, presenter: &mut P) -> Result<u64>
    where
        S: ScoreStore,
        R: Rng,
        P: Presenter,
    {
        let mut frames = 0;
        while frames < self.max_ticks {
            frames += 1;
            if game.frame(presenter)? == Schedule::Suspend {
                break;
            }
        }
        Ok(frames)
    }
}
