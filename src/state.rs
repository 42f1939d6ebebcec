use rand::Rng;

use crate::entities::{Bird, Cloud, Obstacle, spawn_clouds};
use crate::profile::DifficultyProfile;

/// Per-run counters. Only `score` outlives a run (as the high score candidate).
#[derive(Debug, Clone, PartialEq)]
pub struct RunState {
    pub score: u32,
    /// Current scroll speed; ratchets up as the score grows.
    pub speed: f64,
    pub frame_count: u64,
}

impl RunState {
    pub fn new(profile: &DifficultyProfile) -> Self {
        Self {
            score: 0,
            speed: profile.speed,
            frame_count: 0,
        }
    }
}

/// Everything one tick reads and writes.
#[derive(Debug, Clone)]
pub struct GameState {
    pub bird: Bird,
    /// In insertion order, oldest first.
    pub obstacles: Vec<Obstacle>,
    pub clouds: Vec<Cloud>,
    pub run: RunState,
    /// Profile the current run was started with.
    pub profile: DifficultyProfile,
}

impl GameState {
    pub fn new<R: Rng>(profile: DifficultyProfile, rng: &mut R) -> Self {
        Self {
            bird: Bird::new(&profile),
            obstacles: Vec::new(),
            clouds: spawn_clouds(rng),
            run: RunState::new(&profile),
            profile,
        }
    }

    /// Fresh run with `profile`. Clouds keep drifting where they are.
    pub fn reset(&mut self, profile: DifficultyProfile) {
        self.bird = Bird::new(&profile);
        self.obstacles.clear();
        self.run = RunState::new(&profile);
        self.profile = profile;
    }
}
