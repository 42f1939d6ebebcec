//! Plain data for everything that lives in the play-field.

use rand::Rng;

use crate::profile::DifficultyProfile;

// ── World geometry ──────────────────────────────────────────────────────────

pub const CANVAS_WIDTH: f64 = 400.0;
pub const CANVAS_HEIGHT: f64 = 600.0;
pub const GROUND_HEIGHT: f64 = 100.0;
/// Sky height: where the ground starts.
pub const PLAYFIELD_HEIGHT: f64 = CANVAS_HEIGHT - GROUND_HEIGHT;

pub const BIRD_X: f64 = 100.0;
pub const BIRD_WIDTH: f64 = 40.0;
pub const BIRD_HEIGHT: f64 = 30.0;
pub const WING_FLIP_TICKS: u32 = 10;

pub const PIPE_WIDTH: f64 = 60.0;
pub const PIPE_MIN_HEIGHT: f64 = 50.0;
pub const PIPE_MAX_HEIGHT: f64 = CANVAS_HEIGHT - 200.0;

pub const CLOUD_COUNT: usize = 5;

// ── Bird ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WingPhase {
    Up,
    Down,
}

impl WingPhase {
    fn flipped(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bird {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Positive is downward.
    pub velocity: f64,
    pub gravity: f64,
    pub jump_impulse: f64,
    pub wing: WingPhase,
    pub wing_timer: u32,
}

impl Bird {
    /// A bird at the launch position, parameterised by the run's profile.
    pub fn new(profile: &DifficultyProfile) -> Self {
        Self {
            x: BIRD_X,
            y: CANVAS_HEIGHT / 2.0,
            width: BIRD_WIDTH,
            height: BIRD_HEIGHT,
            velocity: 0.0,
            gravity: profile.gravity,
            jump_impulse: profile.jump_impulse(),
            wing: WingPhase::Up,
            wing_timer: 0,
        }
    }

    pub fn integrate(&mut self) {
        self.velocity += self.gravity;
        self.y += self.velocity;
    }

    pub fn animate_wings(&mut self) {
        self.wing_timer += 1;
        if self.wing_timer >= WING_FLIP_TICKS {
            self.wing = self.wing.flipped();
            self.wing_timer = 0;
        }
    }

    /// Overwrites velocity, so repeated jumps never stack.
    pub fn jump(&mut self) {
        self.velocity = self.jump_impulse;
        self.wing = WingPhase::Up;
        self.wing_timer = 0;
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Touching the ground line or poking above the ceiling.
    pub fn out_of_bounds(&self) -> bool {
        self.bottom() > PLAYFIELD_HEIGHT || self.y < 0.0
    }
}

// ── Obstacles ───────────────────────────────────────────────────────────────

/// A top/bottom pipe pair sharing one x and one gap.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub x: f64,
    pub top_height: f64,
    pub passed: bool,
}

impl Obstacle {
    pub fn new(x: f64, top_height: f64) -> Self {
        Self {
            x,
            top_height,
            passed: false,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + PIPE_WIDTH
    }

    /// Y where the bottom pipe starts.
    pub fn gap_bottom(&self, gap: f64) -> f64 {
        self.top_height + gap
    }

    /// Height of the bottom pipe. Zero when the gap reaches the ground.
    pub fn bottom_height(&self, gap: f64) -> f64 {
        (PLAYFIELD_HEIGHT - self.gap_bottom(gap)).max(0.0)
    }

    pub fn off_screen(&self) -> bool {
        self.right() < 0.0
    }
}

// ── Clouds ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Cloud {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub speed: f64,
}

impl Cloud {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            x: rng.gen_range(0.0..CANVAS_WIDTH),
            y: rng.gen_range(0.0..CANVAS_HEIGHT / 3.0),
            width: rng.gen_range(60.0..100.0),
            speed: rng.gen_range(0.01..1.01),
        }
    }

    /// Drifts left at half its speed, wrapping back in from the right edge.
    pub fn drift<R: Rng>(&mut self, rng: &mut R) {
        self.x -= self.speed * 0.5;
        if self.x + self.width < 0.0 {
            self.x = CANVAS_WIDTH;
            self.y = rng.gen_range(0.0..CANVAS_HEIGHT / 3.0);
        }
    }
}

pub fn spawn_clouds<R: Rng>(rng: &mut R) -> Vec<Cloud> {
    (0..CLOUD_COUNT).map(|_| Cloud::random(rng)).collect()
}
