//! The per-tick simulation step: movement, spawning, scoring and collisions.

use rand::Rng;

use crate::entities::{Bird, Obstacle, PIPE_WIDTH};
use crate::spawner;
use crate::state::GameState;

pub const SPEED_STEP: f64 = 0.2;
/// Every this many points the scroll speed ratchets up by `SPEED_STEP`.
pub const SPEED_RAMP_EVERY: u32 = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// Points awarded this tick.
    pub scored: u32,
    pub died: bool,
}

/// Bird box against one pipe pair. Edge contact is not a hit.
pub fn collides(bird: &Bird, pipe: &Obstacle, gap: f64) -> bool {
    let overlap_x = bird.x + bird.width > pipe.x && bird.x < pipe.x + PIPE_WIDTH;
    let outside_gap = bird.y < pipe.top_height || bird.y + bird.height > pipe.top_height + gap;
    overlap_x && outside_gap
}

/// Advances the world by one tick.
///
/// Death is latched into the outcome rather than returned early, so obstacles
/// still move and get culled this tick, but nothing is scored after the latch.
pub fn step<R: Rng>(state: &mut GameState, rng: &mut R) -> StepOutcome {
    let mut outcome = StepOutcome::default();

    state.bird.integrate();
    state.bird.animate_wings();
    if state.bird.out_of_bounds() {
        outcome.died = true;
    }

    state.run.frame_count += 1;
    if let Some(pipe) = spawner::maybe_spawn(state.run.frame_count, &state.profile, rng) {
        state.obstacles.push(pipe);
    }

    let GameState {
        bird,
        obstacles,
        run,
        profile,
        ..
    } = state;
    obstacles.retain_mut(|pipe| {
        pipe.x -= run.speed;

        if !outcome.died && !pipe.passed && pipe.right() < bird.x {
            pipe.passed = true;
            run.score += 1;
            outcome.scored += 1;
            if run.score % SPEED_RAMP_EVERY == 0 {
                run.speed += SPEED_STEP;
            }
        }

        if collides(bird, pipe, profile.gap) {
            outcome.died = true;
        }

        !pipe.off_screen()
    });

    for cloud in &mut state.clouds {
        cloud.drift(rng);
    }

    outcome
}
