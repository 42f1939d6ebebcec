//! Obstacle generation on a fixed frame cadence.

use rand::Rng;
use tracing::debug;

use crate::entities::{CANVAS_WIDTH, Obstacle, PIPE_MAX_HEIGHT, PIPE_MIN_HEIGHT, PLAYFIELD_HEIGHT};
use crate::profile::DifficultyProfile;

/// Frames between two spawns. Tied to frames, not wall time.
pub const SPAWN_INTERVAL: u64 = 120;

/// Inclusive range of whole-pixel top heights for the given gap.
///
/// The upper bound is lowered so the gap never runs into the ground. If even
/// `PIPE_MIN_HEIGHT` can't fit the gap the range collapses onto it and the
/// bottom pipe is left with zero height.
pub fn top_height_range(gap: f64) -> (u32, u32) {
    let min = PIPE_MIN_HEIGHT as u32;
    let fit = (PLAYFIELD_HEIGHT - gap).floor().max(0.0) as u32;
    let max = (PIPE_MAX_HEIGHT as u32).min(fit).max(min);
    (min, max)
}

pub fn maybe_spawn<R: Rng>(
    frame_count: u64,
    profile: &DifficultyProfile,
    rng: &mut R,
) -> Option<Obstacle> {
    if frame_count == 0 || frame_count % SPAWN_INTERVAL != 0 {
        return None;
    }
    let (min, max) = top_height_range(profile.gap);
    let top_height = rng.gen_range(min..=max) as f64;
    debug!(frame_count, top_height, "spawning obstacle");
    Some(Obstacle::new(CANVAS_WIDTH, top_height))
}
