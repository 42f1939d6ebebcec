//! Difficulty profiles: horizontal speed, pipe gap and gravity per tag.

use std::fmt;

use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    Easy,
    Medium,
    #[default]
    Hard,
}

/// Physics parameters a run is started with. Frozen for the whole run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyProfile {
    /// Horizontal scroll speed in px per frame.
    pub speed: f64,
    /// Vertical gap between top and bottom pipe in px.
    pub gap: f64,
    /// Downward acceleration in px per frame².
    pub gravity: f64,
}

impl DifficultyProfile {
    /// Jump velocity is derived from gravity, never tuned on its own.
    pub fn jump_impulse(&self) -> f64 {
        -self.gravity * 20.0
    }
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn profile(self) -> DifficultyProfile {
        match self {
            Self::Easy => DifficultyProfile {
                speed: 2.0,
                gap: 280.0,
                gravity: 0.1,
            },
            Self::Medium => DifficultyProfile {
                speed: 3.0,
                gap: 150.0,
                gravity: 0.2,
            },
            Self::Hard => DifficultyProfile {
                speed: 4.0,
                gap: 120.0,
                gravity: 0.3,
            },
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// Looks up a tag, falling back to `Hard` for anything unrecognized.
    pub fn from_tag(tag: &str) -> Difficulty {
        match tag.trim().to_ascii_lowercase().as_str() {
            "easy" => Self::Easy,
            "medium" => Self::Medium,
            "hard" => Self::Hard,
            other => {
                warn!(tag = other, "unknown difficulty tag, using hard");
                Self::default()
            }
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Tag lookup straight to the physics parameters.
pub fn select_profile(tag: &str) -> DifficultyProfile {
    Difficulty::from_tag(tag).profile()
}
