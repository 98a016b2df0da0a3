//! Game configuration constants.
//!
//! Grid dimensions, placement attempt caps, reward limits and the
//! per-difficulty generation table.
use serde::{Deserialize, Serialize};

/// Width and height of the square town grid.
pub const GRID_SIZE: i32 = 10;

/// Maximum random cells tried while scattering buildings.
pub const BUILDING_ATTEMPTS: u32 = 1000;

/// Maximum random cells tried per place before it is skipped.
pub const PLACE_ATTEMPTS: u32 = 100;

/// Maximum maps generated while looking for a single connected road network.
pub const MAX_GENERATION_ROUNDS: u32 = 20;

/// Catalogue rewards granted per calendar day before praise takes over.
pub const DAILY_REWARD_LIMIT: u32 = 3;

/// Milliseconds between an arrival and the next destination appearing.
pub const ARRIVAL_DELAY_MS: i64 = 4000;

/// Points lost per step taken on a trip.
pub const STEP_PENALTY: u32 = 5;

/// Ceiling of both the time and the step component of a trip score.
pub const SCORE_COMPONENT_MAX: u32 = 100;

pub const BEST_SCORE_KEY: &str = "bestScore";
pub const DAILY_REWARDS_KEY: &str = "dailyRewards";
pub const CUSTOM_REWARDS_KEY: &str = "customRewards";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultySettings {
    pub road_spacing: i32,
    pub extra_roads: u32,
    pub buildings: u32,
    pub places: usize,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn settings(self) -> DifficultySettings {
        match self {
            Difficulty::Easy => DifficultySettings {
                road_spacing: 2,
                extra_roads: 5,
                buildings: 8,
                places: 4,
            },
            Difficulty::Medium => DifficultySettings {
                road_spacing: 3,
                extra_roads: 8,
                buildings: 12,
                places: 6,
            },
            Difficulty::Hard => DifficultySettings {
                road_spacing: 4,
                extra_roads: 12,
                buildings: 16,
                places: 8,
            },
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    #[default]
    Single,
    TwoPlayer,
}

impl GameMode {
    pub fn label(self) -> &'static str {
        match self {
            GameMode::Single => "Single Player",
            GameMode::TwoPlayer => "Two Players",
        }
    }
}
