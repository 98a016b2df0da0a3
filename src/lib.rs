pub mod clock;
pub mod config;
pub mod coords;
pub mod engine;
pub mod error;
pub mod grid;
pub mod hud;
pub mod mapgen;
pub mod placer;
pub mod player;
pub mod rewards;
pub mod scoring;
pub mod storage;
pub mod tile;

// Re-exports for convenience in tests and integration users.
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{Difficulty, DifficultySettings, GameMode};
pub use coords::{Direction, GridPos};
pub use engine::{ActionOutcome, Arrival, Engine, GameSnapshot, TurnPhase};
pub use error::{CatalogError, MoveError, StorageError};
pub use grid::{Building, Cell, Grid, HoverTarget, Place};
pub use hud::{
    CONTROL_LABELS, GO_FORWARD_LABEL, RESTART_LABEL, REWARDS_PANEL_HEADING, TURN_LEFT_LABEL,
    TURN_RIGHT_LABEL, format_arrival, format_hud, format_reward, format_side_panel,
};
pub use mapgen::{generate, generate_connected};
pub use placer::{pick_destination, place_on_road};
pub use player::{Player, PlayerId, Players};
pub use rewards::{DailyRewardCounter, RewardCatalog, RewardEntry, RewardGate, RewardOutcome};
pub use scoring::{ScoreBoard, trip_score};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};
pub use tile::{BuildingKind, PlaceKind, RoadStyle, TileKind};
