use chrono::{Duration, NaiveDateTime};
use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::config::{ARRIVAL_DELAY_MS, Difficulty, GameMode};
use crate::coords::{Direction, GridPos};
use crate::error::{CatalogError, MoveError};
use crate::grid::{Grid, HoverTarget, Place};
use crate::mapgen::generate_connected;
use crate::placer::{pick_destination, place_on_road};
use crate::player::{Player, PlayerId, Players};
use crate::rewards::{RewardGate, RewardOutcome};
use crate::scoring::{ScoreBoard, trip_score};
use crate::storage::KeyValueStore;
use crate::tile::TileKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
	/// No destination to reach (the map ended up without places).
	Idle,
	AwaitingAction,
	/// A destination was just reached; the next one is assigned by `tick`.
	ResolvingArrival,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arrival {
	pub player: PlayerId,
	pub place: Place,
	pub elapsed_seconds: f64,
	pub steps: u32,
	pub trip_points: u32,
	pub total_score: u32,
	pub best_score: u32,
	pub new_best: bool,
	pub reward: RewardOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActionOutcome {
	Turned { player: PlayerId, facing: Direction },
	Moved { player: PlayerId, to: GridPos, arrival: Option<Arrival> },
}

/// Owned copy of everything a renderer draws.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
	pub revision: u64,
	pub difficulty: Difficulty,
	pub mode: GameMode,
	pub phase: TurnPhase,
	pub grid: Grid,
	pub players: Players,
	pub active: PlayerId,
	pub destination: Option<Place>,
	pub score: u32,
	pub best_score: u32,
	pub steps: u32,
	pub rewards_today: u32,
	pub hover: Option<(GridPos, HoverTarget)>,
}

/// Session controller: owns the board, applies player intents and keeps the
/// persisted score and reward state in sync with the store.
pub struct Engine {
	grid: Grid,
	players: Players,
	destination: Option<usize>,
	difficulty: Difficulty,
	mode: GameMode,
	phase: TurnPhase,
	scores: ScoreBoard,
	rewards: RewardGate,
	steps: u32,
	trip_start: NaiveDateTime,
	next_destination_at: Option<NaiveDateTime>,
	hover: Option<GridPos>,
	revision: u64,
	rng: StdRng,
	store: Box<dyn KeyValueStore>,
	clock: Box<dyn Clock>,
}

impl Engine {
	/// Loads persisted state and starts a default game.
	pub fn new(store: impl KeyValueStore + 'static, clock: impl Clock + 'static, rng: StdRng) -> Self {
		let mut store: Box<dyn KeyValueStore> = Box::new(store);
		let clock: Box<dyn Clock> = Box::new(clock);
		let now = clock.now();
		let scores = ScoreBoard::load(&*store);
		let rewards = RewardGate::load(&mut *store, now.date());
		let origin = Player::new(GridPos::new(0, 0), Direction::North);
		let mut engine = Self {
			grid: Grid::new(0, 0),
			players: Players::single(origin),
			destination: None,
			difficulty: Difficulty::default(),
			mode: GameMode::default(),
			phase: TurnPhase::Idle,
			scores,
			rewards,
			steps: 0,
			trip_start: now,
			next_destination_at: None,
			hover: None,
			revision: 0,
			rng,
			store,
			clock,
		};
		engine.new_game();
		engine
	}

	pub fn with_seed(store: impl KeyValueStore + 'static, clock: impl Clock + 'static, seed: u64) -> Self {
		Self::new(store, clock, StdRng::seed_from_u64(seed))
	}

	pub fn with_entropy(store: impl KeyValueStore + 'static, clock: impl Clock + 'static) -> Self {
		Self::new(store, clock, StdRng::from_entropy())
	}

	pub fn grid(&self) -> &Grid {
		&self.grid
	}
	pub fn players(&self) -> &Players {
		&self.players
	}
	pub fn difficulty(&self) -> Difficulty {
		self.difficulty
	}
	pub fn mode(&self) -> GameMode {
		self.mode
	}
	pub fn phase(&self) -> TurnPhase {
		self.phase
	}
	pub fn score(&self) -> u32 {
		self.scores.score
	}
	pub fn best_score(&self) -> u32 {
		self.scores.best
	}
	pub fn steps(&self) -> u32 {
		self.steps
	}
	pub fn rewards(&self) -> &RewardGate {
		&self.rewards
	}
	pub fn revision(&self) -> u64 {
		self.revision
	}

	pub fn destination(&self) -> Option<&Place> {
		self.destination.and_then(|i| self.grid.places().get(i))
	}

	pub fn trip_elapsed_seconds(&self) -> f64 {
		(self.clock.now() - self.trip_start).num_milliseconds() as f64 / 1000.0
	}

	pub fn hover_target(&self) -> Option<(GridPos, HoverTarget)> {
		let p = self.hover?;
		self.grid.hover_target(p).map(|t| (p, t))
	}

	pub fn snapshot(&self) -> GameSnapshot {
		GameSnapshot {
			revision: self.revision,
			difficulty: self.difficulty,
			mode: self.mode,
			phase: self.phase,
			grid: self.grid.clone(),
			players: self.players.clone(),
			active: self.players.active_id(),
			destination: self.destination().copied(),
			score: self.scores.score,
			best_score: self.scores.best,
			steps: self.steps,
			rewards_today: self.rewards.counter.count,
			hover: self.hover_target(),
		}
	}

	// ---------- Session ----------

	pub fn restart(&mut self) {
		self.new_game();
	}

	pub fn set_difficulty(&mut self, difficulty: Difficulty) {
		self.difficulty = difficulty;
		self.new_game();
	}

	pub fn set_game_mode(&mut self, mode: GameMode) {
		self.mode = mode;
		self.new_game();
	}

	/// Swaps in a prepared board, keeping score and settings. `destination`
	/// indexes `grid.places()`.
	#[cfg(test)]
	pub(crate) fn replace_board(&mut self, grid: Grid, players: Players, destination: Option<usize>) {
		self.mode = players.mode();
		self.grid = grid;
		self.players = players;
		self.destination = destination.filter(|i| *i < self.grid.places().len());
		self.start_trip();
	}

	fn new_game(&mut self) {
		self.grid = generate_connected(self.difficulty, &mut self.rng);
		self.destination = pick_destination(&self.grid, &mut self.rng);
		self.players = self.spawn_players();
		self.scores.reset_running();
		self.start_trip();
		log::info!(
			"new {:?} game ({:?}): {} places, {} buildings",
			self.difficulty,
			self.mode,
			self.grid.places().len(),
			self.grid.buildings().len()
		);
	}

	fn spawn_players(&mut self) -> Players {
		let first = place_on_road(&self.grid, None, &mut self.rng).unwrap_or(GridPos::new(0, 0));
		let one = Player::new(first, Direction::North);
		match self.mode {
			GameMode::Single => Players::single(one),
			GameMode::TwoPlayer => {
				let second = place_on_road(&self.grid, Some(first), &mut self.rng).unwrap_or(first);
				Players::pair(one, Player::new(second, Direction::South))
			}
		}
	}

	fn start_trip(&mut self) {
		self.steps = 0;
		self.trip_start = self.clock.now();
		self.next_destination_at = None;
		self.phase = if self.destination.is_some() { TurnPhase::AwaitingAction } else { TurnPhase::Idle };
		self.touch();
	}

	fn touch(&mut self) {
		self.revision += 1;
	}

	// ---------- Player intents ----------

	pub fn turn_left(&mut self) -> ActionOutcome {
		self.turn(Direction::turned_left)
	}

	pub fn turn_right(&mut self) -> ActionOutcome {
		self.turn(Direction::turned_right)
	}

	fn turn(&mut self, rotate: fn(Direction) -> Direction) -> ActionOutcome {
		let player = self.players.active_id();
		let token = self.players.active_mut();
		token.facing = rotate(token.facing);
		let facing = token.facing;
		self.players.end_turn();
		self.touch();
		log::debug!("player {} now faces {:?}", player.number(), facing);
		ActionOutcome::Turned { player, facing }
	}

	/// Steps the active player one cell along its facing. Only road cells
	/// can be entered; a refused step changes nothing and keeps the turn.
	pub fn go_forward(&mut self) -> Result<ActionOutcome, MoveError> {
		let player = self.players.active_id();
		let token = *self.players.active();
		let target = token.pos.step(token.facing);
		let blocked = match self.grid.tile(target) {
			None => Some(MoveError::OutOfBounds),
			Some(TileKind::Building) => Some(MoveError::Building),
			Some(TileKind::Grass) => Some(MoveError::OffRoad),
			Some(TileKind::Road) => None,
		};
		if let Some(err) = blocked {
			log::debug!("player {} blocked at {:?}: {}", player.number(), target, err);
			return Err(err);
		}

		self.players.active_mut().pos = target;
		self.steps += 1;
		let arrival = self.check_arrival(player, target);
		self.players.end_turn();
		self.touch();
		Ok(ActionOutcome::Moved { player, to: target, arrival })
	}

	fn check_arrival(&mut self, player: PlayerId, pos: GridPos) -> Option<Arrival> {
		if self.phase != TurnPhase::AwaitingAction {
			return None;
		}
		let place = *self.destination()?;
		if place.pos != pos {
			return None;
		}

		let now = self.clock.now();
		let elapsed_seconds = (now - self.trip_start).num_milliseconds() as f64 / 1000.0;
		let trip_points = trip_score(elapsed_seconds, self.steps);
		let new_best = self.scores.record_trip(trip_points, &mut *self.store);
		let reward = self.rewards.draw(now.date(), &mut self.rng, &mut *self.store);

		self.phase = TurnPhase::ResolvingArrival;
		self.next_destination_at = Some(now + Duration::milliseconds(ARRIVAL_DELAY_MS));
		log::info!(
			"player {} reached {} in {} steps, {:.1}s: +{} (total {}, best {})",
			player.number(),
			place.name(),
			self.steps,
			elapsed_seconds,
			trip_points,
			self.scores.score,
			self.scores.best
		);

		Some(Arrival {
			player,
			place,
			elapsed_seconds,
			steps: self.steps,
			trip_points,
			total_score: self.scores.score,
			best_score: self.scores.best,
			new_best,
			reward,
		})
	}

	/// Assigns the next destination once the post-arrival delay has passed.
	/// Returns true when it did.
	pub fn tick(&mut self) -> bool {
		let Some(due) = self.next_destination_at else {
			return false;
		};
		if self.clock.now() < due {
			return false;
		}
		self.destination = pick_destination(&self.grid, &mut self.rng);
		if let Some(place) = self.destination() {
			log::info!("next destination: {}", place.name());
		}
		self.start_trip();
		true
	}

	pub fn hover(&mut self, cell: Option<GridPos>) {
		let cell = cell.filter(|p| self.grid.contains(*p));
		if cell != self.hover {
			self.hover = cell;
			self.touch();
		}
	}

	// ---------- Reward administration ----------

	pub fn update_rewards(&mut self, edits: &[(String, String)]) -> Result<(), CatalogError> {
		self.rewards.update_catalog(edits, &mut *self.store)?;
		self.touch();
		Ok(())
	}

	pub fn reset_daily_rewards(&mut self) {
		let today = self.clock.now().date();
		self.rewards.reset_daily(today, &mut *self.store);
		self.touch();
	}
}
