use serde::{Deserialize, Serialize};

use crate::config::GameMode;
use crate::coords::{Direction, GridPos};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerId {
	One,
	Two,
}

impl PlayerId {
	pub fn number(self) -> u8 {
		match self {
			PlayerId::One => 1,
			PlayerId::Two => 2,
		}
	}

	pub fn other(self) -> Self {
		match self {
			PlayerId::One => PlayerId::Two,
			PlayerId::Two => PlayerId::One,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
	pub pos: GridPos,
	pub facing: Direction,
}

impl Player {
	pub fn new(pos: GridPos, facing: Direction) -> Self {
		Self { pos, facing }
	}
}

/// Tokens on the board and whose turn it is. Player two exists only in
/// two-player mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Players {
	pub one: Player,
	pub two: Option<Player>,
	active: PlayerId,
}

impl Players {
	pub fn single(one: Player) -> Self {
		Self { one, two: None, active: PlayerId::One }
	}

	pub fn pair(one: Player, two: Player) -> Self {
		Self { one, two: Some(two), active: PlayerId::One }
	}

	pub fn mode(&self) -> GameMode {
		if self.two.is_some() { GameMode::TwoPlayer } else { GameMode::Single }
	}

	pub fn active_id(&self) -> PlayerId {
		self.active
	}

	pub fn active(&self) -> &Player {
		match (self.active, &self.two) {
			(PlayerId::Two, Some(p)) => p,
			_ => &self.one,
		}
	}

	pub fn active_mut(&mut self) -> &mut Player {
		match (self.active, &mut self.two) {
			(PlayerId::Two, Some(p)) => p,
			_ => &mut self.one,
		}
	}

	/// Hands the turn over. A no-op without a second player.
	pub fn end_turn(&mut self) {
		if self.two.is_some() {
			self.active = self.active.other();
		}
	}

	pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &Player)> {
		std::iter::once((PlayerId::One, &self.one)).chain(self.two.iter().map(|p| (PlayerId::Two, p)))
	}
}
