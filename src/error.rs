use thiserror::Error;

/// Why a forward step was refused. The message is shown to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
	#[error("Cannot go outside the map!")]
	OutOfBounds,
	#[error("Cannot walk through buildings!")]
	Building,
	#[error("Must stay on the road!")]
	OffRoad,
}

#[derive(Debug, Error)]
pub enum StorageError {
	#[error("Storage I/O error: {0}")]
	Io(#[from] std::io::Error),
	#[error("Storage JSON error: {0}")]
	Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
	#[error("Reward {index} needs both an emoji and a name")]
	EmptyField { index: usize },
	#[error("Reward catalog cannot be empty")]
	Empty,
}
