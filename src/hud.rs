use crate::config::{DAILY_REWARD_LIMIT, GameMode};
use crate::engine::{Arrival, GameSnapshot};
use crate::rewards::RewardOutcome;

pub const TURN_LEFT_LABEL: &str = "⟲ Turn Left";
pub const GO_FORWARD_LABEL: &str = "↑ Go Forward";
pub const TURN_RIGHT_LABEL: &str = "Turn Right ⟳";
pub const RESTART_LABEL: &str = "Restart";
pub const CONTROL_LABELS: [&str; 4] = [TURN_LEFT_LABEL, GO_FORWARD_LABEL, TURN_RIGHT_LABEL, RESTART_LABEL];
pub const REWARDS_PANEL_HEADING: &str = "Rewards";

pub fn format_hud(snap: &GameSnapshot) -> String {
	format!("Score: {} | Best: {} | Steps: {}", snap.score, snap.best_score, snap.steps)
}

pub fn format_side_panel(snap: &GameSnapshot) -> Vec<String> {
	let mut out = Vec::new();
	let destination = snap
		.destination
		.map(|p| format!("{} {}", p.kind.emoji(), p.name()))
		.unwrap_or_else(|| "None".to_string());
	out.push(format!("Destination: {}", destination));
	for (id, player) in snap.players.iter() {
		out.push(format!("Player {} facing {}", id.number(), player.facing.label()));
	}
	if snap.mode == GameMode::TwoPlayer {
		out.push(format!("Turn: Player {}", snap.active.number()));
	}
	out.push(format!("Mode: {} | Difficulty: {}", snap.mode.label(), snap.difficulty.label()));
	out.push(format!("Today's rewards: {}/{}", snap.rewards_today, DAILY_REWARD_LIMIT));
	out
}

pub fn format_reward(outcome: &RewardOutcome) -> String {
	match outcome {
		RewardOutcome::Reward { entry, count } => {
			format!("{} {} ({}/{} today)", entry.emoji, entry.name, count, DAILY_REWARD_LIMIT)
		}
		RewardOutcome::Praise { message } => {
			format!("🌟 {} (daily limit reached {}/{})", message, DAILY_REWARD_LIMIT, DAILY_REWARD_LIMIT)
		}
	}
}

pub fn format_arrival(a: &Arrival) -> String {
	let best = if a.new_best { " New best!" } else { "" };
	format!(
		"Player {} reached {}! +{} points ({} steps, {:.0}s).{} {}",
		a.player.number(),
		a.place.name(),
		a.trip_points,
		a.steps,
		a.elapsed_seconds.floor(),
		best,
		format_reward(&a.reward)
	)
}
