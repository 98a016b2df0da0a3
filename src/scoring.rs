use serde::{Deserialize, Serialize};

use crate::config::{BEST_SCORE_KEY, SCORE_COMPONENT_MAX, STEP_PENALTY};
use crate::storage::KeyValueStore;

/// Points for one trip: up to 100 for speed (one lost per whole second) and
/// up to 100 for economy (five lost per step). Negative elapsed time counts
/// as zero.
pub fn trip_score(elapsed_seconds: f64, steps: u32) -> u32 {
    let whole_seconds = elapsed_seconds.max(0.0).floor();
    let time_score = (SCORE_COMPONENT_MAX as f64 - whole_seconds).max(0.0) as u32;
    let step_score = SCORE_COMPONENT_MAX.saturating_sub(steps.saturating_mul(STEP_PENALTY));
    time_score + step_score
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreBoard {
    pub score: u32,
    pub best: u32,
}

impl ScoreBoard {
    /// Fresh running score with the persisted best. A missing or unparsable
    /// best score reads as zero.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let best = match store.get(BEST_SCORE_KEY) {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                log::warn!("corrupt best score {:?}, starting from 0", raw);
                0
            }),
            None => 0,
        };
        Self { score: 0, best }
    }

    /// Adds a trip to the running score. Returns true and persists when the
    /// running score beats the best.
    pub fn record_trip(&mut self, points: u32, store: &mut dyn KeyValueStore) -> bool {
        self.score = self.score.saturating_add(points);
        if self.score > self.best {
            self.best = self.score;
            store.set(BEST_SCORE_KEY, &self.best.to_string());
            return true;
        }
        false
    }

    pub fn reset_running(&mut self) {
        self.score = 0;
    }
}
