//! Treasure-chest rewards handed out on arrival.
//!
//! Up to [`DAILY_REWARD_LIMIT`] draws per calendar day pick an entry from the
//! editable reward catalog; after that the chest only holds a praise line.
//! The counter and catalog live in the key-value store as JSON.
use chrono::NaiveDate;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::config::{CUSTOM_REWARDS_KEY, DAILY_REWARDS_KEY, DAILY_REWARD_LIMIT};
use crate::error::CatalogError;
use crate::storage::KeyValueStore;

pub const PRAISE_MESSAGES: [&str; 8] = [
    "You are amazing!",
    "So clever!",
    "Great job!",
    "You are a genius!",
    "Excellent work!",
    "You learn so fast!",
    "Outstanding!",
    "You are our star!",
];

const DEFAULT_COLOR: &str = "#48dbfb";

/// Calendar-date key in the persisted counter, e.g. "Sat Oct 17 2026".
pub fn date_key(date: NaiveDate) -> String {
    date.format("%a %b %d %Y").to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardEntry {
    pub name: String,
    pub emoji: String,
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

impl RewardEntry {
    pub fn new(name: &str, emoji: &str, color: &str) -> Self {
        Self {
            name: name.to_string(),
            emoji: emoji.to_string(),
            color: color.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RewardCatalog {
    entries: Vec<RewardEntry>,
}

impl Default for RewardCatalog {
    fn default() -> Self {
        Self {
            entries: vec![
                RewardEntry::new("Skip homework once", "📝", "#ff6b6b"),
                RewardEntry::new("One candy", "🍬", "#feca57"),
                RewardEntry::new("A new pencil", "✏️", "#48dbfb"),
            ],
        }
    }
}

impl RewardCatalog {
    /// Reads the saved catalog, falling back to the built-in one when it is
    /// missing, corrupt or empty.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let Some(raw) = store.get(CUSTOM_REWARDS_KEY) else {
            return Self::default();
        };
        match serde_json::from_str::<RewardCatalog>(&raw) {
            Ok(catalog) if !catalog.entries.is_empty() => catalog,
            Ok(_) => {
                log::warn!("saved reward catalog is empty, using defaults");
                Self::default()
            }
            Err(e) => {
                log::warn!("corrupt reward catalog ({}), using defaults", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) {
        match serde_json::to_string(self) {
            Ok(json) => store.set(CUSTOM_REWARDS_KEY, &json),
            Err(e) => log::warn!("failed to encode reward catalog: {}", e),
        }
    }

    pub fn entries(&self) -> &[RewardEntry] {
        &self.entries
    }

    /// Replaces every entry with `(emoji, name)` pairs, keeping colours by
    /// position. Nothing changes unless every pair is non-blank.
    pub fn update(&mut self, edits: &[(String, String)]) -> Result<(), CatalogError> {
        if edits.is_empty() {
            return Err(CatalogError::Empty);
        }
        if let Some(index) = edits
            .iter()
            .position(|(emoji, name)| emoji.trim().is_empty() || name.trim().is_empty())
        {
            return Err(CatalogError::EmptyField { index });
        }
        let entries = edits
            .iter()
            .enumerate()
            .map(|(i, (emoji, name))| RewardEntry {
                name: name.trim().to_string(),
                emoji: emoji.trim().to_string(),
                color: self
                    .entries
                    .get(i)
                    .map(|e| e.color.clone())
                    .unwrap_or_else(default_color),
            })
            .collect();
        self.entries = entries;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRewardCounter {
    pub date: String,
    pub count: u32,
}

impl DailyRewardCounter {
    pub fn fresh(today: NaiveDate) -> Self {
        Self {
            date: date_key(today),
            count: 0,
        }
    }

    /// Reads today's counter. Another day's counter, or a corrupt one, is
    /// replaced by a zero count for today and written back.
    pub fn load(store: &mut dyn KeyValueStore, today: NaiveDate) -> Self {
        let saved = store.get(DAILY_REWARDS_KEY).and_then(|raw| {
            serde_json::from_str::<DailyRewardCounter>(&raw)
                .map_err(|e| log::warn!("corrupt daily reward counter ({}), resetting", e))
                .ok()
        });
        let needs_save = saved.is_none();
        let mut counter = saved.unwrap_or_else(|| Self::fresh(today));
        if counter.roll_over(today) || needs_save {
            counter.save(store);
        }
        counter
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) {
        match serde_json::to_string(self) {
            Ok(json) => store.set(DAILY_REWARDS_KEY, &json),
            Err(e) => log::warn!("failed to encode daily reward counter: {}", e),
        }
    }

    /// Resets to zero if the stored date is not `today`. Returns true when it
    /// did.
    pub fn roll_over(&mut self, today: NaiveDate) -> bool {
        let key = date_key(today);
        if self.date == key {
            return false;
        }
        self.date = key;
        self.count = 0;
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RewardOutcome {
    /// A catalog draw; `count` is today's total including this one.
    Reward { entry: RewardEntry, count: u32 },
    Praise { message: String },
}

#[derive(Debug, Clone)]
pub struct RewardGate {
    pub counter: DailyRewardCounter,
    pub catalog: RewardCatalog,
}

impl RewardGate {
    pub fn load(store: &mut dyn KeyValueStore, today: NaiveDate) -> Self {
        Self {
            counter: DailyRewardCounter::load(store, today),
            catalog: RewardCatalog::load(store),
        }
    }

    pub fn draw<R: Rng + ?Sized>(
        &mut self,
        today: NaiveDate,
        rng: &mut R,
        store: &mut dyn KeyValueStore,
    ) -> RewardOutcome {
        if self.counter.roll_over(today) {
            self.counter.save(store);
        }
        if self.counter.count < DAILY_REWARD_LIMIT {
            if let Some(entry) = self.catalog.entries().choose(rng).cloned() {
                self.counter.count += 1;
                self.counter.save(store);
                log::info!(
                    "reward drawn: {} ({}/{})",
                    entry.name,
                    self.counter.count,
                    DAILY_REWARD_LIMIT
                );
                return RewardOutcome::Reward {
                    entry,
                    count: self.counter.count,
                };
            }
        }
        let message = PRAISE_MESSAGES
            .choose(rng)
            .copied()
            .unwrap_or(PRAISE_MESSAGES[0])
            .to_string();
        RewardOutcome::Praise { message }
    }

    pub fn reset_daily(&mut self, today: NaiveDate, store: &mut dyn KeyValueStore) {
        self.counter = DailyRewardCounter::fresh(today);
        self.counter.save(store);
    }

    pub fn update_catalog(
        &mut self,
        edits: &[(String, String)],
        store: &mut dyn KeyValueStore,
    ) -> Result<(), CatalogError> {
        self.catalog.update(edits)?;
        self.catalog.save(store);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use rand::{SeedableRng, rngs::StdRng};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    #[test]
    fn date_key_matches_persisted_format() {
        assert_eq!(date_key(day(17)), "Sat Oct 17 2026");
        assert_eq!(date_key(day(5)), "Mon Oct 05 2026");
    }

    #[test]
    fn fourth_draw_is_praise() {
        let mut store = MemoryStore::new();
        let mut rng = StdRng::seed_from_u64(11);
        let mut gate = RewardGate::load(&mut store, day(17));
        for expected in 1..=3 {
            match gate.draw(day(17), &mut rng, &mut store) {
                RewardOutcome::Reward { entry, count } => {
                    assert_eq!(count, expected);
                    assert!(gate.catalog.entries().contains(&entry));
                }
                other => panic!("expected reward, got {:?}", other),
            }
        }
        match gate.draw(day(17), &mut rng, &mut store) {
            RewardOutcome::Praise { message } => {
                assert!(PRAISE_MESSAGES.contains(&message.as_str()))
            }
            other => panic!("expected praise, got {:?}", other),
        }
        assert_eq!(gate.counter.count, 3);
        assert_eq!(
            store.get(DAILY_REWARDS_KEY).as_deref(),
            Some(r#"{"date":"Sat Oct 17 2026","count":3}"#)
        );
    }

    #[test]
    fn new_day_resets_count() {
        let mut store = MemoryStore::with_entries([(
            DAILY_REWARDS_KEY,
            r#"{"date":"Fri Oct 16 2026","count":3}"#,
        )]);
        let mut rng = StdRng::seed_from_u64(12);
        let mut gate = RewardGate::load(&mut store, day(16));
        assert_eq!(gate.counter.count, 3);
        let outcome = gate.draw(day(17), &mut rng, &mut store);
        assert!(matches!(outcome, RewardOutcome::Reward { count: 1, .. }));
        assert_eq!(gate.counter.date, "Sat Oct 17 2026");
    }

    #[test]
    fn stale_counter_is_reset_on_load() {
        let mut store = MemoryStore::with_entries([(
            DAILY_REWARDS_KEY,
            r#"{"date":"Thu Oct 15 2026","count":2}"#,
        )]);
        let counter = DailyRewardCounter::load(&mut store, day(17));
        assert_eq!(counter, DailyRewardCounter::fresh(day(17)));
        assert_eq!(
            store.get(DAILY_REWARDS_KEY).as_deref(),
            Some(r#"{"date":"Sat Oct 17 2026","count":0}"#)
        );
    }

    #[test]
    fn corrupt_values_fall_back_to_defaults() {
        let mut store = MemoryStore::with_entries([
            (DAILY_REWARDS_KEY, "not json"),
            (CUSTOM_REWARDS_KEY, "[{\"name\": 3}]"),
        ]);
        let gate = RewardGate::load(&mut store, day(17));
        assert_eq!(gate.counter.count, 0);
        assert_eq!(gate.catalog, RewardCatalog::default());
    }

    #[test]
    fn saved_catalog_without_colour_loads() {
        let store = MemoryStore::with_entries([(
            CUSTOM_REWARDS_KEY,
            r#"[{"name":"Sticker","emoji":"⭐"}]"#,
        )]);
        let catalog = RewardCatalog::load(&store);
        assert_eq!(catalog.entries().len(), 1);
        assert_eq!(catalog.entries()[0].name, "Sticker");
        assert_eq!(catalog.entries()[0].color, DEFAULT_COLOR);
    }

    #[test]
    fn catalog_update_is_all_or_nothing() {
        let mut store = MemoryStore::new();
        let mut gate = RewardGate::load(&mut store, day(17));
        let bad = vec![
            ("⭐".to_string(), "Sticker".to_string()),
            ("  ".to_string(), "Toy".to_string()),
        ];
        assert_eq!(
            gate.update_catalog(&bad, &mut store),
            Err(CatalogError::EmptyField { index: 1 })
        );
        assert_eq!(gate.catalog, RewardCatalog::default());
        assert_eq!(store.get(CUSTOM_REWARDS_KEY), None);

        let good = vec![(" ⭐ ".to_string(), "Sticker".to_string())];
        gate.update_catalog(&good, &mut store).unwrap();
        assert_eq!(gate.catalog.entries()[0].emoji, "⭐");
        assert_eq!(gate.catalog.entries()[0].color, "#ff6b6b");
        let saved: serde_json::Value =
            serde_json::from_str(&store.get(CUSTOM_REWARDS_KEY).unwrap()).unwrap();
        assert_eq!(saved[0]["name"], "Sticker");
        assert_eq!(gate.update_catalog(&[], &mut store), Err(CatalogError::Empty));
    }

    #[test]
    fn admin_reset_restores_draws() {
        let mut store = MemoryStore::new();
        let mut rng = StdRng::seed_from_u64(13);
        let mut gate = RewardGate::load(&mut store, day(17));
        for _ in 0..4 {
            gate.draw(day(17), &mut rng, &mut store);
        }
        gate.reset_daily(day(17), &mut store);
        assert!(matches!(
            gate.draw(day(17), &mut rng, &mut store),
            RewardOutcome::Reward { count: 1, .. }
        ));
    }
}
