//! Per-player scorecard with write-once entries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::category::{Category, ScoreKey};
use crate::domain::scoring::{UPPER_BONUS_SCORE, UPPER_BONUS_THRESHOLD};

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scorecard(BTreeMap<ScoreKey, u16>);

impl Scorecard {
    pub fn get(&self, key: impl Into<ScoreKey>) -> Option<u16> {
        self.0.get(&key.into()).copied()
    }

    pub fn bonus(&self) -> Option<u16> {
        self.0.get(&ScoreKey::BONUS).copied()
    }

    pub fn has(&self, category: Category) -> bool {
        self.0.contains_key(&ScoreKey::Category(category))
    }

    /// Insert only if absent. Returns whether the entry was written.
    pub fn record(&mut self, category: Category, points: u16) -> bool {
        insert_once(&mut self.0, ScoreKey::Category(category), points)
    }

    /// Decide the upper bonus once all six upper categories are filled.
    ///
    /// A no-op while any upper category is open or once a bonus exists.
    pub fn settle_bonus(&mut self) -> Option<u16> {
        if !self.upper_complete() || self.bonus().is_some() {
            return None;
        }
        let points = if self.upper_total() >= UPPER_BONUS_THRESHOLD {
            UPPER_BONUS_SCORE
        } else {
            0
        };
        insert_once(&mut self.0, ScoreKey::BONUS, points);
        Some(points)
    }

    pub fn upper_complete(&self) -> bool {
        Category::UPPER.iter().all(|c| self.has(*c))
    }

    /// Sum of the upper entries present so far.
    pub fn upper_total(&self) -> u16 {
        Category::UPPER.iter().filter_map(|c| self.get(*c)).sum()
    }

    /// Sum of every entry, bonus included.
    pub fn total(&self) -> u16 {
        self.0.values().sum()
    }

    /// Categories not yet scored, in canonical order.
    pub fn open_categories(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL.into_iter().filter(|c| !self.has(*c))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn insert_once(map: &mut BTreeMap<ScoreKey, u16>, key: ScoreKey, points: u16) -> bool {
    if map.contains_key(&key) {
        return false;
    }
    map.insert(key, points);
    true
}
