//! Player slots and identities.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Longest nickname kept, in characters.
pub const MAX_NICKNAME_CHARS: usize = 32;

/// Seat within a match. P1 always opens each round.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    P1,
    P2,
}

impl Slot {
    pub const BOTH: [Slot; 2] = [Slot::P1, Slot::P2];

    pub fn other(self) -> Slot {
        match self {
            Slot::P1 => Slot::P2,
            Slot::P2 => Slot::P1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Slot::P1 => "p1",
            Slot::P2 => "p2",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a finished game.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    P1,
    P2,
    Tie,
}

impl From<Slot> for Winner {
    fn from(slot: Slot) -> Self {
        match slot {
            Slot::P1 => Winner::P1,
            Slot::P2 => Winner::P2,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub player_num: Slot,
    pub nickname: String,
}

impl Player {
    pub fn new(slot: Slot) -> Self {
        Self {
            player_num: slot,
            nickname: String::new(),
        }
    }

    /// Trims surrounding whitespace and caps the length.
    pub fn set_nickname(&mut self, raw: &str) {
        self.nickname = raw.trim().chars().take(MAX_NICKNAME_CHARS).collect();
    }
}

/// One value per slot, serialized as `{ "p1": .., "p2": .. }`.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PerSlot<T> {
    pub p1: T,
    pub p2: T,
}

impl<T> PerSlot<T> {
    pub fn get(&self, slot: Slot) -> &T {
        match slot {
            Slot::P1 => &self.p1,
            Slot::P2 => &self.p2,
        }
    }

    pub fn get_mut(&mut self, slot: Slot) -> &mut T {
        match slot {
            Slot::P1 => &mut self.p1,
            Slot::P2 => &mut self.p2,
        }
    }
}
