//! Public snapshot of a room's game, as sent to both players.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::category::Category;
use crate::domain::dice::Die;
use crate::domain::game::Phase;
use crate::domain::player::{PerSlot, Player, Slot, Winner};
use crate::domain::scorecard::Scorecard;

/// Full game state for one room. Sent after every accepted action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub room: String,
    pub round: u8,
    pub turn: Slot,
    pub p1: Option<Player>,
    pub p2: Option<Player>,
    pub rolls_left: u8,
    pub dice_in_play: Vec<Die>,
    pub dice_kept: Vec<Die>,
    pub score_card: PerSlot<Scorecard>,
    pub score_hints: BTreeMap<Category, u16>,
    pub upper_totals: PerSlot<u16>,
    pub totals: PerSlot<u16>,
    pub winner: Option<Winner>,
    pub phase: Phase,
}

impl GameSnapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
