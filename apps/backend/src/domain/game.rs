//! Turn-based yacht engine.
//!
//! A [`Game`] owns the dice pools, both scorecards and the dice source. Every
//! mutator returns `Result<(), InvalidMove>`; an `Err` leaves the game
//! exactly as it was.

use std::collections::BTreeMap;
use std::fmt;

use crate::domain::category::Category;
use crate::domain::dice::{DiceSource, Die, Hand, SeededDice, DICE_PER_HAND, MIN_FACE};
use crate::domain::player::{PerSlot, Player, Slot, Winner};
use crate::domain::scorecard::Scorecard;
use crate::domain::scoring;
use crate::domain::snapshot::GameSnapshot;
use crate::errors::domain::InvalidMove;

pub const ROUNDS: u8 = 12;
pub const ROLLS_PER_TURN: u8 = 3;

/// Derived progression state; never stored.
#[derive(Debug, Clone, Copy, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    /// No roll yet this turn.
    AwaitingRoll,
    /// At least one roll made; keep, unkeep, score (and re-roll while rolls remain).
    AwaitingDecision,
    /// Winner decided. Only a restart is accepted.
    GameOver,
}

pub struct Game {
    round: u8,
    turn: Slot,
    rolls_left: u8,
    in_play: Vec<Die>,
    kept: Vec<Die>,
    scorecards: PerSlot<Scorecard>,
    hints: BTreeMap<Category, u16>,
    upper_totals: PerSlot<u16>,
    totals: PerSlot<u16>,
    winner: Option<Winner>,
    dice: Box<dyn DiceSource>,
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("round", &self.round)
            .field("turn", &self.turn)
            .field("rolls_left", &self.rolls_left)
            .field("in_play", &self.in_play)
            .field("kept", &self.kept)
            .field("totals", &self.totals)
            .field("winner", &self.winner)
            .finish_non_exhaustive()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

fn placeholder_dice() -> Vec<Die> {
    Die::new(MIN_FACE)
        .map(|one| vec![one; DICE_PER_HAND])
        .unwrap_or_default()
}

impl Game {
    /// Fresh game with OS-seeded dice.
    pub fn new() -> Self {
        Self::with_dice(Box::new(SeededDice::from_entropy()))
    }

    pub fn with_dice(dice: Box<dyn DiceSource>) -> Self {
        Self {
            round: 1,
            turn: Slot::P1,
            rolls_left: ROLLS_PER_TURN,
            in_play: placeholder_dice(),
            kept: Vec::with_capacity(DICE_PER_HAND),
            scorecards: PerSlot::default(),
            hints: BTreeMap::new(),
            upper_totals: PerSlot::default(),
            totals: PerSlot::default(),
            winner: None,
            dice,
        }
    }

    pub fn round(&self) -> u8 {
        self.round
    }

    pub fn turn(&self) -> Slot {
        self.turn
    }

    pub fn rolls_left(&self) -> u8 {
        self.rolls_left
    }

    pub fn in_play(&self) -> &[Die] {
        &self.in_play
    }

    pub fn kept(&self) -> &[Die] {
        &self.kept
    }

    pub fn scorecard(&self, slot: Slot) -> &Scorecard {
        self.scorecards.get(slot)
    }

    pub fn hints(&self) -> &BTreeMap<Category, u16> {
        &self.hints
    }

    pub fn upper_total(&self, slot: Slot) -> u16 {
        *self.upper_totals.get(slot)
    }

    pub fn total(&self, slot: Slot) -> u16 {
        *self.totals.get(slot)
    }

    pub fn winner(&self) -> Option<Winner> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    pub fn phase(&self) -> Phase {
        if self.is_over() {
            Phase::GameOver
        } else if self.rolls_left == ROLLS_PER_TURN {
            Phase::AwaitingRoll
        } else {
            Phase::AwaitingDecision
        }
    }

    /// All five dice, in-play first. `None` once the pools are cleared.
    pub fn hand(&self) -> Option<Hand> {
        let dice: Vec<Die> = self.in_play.iter().chain(&self.kept).copied().collect();
        Hand::try_from(dice).ok()
    }

    fn ensure_live(&self) -> Result<(), InvalidMove> {
        if self.is_over() {
            Err(InvalidMove::GameOver)
        } else {
            Ok(())
        }
    }

    /// Re-roll every in-play die; kept dice are untouched.
    pub fn roll(&mut self) -> Result<(), InvalidMove> {
        self.ensure_live()?;
        if self.rolls_left == 0 {
            return Err(InvalidMove::NoRollsLeft);
        }

        for die in self.in_play.iter_mut() {
            *die = self.dice.roll();
        }
        self.rolls_left -= 1;
        self.refresh_hints();
        Ok(())
    }

    /// Move `in_play[index]` to the end of the kept pool.
    pub fn keep_die(&mut self, index: usize) -> Result<(), InvalidMove> {
        self.ensure_live()?;
        let die = take_at(&mut self.in_play, index)?;
        self.kept.push(die);
        Ok(())
    }

    /// Move `kept[index]` back to the end of the in-play pool.
    pub fn unkeep_die(&mut self, index: usize) -> Result<(), InvalidMove> {
        self.ensure_live()?;
        let die = take_at(&mut self.kept, index)?;
        self.in_play.push(die);
        Ok(())
    }

    /// Record the current hand under `category` for the player on turn,
    /// then either end the game or pass the turn.
    pub fn score_roll(&mut self, category: Category) -> Result<(), InvalidMove> {
        self.ensure_live()?;
        let scorer = self.turn;
        if self.scorecards.get(scorer).has(category) {
            return Err(InvalidMove::CategoryAlreadyScored(category));
        }
        let hand = self.hand().ok_or(InvalidMove::GameOver)?;

        let card = self.scorecards.get_mut(scorer);
        card.record(category, scoring::score(category, &hand));
        *self.upper_totals.get_mut(scorer) = card.upper_total();
        card.settle_bonus();
        *self.totals.get_mut(scorer) = card.total();

        if self.round == ROUNDS && scorer == Slot::P2 {
            self.finish();
        } else {
            self.advance_turn();
        }
        Ok(())
    }

    /// Back to the creation state. The dice source carries on.
    pub fn reset(&mut self) {
        self.round = 1;
        self.turn = Slot::P1;
        self.rolls_left = ROLLS_PER_TURN;
        self.in_play = placeholder_dice();
        self.kept.clear();
        self.scorecards = PerSlot::default();
        self.hints.clear();
        self.upper_totals = PerSlot::default();
        self.totals = PerSlot::default();
        self.winner = None;
    }

    /// Wire view of the game for `room`, with the room's roster.
    pub fn snapshot(&self, room: &str, roster: &PerSlot<Option<Player>>) -> GameSnapshot {
        GameSnapshot {
            room: room.to_owned(),
            round: self.round,
            turn: self.turn,
            p1: roster.p1.clone(),
            p2: roster.p2.clone(),
            rolls_left: self.rolls_left,
            dice_in_play: self.in_play.clone(),
            dice_kept: self.kept.clone(),
            score_card: self.scorecards.clone(),
            score_hints: self.hints.clone(),
            upper_totals: self.upper_totals.clone(),
            totals: self.totals.clone(),
            winner: self.winner,
            phase: self.phase(),
        }
    }

    fn refresh_hints(&mut self) {
        self.hints.clear();
        let Some(hand) = self.hand() else {
            return;
        };
        let card = self.scorecards.get(self.turn);
        for category in card.open_categories() {
            self.hints.insert(category, scoring::score(category, &hand));
        }
    }

    fn advance_turn(&mut self) {
        if self.turn == Slot::P2 {
            self.round += 1;
        }
        self.turn = self.turn.other();
        self.in_play.append(&mut self.kept);
        self.rolls_left = ROLLS_PER_TURN;
        self.hints.clear();
    }

    fn finish(&mut self) {
        let (p1, p2) = (self.totals.p1, self.totals.p2);
        self.winner = Some(match p1.cmp(&p2) {
            std::cmp::Ordering::Greater => Winner::P1,
            std::cmp::Ordering::Less => Winner::P2,
            std::cmp::Ordering::Equal => Winner::Tie,
        });
        self.in_play.clear();
        self.kept.clear();
        self.hints.clear();
        self.rolls_left = 0;
    }
}

fn take_at(pool: &mut Vec<Die>, index: usize) -> Result<Die, InvalidMove> {
    if index >= pool.len() {
        return Err(InvalidMove::DieIndexOutOfRange {
            index,
            len: pool.len(),
        });
    }
    Ok(pool.remove(index))
}
