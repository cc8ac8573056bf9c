//! Dice values, hands, and the sources that roll them.

use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

pub const DICE_PER_HAND: usize = 5;
pub const MIN_FACE: u8 = 1;
pub const MAX_FACE: u8 = 6;

/// A single die face in `1..=6`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Die(u8);

impl Die {
    pub fn new(face: u8) -> Option<Self> {
        (MIN_FACE..=MAX_FACE).contains(&face).then_some(Self(face))
    }

    #[inline]
    pub fn face(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Die {
    type Error = String;

    fn try_from(face: u8) -> Result<Self, Self::Error> {
        Die::new(face).ok_or_else(|| format!("die face {face} outside {MIN_FACE}..={MAX_FACE}"))
    }
}

impl From<Die> for u8 {
    fn from(die: Die) -> Self {
        die.0
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Five dice scored together.
pub type Hand = [Die; DICE_PER_HAND];

/// Build a hand from raw faces. Returns `None` on any out-of-range face.
pub fn hand(faces: [u8; DICE_PER_HAND]) -> Option<Hand> {
    let mut out = [Die(MIN_FACE); DICE_PER_HAND];
    for (slot, face) in out.iter_mut().zip(faces) {
        *slot = Die::new(face)?;
    }
    Some(out)
}

/// Anything that can produce a fresh die value.
///
/// The engine only ever asks for one die at a time, so sources that replay
/// a scripted sequence stay simple.
pub trait DiceSource: Send + fmt::Debug {
    fn roll(&mut self) -> Die;
}

/// Uniform dice backed by ChaCha8.
#[derive(Debug)]
pub struct SeededDice {
    rng: ChaCha8Rng,
}

impl SeededDice {
    /// Seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_os_rng(),
        }
    }

    /// Reproducible sequence for a given seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl DiceSource for SeededDice {
    fn roll(&mut self) -> Die {
        Die(self.rng.random_range(MIN_FACE..=MAX_FACE))
    }
}

/// Replays a fixed sequence of faces, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct FixedDice {
    faces: Vec<Die>,
    cursor: usize,
}

impl FixedDice {
    /// Panics if `faces` is empty.
    pub fn new(faces: Vec<Die>) -> Self {
        assert!(!faces.is_empty(), "FixedDice needs at least one face");
        Self { faces, cursor: 0 }
    }

    pub fn repeating(face: Die) -> Self {
        Self::new(vec![face])
    }
}

impl DiceSource for FixedDice {
    fn roll(&mut self) -> Die {
        let die = self.faces[self.cursor % self.faces.len()];
        self.cursor = self.cursor.wrapping_add(1);
        die
    }
}
