//! Domain layer: pure game logic types and helpers.

pub mod category;
pub mod dice;
pub mod game;
pub mod player;
pub mod scorecard;
pub mod scoring;
pub mod snapshot;

#[cfg(test)]
mod tests_scoring;

// Re-exports for ergonomics
pub use category::{Category, ScoreKey};
pub use dice::{DiceSource, Die, FixedDice, Hand, SeededDice};
pub use game::{Game, Phase};
pub use player::{PerSlot, Player, Slot, Winner};
pub use scorecard::Scorecard;
pub use snapshot::GameSnapshot;
