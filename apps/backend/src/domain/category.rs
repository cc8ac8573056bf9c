//! Scoring categories and scorecard keys.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::dice::Hand;
use crate::domain::scoring;
use crate::errors::domain::InvalidMove;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Aces,
    Deuces,
    Threes,
    Fours,
    Fives,
    Sixes,
    FourOfAKind,
    FullHouse,
    SmallStraight,
    LargeStraight,
    Chance,
    Yacht,
}

impl Category {
    pub const ALL: [Category; 12] = [
        Category::Aces,
        Category::Deuces,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::SmallStraight,
        Category::LargeStraight,
        Category::Chance,
        Category::Yacht,
    ];

    pub const UPPER: [Category; 6] = [
        Category::Aces,
        Category::Deuces,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
    ];

    /// Face value for upper-section categories.
    pub fn face(self) -> Option<u8> {
        match self {
            Category::Aces => Some(1),
            Category::Deuces => Some(2),
            Category::Threes => Some(3),
            Category::Fours => Some(4),
            Category::Fives => Some(5),
            Category::Sixes => Some(6),
            _ => None,
        }
    }

    pub fn is_upper(self) -> bool {
        self.face().is_some()
    }

    /// Wire tag, identical to the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Aces => "aces",
            Category::Deuces => "deuces",
            Category::Threes => "threes",
            Category::Fours => "fours",
            Category::Fives => "fives",
            Category::Sixes => "sixes",
            Category::FourOfAKind => "fourOfAKind",
            Category::FullHouse => "fullHouse",
            Category::SmallStraight => "smallStraight",
            Category::LargeStraight => "largeStraight",
            Category::Chance => "chance",
            Category::Yacht => "yacht",
        }
    }

    pub fn score(self, hand: &Hand) -> u16 {
        match self {
            Category::Aces
            | Category::Deuces
            | Category::Threes
            | Category::Fours
            | Category::Fives
            | Category::Sixes => {
                let face = self.face().unwrap_or_default();
                scoring::numbered(face, hand)
            }
            Category::FourOfAKind => scoring::four_of_a_kind(hand),
            Category::FullHouse => scoring::full_house(hand),
            Category::SmallStraight => scoring::small_straight(hand),
            Category::LargeStraight => scoring::large_straight(hand),
            Category::Chance => scoring::chance(hand),
            Category::Yacht => scoring::yacht(hand),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = InvalidMove;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| InvalidMove::UnknownCategory(s.to_string()))
    }
}

/// Key of a scorecard entry: a category or the one-off upper bonus.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScoreKey {
    Category(Category),
    Bonus(BonusTag),
}

impl ScoreKey {
    pub const BONUS: ScoreKey = ScoreKey::Bonus(BonusTag::Bonus);
}

impl From<Category> for ScoreKey {
    fn from(c: Category) -> Self {
        ScoreKey::Category(c)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BonusTag {
    Bonus,
}
