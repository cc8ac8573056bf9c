//! Pure scoring rules over a five-die hand.
//!
//! Every function here is total: callers hand in five valid faces and get a
//! non-negative score back. Dispatch from a [`Category`] lives in
//! [`Category::score`].

use crate::domain::category::Category;
use crate::domain::dice::{Hand, MAX_FACE};

pub const FULL_HOUSE_SCORE: u16 = 25;
pub const SMALL_STRAIGHT_SCORE: u16 = 30;
pub const LARGE_STRAIGHT_SCORE: u16 = 40;
pub const YACHT_SCORE: u16 = 50;

/// Upper-section total needed for the bonus.
pub const UPPER_BONUS_THRESHOLD: u16 = 63;
pub const UPPER_BONUS_SCORE: u16 = 35;

/// Score a hand for one category.
pub fn score(category: Category, hand: &Hand) -> u16 {
    category.score(hand)
}

/// Score a hand for every category, in [`Category::ALL`] order.
pub fn score_all(hand: &Hand) -> [(Category, u16); 12] {
    Category::ALL.map(|c| (c, c.score(hand)))
}

fn sum(hand: &Hand) -> u16 {
    hand.iter().map(|d| u16::from(d.face())).sum()
}

fn face_counts(hand: &Hand) -> [u8; MAX_FACE as usize + 1] {
    let mut counts = [0u8; MAX_FACE as usize + 1];
    for die in hand {
        counts[die.face() as usize] += 1;
    }
    counts
}

fn sorted_faces(hand: &Hand) -> [u8; 5] {
    let mut faces = hand.map(|d| d.face());
    faces.sort_unstable();
    faces
}

pub fn numbered(face: u8, hand: &Hand) -> u16 {
    hand.iter()
        .filter(|d| d.face() == face)
        .map(|d| u16::from(d.face()))
        .sum()
}

pub fn four_of_a_kind(hand: &Hand) -> u16 {
    if face_counts(hand).iter().any(|&n| n >= 4) {
        sum(hand)
    } else {
        0
    }
}

/// Three of one face and two of a different face.
///
/// Five of a kind has no second face and does not count.
pub fn full_house(hand: &Hand) -> u16 {
    let d = sorted_faces(hand);
    let pair_then_triple = d[0] == d[1] && d[2] == d[3] && d[3] == d[4];
    let triple_then_pair = d[0] == d[1] && d[1] == d[2] && d[3] == d[4];
    if (pair_then_triple || triple_then_pair) && d[0] != d[4] {
        FULL_HOUSE_SCORE
    } else {
        0
    }
}

pub fn small_straight(hand: &Hand) -> u16 {
    let mut unique = sorted_faces(hand).to_vec();
    unique.dedup();

    let mut run = 1;
    for pair in unique.windows(2) {
        run = if pair[1] == pair[0] + 1 { run + 1 } else { 1 };
        if run == 4 {
            return SMALL_STRAIGHT_SCORE;
        }
    }
    0
}

pub fn large_straight(hand: &Hand) -> u16 {
    let d = sorted_faces(hand);
    if d.windows(2).all(|pair| pair[1] == pair[0] + 1) {
        LARGE_STRAIGHT_SCORE
    } else {
        0
    }
}

pub fn chance(hand: &Hand) -> u16 {
    sum(hand)
}

pub fn yacht(hand: &Hand) -> u16 {
    if hand.iter().all(|d| *d == hand[0]) {
        YACHT_SCORE
    } else {
        0
    }
}
