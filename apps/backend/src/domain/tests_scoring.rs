use crate::domain::dice::{hand, Hand};
use crate::domain::scoring::*;
use crate::domain::Category;

fn h(faces: [u8; 5]) -> Hand {
    hand(faces).expect("valid faces")
}

#[test]
fn numbered_categories_sum_matching_faces() {
    let roll = h([1, 3, 3, 6, 3]);
    assert_eq!(score(Category::Aces, &roll), 1);
    assert_eq!(score(Category::Deuces, &roll), 0);
    assert_eq!(score(Category::Threes, &roll), 9);
    assert_eq!(score(Category::Sixes, &roll), 6);
}

#[test]
fn four_of_a_kind_sums_all_dice() {
    assert_eq!(four_of_a_kind(&h([4, 4, 4, 4, 2])), 18);
    // Five of a kind also has four of a kind.
    assert_eq!(four_of_a_kind(&h([5, 5, 5, 5, 5])), 25);
    assert_eq!(four_of_a_kind(&h([4, 4, 4, 2, 2])), 0);
}

#[test]
fn full_house_needs_two_distinct_faces() {
    assert_eq!(full_house(&h([2, 2, 5, 5, 5])), FULL_HOUSE_SCORE);
    assert_eq!(full_house(&h([2, 2, 2, 5, 5])), FULL_HOUSE_SCORE);
    assert_eq!(full_house(&h([5, 2, 5, 2, 5])), FULL_HOUSE_SCORE);
    assert_eq!(full_house(&h([3, 3, 3, 3, 3])), 0);
    assert_eq!(full_house(&h([3, 3, 3, 3, 1])), 0);
    assert_eq!(full_house(&h([1, 2, 3, 4, 5])), 0);
}

#[test]
fn small_straight_ignores_duplicates() {
    assert_eq!(small_straight(&h([1, 2, 3, 4, 4])), SMALL_STRAIGHT_SCORE);
    assert_eq!(small_straight(&h([6, 3, 5, 4, 1])), SMALL_STRAIGHT_SCORE);
    assert_eq!(small_straight(&h([2, 3, 4, 5, 6])), SMALL_STRAIGHT_SCORE);
    assert_eq!(small_straight(&h([1, 2, 3, 5, 6])), 0);
    assert_eq!(small_straight(&h([1, 1, 2, 2, 3])), 0);
}

#[test]
fn large_straight_needs_five_in_a_row() {
    assert_eq!(large_straight(&h([2, 3, 4, 5, 6])), LARGE_STRAIGHT_SCORE);
    assert_eq!(large_straight(&h([5, 1, 4, 2, 3])), LARGE_STRAIGHT_SCORE);
    assert_eq!(large_straight(&h([1, 1, 2, 3, 4])), 0);
    assert_eq!(large_straight(&h([1, 2, 3, 4, 6])), 0);
}

#[test]
fn chance_and_yacht() {
    assert_eq!(chance(&h([6, 6, 5, 1, 2])), 20);
    assert_eq!(yacht(&h([2, 2, 2, 2, 2])), YACHT_SCORE);
    assert_eq!(yacht(&h([2, 2, 2, 2, 1])), 0);
}

#[test]
fn score_all_covers_every_category_in_order() {
    let all = score_all(&h([3, 3, 3, 2, 2]));
    let categories: Vec<Category> = all.iter().map(|(c, _)| *c).collect();
    assert_eq!(categories, Category::ALL.to_vec());

    let lookup = |c: Category| all.iter().find(|(k, _)| *k == c).map(|(_, s)| *s);
    assert_eq!(lookup(Category::FullHouse), Some(FULL_HOUSE_SCORE));
    assert_eq!(lookup(Category::Threes), Some(9));
    assert_eq!(lookup(Category::Deuces), Some(4));
    assert_eq!(lookup(Category::Chance), Some(13));
    assert_eq!(lookup(Category::Yacht), Some(0));
}
