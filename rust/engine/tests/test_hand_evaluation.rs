use gambit_engine::cards::{Card, Rank as R, Suit as S};
use gambit_engine::hand::{compare_hands, evaluate_best_hand, evaluate_hand, Tier};

fn c(s: S, r: R) -> Card {
    Card::new(s, r)
}

#[test]
fn ace_high_straight_flush_takes_the_top_tier() {
    let cards = [
        c(S::Spades, R::Ace),
        c(S::Spades, R::King),
        c(S::Spades, R::Queen),
        c(S::Spades, R::Jack),
        c(S::Spades, R::Ten),
    ];
    let hand = evaluate_hand(&cards);
    assert_eq!(hand.tier, Tier::RoyalFlush);
    assert_eq!(hand.kickers[0], 14);
}

#[test]
fn king_high_straight_flush_sits_below_the_top_tier() {
    let cards = [
        c(S::Hearts, R::King),
        c(S::Hearts, R::Queen),
        c(S::Hearts, R::Jack),
        c(S::Hearts, R::Ten),
        c(S::Hearts, R::Nine),
    ];
    let hand = evaluate_hand(&cards);
    assert_eq!(hand.tier, Tier::StraightFlush);
    assert_eq!(hand.kickers[0], 13);
}

#[test]
fn wheel_is_a_five_high_straight() {
    let wheel = [
        c(S::Clubs, R::Ace),
        c(S::Diamonds, R::Two),
        c(S::Hearts, R::Three),
        c(S::Spades, R::Four),
        c(S::Clubs, R::Five),
    ];
    let hand = evaluate_hand(&wheel);
    assert_eq!(hand.tier, Tier::Straight);
    assert_eq!(hand.kickers[0], 5);

    let six_high = [
        c(S::Clubs, R::Two),
        c(S::Diamonds, R::Three),
        c(S::Hearts, R::Four),
        c(S::Spades, R::Five),
        c(S::Clubs, R::Six),
    ];
    let other = evaluate_hand(&six_high);
    assert_eq!(other.tier, Tier::Straight);
    assert!(compare_hands(&other, &hand).is_gt());
}

#[test]
fn suited_wheel_is_a_straight_flush_not_the_top_tier() {
    let cards = [
        c(S::Diamonds, R::Ace),
        c(S::Diamonds, R::Two),
        c(S::Diamonds, R::Three),
        c(S::Diamonds, R::Four),
        c(S::Diamonds, R::Five),
    ];
    let hand = evaluate_hand(&cards);
    assert_eq!(hand.tier, Tier::StraightFlush);
    assert_eq!(hand.kickers[0], 5);
}

#[test]
fn royal_flush_beats_full_house() {
    let royal = evaluate_hand(&[
        c(S::Spades, R::Ace),
        c(S::Spades, R::King),
        c(S::Spades, R::Queen),
        c(S::Spades, R::Jack),
        c(S::Spades, R::Ten),
    ]);
    let full_house = evaluate_hand(&[
        c(S::Diamonds, R::Nine),
        c(S::Clubs, R::Nine),
        c(S::Hearts, R::Nine),
        c(S::Spades, R::Two),
        c(S::Clubs, R::Two),
    ]);
    assert_eq!(full_house.tier, Tier::FullHouse);
    assert_eq!(full_house.kickers[0], 9);
    assert_eq!(full_house.kickers[1], 2);
    assert!(compare_hands(&royal, &full_house).is_gt());
}

#[test]
fn result_is_invariant_under_input_permutation() {
    let cards = [
        c(S::Clubs, R::Queen),
        c(S::Hearts, R::Queen),
        c(S::Spades, R::Seven),
        c(S::Diamonds, R::Seven),
        c(S::Clubs, R::Two),
    ];
    let baseline = evaluate_hand(&cards);
    let mut reversed = cards;
    reversed.reverse();
    let rotated = [cards[3], cards[0], cards[4], cards[1], cards[2]];
    assert_eq!(evaluate_hand(&reversed), baseline);
    assert_eq!(evaluate_hand(&rotated).tier, baseline.tier);
    assert_eq!(evaluate_hand(&rotated).kickers, baseline.kickers);
}

#[test]
fn result_is_invariant_under_suit_relabeling() {
    // Non-flush hand: swapping every suit must not change tier or kickers.
    let original = evaluate_hand(&[
        c(S::Clubs, R::King),
        c(S::Hearts, R::King),
        c(S::Spades, R::Nine),
        c(S::Diamonds, R::Five),
        c(S::Clubs, R::Three),
    ]);
    let relabeled = evaluate_hand(&[
        c(S::Hearts, R::King),
        c(S::Spades, R::King),
        c(S::Diamonds, R::Nine),
        c(S::Clubs, R::Five),
        c(S::Hearts, R::Three),
    ]);
    assert_eq!(original.tier, relabeled.tier);
    assert_eq!(original.kickers, relabeled.kickers);
}

#[test]
fn two_pair_kickers_are_high_low_then_side_card() {
    let hand = evaluate_hand(&[
        c(S::Clubs, R::Four),
        c(S::Hearts, R::Jack),
        c(S::Spades, R::Four),
        c(S::Diamonds, R::Jack),
        c(S::Clubs, R::Ace),
    ]);
    assert_eq!(hand.tier, Tier::TwoPair);
    assert_eq!(hand.kickers, [11, 4, 14, 0, 0]);
}

#[test]
fn trips_keep_the_two_highest_kickers() {
    let hand = evaluate_hand(&[
        c(S::Clubs, R::Eight),
        c(S::Hearts, R::Eight),
        c(S::Spades, R::Eight),
        c(S::Diamonds, R::King),
        c(S::Clubs, R::Four),
    ]);
    assert_eq!(hand.tier, Tier::ThreeOfAKind);
    assert_eq!(hand.kickers, [8, 13, 4, 0, 0]);
}

#[test]
fn best_hand_search_finds_the_board_royal() {
    let hole = [c(S::Clubs, R::Two), c(S::Diamonds, R::Three)];
    let community = [
        c(S::Spades, R::Ace),
        c(S::Spades, R::King),
        c(S::Spades, R::Queen),
        c(S::Spades, R::Jack),
        c(S::Spades, R::Ten),
    ];
    let best = evaluate_best_hand(&hole, &community);
    assert_eq!(best.tier, Tier::RoyalFlush);
}

#[test]
fn best_hand_search_improves_on_the_board() {
    let hole = [c(S::Clubs, R::Nine), c(S::Diamonds, R::Nine)];
    let community = [
        c(S::Spades, R::Nine),
        c(S::Hearts, R::Two),
        c(S::Clubs, R::Two),
        c(S::Diamonds, R::King),
        c(S::Hearts, R::Seven),
    ];
    let best = evaluate_best_hand(&hole, &community);
    assert_eq!(best.tier, Tier::FullHouse);
    assert_eq!(best.kickers[0], 9);
    assert_eq!(best.kickers[1], 2);
}

#[test]
fn incomplete_streets_preview_as_high_card() {
    let hole = [c(S::Clubs, R::Ace), c(S::Diamonds, R::King)];
    let preview = evaluate_best_hand(&hole, &[]);
    assert_eq!(preview.tier, Tier::HighCard);
    assert_eq!(preview.kickers, [14, 13, 0, 0, 0]);
    assert_eq!(preview.cards.len(), 2);
}
