use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// Hand tiers from weakest to strongest. `RoyalFlush` is reserved for the
/// Ace-high straight flush only; every other straight flush (the suited
/// wheel included) sits one tier below it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Tier {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

/// The outcome of evaluating a hand: its tier, the contributing cards, and
/// an ordered tie-break vector compared lexicographically within a tier.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct EvaluatedHand {
    pub tier: Tier,
    /// The cards that form the hand: five at showdown, fewer on
    /// incomplete-street previews.
    pub cards: Vec<Card>,
    // kickers: ordered high -> low for tiebreaks, zero padded
    pub kickers: [u8; 5],
}

pub fn compare_hands(a: &EvaluatedHand, b: &EvaluatedHand) -> Ordering {
    match a.tier.cmp(&b.tier) {
        Ordering::Equal => a.kickers.cmp(&b.kickers),
        ord => ord,
    }
}

/// Evaluates exactly five cards. Invariant under input order; suit identity
/// only contributes through flush detection.
pub fn evaluate_hand(cards: &[Card; 5]) -> EvaluatedHand {
    let mut sorted = *cards;
    sorted.sort_unstable_by(|a, b| b.rank.value().cmp(&a.rank.value()));

    let flush = sorted.iter().all(|c| c.suit == sorted[0].suit);
    let straight_high = detect_straight_high(&sorted);

    if let Some(high) = straight_high {
        if flush {
            let tier = if high == 14 {
                Tier::RoyalFlush
            } else {
                Tier::StraightFlush
            };
            return hand(tier, &sorted, [high, 0, 0, 0, 0]);
        }
    }

    // Multiplicity: group by rank value, strongest group first. A straight
    // or flush excludes pairs over five cards, so ladder order is safe.
    let groups = rank_groups(&sorted);
    let (c0, v0) = groups[0];
    let second = groups.get(1).copied();

    if c0 == 4 {
        let kicker = second.map(|(_, v)| v).unwrap_or(0);
        return hand(Tier::FourOfAKind, &sorted, [v0, kicker, 0, 0, 0]);
    }
    if c0 == 3 {
        if let Some((2, pair)) = second {
            return hand(Tier::FullHouse, &sorted, [v0, pair, 0, 0, 0]);
        }
        let mut k = [v0, 0, 0, 0, 0];
        for (i, (_, v)) in groups[1..].iter().take(2).enumerate() {
            k[i + 1] = *v;
        }
        return hand(Tier::ThreeOfAKind, &sorted, k);
    }

    if flush {
        return hand(Tier::Flush, &sorted, rank_vector(&sorted));
    }
    if let Some(high) = straight_high {
        return hand(Tier::Straight, &sorted, [high, 0, 0, 0, 0]);
    }

    if c0 == 2 {
        if let Some((2, low_pair)) = second {
            let kicker = groups.get(2).map(|&(_, v)| v).unwrap_or(0);
            return hand(Tier::TwoPair, &sorted, [v0, low_pair, kicker, 0, 0]);
        }
        let mut k = [v0, 0, 0, 0, 0];
        for (i, (_, v)) in groups[1..].iter().take(3).enumerate() {
            k[i + 1] = *v;
        }
        return hand(Tier::OnePair, &sorted, k);
    }

    hand(Tier::HighCard, &sorted, rank_vector(&sorted))
}

/// Best five-card hand out of two hole cards plus up to five community cards.
///
/// With fewer than five cards available this returns a high-card placeholder
/// over whatever exists; that form is only used for incomplete-street
/// previews and never for final resolution. Otherwise every C(n,5) subset is
/// evaluated and the maximum by (tier, kickers) is returned.
pub fn evaluate_best_hand(hole: &[Card], community: &[Card]) -> EvaluatedHand {
    let mut all: Vec<Card> = Vec::with_capacity(hole.len() + community.len());
    all.extend_from_slice(hole);
    all.extend_from_slice(community);

    if all.len() < 5 {
        all.sort_unstable_by(|a, b| b.rank.value().cmp(&a.rank.value()));
        let mut kickers = [0u8; 5];
        for (i, c) in all.iter().enumerate() {
            kickers[i] = c.rank.value();
        }
        return EvaluatedHand {
            tier: Tier::HighCard,
            cards: all,
            kickers,
        };
    }

    let mut best: Option<EvaluatedHand> = None;
    let mut pick = [0usize; 5];
    for_each_combination(all.len(), &mut pick, 0, 0, &mut |idx| {
        let five = [all[idx[0]], all[idx[1]], all[idx[2]], all[idx[3]], all[idx[4]]];
        let eval = evaluate_hand(&five);
        let better = match &best {
            Some(b) => compare_hands(&eval, b) == Ordering::Greater,
            None => true,
        };
        if better {
            best = Some(eval);
        }
    });
    // n >= 5 guarantees at least one subset was visited
    best.unwrap_or(EvaluatedHand {
        tier: Tier::HighCard,
        cards: Vec::new(),
        kickers: [0; 5],
    })
}

fn hand(tier: Tier, cards: &[Card; 5], kickers: [u8; 5]) -> EvaluatedHand {
    EvaluatedHand {
        tier,
        cards: cards.to_vec(),
        kickers,
    }
}

fn rank_vector(sorted: &[Card; 5]) -> [u8; 5] {
    let mut k = [0u8; 5];
    for (i, c) in sorted.iter().enumerate() {
        k[i] = c.rank.value();
    }
    k
}

/// Groups of equal rank, sorted by (count, value) descending.
fn rank_groups(sorted: &[Card; 5]) -> Vec<(u8, u8)> {
    let mut groups: Vec<(u8, u8)> = Vec::with_capacity(5);
    for c in sorted {
        let v = c.rank.value();
        match groups.iter_mut().find(|(_, gv)| *gv == v) {
            Some((count, _)) => *count += 1,
            None => groups.push((1, v)),
        }
    }
    groups.sort_unstable_by(|a, b| b.cmp(a));
    groups
}

/// Returns the straight's high card over five descending-sorted cards, with
/// the wheel (A,5,4,3,2) reported as a 5-high straight.
fn detect_straight_high(sorted: &[Card; 5]) -> Option<u8> {
    let values: Vec<u8> = sorted.iter().map(|c| c.rank.value()).collect();
    if values.windows(2).all(|w| w[0] == w[1] + 1) {
        return Some(values[0]);
    }
    if values == [14, 5, 4, 3, 2] {
        return Some(5);
    }
    None
}

fn for_each_combination(
    n: usize,
    pick: &mut [usize; 5],
    depth: usize,
    start: usize,
    f: &mut impl FnMut(&[usize; 5]),
) {
    if depth == 5 {
        f(pick);
        return;
    }
    for i in start..n {
        pick[depth] = i;
        for_each_combination(n, pick, depth + 1, i + 1, f);
    }
}
