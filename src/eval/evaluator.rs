use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank};
use crate::domain::hand::HandRank;

use super::hand_rank::HandCategory;
use super::lookup_tables::{detect_straight, rank_to_bit, RankMask};

/// Лучшая 5-карточная рука вместе с её рангом.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RankedHand {
    pub rank: HandRank,
    pub cards: [Card; 5],
}

impl RankedHand {
    pub fn category(&self) -> HandCategory {
        self.rank.category()
    }

    pub fn tie_break(&self) -> Vec<Rank> {
        self.rank.tie_break()
    }
}

/// Сравнение двух рук: сначала категория, затем ключ тай-брейка.
/// `Ordering::Equal` означает сплит банка.
pub fn compare_hands(a: &RankedHand, b: &RankedHand) -> Ordering {
    a.rank.cmp(&b.rank)
}

/// Вычислить лучшую 5-карточную руку из hole + board.
///
/// Работает для любых 5–7 карт в сумме; иначе `None`.
pub fn evaluate_best_hand(hole: &[Card], board: &[Card]) -> Option<RankedHand> {
    let mut all_cards = Vec::with_capacity(hole.len() + board.len());
    all_cards.extend_from_slice(hole);
    all_cards.extend_from_slice(board);
    evaluate_cards(&all_cards)
}

/// Перебираем все комбинации 5 карт из N (N=5–7) и выбираем лучшую.
/// Для 7 карт это 21 комбинация.
pub fn evaluate_cards(cards: &[Card]) -> Option<RankedHand> {
    let n = cards.len();
    if !(5..=7).contains(&n) {
        return None;
    }

    let mut best: Option<RankedHand> = None;

    for a in 0..(n - 4) {
        for b in (a + 1)..(n - 3) {
            for c in (b + 1)..(n - 2) {
                for d in (c + 1)..(n - 1) {
                    for e in (d + 1)..n {
                        let five = [cards[a], cards[b], cards[c], cards[d], cards[e]];
                        let rank = evaluate_5card_hand(&five);
                        if best.map_or(true, |cur| rank > cur.rank) {
                            best = Some(RankedHand { rank, cards: five });
                        }
                    }
                }
            }
        }
    }

    best
}

/// Оценка строго 5-карточной комбинации.
pub fn evaluate_5card_hand(cards: &[Card; 5]) -> HandRank {
    let mut suit_counts = [0u8; 4];
    let mut rank_counts = [0u8; 15]; // используем 2..14
    let mut rank_mask: RankMask = 0;

    for card in cards {
        suit_counts[card.suit.index()] += 1;
        rank_counts[card.rank as usize] += 1;
        rank_mask |= rank_to_bit(card.rank);
    }

    let is_flush = suit_counts.iter().any(|&c| c == 5);
    let straight_high = detect_straight(rank_mask);

    // (rank, count), сортировка: сначала по количеству, затем по рангу (desc).
    let mut groups: Vec<(Rank, u8)> = Rank::ALL
        .iter()
        .rev()
        .filter(|r| rank_counts[**r as usize] > 0)
        .map(|&r| (r, rank_counts[r as usize]))
        .collect();
    groups.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(&a.0)));

    let pattern: Vec<u8> = groups.iter().map(|g| g.1).collect();
    let key: Vec<Rank> = groups.iter().map(|g| g.0).collect();

    if is_flush {
        if let Some(high) = straight_high {
            return HandRank::from_category_and_key(HandCategory::StraightFlush, &[high]);
        }
    }

    let category = match pattern.as_slice() {
        [4, 1] => HandCategory::FourOfAKind,
        [3, 2] => HandCategory::FullHouse,
        _ if is_flush => HandCategory::Flush,
        _ if straight_high.is_some() => HandCategory::Straight,
        [3, 1, 1] => HandCategory::ThreeOfAKind,
        [2, 2, 1] => HandCategory::TwoPair,
        [2, 1, 1, 1] => HandCategory::OnePair,
        _ => HandCategory::HighCard,
    };

    match (category, straight_high) {
        // Стрит сравнивается только по старшей карте (wheel = пятёрка).
        (HandCategory::Straight, Some(high)) => {
            HandRank::from_category_and_key(HandCategory::Straight, &[high])
        }
        _ => HandRank::from_category_and_key(category, &key),
    }
}
