use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::card::Rank;
use crate::domain::hand::HandRank;

/// Категория покерной руки по силе.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl HandCategory {
    fn from_id(id: u8) -> HandCategory {
        match id {
            1 => HandCategory::OnePair,
            2 => HandCategory::TwoPair,
            3 => HandCategory::ThreeOfAKind,
            4 => HandCategory::Straight,
            5 => HandCategory::Flush,
            6 => HandCategory::FullHouse,
            7 => HandCategory::FourOfAKind,
            8 => HandCategory::StraightFlush,
            _ => HandCategory::HighCard,
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HandCategory::HighCard => "High card",
            HandCategory::OnePair => "One pair",
            HandCategory::TwoPair => "Two pair",
            HandCategory::ThreeOfAKind => "Three of a kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full house",
            HandCategory::FourOfAKind => "Four of a kind",
            HandCategory::StraightFlush => "Straight flush",
        };
        f.write_str(s)
    }
}

impl HandRank {
    /// Собрать HandRank из категории и ключа тай-брейка (от старшего к младшему,
    /// не больше 5 рангов).
    ///
    /// Схема кодирования (u32):
    ///   [категория:4 бита][k0:4][k1:4][k2:4][k3:4][k4:4]
    /// Неиспользованные позиции ключа = 0, поэтому внутри одной категории
    /// сравнение u32 совпадает с лексикографическим сравнением ключей.
    pub fn from_category_and_key(category: HandCategory, key: &[Rank]) -> Self {
        debug_assert!(key.len() <= 5);
        let mut value = (category as u32) & 0x0F;
        for i in 0..5 {
            let nibble = key.get(i).map(|r| r.value() as u32).unwrap_or(0);
            value = (value << 4) | nibble;
        }
        HandRank(value)
    }

    /// Вытащить категорию из HandRank.
    pub fn category(&self) -> HandCategory {
        HandCategory::from_id(((self.0 >> 20) & 0x0F) as u8)
    }

    /// Ключ тай-брейка: решающие ранги и кикеры по убыванию значимости.
    pub fn tie_break(&self) -> Vec<Rank> {
        (0..5)
            .rev()
            .map(|i| ((self.0 >> (i * 4)) & 0x0F) as u8)
            .filter_map(Rank::from_value)
            .collect()
    }
}

/// Человеческое описание руки по категории.
pub fn describe_hand(rank: HandRank) -> String {
    rank.category().to_string()
}
