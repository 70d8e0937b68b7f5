use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::card::{Card, Rank, Suit};

/// Попытка взять больше карт, чем осталось в колоде.
///
/// При ограничении мест за столом сюда попасть нельзя, поэтому для движка
/// это внутренняя ошибка, а не пользовательская.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("колода исчерпана: запрошено {requested}, осталось {remaining}")]
pub struct DeckExhausted {
    pub requested: usize,
    pub remaining: usize,
}

/// Колода карт. В домене – упорядоченный список карт и курсор раздачи.
/// Перемешивание делает engine (через `RandomSource`), НЕ здесь.
///
/// Карты раздаются с начала списка; розданная карта больше не доступна.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
    next: usize,
}

impl Deck {
    /// Стандартная 52-карточная колода в порядке:
    /// Clubs 2..A, Diamonds 2..A, Hearts 2..A, Spades 2..A.
    pub fn standard_52() -> Self {
        let mut cards = Vec::with_capacity(52);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        Self::from_cards(cards)
    }

    /// Колода в заданном порядке (например, после перемешивания).
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Deck { cards, next: 0 }
    }

    /// Все карты колоды в порядке раздачи, включая уже розданные.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Сколько карт ещё не роздано.
    pub fn remaining(&self) -> usize {
        self.cards.len() - self.next
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Взять n карт сверху. Либо все n, либо ошибка без изменения колоды.
    pub fn draw(&mut self, n: usize) -> Result<Vec<Card>, DeckExhausted> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(DeckExhausted {
                requested: n,
                remaining,
            });
        }
        let taken = self.cards[self.next..self.next + n].to_vec();
        self.next += n;
        Ok(taken)
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::standard_52()
    }
}
