use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::{HandRank, Stage};
use crate::domain::{HandId, SeatIndex, TableId};
use crate::engine::actions::PlayerActionKind;
use crate::eval::HandCategory;

/// Тип события в раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum HandEventKind {
    /// Новая раздача началась.
    HandStarted {
        table_id: TableId,
        hand_id: HandId,
        dealer: SeatIndex,
    },

    /// Блайнды: (игрок, реально внесено).
    BlindsPosted {
        small_blind: (String, Chips),
        big_blind: (String, Chips),
    },

    /// Игрок получил карманные карты.
    HoleCardsDealt {
        player: String,
        cards: Vec<Card>,
    },

    /// Открыты общие карты (только новые).
    BoardDealt {
        stage: Stage,
        cards: Vec<Card>,
    },

    /// Действие игрока.
    PlayerActed {
        player: String,
        action: PlayerActionKind,
        stack_after: Chips,
        pot_after: Chips,
    },

    /// Переход на новую стадию.
    StageChanged {
        stage: Stage,
    },

    /// Шоудаун – открытие карт.
    ShowdownReveal {
        player: String,
        hole_cards: Vec<Card>,
        rank: HandRank,
        category: HandCategory,
    },

    /// Выплата банка.
    PotAwarded {
        player: String,
        amount: Chips,
    },

    /// Раздача завершена.
    HandFinished {
        hand_id: HandId,
        stage: Stage,
    },

    /// Раздача прервана, вклады возвращены.
    HandAborted {
        reason: String,
    },
}

/// Событие в раздаче с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandEvent {
    pub index: u32,
    pub kind: HandEventKind,
}

/// Полная история раздачи.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandHistory {
    pub events: Vec<HandEvent>,
}

impl HandHistory {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, kind: HandEventKind) {
        let idx = self.events.len() as u32;
        self.events.push(HandEvent { index: idx, kind });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
