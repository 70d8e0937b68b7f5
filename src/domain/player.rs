use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;

/// Статус игрока в контексте стола/раздачи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerStatus {
    /// Игрок активен в текущей раздаче и может ходить.
    Active,
    /// Игрок сфолдил: фишки остаются в банке, на банк не претендует.
    Folded,
    /// Игрок в олл-ине: больше не ставит, но участвует в шоудауне.
    AllIn,
    /// Игрок сидит за столом, но не участвует в раздаче (нет фишек).
    SittingOut,
}

/// Игрок за конкретным столом. Имя – ключ внутри стола.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    /// Текущий стек за столом.
    pub stack: Chips,
    /// Карманные карты (0 или 2, только во время раздачи).
    pub hole_cards: Vec<Card>,
    /// Вклад в текущем раунде ставок (обнуляется на каждой улице).
    pub round_bet: Chips,
    /// Суммарный вклад в текущей раздаче (из него складывается банк).
    pub hand_contribution: Chips,
    pub status: PlayerStatus,
    /// Ходил ли игрок хотя бы раз в текущем раунде ставок.
    pub acted: bool,
}

impl Player {
    pub fn new(name: impl Into<String>, stack: Chips) -> Self {
        Self {
            name: name.into(),
            stack,
            hole_cards: Vec::new(),
            round_bet: Chips::ZERO,
            hand_contribution: Chips::ZERO,
            status: PlayerStatus::Active,
            acted: false,
        }
    }

    /// Участвует ли игрок в борьбе за банк (Active или AllIn).
    pub fn is_in_hand(&self) -> bool {
        matches!(self.status, PlayerStatus::Active | PlayerStatus::AllIn)
    }

    /// Может ли игрок сейчас делать ход.
    pub fn can_act(&self) -> bool {
        self.status == PlayerStatus::Active
    }

    /// Сбросить состояние перед новой раздачей.
    /// Игрок без фишек пропускает раздачу.
    pub fn reset_for_hand(&mut self) {
        self.hole_cards.clear();
        self.round_bet = Chips::ZERO;
        self.hand_contribution = Chips::ZERO;
        self.acted = false;
        self.status = if self.stack.is_zero() {
            PlayerStatus::SittingOut
        } else {
            PlayerStatus::Active
        };
    }

    /// Перенести фишки из стека в банк (не больше стека).
    /// Возвращает реально внесённую сумму; при нулевом стеке – олл-ин.
    pub fn commit(&mut self, amount: Chips) -> Chips {
        let paid = amount.min(self.stack);
        self.stack -= paid;
        self.round_bet += paid;
        self.hand_contribution += paid;
        if self.stack.is_zero() && self.status == PlayerStatus::Active {
            self.status = PlayerStatus::AllIn;
        }
        paid
    }
}
