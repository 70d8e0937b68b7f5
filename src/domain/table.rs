use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::Stage;
use crate::domain::player::Player;
use crate::domain::TableId;

/// Индекс места за столом (позиция в порядке рассадки).
pub type SeatIndex = usize;

/// Верхняя граница мест: 2 * MAX_SEATS + 5 общих карт всегда помещаются в колоду.
pub const MAX_SEATS: usize = 10;

/// Стейки стола (SB/BB). Фиксируются при создании.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TableStakes {
    pub small_blind: Chips,
    pub big_blind: Chips,
}

impl TableStakes {
    pub fn new(sb: Chips, bb: Chips) -> Self {
        Self {
            small_blind: sb,
            big_blind: bb,
        }
    }
}

/// Конфиг стола: блайнды, границы числа игроков и бай-ина.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TableConfig {
    #[serde(flatten)]
    pub stakes: TableStakes,
    pub min_players: usize,
    pub max_players: usize,
    pub min_buy_in: Chips,
    pub max_buy_in: Chips,
}

/// Некорректные параметры стола.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("блайнды должны удовлетворять 0 < SB < BB (SB={small}, BB={big})")]
    InvalidBlinds { small: Chips, big: Chips },

    #[error("некорректные границы игроков: min={min}, max={max} (допустимо 2..={MAX_SEATS})")]
    InvalidPlayerBounds { min: usize, max: usize },

    #[error("некорректные границы бай-ина: min={min}, max={max}")]
    InvalidBuyInBounds { min: Chips, max: Chips },
}

impl TableConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let TableStakes {
            small_blind,
            big_blind,
        } = self.stakes;
        if small_blind.is_zero() || small_blind >= big_blind {
            return Err(ConfigError::InvalidBlinds {
                small: small_blind,
                big: big_blind,
            });
        }
        if self.min_players < 2 || self.min_players > self.max_players || self.max_players > MAX_SEATS {
            return Err(ConfigError::InvalidPlayerBounds {
                min: self.min_players,
                max: self.max_players,
            });
        }
        if self.min_buy_in.is_zero() || self.min_buy_in > self.max_buy_in {
            return Err(ConfigError::InvalidBuyInBounds {
                min: self.min_buy_in,
                max: self.max_buy_in,
            });
        }
        Ok(())
    }

    pub fn buy_in_allowed(&self, chips: Chips) -> bool {
        chips >= self.min_buy_in && chips <= self.max_buy_in
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            stakes: TableStakes::new(Chips(1), Chips(2)),
            min_players: 2,
            max_players: 9,
            min_buy_in: Chips(100),
            max_buy_in: Chips(200),
        }
    }
}

/// Основное состояние стола (без живой раздачи – она в `engine::HandEngine`).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Table {
    pub id: TableId,
    pub config: TableConfig,
    /// Только создатель может стартовать игру и пересдавать.
    pub creator: String,

    /// Игроки в порядке рассадки.
    pub players: Vec<Player>,
    /// Игроки, которые сядут на следующей раздаче.
    pub pending_joins: Vec<Player>,
    /// Игроки, которые уйдут на следующей раздаче.
    pub pending_leaves: Vec<String>,

    /// Общие карты борда (0/3/4/5).
    pub board: Vec<Card>,
    /// Индекс дилерской кнопки в `players`.
    pub dealer_button: SeatIndex,
    pub stage: Stage,
    /// Сыграно ли уже хотя бы одна раздача (для ротации кнопки).
    pub hands_played: u64,
}

impl Table {
    /// Создать пустой стол. Создателя сажает `engine::seating`.
    pub fn new(id: TableId, config: TableConfig, creator: impl Into<String>) -> Self {
        Self {
            id,
            config,
            creator: creator.into(),
            players: Vec::new(),
            pending_joins: Vec::new(),
            pending_leaves: Vec::new(),
            board: Vec::new(),
            dealer_button: 0,
            stage: Stage::Waiting,
            hands_played: 0,
        }
    }

    pub fn seated_count(&self) -> usize {
        self.players.len()
    }

    pub fn seat_of(&self, name: &str) -> Option<SeatIndex> {
        self.players.iter().position(|p| p.name == name)
    }

    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    pub fn is_creator(&self, name: &str) -> bool {
        self.creator == name
    }

    /// Изменения рассадки копятся в очередях, пока стол не в Waiting.
    pub fn membership_frozen(&self) -> bool {
        self.stage != Stage::Waiting
    }

    /// Игроки, которые смогут сыграть следующую раздачу (есть фишки).
    pub fn eligible_count(&self) -> usize {
        self.players.iter().filter(|p| !p.stack.is_zero()).count()
    }

    pub fn enough_players_to_start(&self) -> bool {
        self.eligible_count() >= self.config.min_players
    }

    /// Сколько игроков ещё претендует на банк.
    pub fn players_in_hand(&self) -> usize {
        self.players.iter().filter(|p| p.is_in_hand()).count()
    }

    /// Текущий банк – сумма вкладов за раздачу.
    pub fn total_contributions(&self) -> Chips {
        self.players.iter().map(|p| p.hand_contribution).sum()
    }
}
