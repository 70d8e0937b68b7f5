use thiserror::Error;

use crate::domain::{Chips, ConfigError, DeckExhausted};

/// Ошибки движка покера.
///
/// Все варианты, кроме `DeckExhausted`, – штатные отказы: стол при этом
/// не меняется, а внешний контракт превращает их в `false`/`None`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    // --- чей ход ---
    #[error("Сейчас не ход игрока {0}")]
    NotPlayersTurn(String),

    #[error("Игрок {0} не может действовать (не Active)")]
    PlayerNotActive(String),

    #[error("Раздача не активна")]
    NoActiveHand,

    // --- недопустимое действие ---
    #[error("Невозможно выполнить check – нужно хотя бы уравнять ставку {to_call}")]
    CannotCheck { to_call: Chips },

    #[error("Рейз слишком мал: до {amount}, минимум до {min_total}")]
    RaiseTooSmall { amount: Chips, min_total: Chips },

    #[error("Игрок {0} уже ходил, неполный рейз не открыл торговлю заново")]
    RaiseNotReopened(String),

    #[error("Недостаточно фишек: нужно {needed}, в стеке {stack}")]
    NotEnoughChips { needed: Chips, stack: Chips },

    #[error("Недопустимая сумма ставки: {0}")]
    InvalidAmount(Chips),

    // --- рассадка ---
    #[error("Игрок {0} уже за столом")]
    PlayerAlreadySeated(String),

    #[error("Бай-ин {chips} вне границ [{min}, {max}]")]
    BuyInOutOfRange { chips: Chips, min: Chips, max: Chips },

    #[error("Стол заполнен ({0} мест)")]
    TableFull(usize),

    #[error("Игрок {0} не найден за столом")]
    PlayerNotAtTable(String),

    // --- предусловия ---
    #[error("Только создатель стола ({creator}) может это сделать, не {player}")]
    NotCreator { player: String, creator: String },

    #[error("Недостаточно игроков для раздачи: {have} из {need}")]
    NotEnoughPlayers { have: usize, need: usize },

    #[error("Раздача уже идёт")]
    HandInProgress,

    #[error("Некорректный конфиг стола: {0}")]
    Config(#[from] ConfigError),

    // --- внутренняя ---
    #[error("Внутренняя ошибка: колода исчерпана (запрошено {requested}, осталось {remaining})")]
    DeckExhausted { requested: usize, remaining: usize },
}

impl From<DeckExhausted> for EngineError {
    fn from(e: DeckExhausted) -> Self {
        EngineError::DeckExhausted {
            requested: e.requested,
            remaining: e.remaining,
        }
    }
}
