//! Покерный движок: рассадка, ставки, переход улиц, шоудаун.
//!
//! Высокоуровневые объекты: `PokerTable` (стол + текущая раздача) и
//! `TableManager` (реестр столов).
//! Основные операции раздачи:
//!   - `start_hand` – запустить новую раздачу
//!   - `apply_action` – применить действие игрока
//!   - `abort_hand` – прервать раздачу с возвратом вкладов

use core::fmt;

use crate::domain::{Card, Deck};

pub mod actions;
pub mod betting;
pub mod errors;
pub mod game_loop;
pub mod hand_history;
pub mod poker_table;
pub mod positions;
pub mod pot;
pub mod seating;
pub mod table_manager;
pub mod validation;

pub use actions::{PlayerAction, PlayerActionKind, PreviousAction};
pub use betting::BettingState;
pub use errors::EngineError;
pub use game_loop::{abort_hand, apply_action, start_hand, HandEngine, HandStatus};
pub use hand_history::{HandEvent, HandEventKind, HandHistory};
pub use poker_table::PokerTable;
pub use pot::{split_pot, Pot};
pub use seating::{JoinOutcome, LeaveOutcome};
pub use table_manager::{ManagerError, RngFactory, TableManager, TablePlayers};

/// RNG интерфейс для engine.
/// Реализации – в infra (обёртки над `rand`) и в тестах (фиксированный порядок).
pub trait RandomSource: Send + fmt::Debug {
    fn shuffle(&mut self, cards: &mut [Card]);
}

/// Свежая 52-карточная колода, перемешанная через `rng`.
pub fn new_shuffled_deck(rng: &mut dyn RandomSource) -> Deck {
    let mut cards = Deck::standard_52().cards().to_vec();
    rng.shuffle(&mut cards);
    Deck::from_cards(cards)
}
