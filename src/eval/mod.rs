//! Модуль оценки силы покерных рук (Texas Hold'em).
//!
//! Основная функция:
//!   `evaluate_best_hand(hole, board) -> Option<RankedHand>`
//!
//! Чистые функции без состояния: перебор всех 5-карточных подмножеств,
//! ранжирование по лестнице категорий и ключу тай-брейка.

pub mod evaluator;
pub mod hand_rank;
pub mod lookup_tables;

pub use evaluator::{compare_hands, evaluate_5card_hand, evaluate_best_hand, evaluate_cards, RankedHand};
pub use hand_rank::{describe_hand, HandCategory};
