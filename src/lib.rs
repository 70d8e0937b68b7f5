//! Покерный зал: несколько столов Texas Hold'em в памяти процесса.
//!
//! Слои:
//! - `domain` – карты, колода, игроки, стол, стадии раздачи;
//! - `eval` – оценка силы рук;
//! - `engine` – ставки, переход улиц, шоудаун, рассадка, реестр столов;
//! - `infra` – ID и RNG;
//! - `api` – JSON-команды поверх `TableManager`.
//!
//! Состояние живёт только в памяти: после перезапуска столы создаются заново.

pub mod api;
pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;

pub use engine::{PokerTable, TableManager};
