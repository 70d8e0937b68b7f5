use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;

/// Стадия стола/раздачи.
///
/// Переходы только вперёд: Waiting → PreFlop → Flop → Turn → River → Showdown,
/// либо досрочно в HandOver, когда остался один несфолдивший игрок.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    /// Раздачи нет, стол набирает игроков.
    Waiting,
    PreFlop,
    Flop,
    Turn,
    River,
    Showdown,
    /// Все, кроме одного, сфолдили.
    HandOver,
}

impl Stage {
    /// Имя раунда во внешнем контракте.
    pub const fn name(self) -> &'static str {
        match self {
            Stage::Waiting => "Waiting",
            Stage::PreFlop => "Deal",
            Stage::Flop => "Flop",
            Stage::Turn => "Turn",
            Stage::River => "River",
            Stage::Showdown => "Showdown",
            Stage::HandOver => "HandOver",
        }
    }

    /// Идёт ли раунд ставок.
    pub const fn is_betting(self) -> bool {
        matches!(self, Stage::PreFlop | Stage::Flop | Stage::Turn | Stage::River)
    }

    /// Раздача закончена, результат ещё на столе.
    pub const fn is_finished(self) -> bool {
        matches!(self, Stage::Showdown | Stage::HandOver)
    }

    /// Следующая улица после закрытия раунда ставок.
    pub const fn next_street(self) -> Option<Stage> {
        match self {
            Stage::PreFlop => Some(Stage::Flop),
            Stage::Flop => Some(Stage::Turn),
            Stage::Turn => Some(Stage::River),
            Stage::River => Some(Stage::Showdown),
            Stage::Waiting | Stage::Showdown | Stage::HandOver => None,
        }
    }

    /// Сколько общих карт открывается при входе в стадию.
    pub const fn cards_to_deal(self) -> usize {
        match self {
            Stage::Flop => 3,
            Stage::Turn | Stage::River => 1,
            _ => 0,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ранг руки: категория и ключ тай-брейка, упакованные в u32.
/// Больше – сильнее; равные значения означают сплит.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandRank(pub u32);

/// Выплата одному победителю.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Payout {
    pub player: String,
    pub amount: Chips,
    /// Лучшая 5-карточная рука (только если был шоудаун).
    pub best_hand: Option<Vec<Card>>,
    pub rank: Option<HandRank>,
}

/// Итог завершённой раздачи.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandResult {
    pub pot: Chips,
    /// Победители в порядке рассадки.
    pub winners: Vec<Payout>,
    /// Участники шоудауна, не разделившие лучшую руку.
    pub losers: Vec<String>,
}

impl HandResult {
    pub fn winner_names(&self) -> Vec<String> {
        self.winners.iter().map(|p| p.player.clone()).collect()
    }
}
