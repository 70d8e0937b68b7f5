use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;

/// Единый банк раздачи. Всегда равен сумме `hand_contribution` игроков
/// до момента выплаты.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pot {
    pub total: Chips,
}

impl Pot {
    pub fn new() -> Self {
        Self {
            total: Chips::ZERO,
        }
    }

    pub fn add(&mut self, amount: Chips) {
        self.total += amount;
    }

    /// Забрать весь банк (для выплаты или возврата).
    pub fn take(&mut self) -> Chips {
        std::mem::take(&mut self.total)
    }
}

/// Поделить банк поровну между `winners` победителями.
///
/// Победители передаются по часовой от места после кнопки;
/// весь нечётный остаток получает первый из них.
pub fn split_pot(total: Chips, winners: usize) -> Vec<Chips> {
    if winners == 0 {
        return Vec::new();
    }

    let share = total.amount() / winners as u64;
    let remainder = total.amount() % winners as u64;

    (0..winners)
        .map(|i| {
            if i == 0 {
                Chips(share + remainder)
            } else {
                Chips(share)
            }
        })
        .collect()
}
