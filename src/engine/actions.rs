use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::Chips;

/// Тип действия игрока.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PlayerActionKind {
    Fold,
    Check,
    /// Уравнять текущую ставку (при нехватке стека – олл-ин).
    Call,
    /// Поставить/повысить ДО указанной суммы за раунд ("raise to").
    Bet(Chips),
    /// All-in – поставить весь стек.
    AllIn,
}

impl PlayerActionKind {
    /// Глагол действия во внешнем контракте.
    pub const fn verb(&self) -> &'static str {
        match self {
            PlayerActionKind::Fold => "fold",
            PlayerActionKind::Check => "check",
            PlayerActionKind::Call => "call",
            PlayerActionKind::Bet(_) => "bet",
            PlayerActionKind::AllIn => "allin",
        }
    }
}

impl fmt::Display for PlayerActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerActionKind::Bet(amount) => write!(f, "bet {amount}"),
            other => f.write_str(other.verb()),
        }
    }
}

/// Конкретное действие игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerAction {
    /// Какой игрок действует (имя – ключ за столом).
    pub player: String,
    pub kind: PlayerActionKind,
}

impl PlayerAction {
    pub fn new(player: impl Into<String>, kind: PlayerActionKind) -> Self {
        Self {
            player: player.into(),
            kind,
        }
    }
}

/// Последнее принятое действие на текущей улице ("P1 call", "P2 bet 6").
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PreviousAction {
    pub player: String,
    pub action: PlayerActionKind,
}

impl fmt::Display for PreviousAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.player, self.action)
    }
}

impl From<PlayerAction> for PreviousAction {
    fn from(a: PlayerAction) -> Self {
        Self {
            player: a.player,
            action: a.kind,
        }
    }
}
