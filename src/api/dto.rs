use serde::Serialize;

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::{HandResult, Payout};
use crate::domain::TableId;
use crate::engine::{HandEvent, TablePlayers};
use crate::eval::describe_hand;

/// Карты в коротком виде ("Ah", "Td").
pub fn cards_to_strings(cards: &[Card]) -> Vec<String> {
    cards.iter().map(Card::to_string).collect()
}

/// Карманные карты одного игрока (для getAllHands).
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerHandDto {
    pub player_name: String,
    pub cards: Vec<String>,
}

/// Выплата победителю.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PayoutDto {
    pub player_name: String,
    pub amount: Chips,
    /// Лучшая 5-карточная рука (если был шоудаун).
    pub hand: Option<Vec<String>>,
    /// Категория руки по-человечески.
    pub description: Option<String>,
}

impl From<&Payout> for PayoutDto {
    fn from(p: &Payout) -> Self {
        Self {
            player_name: p.player.clone(),
            amount: p.amount,
            hand: p.best_hand.as_deref().map(cards_to_strings),
            description: p.rank.map(describe_hand),
        }
    }
}

/// Тело ответа. Форма повторяет ответы шлюза: почти всё – `{"result": ...}`.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Reply {
    /// createTable.
    Created { id: TableId },
    /// listTables.
    Tables { result: Vec<TableId> },
    /// listPlayers / addPlayer / removePlayer: состав стола после операции.
    Players {
        result: bool,
        #[serde(flatten)]
        players: TablePlayers,
    },
    /// Действия, startGame, newRound, addChips.
    Accepted { result: bool },
    /// getHand / getDeal.
    Cards { result: Vec<String> },
    /// getCurrentPlayer / getRoundName / getPreviousPlayerAction.
    Text { result: Option<String> },
    /// getPot / getPlayerPot.
    Amount { result: Option<Chips> },
    /// getAllHands.
    Hands { result: Vec<PlayerHandDto> },
    /// getWinners.
    Winners {
        result: Vec<String>,
        losers: Vec<String>,
        pot: Chips,
        payouts: Vec<PayoutDto>,
    },
    /// getHistory.
    History { result: Vec<HandEvent> },
}

impl Reply {
    pub fn winners(result: Option<&HandResult>) -> Self {
        match result {
            Some(r) => Reply::Winners {
                result: r.winner_names(),
                losers: r.losers.clone(),
                pot: r.pot,
                payouts: r.winners.iter().map(PayoutDto::from).collect(),
            },
            None => Reply::Winners {
                result: Vec::new(),
                losers: Vec::new(),
                pot: Chips::ZERO,
                payouts: Vec::new(),
            },
        }
    }
}

/// Ответ на команду: `{"action": "...", ...тело}`.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Response {
    pub action: &'static str,
    #[serde(flatten)]
    pub reply: Reply,
}

/// Ответ при ошибке: `{"error": "..."}`.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}
