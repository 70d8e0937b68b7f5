use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::table::{TableConfig, TableStakes};
use crate::domain::TableId;
use crate::engine::actions::PlayerActionKind;

/// Команда клиента.
///
/// Формат – плоский JSON с полем `action`, как в сообщениях шлюза:
/// `{"action": "bet", "tableId": 1, "playerName": "P1", "amount": 6}`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Command {
    /// Список столов (для лобби).
    ListTables,

    /// Создать стол. Пропущенные границы берутся из `TableConfig::default()`.
    CreateTable(CreateTableCommand),

    ListPlayers { table_id: TableId },

    AddPlayer {
        table_id: TableId,
        #[serde(alias = "name")]
        player_name: String,
        chips: Chips,
    },

    RemovePlayer { table_id: TableId, player_name: String },

    /// Докупка фишек.
    AddChips {
        table_id: TableId,
        player_name: String,
        amount: Chips,
    },

    StartGame { table_id: TableId, player_name: String },

    NewRound { table_id: TableId, player_name: String },

    // --- действия в раздаче ---
    Check { table_id: TableId, player_name: String },

    Fold { table_id: TableId, player_name: String },

    Call { table_id: TableId, player_name: String },

    /// `amount` – итоговый вклад за раунд ("raise to").
    Bet {
        table_id: TableId,
        player_name: String,
        amount: Chips,
    },

    #[serde(rename = "allin")]
    AllIn { table_id: TableId, player_name: String },

    // --- чтение ---
    GetHand { table_id: TableId, player_name: String },

    GetDeal { table_id: TableId },

    GetCurrentPlayer { table_id: TableId },

    GetRoundName { table_id: TableId },

    GetPot { table_id: TableId },

    /// Стек игрока.
    GetPlayerPot { table_id: TableId, player_name: String },

    GetPreviousPlayerAction { table_id: TableId },

    GetAllHands { table_id: TableId },

    GetWinners { table_id: TableId },

    /// История текущей (или последней) раздачи.
    GetHistory { table_id: TableId },
}

/// Параметры нового стола.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateTableCommand {
    #[serde(default)]
    pub small_blind: Option<Chips>,
    #[serde(default)]
    pub big_blind: Option<Chips>,
    #[serde(default)]
    pub min_players: Option<usize>,
    #[serde(default)]
    pub max_players: Option<usize>,
    #[serde(default)]
    pub min_buy_in: Option<Chips>,
    #[serde(default)]
    pub max_buy_in: Option<Chips>,
    /// Создатель стола.
    pub player_name: String,
    /// Его бай-ин.
    pub chips: Chips,
}

impl CreateTableCommand {
    /// Собрать конфиг поверх значений по умолчанию (валидирует движок).
    pub fn to_config(&self, defaults: &TableConfig) -> TableConfig {
        TableConfig {
            stakes: TableStakes::new(
                self.small_blind.unwrap_or(defaults.stakes.small_blind),
                self.big_blind.unwrap_or(defaults.stakes.big_blind),
            ),
            min_players: self.min_players.unwrap_or(defaults.min_players),
            max_players: self.max_players.unwrap_or(defaults.max_players),
            min_buy_in: self.min_buy_in.unwrap_or(defaults.min_buy_in),
            max_buy_in: self.max_buy_in.unwrap_or(defaults.max_buy_in),
        }
    }
}

impl Command {
    /// Все значения поля `action`, которые понимает сервер.
    pub const ACTION_NAMES: &'static [&'static str] = &[
        "listTables",
        "createTable",
        "listPlayers",
        "addPlayer",
        "removePlayer",
        "addChips",
        "startGame",
        "newRound",
        "check",
        "fold",
        "call",
        "bet",
        "allin",
        "getHand",
        "getDeal",
        "getCurrentPlayer",
        "getRoundName",
        "getPot",
        "getPlayerPot",
        "getPreviousPlayerAction",
        "getAllHands",
        "getWinners",
        "getHistory",
    ];

    pub fn is_known_action(name: &str) -> bool {
        Self::ACTION_NAMES.contains(&name)
    }

    /// Имя действия (оно же уходит в поле `action` ответа).
    pub fn action_name(&self) -> &'static str {
        match self {
            Command::ListTables => "listTables",
            Command::CreateTable(_) => "createTable",
            Command::ListPlayers { .. } => "listPlayers",
            Command::AddPlayer { .. } => "addPlayer",
            Command::RemovePlayer { .. } => "removePlayer",
            Command::AddChips { .. } => "addChips",
            Command::StartGame { .. } => "startGame",
            Command::NewRound { .. } => "newRound",
            Command::Check { .. } => "check",
            Command::Fold { .. } => "fold",
            Command::Call { .. } => "call",
            Command::Bet { .. } => "bet",
            Command::AllIn { .. } => "allin",
            Command::GetHand { .. } => "getHand",
            Command::GetDeal { .. } => "getDeal",
            Command::GetCurrentPlayer { .. } => "getCurrentPlayer",
            Command::GetRoundName { .. } => "getRoundName",
            Command::GetPot { .. } => "getPot",
            Command::GetPlayerPot { .. } => "getPlayerPot",
            Command::GetPreviousPlayerAction { .. } => "getPreviousPlayerAction",
            Command::GetAllHands { .. } => "getAllHands",
            Command::GetWinners { .. } => "getWinners",
            Command::GetHistory { .. } => "getHistory",
        }
    }

    /// Для действий в раздаче: (стол, игрок, действие).
    /// Каждый глагол – своё действие движка.
    pub fn player_action(&self) -> Option<(TableId, &str, PlayerActionKind)> {
        match self {
            Command::Check { table_id, player_name } => {
                Some((*table_id, player_name, PlayerActionKind::Check))
            }
            Command::Fold { table_id, player_name } => {
                Some((*table_id, player_name, PlayerActionKind::Fold))
            }
            Command::Call { table_id, player_name } => {
                Some((*table_id, player_name, PlayerActionKind::Call))
            }
            Command::Bet {
                table_id,
                player_name,
                amount,
            } => Some((*table_id, player_name, PlayerActionKind::Bet(*amount))),
            Command::AllIn { table_id, player_name } => {
                Some((*table_id, player_name, PlayerActionKind::AllIn))
            }
            _ => None,
        }
    }
}
