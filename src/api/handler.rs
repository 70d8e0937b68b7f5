//! Диспетчер команд: JSON -> `Command` -> `TableManager` -> JSON.

use tracing::{debug, warn};

use crate::domain::TableConfig;
use crate::engine::TableManager;

use super::commands::Command;
use super::dto::{cards_to_strings, ErrorResponse, PlayerHandDto, Reply, Response};
use super::errors::ApiError;

/// Выполнить одну команду.
///
/// `Err` – только для ошибок запроса (неизвестный стол, некорректный конфиг).
/// Отказы игровых операций – это `Ok` с `result: false`.
pub fn handle_command(manager: &TableManager, command: Command) -> Result<Response, ApiError> {
    let action = command.action_name();

    if let Some((table_id, player, kind)) = command.player_action() {
        let accepted = manager.act(table_id, player, kind)?;
        return Ok(Response {
            action,
            reply: Reply::Accepted { result: accepted },
        });
    }

    let reply = match command {
        Command::ListTables => Reply::Tables {
            result: manager.list_tables(),
        },

        Command::CreateTable(cmd) => {
            let config = cmd.to_config(&TableConfig::default());
            let id = manager.create_table(config, &cmd.player_name, cmd.chips)?;
            Reply::Created { id }
        }

        Command::ListPlayers { table_id } => Reply::Players {
            result: true,
            players: manager.list_players(table_id)?,
        },

        Command::AddPlayer {
            table_id,
            player_name,
            chips,
        } => {
            let result = manager.add_player(table_id, &player_name, chips)?;
            Reply::Players {
                result,
                players: manager.list_players(table_id)?,
            }
        }

        Command::RemovePlayer {
            table_id,
            player_name,
        } => {
            let result = manager.remove_player(table_id, &player_name)?;
            Reply::Players {
                result,
                players: manager.list_players(table_id)?,
            }
        }

        Command::AddChips {
            table_id,
            player_name,
            amount,
        } => Reply::Accepted {
            result: manager.credit_chips(table_id, &player_name, amount)?,
        },

        Command::StartGame {
            table_id,
            player_name,
        } => Reply::Accepted {
            result: manager.start_game(table_id, &player_name)?,
        },

        Command::NewRound {
            table_id,
            player_name,
        } => Reply::Accepted {
            result: manager.new_round(table_id, &player_name)?,
        },

        Command::GetHand {
            table_id,
            player_name,
        } => Reply::Cards {
            result: manager.with_table(table_id, |t| cards_to_strings(&t.hand_for_player(&player_name)))?,
        },

        Command::GetDeal { table_id } => Reply::Cards {
            result: manager.with_table(table_id, |t| cards_to_strings(t.deal()))?,
        },

        Command::GetCurrentPlayer { table_id } => Reply::Text {
            result: manager.with_table(table_id, |t| t.current_player().map(str::to_string))?,
        },

        Command::GetRoundName { table_id } => Reply::Text {
            result: Some(manager.with_table(table_id, |t| t.round_name().to_string())?),
        },

        Command::GetPot { table_id } => Reply::Amount {
            result: Some(manager.with_table(table_id, |t| t.pot())?),
        },

        Command::GetPlayerPot {
            table_id,
            player_name,
        } => Reply::Amount {
            result: manager.with_table(table_id, |t| t.player_stack(&player_name))?,
        },

        Command::GetPreviousPlayerAction { table_id } => Reply::Text {
            result: manager.with_table(table_id, |t| t.previous_action())?,
        },

        Command::GetAllHands { table_id } => Reply::Hands {
            result: manager.with_table(table_id, |t| {
                t.all_hands()
                    .into_iter()
                    .map(|(player_name, cards)| PlayerHandDto {
                        player_name,
                        cards: cards_to_strings(&cards),
                    })
                    .collect()
            })?,
        },

        Command::GetWinners { table_id } => {
            manager.with_table(table_id, |t| Reply::winners(t.result()))?
        }

        Command::GetHistory { table_id } => Reply::History {
            result: manager.with_table(table_id, |t| {
                t.history().map(|h| h.events.clone()).unwrap_or_default()
            })?,
        },

        Command::Check { .. }
        | Command::Fold { .. }
        | Command::Call { .. }
        | Command::Bet { .. }
        | Command::AllIn { .. } => {
            return Err(ApiError::Internal(format!("{action} must be routed as an action")));
        }
    };

    Ok(Response { action, reply })
}

/// Разобрать строку как команду.
pub fn parse_command(line: &str) -> Result<Command, ApiError> {
    let value: serde_json::Value =
        serde_json::from_str(line).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let action = value
        .get("action")
        .and_then(|a| a.as_str())
        .ok_or_else(|| ApiError::BadRequest("missing field `action`".to_string()))?;

    if !Command::is_known_action(action) {
        return Err(ApiError::InvalidAction(action.to_string()));
    }

    serde_json::from_value(value).map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// Полный цикл для транспорта: строка запроса -> строка ответа.
/// Всегда возвращает JSON (ошибки – как `{"error": ...}`).
pub fn handle_json(manager: &TableManager, line: &str) -> String {
    let outcome = parse_command(line).and_then(|cmd| handle_command(manager, cmd));

    let encoded = match outcome {
        Ok(response) => {
            debug!(action = response.action, "command handled");
            serde_json::to_string(&response)
        }
        Err(err) => {
            warn!(error = %err, "command failed");
            serde_json::to_string(&ErrorResponse {
                error: err.to_string(),
            })
        }
    };

    encoded.unwrap_or_else(|e| format!(r#"{{"error":"serialization failed: {e}"}}"#))
}
