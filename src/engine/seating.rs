//! Рассадка: посадка, уход, докупка фишек.
//!
//! Пока стол не в `Waiting`, изменения состава копятся в очередях
//! `pending_joins` / `pending_leaves` и применяются в `apply_pending_changes`
//! на границе новой раздачи.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::{Chips, Player, Table};
use crate::engine::errors::EngineError;
use crate::engine::positions::next_button_holder;

/// Чем закончилась посадка.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum JoinOutcome {
    /// Игрок сел сразу.
    Seated,
    /// Идёт раздача: игрок сядет на следующей.
    Queued,
}

/// Чем закончился уход.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum LeaveOutcome {
    /// Игрок убран сразу.
    Removed,
    /// Идёт раздача: игрок уйдёт на границе новой (его фишки в банке остаются).
    Queued,
}

/// Посадить игрока (или поставить в очередь).
pub fn seat_player(table: &mut Table, name: &str, chips: Chips) -> Result<JoinOutcome, EngineError> {
    if table.player(name).is_some() || table.pending_joins.iter().any(|p| p.name == name) {
        return Err(EngineError::PlayerAlreadySeated(name.to_string()));
    }

    if !table.config.buy_in_allowed(chips) {
        return Err(EngineError::BuyInOutOfRange {
            chips,
            min: table.config.min_buy_in,
            max: table.config.max_buy_in,
        });
    }

    let max = table.config.max_players;
    if table.seated_count() + table.pending_joins.len() >= max {
        return Err(EngineError::TableFull(max));
    }

    let player = Player::new(name, chips);
    if table.membership_frozen() {
        debug!(table_id = table.id, player = name, "join queued until next hand");
        table.pending_joins.push(player);
        Ok(JoinOutcome::Queued)
    } else {
        info!(table_id = table.id, player = name, chips = chips.amount(), "player seated");
        table.players.push(player);
        Ok(JoinOutcome::Seated)
    }
}

/// Убрать игрока (или поставить уход в очередь).
pub fn unseat_player(table: &mut Table, name: &str) -> Result<LeaveOutcome, EngineError> {
    // Ещё не сел – просто убираем из очереди.
    if let Some(idx) = table.pending_joins.iter().position(|p| p.name == name) {
        table.pending_joins.remove(idx);
        return Ok(LeaveOutcome::Removed);
    }

    if table.seat_of(name).is_none() {
        return Err(EngineError::PlayerNotAtTable(name.to_string()));
    }

    if table.membership_frozen() {
        if !table.pending_leaves.iter().any(|n| n == name) {
            table.pending_leaves.push(name.to_string());
        }
        debug!(table_id = table.id, player = name, "leave queued until next hand");
        return Ok(LeaveOutcome::Queued);
    }

    remove_seated(table, name);
    Ok(LeaveOutcome::Removed)
}

/// Докупка фишек (в том числе игроку из очереди на посадку).
pub fn credit_chips(table: &mut Table, name: &str, amount: Chips) -> Result<Chips, EngineError> {
    if amount.is_zero() {
        return Err(EngineError::InvalidAmount(amount));
    }

    let player = match table.players.iter_mut().find(|p| p.name == name) {
        Some(p) => p,
        None => table
            .pending_joins
            .iter_mut()
            .find(|p| p.name == name)
            .ok_or_else(|| EngineError::PlayerNotAtTable(name.to_string()))?,
    };

    player.stack += amount;
    debug!(player = name, amount = amount.amount(), stack = player.stack.amount(), "chips credited");
    Ok(player.stack)
}

/// Применить очереди и передвинуть кнопку. Вызывается только между раздачами.
pub fn apply_pending_changes(table: &mut Table, rotate_button: bool) {
    let leaving = std::mem::take(&mut table.pending_leaves);

    let button_holder = if rotate_button {
        next_button_holder(&table.players, table.dealer_button, &leaving)
    } else {
        table
            .players
            .get(table.dealer_button)
            .filter(|p| !leaving.contains(&p.name))
            .map(|p| p.name.clone())
    };

    for name in &leaving {
        remove_seated(table, name);
    }

    let free = table.config.max_players.saturating_sub(table.players.len());
    let joins = std::mem::take(&mut table.pending_joins);
    for player in joins.into_iter().take(free) {
        info!(table_id = table.id, player = %player.name, "queued player seated");
        table.players.push(player);
    }

    table.dealer_button = button_holder
        .and_then(|name| table.seat_of(&name))
        .unwrap_or(0);
}

/// Удалить сидящего игрока; роль создателя переходит первому оставшемуся.
fn remove_seated(table: &mut Table, name: &str) {
    let Some(seat) = table.seat_of(name) else {
        return;
    };
    table.players.remove(seat);

    if table.dealer_button > seat || table.dealer_button >= table.players.len() {
        table.dealer_button = table.dealer_button.saturating_sub(1);
    }

    if table.creator == name {
        if let Some(next) = table.players.first() {
            info!(table_id = table.id, old = name, new = %next.name, "creator role passed");
            table.creator = next.name.clone();
        }
    }

    info!(table_id = table.id, player = name, "player left table");
}
