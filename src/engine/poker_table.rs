//! Стол целиком: состояние `Table`, текущая раздача и источник случайности.
//!
//! Каждая операция внешнего контракта есть в двух видах:
//! - `try_*` возвращает `Result<_, EngineError>`;
//! - короткая версия возвращает `bool` / `Option` / пустой `Vec` и пишет
//!   причину отказа в лог.
//!
//! Доступ к столу должен быть однопоточным (см. `TableManager`).

use core::fmt;

use tracing::{info, warn};

use crate::domain::{Card, Chips, HandResult, Player, Stage, Table, TableConfig, TableId};
use crate::engine::actions::{PlayerAction, PlayerActionKind};
use crate::engine::errors::EngineError;
use crate::engine::game_loop::{abort_hand, apply_action, start_hand, HandEngine, HandStatus};
use crate::engine::hand_history::HandHistory;
use crate::engine::seating::{self, JoinOutcome, LeaveOutcome};
use crate::engine::RandomSource;

pub struct PokerTable {
    table: Table,
    hand: Option<HandEngine>,
    rng: Box<dyn RandomSource>,
}

impl fmt::Debug for PokerTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PokerTable")
            .field("id", &self.table.id)
            .field("stage", &self.table.stage)
            .field("players", &self.table.players.len())
            .finish()
    }
}

/// Отказ превращаем в sentinel и пишем в лог.
fn sentinel<T>(table_id: TableId, op: &str, player: &str, res: Result<T, EngineError>) -> Option<T> {
    match res {
        Ok(v) => Some(v),
        Err(e) => {
            warn!(table_id, op, player, reason = %e, "request rejected");
            None
        }
    }
}

impl PokerTable {
    /// Создать стол в Waiting с создателем на первом месте.
    pub fn new(
        id: TableId,
        config: TableConfig,
        creator: &str,
        chips: Chips,
        rng: Box<dyn RandomSource>,
    ) -> Result<Self, EngineError> {
        config.validate()?;

        let mut table = Table::new(id, config, creator);
        seating::seat_player(&mut table, creator, chips)?;

        info!(
            table_id = id,
            creator,
            small_blind = table.config.stakes.small_blind.amount(),
            big_blind = table.config.stakes.big_blind.amount(),
            "table created"
        );

        Ok(Self {
            table,
            hand: None,
            rng,
        })
    }

    pub fn id(&self) -> TableId {
        self.table.id
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Текущая (или последняя завершённая) раздача.
    pub fn hand(&self) -> Option<&HandEngine> {
        self.hand.as_ref()
    }

    pub fn stage(&self) -> Stage {
        self.table.stage
    }

    pub fn players(&self) -> &[Player] {
        &self.table.players
    }

    pub fn creator(&self) -> &str {
        &self.table.creator
    }

    // ---------------------------------------------------------------------
    // Рассадка
    // ---------------------------------------------------------------------

    pub fn try_add_player(&mut self, name: &str, chips: Chips) -> Result<JoinOutcome, EngineError> {
        seating::seat_player(&mut self.table, name, chips)
    }

    /// `true`, если игрок сел или поставлен в очередь.
    pub fn add_player(&mut self, name: &str, chips: Chips) -> bool {
        let res = self.try_add_player(name, chips);
        sentinel(self.id(), "addPlayer", name, res).is_some()
    }

    pub fn try_remove_player(&mut self, name: &str) -> Result<LeaveOutcome, EngineError> {
        seating::unseat_player(&mut self.table, name)
    }

    /// `true` только если игрок убран сразу; уход в очередь – `false`.
    pub fn remove_player(&mut self, name: &str) -> bool {
        let res = self.try_remove_player(name);
        sentinel(self.id(), "removePlayer", name, res) == Some(LeaveOutcome::Removed)
    }

    /// Докупка. Возвращает новый стек.
    pub fn try_credit_chips(&mut self, name: &str, amount: Chips) -> Result<Chips, EngineError> {
        seating::credit_chips(&mut self.table, name, amount)
    }

    pub fn credit_chips(&mut self, name: &str, amount: Chips) -> bool {
        let res = self.try_credit_chips(name, amount);
        sentinel(self.id(), "addChips", name, res).is_some()
    }

    // ---------------------------------------------------------------------
    // Жизненный цикл раздачи
    // ---------------------------------------------------------------------

    fn ensure_creator(&self, name: &str) -> Result<(), EngineError> {
        if self.table.is_creator(name) {
            Ok(())
        } else {
            Err(EngineError::NotCreator {
                player: name.to_string(),
                creator: self.table.creator.clone(),
            })
        }
    }

    fn deal_new_hand(&mut self) -> Result<(), EngineError> {
        let hand_id = self.table.hands_played + 1;
        let engine = start_hand(&mut self.table, self.rng.as_mut(), hand_id)?;
        self.hand = Some(engine);
        Ok(())
    }

    /// Первая раздача: только создатель и только из Waiting.
    pub fn try_start_game(&mut self, name: &str) -> Result<(), EngineError> {
        self.ensure_creator(name)?;
        if self.table.stage != Stage::Waiting {
            return Err(EngineError::HandInProgress);
        }
        self.deal_new_hand()
    }

    pub fn start_game(&mut self, name: &str) -> bool {
        let res = self.try_start_game(name);
        sentinel(self.id(), "startGame", name, res).is_some()
    }

    /// Новая раздача после завершённой: применить очереди, сдвинуть кнопку
    /// и сдать, если игроков хватает.
    ///
    /// При нехватке игроков очереди всё равно применяются, стол уходит в
    /// Waiting, а результат – `NotEnoughPlayers`.
    pub fn try_init_new_round(&mut self, name: &str) -> Result<(), EngineError> {
        self.ensure_creator(name)?;
        if self.table.stage.is_betting() {
            return Err(EngineError::HandInProgress);
        }

        // Кнопка двигается только после сыгранной раздачи, повторный
        // вызов из Waiting её не трогает.
        let rotate = matches!(self.table.stage, Stage::Showdown | Stage::HandOver);
        self.table.stage = Stage::Waiting;
        self.table.board.clear();
        self.hand = None;
        seating::apply_pending_changes(&mut self.table, rotate);
        for p in self.table.players.iter_mut() {
            p.reset_for_hand();
        }

        if !self.table.enough_players_to_start() {
            info!(
                table_id = self.id(),
                players = self.table.eligible_count(),
                "not enough players, table is waiting"
            );
            return Err(EngineError::NotEnoughPlayers {
                have: self.table.eligible_count(),
                need: self.table.config.min_players,
            });
        }

        self.deal_new_hand()
    }

    /// `true` только если сдана новая раздача.
    pub fn init_new_round(&mut self, name: &str) -> bool {
        let res = self.try_init_new_round(name);
        sentinel(self.id(), "newRound", name, res).is_some()
    }

    // ---------------------------------------------------------------------
    // Действия игроков
    // ---------------------------------------------------------------------

    pub fn try_act(&mut self, name: &str, kind: PlayerActionKind) -> Result<HandStatus, EngineError> {
        let hand = self.hand.as_mut().ok_or(EngineError::NoActiveHand)?;

        match apply_action(&mut self.table, hand, PlayerAction::new(name, kind)) {
            Err(e @ EngineError::DeckExhausted { .. }) => {
                abort_hand(&mut self.table, hand, &e);
                Err(e)
            }
            other => other,
        }
    }

    pub fn act(&mut self, name: &str, kind: PlayerActionKind) -> bool {
        let res = self.try_act(name, kind);
        sentinel(self.id(), kind.verb(), name, res).is_some()
    }

    pub fn check(&mut self, name: &str) -> bool {
        self.act(name, PlayerActionKind::Check)
    }

    pub fn call(&mut self, name: &str) -> bool {
        self.act(name, PlayerActionKind::Call)
    }

    pub fn fold(&mut self, name: &str) -> bool {
        self.act(name, PlayerActionKind::Fold)
    }

    /// `amount` – итоговый вклад игрока в раунде ("raise to").
    pub fn bet(&mut self, name: &str, amount: Chips) -> bool {
        self.act(name, PlayerActionKind::Bet(amount))
    }

    pub fn all_in(&mut self, name: &str) -> bool {
        self.act(name, PlayerActionKind::AllIn)
    }

    // ---------------------------------------------------------------------
    // Чтение
    // ---------------------------------------------------------------------

    /// Открытые общие карты (0/3/4/5).
    pub fn deal(&self) -> &[Card] {
        &self.table.board
    }

    /// Текущий банк (0 после выплаты).
    pub fn pot(&self) -> Chips {
        self.hand.as_ref().map(|h| h.pot.total).unwrap_or(Chips::ZERO)
    }

    /// Карманные карты игрока. Кому их показывать – решает вызывающий слой.
    pub fn hand_for_player(&self, name: &str) -> Vec<Card> {
        self.table
            .player(name)
            .map(|p| p.hole_cards.clone())
            .unwrap_or_default()
    }

    /// Стек игрока (сидящего или в очереди на посадку).
    pub fn player_stack(&self, name: &str) -> Option<Chips> {
        self.table
            .player(name)
            .or_else(|| self.table.pending_joins.iter().find(|p| p.name == name))
            .map(|p| p.stack)
    }

    /// Чей ход (только пока идёт раунд ставок).
    pub fn current_player(&self) -> Option<&str> {
        if !self.table.stage.is_betting() {
            return None;
        }
        self.hand
            .as_ref()
            .and_then(|h| h.current_actor)
            .and_then(|seat| self.table.players.get(seat))
            .map(|p| p.name.as_str())
    }

    pub fn round_name(&self) -> &'static str {
        self.table.stage.name()
    }

    /// Последнее действие на текущей улице, например "P1 call".
    pub fn previous_action(&self) -> Option<String> {
        self.hand
            .as_ref()
            .and_then(|h| h.previous_action.as_ref())
            .map(|a| a.to_string())
    }

    /// Карты всех, кому они раздавались. Только на шоудауне.
    pub fn all_hands(&self) -> Vec<(String, Vec<Card>)> {
        if self.table.stage != Stage::Showdown {
            return Vec::new();
        }
        self.table
            .players
            .iter()
            .filter(|p| !p.hole_cards.is_empty())
            .map(|p| (p.name.clone(), p.hole_cards.clone()))
            .collect()
    }

    pub fn result(&self) -> Option<&HandResult> {
        self.hand.as_ref().and_then(|h| h.result.as_ref())
    }

    pub fn winners(&self) -> Vec<String> {
        self.result().map(HandResult::winner_names).unwrap_or_default()
    }

    pub fn losers(&self) -> Vec<String> {
        self.result().map(|r| r.losers.clone()).unwrap_or_default()
    }

    pub fn history(&self) -> Option<&HandHistory> {
        self.hand.as_ref().map(|h| &h.history)
    }
}
