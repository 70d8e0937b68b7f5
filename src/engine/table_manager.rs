use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::domain::{Chips, TableConfig, TableId};
use crate::engine::actions::PlayerActionKind;
use crate::engine::errors::EngineError;
use crate::engine::poker_table::PokerTable;
use crate::engine::RandomSource;
use crate::infra::{DeterministicRng, IdGenerator, SystemRng};

/// Ошибки уровня менеджера столов (над движком одного стола).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ManagerError {
    /// Стол с таким ID не найден.
    #[error("Стол {0} не найден")]
    TableNotFound(TableId),

    /// Поток, державший стол, упал посреди операции.
    #[error("Стол {0} недоступен: блокировка отравлена")]
    Poisoned(TableId),

    /// Проброшенная ошибка из движка.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Откуда столы берут RNG: фабрика вызывается при создании каждого стола.
pub type RngFactory = Box<dyn Fn(TableId) -> Box<dyn RandomSource> + Send + Sync>;

/// Состав стола для лобби.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TablePlayers {
    pub players: Vec<String>,
    pub pending_joins: Vec<String>,
    pub pending_leaves: Vec<String>,
    /// Хватает ли игроков с фишками для раздачи.
    pub enough_players: bool,
}

/// Менеджер столов:
/// - хранит столы по TableId, выдаёт новые ID;
/// - каждый стол под своим `Mutex`: операции над одним столом идут строго
///   по одной, разные столы друг другу не мешают.
pub struct TableManager {
    ids: IdGenerator,
    tables: RwLock<HashMap<TableId, Arc<Mutex<PokerTable>>>>,
    rng_factory: RngFactory,
}

impl TableManager {
    pub fn new(rng_factory: RngFactory) -> Self {
        Self {
            ids: IdGenerator::new(),
            tables: RwLock::new(HashMap::new()),
            rng_factory,
        }
    }

    /// Менеджер с настоящим перемешиванием.
    pub fn with_system_rng() -> Self {
        Self::new(Box::new(|_: TableId| -> Box<dyn RandomSource> { Box::new(SystemRng) }))
    }

    /// Воспроизводимые раздачи: у каждого стола свой seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(Box::new(move |table_id: TableId| -> Box<dyn RandomSource> {
            Box::new(DeterministicRng::from_seed(seed.wrapping_add(table_id)))
        }))
    }

    /// Создать стол; создатель садится первым.
    pub fn create_table(
        &self,
        config: TableConfig,
        creator: &str,
        chips: Chips,
    ) -> Result<TableId, ManagerError> {
        // ID выдаётся под блокировкой реестра и только созданному столу.
        let mut tables = self
            .tables
            .write()
            .map_err(|_| ManagerError::Poisoned(self.ids.peek_table_id()))?;

        let id = self.ids.peek_table_id();
        let table = PokerTable::new(id, config, creator, chips, (self.rng_factory)(id))?;
        self.ids.next_table_id();

        tables.insert(id, Arc::new(Mutex::new(table)));
        info!(table_id = id, tables = tables.len(), "table registered");

        Ok(id)
    }

    /// ID всех столов по возрастанию.
    pub fn list_tables(&self) -> Vec<TableId> {
        let mut ids: Vec<TableId> = match self.tables.read() {
            Ok(tables) => tables.keys().copied().collect(),
            Err(poisoned) => poisoned.into_inner().keys().copied().collect(),
        };
        ids.sort_unstable();
        ids
    }

    fn table_handle(&self, table_id: TableId) -> Result<Arc<Mutex<PokerTable>>, ManagerError> {
        let tables = self
            .tables
            .read()
            .map_err(|_| ManagerError::Poisoned(table_id))?;
        tables
            .get(&table_id)
            .cloned()
            .ok_or(ManagerError::TableNotFound(table_id))
    }

    fn lock(
        table_id: TableId,
        handle: &Arc<Mutex<PokerTable>>,
    ) -> Result<MutexGuard<'_, PokerTable>, ManagerError> {
        handle.lock().map_err(|_| ManagerError::Poisoned(table_id))
    }

    /// Единственная точка доступа к столу: `f` выполняется под его мьютексом.
    pub fn with_table<R>(
        &self,
        table_id: TableId,
        f: impl FnOnce(&mut PokerTable) -> R,
    ) -> Result<R, ManagerError> {
        let handle = self.table_handle(table_id)?;
        let mut table = Self::lock(table_id, &handle)?;
        Ok(f(&mut *table))
    }

    pub fn list_players(&self, table_id: TableId) -> Result<TablePlayers, ManagerError> {
        self.with_table(table_id, |t| {
            let table = t.table();
            TablePlayers {
                players: table.players.iter().map(|p| p.name.clone()).collect(),
                pending_joins: table.pending_joins.iter().map(|p| p.name.clone()).collect(),
                pending_leaves: table.pending_leaves.clone(),
                enough_players: table.enough_players_to_start(),
            }
        })
    }

    pub fn add_player(&self, table_id: TableId, name: &str, chips: Chips) -> Result<bool, ManagerError> {
        self.with_table(table_id, |t| t.add_player(name, chips))
    }

    pub fn remove_player(&self, table_id: TableId, name: &str) -> Result<bool, ManagerError> {
        self.with_table(table_id, |t| t.remove_player(name))
    }

    pub fn credit_chips(&self, table_id: TableId, name: &str, amount: Chips) -> Result<bool, ManagerError> {
        self.with_table(table_id, |t| t.credit_chips(name, amount))
    }

    pub fn start_game(&self, table_id: TableId, name: &str) -> Result<bool, ManagerError> {
        self.with_table(table_id, |t| t.start_game(name))
    }

    pub fn new_round(&self, table_id: TableId, name: &str) -> Result<bool, ManagerError> {
        self.with_table(table_id, |t| t.init_new_round(name))
    }

    pub fn act(
        &self,
        table_id: TableId,
        name: &str,
        kind: PlayerActionKind,
    ) -> Result<bool, ManagerError> {
        self.with_table(table_id, |t| t.act(name, kind))
    }
}

impl Default for TableManager {
    fn default() -> Self {
        Self::with_system_rng()
    }
}
