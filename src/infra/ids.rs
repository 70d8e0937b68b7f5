use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::TableId;

/// Простая генерация ID на основе монотонного счётчика.
///
/// Номера раздач ведёт сам стол (`hands_played`), здесь только столы.
#[derive(Debug)]
pub struct IdGenerator {
    table_counter: AtomicU64,
}

impl IdGenerator {
    /// Создать генератор с начальным значением 1.
    pub fn new() -> Self {
        Self {
            table_counter: AtomicU64::new(1),
        }
    }

    /// ID, который выдаст следующий `next_table_id`.
    #[inline]
    pub fn peek_table_id(&self) -> TableId {
        self.table_counter.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn next_table_id(&self) -> TableId {
        self.table_counter.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
