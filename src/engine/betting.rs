use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::player::Player;

/// Состояние раунда ставок (на конкретной улице).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BettingState {
    /// Наибольший вклад за раунд, до которого должны дотянуться игроки (BB, bet, raise).
    pub current_bet: Chips,
    /// Минимальный размер повышающей части рейза.
    pub min_raise: Chips,
}

impl BettingState {
    /// Префлоп: большой блайнд уже стоит.
    pub fn preflop(big_blind: Chips) -> Self {
        Self {
            current_bet: big_blind,
            min_raise: big_blind,
        }
    }

    /// Новая улица: ставок нет, минимальный рейз снова BB.
    pub fn new_street(big_blind: Chips) -> Self {
        Self {
            current_bet: Chips::ZERO,
            min_raise: big_blind,
        }
    }

    /// Сколько игроку нужно доплатить, чтобы уравнять.
    pub fn to_call(&self, player: &Player) -> Chips {
        self.current_bet.saturating_sub(player.round_bet)
    }

    /// Минимальная сумма "raise to" для bet.
    pub fn min_raise_to(&self) -> Chips {
        self.current_bet + self.min_raise
    }

    /// Обновить состояние после повышения до `new_total`.
    ///
    /// Возвращает `true` для полного рейза. Неполный рейз (олл-ин меньше
    /// min_raise) поднимает ставку, но не меняет минимальный рейз и не
    /// открывает торговлю заново.
    pub fn on_raise(&mut self, new_total: Chips) -> bool {
        let raise_size = new_total.saturating_sub(self.current_bet);
        let full = raise_size >= self.min_raise;
        if full {
            self.min_raise = raise_size;
        }
        self.current_bet = new_total;
        full
    }

    /// Может ли игрок повышать. Кто уже походил, после неполного рейза
    /// только уравнивает или сбрасывает.
    pub fn may_raise(&self, player: &Player) -> bool {
        !player.acted
    }

    /// Нужно ли игроку ещё действовать в этом раунде.
    pub fn needs_action(&self, player: &Player) -> bool {
        player.can_act() && (!player.acted || player.round_bet < self.current_bet)
    }

    /// Проверка, завершён ли раунд ставок.
    ///
    /// Обычно: каждый Active игрок походил и уравнял наибольший вклад.
    /// Если Active игроков не больше одного, ходить ему не с кем: раунд
    /// закрыт, как только он уравнял.
    pub fn is_round_complete(&self, players: &[Player]) -> bool {
        let active: Vec<&Player> = players.iter().filter(|p| p.can_act()).collect();

        if active.len() <= 1 {
            return active.iter().all(|p| p.round_bet >= self.current_bet);
        }

        active.iter().all(|p| !self.needs_action(p))
    }
}
