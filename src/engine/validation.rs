use crate::domain::chips::Chips;
use crate::domain::player::Player;
use crate::engine::actions::PlayerActionKind;
use crate::engine::betting::BettingState;
use crate::engine::errors::EngineError;

/// Проверка, может ли игрок выполнить это действие при текущем состоянии ставок.
///
/// Только чтение: если вернулась ошибка, стол не трогали.
pub fn validate_action(
    player: &Player,
    action: &PlayerActionKind,
    betting: &BettingState,
) -> Result<(), EngineError> {
    if !player.can_act() {
        return Err(EngineError::PlayerNotActive(player.name.clone()));
    }

    let to_call = betting.to_call(player);

    match action {
        PlayerActionKind::Fold => Ok(()),

        PlayerActionKind::Check => {
            if to_call.is_zero() {
                Ok(())
            } else {
                Err(EngineError::CannotCheck { to_call })
            }
        }

        // Call без долга – то же, что check; больше стека – олл-ин.
        PlayerActionKind::Call => Ok(()),

        PlayerActionKind::Bet(amount) => {
            if amount.is_zero() {
                return Err(EngineError::InvalidAmount(*amount));
            }

            if !betting.may_raise(player) {
                return Err(EngineError::RaiseNotReopened(player.name.clone()));
            }

            let min_total = betting.min_raise_to();
            if *amount < min_total {
                return Err(EngineError::RaiseTooSmall {
                    amount: *amount,
                    min_total,
                });
            }

            let needed = amount.saturating_sub(player.round_bet);
            if needed > player.stack {
                return Err(EngineError::NotEnoughChips {
                    needed,
                    stack: player.stack,
                });
            }

            Ok(())
        }

        PlayerActionKind::AllIn => {
            if player.stack.is_zero() {
                return Err(EngineError::InvalidAmount(Chips::ZERO));
            }
            // Олл-ин сверх долга – это рейз.
            if player.stack > to_call && !betting.may_raise(player) {
                return Err(EngineError::RaiseNotReopened(player.name.clone()));
            }
            Ok(())
        }
    }
}
