use tracing::{debug, error, info};

use crate::domain::chips::Chips;
use crate::domain::deck::Deck;
use crate::domain::hand::{HandResult, Payout, Stage};
use crate::domain::player::{Player, PlayerStatus};
use crate::domain::table::Table;
use crate::domain::{HandId, SeatIndex, TableId};
use crate::engine::actions::{PlayerAction, PlayerActionKind, PreviousAction};
use crate::engine::betting::BettingState;
use crate::engine::errors::EngineError;
use crate::engine::hand_history::{HandEventKind, HandHistory};
use crate::engine::positions::{clockwise_from, next_seat_where};
use crate::engine::pot::{split_pot, Pot};
use crate::engine::seating::apply_pending_changes;
use crate::engine::validation::validate_action;
use crate::engine::{new_shuffled_deck, RandomSource};
use crate::eval::{evaluate_best_hand, RankedHand};

/// Статус раздачи для внешнего кода.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandStatus {
    Ongoing,
    Finished(HandResult),
}

/// Внутреннее состояние раздачи.
///
/// Живёт рядом со столом и после окончания раздачи: из него читаются
/// результат и история, пока не сдана следующая.
#[derive(Clone, Debug)]
pub struct HandEngine {
    pub table_id: TableId,
    pub hand_id: HandId,
    pub deck: Deck,
    pub betting: BettingState,
    pub pot: Pot,
    /// Чей сейчас ход (seat).
    pub current_actor: Option<SeatIndex>,
    /// Последнее действие на текущей улице.
    pub previous_action: Option<PreviousAction>,
    /// История раздачи.
    pub history: HandHistory,
    /// Итог, когда раздача завершена.
    pub result: Option<HandResult>,
}

impl HandEngine {
    fn new(table_id: TableId, hand_id: HandId, deck: Deck, betting: BettingState) -> Self {
        Self {
            table_id,
            hand_id,
            deck,
            betting,
            pot: Pot::new(),
            current_actor: None,
            previous_action: None,
            history: HandHistory::new(),
            result: None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.result.is_some()
    }
}

/// Старт новой раздачи:
/// - перемешивает колоду и заранее берёт карманные карты;
/// - постит блайнды двух игроков после кнопки;
/// - раздаёт по 2 карты в порядке рассадки;
/// - ставит ход первому Active игроку после BB.
///
/// Кнопку двигает вызывающий код (`PokerTable::init_new_round`).
pub fn start_hand(
    table: &mut Table,
    rng: &mut dyn RandomSource,
    hand_id: HandId,
) -> Result<HandEngine, EngineError> {
    if table.stage.is_betting() {
        return Err(EngineError::HandInProgress);
    }

    let have = table.eligible_count();
    let need = table.config.min_players.max(2);
    if have < need {
        return Err(EngineError::NotEnoughPlayers { have, need });
    }

    if table.dealer_button >= table.players.len() {
        table.dealer_button = 0;
    }
    let dealer = table.dealer_button;
    let has_chips = |p: &Player| !p.stack.is_zero();
    let sb_seat = next_seat_where(&table.players, dealer, false, has_chips)
        .ok_or(EngineError::NotEnoughPlayers { have, need })?;
    let bb_seat = next_seat_where(&table.players, sb_seat, false, has_chips)
        .ok_or(EngineError::NotEnoughPlayers { have, need })?;

    // Карманные карты берём заранее: при нехватке карт стол не тронут.
    let mut deck = new_shuffled_deck(rng);
    let hole_cards = deck.draw(have * 2).map_err(|e| {
        error!(table_id = table.id, hand_id, error = %e, "cannot deal hole cards");
        EngineError::from(e)
    })?;

    table.board.clear();
    for p in table.players.iter_mut() {
        p.reset_for_hand();
    }
    table.stage = Stage::PreFlop;
    table.hands_played += 1;

    let stakes = table.config.stakes.clone();
    let mut engine = HandEngine::new(
        table.id,
        hand_id,
        deck,
        BettingState::preflop(stakes.big_blind),
    );

    engine.history.push(HandEventKind::HandStarted {
        table_id: table.id,
        hand_id,
        dealer,
    });

    let small_blind = post_blind(table, &mut engine, sb_seat, stakes.small_blind);
    let big_blind = post_blind(table, &mut engine, bb_seat, stakes.big_blind);
    engine
        .history
        .push(HandEventKind::BlindsPosted { small_blind, big_blind });

    for (player, cards) in table
        .players
        .iter_mut()
        .filter(|p| p.is_in_hand())
        .zip(hole_cards.chunks(2))
    {
        player.hole_cards = cards.to_vec();
        engine.history.push(HandEventKind::HoleCardsDealt {
            player: player.name.clone(),
            cards: cards.to_vec(),
        });
    }

    info!(
        table_id = table.id,
        hand_id,
        dealer,
        players = have,
        pot = engine.pot.total.amount(),
        "hand started"
    );

    // Если все уже в олл-ине с блайндов, раздача сразу доезжает до шоудауна.
    if let Err(e) = settle(table, &mut engine, bb_seat, false) {
        abort_hand(table, &mut engine, &e);
        return Err(e);
    }

    Ok(engine)
}

/// Поставить блайнд (не больше стека).
fn post_blind(
    table: &mut Table,
    engine: &mut HandEngine,
    seat: SeatIndex,
    amount: Chips,
) -> (String, Chips) {
    let player = &mut table.players[seat];
    let paid = player.commit(amount);
    engine.pot.add(paid);
    (player.name.clone(), paid)
}

/// Применить действие игрока. Возвращает статус раздачи (идёт / закончилась).
///
/// Все проверки делаются до первой мутации. `DeckExhausted` после мутации
/// означает, что раздачу надо прервать через `abort_hand`.
pub fn apply_action(
    table: &mut Table,
    engine: &mut HandEngine,
    action: PlayerAction,
) -> Result<HandStatus, EngineError> {
    if !table.stage.is_betting() || engine.is_finished() {
        return Err(EngineError::NoActiveHand);
    }

    let seat = table
        .seat_of(&action.player)
        .ok_or_else(|| EngineError::PlayerNotAtTable(action.player.clone()))?;

    if engine.current_actor != Some(seat) {
        return Err(EngineError::NotPlayersTurn(action.player.clone()));
    }

    validate_action(&table.players[seat], &action.kind, &engine.betting)?;

    let to_call = engine.betting.to_call(&table.players[seat]);

    match action.kind {
        PlayerActionKind::Fold => {
            table.players[seat].status = PlayerStatus::Folded;
        }

        PlayerActionKind::Check => {}

        PlayerActionKind::Call => {
            let paid = table.players[seat].commit(to_call);
            engine.pot.add(paid);
        }

        PlayerActionKind::Bet(total) => {
            let player = &mut table.players[seat];
            let paid = player.commit(total.saturating_sub(player.round_bet));
            engine.pot.add(paid);
            engine.betting.on_raise(total);
            reopen_action(&mut table.players, seat);
        }

        PlayerActionKind::AllIn => {
            let player = &mut table.players[seat];
            let stack = player.stack;
            let paid = player.commit(stack);
            let total = player.round_bet;
            engine.pot.add(paid);

            // Олл-ин выше текущей ставки – по сути рейз. Неполный рейз
            // только обязывает остальных доплатить разницу.
            if total > engine.betting.current_bet && engine.betting.on_raise(total) {
                reopen_action(&mut table.players, seat);
            }
        }
    }

    let player = &mut table.players[seat];
    player.acted = true;

    engine.history.push(HandEventKind::PlayerActed {
        player: player.name.clone(),
        action: action.kind,
        stack_after: player.stack,
        pot_after: engine.pot.total,
    });

    debug!(
        table_id = table.id,
        player = %action.player,
        action = %action.kind,
        stage = %table.stage,
        pot = engine.pot.total.amount(),
        "action applied"
    );

    engine.previous_action = Some(action.into());

    settle(table, engine, seat, false)
}

/// После повышения все остальные должны походить ещё раз.
fn reopen_action(players: &mut [Player], raiser: SeatIndex) {
    for (seat, p) in players.iter_mut().enumerate() {
        if seat != raiser {
            p.acted = false;
        }
    }
}

/// Довести раздачу до следующей точки, где нужен ход игрока:
/// закрыть раунд, открыть улицу, выплатить банк.
///
/// `from`/`include_from` – откуда искать следующего ходящего.
fn settle(
    table: &mut Table,
    engine: &mut HandEngine,
    from: SeatIndex,
    include_from: bool,
) -> Result<HandStatus, EngineError> {
    let (mut from, mut include_from) = (from, include_from);

    loop {
        if table.players_in_hand() <= 1 {
            return Ok(HandStatus::Finished(award_uncontested(table, engine)));
        }

        if !engine.betting.is_round_complete(&table.players) {
            let betting = &engine.betting;
            engine.current_actor =
                next_seat_where(&table.players, from, include_from, |p| betting.needs_action(p));
            return Ok(HandStatus::Ongoing);
        }

        advance_stage(table, engine)?;

        if table.stage == Stage::Showdown {
            return Ok(HandStatus::Finished(showdown(table, engine)));
        }

        // На постфлопе первым ходит первый Active, начиная с места кнопки.
        from = table.dealer_button;
        include_from = true;
    }
}

/// Закрыть раунд ставок и перейти на следующую стадию.
fn advance_stage(table: &mut Table, engine: &mut HandEngine) -> Result<(), EngineError> {
    let next = table.stage.next_street().ok_or(EngineError::NoActiveHand)?;
    let cards = engine.deck.draw(next.cards_to_deal())?;

    for p in table.players.iter_mut() {
        p.round_bet = Chips::ZERO;
        p.acted = false;
    }

    if !cards.is_empty() {
        table.board.extend_from_slice(&cards);
        engine
            .history
            .push(HandEventKind::BoardDealt { stage: next, cards });
    }

    table.stage = next;
    engine.history.push(HandEventKind::StageChanged { stage: next });
    engine.betting = BettingState::new_street(table.config.stakes.big_blind);
    engine.previous_action = None;
    engine.current_actor = None;

    info!(
        table_id = table.id,
        hand_id = engine.hand_id,
        stage = %next,
        board = table.board.len(),
        pot = engine.pot.total.amount(),
        "stage advanced"
    );

    Ok(())
}

/// Все, кроме одного, сфолдили: весь банк ему, без вскрытия.
fn award_uncontested(table: &mut Table, engine: &mut HandEngine) -> HandResult {
    let pot = engine.pot.take();
    let mut winners = Vec::new();

    if let Some(winner) = table.players.iter_mut().find(|p| p.is_in_hand()) {
        winner.stack += pot;
        engine.history.push(HandEventKind::PotAwarded {
            player: winner.name.clone(),
            amount: pot,
        });
        winners.push(Payout {
            player: winner.name.clone(),
            amount: pot,
            best_hand: None,
            rank: None,
        });
    }

    let result = HandResult {
        pot,
        winners,
        losers: Vec::new(),
    };
    finish_hand(table, engine, Stage::HandOver, result)
}

/// Шоудаун: оценить руки всех претендентов и поделить банк.
fn showdown(table: &mut Table, engine: &mut HandEngine) -> HandResult {
    let mut ranked: Vec<(SeatIndex, RankedHand)> = Vec::new();
    for (seat, p) in table.players.iter().enumerate().filter(|(_, p)| p.is_in_hand()) {
        if let Some(hand) = evaluate_best_hand(&p.hole_cards, &table.board) {
            engine.history.push(HandEventKind::ShowdownReveal {
                player: p.name.clone(),
                hole_cards: p.hole_cards.clone(),
                rank: hand.rank,
                category: hand.category(),
            });
            ranked.push((seat, hand));
        }
    }

    let Some(best) = ranked.iter().map(|(_, h)| h.rank).max() else {
        // Оценивать нечего (неполный борд) – банк без вскрытия.
        return award_uncontested(table, engine);
    };

    let hand_at = |seat: SeatIndex| ranked.iter().find(|(s, _)| *s == seat).map(|(_, h)| *h);

    // Победители по часовой от места после кнопки: первый забирает остаток.
    let len = table.players.len();
    let winner_seats: Vec<SeatIndex> = clockwise_from(len, table.dealer_button + 1)
        .filter(|&seat| hand_at(seat).map_or(false, |h| h.rank == best))
        .collect();

    let pot = engine.pot.take();
    let shares = split_pot(pot, winner_seats.len());

    let mut payouts: Vec<(SeatIndex, Payout)> = Vec::with_capacity(winner_seats.len());
    for (&seat, amount) in winner_seats.iter().zip(shares) {
        let player = &mut table.players[seat];
        player.stack += amount;
        engine.history.push(HandEventKind::PotAwarded {
            player: player.name.clone(),
            amount,
        });
        let hand = hand_at(seat);
        payouts.push((
            seat,
            Payout {
                player: player.name.clone(),
                amount,
                best_hand: hand.map(|h| h.cards.to_vec()),
                rank: hand.map(|h| h.rank),
            },
        ));
    }
    payouts.sort_by_key(|(seat, _)| *seat);

    let losers = ranked
        .iter()
        .filter(|(_, h)| h.rank != best)
        .map(|(seat, _)| table.players[*seat].name.clone())
        .collect();

    let result = HandResult {
        pot,
        winners: payouts.into_iter().map(|(_, p)| p).collect(),
        losers,
    };
    finish_hand(table, engine, Stage::Showdown, result)
}

fn finish_hand(
    table: &mut Table,
    engine: &mut HandEngine,
    stage: Stage,
    result: HandResult,
) -> HandResult {
    table.stage = stage;
    engine.current_actor = None;

    engine.history.push(HandEventKind::HandFinished {
        hand_id: engine.hand_id,
        stage,
    });

    info!(
        table_id = table.id,
        hand_id = engine.hand_id,
        stage = %stage,
        pot = result.pot.amount(),
        winners = ?result.winner_names(),
        "pot awarded"
    );

    engine.result = Some(result.clone());
    result
}

/// Прервать раздачу: вернуть все вклады, очистить карты, стол в Waiting.
///
/// Используется при внутренней ошибке (исчерпание колоды), чтобы не
/// испортить банк.
pub fn abort_hand(table: &mut Table, engine: &mut HandEngine, reason: &EngineError) {
    engine.pot.take();
    for p in table.players.iter_mut() {
        p.stack += p.hand_contribution;
        p.reset_for_hand();
    }

    table.board.clear();
    table.stage = Stage::Waiting;
    apply_pending_changes(table, false);

    engine.current_actor = None;
    engine.previous_action = None;
    engine.history.push(HandEventKind::HandAborted {
        reason: reason.to_string(),
    });

    error!(
        table_id = table.id,
        hand_id = engine.hand_id,
        error = %reason,
        "hand aborted, contributions refunded"
    );
}
