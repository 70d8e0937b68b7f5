// tests/engine_scenarios_tests.rs

//! Сквозные сценарии одного стола через `PokerTable`:
//! - старт игры и порядок ходов на префлопе;
//! - переход улиц по check/call;
//! - досрочная победа по фолдам;
//! - сплит банка с нечётной фишкой;
//! - шоудаун с одним победителем;
//! - олл-ин с автоматическим доездом до шоудауна;
//! - новая раздача;
//! - прерванная раздача с возвратом вкладов.

use std::collections::HashSet;

use poker_room::domain::{parse_cards, Card, Chips, Stage, TableConfig, TableStakes};
use poker_room::engine::{abort_hand, EngineError, HandEventKind, PokerTable};
use poker_room::eval::HandCategory;
use poker_room::infra::{DeterministicRng, FixedOrderRng};

/// Хелпер: стол с игроками P1..Pn по `chips` фишек; колода начинается с `top`
/// (карманные карты по 2 в порядке рассадки, затем флоп, тёрн, ривер).
fn table_with_deck(config: TableConfig, n: usize, chips: u64, top: &str) -> PokerTable {
    let rng = FixedOrderRng::new(parse_cards(top).expect("валидные карты"));
    let mut table =
        PokerTable::new(1, config, "P1", Chips(chips), Box::new(rng)).expect("стол создан");
    for i in 2..=n {
        assert!(table.add_player(&format!("P{i}"), Chips(chips)));
    }
    table
}

fn three_players() -> PokerTable {
    table_with_deck(TableConfig::default(), 3, 100, "")
}

fn stacks(table: &PokerTable) -> Vec<u64> {
    table.players().iter().map(|p| p.stack.amount()).collect()
}

fn total_chips(table: &PokerTable) -> u64 {
    stacks(table).iter().sum::<u64>() + table.pot().amount()
}

/// Инвариант банка: до выплаты он равен сумме вкладов игроков.
fn assert_pot_matches_contributions(table: &PokerTable) {
    if table.stage().is_betting() {
        assert_eq!(table.pot(), table.table().total_contributions());
    }
}

//
// СТАРТ
//

#[test]
fn only_creator_can_start_and_preflop_begins_after_big_blind() {
    let mut t = three_players();

    assert_eq!(t.round_name(), "Waiting");
    assert!(!t.start_game("P2"), "не создатель не может стартовать");
    assert_eq!(t.stage(), Stage::Waiting);

    assert!(t.start_game("P1"));
    assert_eq!(t.round_name(), "Deal");
    assert!(t.deal().is_empty());

    // Кнопка у P1, SB = P2, BB = P3, первым ходит P1.
    assert_eq!(t.table().dealer_button, 0);
    assert_eq!(t.current_player(), Some("P1"));
    assert_eq!(t.pot(), Chips(3));
    assert_eq!(stacks(&t), vec![100, 99, 98]);
    assert_eq!(t.previous_action(), None);

    // Повторный старт во время раздачи запрещён.
    assert!(!t.start_game("P1"));

    for name in ["P1", "P2", "P3"] {
        assert_eq!(t.hand_for_player(name).len(), 2);
    }
    assert!(t.hand_for_player("Nobody").is_empty());
}

#[test]
fn everyone_calls_preflop_then_flop_opens() {
    let mut t = three_players();
    assert!(t.start_game("P1"));

    assert!(t.call("P1"));
    assert_eq!(t.previous_action().as_deref(), Some("P1 call"));
    assert_eq!(t.current_player(), Some("P2"));

    assert!(t.call("P2"));
    assert_eq!(t.current_player(), Some("P3"));

    // BB уже уравнял: call без долга принимается.
    assert!(t.call("P3"));

    assert_eq!(t.round_name(), "Flop");
    assert_eq!(t.deal().len(), 3);
    assert_eq!(t.pot(), Chips(6));
    assert_eq!(t.current_player(), Some("P1"));
    // На новой улице предыдущего действия нет.
    assert_eq!(t.previous_action(), None);
}

#[test]
fn checking_down_reaches_showdown() {
    let mut t = three_players();
    assert!(t.start_game("P1"));
    for name in ["P1", "P2", "P3"] {
        assert!(t.call(name));
        assert_pot_matches_contributions(&t);
    }

    for (street, cards) in [("Flop", 3), ("Turn", 4), ("River", 5)] {
        assert_eq!(t.round_name(), street);
        assert_eq!(t.deal().len(), cards);
        for name in ["P1", "P2", "P3"] {
            assert!(t.check(name), "{name} check на {street}");
        }
    }

    assert_eq!(t.round_name(), "Showdown");
    assert_eq!(t.current_player(), None);
    assert_eq!(t.deal().len(), 5);
    assert_eq!(t.pot(), Chips::ZERO);
    assert_eq!(total_chips(&t), 300);

    // На шоудауне видны все руки.
    let hands = t.all_hands();
    assert_eq!(hands.len(), 3);
    assert!(hands.iter().all(|(_, cards)| cards.len() == 2));

    // Никаких ходов после конца раздачи.
    assert!(!t.check("P1"));
}

//
// ДОСРОЧНАЯ ПОБЕДА
//

#[test]
fn last_player_standing_takes_pot_without_showdown() {
    let mut t = three_players();
    assert!(t.start_game("P1"));

    assert!(t.call("P1"));
    assert!(t.fold("P2"));
    assert!(t.fold("P3"));

    assert_eq!(t.round_name(), "HandOver");
    assert!(t.deal().is_empty());
    assert_eq!(t.current_player(), None);
    assert_eq!(t.winners(), vec!["P1".to_string()]);
    assert!(t.losers().is_empty());
    // Без шоудауна чужие карты не раскрываются.
    assert!(t.all_hands().is_empty());

    assert_eq!(stacks(&t), vec![103, 99, 98]);
    let result = t.result().expect("результат раздачи");
    assert_eq!(result.pot, Chips(5));
    assert!(result.winners[0].best_hand.is_none());
}

//
// СПЛИТ
//

#[test]
fn split_pot_gives_odd_chip_to_first_winner_after_button() {
    let config = TableConfig {
        stakes: TableStakes::new(Chips(1), Chips(3)),
        ..TableConfig::default()
    };
    // Роял-флеш на борде: все оставшиеся делят банк.
    let mut t = table_with_deck(config, 3, 100, "2c 3d 4h 5d 7c 8d As Ks Qs Js Ts");
    assert!(t.start_game("P1"));

    assert!(t.call("P1"));
    assert!(t.fold("P2"));
    assert!(t.check("P3"));
    assert_eq!(t.round_name(), "Flop");
    assert_eq!(t.pot(), Chips(7));

    for _street in 0..3 {
        assert!(t.check("P1"));
        assert!(t.check("P3"));
    }

    assert_eq!(t.round_name(), "Showdown");
    assert_eq!(t.winners(), vec!["P1".to_string(), "P3".to_string()]);
    assert!(t.losers().is_empty());

    // Банк 7 на двоих: нечётная фишка – P3 (первый по часовой после кнопки).
    let result = t.result().unwrap();
    let amounts: Vec<(String, Chips)> = result
        .winners
        .iter()
        .map(|p| (p.player.clone(), p.amount))
        .collect();
    assert_eq!(
        amounts,
        vec![("P1".to_string(), Chips(3)), ("P3".to_string(), Chips(4))]
    );
    assert_eq!(stacks(&t), vec![100, 99, 101]);

    // Сфолдивший тоже получал карты, но на шоудауне его рука не оценивается.
    assert_eq!(t.all_hands().len(), 3);
}

//
// ШОУДАУН
//

#[test]
fn showdown_single_winner_and_losers() {
    // P1: Ah Kd, P2: 9c Th, P3: 2s 2d; борд Jc Qd 3h 7s 8c.
    let mut t = table_with_deck(
        TableConfig::default(),
        3,
        100,
        "Ah Kd 9c Th 2s 2d Jc Qd 3h 7s 8c",
    );
    assert!(t.start_game("P1"));
    for name in ["P1", "P2", "P3"] {
        assert!(t.call(name));
    }
    for _street in 0..3 {
        for name in ["P1", "P2", "P3"] {
            assert!(t.check(name));
        }
    }

    assert_eq!(t.round_name(), "Showdown");
    assert_eq!(t.deal(), parse_cards("Jc Qd 3h 7s 8c").unwrap().as_slice());
    assert_eq!(t.winners(), vec!["P2".to_string()]);
    assert_eq!(t.losers(), vec!["P1".to_string(), "P3".to_string()]);
    assert_eq!(stacks(&t), vec![98, 104, 98]);

    let payout = &t.result().unwrap().winners[0];
    assert_eq!(
        payout.rank.map(|r| r.category()),
        Some(HandCategory::Straight)
    );
    assert_eq!(payout.best_hand.as_ref().map(Vec::len), Some(5));

    // История: старт, блайнды, раздача карт, вскрытие, выплата, финиш.
    let history = t.history().expect("история раздачи");
    let kinds = &history.events;
    assert!(matches!(kinds[0].kind, HandEventKind::HandStarted { hand_id: 1, .. }));
    assert!(matches!(kinds[1].kind, HandEventKind::BlindsPosted { .. }));
    let reveals = kinds
        .iter()
        .filter(|e| matches!(e.kind, HandEventKind::ShowdownReveal { .. }))
        .count();
    assert_eq!(reveals, 3);
    assert!(matches!(
        kinds.last().map(|e| &e.kind),
        Some(HandEventKind::HandFinished {
            stage: Stage::Showdown,
            ..
        })
    ));
    // Индексы событий идут подряд.
    assert!(kinds.iter().enumerate().all(|(i, e)| e.index as usize == i));
}

//
// ОЛЛ-ИН
//

#[test]
fn all_in_and_call_runs_out_the_board() {
    // Хедз-ап: кнопка P1 ставит BB, P2 – SB и ходит первым.
    let mut t = table_with_deck(TableConfig::default(), 2, 100, "Ac Ad 7h 2s Kc 9d 5h 4s Jc");
    assert!(t.start_game("P1"));
    assert_eq!(stacks(&t), vec![98, 99]);
    assert_eq!(t.current_player(), Some("P2"));

    assert!(t.all_in("P2"));
    assert_eq!(t.previous_action().as_deref(), Some("P2 allin"));
    assert_eq!(t.current_player(), Some("P1"));
    assert_eq!(t.pot(), Chips(102));

    assert!(t.call("P1"));

    // Ходить некому: борд открывается до конца автоматически.
    assert_eq!(t.round_name(), "Showdown");
    assert_eq!(t.deal().len(), 5);
    assert_eq!(t.winners(), vec!["P1".to_string()]);
    assert_eq!(t.result().unwrap().pot, Chips(200));
    assert_eq!(stacks(&t), vec![200, 0]);

    // У P2 нет фишек: новая раздача не сдаётся, стол ждёт игроков.
    assert!(!t.init_new_round("P1"));
    assert_eq!(t.stage(), Stage::Waiting);
    assert!(t.deal().is_empty());
}

//
// НОВАЯ РАЗДАЧА
//

#[test]
fn new_round_moves_button_and_deals_fresh_cards() {
    let rng = DeterministicRng::from_seed(42);
    let mut t = PokerTable::new(1, TableConfig::default(), "P1", Chips(100), Box::new(rng))
        .expect("стол создан");
    assert!(t.add_player("P2", Chips(100)));
    assert!(t.add_player("P3", Chips(100)));
    assert!(t.start_game("P1"));

    // Раздача ещё идёт – новую начать нельзя.
    assert!(!t.init_new_round("P1"));

    assert!(t.call("P1"));
    assert!(t.call("P2"));
    assert!(t.check("P3"));
    assert_eq!(t.deal().len(), 3);
    assert!(t.fold("P1"));
    assert!(t.fold("P2"));
    assert_eq!(t.round_name(), "HandOver");

    // Только создатель пересдаёт.
    assert!(!t.init_new_round("P2"));
    assert!(t.init_new_round("P1"));

    assert_eq!(t.round_name(), "Deal");
    assert!(t.deal().is_empty());
    assert_eq!(t.table().dealer_button, 1);
    // Кнопка P2: SB = P3, BB = P1, первым ходит P2.
    assert_eq!(t.current_player(), Some("P2"));
    assert_eq!(t.hand().map(|h| h.hand_id), Some(2));

    // В новой раздаче карты не повторяются.
    let dealt: Vec<Card> = ["P1", "P2", "P3"]
        .iter()
        .flat_map(|name| t.hand_for_player(name))
        .collect();
    let unique: HashSet<Card> = dealt.iter().copied().collect();
    assert_eq!(dealt.len(), 6);
    assert_eq!(unique.len(), 6);

    assert_eq!(total_chips(&t), 300);
}

//
// ПРЕРВАННАЯ РАЗДАЧА
//

#[test]
fn aborted_hand_refunds_every_contribution() {
    let mut t = three_players();
    assert!(t.start_game("P1"));
    assert!(t.bet("P1", Chips(10)));
    assert_eq!(stacks(&t), vec![90, 99, 98]);

    let mut table = t.table().clone();
    let mut hand = t.hand().expect("раздача идёт").clone();
    let reason = EngineError::DeckExhausted {
        requested: 3,
        remaining: 0,
    };
    abort_hand(&mut table, &mut hand, &reason);

    // Все вклады вернулись, банк пуст, стол ждёт новой раздачи.
    let restored: Vec<u64> = table.players.iter().map(|p| p.stack.amount()).collect();
    assert_eq!(restored, vec![100, 100, 100]);
    assert_eq!(hand.pot.total, Chips::ZERO);
    assert_eq!(table.stage, Stage::Waiting);
    assert!(table.board.is_empty());
    assert!(table.total_contributions().is_zero());
    assert!(table.players.iter().all(|p| p.hole_cards.is_empty()));
    assert_eq!(hand.current_actor, None);
    assert_eq!(hand.previous_action, None);

    assert!(matches!(
        hand.history.events.last().map(|e| &e.kind),
        Some(HandEventKind::HandAborted { reason }) if reason.contains("колода исчерпана")
    ));
}
