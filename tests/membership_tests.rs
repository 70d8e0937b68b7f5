// tests/membership_tests.rs

//! Тесты рассадки:
//! - проверки посадки (дубликат, бай-ин, заполненный стол);
//! - очереди на вход/выход во время раздачи;
//! - применение очередей и сдвиг кнопки на новой раздаче;
//! - передача роли создателя;
//! - докупка фишек.

use poker_room::domain::{Chips, ConfigError, Stage, TableConfig};
use poker_room::engine::{EngineError, JoinOutcome, LeaveOutcome, PokerTable};
use poker_room::infra::DeterministicRng;

/// Хелпер: стол с P1 (создатель) и остальными по 100 фишек.
fn table_with(config: TableConfig, names: &[&str]) -> PokerTable {
    let rng = DeterministicRng::from_seed(99);
    let mut table =
        PokerTable::new(7, config, names[0], Chips(100), Box::new(rng)).expect("стол создан");
    for name in &names[1..] {
        assert_eq!(
            table.try_add_player(name, Chips(100)),
            Ok(JoinOutcome::Seated)
        );
    }
    table
}

fn names(table: &PokerTable) -> Vec<String> {
    table.players().iter().map(|p| p.name.clone()).collect()
}

//
// ПОСАДКА
//

#[test]
fn creation_validates_config_and_buy_in() {
    let bad_config = TableConfig {
        min_players: 1,
        ..TableConfig::default()
    };
    let rng = DeterministicRng::from_seed(1);
    let err = PokerTable::new(1, bad_config, "P1", Chips(100), Box::new(rng)).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Config(ConfigError::InvalidPlayerBounds { .. })
    ));

    let rng = DeterministicRng::from_seed(1);
    let err = PokerTable::new(1, TableConfig::default(), "P1", Chips(50), Box::new(rng)).unwrap_err();
    assert!(matches!(err, EngineError::BuyInOutOfRange { .. }));
}

#[test]
fn creator_sits_first() {
    let t = table_with(TableConfig::default(), &["P1"]);
    assert_eq!(names(&t), vec!["P1"]);
    assert_eq!(t.creator(), "P1");
    assert_eq!(t.stage(), Stage::Waiting);
    assert_eq!(t.player_stack("P1"), Some(Chips(100)));
}

#[test]
fn join_rejects_duplicates_and_bad_buy_in() {
    let mut t = table_with(TableConfig::default(), &["P1", "P2"]);

    assert_eq!(
        t.try_add_player("P2", Chips(100)),
        Err(EngineError::PlayerAlreadySeated("P2".to_string()))
    );
    assert_eq!(
        t.try_add_player("P3", Chips(99)),
        Err(EngineError::BuyInOutOfRange {
            chips: Chips(99),
            min: Chips(100),
            max: Chips(200)
        })
    );
    assert!(!t.add_player("P3", Chips(201)));
    assert!(t.add_player("P3", Chips(200)));
    assert_eq!(names(&t), vec!["P1", "P2", "P3"]);
}

#[test]
fn full_table_counts_queued_players() {
    let config = TableConfig {
        max_players: 3,
        ..TableConfig::default()
    };
    let mut t = table_with(config, &["P1", "P2"]);
    assert!(t.start_game("P1"));

    // Третье место занимает игрок из очереди.
    assert_eq!(t.try_add_player("P3", Chips(100)), Ok(JoinOutcome::Queued));
    assert_eq!(
        t.try_add_player("P4", Chips(100)),
        Err(EngineError::TableFull(3))
    );
}

//
// ОЧЕРЕДИ ВО ВРЕМЯ РАЗДАЧИ
//

#[test]
fn join_during_hand_waits_for_next_round() {
    let mut t = table_with(TableConfig::default(), &["P1", "P2", "P3"]);
    assert!(t.start_game("P1"));

    assert_eq!(t.try_add_player("P4", Chips(100)), Ok(JoinOutcome::Queued));
    assert_eq!(names(&t), vec!["P1", "P2", "P3"]);
    assert_eq!(t.table().pending_joins.len(), 1);
    assert!(t.hand_for_player("P4").is_empty());

    // Докупка работает и для игрока из очереди.
    assert!(t.credit_chips("P4", Chips(50)));
    assert_eq!(t.player_stack("P4"), Some(Chips(150)));

    assert!(t.call("P1"));
    assert!(t.fold("P2"));
    assert!(t.fold("P3"));
    assert_eq!(t.stage(), Stage::HandOver);

    // После конца раздачи состав всё ещё заморожен.
    assert!(t.add_player("P5", Chips(100)));
    assert_eq!(t.table().pending_joins.len(), 2);

    assert!(t.init_new_round("P1"));
    assert_eq!(names(&t), vec!["P1", "P2", "P3", "P4", "P5"]);
    assert!(t.table().pending_joins.is_empty());

    // Кнопка перешла к P2: SB = P3, BB = P4, первым ходит P5.
    assert_eq!(t.table().dealer_button, 1);
    assert_eq!(t.current_player(), Some("P5"));
    assert_eq!(t.hand_for_player("P4").len(), 2);
    assert_eq!(t.player_stack("P4"), Some(Chips(148)));
}

#[test]
fn leave_during_hand_keeps_player_until_next_round() {
    let mut t = table_with(TableConfig::default(), &["P1", "P2", "P3"]);
    assert!(t.start_game("P1"));

    // Уход в очередь – это не немедленное удаление.
    assert!(!t.remove_player("P2"));
    assert_eq!(t.try_remove_player("P2"), Ok(LeaveOutcome::Queued));
    assert_eq!(t.table().pending_leaves, vec!["P2".to_string()]);
    assert_eq!(names(&t), vec!["P1", "P2", "P3"]);

    // Уходящий игрок доигрывает раздачу.
    assert!(t.call("P1"));
    assert!(t.fold("P2"));
    assert!(t.fold("P3"));

    assert!(t.init_new_round("P1"));
    assert_eq!(names(&t), vec!["P1", "P3"]);
    assert!(t.table().pending_leaves.is_empty());
    assert_eq!(t.stage(), Stage::PreFlop);
    // Кнопку получил следующий неуходящий игрок.
    assert_eq!(t.table().dealer_button, 1);
}

#[test]
fn queued_join_can_be_cancelled() {
    let mut t = table_with(TableConfig::default(), &["P1", "P2"]);
    assert!(t.start_game("P1"));

    assert!(t.add_player("P3", Chips(100)));
    assert!(t.remove_player("P3"));
    assert!(t.table().pending_joins.is_empty());
    assert_eq!(t.player_stack("P3"), None);
}

#[test]
fn not_enough_players_after_leave_returns_to_waiting() {
    let mut t = table_with(TableConfig::default(), &["P1", "P2"]);
    assert!(t.start_game("P1"));

    assert!(!t.remove_player("P2"));
    // Хедз-ап: SB = P2 ходит первым.
    assert_eq!(t.current_player(), Some("P2"));
    assert!(t.fold("P2"));
    assert_eq!(t.winners(), vec!["P1".to_string()]);

    assert_eq!(
        t.try_init_new_round("P1"),
        Err(EngineError::NotEnoughPlayers { have: 1, need: 2 })
    );
    assert_eq!(t.stage(), Stage::Waiting);
    assert_eq!(names(&t), vec!["P1"]);

    // Новый игрок садится сразу, можно стартовать заново.
    assert_eq!(t.try_add_player("P3", Chips(100)), Ok(JoinOutcome::Seated));
    assert!(t.start_game("P1"));
    assert_eq!(t.round_name(), "Deal");
}

#[test]
fn failed_new_round_does_not_move_button_twice() {
    let config = TableConfig {
        min_players: 3,
        ..TableConfig::default()
    };
    let mut t = table_with(config, &["P1", "P2", "P3"]);
    assert!(t.start_game("P1"));
    assert_eq!(t.try_remove_player("P3"), Ok(LeaveOutcome::Queued));
    assert!(t.fold("P1"));
    assert!(t.fold("P2"));
    assert_eq!(t.stage(), Stage::HandOver);

    // Первая попытка: кнопка ушла к P2, P3 вышел, игроков мало.
    assert_eq!(
        t.try_init_new_round("P1"),
        Err(EngineError::NotEnoughPlayers { have: 2, need: 3 })
    );
    assert_eq!(t.table().dealer_button, 1);

    // Повтор из Waiting кнопку не двигает.
    assert!(!t.init_new_round("P1"));
    assert_eq!(t.table().dealer_button, 1);

    assert_eq!(t.try_add_player("P4", Chips(100)), Ok(JoinOutcome::Seated));
    assert!(t.init_new_round("P1"));
    // Кнопка P2: SB = P4, BB = P1, первым ходит P2.
    assert_eq!(t.table().dealer_button, 1);
    assert_eq!(t.current_player(), Some("P2"));
}

//
// УХОД ВНЕ РАЗДАЧИ
//

#[test]
fn leave_while_waiting_is_immediate() {
    let mut t = table_with(TableConfig::default(), &["P1", "P2", "P3"]);

    assert!(t.remove_player("P3"));
    assert_eq!(names(&t), vec!["P1", "P2"]);

    assert!(!t.remove_player("P3"));
    assert_eq!(
        t.try_remove_player("Ghost"),
        Err(EngineError::PlayerNotAtTable("Ghost".to_string()))
    );
}

#[test]
fn creator_role_passes_to_first_remaining_player() {
    let mut t = table_with(TableConfig::default(), &["P1", "P2", "P3"]);

    assert!(t.remove_player("P1"));
    assert_eq!(t.creator(), "P2");

    assert!(!t.start_game("P1"));
    assert_eq!(
        t.try_start_game("P3"),
        Err(EngineError::NotCreator {
            player: "P3".to_string(),
            creator: "P2".to_string()
        })
    );
    assert!(t.start_game("P2"));
}

//
// ДОКУПКА
//

#[test]
fn credit_chips_adds_to_stack() {
    let mut t = table_with(TableConfig::default(), &["P1", "P2"]);

    assert_eq!(t.try_credit_chips("P2", Chips(50)), Ok(Chips(150)));
    assert_eq!(t.player_stack("P2"), Some(Chips(150)));

    assert_eq!(
        t.try_credit_chips("P2", Chips::ZERO),
        Err(EngineError::InvalidAmount(Chips::ZERO))
    );
    assert!(!t.credit_chips("Ghost", Chips(10)));
}

#[test]
fn broke_player_sits_out_until_rebuy() {
    // Олл-ин двоих: проигравший остаётся без фишек.
    let mut t = table_with(TableConfig::default(), &["P1", "P2", "P3"]);
    assert!(t.start_game("P1"));
    assert!(t.all_in("P1"));
    assert!(t.all_in("P2"));
    assert!(t.fold("P3"));
    assert_eq!(t.stage(), Stage::Showdown);

    let broke: Vec<String> = t
        .players()
        .iter()
        .filter(|p| p.stack.is_zero())
        .map(|p| p.name.clone())
        .collect();

    // Если кто-то остался без фишек, он пропускает раздачу до докупки.
    assert!(t.init_new_round("P1"));
    for name in &broke {
        assert!(t.hand_for_player(name).is_empty());
        assert!(t.credit_chips(name, Chips(100)));
    }
    let total: u64 = t.players().iter().map(|p| p.stack.amount()).sum::<u64>() + t.pot().amount();
    assert_eq!(total, 300 + 100 * broke.len() as u64);
}
