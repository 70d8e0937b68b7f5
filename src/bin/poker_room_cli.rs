// src/bin/poker_room_cli.rs
//
// Dev-CLI покерного зала.
//
//   poker_room_cli                 – JSON-команды построчно из stdin, ответы в stdout
//   poker_room_cli --demo          – несколько столов, раздачи по сценариям
//   --seed <u64>                   – воспроизводимые перемешивания
//   --config <file.json>           – TableConfig для демо-столов
//
// Логи (tracing) идут в stderr, уровень – через RUST_LOG (по умолчанию poker_room=info).

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use clap::Parser;

use poker_room::api::handle_json;
use poker_room::domain::{Stage, TableConfig, TableId};
use poker_room::engine::{PlayerActionKind, PokerTable, TableManager};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Аргументы командной строки.
#[derive(Debug, Parser)]
#[command(name = "poker_room_cli", about = "Dev-CLI покерного зала")]
struct CliArgs {
    /// Несколько столов, раздачи по сценариям
    #[arg(long)]
    demo: bool,

    /// Сид для воспроизводимых перемешиваний
    #[arg(long)]
    seed: Option<u64>,

    /// TableConfig (JSON) для демо-столов
    #[arg(long)]
    config: Option<PathBuf>,
}

fn load_config(path: Option<&Path>) -> Result<TableConfig, String> {
    let Some(path) = path else {
        return Ok(TableConfig::default());
    };
    let shown = path.display();
    let raw = std::fs::read_to_string(path).map_err(|e| format!("{shown}: {e}"))?;
    let config: TableConfig = serde_json::from_str(&raw).map_err(|e| format!("{shown}: {e}"))?;
    config.validate().map_err(|e| format!("{shown}: {e}"))?;
    Ok(config)
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "poker_room=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() {
    let args = CliArgs::parse();
    init_tracing();

    if let Err(e) = run(args) {
        eprintln!("[CLI] ошибка: {e}");
        std::process::exit(1);
    }
}

fn run(args: CliArgs) -> Result<(), String> {
    let config = load_config(args.config.as_deref())?;

    let manager = match args.seed {
        Some(seed) => TableManager::seeded(seed),
        None => TableManager::with_system_rng(),
    };

    if args.demo {
        run_demo(&manager, &config)
    } else {
        serve_stdin(&manager)
    }
}

/// Построчный JSON-протокол: одна команда – одна строка ответа.
fn serve_stdin(manager: &TableManager) -> Result<(), String> {
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line.map_err(|e| e.to_string())?;
        if line.trim().is_empty() {
            continue;
        }
        let reply = handle_json(manager, &line);
        writeln!(stdout, "{reply}").map_err(|e| e.to_string())?;
        stdout.flush().map_err(|e| e.to_string())?;
    }

    Ok(())
}

/// Сценарий тестовой раздачи.
#[derive(Copy, Clone, Debug)]
enum Scenario {
    SimpleCheckCall,
    WithFold,
    WithRaises,
    WithAllIn,
}

fn run_demo(manager: &TableManager, config: &TableConfig) -> Result<(), String> {
    println!("poker_room_cli: стартуем мульти-табличное демо…");

    let buy_in = config.max_buy_in;
    let scenarios = [
        Scenario::SimpleCheckCall,
        Scenario::WithFold,
        Scenario::WithRaises,
        Scenario::WithAllIn,
    ];

    // Столы с разным количеством игроков (3–5).
    let mut table_ids: Vec<(TableId, String)> = Vec::new();
    for n in 0..3usize {
        let creator = format!("T{}P1", n + 1);
        let table_id = manager
            .create_table(config.clone(), &creator, buy_in)
            .map_err(|e| e.to_string())?;

        let num_players = (3 + n).min(config.max_players);
        for i in 2..=num_players {
            manager
                .add_player(table_id, &format!("T{}P{}", n + 1, i), buy_in)
                .map_err(|e| e.to_string())?;
        }
        table_ids.push((table_id, creator));
    }

    for (table_id, creator) in &table_ids {
        for (hand_no, scenario) in scenarios.iter().enumerate() {
            println!();
            println!("======== TABLE {table_id} | HAND {} | {scenario:?} ========", hand_no + 1);

            let dealt = (if hand_no == 0 {
                manager.start_game(*table_id, creator)
            } else {
                manager.new_round(*table_id, creator)
            })
            .map_err(|e| e.to_string())?;

            if !dealt {
                println!("[CLI] раздача не началась (мало игроков с фишками)");
                break;
            }

            manager
                .with_table(*table_id, |t| play_hand(t, *scenario))
                .map_err(|e| e.to_string())?;
        }
    }

    println!();
    println!("[CLI] Завершение демо.");
    Ok(())
}

/// Доиграть текущую раздачу по сценарию.
fn play_hand(table: &mut PokerTable, scenario: Scenario) {
    const MAX_STEPS: u32 = 200;

    print_table_state(table);

    for step in 1..=MAX_STEPS {
        let Some(player) = table.current_player().map(str::to_string) else {
            break;
        };

        let kind = pick_action(table, &player, scenario, step);
        let accepted = table.act(&player, kind);
        println!(
            "[CLI] step={step} round={} {player} -> {kind} ({})",
            table.round_name(),
            if accepted { "ok" } else { "rejected" }
        );

        // Отклонённый ход не двигает стол: дальше играем пассивно.
        if !accepted && !table.call(&player) {
            break;
        }
    }

    print_table_state(table);
    if let Some(result) = table.result() {
        println!("=== РАЗДАЧА ЗАВЕРШЕНА: банк {} ===", result.pot);
        for payout in &result.winners {
            println!("  {} +{}", payout.player, payout.amount);
        }
        if !result.losers.is_empty() {
            println!("  проиграли на вскрытии: {:?}", result.losers);
        }
    }
}

/// Стратегия бота: check/call, плюс отклонения по сценарию.
fn pick_action(table: &PokerTable, player: &str, scenario: Scenario, step: u32) -> PlayerActionKind {
    let Some(hand) = table.hand() else {
        return PlayerActionKind::Check;
    };
    let Some(me) = table.table().player(player) else {
        return PlayerActionKind::Fold;
    };
    let to_call = hand.betting.to_call(me);

    match scenario {
        Scenario::WithFold if table.stage() == Stage::PreFlop && step <= 2 => {
            return PlayerActionKind::Fold;
        }
        Scenario::WithRaises if step == 1 => {
            let target = hand.betting.min_raise_to();
            if target.saturating_sub(me.round_bet) <= me.stack {
                return PlayerActionKind::Bet(target);
            }
        }
        Scenario::WithAllIn if step == 1 => return PlayerActionKind::AllIn,
        _ => {}
    }

    if to_call.is_zero() {
        PlayerActionKind::Check
    } else if me.stack <= to_call {
        PlayerActionKind::AllIn
    } else {
        PlayerActionKind::Call
    }
}

fn print_table_state(table: &PokerTable) {
    let board: Vec<String> = table.deal().iter().map(|c| c.to_string()).collect();
    println!("================ TABLE STATE ================");
    println!(
        "table_id={} round={} pot={} board=[{}] current={:?}",
        table.id(),
        table.round_name(),
        table.pot(),
        board.join(" "),
        table.current_player(),
    );
    for p in table.players() {
        let hole: Vec<String> = p.hole_cards.iter().map(|c| c.to_string()).collect();
        println!(
            "  {} | stack={} | bet={} | status={:?} | hole=[{}]",
            p.name,
            p.stack,
            p.round_bet,
            p.status,
            hole.join(" "),
        );
    }
    if let Some(prev) = table.previous_action() {
        println!("previous: {prev}");
    }
    println!("=============================================");
}
