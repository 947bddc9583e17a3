// src/bin/draft_dev_cli.rs

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use draft_engine::api::{CommandResponse, DraftCommand, NavigateCommand, PickCommand};
use draft_engine::bots::HeuristicStrategy;
use draft_engine::domain::{CardPool, DraftConfig, PackCard};
use draft_engine::engine::{navigate_to_position, validate_replay};
use draft_engine::infra::{DraftStorage, JsonDirStorage};
use draft_engine::DraftSession;

/// Локальная симуляция драфта: человек на автопилоте, боты по эвристике.
#[derive(Debug, Parser)]
#[command(name = "draft_dev_cli")]
struct Args {
    /// Seed драфта.
    #[arg(long, default_value = "dev-seed")]
    seed: String,

    /// Игроков за столом (1 человек + боты).
    #[arg(long, default_value_t = 8)]
    players: u8,

    #[arg(long, default_value_t = 3)]
    rounds: u8,

    /// JSON сета `{set_code, cards}`. Без него: синтетический пул.
    #[arg(long)]
    pool: Option<PathBuf>,

    /// Каталог для сохранения драфта.
    #[arg(long)]
    save_dir: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    println!("draft_dev_cli: стартуем симуляцию драфта…");

    let pool = match load_pool(args.pool.as_ref()) {
        Ok(pool) => pool,
        Err(err) => {
            eprintln!("[CLI] Не удалось загрузить пул: {err}");
            std::process::exit(1);
        }
    };

    let config = DraftConfig::new(pool)
        .with_players(args.players)
        .with_rounds(args.rounds);

    let mut session = match DraftSession::new(
        "dev-draft",
        &args.seed,
        config,
        HeuristicStrategy,
        now_ms(),
    ) {
        Ok(s) => s,
        Err(err) => {
            eprintln!("[CLI] Драфт не создан: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = session.dispatch(DraftCommand::Start) {
        eprintln!("[CLI] Старт не удался: {err}");
        std::process::exit(1);
    }

    println!();
    println!(
        "================ DRAFT seed={} ({} пиков на игрока) =================",
        args.seed,
        session.config().total_picks()
    );

    loop {
        let state = session.live_state();
        let Some(card_id) = state
            .human()
            .and_then(|p| p.current_pack.as_ref())
            .and_then(|pack| autopilot_pick(&pack.cards))
        else {
            println!("[CLI] У человека нет пака, выходим.");
            break;
        };

        let (round, pick) = (state.round, state.pick);
        let cmd = DraftCommand::Pick(PickCommand {
            card_id: card_id.clone(),
            timestamp: now_ms(),
            pick_time_ms: None,
        });

        match session.dispatch(cmd) {
            Ok(CommandResponse::Completed(view)) => {
                println!("R{round}P{pick:<2} -> {card_id}");
                println!("============ DRAFT COMPLETE: {} пиков ============", view.position);
                break;
            }
            Ok(_) => println!("R{round}P{pick:<2} -> {card_id}"),
            Err(err) => {
                println!("[CLI] BUG: пик отклонён: {err}");
                break;
            }
        }
    }

    // Самопроверка реплея.
    let live = session.live_state();
    match validate_replay(&live.seed, session.config(), &live.deltas, &HeuristicStrategy) {
        Ok(replayed) if &replayed == live => println!("[CLI] Реплей совпал с живым состоянием."),
        Ok(_) => println!("[CLI] BUG: реплей разошёлся с живым состоянием!"),
        Err(err) => println!("[CLI] BUG: реплей упал: {err}"),
    }

    // Навигация туда-обратно.
    if session.config().rounds >= 2 {
        let direct = navigate_to_position(
            &live.seed,
            session.config(),
            &live.deltas,
            2,
            5,
            &HeuristicStrategy,
        );
        let _ = session.dispatch(DraftCommand::Navigate(NavigateCommand { round: 1, pick: 3 }));
        let response = session.dispatch(DraftCommand::Navigate(NavigateCommand { round: 2, pick: 5 }));
        match (direct, response) {
            (Ok(direct), Ok(CommandResponse::Navigation(_))) => {
                if session.viewed_state() == &direct.state {
                    println!("[CLI] Навигация R1P3 -> R2P5 совпала с прямым реплеем.");
                } else {
                    println!("[CLI] BUG: навигация разошлась с прямым реплеем!");
                }
            }
            (direct, response) => println!("[CLI] Навигация: {direct:?} / {response:?}"),
        }
        let _ = session.dispatch(DraftCommand::ReturnToLive);
    }

    print_decks(&session);

    if let Some(dir) = args.save_dir {
        match JsonDirStorage::open(&dir) {
            Ok(mut storage) => {
                if session.save(&mut storage) {
                    println!("[CLI] Драфт сохранён в {}", storage.root().display());
                    println!("[CLI] Сохранённых драфтов: {}", storage.list().len());
                } else {
                    println!("[CLI] Сохранить драфт не удалось.");
                }
            }
            Err(err) => println!("[CLI] Хранилище недоступно: {err}"),
        }
    }

    println!("[CLI] Завершение работы dev-CLI (draft).");
}

fn load_pool(path: Option<&PathBuf>) -> Result<CardPool, String> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
            CardPool::from_json(&raw).map_err(|e| e.to_string())
        }
        None => Ok(CardPool::synthetic("DEV", 15, 53, 80, 101)),
    }
}

/// Автопилот человека: первая rare/mythic, иначе первая карта.
fn autopilot_pick(cards: &[PackCard]) -> Option<String> {
    cards
        .iter()
        .find(|c| c.card.rarity.is_rare_or_mythic())
        .or_else(|| cards.first())
        .map(|c| c.card.id.clone())
}

fn print_decks(session: &DraftSession) {
    println!();
    println!("================ PICKS =================");
    for player in &session.live_state().players {
        let tag = player
            .personality
            .as_ref()
            .map(|p| p.name.as_str())
            .unwrap_or("human");
        let rares = player
            .picked_cards
            .iter()
            .filter(|c| c.card.rarity.is_rare_or_mythic())
            .count();
        println!(
            "seat {} [{:<7}] {:<10} picks={:<3} rare/mythic={}",
            player.seat,
            tag,
            player.id,
            player.picked_cards.len(),
            rares
        );
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
