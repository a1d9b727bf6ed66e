mod commands;
mod session;

use std::io::BufRead;
use std::path::PathBuf;

use clap::Parser;
use tokio::sync::mpsc;

use snake_engine::config::ConfigManager;
use snake_engine::persistence::{FileHighScoreStore, NullHighScoreStore};
use snake_engine::{log, logger, EngineConfig, GameEngine, GameSnapshot, HighScoreStore, SessionRng};

use commands::{parse_command, RunnerCommand};
use session::{run_session, SessionOptions};

#[derive(Parser)]
#[command(name = "snake_runner", about = "Headless host for the snake rule engine")]
struct Args {
    /// YAML engine config; defaults are used when the file does not exist.
    #[arg(long, default_value = "snake_config.yaml")]
    config: PathBuf,

    #[arg(long, default_value = "snake_high_score.yaml")]
    high_score_file: PathBuf,

    /// Keep the high score in memory only.
    #[arg(long)]
    no_persist: bool,

    /// Let the built-in bot steer instead of reading turns from stdin.
    #[arg(long)]
    autopilot: bool,

    #[arg(long, default_value_t = 1)]
    rounds: u32,

    #[arg(long)]
    max_ticks: Option<u64>,

    #[arg(long)]
    seed: Option<u64>,

    /// Log every emitted snapshot, not only game events.
    #[arg(long)]
    verbose: bool,

    #[arg(long)]
    use_log_prefix: bool,
}

fn log_snapshot(snapshot: &GameSnapshot) {
    let head = snapshot.head().map(|p| format!("({}, {})", p.x, p.y)).unwrap_or_default();
    let food = snapshot
        .food
        .map(|p| format!("({}, {})", p.x, p.y))
        .unwrap_or_else(|| "none".to_string());
    log!(
        "{:?} head {} len {} food {} score {} best {} tick {:?}",
        snapshot.status,
        head,
        snapshot.snake.len(),
        food,
        snapshot.score,
        snapshot.high_score,
        snapshot.tick_interval()
    );
}

/// Plain thread: a blocked stdin read must not delay runtime shutdown.
fn spawn_stdin_reader(command_tx: mpsc::UnboundedSender<RunnerCommand>) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    log!("Failed to read input: {}", e);
                    break;
                }
            };
            let Some(command) = parse_command(&line) else {
                log!("Unknown command: {:?}", line);
                continue;
            };
            if command_tx.send(command).is_err() || command == RunnerCommand::Quit {
                break;
            }
        }
    });
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Runner".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config: EngineConfig = ConfigManager::from_yaml_file(&args.config).get_config()?;

    let store: Box<dyn HighScoreStore> = if args.no_persist {
        Box::new(NullHighScoreStore)
    } else {
        log!("High score file: {}", args.high_score_file.display());
        Box::new(FileHighScoreStore::from_yaml_file(&args.high_score_file))
    };

    let rng = match args.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    let seed = rng.seed();
    log!("Session seed: {}", seed);
    let mut engine = GameEngine::new(config, store, rng)?;
    if args.verbose {
        engine.subscribe(log_snapshot);
    }

    let (command_tx, mut command_rx) = mpsc::unbounded_channel();
    if args.autopilot {
        drop(command_tx);
    } else {
        log!("Type start to play; up/down/left/right (or wasd) to turn, p to pause, q to quit");
        spawn_stdin_reader(command_tx);
    }

    let options = SessionOptions {
        autopilot: args.autopilot,
        rounds: args.rounds.max(1),
        max_ticks: args.max_ticks,
    };
    let mut bot_rng = SessionRng::new(seed.wrapping_add(1));
    let summary = run_session(&mut engine, &mut command_rx, options, &mut bot_rng).await;

    log!(
        "Session finished: {} game(s), best score {}, high score {}, {} ticks",
        summary.games_played,
        summary.best_score,
        engine.high_score(),
        summary.ticks
    );

    Ok(())
}
