use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

use snake_engine::snake::BotController;
use snake_engine::{log, GameEngine, GameStatus, HighScoreStore, SessionRng, TickOutcome};

use crate::commands::RunnerCommand;

pub struct SessionOptions {
    pub autopilot: bool,
    /// Autopilot games to play before returning.
    pub rounds: u32,
    /// Safety cap on ticks across the whole session; `None` means no cap.
    pub max_ticks: Option<u64>,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub games_played: u32,
    pub best_score: u32,
    pub ticks: u64,
}

/// The only timer of a session. Armed while the engine is playing, dropped
/// otherwise, and re-created whenever the tick interval changes.
#[derive(Default)]
pub struct TickTimer {
    interval: Option<Interval>,
    period: Option<Duration>,
}

impl TickTimer {
    /// Returns `true` when a new interval was armed.
    pub fn sync(&mut self, status: GameStatus, period: Duration) -> bool {
        if status != GameStatus::Playing {
            self.interval = None;
            self.period = None;
            return false;
        }
        if self.interval.is_some() && self.period == Some(period) {
            return false;
        }

        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
        self.period = Some(period);
        true
    }

    pub fn is_armed(&self) -> bool {
        self.interval.is_some()
    }

    async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

pub async fn run_session<S: HighScoreStore>(
    engine: &mut GameEngine<S>,
    command_rx: &mut mpsc::UnboundedReceiver<RunnerCommand>,
    options: SessionOptions,
    bot_rng: &mut SessionRng,
) -> SessionSummary {
    let mut summary = SessionSummary::default();
    let mut timer = TickTimer::default();
    let mut commands_open = true;

    if options.autopilot {
        engine.start();
    }

    loop {
        timer.sync(engine.status(), engine.tick_interval());

        tokio::select! {
            _ = timer.tick() => {
                if options.autopilot
                    && let Some(direction) = BotController::calculate_move(&engine.snapshot(), bot_rng)
                {
                    engine.request_direction(direction);
                }

                let outcome = engine.tick();
                summary.ticks += 1;

                if let TickOutcome::GameOver(reason) = outcome {
                    let snapshot = engine.snapshot();
                    summary.games_played += 1;
                    summary.best_score = summary.best_score.max(snapshot.score);
                    log!(
                        "Game {} over ({:?}): score {}, high score {}",
                        summary.games_played,
                        reason,
                        snapshot.score,
                        snapshot.high_score
                    );

                    if options.autopilot {
                        if summary.games_played >= options.rounds {
                            break;
                        }
                        engine.start();
                    }
                }

                if options.max_ticks.is_some_and(|max| summary.ticks >= max) {
                    log!("Tick limit of {} reached", summary.ticks);
                    break;
                }
            }
            command = command_rx.recv(), if commands_open => {
                match command {
                    Some(command) => {
                        if !handle_command(engine, command) {
                            break;
                        }
                    }
                    None => {
                        commands_open = false;
                        if !options.autopilot {
                            log!("Input closed, stopping");
                            break;
                        }
                    }
                }
            }
        }
    }

    summary
}

/// Returns `false` when the session should stop.
fn handle_command<S: HighScoreStore>(engine: &mut GameEngine<S>, command: RunnerCommand) -> bool {
    match command {
        RunnerCommand::Turn(direction) => {
            if !engine.request_direction(direction) {
                log!("Ignored turn {:?}", direction);
            }
        }
        RunnerCommand::TogglePause => {
            engine.toggle_pause();
        }
        RunnerCommand::Start => engine.start(),
        RunnerCommand::Quit => return false,
    }
    true
}
