use std::time::Duration;

use crate::config::{ConfigError, EngineConfig, Validate};
use crate::log;
use crate::persistence::HighScoreStore;
use crate::rng::SessionRng;
use super::game_state::{SnakeGameState, TickOutcome};
use super::palette::Palette;
use super::snapshot::{GameSnapshot, StateBroadcaster};
use super::types::{Direction, GameStatus};

/// Single-session snake engine. Every call runs to completion and, when it
/// changed something, emits a snapshot to all subscribers.
pub struct GameEngine<S: HighScoreStore> {
    config: EngineConfig,
    palette: Palette,
    state: SnakeGameState,
    high_score: u32,
    store: S,
    rng: SessionRng,
    broadcasters: Vec<Box<dyn StateBroadcaster>>,
}

impl<S: HighScoreStore> GameEngine<S> {
    pub fn new(config: EngineConfig, store: S, mut rng: SessionRng) -> Result<Self, ConfigError> {
        config.validate().map_err(ConfigError::Validation)?;

        let palette = Palette::new(config.palette.clone());
        let state = SnakeGameState::new(&config, &palette, &mut rng);
        let high_score = match store.load_high_score() {
            Ok(value) => value.unwrap_or(0),
            Err(e) => {
                log!("Failed to load high score, starting from 0: {}", e);
                0
            }
        };

        log!(
            "Engine ready: board {}x{}, high score {}, seed {}",
            config.board_size,
            config.board_size,
            high_score,
            rng.seed()
        );

        Ok(Self {
            config,
            palette,
            state,
            high_score,
            store,
            rng,
            broadcasters: Vec::new(),
        })
    }

    pub fn subscribe(&mut self, broadcaster: impl StateBroadcaster + 'static) {
        self.broadcasters.push(Box::new(broadcaster));
    }

    /// Resets the session and starts playing. Valid from any status.
    pub fn start(&mut self) {
        self.state = SnakeGameState::restart(&self.config, &self.palette, &mut self.rng);
        log!("Game started");
        self.broadcast();
    }

    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.state.update(&self.config, &self.palette, &mut self.rng);
        match outcome {
            TickOutcome::Ignored => return outcome,
            TickOutcome::AteFood => self.record_score(),
            TickOutcome::Moved | TickOutcome::GameOver(_) => {}
        }
        self.broadcast();
        outcome
    }

    /// Queues `direction` for the next tick. Returns `false` when the turn
    /// would reverse the direction applied on the last tick.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        let previous = self.state.direction;
        let accepted = self.state.set_direction(direction);
        if accepted && previous != direction {
            self.broadcast();
        }
        accepted
    }

    pub fn toggle_pause(&mut self) -> bool {
        let toggled = self.state.toggle_pause();
        if toggled {
            log!("Game {}", if self.state.status == GameStatus::Paused { "paused" } else { "resumed" });
            self.broadcast();
        }
        toggled
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board_size: self.config.board_size,
            snake: self.state.snake.segments().copied().collect(),
            colors: self
                .state
                .snake
                .colors()
                .map(|color| self.palette.name(*color).to_string())
                .collect(),
            food: self.state.food,
            direction: self.state.direction,
            status: self.state.status,
            score: self.state.score,
            high_score: self.high_score,
            speed_ms: self.state.speed_ms,
            death_reason: self.state.death_reason,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.state.speed_ms)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn record_score(&mut self) {
        if self.state.score <= self.high_score {
            return;
        }
        self.high_score = self.state.score;
        log!("New high score: {}", self.high_score);
        if let Err(e) = self.store.save_high_score(self.high_score) {
            log!("Failed to save high score {}: {}", self.high_score, e);
        }
    }

    fn broadcast(&self) {
        if self.broadcasters.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for broadcaster in &self.broadcasters {
            broadcaster.broadcast_state(&snapshot);
        }
    }
}
