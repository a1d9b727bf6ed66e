mod bot_controller;
mod engine;
mod food;
mod game_state;
mod palette;
mod snake;
mod snapshot;
mod types;

pub use bot_controller::BotController;
pub use engine::GameEngine;
pub use food::place_food;
pub use game_state::{SnakeGameState, TickOutcome};
pub use palette::{Palette, SegmentColor};
pub use snake::Snake;
pub use snapshot::{GameSnapshot, StateBroadcaster};
pub use types::{DeathReason, Direction, GameStatus, Point};
