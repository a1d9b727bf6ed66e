pub mod config;
pub mod logger;
pub mod persistence;
pub mod rng;
pub mod snake;

pub use config::EngineConfig;
pub use persistence::{HighScoreStore, PersistenceError};
pub use rng::SessionRng;
pub use snake::{
    DeathReason, Direction, GameEngine, GameSnapshot, GameStatus, Point, SegmentColor,
    StateBroadcaster, TickOutcome,
};
