use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::Validate;
use crate::snake::{Direction, Point};

pub const MIN_BOARD_SIZE: usize = 2;
pub const MAX_BOARD_SIZE: usize = 100;

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct EngineConfig {
    pub board_size: usize,
    /// Head first.
    pub initial_snake: Vec<Point>,
    pub initial_direction: Direction,
    pub initial_speed_ms: u64,
    pub min_speed_ms: u64,
    pub speed_decrement_ms: u64,
    pub palette: Vec<String>,
    /// Lower bound on random placement attempts; the effective budget is
    /// never below twice the cell count.
    pub food_attempts_floor: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            board_size: 20,
            initial_snake: vec![Point::new(10, 10), Point::new(10, 11)],
            initial_direction: Direction::Up,
            initial_speed_ms: 150,
            min_speed_ms: 60,
            speed_decrement_ms: 2,
            palette: ["#4ade80", "#22c55e", "#16a34a", "#15803d", "#0ea5e9", "#6366f1"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            food_attempts_floor: 0,
        }
    }
}

impl EngineConfig {
    /// Default timing and palette on a custom board.
    pub fn with_board(board_size: usize, initial_snake: Vec<Point>, initial_direction: Direction) -> Self {
        Self {
            board_size,
            initial_snake,
            initial_direction,
            ..Default::default()
        }
    }

    pub fn cell_count(&self) -> usize {
        self.board_size * self.board_size
    }

    pub fn food_attempts(&self) -> usize {
        (2 * self.cell_count()).max(self.food_attempts_floor)
    }

    pub fn next_speed_ms(&self, current_ms: u64) -> u64 {
        current_ms.saturating_sub(self.speed_decrement_ms).max(self.min_speed_ms)
    }
}

impl Validate for EngineConfig {
    fn validate(&self) -> Result<(), String> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.board_size) {
            return Err(format!(
                "board_size must be between {} and {}",
                MIN_BOARD_SIZE, MAX_BOARD_SIZE
            ));
        }
        if self.min_speed_ms == 0 {
            return Err("min_speed_ms must be greater than 0".to_string());
        }
        if self.initial_speed_ms < self.min_speed_ms {
            return Err("initial_speed_ms must not be below min_speed_ms".to_string());
        }
        if self.speed_decrement_ms == 0 {
            return Err("speed_decrement_ms must be greater than 0".to_string());
        }
        if self.palette.is_empty() {
            return Err("palette must contain at least one color".to_string());
        }
        self.validate_initial_snake()
    }
}

impl EngineConfig {
    fn validate_initial_snake(&self) -> Result<(), String> {
        let snake = &self.initial_snake;
        if snake.len() < 2 {
            return Err("initial_snake must have at least 2 segments".to_string());
        }
        if snake.len() >= self.cell_count() {
            return Err("initial_snake must leave at least one free cell".to_string());
        }
        if let Some(p) = snake.iter().find(|p| p.x >= self.board_size || p.y >= self.board_size) {
            return Err(format!("initial_snake segment ({}, {}) is off the board", p.x, p.y));
        }
        let unique: HashSet<&Point> = snake.iter().collect();
        if unique.len() != snake.len() {
            return Err("initial_snake must not contain duplicate segments".to_string());
        }
        if snake.windows(2).any(|pair| !pair[0].is_adjacent(&pair[1])) {
            return Err("initial_snake segments must be adjacent".to_string());
        }
        if Direction::between(&snake[0], &snake[1]) == Some(self.initial_direction) {
            return Err("initial_direction must not point into the second segment".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::config_content_provider::tests::get_temp_file_path;
    use crate::config::{
        ConfigContentProvider, ConfigError, ConfigManager, ConfigSerializer,
        FileContentConfigProvider, YamlConfigSerializer,
    };

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_config_can_be_serialized_and_deserialized_string() {
        let default_config = EngineConfig::default();
        let serializer = YamlConfigSerializer::new();
        let serialized = serializer.serialize(&default_config).unwrap();
        let deserialized: EngineConfig = serializer.deserialize(&serialized).unwrap();
        assert_eq!(default_config, deserialized);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let serializer = YamlConfigSerializer::new();
        let config: EngineConfig = serializer
            .deserialize("board_size: 12\ninitial_direction: left\ninitial_snake:\n  - {x: 5, y: 5}\n  - {x: 6, y: 5}\n")
            .unwrap();
        assert_eq!(config.board_size, 12);
        assert_eq!(config.initial_direction, Direction::Left);
        assert_eq!(config.initial_speed_ms, 150);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_manager_round_trip_and_cache() {
        let config = EngineConfig {
            board_size: 30,
            min_speed_ms: 40,
            ..EngineConfig::default()
        };
        let path = get_temp_file_path("engine_config");
        let manager = ConfigManager::from_yaml_file(&path);

        manager.set_config(&config).unwrap();
        assert_eq!(manager.get_config().unwrap(), config);

        let fresh: ConfigManager<_, EngineConfig> = ConfigManager::from_yaml_file(&path);
        assert_eq!(fresh.get_config().unwrap(), config);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_config_file_does_not_exist_returns_default_config() {
        let manager: ConfigManager<_, EngineConfig> =
            ConfigManager::from_yaml_file("this_file_does_not_exist.yaml");
        assert_eq!(manager.get_config().unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let path = get_temp_file_path("invalid_engine_config");
        let provider = FileContentConfigProvider::new(path.clone());
        provider.set_config_content("board_size: 1\n").unwrap();

        let manager: ConfigManager<_, EngineConfig> = ConfigManager::new(provider, YamlConfigSerializer::new());
        assert!(matches!(manager.get_config(), Err(ConfigError::Validation(_))));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_garbage_file_is_a_parse_error() {
        let path = get_temp_file_path("garbage_engine_config");
        let provider = FileContentConfigProvider::new(path.clone());
        provider.set_config_content("board_size: [oops").unwrap();

        let manager: ConfigManager<_, EngineConfig> = ConfigManager::new(provider, YamlConfigSerializer::new());
        assert!(matches!(manager.get_config(), Err(ConfigError::Deserialize(_))));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_set_config_rejects_invalid() {
        let manager: ConfigManager<_, EngineConfig> =
            ConfigManager::from_yaml_file(get_temp_file_path("rejected"));
        let config = EngineConfig {
            palette: vec![],
            ..EngineConfig::default()
        };
        assert!(matches!(manager.set_config(&config), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_initial_snake_validation() {
        let disjoint = EngineConfig::with_board(10, vec![Point::new(5, 5), Point::new(3, 5)], Direction::Right);
        assert!(disjoint.validate().is_err());

        let off_board = EngineConfig::with_board(10, vec![Point::new(10, 5), Point::new(9, 5)], Direction::Right);
        assert!(off_board.validate().is_err());

        let into_neck = EngineConfig::with_board(10, vec![Point::new(5, 5), Point::new(4, 5)], Direction::Left);
        assert!(into_neck.validate().is_err());

        let single = EngineConfig::with_board(10, vec![Point::new(5, 5)], Direction::Left);
        assert!(single.validate().is_err());

        let ok = EngineConfig::with_board(10, vec![Point::new(5, 5), Point::new(4, 5)], Direction::Right);
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_speed_curve_clamps_at_floor() {
        let config = EngineConfig {
            initial_speed_ms: 65,
            min_speed_ms: 60,
            speed_decrement_ms: 2,
            ..EngineConfig::default()
        };
        assert_eq!(config.next_speed_ms(65), 63);
        assert_eq!(config.next_speed_ms(61), 60);
        assert_eq!(config.next_speed_ms(60), 60);
    }

    #[test]
    fn test_food_attempts_budget() {
        let config = EngineConfig::with_board(10, vec![Point::new(5, 5), Point::new(4, 5)], Direction::Right);
        assert_eq!(config.food_attempts(), 200);
        let generous = EngineConfig {
            food_attempts_floor: 1000,
            ..config
        };
        assert_eq!(generous.food_attempts(), 1000);
    }
}
