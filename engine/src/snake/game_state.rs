use crate::config::EngineConfig;
use crate::log;
use crate::rng::SessionRng;
use super::food::place_food;
use super::palette::Palette;
use super::snake::Snake;
use super::types::{DeathReason, Direction, GameStatus, Point};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing; nothing changed.
    Ignored,
    Moved,
    AteFood,
    GameOver(DeathReason),
}

#[derive(Clone, Debug)]
pub struct SnakeGameState {
    pub snake: Snake,
    pub food: Option<Point>,
    /// Direction the next tick will move in.
    pub direction: Direction,
    /// Direction the most recent tick actually moved in; anchors the 180° guard.
    pub last_applied_direction: Direction,
    pub status: GameStatus,
    pub score: u32,
    pub speed_ms: u64,
    pub death_reason: Option<DeathReason>,
}

impl SnakeGameState {
    pub fn new(config: &EngineConfig, palette: &Palette, rng: &mut SessionRng) -> Self {
        let snake = Snake::new(&config.initial_snake, palette);
        let food = place_food(snake.occupied(), config.board_size, config.food_attempts(), rng);

        Self {
            snake,
            food,
            direction: config.initial_direction,
            last_applied_direction: config.initial_direction,
            status: GameStatus::Idle,
            score: 0,
            speed_ms: config.initial_speed_ms,
            death_reason: None,
        }
    }

    /// Fresh session in `Playing`.
    pub fn restart(config: &EngineConfig, palette: &Palette, rng: &mut SessionRng) -> Self {
        Self {
            status: GameStatus::Playing,
            ..Self::new(config, palette, rng)
        }
    }

    /// Returns `false` when `direction` would reverse onto the last applied
    /// direction, or when the game is over.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if self.status == GameStatus::GameOver || direction.is_opposite(&self.last_applied_direction) {
            return false;
        }
        self.direction = direction;
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.status = match self.status {
            GameStatus::Playing => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Playing,
            GameStatus::Idle | GameStatus::GameOver => return false,
        };
        true
    }

    pub fn update(&mut self, config: &EngineConfig, palette: &Palette, rng: &mut SessionRng) -> TickOutcome {
        if self.status != GameStatus::Playing {
            return TickOutcome::Ignored;
        }

        let next_head = match self.calculate_next_head(config.board_size) {
            Ok(point) => point,
            Err(reason) => {
                self.status = GameStatus::GameOver;
                self.death_reason = Some(reason);
                log!(
                    "Game over: {:?} at ({}, {}) moving {:?}. Score: {}",
                    reason,
                    self.snake.head().x,
                    self.snake.head().y,
                    self.direction,
                    self.score
                );
                return TickOutcome::GameOver(reason);
            }
        };

        let food_was_absent = self.food.is_none();
        let ate_food = self.food == Some(next_head);
        self.snake.advance(next_head, ate_food, palette);
        self.last_applied_direction = self.direction;

        if ate_food {
            self.score += 1;
            self.speed_ms = config.next_speed_ms(self.speed_ms);
            self.spawn_food(config, rng);
            log!(
                "Ate food at ({}, {}). Score: {}, speed: {}ms",
                next_head.x,
                next_head.y,
                self.score,
                self.speed_ms
            );
            return TickOutcome::AteFood;
        }

        if food_was_absent {
            self.spawn_food(config, rng);
        }

        TickOutcome::Moved
    }

    fn calculate_next_head(&self, board_size: usize) -> Result<Point, DeathReason> {
        let next_head = self
            .snake
            .head()
            .step(self.direction, board_size)
            .ok_or(DeathReason::WallCollision)?;

        if self.snake.contains(&next_head) {
            return Err(DeathReason::SelfCollision);
        }

        Ok(next_head)
    }

    fn spawn_food(&mut self, config: &EngineConfig, rng: &mut SessionRng) {
        self.food = place_food(self.snake.occupied(), config.board_size, config.food_attempts(), rng);
        match self.food {
            Some(pos) => log!("Food spawned at ({}, {})", pos.x, pos.y),
            None => log!("No free cell found for food; continuing without a target"),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_snake(
        config: &EngineConfig,
        palette: &Palette,
        segments: &[Point],
        direction: Direction,
        food: Option<Point>,
    ) -> Self {
        let mut rng = SessionRng::new(0);
        Self {
            snake: Snake::new(segments, palette),
            food,
            direction,
            last_applied_direction: direction,
            ..Self::restart(config, palette, &mut rng)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(board_size: usize) -> EngineConfig {
        EngineConfig::with_board(board_size, vec![Point::new(1, 0), Point::new(0, 0)], Direction::Right)
    }

    fn palette(config: &EngineConfig) -> Palette {
        Palette::new(config.palette.clone())
    }

    fn body(state: &SnakeGameState) -> Vec<Point> {
        state.snake.segments().copied().collect()
    }

    #[test]
    fn test_new_state_is_idle_with_food_off_snake() {
        let config = EngineConfig::default();
        let palette = palette(&config);
        let state = SnakeGameState::new(&config, &palette, &mut SessionRng::new(3));

        assert_eq!(state.status, GameStatus::Idle);
        assert_eq!(state.score, 0);
        assert_eq!(state.speed_ms, config.initial_speed_ms);
        let food = state.food.unwrap();
        assert!(!state.snake.contains(&food));
    }

    #[test]
    fn test_update_ignored_when_not_playing() {
        let config = EngineConfig::default();
        let palette = palette(&config);
        let mut rng = SessionRng::new(3);
        let mut state = SnakeGameState::new(&config, &palette, &mut rng);
        let before = body(&state);

        assert_eq!(state.update(&config, &palette, &mut rng), TickOutcome::Ignored);
        assert_eq!(body(&state), before);

        state.status = GameStatus::Paused;
        assert_eq!(state.update(&config, &palette, &mut rng), TickOutcome::Ignored);
        assert_eq!(body(&state), before);
    }

    #[test]
    fn test_eating_food_grows_scores_and_speeds_up() {
        let config = config(10);
        let palette = palette(&config);
        let mut rng = SessionRng::new(11);
        let mut state = SnakeGameState::with_snake(
            &config,
            &palette,
            &[Point::new(5, 5), Point::new(4, 5)],
            Direction::Right,
            Some(Point::new(6, 5)),
        );

        let outcome = state.update(&config, &palette, &mut rng);

        assert_eq!(outcome, TickOutcome::AteFood);
        assert_eq!(body(&state), vec![Point::new(6, 5), Point::new(5, 5), Point::new(4, 5)]);
        assert_eq!(state.score, 1);
        assert_eq!(state.speed_ms, config.initial_speed_ms - config.speed_decrement_ms);
        let food = state.food.unwrap();
        assert!(!state.snake.contains(&food));
        assert_eq!(state.snake.colors().count(), 3);
    }

    #[test]
    fn test_wall_collision_leaves_snake_untouched() {
        let config = config(10);
        let palette = palette(&config);
        let mut rng = SessionRng::new(11);
        let mut state = SnakeGameState::with_snake(
            &config,
            &palette,
            &[Point::new(0, 5), Point::new(1, 5)],
            Direction::Left,
            Some(Point::new(8, 8)),
        );

        let outcome = state.update(&config, &palette, &mut rng);

        assert_eq!(outcome, TickOutcome::GameOver(DeathReason::WallCollision));
        assert_eq!(state.status, GameStatus::GameOver);
        assert_eq!(state.death_reason, Some(DeathReason::WallCollision));
        assert_eq!(body(&state), vec![Point::new(0, 5), Point::new(1, 5)]);
    }

    #[test]
    fn test_self_collision_into_body() {
        let config = config(10);
        let palette = palette(&config);
        let mut rng = SessionRng::new(11);
        let mut state = SnakeGameState::with_snake(
            &config,
            &palette,
            &[Point::new(5, 5), Point::new(5, 4), Point::new(5, 3)],
            Direction::Up,
            Some(Point::new(8, 8)),
        );

        let outcome = state.update(&config, &palette, &mut rng);

        assert_eq!(outcome, TickOutcome::GameOver(DeathReason::SelfCollision));
        assert_eq!(body(&state), vec![Point::new(5, 5), Point::new(5, 4), Point::new(5, 3)]);
    }

    #[test]
    fn test_moving_into_tail_cell_is_fatal() {
        // 2x2 loop: head (0,0) -> (1,0) -> (1,1) -> tail (0,1); moving Down hits the tail.
        let config = config(5);
        let palette = palette(&config);
        let mut rng = SessionRng::new(11);
        let mut state = SnakeGameState::with_snake(
            &config,
            &palette,
            &[Point::new(0, 0), Point::new(1, 0), Point::new(1, 1), Point::new(0, 1)],
            Direction::Down,
            Some(Point::new(4, 4)),
        );

        let outcome = state.update(&config, &palette, &mut rng);

        assert_eq!(outcome, TickOutcome::GameOver(DeathReason::SelfCollision));
    }

    #[test]
    fn test_plain_move_keeps_length() {
        let config = config(10);
        let palette = palette(&config);
        let mut rng = SessionRng::new(11);
        let mut state = SnakeGameState::with_snake(
            &config,
            &palette,
            &[Point::new(5, 5), Point::new(4, 5), Point::new(3, 5)],
            Direction::Right,
            Some(Point::new(0, 9)),
        );

        assert_eq!(state.update(&config, &palette, &mut rng), TickOutcome::Moved);
        assert_eq!(body(&state), vec![Point::new(6, 5), Point::new(5, 5), Point::new(4, 5)]);
        assert_eq!(state.score, 0);
        assert_eq!(state.speed_ms, config.initial_speed_ms);
        assert_eq!(state.food, Some(Point::new(0, 9)));
    }

    #[test]
    fn test_direction_guard_uses_last_applied_direction() {
        let config = config(10);
        let palette = palette(&config);
        let mut rng = SessionRng::new(11);
        let mut state = SnakeGameState::with_snake(
            &config,
            &palette,
            &[Point::new(5, 5), Point::new(4, 5)],
            Direction::Right,
            Some(Point::new(0, 9)),
        );

        assert!(state.set_direction(Direction::Up));
        assert!(!state.set_direction(Direction::Left));
        assert!(state.set_direction(Direction::Down));
        assert_eq!(state.direction, Direction::Down);

        state.update(&config, &palette, &mut rng);
        assert_eq!(state.last_applied_direction, Direction::Down);
        assert!(!state.set_direction(Direction::Up));
        assert!(state.set_direction(Direction::Left));
    }

    #[test]
    fn test_absent_food_is_respawned_on_next_move() {
        let config = config(10);
        let palette = palette(&config);
        let mut rng = SessionRng::new(11);
        let mut state = SnakeGameState::with_snake(
            &config,
            &palette,
            &[Point::new(5, 5), Point::new(4, 5)],
            Direction::Right,
            None,
        );

        assert_eq!(state.update(&config, &palette, &mut rng), TickOutcome::Moved);
        let food = state.food.unwrap();
        assert!(!state.snake.contains(&food));
    }

    #[test]
    fn test_filling_the_board_leaves_food_absent() {
        // 2x2 board, snake of 3 eats the last free cell.
        let config = EngineConfig::with_board(2, vec![Point::new(0, 0), Point::new(1, 0)], Direction::Down);
        let palette = palette(&config);
        let mut rng = SessionRng::new(11);
        let mut state = SnakeGameState::with_snake(
            &config,
            &palette,
            &[Point::new(0, 1), Point::new(0, 0), Point::new(1, 0)],
            Direction::Right,
            Some(Point::new(1, 1)),
        );

        assert_eq!(state.update(&config, &palette, &mut rng), TickOutcome::AteFood);
        assert_eq!(state.snake.len(), 4);
        assert_eq!(state.food, None);
        assert_eq!(state.status, GameStatus::Playing);

        state.direction = Direction::Up;
        assert_eq!(
            state.update(&config, &palette, &mut rng),
            TickOutcome::GameOver(DeathReason::SelfCollision)
        );
    }

    #[test]
    fn test_toggle_pause_only_while_running() {
        let config = EngineConfig::default();
        let palette = palette(&config);
        let mut rng = SessionRng::new(3);
        let mut state = SnakeGameState::new(&config, &palette, &mut rng);

        assert!(!state.toggle_pause());
        assert_eq!(state.status, GameStatus::Idle);

        state.status = GameStatus::Playing;
        assert!(state.toggle_pause());
        assert_eq!(state.status, GameStatus::Paused);
        assert!(state.toggle_pause());
        assert_eq!(state.status, GameStatus::Playing);

        state.status = GameStatus::GameOver;
        assert!(!state.toggle_pause());
    }
}
