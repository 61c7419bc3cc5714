use std::time::Duration;

use crate::config::{ConfigError, Validate};
use crate::identifiers::ComponentId;
use crate::{log, log_error};

use super::board::Board;
use super::error::EngineError;
use super::food::place_food;
use super::rules::{check_game_over, check_win};
use super::session_rng::SessionRng;
use super::settings::EngineSettings;
use super::snake::Snake;
use super::snapshot::GameSnapshot;
use super::throttle::{SkipReason, Throttle};
use super::types::{Coord, Direction, GameStatus, Key};

pub const INITIAL_SPEED: f64 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdvanceReport {
    pub head: Coord,
    pub ate_food: bool,
    pub status: GameStatus,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Skipped(SkipReason),
    Advanced(AdvanceReport),
}

/// Single-player snake simulation on a wraparound board.
///
/// The host owns the engine, feeds it decoded keys and calls `tick` from its frame
/// scheduler. Every mutation completes inside one `&mut self` call, so reads between
/// calls always see a whole step.
pub struct SnakeGame {
    settings: EngineSettings,
    board: Board,
    rng: SessionRng,
    snake: Snake,
    previous_snake: Vec<Coord>,
    food: Option<Coord>,
    speed: f64,
    status: GameStatus,
    is_playing: bool,
    throttle: Throttle,
    high_score: u32,
    new_high_score: bool,
    required_components: Vec<ComponentId>,
    initialized: Vec<ComponentId>,
}

impl SnakeGame {
    pub fn new(
        settings: EngineSettings,
        high_score: u32,
        mut rng: SessionRng,
    ) -> Result<Self, ConfigError> {
        settings.validate().map_err(ConfigError::Validation)?;

        let board = settings.board();
        let snake = Snake::new(rng.random_coord(&board), rng.random_direction());
        let food = place_food(&snake, &board, &mut rng);
        let throttle = Throttle::new(settings.base_interval(), settings.render_floor());
        let required_components = settings.required_component_ids();

        Ok(Self {
            settings,
            board,
            rng,
            snake,
            previous_snake: Vec::new(),
            food,
            speed: INITIAL_SPEED,
            status: GameStatus::NotStarted,
            is_playing: false,
            throttle,
            high_score,
            new_high_score: false,
            required_components,
            initialized: Vec::new(),
        })
    }

    /// Marks a host subsystem as ready. Repeated calls are ignored.
    pub fn init(&mut self, id: impl Into<ComponentId>) {
        let id = id.into();
        if self.initialized.contains(&id) {
            return;
        }
        log!("Component '{}' is ready", id);
        self.initialized.push(id);
    }

    pub fn missing_components(&self) -> Vec<ComponentId> {
        self.required_components
            .iter()
            .filter(|id| !self.initialized.contains(id))
            .cloned()
            .collect()
    }

    pub fn all_initialized(&self) -> bool {
        self.required_components
            .iter()
            .all(|id| self.initialized.contains(id))
    }

    pub fn start(&mut self) -> Result<(), EngineError> {
        self.ensure_initialized("start")?;

        if self.status.is_terminal() {
            let error = EngineError::GameFinished(self.status);
            log_error!("Can't start now: {}", error);
            return Err(error);
        }

        self.status = GameStatus::Ongoing;
        self.is_playing = true;
        Ok(())
    }

    pub fn pause(&mut self) -> Result<(), EngineError> {
        self.ensure_initialized("pause")?;
        self.is_playing = false;
        Ok(())
    }

    /// Starts a fresh run from any status. The finished run's score is folded into
    /// the high score first.
    pub fn reset(&mut self) -> Result<(), EngineError> {
        self.ensure_initialized("reset")?;

        self.high_score = self.high_score.max(self.score());
        self.snake = Snake::new(
            self.rng.random_coord(&self.board),
            self.rng.random_direction(),
        );
        self.previous_snake.clear();
        self.food = place_food(&self.snake, &self.board, &mut self.rng);
        self.speed = INITIAL_SPEED;
        self.status = GameStatus::NotStarted;
        self.is_playing = false;
        self.new_high_score = false;
        self.throttle.reset();

        log!("Game reset, high score {}", self.high_score);
        Ok(())
    }

    /// Queues a raw key. Translation and the reversal check happen in `advance`.
    pub fn enqueue_direction(&mut self, key: Key) {
        self.snake.enqueue_key(key);
    }

    /// Advances at most once, when playing and a frame interval has elapsed since
    /// the last advance.
    pub fn tick(&mut self, now: Duration) -> TickOutcome {
        if !self.is_playing {
            return TickOutcome::Skipped(SkipReason::NotPlaying);
        }

        if let Err(reason) = self.throttle.poll(now, self.speed) {
            return TickOutcome::Skipped(reason);
        }

        match self.advance() {
            Some(report) => TickOutcome::Advanced(report),
            None => TickOutcome::Skipped(SkipReason::NotPlaying),
        }
    }

    /// Moves the snake one cell. Returns `None` unless the game is playing, which also
    /// covers a finished game and one whose components never reported ready.
    pub(crate) fn advance(&mut self) -> Option<AdvanceReport> {
        if !self.is_playing || self.status.is_terminal() {
            return None;
        }

        self.previous_snake = self.snake.body().iter().copied().collect();
        let head = self.snake.step(&self.board);

        let ate_food = self.food == Some(head);
        if ate_food {
            self.speed += self.settings.speed_increment;
            self.food = place_food(&self.snake, &self.board, &mut self.rng);
            log!(
                "Ate food at ({}, {}). Score: {}, speed: {:.1}",
                head.x,
                head.y,
                self.score(),
                self.speed
            );
        } else {
            self.snake.drop_tail();
        }

        // A board filled by the final move necessarily touches the body, so win goes first.
        if check_win(&self.snake, &self.board) {
            self.finish(GameStatus::Win);
        } else if check_game_over(&self.snake) {
            self.finish(GameStatus::Over);
        }

        Some(AdvanceReport {
            head,
            ate_food,
            status: self.status,
        })
    }

    fn finish(&mut self, status: GameStatus) {
        self.status = status;
        self.is_playing = false;

        let score = self.score();
        if score > self.high_score {
            self.high_score = score;
            self.new_high_score = true;
        }
        log!(
            "Game finished: {:?}. Score: {}, high score: {}",
            status,
            score,
            self.high_score
        );
    }

    fn ensure_initialized(&self, operation: &str) -> Result<(), EngineError> {
        let missing = self.missing_components();
        if missing.is_empty() {
            return Ok(());
        }
        let error = EngineError::NotInitialized { missing };
        log_error!("Can't {} now: {}", operation, error);
        Err(error)
    }

    pub fn board(&self) -> Board {
        self.board
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn previous_snake(&self) -> &[Coord] {
        &self.previous_snake
    }

    pub fn food(&self) -> Option<Coord> {
        self.food
    }

    pub fn direction(&self) -> Direction {
        self.snake.direction()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn frame_interval(&self) -> Duration {
        self.throttle.frame_interval(self.speed)
    }

    pub fn execution_time(&self) -> Duration {
        self.throttle.execution_time()
    }

    pub fn score(&self) -> u32 {
        (self.snake.len() - 1) as u32
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn is_new_high_score(&self) -> bool {
        self.new_high_score
    }

    pub fn initialized(&self) -> &[ComponentId] {
        &self.initialized
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board_width: self.board.width,
            board_height: self.board.height,
            snake: self.snake.body().iter().copied().collect(),
            previous_snake: self.previous_snake.clone(),
            food: self.food,
            direction: self.direction(),
            status: self.status,
            is_playing: self.is_playing,
            speed: self.speed,
            frame_interval: self.frame_interval(),
            execution_time: self.execution_time(),
            score: self.score(),
            high_score: self.high_score,
            new_high_score: self.new_high_score,
        }
    }

    #[cfg(test)]
    pub(crate) fn set_snake(&mut self, body: Vec<Coord>, direction: Direction) {
        self.snake = Snake::from_body(body, direction);
        self.food = place_food(&self.snake, &self.board, &mut self.rng);
    }

    #[cfg(test)]
    pub(crate) fn set_food(&mut self, food: Option<Coord>) {
        self.food = food;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPONENTS: [&str; 3] = ["snake", "rat", "canvas"];

    fn create_game(width: usize, height: usize) -> SnakeGame {
        let settings = EngineSettings {
            board_width: width,
            board_height: height,
            ..EngineSettings::default()
        };
        let mut game = SnakeGame::new(settings, 0, SessionRng::new(42)).unwrap();
        for id in COMPONENTS {
            game.init(id);
        }
        game
    }

    fn started_game(width: usize, height: usize) -> SnakeGame {
        let mut game = create_game(width, height);
        game.start().unwrap();
        game
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_new_game_is_not_started() {
        let game = create_game(15, 15);
        assert_eq!(game.status(), GameStatus::NotStarted);
        assert!(!game.is_playing());
        assert_eq!(game.snake().len(), 1);
        assert_eq!(game.speed(), INITIAL_SPEED);
        assert_eq!(game.frame_interval(), ms(400));
        let food = game.food().unwrap();
        assert!(!game.snake().contains(food));
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let settings = EngineSettings {
            board_width: 0,
            ..EngineSettings::default()
        };
        assert!(matches!(
            SnakeGame::new(settings, 0, SessionRng::new(1)),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_lifecycle_requires_all_components() {
        let settings = EngineSettings::default();
        let mut game = SnakeGame::new(settings, 0, SessionRng::new(42)).unwrap();
        game.init("snake");
        game.init("snake");

        let error = game.start().unwrap_err();
        assert_eq!(
            error,
            EngineError::NotInitialized {
                missing: vec![ComponentId::from("rat"), ComponentId::from("canvas")],
            }
        );
        assert!(game.pause().is_err());
        assert!(game.reset().is_err());
        assert_eq!(game.status(), GameStatus::NotStarted);
        assert_eq!(game.tick(ms(1000)), TickOutcome::Skipped(SkipReason::NotPlaying));
        assert_eq!(game.initialized().len(), 1);

        game.init("rat");
        game.init("canvas");
        assert!(game.all_initialized());
        assert!(game.start().is_ok());
        assert_eq!(game.status(), GameStatus::Ongoing);
    }

    #[test]
    fn test_reverse_direction_rejected_for_every_direction() {
        for direction in Direction::ALL {
            let mut game = started_game(15, 15);
            game.set_snake(vec![Coord::new(7, 7)], direction);
            let expected = game.board().wrap(Coord::new(7, 7), direction, 1);

            game.enqueue_direction(match direction.opposite() {
                Direction::Up => Key::ArrowUp,
                Direction::Left => Key::ArrowLeft,
                Direction::Down => Key::ArrowDown,
                Direction::Right => Key::ArrowRight,
            });
            let report = game.advance().unwrap();

            assert_eq!(report.head, expected);
            assert_eq!(game.direction(), direction);
            assert_eq!(game.snake().queued_turns(), 0);
        }
    }

    #[test]
    fn test_moving_up_from_top_row_wraps_to_bottom() {
        let mut game = started_game(15, 10);
        game.set_snake(vec![Coord::new(3, 0)], Direction::Up);
        assert_eq!(game.advance().unwrap().head, Coord::new(3, 9));
    }

    #[test]
    fn test_eating_grows_and_speeds_up() {
        let mut game = started_game(15, 15);
        game.set_snake(vec![Coord::new(5, 5), Coord::new(4, 5)], Direction::Right);
        game.set_food(Some(Coord::new(6, 5)));
        let length_before = game.snake().len();
        let speed_before = game.speed();

        let report = game.advance().unwrap();

        assert!(report.ate_food);
        assert_eq!(game.snake().len(), length_before + 1);
        assert!((game.speed() - (speed_before + 0.1)).abs() < 1e-9);
        assert_eq!(game.frame_interval(), ms(400).div_f64(game.speed()));
        assert_eq!(game.score(), 2);
        let food = game.food().unwrap();
        assert!(!game.snake().contains(food));
    }

    #[test]
    fn test_moving_without_food_keeps_length() {
        let mut game = started_game(15, 15);
        game.set_snake(
            vec![Coord::new(5, 5), Coord::new(4, 5), Coord::new(3, 5)],
            Direction::Right,
        );
        game.set_food(Some(Coord::new(0, 0)));

        let report = game.advance().unwrap();

        assert!(!report.ate_food);
        assert_eq!(game.snake().len(), 3);
        assert_eq!(game.speed(), INITIAL_SPEED);
        assert_eq!(
            game.previous_snake(),
            &[Coord::new(5, 5), Coord::new(4, 5), Coord::new(3, 5)]
        );
    }

    #[test]
    fn test_food_never_on_snake_during_play() {
        let mut game = started_game(5, 5);
        let mut rng = SessionRng::new(7);
        let keys = [Key::ArrowUp, Key::ArrowLeft, Key::ArrowDown, Key::ArrowRight];

        for _ in 0..3000 {
            if game.status().is_terminal() {
                game.reset().unwrap();
                game.start().unwrap();
            }
            game.enqueue_direction(keys[rng.random_range(0..keys.len())]);
            game.advance().unwrap();

            assert!(game.snake().body().iter().all(|c| game.board().contains(*c)));
            match game.food() {
                Some(food) => assert!(!game.snake().contains(food)),
                None => assert_eq!(game.status(), GameStatus::Win),
            }
        }
    }

    #[test]
    fn test_filling_board_is_win_not_over() {
        let mut game = started_game(2, 2);
        game.set_snake(
            vec![Coord::new(1, 0), Coord::new(0, 0), Coord::new(0, 1)],
            Direction::Down,
        );
        assert_eq!(game.food(), Some(Coord::new(1, 1)));

        let report = game.advance().unwrap();

        assert_eq!(report.status, GameStatus::Win);
        assert_eq!(game.status(), GameStatus::Win);
        assert!(!game.is_playing());
        assert_eq!(game.food(), None);
        assert_eq!(game.high_score(), 3);
        assert!(game.advance().is_none());
    }

    #[test]
    fn test_win_takes_precedence_over_collision() {
        let mut game = started_game(2, 2);
        game.set_snake(
            vec![Coord::new(1, 0), Coord::new(0, 0), Coord::new(1, 1)],
            Direction::Down,
        );
        game.set_food(Some(Coord::new(1, 1)));

        game.advance().unwrap();

        assert!(check_game_over(game.snake()));
        assert_eq!(game.status(), GameStatus::Win);
    }

    #[test]
    fn test_head_revisiting_body_is_game_over() {
        let mut game = started_game(15, 15);
        game.set_snake(
            vec![Coord::new(6, 5), Coord::new(5, 5), Coord::new(5, 6)],
            Direction::Left,
        );

        let report = game.advance().unwrap();

        assert_eq!(
            game.snake().body().iter().copied().collect::<Vec<_>>(),
            vec![Coord::new(5, 5), Coord::new(6, 5), Coord::new(5, 5)]
        );
        assert_eq!(report.status, GameStatus::Over);
        assert_eq!(game.status(), GameStatus::Over);
        assert!(!game.is_playing());
        assert_eq!(game.tick(ms(10_000)), TickOutcome::Skipped(SkipReason::NotPlaying));
    }

    #[test]
    fn test_ticks_closer_than_frame_interval_change_nothing() {
        let mut game = started_game(15, 15);
        assert!(matches!(game.tick(ms(1000)), TickOutcome::Advanced(_)));
        assert!(matches!(game.tick(ms(1400)), TickOutcome::Advanced(_)));
        let before = game.snapshot();

        assert_eq!(
            game.tick(ms(1405)),
            TickOutcome::Skipped(SkipReason::BelowRenderFloor)
        );
        assert_eq!(
            game.tick(ms(1500)),
            TickOutcome::Skipped(SkipReason::BelowFrameInterval)
        );
        assert_eq!(game.snapshot(), before);
        assert_eq!(game.execution_time(), ms(400));
    }

    #[test]
    fn test_pause_makes_tick_a_no_op() {
        let mut game = started_game(15, 15);
        game.tick(ms(0));
        game.pause().unwrap();
        let before = game.snapshot();

        assert_eq!(game.tick(ms(5000)), TickOutcome::Skipped(SkipReason::NotPlaying));
        assert_eq!(game.snapshot(), before);
        assert_eq!(game.status(), GameStatus::Ongoing);

        game.start().unwrap();
        assert!(matches!(game.tick(ms(5000)), TickOutcome::Advanced(_)));
    }

    #[test]
    fn test_burst_input_spreads_over_ticks() {
        let mut game = started_game(15, 15);
        game.set_snake(vec![Coord::new(5, 5)], Direction::Right);
        game.set_food(Some(Coord::new(0, 14)));
        game.enqueue_direction(Key::ArrowUp);
        game.enqueue_direction(Key::ArrowLeft);
        game.enqueue_direction(Key::ArrowDown);

        assert_eq!(game.advance().unwrap().head, Coord::new(6, 5));
        assert_eq!(game.snake().pending_keys(), 1);
        assert_eq!(game.advance().unwrap().head, Coord::new(6, 4));
        assert_eq!(game.advance().unwrap().head, Coord::new(5, 4));
        assert_eq!(game.advance().unwrap().head, Coord::new(5, 5));
        assert_eq!(game.direction(), Direction::Down);
    }

    #[test]
    fn test_reset_after_game_over() {
        let mut game = started_game(15, 15);
        game.set_snake(
            vec![
                Coord::new(6, 5),
                Coord::new(5, 5),
                Coord::new(5, 6),
                Coord::new(4, 6),
                Coord::new(3, 6),
            ],
            Direction::Left,
        );
        game.advance().unwrap();
        assert_eq!(game.status(), GameStatus::Over);
        assert!(game.is_new_high_score());
        let final_score = game.score();

        game.reset().unwrap();

        assert_eq!(game.status(), GameStatus::NotStarted);
        assert!(!game.status().is_terminal());
        assert_eq!(game.snake().len(), 1);
        assert_eq!(game.speed(), INITIAL_SPEED);
        assert!(game.high_score() >= final_score);
        assert!(!game.is_new_high_score());
        assert!(game.previous_snake().is_empty());
        assert_eq!(game.execution_time(), Duration::ZERO);
        assert!(game.start().is_ok());
    }

    #[test]
    fn test_reset_folds_running_score_into_high_score() {
        let mut game = started_game(15, 15);
        game.set_snake(
            vec![Coord::new(5, 5), Coord::new(4, 5), Coord::new(3, 5)],
            Direction::Right,
        );
        game.reset().unwrap();
        assert_eq!(game.high_score(), 2);
    }

    #[test]
    fn test_lower_score_keeps_high_score() {
        let settings = EngineSettings::default();
        let mut game = SnakeGame::new(settings, 10, SessionRng::new(42)).unwrap();
        for id in COMPONENTS {
            game.init(id);
        }
        game.start().unwrap();
        game.set_snake(
            vec![Coord::new(6, 5), Coord::new(5, 5), Coord::new(5, 6)],
            Direction::Left,
        );
        game.advance().unwrap();

        assert_eq!(game.status(), GameStatus::Over);
        assert_eq!(game.high_score(), 10);
        assert!(!game.is_new_high_score());
    }

    #[test]
    fn test_uninitialized_game_does_not_advance() {
        let settings = EngineSettings::default();
        let mut game = SnakeGame::new(settings, 0, SessionRng::new(42)).unwrap();
        assert!(game.start().is_err());
        game.set_snake(
            vec![Coord::new(6, 5), Coord::new(5, 5), Coord::new(5, 6)],
            Direction::Left,
        );
        let before = game.snapshot();

        assert!(game.advance().is_none());
        assert_eq!(game.tick(ms(1000)), TickOutcome::Skipped(SkipReason::NotPlaying));
        assert_eq!(game.snapshot(), before);
        assert_eq!(game.status(), GameStatus::NotStarted);
    }

    #[test]
    fn test_paused_game_does_not_advance() {
        let mut game = started_game(15, 15);
        game.set_snake(
            vec![Coord::new(6, 5), Coord::new(5, 5), Coord::new(5, 6)],
            Direction::Left,
        );
        game.pause().unwrap();
        let before = game.snapshot();

        assert!(game.advance().is_none());
        assert_eq!(game.snapshot(), before);
        assert_eq!(game.status(), GameStatus::Ongoing);
    }

    #[test]
    fn test_not_started_game_does_not_advance() {
        let mut game = create_game(15, 15);
        let before = game.snapshot();

        assert!(game.advance().is_none());
        assert_eq!(game.snapshot(), before);
    }

    #[test]
    fn test_reset_after_win() {
        let mut game = started_game(2, 2);
        game.set_snake(
            vec![Coord::new(1, 0), Coord::new(0, 0), Coord::new(0, 1)],
            Direction::Down,
        );
        game.advance().unwrap();
        assert_eq!(game.status(), GameStatus::Win);
        assert_eq!(game.food(), None);

        game.reset().unwrap();

        assert_eq!(game.status(), GameStatus::NotStarted);
        assert_eq!(game.snake().len(), 1);
        let food = game.food().unwrap();
        assert!(!game.snake().contains(food));
        assert_eq!(game.speed(), INITIAL_SPEED);
        assert!(game.high_score() >= 3);
        assert!(game.start().is_ok());
        assert!(game.is_playing());
    }

    #[test]
    fn test_start_after_finish_requires_reset() {
        let mut game = started_game(15, 15);
        game.set_snake(
            vec![Coord::new(6, 5), Coord::new(5, 5), Coord::new(5, 6)],
            Direction::Left,
        );
        game.advance().unwrap();

        assert_eq!(
            game.start(),
            Err(EngineError::GameFinished(GameStatus::Over))
        );
        assert!(!game.is_playing());
    }

    #[test]
    fn test_three_by_three_example_run() {
        let mut game = started_game(3, 3);
        game.set_snake(vec![Coord::new(1, 1)], Direction::Right);
        game.set_food(Some(Coord::new(2, 1)));

        let report = game.advance().unwrap();

        assert_eq!(report.head, Coord::new(2, 1));
        assert!(report.ate_food);
        assert_eq!(game.snake().len(), 2);
        assert!((game.speed() - 1.1).abs() < 1e-9);
        let food = game.food().unwrap();
        assert!(game.board().contains(food));
        assert_ne!(food, Coord::new(1, 1));
        assert_ne!(food, Coord::new(2, 1));
    }
}
