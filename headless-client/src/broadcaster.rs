use snake_common::engine::{GameBroadcaster, GameSnapshot, GameStatus};
use snake_common::log;

/// Reports engine progress as log lines.
pub struct ConsoleBroadcaster {
    verbose: bool,
}

impl ConsoleBroadcaster {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl GameBroadcaster for ConsoleBroadcaster {
    fn broadcast_state(&self, snapshot: &GameSnapshot) {
        if !self.verbose {
            return;
        }
        let head = snapshot.snake[0];
        log!(
            "head ({}, {}) {:?}, length {}, speed {:.1}",
            head.x,
            head.y,
            snapshot.direction,
            snapshot.snake.len(),
            snapshot.speed
        );
    }

    fn broadcast_game_over(&self, snapshot: &GameSnapshot) {
        let verdict = match snapshot.status {
            GameStatus::Win => "Board filled, you win",
            _ => "Game over",
        };
        let record = if snapshot.new_high_score {
            " (new high score)"
        } else {
            ""
        };
        log!(
            "{}! Score {}{}, high score {}\n{}",
            verdict,
            snapshot.score,
            record,
            snapshot.high_score,
            render_board(snapshot)
        );
    }
}

/// Text picture of the board: `@` head, `o` body, `*` food, `.` empty.
pub fn render_board(snapshot: &GameSnapshot) -> String {
    let mut rows = vec![vec!['.'; snapshot.board_width]; snapshot.board_height];
    if let Some(food) = snapshot.food {
        rows[food.y][food.x] = '*';
    }
    for segment in snapshot.snake.iter().skip(1) {
        rows[segment.y][segment.x] = 'o';
    }
    if let Some(head) = snapshot.snake.first() {
        rows[head.y][head.x] = '@';
    }
    rows.into_iter()
        .map(|row| row.into_iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
