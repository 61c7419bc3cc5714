use super::board::Board;
use super::snake::Snake;

/// The snake covers every cell of the board.
pub fn check_win(snake: &Snake, board: &Board) -> bool {
    snake.len() == board.cell_count()
}

/// The head shares a cell with any other segment. Evaluated on the post-move body.
pub fn check_game_over(snake: &Snake) -> bool {
    let head = snake.head();
    snake.body().iter().skip(1).any(|segment| *segment == head)
}
