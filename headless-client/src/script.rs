use snake_common::engine::Key;

/// Parses a move script: one step per advance, `U`/`L`/`D`/`R` (or `W`/`A`/`S`/`D`
/// keys) press an arrow, `.` leaves the input untouched. Whitespace is ignored.
pub fn parse_moves(script: &str) -> Result<Vec<Option<Key>>, String> {
    script
        .chars()
        .filter(|c| !c.is_whitespace())
        .enumerate()
        .map(|(index, c)| match c.to_ascii_uppercase() {
            'U' | 'W' => Ok(Some(Key::ArrowUp)),
            'L' | 'A' => Ok(Some(Key::ArrowLeft)),
            'D' | 'S' => Ok(Some(Key::ArrowDown)),
            'R' => Ok(Some(Key::ArrowRight)),
            '.' => Ok(None),
            other => Err(format!("Unknown move '{}' at step {}", other, index)),
        })
        .collect()
}
