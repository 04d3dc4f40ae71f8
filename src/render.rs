// ASCII rendering of instance state for human viewing.
// Not part of the training hot path.

use crate::game::{Cell, GameInstance};

/// Renders one instance as an ASCII grid: '.' empty, '*' food, uppercase
/// letters for heads and lowercase for bodies ('A'/'a' is agent slot 0).
/// Row 0 is the bottom of the board, printed last.
pub fn render_instance(game: &GameInstance) -> String {
    let width = game.board().width();
    let height = game.board().height();

    let mut grid = vec![vec!['.'; width as usize]; height as usize];
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            if game.board().at(&crate::types::Coord::new(x, y)) == Cell::Food {
                grid[y as usize][x as usize] = '*';
            }
        }
    }
    for (slot, snake) in game.snakes().iter().enumerate() {
        if !snake.alive() {
            continue;
        }
        let body_glyph = (b'a' + slot as u8) as char;
        for segment in snake.body().iter().skip(1) {
            grid[segment.y as usize][segment.x as usize] = body_glyph;
        }
        let head = snake.head();
        grid[head.y as usize][head.x as usize] = (b'A' + slot as u8) as char;
    }

    let mut out = String::with_capacity((width as usize + 1) * (height as usize + 1));
    out.push_str(&format!("turn {}\n", game.turn()));
    for row in grid.iter().rev() {
        out.extend(row.iter());
        out.push('\n');
    }
    out
}
