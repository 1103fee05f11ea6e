use super::graph::Position;

const ORIGIN_X: f64 = 100.0;
const ORIGIN_Y: f64 = 100.0;
const COLUMN_SPACING: f64 = 300.0;
const ROW_SPACING: f64 = 200.0;
const COLUMNS: usize = 3;

/// Wrap-around grid, three columns wide.
pub fn grid_position(index: usize) -> Position {
    Position {
        x: ORIGIN_X + (index % COLUMNS) as f64 * COLUMN_SPACING,
        y: ORIGIN_Y + (index / COLUMNS) as f64 * ROW_SPACING,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_wraps_after_three_columns() {
        assert_eq!(grid_position(0), Position { x: 100.0, y: 100.0 });
        assert_eq!(grid_position(2), Position { x: 700.0, y: 100.0 });
        assert_eq!(grid_position(3), Position { x: 100.0, y: 300.0 });
        assert_eq!(grid_position(7), Position { x: 400.0, y: 500.0 });
    }
}
