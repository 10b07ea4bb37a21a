//! Fixed geometry of the playing field: a pixel surface split into square cells.

use crate::{Cell, GridInt};

pub const SCREEN_WIDTH: u32 = 1800;
pub const SCREEN_HEIGHT: u32 = 1600;

/// Side of one cell, in pixels
pub const CELL_SIZE: u32 = 100;

pub const GRID_WIDTH: GridInt = (SCREEN_WIDTH / CELL_SIZE) as GridInt;
pub const GRID_HEIGHT: GridInt = (SCREEN_HEIGHT / CELL_SIZE) as GridInt;

/// Where the snake's head is placed when the game starts
pub const START_CELL: Cell = (GRID_WIDTH / 8, GRID_HEIGHT / 8);

/// Rectangle on the pixel surface, `x1`/`y1` exclusive.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

pub fn in_bounds(cell: Cell) -> bool {
    (0..GRID_WIDTH).contains(&cell.0) && (0..GRID_HEIGHT).contains(&cell.1)
}

/// Pixel area covered by a cell. The cell must be in bounds.
pub fn cell_rect(cell: Cell) -> PixelRect {
    debug_assert!(in_bounds(cell));
    let (x, y) = (cell.0 as u32, cell.1 as u32);
    PixelRect {
        x0: x * CELL_SIZE,
        y0: y * CELL_SIZE,
        x1: (x + 1) * CELL_SIZE,
        y1: (y + 1) * CELL_SIZE,
    }
}

pub fn screen_center() -> (u32, u32) {
    (SCREEN_WIDTH / 2, SCREEN_HEIGHT / 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_is_18_by_16() {
        assert_eq!(GRID_WIDTH, 18);
        assert_eq!(GRID_HEIGHT, 16);
        assert_eq!(START_CELL, (2, 2));
    }

    #[test]
    fn test_bounds() {
        assert!(in_bounds((0, 0)));
        assert!(in_bounds((GRID_WIDTH - 1, GRID_HEIGHT - 1)));
        assert!(!in_bounds((-1, 0)));
        assert!(!in_bounds((0, -1)));
        assert!(!in_bounds((GRID_WIDTH, 0)));
        assert!(!in_bounds((0, GRID_HEIGHT)));
    }

    #[test]
    fn test_cell_rect() {
        assert_eq!(cell_rect((0, 0)), PixelRect { x0: 0, y0: 0, x1: 100, y1: 100 });
        assert_eq!(cell_rect((5, 3)), PixelRect { x0: 500, y0: 300, x1: 600, y1: 400 });

        let corner = cell_rect((GRID_WIDTH - 1, GRID_HEIGHT - 1));
        assert_eq!((corner.x1, corner.y1), (SCREEN_WIDTH, SCREEN_HEIGHT));
    }
}
