use std::collections::VecDeque;

use crate::Cell;
use Direction::*;

use crossterm::event::KeyCode;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    /// The cell one step away from `from` in this direction. May be off the grid.
    pub fn step(self, from: Cell) -> Cell {
        match self {
            Up => (from.0, from.1 - 1),
            Down => (from.0, from.1 + 1),
            Left => (from.0 - 1, from.1),
            Right => (from.0 + 1, from.1),
        }
    }
}

/// Translates a key press into the heading for the next tick.
///
/// Only the arrow keys are considered, anything else keeps `current`. A request
/// to turn straight back onto the neck is ignored as well.
pub fn apply_key(current: Direction, key: KeyCode) -> Direction {
    let requested = match key {
        KeyCode::Up => Up,
        KeyCode::Down => Down,
        KeyCode::Left => Left,
        KeyCode::Right => Right,
        _ => return current,
    };

    if requested == current.opposite() { current } else { requested }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    // Head at the front, tail at the back. Never empty.
    body: VecDeque<Cell>,
    direction: Direction,
}

impl Snake {
    pub fn new(pos: Cell, direction: Direction) -> Self {
        let mut body = VecDeque::new();
        body.push_back(pos);
        Snake { body, direction }
    }

    /// Builds a snake from its cells, head first.
    #[cfg(test)]
    pub fn from_cells(cells: &[Cell], direction: Direction) -> Self {
        assert!(!cells.is_empty(), "a snake needs at least a head");
        Snake { body: cells.iter().copied().collect(), direction }
    }

    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn next_head(&self) -> Cell {
        self.direction.step(self.head())
    }

    /// Whether `cell` is taken by any segment behind the head.
    pub fn body_contains(&self, cell: Cell) -> bool {
        self.body.iter().skip(1).any(|&c| c == cell)
    }

    /// Moves the head to `new_head`. The tail stays in place when growing.
    pub fn advance(&mut self, new_head: Cell, grow: bool) {
        self.body.push_front(new_head);
        if !grow {
            self.body.pop_back();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Direction; 4] = [Up, Down, Left, Right];

    fn key_for(direction: Direction) -> KeyCode {
        match direction {
            Up => KeyCode::Up,
            Down => KeyCode::Down,
            Left => KeyCode::Left,
            Right => KeyCode::Right,
        }
    }

    fn perpendicular(direction: Direction) -> [Direction; 2] {
        match direction {
            Up | Down => [Left, Right],
            Left | Right => [Up, Down],
        }
    }

    #[test]
    fn test_reversal_is_rejected() {
        for &dir in ALL.iter() {
            assert_eq!(apply_key(dir, key_for(dir.opposite())), dir);
        }
    }

    #[test]
    fn test_perpendicular_turns_are_accepted() {
        for &dir in ALL.iter() {
            for &turn in perpendicular(dir).iter() {
                assert_eq!(apply_key(dir, key_for(turn)), turn);
            }
        }
    }

    #[test]
    fn test_same_heading_and_other_keys() {
        assert_eq!(apply_key(Left, KeyCode::Left), Left);
        assert_eq!(apply_key(Left, KeyCode::Char('w')), Left);
        assert_eq!(apply_key(Up, KeyCode::Enter), Up);
        assert_eq!(apply_key(Down, KeyCode::Char(' ')), Down);
    }

    #[test]
    fn test_step_directions() {
        assert_eq!(Up.step((3, 3)), (3, 2));
        assert_eq!(Down.step((3, 3)), (3, 4));
        assert_eq!(Left.step((3, 3)), (2, 3));
        assert_eq!(Right.step((3, 3)), (4, 3));
        assert_eq!(Up.step((1, 0)), (1, -1));
    }

    #[test]
    fn test_advance_with_and_without_growth() {
        let mut snake = Snake::from_cells(&[(5, 5), (4, 5)], Right);

        snake.advance((6, 5), false);
        assert_eq!(snake.body().iter().copied().collect::<Vec<_>>(), vec![(6, 5), (5, 5)]);

        snake.advance((7, 5), true);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), (7, 5));
        assert_eq!(snake.body().back(), Some(&(5, 5)));
    }

    #[test]
    fn test_body_contains_skips_the_head() {
        let snake = Snake::from_cells(&[(2, 2), (2, 3), (3, 3)], Up);
        assert!(!snake.body_contains((2, 2)));
        assert!(snake.body_contains((2, 3)));
        assert!(snake.body_contains((3, 3)));
    }
}
