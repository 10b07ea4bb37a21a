use crate::Cell;
use crate::grid::{self, GRID_HEIGHT, GRID_WIDTH};
use crate::snake::{Direction, Snake};

use log::{info, trace};
use rand::Rng;

/// Everything that changes while playing. Owned by the loop driver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Cell,
    pub game_over: bool,
}

impl GameState {
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        GameState {
            snake: Snake::new(grid::START_CELL, Direction::Right),
            food: spawn_food(rng),
            game_over: false,
        }
    }

    /// Advances the game by one step.
    ///
    /// Hitting a wall or the body sets `game_over` and leaves the snake where it
    /// was. Once the game is over this does nothing.
    pub fn tick<R: Rng>(&mut self, rng: &mut R) {
        if self.game_over {
            return;
        }

        let new_head = self.snake.next_head();

        if !grid::in_bounds(new_head) {
            info!("snake hit the wall at {:?}", new_head);
            self.game_over = true;
            return;
        }

        if self.snake.body_contains(new_head) {
            info!("snake ran into itself at {:?}", new_head);
            self.game_over = true;
            return;
        }

        let ate = new_head == self.food;
        self.snake.advance(new_head, ate);

        if ate {
            self.food = spawn_food(rng);
            trace!("food eaten, length {}, next food at {:?}", self.snake.len(), self.food);
        }
    }
}

/// Picks a random cell. Cells under the snake and the previous food cell are
/// not excluded.
pub fn spawn_food<R: Rng>(rng: &mut R) -> Cell {
    (rng.gen_range(0..GRID_WIDTH), rng.gen_range(0..GRID_HEIGHT))
}
