use std::time::Duration;

use crate::error::{GameError, StartupError};
use crate::font::Font;
use crate::grid::{self, cell_rect};
use crate::snake::apply_key;
use crate::state::GameState;
use crate::term::TermManager;

use crossterm::event::KeyCode;
use crossterm::style::Color;
use log::{info, trace};
use rand::{Rng, rngs::ThreadRng};

/// One game step and one redraw happen every tick
pub const TICK_PERIOD: Duration = Duration::from_millis(100);

const BACKGROUND_COLOR: Color = Color::Rgb { r: 0, g: 0, b: 0 };
const SNAKE_COLOR: Color = Color::Rgb { r: 0, g: 255, b: 0 };
const FOOD_COLOR: Color = Color::Rgb { r: 255, g: 0, b: 0 };
const TEXT_COLOR: Color = Color::Rgb { r: 255, g: 255, b: 255 };

const GAME_OVER_TEXT: &str = "GAME OVER!";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Tick,
    Key(KeyCode),
    Close,
}

/// Where frames are drawn. Coordinates are pixels on the fixed-size screen.
pub trait Surface {
    fn clear(&mut self, color: Color) -> crossterm::Result<()>;
    fn fill_rect(&mut self, rect: grid::PixelRect, color: Color) -> crossterm::Result<()>;
    /// Draws `text` horizontally centred on `x`.
    fn draw_text(&mut self, font: &Font, x: u32, y: u32, color: Color, text: &str) -> crossterm::Result<()>;
    fn present(&mut self) -> crossterm::Result<()>;
}

pub trait EventSource {
    /// Blocks until the next event is available.
    fn next_event(&mut self) -> crossterm::Result<GameEvent>;
}

pub struct SnakeGame<T = TermManager, R = ThreadRng> {
    term: T,
    font: Font,
    rng: R,
    state: GameState,
}

impl SnakeGame {
    /// Acquires the terminal, the font and the tick timer, and sets up a new game.
    ///
    /// Whatever was acquired before a failure is released on the way out.
    pub fn initialize() -> Result<Self, StartupError> {
        let mut term = TermManager::new()?;
        term.setup()?;

        let font = Font::load_default()?;

        let mut rng = rand::thread_rng();
        let state = GameState::new(&mut rng);
        info!("snake starts at {:?}, food at {:?}", state.snake.head(), state.food);

        term.start_timer(TICK_PERIOD);
        Ok(SnakeGame::new(term, font, rng, state))
    }
}

impl<T: Surface + EventSource, R: Rng> SnakeGame<T, R> {
    pub fn new(term: T, font: Font, rng: R, state: GameState) -> Self {
        SnakeGame { term, font, rng, state }
    }

    #[cfg(test)]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Runs until the player closes the game.
    pub fn run(&mut self) -> Result<(), GameError> {
        loop {
            match self.term.next_event()? {
                GameEvent::Close => {
                    info!("close requested, length {}", self.state.snake.len());
                    break;
                }
                GameEvent::Key(code) => {
                    let direction = apply_key(self.state.snake.direction(), code);
                    self.state.snake.set_direction(direction);
                }
                GameEvent::Tick => {
                    let was_over = self.state.game_over;
                    self.state.tick(&mut self.rng);
                    if self.state.game_over && !was_over {
                        info!("game over with length {}", self.state.snake.len());
                    }
                    render(&mut self.term, &self.font, &self.state)?;
                }
            }
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn into_parts(self) -> (T, GameState) {
        (self.term, self.state)
    }
}

/// Draws the whole frame: background, snake, food and the game over banner.
pub fn render<S: Surface>(surface: &mut S, font: &Font, state: &GameState) -> crossterm::Result<()> {
    surface.clear(BACKGROUND_COLOR)?;

    for &segment in state.snake.body() {
        surface.fill_rect(cell_rect(segment), SNAKE_COLOR)?;
    }

    surface.fill_rect(cell_rect(state.food), FOOD_COLOR)?;

    if state.game_over {
        let (x, y) = grid::screen_center();
        surface.draw_text(font, x, y, TEXT_COLOR, GAME_OVER_TEXT)?;
    }

    trace!("frame drawn, head at {:?}", state.snake.head());
    surface.present()
}
