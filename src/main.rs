mod error;
mod font;
mod game;
mod grid;
mod snake;
mod state;
mod term;

pub type GridInt = i16;
pub type Cell = (GridInt, GridInt);

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    pretty_env_logger::init();

    // Dropping the game restores the terminal before any error gets reported
    let mut game = game::SnakeGame::initialize()?;
    game.run()?;

    Ok(())
}
