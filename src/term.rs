use crate::error::StartupError;
use crate::font::Font;
use crate::game::{EventSource, GameEvent, Surface};
use crate::grid::{PixelRect, GRID_HEIGHT, GRID_WIDTH, SCREEN_HEIGHT, SCREEN_WIDTH};
use std::{io::{Stdout, Write, stdout}, time::{Duration, Instant}};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, poll, read};
use log::{debug, info, trace};

/// Terminal columns used by one grid cell, so cells look roughly square
const COLUMNS_PER_CELL: u16 = 2;

const FIELD_COLUMNS: u16 = GRID_WIDTH as u16 * COLUMNS_PER_CELL;
const FIELD_ROWS: u16 = GRID_HEIGHT as u16;

/// Smallest terminal that fits the field plus its border
pub const MIN_TERMINAL_SIZE: (u16, u16) = (FIELD_COLUMNS + 2, FIELD_ROWS + 2);

/// The terminal acting as display surface and event source.
///
/// The logical pixel surface is scaled down onto a block of character cells in
/// the middle of the terminal. The terminal is put back into its normal state
/// when this is dropped.
pub struct TermManager {
    stdout: Stdout,
    origin: (u16, u16),
    timer: Option<Timer>,
}

struct Timer {
    period: Duration,
    next: Instant,
}

impl TermManager {
    pub fn new() -> Result<Self, StartupError> {
        let (width, height) = terminal::size()?;
        if width < MIN_TERMINAL_SIZE.0 || height < MIN_TERMINAL_SIZE.1 {
            return Err(StartupError::TerminalTooSmall {
                actual: (width, height),
                required: MIN_TERMINAL_SIZE,
            });
        }

        let origin = field_origin((width, height));
        info!("terminal is {}x{}, field starts at {:?}", width, height, origin);
        Ok(TermManager { stdout: stdout(), origin, timer: None })
    }

    pub fn setup(&mut self) -> Result<(), StartupError> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking, terminal::Clear(ClearType::All))?;
        self.draw_borders()?;
        Ok(())
    }

    /// Starts delivering `GameEvent::Tick` every `period`.
    pub fn start_timer(&mut self, period: Duration) {
        self.timer = Some(Timer { period, next: Instant::now() + period });
    }

    /// Attempts every step even if an earlier one fails.
    fn restore(&mut self) -> crossterm::Result<()> {
        first_error(vec![
            terminal::disable_raw_mode(),
            execute!(self.stdout, style::ResetColor, cursor::Show, cursor::EnableBlinking),
            execute!(self.stdout, LeaveAlternateScreen),
        ])
    }

    fn draw_borders(&mut self) -> crossterm::Result<()> {
        let (left, top) = (self.origin.0 - 1, self.origin.1 - 1);
        let (right, bottom) = (self.origin.0 + FIELD_COLUMNS, self.origin.1 + FIELD_ROWS);

        for x in left..=right {
            let ch = if x == left || x == right {'+'} else {'-'};
            queue!(self.stdout, cursor::MoveTo(x, top), style::Print(ch))?;
            queue!(self.stdout, cursor::MoveTo(x, bottom), style::Print(ch))?;
        }

        for y in self.origin.1..bottom {
            queue!(self.stdout, cursor::MoveTo(left, y), style::Print('|'))?;
            queue!(self.stdout, cursor::MoveTo(right, y), style::Print('|'))?;
        }

        self.stdout.flush()?;
        Ok(())
    }

    fn wait_for_event(&mut self) -> crossterm::Result<GameEvent> {
        loop {
            let timeout = match &mut self.timer {
                Some(timer) => {
                    let now = Instant::now();
                    if now >= timer.next {
                        timer.next += timer.period;
                        if timer.next <= now {
                            // Fell more than a whole period behind, don't burst to catch up
                            debug!("tick timer fell behind, resynchronising");
                            timer.next = now + timer.period;
                        }
                        return Ok(GameEvent::Tick);
                    }
                    Some(timer.next - now)
                }
                None => None,
            };

            let ready = match timeout {
                Some(t) => poll(t)?,
                None => true, // no timer: block in read()
            };

            if ready {
                if let Event::Key(ev) = read()? {
                    trace!("key event {:?}", ev);
                    if is_close(&ev) {
                        return Ok(GameEvent::Close);
                    }
                    return Ok(GameEvent::Key(ev.code));
                }
            }
        }
    }
}

impl Surface for TermManager {
    fn clear(&mut self, color: Color) -> crossterm::Result<()> {
        let full = PixelRect { x0: 0, y0: 0, x1: SCREEN_WIDTH, y1: SCREEN_HEIGHT };
        self.fill_rect(full, color)
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Color) -> crossterm::Result<()> {
        let (c0, r0, c1, r1) = to_char_area(rect);
        let blank = " ".repeat((c1 - c0) as usize);

        let origin = self.origin;

        queue!(self.stdout, style::SetBackgroundColor(color))?;
        for row in r0..r1 {
            queue!(self.stdout, cursor::MoveTo(origin.0 + c0, origin.1 + row), style::Print(&blank))?;
        }
        queue!(self.stdout, style::ResetColor)
    }

    fn draw_text(&mut self, font: &Font, x: u32, y: u32, color: Color, text: &str) -> crossterm::Result<()> {
        // The terminal renders glyphs with its own typeface
        trace!("drawing {:?} with {}", text, font.path().display());

        let (col, row) = to_char_pos(x, y);
        let half = (text.chars().count() as u16 / 2).min(col);
        let origin = self.origin;
        queue!(
            self.stdout,
            cursor::MoveTo(origin.0 + col - half, origin.1 + row),
            style::SetForegroundColor(color),
            style::Print(text),
            style::ResetColor
        )
    }

    fn present(&mut self) -> crossterm::Result<()> {
        self.stdout.flush()?;
        Ok(())
    }
}

impl EventSource for TermManager {
    fn next_event(&mut self) -> crossterm::Result<GameEvent> {
        self.wait_for_event()
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            log::error!("failed to restore the terminal: {}", e);
        }
    }
}

/// Ctrl+C, Esc and `q` close the game.
fn is_close(ev: &KeyEvent) -> bool {
    matches!(
        ev,
        KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL }
            | KeyEvent { code: KeyCode::Esc, .. }
            | KeyEvent { code: KeyCode::Char('q'), .. }
    )
}

/// Logs every failure and keeps the first one.
fn first_error(results: Vec<crossterm::Result<()>>) -> crossterm::Result<()> {
    let mut first = Ok(());
    for res in results {
        if let Err(e) = res {
            log::error!("terminal restore step failed: {}", e);
            if first.is_ok() {
                first = Err(e);
            }
        }
    }
    first
}

/// Top-left character cell of the field when centred in a terminal of `size`.
fn field_origin(size: (u16, u16)) -> (u16, u16) {
    (
        (size.0 - MIN_TERMINAL_SIZE.0) / 2 + 1,
        (size.1 - MIN_TERMINAL_SIZE.1) / 2 + 1,
    )
}

fn to_char_pos(x: u32, y: u32) -> (u16, u16) {
    let col = x.min(SCREEN_WIDTH - 1) * FIELD_COLUMNS as u32 / SCREEN_WIDTH;
    let row = y.min(SCREEN_HEIGHT - 1) * FIELD_ROWS as u32 / SCREEN_HEIGHT;
    (col as u16, row as u16)
}

/// Character cells covered by a pixel rectangle, end exclusive, rounded outwards.
fn to_char_area(rect: PixelRect) -> (u16, u16, u16, u16) {
    let cols = FIELD_COLUMNS as u32;
    let rows = FIELD_ROWS as u32;
    let x1 = rect.x1.min(SCREEN_WIDTH);
    let y1 = rect.y1.min(SCREEN_HEIGHT);

    let c0 = rect.x0 * cols / SCREEN_WIDTH;
    let r0 = rect.y0 * rows / SCREEN_HEIGHT;
    let c1 = (x1 * cols + SCREEN_WIDTH - 1) / SCREEN_WIDTH;
    let r1 = (y1 * rows + SCREEN_HEIGHT - 1) / SCREEN_HEIGHT;
    (c0 as u16, r0 as u16, c1.max(c0) as u16, r1.max(r0) as u16)
}
