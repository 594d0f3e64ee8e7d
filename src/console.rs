use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute, queue, style, terminal,
};
use lifegrid::{Cell, Coord, Engine};
use std::{
    io::{self, Write},
    time::Duration,
};

const HELP: &str = "space:start/stop n:step c:clear r:random arrows:pan q:quit";

pub enum ConsoleCommand {
    Exit,
    StartStop,
    Step,
    Clear,
    Randomize,
    Toggle(Coord),
    /// The view moved or resized, the next render redraws everything
    Redraw,
    Handled,
}

/// Draws the grid into the terminal, one character per cell
///
/// Only the cells reported by the engine are repainted, unless the view
/// itself changed.
pub struct ConsoleRender {
    tl: Coord,
    grid_size: (usize, usize),
    report: String,
    full_redraw: bool,
}
impl ConsoleRender {
    pub fn new(height: usize, width: usize) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;
        Ok(Self {
            tl: Coord::default(),
            grid_size: (height, width),
            report: String::new(),
            full_redraw: true,
        })
    }

    /// Visible grid rows and columns, the last terminal row is the footer
    fn view_size() -> io::Result<(usize, usize)> {
        let (cols, rows) = terminal::size()?;
        Ok((rows.saturating_sub(1) as usize, cols as usize))
    }

    fn draw_cell(
        &self,
        out: &mut impl Write,
        view: (usize, usize),
        pos: Coord,
        cell: Cell,
    ) -> io::Result<()> {
        let (Some(row), Some(col)) = (
            pos.row.checked_sub(self.tl.row),
            pos.col.checked_sub(self.tl.col),
        ) else {
            return Ok(());
        };
        if row >= view.0 || col >= view.1 {
            return Ok(());
        }
        queue!(
            out,
            cursor::MoveTo(col as u16, row as u16),
            style::Print(if cell.is_alive() { "█" } else { " " })
        )
    }

    pub fn render(&mut self, engine: &Engine, changed: &[Coord], running: bool) -> io::Result<()> {
        let view = Self::view_size()?;
        let mut stdout = io::stdout();

        if self.full_redraw {
            queue!(stdout, terminal::Clear(terminal::ClearType::All))?;
            for (pos, cell) in engine.grid().iter() {
                self.draw_cell(&mut stdout, view, pos, cell)?;
            }
            self.full_redraw = false;
        } else {
            for &pos in changed {
                if let Ok(cell) = engine.get(pos.row, pos.col) {
                    self.draw_cell(&mut stdout, view, pos, cell)?;
                }
            }
        }

        // write footer
        let footer = format!(
            "[{}] gen:{} alive:{} {} | {}",
            if running { "running" } else { "stopped" },
            engine.generation(),
            engine.alive_count(),
            self.report,
            HELP
        );
        queue!(
            stdout,
            cursor::MoveTo(0, view.0 as u16),
            terminal::Clear(terminal::ClearType::CurrentLine),
            style::Print(footer)
        )?;

        stdout.flush()
    }

    /// Waits up to `timeout` for a single input event
    pub fn poll_events(&mut self, timeout: Duration) -> io::Result<Option<ConsoleCommand>> {
        // make sure event is present for us to take
        if !event::poll(timeout)? {
            return Ok(None);
        }

        let cmd = match event::read()? {
            event::Event::Key(KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            }) => ConsoleCommand::Exit,
            event::Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => self.key_command(code),
            event::Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => self.click_command(row as usize, column as usize)?,
            event::Event::Resize(..) => {
                self.full_redraw = true;
                ConsoleCommand::Redraw
            }
            _ => ConsoleCommand::Handled,
        };
        Ok(Some(cmd))
    }

    fn key_command(&mut self, code: KeyCode) -> ConsoleCommand {
        let (height, width) = self.grid_size;
        // arrows to move the view, never past the last row or column
        let moved = match code {
            KeyCode::Up => self.tl.offset(-1, 0),
            KeyCode::Down if self.tl.row + 1 < height => self.tl.offset(1, 0),
            KeyCode::Left => self.tl.offset(0, -1),
            KeyCode::Right if self.tl.col + 1 < width => self.tl.offset(0, 1),
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => None,
            KeyCode::Char(' ') => return ConsoleCommand::StartStop,
            KeyCode::Char('n') => return ConsoleCommand::Step,
            KeyCode::Char('c') => return ConsoleCommand::Clear,
            KeyCode::Char('r') => return ConsoleCommand::Randomize,
            KeyCode::Char('q') | KeyCode::Esc => return ConsoleCommand::Exit,
            _ => return ConsoleCommand::Handled,
        };
        match moved {
            Some(tl) => {
                self.tl = tl;
                self.full_redraw = true;
                ConsoleCommand::Redraw
            }
            None => ConsoleCommand::Handled,
        }
    }

    fn click_command(&self, row: usize, col: usize) -> io::Result<ConsoleCommand> {
        let (view_rows, _) = Self::view_size()?;
        let (height, width) = self.grid_size;
        let pos = Coord::new(row + self.tl.row, col + self.tl.col);
        if row >= view_rows || pos.row >= height || pos.col >= width {
            return Ok(ConsoleCommand::Handled);
        }
        Ok(ConsoleCommand::Toggle(pos))
    }

    pub fn set_report(&mut self, report: String) {
        self.report = report;
    }
}
impl Drop for ConsoleRender {
    fn drop(&mut self) {
        // best effort, the terminal may already be gone
        let _ = execute!(
            io::stdout(),
            cursor::Show,
            DisableMouseCapture,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}
