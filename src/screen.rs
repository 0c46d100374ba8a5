use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::Backend,
    buffer::{Buffer, Cell},
    style::Color,
    Terminal,
};
use tracing::{debug, error};

use crate::error::ViewerError;
use crate::string::{char_width, drawable};

static SESSION_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Process-wide claim on the terminal. Only one can exist at a time.
#[derive(Debug)]
pub struct SessionLock {
    _private: (),
}

impl SessionLock {
    pub fn acquire() -> Result<Self, ViewerError> {
        if SESSION_ACTIVE.swap(true, Ordering::SeqCst) {
            return Err(ViewerError::AlreadyInitialized);
        }
        Ok(Self { _private: () })
    }
}

impl Drop for SessionLock {
    fn drop(&mut self) {
        SESSION_ACTIVE.store(false, Ordering::SeqCst);
    }
}

/// Raw mode + alternate screen for as long as this value lives
pub struct TerminalSession {
    _lock: SessionLock,
}

impl TerminalSession {
    pub fn start() -> Result<Self, ViewerError> {
        let lock = SessionLock::acquire()?;
        enable_raw_mode()?;
        // from here on, dropping the session undoes whatever was set up
        let session = Self { _lock: lock };
        execute!(io::stdout(), EnterAlternateScreen, Hide)?;
        debug!("terminal session started");
        Ok(session)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(e) = restore_terminal() {
            error!(error = %e, "failed to restore terminal");
        }
    }
}

/// Leave raw mode and the alternate screen. Also used by the panic hook.
pub fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, Show)
}

/// Cell-level drawing surface on top of a ratatui terminal.
///
/// Drawing goes to a persistent cell buffer; `flush` hands the whole buffer to
/// ratatui, which only writes the cells that changed since the last flush.
pub struct Screen<B: Backend> {
    terminal: Terminal<B>,
    cells: Buffer,
}

impl<B: Backend> Screen<B> {
    pub fn new(backend: B) -> io::Result<Self> {
        let terminal = Terminal::new(backend)?;
        let area = terminal.size()?;
        Ok(Self {
            terminal,
            cells: Buffer::empty(area),
        })
    }

    /// (width, height) in character cells
    pub fn size(&self) -> io::Result<(usize, usize)> {
        let area = self.terminal.size()?;
        Ok((area.width as usize, area.height as usize))
    }

    /// Blank every cell, picking up the current terminal size
    pub fn clear(&mut self, fg: Color, bg: Color) -> io::Result<()> {
        let area = self.terminal.size()?;
        let mut blank = Cell::default();
        blank.set_fg(fg).set_bg(bg);
        self.cells = Buffer::filled(area, &blank);
        Ok(())
    }

    /// Put one character on screen. Coordinates outside the screen are
    /// ignored, a wide character blanks the cell it spills into, and a
    /// zero-width character joins the cell to its left.
    pub fn set_cell(&mut self, x: i32, y: i32, ch: char, fg: Color, bg: Color) {
        let area = self.cells.area;
        let in_bounds = |x: i32, y: i32| {
            x >= 0 && y >= 0 && (x as u16) < area.width && (y as u16) < area.height
        };

        let width = char_width(ch);
        if width == 0 {
            if in_bounds(x - 1, y) {
                let cell = self.cells.get_mut((x - 1) as u16, y as u16);
                let symbol = format!("{}{}", cell.symbol(), ch);
                cell.set_symbol(&symbol);
            }
            return;
        }

        if !in_bounds(x, y) {
            return;
        }
        self.cells
            .get_mut(x as u16, y as u16)
            .set_char(drawable(ch))
            .set_fg(fg)
            .set_bg(bg);

        for spill in 1..width as i32 {
            if in_bounds(x + spill, y) {
                let cell = self.cells.get_mut((x + spill) as u16, y as u16);
                cell.reset();
                cell.set_bg(bg);
            }
        }
    }

    /// Write `s` left to right starting at (x, y); returns the x after it
    pub fn draw_str(&mut self, s: &str, x: i32, y: i32, fg: Color, bg: Color) -> i32 {
        let mut x = x;
        for ch in s.chars() {
            self.set_cell(x, y, ch, fg, bg);
            x += char_width(ch) as i32;
        }
        x
    }

    /// Push the cell buffer to the terminal
    pub fn flush(&mut self) -> io::Result<()> {
        let cells = &self.cells;
        self.terminal.draw(|frame| {
            let area = frame.size().intersection(cells.area);
            let buf = frame.buffer_mut();
            for y in area.top()..area.bottom() {
                for x in area.left()..area.right() {
                    *buf.get_mut(x, y) = cells.get(x, y).clone();
                }
            }
        })?;
        Ok(())
    }

    pub fn cells(&self) -> &Buffer {
        &self.cells
    }

    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }

    pub fn backend_mut(&mut self) -> &mut B {
        self.terminal.backend_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn screen(w: u16, h: u16) -> Screen<TestBackend> {
        Screen::new(TestBackend::new(w, h)).unwrap()
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf.get(x, y).symbol()).collect()
    }

    #[test]
    fn test_session_lock_is_exclusive() {
        let first = SessionLock::acquire().unwrap();
        assert!(matches!(SessionLock::acquire(), Err(ViewerError::AlreadyInitialized)));
        drop(first);
        let again = SessionLock::acquire();
        assert!(again.is_ok());
    }

    #[test]
    fn test_size_matches_backend() {
        let s = screen(12, 3);
        assert_eq!(s.size().unwrap(), (12, 3));
    }

    #[test]
    fn test_set_cell_ignores_out_of_bounds() {
        let mut s = screen(3, 1);
        s.clear(Color::White, Color::Black).unwrap();
        s.set_cell(-1, 0, 'a', Color::White, Color::Black);
        s.set_cell(3, 0, 'b', Color::White, Color::Black);
        s.set_cell(0, 1, 'c', Color::White, Color::Black);
        assert_eq!(row_text(s.cells(), 0), "   ");
    }

    #[test]
    fn test_draw_str_advances_by_display_width() {
        let mut s = screen(6, 1);
        s.clear(Color::White, Color::Black).unwrap();
        let end = s.draw_str("つa", 0, 0, Color::White, Color::Black);
        assert_eq!(end, 3);
        assert_eq!(s.cells().get(0, 0).symbol(), "つ");
        assert_eq!(s.cells().get(2, 0).symbol(), "a");
    }

    #[test]
    fn test_draw_str_clips_negative_start() {
        let mut s = screen(4, 1);
        s.clear(Color::White, Color::Black).unwrap();
        s.draw_str("abcdef", -2, 0, Color::White, Color::Black);
        assert_eq!(row_text(s.cells(), 0), "cdef");
    }

    #[test]
    fn test_combining_mark_joins_previous_cell() {
        let mut s = screen(3, 1);
        s.clear(Color::White, Color::Black).unwrap();
        s.draw_str("e\u{301}x", 0, 0, Color::White, Color::Black);
        assert_eq!(s.cells().get(0, 0).symbol(), "e\u{301}");
        assert_eq!(s.cells().get(1, 0).symbol(), "x");
    }

    #[test]
    fn test_control_chars_drawn_as_placeholder() {
        let mut s = screen(4, 1);
        s.clear(Color::White, Color::Black).unwrap();
        let end = s.draw_str("a\tb", 0, 0, Color::White, Color::Black);
        assert_eq!(end, 3);
        assert_eq!(row_text(s.cells(), 0), "a?b ");
    }

    #[test]
    fn test_flush_reaches_backend() {
        let mut s = screen(5, 2);
        s.clear(Color::White, Color::Black).unwrap();
        s.draw_str("hi", 1, 1, Color::Red, Color::Blue);
        s.flush().unwrap();

        let buf = s.backend().buffer();
        assert_eq!(row_text(buf, 1), " hi  ");
        assert_eq!(buf.get(1, 1).fg, Color::Red);
        assert_eq!(buf.get(1, 1).bg, Color::Blue);
    }

    #[test]
    fn test_clear_follows_resize() {
        let mut s = screen(5, 2);
        s.backend_mut().resize(8, 3);
        s.clear(Color::White, Color::Black).unwrap();
        assert_eq!(s.cells().area.width, 8);
        assert_eq!(s.cells().area.height, 3);
        s.flush().unwrap();
        assert_eq!(s.backend().buffer().area.width, 8);
    }
}
