use std::io;

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{backend::Backend, style::Color};
use tracing::{debug, info};

use crate::command::{Command, Redraw};
use crate::config::{AppConfig, KeyMap};
use crate::render::RowRenderer;
use crate::screen::Screen;
use crate::selection::{RowMove, Selection, Step};
use crate::style::Palette;
use crate::table::Table;
use crate::viewport::Viewport;

/// Below this many rows only a placeholder message is shown
pub const MIN_SCREEN_HEIGHT: usize = 2;

pub const TOO_SMALL_MESSAGE: &str = "window too small";

/// One viewing session over a loaded table
pub struct App<B: Backend> {
    pub table: Table,
    pub viewport: Viewport,
    pub selection: Selection,
    pub palette: Palette,
    keymap: KeyMap,
    screen: Screen<B>,
}

impl<B: Backend> App<B> {
    pub fn new(table: Table, config: AppConfig, screen: Screen<B>) -> Self {
        Self {
            table,
            viewport: Viewport::new(),
            selection: Selection::new(),
            palette: config.palette,
            keymap: config.keymap,
            screen,
        }
    }

    /// Paint the first frame, then process events until quit
    pub fn run(&mut self) -> io::Result<()> {
        self.redraw()?;

        loop {
            let command = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.keymap.lookup(key),
                Event::Resize(_, _) => Some(Command::Resize),
                _ => None,
            };

            if let Some(command) = command {
                if !self.dispatch(command)? {
                    break;
                }
            }
        }

        info!("quit");
        Ok(())
    }

    /// Handle a command and repaint what it changed.
    /// Returns false once the session should end.
    pub fn dispatch(&mut self, command: Command) -> io::Result<bool> {
        match self.handle(command)? {
            Redraw::Quit => return Ok(false),
            Redraw::Nothing => {}
            Redraw::Full => self.redraw()?,
            Redraw::Rows(a, b) => self.redraw_rows(a, b)?,
        }
        Ok(true)
    }

    /// Apply a command to the view state and decide how much to repaint.
    /// Rejected moves leave the state untouched and need no repaint.
    pub fn handle(&mut self, command: Command) -> io::Result<Redraw> {
        let (width, height) = self.screen.size()?;
        debug!(command = command.name(), width, height, "handle");

        if command == Command::Quit {
            return Ok(Redraw::Quit);
        }
        if command == Command::Resize {
            let trimmed = self.viewport.trimmed(&self.table, width);
            info!(width, height, trimmed, "resize");
            if height >= MIN_SCREEN_HEIGHT {
                self.selection.clamp_row(&self.table, self.viewport.scroll_y, height);
            }
            return Ok(Redraw::Full);
        }
        if height < MIN_SCREEN_HEIGHT {
            return Ok(Redraw::Nothing);
        }

        let redraw = match command {
            Command::ScrollLeft => Redraw::full_if(self.viewport.scroll_left()),
            Command::ScrollRight => Redraw::full_if(self.viewport.scroll_right(&self.table, width)),
            Command::ScrollUp => Redraw::full_if(self.viewport.scroll_up()),
            Command::ScrollDown => Redraw::full_if(self.viewport.scroll_down(&self.table, height)),
            Command::SelectRowUp => self.select_row(Step::Back, height),
            Command::SelectRowDown => self.select_row(Step::Forward, height),
            Command::SelectColLeft => Redraw::full_if(self.selection.move_col(Step::Back, &self.table)),
            Command::SelectColRight => Redraw::full_if(self.selection.move_col(Step::Forward, &self.table)),
            Command::DeleteColumn => {
                let deleted = self.selection.delete_selected_column(&mut self.table);
                if deleted {
                    self.viewport.clamp_x(&self.table, width);
                    info!(visible_width = self.table.visible_width(), "column deleted");
                }
                Redraw::full_if(deleted)
            }
            Command::Resize | Command::Quit => Redraw::Nothing,
        };
        Ok(redraw)
    }

    fn select_row(&mut self, step: Step, height: usize) -> Redraw {
        match self.selection.move_row(step, &mut self.viewport, &self.table, height) {
            // the header line is always repainted in full
            RowMove::Moved { from, to } if from.min(to) >= 1 => Redraw::Rows(from, to),
            RowMove::Moved { .. } | RowMove::Scrolled => Redraw::Full,
            RowMove::Rejected => Redraw::Nothing,
        }
    }

    /// Recompute geometry, clear, paint the header plus every data row that
    /// fits, then flush
    pub fn redraw(&mut self) -> io::Result<()> {
        let (width, height) = self.screen.size()?;
        let fg: Color = self.palette.fg.into();
        let bg: Color = self.palette.bg.into();
        self.screen.clear(fg, bg)?;

        if height < MIN_SCREEN_HEIGHT {
            self.screen.draw_str(TOO_SMALL_MESSAGE, 0, 0, fg, bg);
            return self.screen.flush();
        }

        self.viewport.recompute(&self.table);
        let renderer = RowRenderer::new(
            &self.table,
            self.viewport.geometry(),
            &self.selection,
            &self.palette,
        );

        renderer.render(&mut self.screen, 0, 0, width);
        for screen_row in 1..height {
            let source_row = screen_row + self.viewport.scroll_y;
            if source_row >= self.table.row_count() {
                break;
            }
            renderer.render(&mut self.screen, source_row, screen_row, width);
        }

        self.screen.flush()
    }

    /// Repaint two data rows with the current geometry, no clear
    fn redraw_rows(&mut self, first: usize, second: usize) -> io::Result<()> {
        let (width, _) = self.screen.size()?;
        let renderer = RowRenderer::new(
            &self.table,
            self.viewport.geometry(),
            &self.selection,
            &self.palette,
        );

        for screen_row in [first, second] {
            renderer.render(&mut self.screen, screen_row + self.viewport.scroll_y, screen_row, width);
        }

        self.screen.flush()
    }
}
