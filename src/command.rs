/// Everything the user can ask the viewer to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    ScrollLeft,
    ScrollRight,
    ScrollUp,
    ScrollDown,
    SelectRowUp,
    SelectRowDown,
    SelectColLeft,
    SelectColRight,
    DeleteColumn,
    Resize,
    Quit,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::ScrollLeft => "scroll-left",
            Command::ScrollRight => "scroll-right",
            Command::ScrollUp => "scroll-up",
            Command::ScrollDown => "scroll-down",
            Command::SelectRowUp => "select-row-up",
            Command::SelectRowDown => "select-row-down",
            Command::SelectColLeft => "select-col-left",
            Command::SelectColRight => "select-col-right",
            Command::DeleteColumn => "delete-column",
            Command::Resize => "resize",
            Command::Quit => "quit",
        }
    }
}

/// How much of the screen a handled command needs repainted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redraw {
    /// Command rejected, nothing changed
    Nothing,
    /// Recompute geometry, clear and repaint every row
    Full,
    /// Repaint just these two screen rows (selection moved between them)
    Rows(usize, usize),
    /// Leave the command loop
    Quit,
}

impl Redraw {
    pub fn full_if(changed: bool) -> Self {
        if changed {
            Redraw::Full
        } else {
            Redraw::Nothing
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_if() {
        assert_eq!(Redraw::full_if(true), Redraw::Full);
        assert_eq!(Redraw::full_if(false), Redraw::Nothing);
    }
}
