use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ViewerError;

/// Color that can be serialized/deserialized
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThemeColor {
    /// Named color: "red", "blue", "cyan", etc.
    Named(NamedColor),
    /// RGB color: [255, 128, 0]
    Rgb([u8; 3]),
    /// 256-color index: 42
    Indexed(u8),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    Gray,
    DarkGray,
    White,
    Reset,
}

impl From<ThemeColor> for Color {
    fn from(tc: ThemeColor) -> Color {
        match tc {
            ThemeColor::Named(n) => match n {
                NamedColor::Black => Color::Black,
                NamedColor::Red => Color::Red,
                NamedColor::Green => Color::Green,
                NamedColor::Yellow => Color::Yellow,
                NamedColor::Blue => Color::Blue,
                NamedColor::Magenta => Color::Magenta,
                NamedColor::Cyan => Color::Cyan,
                NamedColor::Gray => Color::Gray,
                NamedColor::DarkGray => Color::DarkGray,
                NamedColor::White => Color::White,
                NamedColor::Reset => Color::Reset,
            },
            ThemeColor::Rgb([r, g, b]) => Color::Rgb(r, g, b),
            ThemeColor::Indexed(i) => Color::Indexed(i),
        }
    }
}

/// Colors the table is drawn with. Owned by the viewer session.
///
/// `fg`/`bg` form the alternating column pair, `selection` replaces `fg` on the
/// selected row and `selected_column` replaces `bg` on the selected column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub name: String,
    pub fg: ThemeColor,
    pub bg: ThemeColor,
    pub selection: ThemeColor,
    pub selected_column: ThemeColor,
}

impl Default for Palette {
    fn default() -> Self {
        Self::classic()
    }
}

impl Palette {
    /// White on black with a blue selected row
    pub fn classic() -> Self {
        use NamedColor::*;
        Self {
            name: "classic".to_string(),
            fg: ThemeColor::Named(White),
            bg: ThemeColor::Named(Black),
            selection: ThemeColor::Named(Blue),
            selected_column: ThemeColor::Named(Yellow),
        }
    }

    pub fn dark() -> Self {
        use NamedColor::*;
        Self {
            name: "dark".to_string(),
            fg: ThemeColor::Named(Gray),
            bg: ThemeColor::Named(Black),
            selection: ThemeColor::Named(Cyan),
            selected_column: ThemeColor::Named(DarkGray),
        }
    }

    pub fn solarized() -> Self {
        Self {
            name: "solarized".to_string(),
            fg: ThemeColor::Rgb([131, 148, 150]),
            bg: ThemeColor::Rgb([0, 43, 54]),
            selection: ThemeColor::Rgb([38, 139, 210]),
            selected_column: ThemeColor::Rgb([181, 137, 0]),
        }
    }

    /// Get palette by name
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "classic" => Some(Self::classic()),
            "dark" => Some(Self::dark()),
            "solarized" | "solarized-dark" => Some(Self::solarized()),
            _ => None,
        }
    }

    /// Load palette from TOML file; keys left out keep their classic values
    pub fn from_file(path: &Path) -> Result<Self, ViewerError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ViewerError::Theme(format!("failed to read {}: {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| ViewerError::Theme(format!("failed to parse {}: {}", path.display(), e)))
    }

    /// Built-in name first, then a path to a TOML file
    pub fn resolve(name_or_path: &str) -> Result<Self, ViewerError> {
        match Self::by_name(name_or_path) {
            Some(palette) => Ok(palette),
            None => Self::from_file(Path::new(name_or_path)),
        }
    }

    /// List available built-in palettes
    pub fn builtin_names() -> &'static [&'static str] {
        &["classic", "dark", "solarized"]
    }
}
