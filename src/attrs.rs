// Copyright 2026 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Per-cell rendition state: colors and the SGR marks.

/// Represents a foreground or background color for cells.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Default, Hash)]
pub enum Color {
    /// The default terminal color.
    #[default]
    Default,

    /// One of the 16 classic ANSI colors.
    Named(NamedColor),

    /// An indexed color from the 256-color palette.
    Indexed(u8),

    /// An RGB terminal color. The parameters are (red, green, blue).
    Rgb(u8, u8, u8),
}

/// The 16 dark + light ANSI palette entries.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Hash)]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    LightBlack,
    LightRed,
    LightGreen,
    LightYellow,
    LightBlue,
    LightMagenta,
    LightCyan,
    LightWhite,
}

impl NamedColor {
    /// Position of this color within the 256-color palette.
    pub fn index(self) -> u8 {
        self as u8
    }
}

/// The rendition applied to a cell: colors plus the independent SGR
/// marks. Plain value type; equality is field-wise.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Attrs {
    pub fg: Color,
    pub bg: Color,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub inverse: bool,
    /// DECSCA guarded: selective erase leaves the cell alone.
    pub protect: bool,
    pub blink: bool,
    pub hidden: bool,
}

impl Attrs {
    pub fn has_attrs(&self) -> bool {
        *self != Self::default()
    }
}

impl std::fmt::Display for Attrs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !matches!(self.fg, Color::Default) {
            write!(f, "<FG {:?}>", self.fg)?;
        }
        if !matches!(self.bg, Color::Default) {
            write!(f, "<BG {:?}>", self.bg)?;
        }
        if self.bold {
            write!(f, "b")?;
        }
        if self.italic {
            write!(f, "i")?;
        }
        if self.underline {
            write!(f, "_")?;
        }
        if self.inverse {
            write!(f, "<")?;
        }
        if self.protect {
            write!(f, "p")?;
        }
        if self.blink {
            write!(f, "*")?;
        }
        if self.hidden {
            write!(f, "?")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_no_attrs() {
        assert!(!Attrs::default().has_attrs());
        let a = Attrs { protect: true, ..Default::default() };
        assert!(a.has_attrs());
    }

    #[test]
    fn named_color_indexes() {
        assert_eq!(NamedColor::Black.index(), 0);
        assert_eq!(NamedColor::White.index(), 7);
        assert_eq!(NamedColor::LightBlack.index(), 8);
        assert_eq!(NamedColor::LightWhite.index(), 15);
    }

    #[test]
    fn equality_is_field_wise() {
        let a = Attrs { fg: Color::Indexed(3), ..Default::default() };
        let b = Attrs { fg: Color::Indexed(3), ..Default::default() };
        assert_eq!(a, b);
        let c = Attrs { fg: Color::Rgb(0, 0, 0), ..Default::default() };
        assert_ne!(a, c);
    }
}
