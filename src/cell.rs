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

//! A single cell of a terminal line.

use crate::attrs::Attrs;
use crate::grapheme::Grapheme;
use crate::{Age, AGE_NULL};

/// A cell in a terminal line: the grapheme cluster it shows, its
/// rendition, the age of its last mutation, and the cached column width
/// of the cluster.
///
/// Two degenerate shapes exist: a blank cell (null cluster, width 1) and
/// the zero-width continuation placeholder stored behind a wide
/// character (null cluster, width 0).
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Cell {
    ch: Grapheme,
    age: Age,
    attr: Attrs,
    width: u8,
}

impl Cell {
    /// A blank cell carrying `attr` as its fill attribute.
    pub fn blank(attr: Attrs, age: Age) -> Self {
        Cell { ch: Grapheme::null(), age, attr, width: 1 }
    }

    /// The continuation placeholder occupying the second column of a
    /// wide character.
    pub fn wide_pad(attr: Attrs, age: Age) -> Self {
        Cell { ch: Grapheme::null(), age, attr, width: 0 }
    }

    /// Replace the cell contents wholesale.
    pub fn set(&mut self, ch: Grapheme, width: u8, attr: Attrs, age: Age) {
        self.ch = ch;
        self.width = width;
        self.attr = attr;
        self.age = age;
    }

    /// Blank the cell in place, keeping it one column wide.
    pub fn erase(&mut self, attr: Attrs, age: Age) {
        self.ch.set('\0');
        self.width = 1;
        self.attr = attr;
        self.age = age;
    }

    /// Attach a combining mark to the cluster. On a blank cell the mark
    /// becomes the base.
    pub fn append(&mut self, c: char, age: Age) {
        self.ch.merge(c);
        self.age = age;
    }

    pub fn grapheme(&self) -> &Grapheme {
        &self.ch
    }

    pub fn attr(&self) -> &Attrs {
        &self.attr
    }

    pub fn age(&self) -> Age {
        self.age
    }

    /// Stamp the age without touching contents. `AGE_NULL` marks the
    /// cell permanently dirty.
    pub fn set_age(&mut self, age: Age) {
        self.age = age;
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn is_blank(&self) -> bool {
        self.ch.is_null() && self.width != 0
    }

    pub fn is_wide_pad(&self) -> bool {
        self.ch.is_null() && self.width == 0
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::blank(Attrs::default(), AGE_NULL)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_wide_pad() {
            Ok(())
        } else if self.is_blank() {
            write!(f, " ")
        } else {
            write!(f, "{}", self.ch)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_pad_shapes() {
        let blank = Cell::blank(Attrs::default(), 1);
        assert!(blank.is_blank());
        assert!(!blank.is_wide_pad());
        assert_eq!(blank.width(), 1);

        let pad = Cell::wide_pad(Attrs::default(), 1);
        assert!(pad.is_wide_pad());
        assert!(!pad.is_blank());
        assert_eq!(pad.width(), 0);
    }

    #[test]
    fn erase_restores_blank() {
        let mut cell = Cell::blank(Attrs::default(), 1);
        cell.set(Grapheme::from_base('あ'), 2, Attrs::default(), 2);
        assert_eq!(cell.width(), 2);

        let attrs = Attrs { inverse: true, ..Default::default() };
        cell.erase(attrs, 3);
        assert!(cell.is_blank());
        assert_eq!(cell.width(), 1);
        assert_eq!(*cell.attr(), attrs);
        assert_eq!(cell.age(), 3);
    }

    #[test]
    fn append_on_blank_adopts_base() {
        let mut cell = Cell::blank(Attrs::default(), 1);
        cell.append('\u{0301}', 2);
        assert_eq!(cell.grapheme().resolve(), ['\u{0301}']);
        assert_eq!(cell.age(), 2);
    }
}
