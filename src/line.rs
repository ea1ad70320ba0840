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

//! A single row of cells.
//!
//! A line owns more cells than it shows: `cells.len()` is the allocated
//! capacity and `width` the visible prefix, so pages can resize without
//! reallocating every row. `fill` tracks the length of the prefix that
//! may contain content; every cell in `[fill, width)` is blank and
//! carries the fill attribute of the operation that blanked it. That
//! invariant is what lets full clears of untouched lines terminate in
//! O(1).

use tracing::warn;

use crate::attrs::Attrs;
use crate::cell::Cell;
use crate::grapheme::Grapheme;
use crate::{Age, AGE_NULL};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Line {
    cells: Vec<Cell>,
    width: usize,
    fill: usize,
    age: Age,
}

impl Line {
    /// An empty, zero-width line.
    pub fn new() -> Self {
        Line { cells: vec![], width: 0, fill: 0, age: AGE_NULL }
    }

    /// A blank line that is `width` cells wide.
    pub fn with_width(width: usize, attr: Attrs, age: Age) -> Self {
        let mut line = Line::new();
        line.reserve(width, attr, age, 0);
        line.set_width(width);
        line
    }

    /// Ensure capacity for at least `width` cells. Cells in
    /// `[0, protect_width)` are preserved; everything beyond, including
    /// newly allocated cells, is blanked with `attr`.
    pub fn reserve(&mut self, width: usize, attr: Attrs, age: Age, protect_width: usize) {
        let protect = protect_width.min(self.cells.len());
        for cell in &mut self.cells[protect..] {
            cell.erase(attr, age);
        }
        if width > self.cells.len() {
            self.cells.resize(width, Cell::blank(attr, age));
        }
        self.fill = self.fill.min(protect);
    }

    /// Change the visible width within the allocated capacity. Shrinking
    /// truncates `fill`; growing exposes cells previously blanked by
    /// [`Line::reserve`].
    pub fn set_width(&mut self, width: usize) {
        debug_assert!(width <= self.cells.len());
        self.width = width.min(self.cells.len());
        self.fill = self.fill.min(self.width);
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    pub fn fill(&self) -> usize {
        self.fill
    }

    pub fn age(&self) -> Age {
        self.age
    }

    /// Stamp the whole-line age. A line aged `AGE_NULL` forces a redraw
    /// of every cell it holds, whatever the per-cell ages say.
    pub fn set_age(&mut self, age: Age) {
        self.age = age;
    }

    /// The visible cells of the line.
    pub fn cells(&self) -> &[Cell] {
        &self.cells[..self.width]
    }

    pub fn cell(&self, x: usize) -> Option<&Cell> {
        if x < self.width {
            self.cells.get(x)
        } else {
            None
        }
    }

    /// If column `x` holds the trailing half of a wide character, erase
    /// the pair so no half glyph survives the edit around it.
    fn split_wide(&mut self, x: usize, attr: Attrs, age: Age) {
        if x > 0 && x < self.width && self.cells[x].is_wide_pad() {
            self.cells[x - 1].erase(attr, age);
            self.cells[x].erase(attr, age);
        }
    }

    /// A wide character whose continuation would fall outside the
    /// visible width cannot be displayed; drop it to a blank.
    fn drop_orphan_wide(&mut self, attr: Attrs, age: Age) {
        if self.width > 0 && self.cells[self.width - 1].width() == 2 {
            self.cells[self.width - 1].erase(attr, age);
        }
    }

    /// Place a grapheme cluster of width `cwidth` at column `x`.
    ///
    /// In insert mode the cells at `[x, width)` first shift right by
    /// `cwidth`. Wide characters occupy two columns: the base cell plus a
    /// zero-width continuation placeholder. A wide write whose second
    /// column would fall past the end of the line is dropped entirely so
    /// that no half glyph is ever stored.
    pub fn write(
        &mut self,
        x: usize,
        ch: Grapheme,
        cwidth: u8,
        attr: Attrs,
        age: Age,
        insert_mode: bool,
    ) {
        let cw = cwidth as usize;
        if x >= self.width {
            return;
        }
        if cw == 0 {
            warn!("zero width write, use append_combchar instead");
            return;
        }
        if x + cw > self.width {
            return;
        }

        if insert_mode {
            self.split_wide(x, attr, age);
            self.split_wide(self.width - cw, attr, age);
            self.cells[x..self.width].rotate_right(cw);
            for cell in &mut self.cells[x + cw..self.width] {
                cell.set_age(age);
            }
            self.drop_orphan_wide(attr, age);
            if self.fill > x {
                self.fill = (self.fill + cw).min(self.width);
            }
        } else {
            self.split_wide(x, attr, age);
            self.split_wide(x + cw, attr, age);
        }

        self.cells[x].set(ch, cwidth, attr, age);
        if cw == 2 {
            self.cells[x + 1] = Cell::wide_pad(attr, age);
        }
        self.fill = self.fill.max(x + cw);
    }

    /// Shift cells in `[from, width)` right by `num`, blanking the
    /// vacated columns.
    pub fn insert(&mut self, from: usize, num: usize, attr: Attrs, age: Age) {
        if from >= self.width || num == 0 {
            return;
        }
        let num = num.min(self.width - from);
        self.split_wide(from, attr, age);
        self.split_wide(self.width - num, attr, age);
        self.cells[from..self.width].rotate_right(num);
        for cell in &mut self.cells[from..from + num] {
            cell.erase(attr, age);
        }
        for cell in &mut self.cells[from + num..self.width] {
            cell.set_age(age);
        }
        self.drop_orphan_wide(attr, age);
        if self.fill > from {
            self.fill = (self.fill + num).min(self.width);
        }
    }

    /// Shift cells in `[from + num, width)` left onto `from`, blanking
    /// the vacated tail.
    pub fn delete(&mut self, from: usize, num: usize, attr: Attrs, age: Age) {
        if from >= self.width || num == 0 {
            return;
        }
        let num = num.min(self.width - from);
        self.split_wide(from, attr, age);
        self.split_wide(from + num, attr, age);
        self.cells[from..self.width].rotate_left(num);
        for cell in &mut self.cells[self.width - num..self.width] {
            cell.erase(attr, age);
        }
        for cell in &mut self.cells[from..self.width - num] {
            cell.set_age(age);
        }
        if self.fill > from {
            self.fill = self.fill.saturating_sub(num).max(from);
        }
    }

    /// Merge a combining mark onto the character at column `x`. A blank
    /// target adopts the mark as a standalone base.
    pub fn append_combchar(&mut self, x: usize, c: char, age: Age) {
        if x >= self.width {
            return;
        }
        if self.cells[x].is_wide_pad() {
            warn!("combining char aimed at a wide char continuation, dropping");
            return;
        }
        self.cells[x].append(c, age);
        self.fill = self.fill.max(x + 1);
    }

    /// Blank cells in `[from, from + num)`. With `keep_protected`, cells
    /// whose attributes carry the protect mark are left alone.
    pub fn erase(&mut self, from: usize, num: usize, attr: Attrs, age: Age, keep_protected: bool) {
        if from >= self.width || num == 0 {
            return;
        }
        let to = (from + num).min(self.width);
        self.split_wide(from, attr, age);
        self.split_wide(to, attr, age);
        for cell in &mut self.cells[from..to] {
            if keep_protected && cell.attr().protect {
                continue;
            }
            cell.erase(attr, age);
        }
        if to >= self.width && !keep_protected && self.fill > from {
            self.fill = from;
        }
    }

    /// Blank the whole line. A line that is already uniformly blank with
    /// the same fill attribute is left untouched, ages included, so
    /// repeated full-screen clears cost O(1) per clean row.
    pub fn reset(&mut self, attr: Attrs, age: Age) {
        if self.fill == 0 {
            match self.cells.first() {
                Some(first) if first.is_blank() && *first.attr() == attr => return,
                None => return,
                _ => {}
            }
        }
        for cell in &mut self.cells {
            cell.erase(attr, age);
        }
        self.fill = 0;
    }
}

impl Default for Line {
    fn default() -> Self {
        Line::new()
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for cell in self.cells() {
            write!(f, "{}", cell)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_str(line: &mut Line, x: usize, s: &str, age: Age) {
        let mut col = x;
        for c in s.chars() {
            let g = Grapheme::from_base(c);
            let w = g.width(false);
            line.write(col, g, w, Attrs::default(), age, false);
            col += w as usize;
        }
    }

    fn render(line: &Line) -> String {
        format!("{}", line)
    }

    #[test]
    fn blank_line_shape() {
        let line = Line::with_width(5, Attrs::default(), 1);
        assert_eq!(line.width(), 5);
        assert_eq!(line.fill(), 0);
        assert_eq!(render(&line), "     ");
    }

    #[test]
    fn write_advances_fill() {
        let mut line = Line::with_width(10, Attrs::default(), 1);
        write_str(&mut line, 0, "abc", 2);
        assert_eq!(line.fill(), 3);
        assert_eq!(render(&line), "abc       ");

        write_str(&mut line, 6, "x", 3);
        assert_eq!(line.fill(), 7);
        assert_eq!(render(&line), "abc   x   ");
    }

    #[test]
    fn write_stamps_only_touched_cells() {
        let mut line = Line::with_width(4, Attrs::default(), 1);
        write_str(&mut line, 1, "z", 7);
        assert_eq!(line.cell(0).unwrap().age(), 1);
        assert_eq!(line.cell(1).unwrap().age(), 7);
        assert_eq!(line.cell(2).unwrap().age(), 1);
    }

    #[test]
    fn wide_write_places_pad() {
        let mut line = Line::with_width(6, Attrs::default(), 1);
        write_str(&mut line, 0, "aあb", 2);
        assert_eq!(line.cell(1).unwrap().width(), 2);
        assert!(line.cell(2).unwrap().is_wide_pad());
        assert_eq!(line.fill(), 4);
        assert_eq!(render(&line), "aあb  ");
    }

    #[test]
    fn wide_write_at_last_column_is_dropped() {
        let mut line = Line::with_width(4, Attrs::default(), 1);
        line.write(3, Grapheme::from_base('あ'), 2, Attrs::default(), 2, false);
        assert!(line.cell(3).unwrap().is_blank());
        assert_eq!(line.fill(), 0);
    }

    #[test]
    fn overwriting_half_a_wide_char_erases_the_pair() {
        let mut line = Line::with_width(6, Attrs::default(), 1);
        write_str(&mut line, 0, "あ", 2);

        // Overwrite the continuation column; the base cannot survive.
        write_str(&mut line, 1, "x", 3);
        assert!(line.cell(0).unwrap().is_blank());
        assert_eq!(render(&line), " x    ");
    }

    #[test]
    fn overwriting_the_base_erases_the_pad() {
        let mut line = Line::with_width(6, Attrs::default(), 1);
        write_str(&mut line, 1, "あ", 2);
        write_str(&mut line, 0, "yz", 3);
        assert!(line.cell(2).unwrap().is_blank());
        assert_eq!(render(&line), "yz    ");
    }

    #[test]
    fn insert_mode_shifts_right() {
        let mut line = Line::with_width(5, Attrs::default(), 1);
        write_str(&mut line, 0, "abcd", 2);
        line.write(1, Grapheme::from_base('X'), 1, Attrs::default(), 3, true);
        assert_eq!(render(&line), "aXbcd");
        assert_eq!(line.fill(), 5);
    }

    #[test]
    fn insert_blanks_cells() {
        let mut line = Line::with_width(6, Attrs::default(), 1);
        write_str(&mut line, 0, "abcd", 2);
        line.insert(1, 2, Attrs::default(), 3);
        assert_eq!(render(&line), "a  bcd");
        assert_eq!(line.fill(), 6);
    }

    #[test]
    fn delete_pulls_cells_left() {
        let mut line = Line::with_width(6, Attrs::default(), 1);
        write_str(&mut line, 0, "abcdef", 2);
        line.delete(1, 2, Attrs::default(), 3);
        assert_eq!(render(&line), "adef  ");
        assert_eq!(line.fill(), 4);
    }

    #[test]
    fn erase_keeps_protected_cells() {
        let mut line = Line::with_width(5, Attrs::default(), 1);
        write_str(&mut line, 0, "ab", 2);
        let guarded = Attrs { protect: true, ..Default::default() };
        line.write(2, Grapheme::from_base('c'), 1, guarded, 2, false);

        line.erase(0, 5, Attrs::default(), 3, true);
        assert_eq!(render(&line), "  c  ");

        line.erase(0, 5, Attrs::default(), 4, false);
        assert_eq!(render(&line), "     ");
        assert_eq!(line.fill(), 0);
    }

    #[test]
    fn erase_to_end_truncates_fill() {
        let mut line = Line::with_width(8, Attrs::default(), 1);
        write_str(&mut line, 0, "abcdef", 2);
        line.erase(3, 8, Attrs::default(), 3, false);
        assert_eq!(line.fill(), 3);
        assert_eq!(render(&line), "abc     ");
    }

    #[test]
    fn append_combchar_merges() {
        let mut line = Line::with_width(4, Attrs::default(), 1);
        write_str(&mut line, 0, "e", 2);
        line.append_combchar(0, '\u{0301}', 3);
        assert_eq!(line.cell(0).unwrap().grapheme().resolve(), ['e', '\u{0301}']);
        assert_eq!(line.cell(0).unwrap().age(), 3);
    }

    #[test]
    fn append_combchar_on_blank_is_standalone() {
        let mut line = Line::with_width(4, Attrs::default(), 1);
        line.append_combchar(2, '\u{0301}', 2);
        assert_eq!(line.cell(2).unwrap().grapheme().resolve(), ['\u{0301}']);
        assert_eq!(line.fill(), 3);
    }

    #[test]
    fn reset_blanks_and_skips_clean_lines() {
        let mut line = Line::with_width(4, Attrs::default(), 1);
        write_str(&mut line, 0, "hi", 2);
        line.reset(Attrs::default(), 3);
        assert_eq!(line.fill(), 0);
        assert_eq!(line.cell(0).unwrap().age(), 3);

        // A second reset with the same attrs finds nothing to do and
        // leaves the ages alone.
        line.reset(Attrs::default(), 9);
        assert_eq!(line.cell(0).unwrap().age(), 3);

        // But a reset with a different fill attribute restamps.
        let inverse = Attrs { inverse: true, ..Default::default() };
        line.reset(inverse, 10);
        assert_eq!(line.cell(0).unwrap().age(), 10);
        assert_eq!(*line.cell(0).unwrap().attr(), inverse);
    }

    #[test]
    fn reserve_protects_prefix() {
        let mut line = Line::with_width(4, Attrs::default(), 1);
        write_str(&mut line, 0, "abcd", 2);
        line.reserve(8, Attrs::default(), 3, 4);
        line.set_width(8);
        assert_eq!(render(&line), "abcd    ");
        assert_eq!(line.fill(), 4);
        assert_eq!(line.capacity(), 8);
    }

    #[test]
    fn shrink_then_grow_exposes_blanks() {
        let mut line = Line::with_width(6, Attrs::default(), 1);
        write_str(&mut line, 0, "abcdef", 2);
        line.set_width(3);
        assert_eq!(line.fill(), 3);
        assert_eq!(render(&line), "abc");

        // The tail cells still hold their content within capacity until
        // a reserve blanks them.
        line.reserve(6, Attrs::default(), 3, 3);
        line.set_width(6);
        assert_eq!(render(&line), "abc   ");
    }
}
