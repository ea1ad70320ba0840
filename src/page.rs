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

//! A 2D grid of cells: the visible screen (or the alternate screen) of a
//! terminal.
//!
//! The page stores rows as whole [`Line`] values and scrolls by rotating
//! those values inside its row vector. Rotation moves the small line
//! headers only; cell buffers stay where they were allocated, which is
//! what makes scrolling cheap and lets invariant-minded callers verify
//! that the same line objects merely changed places.
//!
//! The page has no cursor. Callers pass explicit coordinates, the
//! current fill attribute, and the age to stamp on every mutation; a
//! renderer holding the age of its last frame redraws exactly the cells
//! (and rotated lines) stamped newer.

use std::mem;

use tracing::warn;

use crate::attrs::Attrs;
use crate::cell::Cell;
use crate::grapheme::Grapheme;
use crate::history::History;
use crate::line::Line;
use crate::Age;

#[derive(Debug, Clone)]
pub struct Page {
    /// The age stamped by the most recent full-page operation.
    age: Age,
    /// Row storage. The first `height` entries are visible; anything
    /// beyond is pre-allocated headroom kept for resizes.
    lines: Vec<Line>,
    width: usize,
    height: usize,
    /// First row of the scroll region.
    scroll_idx: usize,
    /// Number of rows in the scroll region. Always
    /// `scroll_idx + scroll_num <= height`.
    scroll_num: usize,
    /// Rows of the region touched since the region was last configured.
    scroll_fill: usize,
}

impl Page {
    pub fn new(width: usize, height: usize) -> anyhow::Result<Self> {
        anyhow::ensure!(width > 0 && height > 0, "page dimensions must be non-zero");
        let lines =
            (0..height).map(|_| Line::with_width(width, Attrs::default(), crate::AGE_NULL)).collect();
        Ok(Page {
            age: crate::AGE_NULL,
            lines,
            width,
            height,
            scroll_idx: 0,
            scroll_num: height,
            scroll_fill: 0,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn age(&self) -> Age {
        self.age
    }

    pub fn scroll_idx(&self) -> usize {
        self.scroll_idx
    }

    pub fn scroll_num(&self) -> usize {
        self.scroll_num
    }

    pub fn scroll_fill(&self) -> usize {
        self.scroll_fill
    }

    /// Total allocated rows, visible plus headroom.
    pub fn n_lines(&self) -> usize {
        self.lines.len()
    }

    fn region_end(&self) -> usize {
        self.scroll_idx + self.scroll_num
    }

    fn note_write(&mut self, y: usize) {
        if y >= self.scroll_idx && y < self.region_end() {
            self.scroll_fill = self.scroll_fill.max(y - self.scroll_idx + 1);
        }
    }

    /// Grow capacity to at least `cols` x `rows` without changing the
    /// visible size. Existing content is preserved; new cells are blank
    /// with `attr`.
    pub fn reserve(&mut self, cols: usize, rows: usize, attr: Attrs, age: Age) {
        for line in &mut self.lines {
            let protect = line.width();
            line.reserve(cols, attr, age, protect);
        }
        while self.lines.len() < rows {
            self.lines.push(Line::with_width(cols.max(self.width), attr, age));
        }
    }

    /// Change the visible size. Shrinking the height evicts rows off the
    /// top into `history` when one is supplied; growing it pulls rows
    /// back out of the history first and appends blanks after that. A
    /// width change truncates or exposes columns per line; there is no
    /// hard re-wrapping. The scroll region snaps back to the full
    /// screen.
    pub fn resize(
        &mut self,
        cols: usize,
        rows: usize,
        attr: Attrs,
        age: Age,
        mut history: Option<&mut History>,
    ) {
        if cols == 0 || rows == 0 {
            warn!("ignoring resize to zero dimension {}x{}", cols, rows);
            return;
        }

        self.reserve(cols, rows, attr, age);

        while self.height > rows {
            let line = self.lines.remove(0);
            match history.as_deref_mut() {
                Some(h) => h.push(line),
                None => {
                    // recycle the allocation as headroom
                    let mut line = line;
                    line.reset(attr, age);
                    self.lines.push(line);
                }
            }
            self.height -= 1;
        }

        while self.height < rows {
            if let Some(line) = history.as_deref_mut().and_then(|h| h.pop(cols, attr, age)) {
                self.lines.insert(0, line);
            } else if self.lines.len() <= self.height {
                self.lines.push(Line::with_width(cols, attr, age));
            } else {
                // surface a headroom line, blanked
                self.lines[self.height].reset(attr, age);
            }
            self.height += 1;
        }

        for line in &mut self.lines {
            line.set_width(cols);
        }
        for line in &mut self.lines[..rows] {
            line.set_age(age);
        }

        self.width = cols;
        self.height = rows;
        self.scroll_idx = 0;
        self.scroll_num = rows;
        self.scroll_fill = self.scroll_fill.min(rows);
        self.age = age;
    }

    /// Bounds-checked cell access; `None` outside the visible area.
    pub fn get_cell(&self, x: usize, y: usize) -> Option<&Cell> {
        if y >= self.height {
            return None;
        }
        self.lines[y].cell(x)
    }

    /// The visible line at `y`.
    pub fn line(&self, y: usize) -> Option<&Line> {
        if y >= self.height {
            return None;
        }
        self.lines.get(y)
    }

    pub fn write(
        &mut self,
        x: usize,
        y: usize,
        ch: Grapheme,
        cwidth: u8,
        attr: Attrs,
        age: Age,
        insert_mode: bool,
    ) {
        if y >= self.height {
            return;
        }
        self.lines[y].write(x, ch, cwidth, attr, age, insert_mode);
        self.note_write(y);
    }

    pub fn insert_cells(&mut self, x: usize, y: usize, num: usize, attr: Attrs, age: Age) {
        if y >= self.height {
            return;
        }
        self.lines[y].insert(x, num, attr, age);
        self.note_write(y);
    }

    pub fn delete_cells(&mut self, x: usize, y: usize, num: usize, attr: Attrs, age: Age) {
        if y >= self.height {
            return;
        }
        self.lines[y].delete(x, num, attr, age);
        self.note_write(y);
    }

    pub fn append_combchar(&mut self, x: usize, y: usize, c: char, age: Age) {
        if y >= self.height {
            return;
        }
        self.lines[y].append_combchar(x, c, age);
        self.note_write(y);
    }

    /// Blank every position from `(from_x, from_y)` to `(to_x, to_y)`
    /// inclusive, in reading order. Reversed corners are swapped;
    /// out-of-range corners are clamped to the page.
    pub fn erase(
        &mut self,
        from_x: usize,
        from_y: usize,
        to_x: usize,
        to_y: usize,
        attr: Attrs,
        age: Age,
        keep_protected: bool,
    ) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let (mut from, mut to) = ((from_y, from_x), (to_y, to_x));
        if from > to {
            mem::swap(&mut from, &mut to);
        }
        let (from_y, from_x) = (from.0.min(self.height - 1), from.1.min(self.width - 1));
        let (to_y, to_x) = (to.0.min(self.height - 1), to.1.min(self.width - 1));

        if from_y == to_y {
            self.lines[from_y].erase(from_x, to_x - from_x + 1, attr, age, keep_protected);
        } else {
            let width = self.width;
            self.lines[from_y].erase(from_x, width - from_x, attr, age, keep_protected);
            for y in from_y + 1..to_y {
                self.lines[y].erase(0, width, attr, age, keep_protected);
            }
            self.lines[to_y].erase(0, to_x + 1, attr, age, keep_protected);
        }
    }

    /// Blank the whole page.
    pub fn reset(&mut self, attr: Attrs, age: Age) {
        for line in &mut self.lines[..self.height] {
            line.reset(attr, age);
        }
        self.scroll_fill = 0;
        self.age = age;
    }

    /// Configure the scroll region as the `num`-row band starting at row
    /// `idx`. Out-of-range values are clamped; a zero-row band restores
    /// full-screen scrolling.
    pub fn set_scroll_region(&mut self, idx: usize, num: usize) {
        let idx = idx.min(self.height);
        let num = num.min(self.height - idx);
        if num == 0 {
            self.scroll_idx = 0;
            self.scroll_num = self.height;
        } else {
            self.scroll_idx = idx;
            self.scroll_num = num;
        }
        self.scroll_fill = 0;
    }

    /// Scroll the region up by `num` rows. Evicted top rows move into
    /// `history` when one is supplied; fresh blank rows appear at the
    /// bottom. Rows rotate in place, cell contents are never copied.
    pub fn scroll_up(&mut self, num: usize, attr: Attrs, age: Age, history: Option<&mut History>) {
        let num = num.min(self.scroll_num);
        if num == 0 {
            return;
        }
        let (start, end) = (self.scroll_idx, self.region_end());
        if let Some(history) = history {
            for i in 0..num {
                let fresh = Line::with_width(self.width, attr, age);
                let evicted = mem::replace(&mut self.lines[start + i], fresh);
                history.push(evicted);
            }
        } else {
            for i in 0..num {
                self.lines[start + i].reset(attr, age);
            }
        }
        self.lines[start..end].rotate_left(num);
        for line in &mut self.lines[start..end] {
            line.set_age(age);
        }
        self.scroll_fill = self.scroll_fill.saturating_sub(num);
    }

    /// Scroll the region down by `num` rows, re-populating the top from
    /// the history tail where possible and from blank rows otherwise.
    pub fn scroll_down(
        &mut self,
        num: usize,
        attr: Attrs,
        age: Age,
        mut history: Option<&mut History>,
    ) {
        let num = num.min(self.scroll_num);
        if num == 0 {
            return;
        }
        let (start, end) = (self.scroll_idx, self.region_end());
        self.lines[start..end].rotate_right(num);
        for i in (0..num).rev() {
            match history.as_deref_mut().and_then(|h| h.pop(self.width, attr, age)) {
                Some(line) => self.lines[start + i] = line,
                None => self.lines[start + i].reset(attr, age),
            }
        }
        for line in &mut self.lines[start..end] {
            line.set_age(age);
        }
        self.scroll_fill = (self.scroll_fill + num).min(self.scroll_num);
    }

    /// Open `num` blank rows at `y` by scrolling `[y, region end)` down.
    /// Rows pushed past the region bottom are discarded.
    pub fn insert_lines(&mut self, y: usize, num: usize, attr: Attrs, age: Age) {
        let end = self.region_end();
        if y >= end || y >= self.height || num == 0 {
            return;
        }
        let num = num.min(end - y);
        self.lines[y..end].rotate_right(num);
        for i in 0..num {
            self.lines[y + i].reset(attr, age);
        }
        for line in &mut self.lines[y..end] {
            line.set_age(age);
        }
    }

    /// Remove `num` rows at `y`, scrolling `[y, region end)` up and
    /// blanking the rows that appear at the region bottom.
    pub fn delete_lines(&mut self, y: usize, num: usize, attr: Attrs, age: Age) {
        let end = self.region_end();
        if y >= end || y >= self.height || num == 0 {
            return;
        }
        let num = num.min(end - y);
        self.lines[y..end].rotate_left(num);
        for i in 0..num {
            self.lines[end - num + i].reset(attr, age);
        }
        for line in &mut self.lines[y..end] {
            line.set_age(age);
        }
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in &self.lines[..self.height] {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
