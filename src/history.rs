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

//! Scrollback storage.
//!
//! A FIFO of lines evicted off the top of a page's scroll region. The
//! newest line sits at the tail; scrolling back down pops it first.
//! Lines are moved in and out whole, never copied cell by cell, and a
//! parked line keeps whatever width it had when it was evicted; `pop`
//! reconciles it with the page width of the moment.

use std::collections::VecDeque;

use crate::attrs::Attrs;
use crate::line::Line;
use crate::Age;

#[derive(Debug, Clone, Default)]
pub struct History {
    lines: VecDeque<Line>,
    max_lines: usize,
}

impl History {
    pub fn new(max_lines: usize) -> Self {
        History { lines: VecDeque::new(), max_lines }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn max_lines(&self) -> usize {
        self.max_lines
    }

    /// Append a line at the tail, dropping the oldest entry if the cap
    /// is already reached. A zero cap stores nothing.
    pub fn push(&mut self, line: Line) {
        if self.max_lines == 0 {
            return;
        }
        while self.lines.len() >= self.max_lines {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    /// Detach the most recent line and re-shape it to `width` so it can
    /// rejoin a page. Content within the smaller of the two widths is
    /// preserved.
    pub fn pop(&mut self, width: usize, attr: Attrs, age: Age) -> Option<Line> {
        let mut line = self.lines.pop_back()?;
        let protect = line.width();
        line.reserve(width, attr, age, protect);
        line.set_width(width);
        Some(line)
    }

    /// How many lines a caller could pop, bounded by `max`.
    pub fn peek(&self, max: usize) -> usize {
        self.lines.len().min(max)
    }

    /// Drop lines from the head until at most `max` remain. Does not
    /// change the configured cap.
    pub fn trim(&mut self, max: usize) {
        while self.lines.len() > max {
            self.lines.pop_front();
        }
    }

    /// Change the cap, dropping the oldest lines if necessary.
    pub fn set_max_lines(&mut self, max_lines: usize) {
        self.trim(max_lines);
        self.max_lines = max_lines;
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Walk stored lines oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter()
    }

    /// The `idx`-th stored line, oldest first.
    pub fn line(&self, idx: usize) -> Option<&Line> {
        self.lines.get(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grapheme::Grapheme;

    fn tagged_line(tag: char, width: usize) -> Line {
        let mut line = Line::with_width(width, Attrs::default(), 1);
        let g = Grapheme::from_base(tag);
        line.write(0, g, 1, Attrs::default(), 1, false);
        line
    }

    #[test]
    fn push_respects_cap() {
        let mut history = History::new(3);
        for tag in ['a', 'b', 'c', 'd', 'e'] {
            history.push(tagged_line(tag, 4));
        }
        assert_eq!(history.len(), 3);
        // Oldest entries were dropped from the head.
        assert_eq!(format!("{}", history.line(0).unwrap()), "c   ");
        assert_eq!(format!("{}", history.line(2).unwrap()), "e   ");
    }

    #[test]
    fn zero_cap_stores_nothing() {
        let mut history = History::new(0);
        history.push(tagged_line('a', 4));
        assert!(history.is_empty());
    }

    #[test]
    fn pop_is_lifo_and_reshapes() {
        let mut history = History::new(10);
        history.push(tagged_line('a', 4));
        history.push(tagged_line('b', 4));

        let line = history.pop(8, Attrs::default(), 2).unwrap();
        assert_eq!(line.width(), 8);
        assert_eq!(format!("{}", line), "b       ");
        assert_eq!(history.len(), 1);

        // Narrower pops truncate the visible width but keep capacity.
        let line = history.pop(2, Attrs::default(), 2).unwrap();
        assert_eq!(line.width(), 2);
        assert_eq!(format!("{}", line), "a ");

        assert!(history.pop(2, Attrs::default(), 2).is_none());
    }

    #[test]
    fn peek_counts_without_removing() {
        let mut history = History::new(10);
        history.push(tagged_line('a', 4));
        history.push(tagged_line('b', 4));
        assert_eq!(history.peek(1), 1);
        assert_eq!(history.peek(5), 2);
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn trim_and_clear_drop_from_head() {
        let mut history = History::new(10);
        for tag in ['a', 'b', 'c', 'd'] {
            history.push(tagged_line(tag, 4));
        }
        history.trim(2);
        assert_eq!(history.len(), 2);
        assert_eq!(format!("{}", history.line(0).unwrap()), "c   ");

        history.clear();
        assert!(history.is_empty());
    }
}
