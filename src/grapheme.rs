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

//! The compact grapheme-cluster handle stored in every cell.

use smallvec::SmallVec;

use crate::width;

/// The contents of one cell: a base code point plus any number of
/// combining marks. The empty cluster is the null character (a blank
/// cell).
///
/// Up to three code points live inline; longer clusters spill to the
/// heap. The overwhelmingly common case is a single code point, so the
/// inline representation keeps cell storage allocation-free.
#[derive(Clone, Eq, PartialEq, Hash, Default)]
pub struct Grapheme {
    chars: SmallVec<[char; 3]>,
}

// Prove that the inline capacity of 3 is free: a SmallVec is a
// discriminated union between the inline array and the heap (pointer,
// capacity) pair, so anything up to the heap variant's size costs
// nothing extra.
static_assertions::const_assert!(
    (std::mem::size_of::<SmallVec<[char; 3]>>() == std::mem::size_of::<SmallVec<[char; 2]>>())
        || std::mem::size_of::<usize>() != 8
);

impl Grapheme {
    /// The null cluster (an empty cell).
    pub fn null() -> Self {
        Self::default()
    }

    /// A cluster holding the single base code point `base`.
    pub fn from_base(base: char) -> Self {
        let mut g = Self::default();
        g.set(base);
        g
    }

    /// Replace the cluster with the single code point `base`. A NUL base
    /// yields the null cluster. Any spilled storage held by the previous
    /// contents is released.
    pub fn set(&mut self, base: char) {
        self.chars.clear();
        self.chars.shrink_to_fit();
        if base != '\0' {
            self.chars.push(base);
        }
    }

    /// Append a combining code point. Merging onto the null cluster
    /// adopts the mark as a base.
    pub fn merge(&mut self, cc: char) {
        if cc == '\0' {
            return;
        }
        self.chars.push(cc);
    }

    /// The code points of the cluster, base first. Empty for null.
    pub fn resolve(&self) -> &[char] {
        &self.chars
    }

    pub fn base(&self) -> Option<char> {
        self.chars.first().copied()
    }

    pub fn is_null(&self) -> bool {
        self.chars.is_empty()
    }

    /// True if the cluster no longer fits inline and owns heap storage.
    pub fn is_spilled(&self) -> bool {
        self.chars.spilled()
    }

    /// Column width of the cluster, taken from its base code point. The
    /// null cluster is a blank cell and occupies one column.
    pub fn width(&self, cjk: bool) -> u8 {
        let Some(base) = self.base() else {
            return 1;
        };
        let w = if cjk {
            width::cell_width_cjk(base)
        } else {
            width::cell_width(base)
        };
        // Non-printables never reach cell storage; if one does, render
        // it narrow rather than corrupting the grid.
        w.unwrap_or(1)
    }
}

impl std::fmt::Display for Grapheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for c in &self.chars {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Grapheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_null() {
            return write!(f, "<null>");
        }
        write!(f, "<")?;
        for c in &self.chars {
            write!(f, "{}", c.escape_debug())?;
        }
        write!(f, ">")
    }
}
