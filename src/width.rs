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

//! Column width tables for UCS-4 code points.

use unicode_width::UnicodeWidthChar;

/// The number of columns `c` occupies in a cell grid, assuming the
/// Unicode East-Asian-Width=Narrow resolution for ambiguous characters.
///
/// `None` means the code point is not printable (control characters and
/// friends); `Some(0)` marks zero-width combining marks.
pub fn cell_width(c: char) -> Option<u8> {
    UnicodeWidthChar::width(c).map(|w| w.min(2) as u8)
}

/// Like [`cell_width`], but resolves East-Asian ambiguous characters as
/// wide, for use with legacy CJK locales and fonts.
pub fn cell_width_cjk(c: char) -> Option<u8> {
    UnicodeWidthChar::width_cjk(c).map(|w| w.min(2) as u8)
}
