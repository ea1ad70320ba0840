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

//! The core of a VT-compatible terminal emulator.
//!
//! Bytes from a pty flow through the lenient UTF-8 [`utf8::Decoder`]
//! into the [`Parser`], which recognizes the DEC/ECMA-48 vocabulary and
//! yields typed [`Seq`] records. An interpreter (not part of this crate)
//! dispatches those records as mutations on a [`Page`] of cells, which
//! evicts scrolled-off rows into a [`History`]. Every mutation stamps an
//! age; a renderer that remembers the age of its last frame walks the
//! page and redraws exactly what changed since.
//!
//! Everything here is synchronous and single-threaded: one page, one
//! parser, one owner.

pub mod attrs;
pub mod cell;
pub mod charset;
pub mod command;
pub mod grapheme;
pub mod history;
pub mod line;
pub mod page;
pub mod parser;
pub mod utf8;
pub mod width;

pub use attrs::{Attrs, Color, NamedColor};
pub use cell::Cell;
pub use charset::Charset;
pub use command::Command;
pub use grapheme::Grapheme;
pub use history::History;
pub use line::Line;
pub use page::Page;
pub use parser::{Parser, Seq, SeqKind};

/// A monotonically increasing mutation counter. Renderers compare cell
/// and line ages against the age of their last frame: anything newer
/// needs a redraw.
pub type Age = u64;

/// The null age: a cell or line stamped with it is always redrawn, and a
/// renderer holding it redraws everything. Counters skip it when they
/// wrap.
pub const AGE_NULL: Age = 0;

/// A parser fed directly from a byte stream: the UTF-8 decoder and the
/// sequence parser glued together the way nearly every consumer wants
/// them.
#[derive(Debug)]
pub struct Stream {
    decoder: utf8::Decoder,
    parser: Parser,
}

impl Stream {
    /// A byte-fed parser. `is_host` picks the command vocabulary, see
    /// [`Parser::new`].
    pub fn new(is_host: bool) -> Self {
        Stream { decoder: utf8::Decoder::new(), parser: Parser::new(is_host) }
    }

    /// Feed a chunk of raw bytes, handing every completed sequence to
    /// `dispatch`. This should be the data read off a pty.
    pub fn advance(&mut self, bytes: &[u8], mut dispatch: impl FnMut(&Seq)) {
        for &byte in bytes {
            let chars = self.decoder.feed(byte);
            for &c in chars {
                if let Some(seq) = self.parser.feed(c) {
                    dispatch(seq);
                }
            }
        }
    }

    pub fn parser(&self) -> &Parser {
        &self.parser
    }

    /// Drop any partial byte sequence and any escape sequence in flight.
    pub fn reset(&mut self) {
        self.decoder = utf8::Decoder::new();
        self.parser.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_glues_decoder_and_parser() {
        let mut stream = Stream::new(true);
        let mut seen = vec![];
        stream.advance("h\x1b[2Ji".as_bytes(), |seq| {
            seen.push((seq.kind(), seq.command(), seq.terminator()));
        });
        assert_eq!(seen, vec![
            (SeqKind::Graphic, Command::Graphic, 'h'),
            (SeqKind::Csi, Command::Ed, 'J'),
            (SeqKind::Graphic, Command::Graphic, 'i'),
        ]);
    }

    #[test]
    fn stream_survives_invalid_utf8() {
        let mut stream = Stream::new(true);
        let mut seen = vec![];
        stream.advance(&[0xC3, 0x28], |seq| {
            seen.push((seq.kind(), seq.terminator()));
        });
        assert_eq!(seen, vec![
            (SeqKind::Graphic, '\u{C3}'),
            (SeqKind::Graphic, '('),
        ]);
    }
}
