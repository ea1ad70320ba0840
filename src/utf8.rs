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

//! Streaming UTF-8 decoding with a lenient Latin-1 fallback, plus the
//! matching encoder.
//!
//! Terminals cannot reject input: a peer that feeds us ISO 8859-1 or raw
//! DEC data still expects something sensible on screen. The decoder
//! therefore never fails. Whenever a byte cannot continue the pending
//! sequence, the buffered bytes are replayed one-by-one as Latin-1 code
//! points and the offending byte is processed again from a clean state.

/// Stateful byte-at-a-time UTF-8 decoder.
#[derive(Debug, Default)]
pub struct Decoder {
    /// Raw bytes of the pending multi-byte sequence, kept for Latin-1
    /// replay on error.
    buf: [u8; 4],
    n_buf: usize,
    /// Continuation bytes still required to complete the sequence.
    need: usize,
    /// Partially accumulated code point.
    cp: u32,
    /// Valid range for the next continuation byte. The first continuation
    /// carries the overlong/surrogate/range restrictions of its lead.
    lower: u8,
    upper: u8,
    /// Backing storage for the slice returned by `feed`.
    out: [char; 5],
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one byte. Returns the code points resolved by this byte; an
    /// empty slice means the byte was buffered and more input is needed.
    pub fn feed(&mut self, byte: u8) -> &[char] {
        let mut n = 0;
        self.step(byte, &mut n);
        &self.out[..n]
    }

    /// True if the decoder sits between sequences.
    pub fn is_ground(&self) -> bool {
        self.need == 0
    }

    fn emit(&mut self, c: char, n: &mut usize) {
        self.out[*n] = c;
        *n += 1;
    }

    fn start(&mut self, byte: u8, bits: u32, need: usize, lower: u8, upper: u8) {
        self.buf[0] = byte;
        self.n_buf = 1;
        self.cp = bits;
        self.need = need;
        self.lower = lower;
        self.upper = upper;
    }

    fn reset(&mut self) {
        self.n_buf = 0;
        self.need = 0;
        self.cp = 0;
    }

    fn step(&mut self, byte: u8, n: &mut usize) {
        if self.need == 0 {
            match byte {
                0x00..=0x7F => self.emit(byte as char, n),
                0xC2..=0xDF => self.start(byte, (byte & 0x1F) as u32, 1, 0x80, 0xBF),
                0xE0 => self.start(byte, 0, 2, 0xA0, 0xBF),
                0xE1..=0xEC | 0xEE..=0xEF => {
                    self.start(byte, (byte & 0x0F) as u32, 2, 0x80, 0xBF)
                }
                0xED => self.start(byte, 0x0D, 2, 0x80, 0x9F),
                0xF0 => self.start(byte, 0, 3, 0x90, 0xBF),
                0xF1..=0xF3 => self.start(byte, (byte & 0x07) as u32, 3, 0x80, 0xBF),
                0xF4 => self.start(byte, 0x04, 3, 0x80, 0x8F),
                // Stray continuations, overlong leads (C0/C1), and
                // F5..FF cannot begin a sequence: fall back to Latin-1.
                _ => self.emit(byte as char, n),
            }
            return;
        }

        if byte >= self.lower && byte <= self.upper {
            self.buf[self.n_buf] = byte;
            self.n_buf += 1;
            self.cp = (self.cp << 6) | (byte & 0x3F) as u32;
            self.need -= 1;
            if self.need == 0 {
                let c = char::from_u32(self.cp).unwrap_or('\u{FFFD}');
                self.reset();
                self.emit(c, n);
            } else {
                self.lower = 0x80;
                self.upper = 0xBF;
            }
            return;
        }

        // The sequence is broken. Replay what we buffered as Latin-1,
        // then give the offending byte a fresh chance: it may itself
        // start a valid sequence.
        for i in 0..self.n_buf {
            let b = self.buf[i];
            self.emit(b as char, n);
        }
        self.reset();
        self.step(byte, n);
    }
}

/// Encode `cp` as UTF-8 into `buf`, returning the encoded prefix.
/// Surrogates and out-of-range values encode as U+FFFD.
pub fn encode(cp: u32, buf: &mut [u8; 4]) -> &[u8] {
    let c = char::from_u32(cp).unwrap_or('\u{FFFD}');
    c.encode_utf8(buf).as_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_all(bytes: &[u8]) -> Vec<char> {
        let mut d = Decoder::new();
        let mut out = vec![];
        for &b in bytes {
            out.extend_from_slice(d.feed(b));
        }
        out
    }

    #[test]
    fn ascii_passes_through() {
        assert_eq!(decode_all(b"hi!"), vec!['h', 'i', '!']);
    }

    #[test]
    fn multi_byte_sequences() {
        assert_eq!(decode_all("é".as_bytes()), vec!['é']);
        assert_eq!(decode_all("あ".as_bytes()), vec!['あ']);
        assert_eq!(decode_all("😊".as_bytes()), vec!['😊']);
    }

    #[test]
    fn split_feeding_buffers() {
        let mut d = Decoder::new();
        let bytes = "あ".as_bytes();
        assert!(d.feed(bytes[0]).is_empty());
        assert!(d.feed(bytes[1]).is_empty());
        assert_eq!(d.feed(bytes[2]), ['あ']);
    }

    #[test]
    fn invalid_continuation_falls_back_to_latin1() {
        // C3 28: a lead byte followed by '(' instead of a continuation.
        assert_eq!(decode_all(&[0xC3, 0x28]), vec!['\u{C3}', '(']);
    }

    #[test]
    fn stray_continuation_is_latin1() {
        assert_eq!(decode_all(&[0xA9]), vec!['\u{A9}']);
    }

    #[test]
    fn broken_lead_restarts_cleanly() {
        // The second C3 aborts the first sequence but starts its own,
        // which then completes as é.
        assert_eq!(decode_all(&[0xC3, 0xC3, 0xA9]), vec!['\u{C3}', 'é']);
    }

    #[test]
    fn overlong_and_surrogate_leads_rejected() {
        // C0 80 would be an overlong NUL.
        assert_eq!(decode_all(&[0xC0, 0x80]), vec!['\u{C0}', '\u{80}']);
        // ED A0 80 would be a surrogate.
        assert_eq!(decode_all(&[0xED, 0xA0, 0x80]), vec![
            '\u{ED}', '\u{A0}', '\u{80}'
        ]);
    }

    #[test]
    fn encode_round_trips() {
        let mut buf = [0u8; 4];
        for cp in [0x24u32, 0xA2, 0x20AC, 0x1F600] {
            let bytes = encode(cp, &mut buf).to_vec();
            let decoded = decode_all(&bytes);
            assert_eq!(decoded, vec![char::from_u32(cp).unwrap()]);
        }
    }

    #[test]
    fn encode_normalizes_invalid() {
        let mut buf = [0u8; 4];
        assert_eq!(encode(0xD800, &mut buf), "\u{FFFD}".as_bytes());
        let mut buf = [0u8; 4];
        assert_eq!(encode(0x110000, &mut buf), "\u{FFFD}".as_bytes());
    }
}
