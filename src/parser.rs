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

//! The DEC/ECMA-48 control sequence state machine.
//!
//! The parser consumes one decoded code point at a time and yields a
//! [`Seq`] record whenever a complete unit is recognized: a printable
//! character, a control, or an ESC/CSI/DCS/OSC sequence. The machine
//! follows the VT500-series state diagram: malformed input never errors,
//! it lands in an ignore state and the offending sequence closes with
//! [`Command::None`].
//!
//! The returned record borrows the parser's single accumulation slot, so
//! it is valid only until the next call to [`Parser::feed`]; callers
//! that need the string payload longer must copy it out.

use tracing::warn;

use crate::charset::{self, Charset};
use crate::command::{self, Command};
use crate::utf8;

/// Limit on the number of numeric parameters a sequence may carry.
pub const ARGS_MAX: usize = 16;
/// Limit on the accumulated string payload of DCS/OSC/SOS/PM/APC.
pub const ST_MAX: usize = 4096;

/// Bit assignments within [`Seq::intermediates`]: each collected
/// intermediate (0x20..0x2F) and private marker (0x3C..0x3F) sets the
/// bit `1 << (byte - 0x20)`. The digit, semicolon, and colon positions
/// stay reserved, which parks the markers in the high bits.
pub mod seq_flag {
    pub const SPACE: u32 = 1 << 0x00; // ' '
    pub const BANG: u32 = 1 << 0x01; // '!'
    pub const DQUOTE: u32 = 1 << 0x02; // '"'
    pub const HASH: u32 = 1 << 0x03; // '#'
    pub const DOLLAR: u32 = 1 << 0x04; // '$'
    pub const PERCENT: u32 = 1 << 0x05; // '%'
    pub const AMP: u32 = 1 << 0x06; // '&'
    pub const QUOTE: u32 = 1 << 0x07; // '\''
    pub const POPEN: u32 = 1 << 0x08; // '('
    pub const PCLOSE: u32 = 1 << 0x09; // ')'
    pub const MULT: u32 = 1 << 0x0A; // '*'
    pub const PLUS: u32 = 1 << 0x0B; // '+'
    pub const COMMA: u32 = 1 << 0x0C; // ','
    pub const MINUS: u32 = 1 << 0x0D; // '-'
    pub const DOT: u32 = 1 << 0x0E; // '.'
    pub const SLASH: u32 = 1 << 0x0F; // '/'
    pub const LT: u32 = 1 << 0x1C; // '<'
    pub const EQ: u32 = 1 << 0x1D; // '='
    pub const GT: u32 = 1 << 0x1E; // '>'
    pub const WHAT: u32 = 1 << 0x1F; // '?'
}

/// What kind of unit a [`Seq`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeqKind {
    /// An aborted, overflowed, or unrecognized unit. Safe to skip.
    Ignore,
    /// A printable character, carried in the terminator.
    Graphic,
    /// A C0 or C1 control.
    Control,
    /// A plain escape sequence.
    Escape,
    /// A control sequence (CSI).
    Csi,
    /// A device control string, payload in `st`.
    Dcs,
    /// An operating system command, payload in `st`.
    Osc,
}

/// One complete parsed unit.
///
/// Numeric parameters and the string payload are only meaningful for the
/// kinds that carry them; `arg` applies the per-command default for
/// parameters that were empty on the wire.
#[derive(Debug, Clone)]
pub struct Seq {
    kind: SeqKind,
    command: Command,
    terminator: char,
    intermediates: u32,
    charset: Option<Charset>,
    n_args: usize,
    args: [i32; ARGS_MAX],
    st: Vec<u8>,
}

impl Seq {
    fn new() -> Self {
        Seq {
            kind: SeqKind::Ignore,
            command: Command::None,
            terminator: '\0',
            intermediates: 0,
            charset: None,
            n_args: 0,
            args: [-1; ARGS_MAX],
            st: Vec::new(),
        }
    }

    fn clear(&mut self) {
        self.kind = SeqKind::Ignore;
        self.command = Command::None;
        self.terminator = '\0';
        self.intermediates = 0;
        self.charset = None;
        self.n_args = 0;
        self.args = [-1; ARGS_MAX];
        self.st.clear();
    }

    pub fn kind(&self) -> SeqKind {
        self.kind
    }

    pub fn command(&self) -> Command {
        self.command
    }

    /// The byte that completed the unit: the printable character for
    /// graphics, the final byte for ESC/CSI and DCS headers, the closing
    /// control for OSC.
    pub fn terminator(&self) -> char {
        self.terminator
    }

    pub fn intermediates(&self) -> u32 {
        self.intermediates
    }

    /// The charset named by an SCS designation.
    pub fn charset(&self) -> Option<Charset> {
        self.charset
    }

    /// The numeric parameters as they appeared; empty positions are -1.
    pub fn args(&self) -> &[i32] {
        &self.args[..self.n_args]
    }

    /// Parameter `idx` with `default` applied for empty or missing
    /// positions.
    pub fn arg(&self, idx: usize, default: i32) -> i32 {
        match self.args().get(idx) {
            Some(&v) if v >= 0 => v,
            _ => default,
        }
    }

    /// The string payload of OSC/DCS (and SOS/PM/APC) units.
    pub fn st(&self) -> &[u8] {
        &self.st
    }

    fn push_intermediates(&self, buf: &mut Vec<u8>) {
        for bit in 0x00..0x10u32 {
            if self.intermediates & (1 << bit) != 0 {
                buf.push(0x20 + bit as u8);
            }
        }
    }

    fn push_private_markers(&self, buf: &mut Vec<u8>) {
        for bit in 0x1C..0x20u32 {
            if self.intermediates & (1 << bit) != 0 {
                buf.push(0x20 + bit as u8);
            }
        }
    }

    /// Re-encode the unit into its byte form, C1 introducers in 7-bit
    /// guise. Lets a consumer forward or record a sequence verbatim.
    pub fn encode_into(&self, buf: &mut Vec<u8>) {
        let mut scratch = [0u8; 4];
        match self.kind {
            SeqKind::Ignore => {}
            SeqKind::Graphic => {
                buf.extend_from_slice(utf8::encode(self.terminator as u32, &mut scratch));
            }
            SeqKind::Control => {
                let cp = self.terminator as u32;
                if cp < 0x80 {
                    buf.push(cp as u8);
                } else if (0x80..=0x9F).contains(&cp) {
                    buf.push(0x1B);
                    buf.push((cp - 0x40) as u8);
                }
            }
            SeqKind::Escape => {
                buf.push(0x1B);
                self.push_intermediates(buf);
                buf.extend_from_slice(utf8::encode(self.terminator as u32, &mut scratch));
            }
            SeqKind::Csi | SeqKind::Dcs => {
                buf.push(0x1B);
                buf.push(if self.kind == SeqKind::Csi { b'[' } else { b'P' });
                self.push_private_markers(buf);
                for (i, &arg) in self.args().iter().enumerate() {
                    if i != 0 {
                        buf.push(b';');
                    }
                    if arg >= 0 {
                        let mut itoa_buf = itoa::Buffer::new();
                        buf.extend_from_slice(itoa_buf.format(arg).as_bytes());
                    }
                }
                self.push_intermediates(buf);
                buf.push(self.terminator as u8);
                if self.kind == SeqKind::Dcs {
                    buf.extend_from_slice(&self.st);
                    buf.extend_from_slice(b"\x1b\\");
                }
            }
            SeqKind::Osc => {
                buf.extend_from_slice(b"\x1b]");
                buf.extend_from_slice(&self.st);
                if self.terminator == '\u{7}' {
                    buf.push(0x07);
                } else {
                    buf.extend_from_slice(b"\x1b\\");
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Ground,
    Escape,
    EscapeInt,
    CsiEntry,
    CsiParam,
    CsiInt,
    CsiIgnore,
    DcsEntry,
    DcsParam,
    DcsInt,
    DcsPass,
    DcsIgnore,
    OscString,
    StString,
}

/// The escape sequence parser.
///
/// `is_host` selects the command vocabulary: a host parser resolves
/// sequences sent from a host to a terminal, a terminal parser resolves
/// the reports a terminal sends back.
#[derive(Debug)]
pub struct Parser {
    state: State,
    seq: Seq,
    is_host: bool,
    /// The accumulation slot still holds an emitted record; clear it on
    /// the next feed rather than at transition time, so the borrow
    /// handed to the caller stays intact.
    needs_clear: bool,
    /// A parameter position has been started but not committed.
    arg_pending: bool,
    /// Discarding sub-parameters after a colon, through the next `;`.
    sub_skip: bool,
    /// String payload overflowed; swallow the rest and close ignored.
    discard: bool,
}

impl Parser {
    pub fn new(is_host: bool) -> Self {
        Parser {
            state: State::Ground,
            seq: Seq::new(),
            is_host,
            needs_clear: false,
            arg_pending: false,
            sub_skip: false,
            discard: false,
        }
    }

    pub fn is_host(&self) -> bool {
        self.is_host
    }

    /// Drop any sequence in flight and return to ground.
    pub fn reset(&mut self) {
        self.state = State::Ground;
        self.seq.clear();
        self.needs_clear = false;
        self.arg_pending = false;
        self.sub_skip = false;
        self.discard = false;
    }

    /// Feed one code point. Returns the completed unit, if any; the
    /// borrow is valid until the next call.
    pub fn feed(&mut self, c: char) -> Option<&Seq> {
        if self.needs_clear {
            self.seq.clear();
            self.arg_pending = false;
            self.sub_skip = false;
            self.discard = false;
            self.needs_clear = false;
        }

        let cp = c as u32;

        // CAN and SUB abort whatever is in flight, from any state.
        if cp == 0x18 || cp == 0x1A {
            self.state = State::Ground;
            self.needs_clear = true;
            return self.emit_ignore(c);
        }

        match self.state {
            State::Ground => self.feed_ground(c, cp),
            State::Escape => self.feed_escape(c, cp),
            State::EscapeInt => self.feed_escape_int(c, cp),
            State::CsiEntry => self.feed_csi_entry(c, cp),
            State::CsiParam => self.feed_csi_param(c, cp),
            State::CsiInt => self.feed_csi_int(c, cp),
            State::CsiIgnore => self.feed_csi_ignore(c, cp),
            State::DcsEntry => self.feed_dcs_entry(c, cp),
            State::DcsParam => self.feed_dcs_param(c, cp),
            State::DcsInt => self.feed_dcs_int(c, cp),
            State::DcsPass => self.feed_dcs_pass(c, cp),
            State::DcsIgnore => self.feed_dcs_ignore(c, cp),
            State::OscString => self.feed_osc(c, cp),
            State::StString => self.feed_st_string(c, cp),
        }
    }

    fn enter(&mut self, state: State) -> Option<&Seq> {
        self.state = state;
        self.needs_clear = true;
        None
    }

    fn collect(&mut self, cp: u32) {
        if (0x20..=0x2F).contains(&cp) || (0x3C..=0x3F).contains(&cp) {
            self.seq.intermediates |= 1 << (cp - 0x20);
        }
    }

    /// Accumulate a digit into the open parameter position. False means
    /// the parameter budget is exhausted.
    fn param_digit(&mut self, d: u32) -> bool {
        if self.seq.n_args >= ARGS_MAX {
            return false;
        }
        if !self.sub_skip {
            let slot = &mut self.seq.args[self.seq.n_args];
            if *slot < 0 {
                *slot = d as i32;
            } else {
                *slot = slot.saturating_mul(10).saturating_add(d as i32);
            }
        }
        self.arg_pending = true;
        true
    }

    /// Commit the open parameter position. False means the budget is
    /// exhausted.
    fn param_sep(&mut self) -> bool {
        self.sub_skip = false;
        if self.seq.n_args >= ARGS_MAX {
            return false;
        }
        self.seq.n_args += 1;
        self.arg_pending = true;
        true
    }

    /// Sub-parameters are folded into their parameter position: the
    /// primary value stands, the colon tail is discarded.
    fn param_sub(&mut self) {
        self.sub_skip = true;
        self.arg_pending = true;
    }

    fn finish_args(&mut self) {
        if self.arg_pending && self.seq.n_args < ARGS_MAX {
            self.seq.n_args += 1;
        }
        self.arg_pending = false;
    }

    fn emit_ignore(&mut self, terminator: char) -> Option<&Seq> {
        self.seq.kind = SeqKind::Ignore;
        self.seq.command = Command::None;
        self.seq.terminator = terminator;
        Some(&self.seq)
    }

    /// Emit a control from ground, scrubbing leftovers of the previous
    /// sequence.
    fn emit_control(&mut self, c: char) -> Option<&Seq> {
        self.seq.n_args = 0;
        self.seq.st.clear();
        self.seq.intermediates = 0;
        self.seq.charset = None;
        self.emit_control_inline(c)
    }

    /// Emit a control without touching accumulated parameters, for the
    /// C0 codes executed in the middle of a sequence.
    fn emit_control_inline(&mut self, c: char) -> Option<&Seq> {
        self.seq.kind = SeqKind::Control;
        self.seq.terminator = c;
        self.seq.command = command::lookup_control(c as u32, self.is_host);
        if self.seq.command == Command::None {
            warn!("unrecognized control 0x{:02x}", c as u32);
        }
        Some(&self.seq)
    }

    fn emit_graphic(&mut self, c: char) -> Option<&Seq> {
        self.seq.n_args = 0;
        self.seq.st.clear();
        self.seq.intermediates = 0;
        self.seq.charset = None;
        self.seq.kind = SeqKind::Graphic;
        self.seq.terminator = c;
        self.seq.command = Command::Graphic;
        Some(&self.seq)
    }

    fn feed_ground(&mut self, c: char, cp: u32) -> Option<&Seq> {
        match cp {
            0x1B => self.enter(State::Escape),
            0x00..=0x1F => self.emit_control(c),
            0x7F => None,
            0x90 => self.enter(State::DcsEntry),
            0x98 | 0x9E | 0x9F => self.enter(State::StString),
            0x9B => self.enter(State::CsiEntry),
            0x9D => self.enter(State::OscString),
            0x80..=0x9F => self.emit_control(c),
            _ => self.emit_graphic(c),
        }
    }

    fn dispatch_escape(&mut self, c: char) -> Option<&Seq> {
        self.state = State::Ground;
        self.needs_clear = true;
        self.seq.kind = SeqKind::Escape;
        self.seq.terminator = c;
        if let Some(d) = charset::designation(self.seq.intermediates, c) {
            self.seq.charset = Some(d.charset);
            self.seq.command = match d.slot {
                0 => Command::ScsG0,
                1 => Command::ScsG1,
                2 => Command::ScsG2,
                _ => Command::ScsG3,
            };
        } else {
            self.seq.command =
                command::lookup_escape(self.seq.intermediates, c, self.is_host);
            if self.seq.command == Command::None {
                warn!("unrecognized escape sequence final {:?}", c);
            }
        }
        Some(&self.seq)
    }

    fn feed_escape(&mut self, c: char, cp: u32) -> Option<&Seq> {
        match cp {
            0x1B => self.enter(State::Escape),
            0x00..=0x1F => self.emit_control_inline(c),
            0x20..=0x2F => {
                self.collect(cp);
                self.state = State::EscapeInt;
                None
            }
            0x50 => {
                self.state = State::DcsEntry;
                None
            }
            0x58 | 0x5E | 0x5F => {
                self.state = State::StString;
                None
            }
            0x5B => {
                self.state = State::CsiEntry;
                None
            }
            0x5D => {
                self.state = State::OscString;
                None
            }
            0x30..=0x7E => self.dispatch_escape(c),
            _ => None,
        }
    }

    fn feed_escape_int(&mut self, c: char, cp: u32) -> Option<&Seq> {
        match cp {
            0x1B => self.enter(State::Escape),
            0x00..=0x1F => self.emit_control_inline(c),
            0x20..=0x2F => {
                self.collect(cp);
                None
            }
            0x30..=0x7E => self.dispatch_escape(c),
            _ => None,
        }
    }

    fn dispatch_csi(&mut self, c: char) -> Option<&Seq> {
        self.finish_args();
        self.state = State::Ground;
        self.needs_clear = true;
        self.seq.kind = SeqKind::Csi;
        self.seq.terminator = c;
        self.seq.command = command::lookup_csi(self.seq.intermediates, c, self.is_host);
        if self.seq.command == Command::None {
            warn!(
                "unrecognized CSI final {:?} with intermediates 0x{:x}",
                c, self.seq.intermediates
            );
        }
        Some(&self.seq)
    }

    fn feed_csi_entry(&mut self, c: char, cp: u32) -> Option<&Seq> {
        match cp {
            0x1B => self.enter(State::Escape),
            0x00..=0x1F => self.emit_control_inline(c),
            0x20..=0x2F => {
                self.collect(cp);
                self.state = State::CsiInt;
                None
            }
            0x30..=0x39 => {
                self.param_digit(cp - 0x30);
                self.state = State::CsiParam;
                None
            }
            0x3A => {
                self.param_sub();
                self.state = State::CsiParam;
                None
            }
            0x3B => {
                self.param_sep();
                self.state = State::CsiParam;
                None
            }
            0x3C..=0x3F => {
                self.collect(cp);
                self.state = State::CsiParam;
                None
            }
            0x40..=0x7E => self.dispatch_csi(c),
            _ => None,
        }
    }

    fn feed_csi_param(&mut self, c: char, cp: u32) -> Option<&Seq> {
        match cp {
            0x1B => self.enter(State::Escape),
            0x00..=0x1F => self.emit_control_inline(c),
            0x20..=0x2F => {
                self.collect(cp);
                self.state = State::CsiInt;
                None
            }
            0x30..=0x39 => {
                if !self.param_digit(cp - 0x30) {
                    self.state = State::CsiIgnore;
                }
                None
            }
            0x3A => {
                self.param_sub();
                None
            }
            0x3B => {
                if !self.param_sep() {
                    self.state = State::CsiIgnore;
                }
                None
            }
            0x3C..=0x3F => {
                self.state = State::CsiIgnore;
                None
            }
            0x40..=0x7E => self.dispatch_csi(c),
            _ => None,
        }
    }

    fn feed_csi_int(&mut self, c: char, cp: u32) -> Option<&Seq> {
        match cp {
            0x1B => self.enter(State::Escape),
            0x00..=0x1F => self.emit_control_inline(c),
            0x20..=0x2F => {
                self.collect(cp);
                None
            }
            0x30..=0x3F => {
                self.state = State::CsiIgnore;
                None
            }
            0x40..=0x7E => self.dispatch_csi(c),
            _ => None,
        }
    }

    fn feed_csi_ignore(&mut self, c: char, cp: u32) -> Option<&Seq> {
        match cp {
            0x1B => self.enter(State::Escape),
            0x00..=0x1F => self.emit_control_inline(c),
            0x40..=0x7E => {
                self.state = State::Ground;
                self.needs_clear = true;
                self.emit_ignore(c)
            }
            _ => None,
        }
    }

    fn hook_dcs(&mut self, c: char) -> Option<&Seq> {
        self.finish_args();
        self.seq.terminator = c;
        self.seq.st.clear();
        self.state = State::DcsPass;
        None
    }

    fn dispatch_dcs(&mut self) -> Option<&Seq> {
        self.needs_clear = true;
        if self.discard {
            self.seq.kind = SeqKind::Ignore;
            self.seq.command = Command::None;
        } else {
            self.seq.kind = SeqKind::Dcs;
            self.seq.command =
                command::lookup_dcs(self.seq.intermediates, self.seq.terminator, self.is_host);
            if self.seq.command == Command::None {
                warn!("unrecognized DCS final {:?}", self.seq.terminator);
            }
        }
        Some(&self.seq)
    }

    fn feed_dcs_entry(&mut self, c: char, cp: u32) -> Option<&Seq> {
        match cp {
            0x1B => self.enter(State::Escape),
            0x20..=0x2F => {
                self.collect(cp);
                self.state = State::DcsInt;
                None
            }
            0x30..=0x39 => {
                self.param_digit(cp - 0x30);
                self.state = State::DcsParam;
                None
            }
            0x3A => {
                self.param_sub();
                self.state = State::DcsParam;
                None
            }
            0x3B => {
                self.param_sep();
                self.state = State::DcsParam;
                None
            }
            0x3C..=0x3F => {
                self.collect(cp);
                self.state = State::DcsParam;
                None
            }
            0x40..=0x7E => self.hook_dcs(c),
            _ => None,
        }
    }

    fn feed_dcs_param(&mut self, c: char, cp: u32) -> Option<&Seq> {
        match cp {
            0x1B => self.enter(State::Escape),
            0x20..=0x2F => {
                self.collect(cp);
                self.state = State::DcsInt;
                None
            }
            0x30..=0x39 => {
                if !self.param_digit(cp - 0x30) {
                    self.state = State::DcsIgnore;
                }
                None
            }
            0x3A => {
                self.param_sub();
                None
            }
            0x3B => {
                if !self.param_sep() {
                    self.state = State::DcsIgnore;
                }
                None
            }
            0x3C..=0x3F => {
                self.state = State::DcsIgnore;
                None
            }
            0x40..=0x7E => self.hook_dcs(c),
            _ => None,
        }
    }

    fn feed_dcs_int(&mut self, c: char, cp: u32) -> Option<&Seq> {
        match cp {
            0x1B => self.enter(State::Escape),
            0x20..=0x2F => {
                self.collect(cp);
                None
            }
            0x30..=0x3F => {
                self.state = State::DcsIgnore;
                None
            }
            0x40..=0x7E => self.hook_dcs(c),
            _ => None,
        }
    }

    fn st_put(&mut self, c: char) {
        if self.discard {
            return;
        }
        let mut scratch = [0u8; 4];
        let bytes = utf8::encode(c as u32, &mut scratch);
        if self.seq.st.len() + bytes.len() > ST_MAX {
            warn!("string payload exceeds {} bytes, ignoring the rest", ST_MAX);
            self.discard = true;
            return;
        }
        self.seq.st.extend_from_slice(bytes);
    }

    fn feed_dcs_pass(&mut self, c: char, cp: u32) -> Option<&Seq> {
        match cp {
            0x1B => {
                self.state = State::Escape;
                self.dispatch_dcs()
            }
            0x9C => {
                self.state = State::Ground;
                self.dispatch_dcs()
            }
            0x80..=0x9F => None,
            _ => {
                self.st_put(c);
                None
            }
        }
    }

    fn feed_dcs_ignore(&mut self, c: char, cp: u32) -> Option<&Seq> {
        match cp {
            0x1B => {
                self.state = State::Escape;
                self.needs_clear = true;
                self.emit_ignore(c)
            }
            0x9C => {
                self.state = State::Ground;
                self.needs_clear = true;
                self.emit_ignore(c)
            }
            _ => None,
        }
    }

    fn dispatch_osc(&mut self, terminator: char) -> Option<&Seq> {
        self.needs_clear = true;
        self.seq.terminator = terminator;
        if self.discard {
            self.seq.kind = SeqKind::Ignore;
            self.seq.command = Command::None;
        } else {
            self.seq.kind = SeqKind::Osc;
            self.seq.command = command::lookup_osc(&self.seq.st, self.is_host);
        }
        Some(&self.seq)
    }

    fn feed_osc(&mut self, c: char, cp: u32) -> Option<&Seq> {
        match cp {
            0x07 => {
                self.state = State::Ground;
                self.dispatch_osc(c)
            }
            0x1B => {
                self.state = State::Escape;
                self.dispatch_osc(c)
            }
            0x9C => {
                self.state = State::Ground;
                self.dispatch_osc(c)
            }
            0x00..=0x1F | 0x7F | 0x80..=0x9F => None,
            _ => {
                self.st_put(c);
                None
            }
        }
    }

    /// SOS, PM, and APC: the payload accumulates like an OSC but the
    /// unit always closes ignored; the engine assigns it no meaning.
    fn feed_st_string(&mut self, c: char, cp: u32) -> Option<&Seq> {
        match cp {
            0x1B => {
                self.state = State::Escape;
                self.needs_clear = true;
                self.seq.terminator = c;
                self.seq.kind = SeqKind::Ignore;
                self.seq.command = Command::None;
                Some(&self.seq)
            }
            0x9C => {
                self.state = State::Ground;
                self.needs_clear = true;
                self.seq.terminator = c;
                self.seq.kind = SeqKind::Ignore;
                self.seq.command = Command::None;
                Some(&self.seq)
            }
            0x00..=0x1F | 0x7F | 0x80..=0x9F => None,
            _ => {
                self.st_put(c);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_str(parser: &mut Parser, s: &str) -> Vec<(SeqKind, Command)> {
        let mut out = vec![];
        for c in s.chars() {
            if let Some(seq) = parser.feed(c) {
                out.push((seq.kind(), seq.command()));
            }
        }
        out
    }

    #[test]
    fn graphics_and_controls() {
        let mut p = Parser::new(true);
        let out = feed_str(&mut p, "a\rb");
        assert_eq!(out, vec![
            (SeqKind::Graphic, Command::Graphic),
            (SeqKind::Control, Command::Cr),
            (SeqKind::Graphic, Command::Graphic),
        ]);
    }

    #[test]
    fn csi_with_params() {
        let mut p = Parser::new(true);
        let mut got = None;
        for c in "\x1b[1;5H".chars() {
            if let Some(seq) = p.feed(c) {
                got = Some((seq.kind(), seq.command(), seq.args().to_vec()));
            }
        }
        assert_eq!(got, Some((SeqKind::Csi, Command::Cup, vec![1, 5])));
    }

    #[test]
    fn empty_params_default_to_minus_one() {
        let mut p = Parser::new(true);
        let mut got = None;
        for c in "\x1b[;5H".chars() {
            if let Some(seq) = p.feed(c) {
                got = Some((seq.args().to_vec(), seq.arg(0, 1), seq.arg(1, 1)));
            }
        }
        assert_eq!(got, Some((vec![-1, 5], 1, 5)));
    }

    #[test]
    fn can_aborts_a_sequence() {
        let mut p = Parser::new(true);
        let mut kinds = vec![];
        for c in "\x1b[12\u{18}A".chars() {
            if let Some(seq) = p.feed(c) {
                kinds.push((seq.kind(), seq.command()));
            }
        }
        assert_eq!(kinds, vec![
            (SeqKind::Ignore, Command::None),
            (SeqKind::Graphic, Command::Graphic),
        ]);
    }

    #[test]
    fn controls_execute_inside_a_sequence() {
        let mut p = Parser::new(true);
        let mut out = vec![];
        for c in "\x1b[1\r;2H".chars() {
            if let Some(seq) = p.feed(c) {
                out.push((seq.kind(), seq.command(), seq.args().to_vec()));
            }
        }
        assert_eq!(out, vec![
            (SeqKind::Control, Command::Cr, vec![]),
            (SeqKind::Csi, Command::Cup, vec![1, 2]),
        ]);
    }

    #[test]
    fn colon_subparams_fold_into_their_position() {
        let mut p = Parser::new(true);
        let mut got = None;
        for c in "\x1b[38:2:10:20:30m".chars() {
            if let Some(seq) = p.feed(c) {
                got = Some((seq.command(), seq.args().to_vec()));
            }
        }
        assert_eq!(got, Some((Command::Sgr, vec![38])));
    }

    #[test]
    fn too_many_params_close_ignored() {
        let mut p = Parser::new(true);
        let input = format!("\x1b[{}H", "1;".repeat(20));
        let mut got = None;
        for c in input.chars() {
            if let Some(seq) = p.feed(c) {
                got = Some((seq.kind(), seq.command()));
            }
        }
        assert_eq!(got, Some((SeqKind::Ignore, Command::None)));

        // and the parser is back in business afterwards
        let out = feed_str(&mut p, "x");
        assert_eq!(out, vec![(SeqKind::Graphic, Command::Graphic)]);
    }

    #[test]
    fn encode_round_trips_a_csi() {
        let mut p = Parser::new(true);
        let mut buf = vec![];
        for c in "\x1b[1;5H".chars() {
            if let Some(seq) = p.feed(c) {
                seq.encode_into(&mut buf);
            }
        }
        assert_eq!(buf, b"\x1b[1;5H");
    }

    #[test]
    fn encode_preserves_markers_and_intermediates() {
        let mut p = Parser::new(true);
        let mut buf = vec![];
        for c in "\x1b[?25h\x1b[2 q".chars() {
            if let Some(seq) = p.feed(c) {
                seq.encode_into(&mut buf);
            }
        }
        assert_eq!(buf, b"\x1b[?25h\x1b[2 q");
    }
}
