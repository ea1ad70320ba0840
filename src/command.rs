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

//! The command vocabulary of the VT500 family plus the xterm extensions
//! in common use, and the lookup tables that resolve a finished escape
//! sequence to one of them.
//!
//! Lookups are keyed on the sequence type, the final byte, the collected
//! intermediates, and which side of the wire the parser watches: a host
//! parser resolves the sequences a host sends to a terminal, a terminal
//! parser resolves the reports and key input a terminal sends back.

use crate::parser::seq_flag;

/// Everything the parser can resolve a sequence to. Dispatchers that
/// meet `None` should skip the sequence; the parser has already logged
/// it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Command {
    /// Unrecognized, malformed, or deliberately ignored.
    None,
    /// A printable character; the payload is the sequence terminator.
    Graphic,

    // C0/C1 controls
    Null,
    Enq,
    Bel,
    Bs,
    Ht,
    Lf,
    Vt,
    Ff,
    Cr,
    So,
    Si,
    Dc1,
    Dc3,
    Ind,
    Nel,
    Hts,
    Ri,
    Ss2,
    Ss3,
    Spa,
    Epa,
    Decid,
    St,

    // plain and intermediate escape sequences
    Decsc,
    Decrc,
    Decbi,
    Decfi,
    Deckpam,
    Deckpnm,
    Ris,
    Ls2,
    Ls3,
    Ls1r,
    Ls2r,
    Ls3r,
    DecdhlTop,
    DecdhlBottom,
    Decswl,
    Decdwl,
    Decaln,
    S7c1t,
    S8c1t,
    SelectDefaultCharset,
    SelectUtf8Charset,
    /// Designate a charset into G0..G3; the sequence's charset field
    /// names it.
    ScsG0,
    ScsG1,
    ScsG2,
    ScsG3,

    // cursor movement
    Cuu,
    Cud,
    Cuf,
    Cub,
    Cup,
    Cnl,
    Cpl,
    Cha,
    Hvp,
    Hpa,
    Hpr,
    Vpa,
    Vpr,

    // text edits
    Ich,
    Dch,
    Ech,
    Ed,
    El,
    Il,
    Dl,
    Rep,
    Decsed,
    Decsel,

    // scrolling
    Su,
    Sd,
    Sl,
    Sr,
    Decstbm,
    DecslrmOrSc,
    Decic,
    Decdc,

    // tabs
    Cht,
    Cbt,
    Tbc,
    Decst8c,

    // modes
    SmAnsi,
    RmAnsi,
    SmDec,
    RmDec,
    DecrqmAnsi,
    DecrqmDec,
    Decrpm,
    Decscl,
    Decscusr,
    Decsca,
    Dectme,

    // attributes
    Sgr,

    // rectangular area operations
    Deccara,
    Deccra,
    Decera,
    Decfra,
    Decrara,
    Decsera,
    Decsace,
    Decrqcra,

    // reports
    Da1,
    Da2,
    Da3,
    DsrAnsi,
    DsrDec,
    Cpr,
    Decxcpr,
    Decrqpsr,
    Decreqtparm,
    Decrqtsr,
    Decrqupss,
    Dectabsr,

    // printing and media copy
    McAnsi,
    McDec,

    // resets and state save
    Decstr,
    Scorc,

    // keyboard, bells, locator and the DEC compatibility tail
    Decll,
    Decswbv,
    Decsmbv,
    Decsle,
    Decelr,
    Decefr,
    Decrqlp,
    Decsnls,
    Decscpp,
    Decslpp,
    Decsasd,
    Decssdt,
    Dectst,
    Decinvm,

    // device control strings
    Decrqss,
    Decudk,
    Decaupss,
    Decrsps,
    XtermGettcap,
    XtermSettcap,

    // xterm private controls
    XtermWm,
    XtermModkeys,
    XtermDisableModkeys,
    XtermSpm,
    XtermRpm,
    XtermStm,
    XtermRtm,
    XtermSgfx,

    // operating system commands, selected on the string payload
    OscSetWindowTitle,
    OscSetIconTitle,
    OscSetColor,
    OscSetForeground,
    OscSetBackground,
    OscSetCursorColor,
    OscResetColor,
    OscResetForeground,
    OscResetBackground,
    OscResetCursorColor,
}

/// Resolve a lone control code point.
pub(crate) fn lookup_control(cp: u32, _is_host: bool) -> Command {
    match cp {
        0x00 => Command::Null,
        0x05 => Command::Enq,
        0x07 => Command::Bel,
        0x08 => Command::Bs,
        0x09 => Command::Ht,
        0x0A => Command::Lf,
        0x0B => Command::Vt,
        0x0C => Command::Ff,
        0x0D => Command::Cr,
        0x0E => Command::So,
        0x0F => Command::Si,
        0x11 => Command::Dc1,
        0x13 => Command::Dc3,
        0x84 => Command::Ind,
        0x85 => Command::Nel,
        0x88 => Command::Hts,
        0x8D => Command::Ri,
        0x8E => Command::Ss2,
        0x8F => Command::Ss3,
        0x96 => Command::Spa,
        0x97 => Command::Epa,
        0x9A => Command::Decid,
        0x9C => Command::St,
        _ => Command::None,
    }
}

/// Resolve a completed escape sequence. Charset designations are
/// resolved separately before this is consulted.
pub(crate) fn lookup_escape(intermediates: u32, terminator: char, _is_host: bool) -> Command {
    match (intermediates, terminator) {
        (0, '6') => Command::Decbi,
        (0, '7') => Command::Decsc,
        (0, '8') => Command::Decrc,
        (0, '9') => Command::Decfi,
        (0, '=') => Command::Deckpam,
        (0, '>') => Command::Deckpnm,
        (0, 'D') => Command::Ind,
        (0, 'E') => Command::Nel,
        (0, 'H') => Command::Hts,
        (0, 'M') => Command::Ri,
        (0, 'N') => Command::Ss2,
        (0, 'O') => Command::Ss3,
        (0, 'V') => Command::Spa,
        (0, 'W') => Command::Epa,
        (0, 'Z') => Command::Decid,
        (0, '\\') => Command::St,
        (0, 'c') => Command::Ris,
        (0, 'n') => Command::Ls2,
        (0, 'o') => Command::Ls3,
        (0, '|') => Command::Ls3r,
        (0, '}') => Command::Ls2r,
        (0, '~') => Command::Ls1r,
        (seq_flag::HASH, '3') => Command::DecdhlTop,
        (seq_flag::HASH, '4') => Command::DecdhlBottom,
        (seq_flag::HASH, '5') => Command::Decswl,
        (seq_flag::HASH, '6') => Command::Decdwl,
        (seq_flag::HASH, '8') => Command::Decaln,
        (seq_flag::SPACE, 'F') => Command::S7c1t,
        (seq_flag::SPACE, 'G') => Command::S8c1t,
        (seq_flag::PERCENT, '@') => Command::SelectDefaultCharset,
        (seq_flag::PERCENT, 'G') => Command::SelectUtf8Charset,
        _ => Command::None,
    }
}

/// Resolve a completed CSI sequence.
pub(crate) fn lookup_csi(intermediates: u32, terminator: char, is_host: bool) -> Command {
    if !is_host {
        return lookup_csi_terminal(intermediates, terminator);
    }
    use seq_flag::*;
    match terminator {
        '@' => match intermediates {
            0 => Command::Ich,
            SPACE => Command::Sl,
            _ => Command::None,
        },
        'A' => match intermediates {
            0 => Command::Cuu,
            SPACE => Command::Sr,
            _ => Command::None,
        },
        'B' if intermediates == 0 => Command::Cud,
        'C' if intermediates == 0 => Command::Cuf,
        'D' if intermediates == 0 => Command::Cub,
        'E' if intermediates == 0 => Command::Cnl,
        'F' if intermediates == 0 => Command::Cpl,
        'G' if intermediates == 0 => Command::Cha,
        'H' if intermediates == 0 => Command::Cup,
        'I' if intermediates == 0 => Command::Cht,
        'J' => match intermediates {
            0 => Command::Ed,
            WHAT => Command::Decsed,
            _ => Command::None,
        },
        'K' => match intermediates {
            0 => Command::El,
            WHAT => Command::Decsel,
            _ => Command::None,
        },
        'L' if intermediates == 0 => Command::Il,
        'M' if intermediates == 0 => Command::Dl,
        'P' if intermediates == 0 => Command::Dch,
        'S' => match intermediates {
            0 => Command::Su,
            WHAT => Command::XtermSgfx,
            _ => Command::None,
        },
        'T' => match intermediates {
            0 => Command::Sd,
            GT => Command::XtermRtm,
            _ => Command::None,
        },
        'W' if intermediates == WHAT => Command::Decst8c,
        'X' if intermediates == 0 => Command::Ech,
        'Z' if intermediates == 0 => Command::Cbt,
        '`' if intermediates == 0 => Command::Hpa,
        'a' if intermediates == 0 => Command::Hpr,
        'b' if intermediates == 0 => Command::Rep,
        'c' => match intermediates {
            0 => Command::Da1,
            GT => Command::Da2,
            EQ => Command::Da3,
            _ => Command::None,
        },
        'd' if intermediates == 0 => Command::Vpa,
        'e' if intermediates == 0 => Command::Vpr,
        'f' if intermediates == 0 => Command::Hvp,
        'g' if intermediates == 0 => Command::Tbc,
        'h' => match intermediates {
            0 => Command::SmAnsi,
            WHAT => Command::SmDec,
            _ => Command::None,
        },
        'i' => match intermediates {
            0 => Command::McAnsi,
            WHAT => Command::McDec,
            _ => Command::None,
        },
        'l' => match intermediates {
            0 => Command::RmAnsi,
            WHAT => Command::RmDec,
            _ => Command::None,
        },
        'm' => match intermediates {
            0 => Command::Sgr,
            GT => Command::XtermModkeys,
            _ => Command::None,
        },
        'n' => match intermediates {
            0 => Command::DsrAnsi,
            WHAT => Command::DsrDec,
            GT => Command::XtermDisableModkeys,
            _ => Command::None,
        },
        'p' => match intermediates {
            BANG => Command::Decstr,
            DQUOTE => Command::Decscl,
            DOLLAR => Command::DecrqmAnsi,
            _ if intermediates == (DOLLAR | WHAT) => Command::DecrqmDec,
            _ => Command::None,
        },
        'q' => match intermediates {
            0 => Command::Decll,
            SPACE => Command::Decscusr,
            DQUOTE => Command::Decsca,
            _ => Command::None,
        },
        'r' => match intermediates {
            0 => Command::Decstbm,
            DOLLAR => Command::Deccara,
            WHAT => Command::XtermRpm,
            _ => Command::None,
        },
        's' => match intermediates {
            0 => Command::DecslrmOrSc,
            WHAT => Command::XtermSpm,
            _ => Command::None,
        },
        't' => match intermediates {
            0 => Command::XtermWm,
            DOLLAR => Command::Decrara,
            SPACE => Command::Decswbv,
            GT => Command::XtermStm,
            _ => Command::None,
        },
        'u' => match intermediates {
            0 => Command::Scorc,
            SPACE => Command::Decsmbv,
            DOLLAR => Command::Decrqtsr,
            AMP => Command::Decrqupss,
            _ => Command::None,
        },
        'v' if intermediates == seq_flag::DOLLAR => Command::Deccra,
        'w' => match intermediates {
            DOLLAR => Command::Decrqpsr,
            QUOTE => Command::Decefr,
            _ => Command::None,
        },
        'x' => match intermediates {
            0 => Command::Decreqtparm,
            DOLLAR => Command::Decfra,
            MULT => Command::Decsace,
            _ => Command::None,
        },
        'y' => match intermediates {
            0 => Command::Dectst,
            MULT => Command::Decrqcra,
            _ => Command::None,
        },
        'z' => match intermediates {
            DOLLAR => Command::Decera,
            QUOTE => Command::Decelr,
            MULT => Command::Decinvm,
            _ => Command::None,
        },
        '{' => match intermediates {
            DOLLAR => Command::Decsera,
            QUOTE => Command::Decsle,
            _ => Command::None,
        },
        '|' => match intermediates {
            DOLLAR => Command::Decscpp,
            QUOTE => Command::Decrqlp,
            MULT => Command::Decsnls,
            _ => Command::None,
        },
        '}' => match intermediates {
            QUOTE => Command::Decic,
            DOLLAR => Command::Decsasd,
            _ => Command::None,
        },
        '~' => match intermediates {
            QUOTE => Command::Decdc,
            DOLLAR => Command::Decssdt,
            _ => Command::None,
        },
        _ => Command::None,
    }
}

/// The response/report vocabulary a terminal sends to a host, plus the
/// cursor-key input sequences.
fn lookup_csi_terminal(intermediates: u32, terminator: char) -> Command {
    use seq_flag::*;
    match terminator {
        'A' if intermediates == 0 => Command::Cuu,
        'B' if intermediates == 0 => Command::Cud,
        'C' if intermediates == 0 => Command::Cuf,
        'D' if intermediates == 0 => Command::Cub,
        'R' => match intermediates {
            0 => Command::Cpr,
            WHAT => Command::Decxcpr,
            _ => Command::None,
        },
        'c' => match intermediates {
            WHAT => Command::Da1,
            GT => Command::Da2,
            EQ => Command::Da3,
            _ => Command::None,
        },
        'n' => match intermediates {
            0 => Command::DsrAnsi,
            WHAT => Command::DsrDec,
            _ => Command::None,
        },
        'y' if intermediates == DOLLAR => Command::Decrpm,
        _ => Command::None,
    }
}

/// Resolve a completed device control string by its header final byte.
pub(crate) fn lookup_dcs(intermediates: u32, terminator: char, is_host: bool) -> Command {
    if !is_host {
        // Responses (DECRPSS and friends) are not modeled; hosts rarely
        // speak DCS at terminals outside these.
        return match (intermediates, terminator) {
            (seq_flag::DOLLAR, 'r') => Command::Decrsps,
            _ => Command::None,
        };
    }
    match (intermediates, terminator) {
        (seq_flag::DOLLAR, 'q') => Command::Decrqss,
        (seq_flag::DOLLAR, 't') => Command::Decrsps,
        (seq_flag::BANG, 'u') => Command::Decaupss,
        (0, '|') => Command::Decudk,
        (seq_flag::PLUS, 'q') => Command::XtermGettcap,
        (seq_flag::PLUS, 'p') => Command::XtermSettcap,
        _ => Command::None,
    }
}

/// Resolve an operating system command from the numeric selector that
/// leads its string payload.
pub(crate) fn lookup_osc(st: &[u8], _is_host: bool) -> Command {
    let mut selector: u32 = 0;
    let mut digits = 0;
    for &b in st {
        match b {
            b'0'..=b'9' if digits < 5 => {
                selector = selector * 10 + (b - b'0') as u32;
                digits += 1;
            }
            b';' => break,
            _ => return Command::None,
        }
    }
    if digits == 0 {
        return Command::None;
    }
    match selector {
        0 | 2 => Command::OscSetWindowTitle,
        1 => Command::OscSetIconTitle,
        4 => Command::OscSetColor,
        10 => Command::OscSetForeground,
        11 => Command::OscSetBackground,
        12 => Command::OscSetCursorColor,
        104 => Command::OscResetColor,
        110 => Command::OscResetForeground,
        111 => Command::OscResetBackground,
        112 => Command::OscResetCursorColor,
        _ => Command::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csi_plain_finals() {
        assert_eq!(lookup_csi(0, 'H', true), Command::Cup);
        assert_eq!(lookup_csi(0, 'm', true), Command::Sgr);
        assert_eq!(lookup_csi(0, 'r', true), Command::Decstbm);
    }

    #[test]
    fn csi_intermediates_disambiguate() {
        assert_eq!(lookup_csi(seq_flag::WHAT, 'h', true), Command::SmDec);
        assert_eq!(lookup_csi(seq_flag::BANG, 'p', true), Command::Decstr);
        assert_eq!(lookup_csi(seq_flag::DOLLAR, 'v', true), Command::Deccra);
        assert_eq!(
            lookup_csi(seq_flag::DOLLAR | seq_flag::WHAT, 'p', true),
            Command::DecrqmDec
        );
        assert_eq!(lookup_csi(seq_flag::SPACE, 'q', true), Command::Decscusr);
    }

    #[test]
    fn csi_unknown_is_none() {
        assert_eq!(lookup_csi(seq_flag::HASH, 'H', true), Command::None);
        assert_eq!(lookup_csi(0, '<', true), Command::None);
    }

    #[test]
    fn terminal_side_reports() {
        assert_eq!(lookup_csi(0, 'R', false), Command::Cpr);
        assert_eq!(lookup_csi(seq_flag::WHAT, 'c', false), Command::Da1);
        assert_eq!(lookup_csi(seq_flag::DOLLAR, 'y', false), Command::Decrpm);
        // host-only commands do not resolve on the terminal side
        assert_eq!(lookup_csi(0, 'J', false), Command::None);
    }

    #[test]
    fn escape_finals() {
        assert_eq!(lookup_escape(0, '7', true), Command::Decsc);
        assert_eq!(lookup_escape(0, 'c', true), Command::Ris);
        assert_eq!(lookup_escape(seq_flag::HASH, '8', true), Command::Decaln);
    }

    #[test]
    fn osc_selectors() {
        assert_eq!(lookup_osc(b"0;title", true), Command::OscSetWindowTitle);
        assert_eq!(lookup_osc(b"2;title", true), Command::OscSetWindowTitle);
        assert_eq!(lookup_osc(b"4;1;#aabbcc", true), Command::OscSetColor);
        assert_eq!(lookup_osc(b"112", true), Command::OscResetCursorColor);
        assert_eq!(lookup_osc(b"", true), Command::None);
        assert_eq!(lookup_osc(b"x;y", true), Command::None);
    }

    #[test]
    fn dcs_finals() {
        assert_eq!(lookup_dcs(seq_flag::DOLLAR, 'q', true), Command::Decrqss);
        assert_eq!(lookup_dcs(seq_flag::BANG, 'u', true), Command::Decaupss);
        assert_eq!(lookup_dcs(0, '|', true), Command::Decudk);
    }
}
