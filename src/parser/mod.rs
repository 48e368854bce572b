//! A byte-driven VT220/VT52 sequence scanner.
//!
//! [`Parser::parse`] takes whatever bytes are available, dispatches
//! complete escape/control sequences to a [`ParserHandler`], and
//! returns how many bytes it consumed. If a sequence is incomplete at
//! the end of the slice, parsing stops *before* that sequence starts
//! and the caller is expected to re-feed the unconsumed tail once more
//! bytes arrive — the parser itself carries no partial-sequence state
//! between calls. `vt52_mode` is the one piece of cross-call state a
//! real terminal needs, and it lives in the caller (see
//! [`Terminal`](crate::term::Terminal)), passed in by value each call.

use smallvec::SmallVec;

mod string;
mod vt52;

const MAX_PARAMS: usize = 32;

/// Receives decoded sequences from [`Parser::parse`].
///
/// Default bodies are no-ops so a handler only needs to override what
/// it cares about; a handler that implements none of these just
/// discards all input, which is what the contract promises for
/// sequence types this core does not interpret (DCS, SOS, PM, APC).
pub trait ParserHandler {
    /// A byte in `0x20..=0x7E` or `0xA0..=0xFF` destined for the
    /// screen, not yet mapped through a character set.
    fn plain_char(&mut self, _byte: u8) {}

    /// A C0 or C1 control code (BS, HT, LF, CR, BEL, IND, NEL, ...).
    fn control(&mut self, _byte: u8) {}

    /// `ESC <intermediates> <final>`, e.g. `ESC ( B` or `ESC 7`.
    fn esc(&mut self, _intermediates: &[u8], _final_byte: u8) {}

    /// `CSI <private?> <params> <intermediates> <final>`.
    ///
    /// `private` is the leading `?`, `<`, `=`, or `>` marker byte when
    /// present. Omitted parameters report as `0`, matching the
    /// "default" convention CSI commands use.
    fn csi(&mut self, _private: Option<u8>, _params: &[u16], _intermediates: &[u8], _final_byte: u8) {}

    /// `OSC ... (BEL | ST)`. This core does not interpret OSC payloads.
    fn osc(&mut self, _data: &[u8]) {}
}

/// Stateless sequence scanner. See the module docs for the contract.
#[derive(Debug, Default, Clone, Copy)]
pub struct Parser;

impl Parser {
    /// Scans as much of `bytes` as forms complete sequences, calling
    /// back into `handler`, and returns the number of bytes consumed.
    pub fn parse(self, bytes: &[u8], vt52_mode: bool, handler: &mut impl ParserHandler) -> usize {
        let mut pos = 0;
        while pos < bytes.len() {
            let byte = bytes[pos];

            if vt52_mode {
                match vt52::step(bytes, pos, handler) {
                    Some(next) => {
                        pos = next;
                        continue;
                    }
                    None => return pos,
                }
            }

            match byte {
                0x1B => match self.scan_escape(bytes, pos, handler) {
                    Some(next) => pos = next,
                    None => return pos,
                },
                // 8-bit C1 introducers: the single-byte equivalents of
                // ESC-prefixed CSI/OSC/DCS/SOS/ST/PM/APC.
                0x90 | 0x98 | 0x9E | 0x9F => match string::scan(bytes, pos, 1, byte == 0x9F, handler) {
                    Some(next) => pos = next,
                    None => return pos,
                },
                0x9B => match self.scan_csi(bytes, pos + 1, handler) {
                    Some(next) => pos = next,
                    None => return pos,
                },
                0x9D => match string::scan_osc(bytes, pos, 1, handler) {
                    Some(next) => pos = next,
                    None => return pos,
                },
                0x00..=0x1A | 0x1C..=0x1F | 0x7F | 0x80..=0x8F | 0x91..=0x97 | 0x99..=0x9A | 0x9C => {
                    handler.control(byte);
                    pos += 1;
                }
                0x20..=0x7E | 0xA0..=0xFF => {
                    handler.plain_char(byte);
                    pos += 1;
                }
            }
        }
        pos
    }

    /// `bytes[start] == 0x1B`. Returns the position after the whole
    /// escape sequence, or `None` if more bytes are needed.
    fn scan_escape(self, bytes: &[u8], start: usize, handler: &mut impl ParserHandler) -> Option<usize> {
        let next = *bytes.get(start + 1)?;
        match next {
            b'[' => self.scan_csi(bytes, start + 2, handler),
            b']' => string::scan_osc(bytes, start, 2, handler),
            b'P' => string::scan(bytes, start, 2, false, handler),
            b'X' | b'^' | b'_' => string::scan(bytes, start, 2, false, handler),
            // Bare ST outside a string: nothing to terminate, just absorb it.
            b'\\' => Some(start + 2),
            _ => self.scan_simple_escape(bytes, start, handler),
        }
    }

    /// `ESC <intermediates>* <final>` — charset designations, DECSC,
    /// RIS, and the like.
    fn scan_simple_escape(
        self,
        bytes: &[u8],
        start: usize,
        handler: &mut impl ParserHandler,
    ) -> Option<usize> {
        let mut intermediates: SmallVec<[u8; 2]> = SmallVec::new();
        let mut pos = start + 1;
        loop {
            let byte = *bytes.get(pos)?;
            match byte {
                0x20..=0x2F => {
                    intermediates.push(byte);
                    pos += 1;
                }
                0x30..=0x7E => {
                    handler.esc(&intermediates, byte);
                    return Some(pos + 1);
                }
                // A stray control byte inside an escape sequence executes
                // immediately without aborting the sequence scan.
                0x00..=0x1F => {
                    handler.control(byte);
                    pos += 1;
                }
                _ => return Some(pos),
            }
        }
    }

    /// `bytes[start..]` is the byte right after the CSI introducer.
    fn scan_csi(self, bytes: &[u8], start: usize, handler: &mut impl ParserHandler) -> Option<usize> {
        let mut pos = start;
        let mut private = None;
        let mut params: SmallVec<[u16; MAX_PARAMS]> = SmallVec::new();
        let mut intermediates: SmallVec<[u8; 2]> = SmallVec::new();
        let mut current: Option<u32> = None;

        if let Some(&b) = bytes.get(pos) {
            if matches!(b, b'<' | b'=' | b'>' | b'?') {
                private = Some(b);
                pos += 1;
            }
        }

        loop {
            let byte = *bytes.get(pos)?;
            match byte {
                b'0'..=b'9' => {
                    let digit = u32::from(byte - b'0');
                    current = Some(current.unwrap_or(0).saturating_mul(10).saturating_add(digit));
                    pos += 1;
                }
                b';' => {
                    if params.len() < MAX_PARAMS {
                        params.push(current.take().unwrap_or(0).min(u32::from(u16::MAX)) as u16);
                    }
                    pos += 1;
                }
                0x20..=0x2F => {
                    intermediates.push(byte);
                    pos += 1;
                }
                0x40..=0x7E => {
                    if current.is_some() && params.len() < MAX_PARAMS {
                        params.push(current.unwrap_or(0).min(u32::from(u16::MAX)) as u16);
                    }
                    handler.csi(private, &params, &intermediates, byte);
                    return Some(pos + 1);
                }
                // A stray control byte inside a CSI sequence executes
                // immediately; the scan continues from the next byte.
                0x00..=0x1F => {
                    handler.control(byte);
                    pos += 1;
                }
                _ => return Some(pos),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Parser, ParserHandler};

    #[derive(Default)]
    struct Recorder {
        plain: Vec<u8>,
        controls: Vec<u8>,
        escapes: Vec<(Vec<u8>, u8)>,
        csis: Vec<(Option<u8>, Vec<u16>, Vec<u8>, u8)>,
        osc: Vec<Vec<u8>>,
    }

    impl ParserHandler for Recorder {
        fn plain_char(&mut self, byte: u8) {
            self.plain.push(byte);
        }
        fn control(&mut self, byte: u8) {
            self.controls.push(byte);
        }
        fn esc(&mut self, intermediates: &[u8], final_byte: u8) {
            self.escapes.push((intermediates.to_vec(), final_byte));
        }
        fn csi(&mut self, private: Option<u8>, params: &[u16], intermediates: &[u8], final_byte: u8) {
            self.csis.push((private, params.to_vec(), intermediates.to_vec(), final_byte));
        }
        fn osc(&mut self, data: &[u8]) {
            self.osc.push(data.to_vec());
        }
    }

    #[test]
    fn plain_text_is_consumed_fully() {
        let mut rec = Recorder::default();
        let consumed = Parser.parse(b"hello", false, &mut rec);
        assert_eq!(consumed, 5);
        assert_eq!(rec.plain, b"hello");
    }

    #[test]
    fn idle_on_empty_input() {
        let mut rec = Recorder::default();
        assert_eq!(Parser.parse(b"", false, &mut rec), 0);
        assert!(rec.plain.is_empty());
    }

    #[test]
    fn c0_control_dispatches_separately_from_plain_text() {
        let mut rec = Recorder::default();
        Parser.parse(b"a\nb", false, &mut rec);
        assert_eq!(rec.plain, b"ab");
        assert_eq!(rec.controls, vec![b'\n']);
    }

    #[test]
    fn complete_csi_dispatches_and_consumes_fully() {
        let mut rec = Recorder::default();
        let consumed = Parser.parse(b"\x1b[1;2H", false, &mut rec);
        assert_eq!(consumed, 6);
        assert_eq!(rec.csis, vec![(None, vec![1, 2], vec![], b'H')]);
    }

    #[test]
    fn incomplete_csi_consumes_nothing_and_rolls_back_to_escape_start() {
        let mut rec = Recorder::default();
        let consumed = Parser.parse(b"\x1b[1;2", false, &mut rec);
        assert_eq!(consumed, 0);
        assert!(rec.csis.is_empty());
    }

    #[test]
    fn reentrant_parsing_is_equivalent_to_feeding_all_at_once() {
        let whole = b"abc\x1b[1;2Hdef";
        let mut rec_whole = Recorder::default();
        Parser.parse(whole, false, &mut rec_whole);

        let mut rec_split = Recorder::default();
        let mut remaining = &whole[..];
        let mut buf: Vec<u8> = Vec::new();
        for &b in whole {
            buf.push(b);
            let consumed = Parser.parse(&buf, false, &mut rec_split);
            buf.drain(..consumed);
        }
        let _ = remaining;
        remaining = &[];
        let _ = remaining;

        assert_eq!(rec_whole.plain, rec_split.plain);
        assert_eq!(rec_whole.csis, rec_split.csis);
    }

    #[test]
    fn csi_private_marker_is_reported_separately_from_params() {
        let mut rec = Recorder::default();
        Parser.parse(b"\x1b[?1049h", false, &mut rec);
        assert_eq!(rec.csis, vec![(Some(b'?'), vec![1049], vec![], b'h')]);
    }

    #[test]
    fn csi_with_missing_params_defaults_to_zero() {
        let mut rec = Recorder::default();
        Parser.parse(b"\x1b[;5H", false, &mut rec);
        assert_eq!(rec.csis[0].1, vec![0, 5]);
    }

    #[test]
    fn control_byte_inside_csi_executes_without_aborting_the_sequence() {
        let mut rec = Recorder::default();
        let consumed = Parser.parse(b"\x1b[1\n;2H", false, &mut rec);
        assert_eq!(consumed, 7);
        assert_eq!(rec.controls, vec![b'\n']);
        assert_eq!(rec.csis, vec![(None, vec![1, 2], vec![], b'H')]);
    }

    #[test]
    fn simple_escape_with_intermediate_dispatches() {
        let mut rec = Recorder::default();
        let consumed = Parser.parse(b"\x1b(B", false, &mut rec);
        assert_eq!(consumed, 3);
        assert_eq!(rec.escapes, vec![(vec![b'('], b'B')]);
    }

    #[test]
    fn no_intermediate_escape_dispatches() {
        let mut rec = Recorder::default();
        let consumed = Parser.parse(b"\x1b7", false, &mut rec);
        assert_eq!(consumed, 2);
        assert_eq!(rec.escapes, vec![(vec![], b'7')]);
    }

    #[test]
    fn osc_terminated_by_bel() {
        let mut rec = Recorder::default();
        let consumed = Parser.parse(b"\x1b]0;title\x07", false, &mut rec);
        assert_eq!(consumed, 10);
        assert_eq!(rec.osc, vec![b"0;title".to_vec()]);
    }

    #[test]
    fn osc_terminated_by_st() {
        let mut rec = Recorder::default();
        let consumed = Parser.parse(b"\x1b]0;title\x1b\\", false, &mut rec);
        assert_eq!(consumed, 11);
        assert_eq!(rec.osc, vec![b"0;title".to_vec()]);
    }

    #[test]
    fn osc_aborted_by_bare_escape_reprocesses_it_fresh() {
        let mut rec = Recorder::default();
        let consumed = Parser.parse(b"\x1b]0;title\x1b[1H", false, &mut rec);
        assert_eq!(rec.osc, vec![b"0;title".to_vec()]);
        assert_eq!(rec.csis, vec![(None, vec![1], vec![], b'H')]);
        assert_eq!(consumed, 14);
    }

    #[test]
    fn incomplete_osc_rolls_back_fully() {
        let mut rec = Recorder::default();
        let consumed = Parser.parse(b"\x1b]0;title", false, &mut rec);
        assert_eq!(consumed, 0);
        assert!(rec.osc.is_empty());
    }

    #[test]
    fn dcs_is_collected_and_discarded() {
        let mut rec = Recorder::default();
        let consumed = Parser.parse(b"\x1bPsome data\x1b\\", false, &mut rec);
        assert_eq!(consumed, 13);
        assert!(rec.osc.is_empty());
        assert!(rec.plain.is_empty());
    }

    #[test]
    fn eight_bit_csi_introducer_dispatches_like_seven_bit() {
        let mut rec = Recorder::default();
        let consumed = Parser.parse(&[0x9B, b'1', b'H'], false, &mut rec);
        assert_eq!(consumed, 3);
        assert_eq!(rec.csis, vec![(None, vec![1], vec![], b'H')]);
    }
}
