//! The reduced VT52 emulation grammar.
//!
//! Entered via `CSI ? 2 l` (ANSI mode reset) and left via `ESC <`
//! (ANSI mode set) — both handled as ordinary CSI/ESC dispatch by the
//! controller, which flips the `vt52_mode` flag it passes into the
//! next [`super::Parser::parse`] call. While active, everything but
//! plain text and `ESC <letter>` sequences is reinterpreted here.
//!
//! Rather than duplicate dispatch, direct cursor addressing (`ESC Y
//! row col`) is translated into the same [`super::ParserHandler::csi`]
//! callback a CSI cursor-position command would use, with a synthetic
//! final byte of `Y` so the controller can tell the two apart if it
//! needs to.

use super::ParserHandler;

pub(super) fn step(bytes: &[u8], pos: usize, handler: &mut impl ParserHandler) -> Option<usize> {
    let byte = bytes[pos];
    if byte != 0x1B {
        if byte < 0x20 {
            handler.control(byte);
        } else {
            handler.plain_char(byte);
        }
        return Some(pos + 1);
    }

    let next = *bytes.get(pos + 1)?;
    if next == b'Y' {
        let row = *bytes.get(pos + 2)?;
        let col = *bytes.get(pos + 3)?;
        let params = [u16::from(row.saturating_sub(32)), u16::from(col.saturating_sub(32))];
        handler.csi(None, &params, &[], b'Y');
        return Some(pos + 4);
    }

    handler.esc(&[], next);
    Some(pos + 2)
}
