//! String-type sequence collection: OSC, DCS, SOS, PM, APC.
//!
//! All five share the same termination grammar — run until ST (`ESC \`
//! or the 8-bit `0x9C`), or, for OSC only, BEL. A bare `ESC` that
//! isn't followed by `\` aborts the string in place: the string ends
//! right there and the `ESC` is left unconsumed so the next call to
//! [`super::Parser::parse`] reprocesses it as a fresh sequence.

use super::ParserHandler;

/// Scans a DCS/SOS/PM/APC payload and discards it — this core gives
/// these sequence types no semantics. `data_start` is the offset of
/// the first payload byte relative to `seq_start`.
pub(super) fn scan(
    bytes: &[u8],
    seq_start: usize,
    data_start: usize,
    _is_apc: bool,
    _handler: &mut impl ParserHandler,
) -> Option<usize> {
    collect(bytes, seq_start, data_start, false)
}

/// Scans an OSC payload and dispatches it to [`ParserHandler::osc`].
pub(super) fn scan_osc(
    bytes: &[u8],
    seq_start: usize,
    data_start: usize,
    handler: &mut impl ParserHandler,
) -> Option<usize> {
    let (end, data) = collect_with_data(bytes, seq_start, data_start, true)?;
    handler.osc(&data);
    Some(end)
}

fn collect(bytes: &[u8], seq_start: usize, data_start: usize, bel_terminates: bool) -> Option<usize> {
    collect_with_data(bytes, seq_start, data_start, bel_terminates).map(|(end, _)| end)
}

fn collect_with_data(
    bytes: &[u8],
    seq_start: usize,
    data_start: usize,
    bel_terminates: bool,
) -> Option<(usize, Vec<u8>)> {
    let mut pos = seq_start + data_start;
    let mut data = Vec::new();
    loop {
        let byte = *bytes.get(pos)?;
        match byte {
            0x9C => return Some((pos + 1, data)),
            0x07 if bel_terminates => return Some((pos + 1, data)),
            0x1B => {
                let Some(&next) = bytes.get(pos + 1) else { return None };
                if next == b'\\' {
                    return Some((pos + 2, data));
                }
                // Bare ESC aborts the string here; leave it for reprocessing.
                return Some((pos, data));
            }
            _ => {
                data.push(byte);
                pos += 1;
            }
        }
    }
}
