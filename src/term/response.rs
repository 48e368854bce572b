//! Formats controller response bytes (DA, DSR, DECID) with either a
//! 7-bit `ESC [` introducer or an 8-bit `0x9B` one, per
//! [`ModeFlags::EIGHT_BIT_RESPONSES`].

use crate::mode::ModeFlags;

/// Builds a `CSI [marker] <params joined by ;> <final>` response.
/// `marker` is the DEC-private byte (`?` or `>`) some replies echo back
/// between the introducer and the parameter list.
pub(super) fn csi(mode: ModeFlags, marker: Option<u8>, params: &[u32], final_byte: u8) -> Vec<u8> {
    let mut out = Vec::with_capacity(8);
    if mode.contains(ModeFlags::EIGHT_BIT_RESPONSES) {
        out.push(0x9B);
    } else {
        out.push(0x1B);
        out.push(b'[');
    }
    if let Some(marker) = marker {
        out.push(marker);
    }
    for (i, p) in params.iter().enumerate() {
        if i > 0 {
            out.push(b';');
        }
        out.extend_from_slice(p.to_string().as_bytes());
    }
    out.push(final_byte);
    out
}

/// The primary device attributes response: a VT220 identifying itself
/// with the 7-bit-controls, selective-erase, UDK, and user-windows
/// extensions.
pub(super) fn device_attributes(mode: ModeFlags) -> Vec<u8> {
    csi(mode, Some(b'?'), &[62, 1, 2, 4, 6, 8, 9, 15], b'c')
}

/// The secondary device attributes response: firmware identity and
/// version, no capability list.
pub(super) fn secondary_device_attributes(mode: ModeFlags) -> Vec<u8> {
    csi(mode, Some(b'>'), &[1, 123, 0], b'c')
}

/// DSR reply to `CSI 5 n` — "everything's fine".
pub(super) fn status_ok(mode: ModeFlags) -> Vec<u8> {
    csi(mode, None, &[0], b'n')
}

/// DSR reply to `CSI 6 n` / DECSDSR reply to `CSI ? 6 n` — cursor
/// position report, 1-based. `marker` is `Some(b'?')` for the
/// DEC-private form.
pub(super) fn cursor_position_report(
    mode: ModeFlags,
    marker: Option<u8>,
    row: usize,
    col: usize,
) -> Vec<u8> {
    csi(mode, marker, &[(row + 1) as u32, (col + 1) as u32], b'R')
}

/// DECSDSR reply to `CSI ? 15 n` — printer not attached.
pub(super) fn printer_status_not_ready(mode: ModeFlags) -> Vec<u8> {
    csi(mode, Some(b'?'), &[11], b'n')
}

/// DECSDSR reply to `CSI ? 25 n` — user-defined keys locked.
pub(super) fn udk_status_locked(mode: ModeFlags) -> Vec<u8> {
    csi(mode, Some(b'?'), &[21], b'n')
}

/// DECSDSR reply to `CSI ? 26 n` — North American keyboard, no dialect
/// bit set.
pub(super) fn keyboard_dialect_north_american(mode: ModeFlags) -> Vec<u8> {
    csi(mode, Some(b'?'), &[27, 1], b'n')
}

/// Window manipulation (`CSI Ps t`) fixed replies that don't depend on
/// live state: de-iconified (selector 11) and a dummy window position
/// (selector 13).
pub(super) fn window_state_report(mode: ModeFlags) -> Vec<u8> {
    csi(mode, None, &[1], b't')
}

pub(super) fn window_position_report(mode: ModeFlags) -> Vec<u8> {
    csi(mode, None, &[3, 0, 0], b't')
}

/// Window manipulation reply carrying a height/width pair: selector 4
/// echoes the size advisor's report as a pixel size (selector kind
/// `4`), selectors 18/19 report character cells (`8`/`9`).
pub(super) fn window_size_report(mode: ModeFlags, kind: u32, height: usize, width: usize) -> Vec<u8> {
    csi(mode, None, &[kind, height as u32, width as u32], b't')
}

/// DECREQTPARM reply — fixed reporting-terminal parameters.
pub(super) fn reqtparm_report(mode: ModeFlags, solicited: u32) -> Vec<u8> {
    csi(mode, None, &[solicited + 2, 1, 1, 112, 112, 1, 0], b'x')
}
