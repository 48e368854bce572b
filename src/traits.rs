//! Collaborator traits the controller drives, decoupling it from any
//! particular rendering or transport layer.
//!
//! A caller wires up a [`ScreenSink`] to learn what changed, a
//! [`HostWriter`] to receive response bytes, and a [`SizeAdvisor`] to
//! cap how large a resize request the controller will honor. None of
//! these need the controller to know about windows, sockets, or PTYs.

use crate::cell::Cell;

/// Receives screen-change notifications after a `feed` call.
///
/// The default implementations are no-ops, so a sink only needs to
/// override what it cares about.
pub trait ScreenSink {
    /// Cells changed on the visible screen; `dirty[i]` parallels `cells[i]`.
    fn on_change(&mut self, _cells: &[Cell], _dirty: &[bool]) {}

    /// The screen was resized to `width` x `height`.
    fn on_resize(&mut self, _width: usize, _height: usize) {}

    /// The bell (BEL) was received.
    fn on_bell(&mut self) {}
}

/// No-op sink for tests and headless use.
#[derive(Debug, Default)]
pub struct VoidSink;

impl ScreenSink for VoidSink {}

/// Writes controller response bytes back to the host (DA, DSR, DECID,
/// window-manipulation reports, and the like).
pub trait HostWriter {
    fn write(&mut self, bytes: &[u8]);
}

/// No-op writer for tests that don't care about response bytes.
#[derive(Debug, Default)]
pub struct VoidWriter;

impl HostWriter for VoidWriter {
    fn write(&mut self, _bytes: &[u8]) {}
}

/// Caps the screen dimensions a resize request may grow to.
pub trait SizeAdvisor {
    fn max_terminal_size(&self) -> (usize, usize);
}

/// An advisor with no cap — any requested size is honored.
#[derive(Debug, Default)]
pub struct UnboundedSize;

impl SizeAdvisor for UnboundedSize {
    fn max_terminal_size(&self) -> (usize, usize) {
        (usize::MAX, usize::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::{HostWriter, ScreenSink, SizeAdvisor, UnboundedSize, VoidSink, VoidWriter};

    #[test]
    fn void_sink_ignores_everything() {
        let mut sink = VoidSink;
        sink.on_change(&[], &[]);
        sink.on_resize(80, 24);
        sink.on_bell();
    }

    #[test]
    fn void_writer_discards_bytes() {
        let mut writer = VoidWriter;
        writer.write(b"\x1b[0n");
    }

    #[test]
    fn unbounded_size_has_no_cap() {
        assert_eq!(UnboundedSize.max_terminal_size(), (usize::MAX, usize::MAX));
    }
}
