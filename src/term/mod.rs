//! The terminal controller: glues the screen buffer, tabulator, and
//! character-set state together and executes parsed sequences against
//! them.

mod handler;
mod response;

use crate::cell::Attrs;
use crate::charset::GraphicSetState;
use crate::mode::ModeFlags;
use crate::parser::Parser;
use crate::screen::{Cursor, ScreenBuffer};
use crate::tabulator::Tabulator;
use crate::traits::{HostWriter, ScreenSink, SizeAdvisor};

/// Cursor/attribute/charset snapshot captured by DECSC and restored by
/// DECRC.
#[derive(Debug, Clone, Copy)]
struct SavedState {
    cursor: Cursor,
    attrs: Attrs,
    charset: GraphicSetState,
    origin_mode: bool,
    wrapped: bool,
}

/// Owns the screen state and drives it from parsed VT220/VT52
/// sequences. Generic over its three collaborators so tests can wire
/// up no-op stand-ins without touching the controller logic.
pub struct Terminal<S: ScreenSink, W: HostWriter, A: SizeAdvisor> {
    screen: ScreenBuffer,
    cursor: Cursor,
    mode: ModeFlags,
    charset: GraphicSetState,
    tabulator: Tabulator,
    attrs: Attrs,
    saved: Option<SavedState>,
    vt52_mode: bool,
    wrapped: bool,
    last_graphic: Option<(char, Attrs)>,
    sink: S,
    writer: W,
    size_advisor: A,
}

impl<S: ScreenSink, W: HostWriter, A: SizeAdvisor> Terminal<S, W, A> {
    pub fn new(width: usize, height: usize, sink: S, writer: W, size_advisor: A) -> Self {
        Self {
            screen: ScreenBuffer::new(width, height),
            cursor: Cursor::default(),
            mode: ModeFlags::AUTO_WRAP | ModeFlags::ERASURE_MODE,
            charset: GraphicSetState::default(),
            tabulator: Tabulator::new(width),
            attrs: Attrs::default(),
            saved: None,
            vt52_mode: false,
            wrapped: false,
            last_graphic: None,
            sink,
            writer,
            size_advisor,
        }
    }

    /// Feeds bytes to the sequence scanner, applies every complete
    /// sequence it finds, and returns how many bytes were consumed.
    /// Delivers a screen-sink snapshot of whatever changed before
    /// returning.
    pub fn feed(&mut self, bytes: &[u8]) -> usize {
        let consumed = Parser.parse(bytes, self.vt52_mode, self);
        let (cells, dirty) = self.screen.snapshot();
        self.sink.on_change(&cells, &dirty);
        self.screen.clear_dirty();
        consumed
    }

    pub fn width(&self) -> usize {
        self.screen.width()
    }

    pub fn height(&self) -> usize {
        self.screen.height()
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn cell_at(&self, x: usize, y: usize) -> &crate::cell::Cell {
        self.screen.cell_at_xy(x, y)
    }

    pub fn snapshot(&self) -> (Vec<crate::cell::Cell>, Vec<bool>) {
        self.screen.snapshot()
    }

    pub fn mode(&self) -> ModeFlags {
        self.mode
    }

    /// Resizes the screen, clamped to whatever the size advisor
    /// allows, and notifies the sink of the final dimensions.
    pub fn resize(&mut self, width: usize, height: usize) {
        let (max_w, max_h) = self.size_advisor.max_terminal_size();
        let width = width.clamp(1, max_w.max(1));
        let height = height.clamp(1, max_h.max(1));
        self.screen.resize(width, height);
        self.tabulator.resize(width);
        self.cursor.x = self.cursor.x.min(width.saturating_sub(1));
        self.cursor.y = self.cursor.y.min(height.saturating_sub(1));
        self.sink.on_resize(width, height);
    }

    /// DECSTR — resets modes and cursor/attribute state but leaves
    /// screen content untouched.
    pub fn soft_reset(&mut self) {
        self.mode = ModeFlags::AUTO_WRAP | ModeFlags::ERASURE_MODE;
        self.attrs = Attrs::default();
        self.charset = GraphicSetState::default();
        self.cursor.visible = true;
        self.wrapped = false;
        self.saved = None;
        self.screen.reset_scroll_region();
    }

    /// RIS — full power-on reset: clears the screen, tab stops, and
    /// every piece of controller state.
    pub fn hard_reset(&mut self) {
        let (width, height) = (self.screen.width(), self.screen.height());
        self.screen = ScreenBuffer::new(width, height);
        self.cursor = Cursor::default();
        self.tabulator = Tabulator::new(width);
        self.vt52_mode = false;
        self.last_graphic = None;
        self.soft_reset();
    }

    fn current_idx(&self) -> usize {
        self.screen.index(self.cursor.x.min(self.screen.width() - 1), self.cursor.y)
    }
}
