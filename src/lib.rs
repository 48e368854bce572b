//! A VT220-compatible terminal emulator core.
//!
//! This crate is a pure, pushable byte-to-screen engine: feed it bytes
//! from a PTY or a recorded session, it maintains a screen buffer and
//! cursor, and it hands back the response bytes a real terminal would
//! write to its host (cursor reports, device attributes, and so on).
//! It owns no file descriptors, threads, or timers — the caller drives
//! everything by calling [`Terminal::feed`].

#![deny(unsafe_code)]

pub mod cell;
pub mod charset;
pub mod mode;
pub mod parser;
pub mod screen;
pub mod tabulator;
pub mod term;
pub mod traits;

pub use cell::{Attrs, Cell};
pub use charset::{CharsetDesignation, GraphicSetState};
pub use mode::ModeFlags;
pub use parser::{Parser, ParserHandler};
pub use screen::{Cursor, EraseMode, ScreenBuffer};
pub use tabulator::Tabulator;
pub use term::Terminal;
pub use traits::{HostWriter, ScreenSink, SizeAdvisor};
