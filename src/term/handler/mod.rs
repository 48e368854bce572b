//! Sequence dispatch: turns parsed control/ESC/CSI events into screen,
//! cursor, and mode mutations.
//!
//! Each method translates a byte or sequence into the handful of
//! `ScreenBuffer`/`Tabulator`/`GraphicSetState` primitives that
//! actually do the work — this module is glue, not logic.

use super::{SavedState, Terminal};
use crate::cell::Cell;
use crate::charset::{self, GraphicSet};
use crate::mode::ModeFlags;
use crate::parser::ParserHandler;
use crate::screen::EraseMode;
use crate::traits::{HostWriter, ScreenSink, SizeAdvisor};

impl<S: ScreenSink, W: HostWriter, A: SizeAdvisor> Terminal<S, W, A> {
    fn put_char(&mut self, ch: char) {
        if self.wrapped {
            self.wrapped = false;
            self.advance_line_after_wrap();
        }
        let idx = self.current_idx();
        let insert = self.mode.contains(ModeFlags::INSERT);
        if insert {
            self.screen.insert_chars(idx, ch, self.attrs, 1);
        } else {
            self.screen.put(idx, Cell::new(ch, self.attrs));
        }
        let width = self.screen.width();
        if self.cursor.x + 1 < width {
            self.cursor.x += 1;
        } else if self.mode.contains(ModeFlags::AUTO_WRAP) {
            self.wrapped = true;
        }
        self.last_graphic = Some((ch, self.attrs));
    }

    fn advance_line_after_wrap(&mut self) {
        self.cursor.x = 0;
        self.move_down_with_scroll();
    }

    fn move_down_with_scroll(&mut self) {
        let (_, bottom) = self.screen.scroll_region();
        if self.cursor.y >= bottom {
            self.screen.scroll_up(1, self.attrs);
        } else {
            self.cursor.y += 1;
        }
    }

    fn move_up_with_scroll(&mut self) {
        let (top, _) = self.screen.scroll_region();
        if self.cursor.y <= top {
            self.screen.scroll_down(1, self.attrs);
        } else {
            self.cursor.y -= 1;
        }
    }

    fn do_linefeed(&mut self) {
        self.move_down_with_scroll();
        if self.mode.contains(ModeFlags::AUTO_NEWLINE) {
            self.cursor.x = 0;
        }
        self.wrapped = false;
    }

    fn do_next_line(&mut self) {
        self.move_down_with_scroll();
        self.cursor.x = 0;
        self.wrapped = false;
    }

    fn do_carriage_return(&mut self) {
        self.cursor.x = 0;
        self.wrapped = false;
    }

    fn do_backspace(&mut self) {
        if self.wrapped {
            self.wrapped = false;
        } else if self.cursor.x > 0 {
            self.cursor.x -= 1;
        } else if self.mode.contains(ModeFlags::REVERSE_WRAPAROUND) {
            let (top, _) = self.screen.scroll_region();
            if self.cursor.y > top {
                self.cursor.y -= 1;
                self.cursor.x = self.screen.width() - 1;
            }
        }
    }

    fn do_tab(&mut self) {
        self.cursor.x = self.tabulator.next_tab(self.cursor.x).min(self.screen.width() - 1);
        self.wrapped = false;
    }

    fn do_tab_backward(&mut self, count: usize) {
        for _ in 0..count {
            self.cursor.x = self.tabulator.previous_tab(self.cursor.x);
        }
        self.wrapped = false;
    }

    fn cursor_up(&mut self, n: usize) {
        let min_y = if self.mode.contains(ModeFlags::ORIGIN) { self.screen.scroll_region().0 } else { 0 };
        self.cursor.y = self.cursor.y.saturating_sub(n).max(min_y);
        self.wrapped = false;
    }

    fn cursor_down(&mut self, n: usize) {
        let max_y = if self.mode.contains(ModeFlags::ORIGIN) {
            self.screen.scroll_region().1
        } else {
            self.screen.height() - 1
        };
        self.cursor.y = (self.cursor.y + n).min(max_y);
        self.wrapped = false;
    }

    fn cursor_forward(&mut self, n: usize) {
        self.cursor.x = (self.cursor.x + n).min(self.screen.width() - 1);
        self.wrapped = false;
    }

    fn cursor_backward(&mut self, n: usize) {
        self.cursor.x = self.cursor.x.saturating_sub(n);
        self.wrapped = false;
    }

    fn cursor_to(&mut self, row: usize, col: usize) {
        let origin = self.mode.contains(ModeFlags::ORIGIN);
        let (top, bottom) = self.screen.scroll_region();
        let y_offset = if origin { top } else { 0 };
        let max_y = if origin { bottom } else { self.screen.height() - 1 };
        self.cursor.y = (row.saturating_sub(1) + y_offset).min(max_y);
        self.cursor.x = col.saturating_sub(1).min(self.screen.width() - 1);
        self.wrapped = false;
    }

    fn save_state(&mut self) {
        self.saved = Some(SavedState {
            cursor: self.cursor,
            attrs: self.attrs,
            charset: self.charset,
            origin_mode: self.mode.contains(ModeFlags::ORIGIN),
            wrapped: self.wrapped,
        });
    }

    fn restore_state(&mut self) {
        if let Some(saved) = self.saved {
            self.cursor = saved.cursor;
            self.attrs = saved.attrs;
            self.charset = saved.charset;
            self.mode.set(ModeFlags::ORIGIN, saved.origin_mode);
            self.wrapped = saved.wrapped;
        }
    }

    fn apply_sgr(&mut self, params: &[u16]) {
        if params.is_empty() {
            self.attrs.reset_all();
            return;
        }
        let mut i = 0;
        while i < params.len() {
            match params[i] {
                0 => self.attrs.reset_all(),
                1 => self.attrs.set_bold(true),
                5 => self.attrs.set_blink(true),
                4 => self.attrs.set_underline(true),
                7 => self.attrs.set_reverse(true),
                8 => self.attrs.set_hidden(true),
                21 | 22 => self.attrs.set_bold(false),
                24 => self.attrs.set_underline(false),
                25 => self.attrs.set_blink(false),
                27 => self.attrs.set_reverse(false),
                28 => self.attrs.set_hidden(false),
                30..=37 => self.attrs.set_fg((params[i] - 30) as u8),
                39 => {
                    self.attrs.set_fg(0);
                    self.clear_video_flags();
                }
                40..=47 => self.attrs.set_bg((params[i] - 40) as u8),
                49 => {
                    self.attrs.set_bg(0);
                    self.clear_video_flags();
                }
                _ => {}
            }
            i += 1;
        }
    }

    /// SGR 39/49 act as a partial reset: the color they default goes
    /// back to index 0, and the non-color rendition flags clear too.
    fn clear_video_flags(&mut self) {
        self.attrs.set_bold(false);
        self.attrs.set_underline(false);
        self.attrs.set_blink(false);
        self.attrs.set_reverse(false);
        self.attrs.set_hidden(false);
    }

    fn set_private_mode(&mut self, number: u16, enable: bool) {
        match number {
            1 => self.mode.set(ModeFlags::APPLICATION_CURSOR_KEYS, enable),
            2 => self.vt52_mode = !enable,
            3 => {
                if self.mode.contains(ModeFlags::COLUMNS_132_ENABLE) {
                    let height = self.screen.height();
                    self.resize(if enable { 132 } else { 80 }, height);
                    let idx = self.current_idx();
                    self.screen.erase_screen(idx, EraseMode::All, self.attrs, false);
                    self.cursor.x = 0;
                    self.cursor.y = 0;
                }
                self.mode.set(ModeFlags::COLUMNS_132, enable);
            }
            5 => self.mode.set(ModeFlags::REVERSE_VIDEO, enable),
            6 => {
                self.mode.set(ModeFlags::ORIGIN, enable);
                self.cursor_to(1, 1);
            }
            7 => self.mode.set(ModeFlags::AUTO_WRAP, enable),
            25 => self.cursor.visible = enable,
            40 => self.mode.set(ModeFlags::COLUMNS_132_ENABLE, enable),
            45 => self.mode.set(ModeFlags::REVERSE_WRAPAROUND, enable),
            _ => {}
        }
    }

    fn dispatch_vt52_escape(&mut self, final_byte: u8) {
        match final_byte {
            b'A' => self.cursor_up(1),
            b'B' => self.cursor_down(1),
            b'C' => self.cursor_forward(1),
            b'D' => self.cursor_backward(1),
            b'H' => self.cursor_to(1, 1),
            b'I' => self.move_up_with_scroll(),
            b'J' => {
                let idx = self.current_idx();
                self.screen.erase_screen(idx, EraseMode::ToEnd, self.attrs, false);
            }
            b'K' => {
                let idx = self.current_idx();
                self.screen.erase_line(idx, EraseMode::ToEnd, self.attrs, false);
            }
            b'Z' => self.writer.write(&super::response::device_attributes(self.mode)),
            b'<' => self.vt52_mode = false,
            b'=' | b'>' | b'F' | b'G' => {}
            _ => {}
        }
    }

    fn dispatch_csi(&mut self, private: Option<u8>, params: &[u16], intermediates: &[u8], final_byte: u8) {
        let p = |i: usize, default: usize| -> usize {
            params.get(i).copied().filter(|&v| v != 0).map(usize::from).unwrap_or(default)
        };
        let p0 = |i: usize| -> usize { params.get(i).copied().map(usize::from).unwrap_or(0) };

        if let Some(b'?') = private {
            match final_byte {
                b'h' => {
                    params.iter().for_each(|&n| self.set_private_mode(n, true));
                    return;
                }
                b'l' => {
                    params.iter().for_each(|&n| self.set_private_mode(n, false));
                    return;
                }
                // DECSED/DECSEL: selective erase, always skipping protected cells.
                b'J' => {
                    self.erase_display(p0(0), true);
                    return;
                }
                b'K' => {
                    self.erase_line(p0(0), true);
                    return;
                }
                // DECSDSR — DEC-private device status report.
                b'n' => {
                    match p0(0) {
                        6 => {
                            let report = super::response::cursor_position_report(
                                self.mode,
                                Some(b'?'),
                                self.cursor.y,
                                self.cursor.x,
                            );
                            self.writer.write(&report);
                        }
                        15 => self.writer.write(&super::response::printer_status_not_ready(self.mode)),
                        25 => self.writer.write(&super::response::udk_status_locked(self.mode)),
                        26 => {
                            self.writer.write(&super::response::keyboard_dialect_north_american(self.mode))
                        }
                        _ => {}
                    }
                    return;
                }
                _ => return,
            }
        }

        if final_byte == b'Y' {
            // Synthetic event from the VT52 direct-cursor-address form.
            self.cursor.y = p0(0).min(self.screen.height() - 1);
            self.cursor.x = p0(1).min(self.screen.width() - 1);
            self.wrapped = false;
            return;
        }

        if intermediates == [b'!'] && final_byte == b'p' {
            self.soft_reset();
            return;
        }

        if intermediates == [b'"'] && final_byte == b'q' {
            let ps = p0(0);
            self.attrs.set_protected(ps == 1);
            return;
        }

        if !intermediates.is_empty() {
            return;
        }

        match final_byte {
            b'A' => self.cursor_up(p(0, 1)),
            b'B' => self.cursor_down(p(0, 1)),
            b'C' => self.cursor_forward(p(0, 1)),
            b'D' => self.cursor_backward(p(0, 1)),
            b'H' | b'f' => self.cursor_to(p(0, 1), p(1, 1)),
            // VPA: absolute row, column unchanged.
            b'd' => {
                let origin = self.mode.contains(ModeFlags::ORIGIN);
                let (top, bottom) = self.screen.scroll_region();
                let y_offset = if origin { top } else { 0 };
                let max_y = if origin { bottom } else { self.screen.height() - 1 };
                self.cursor.y = (p(0, 1).saturating_sub(1) + y_offset).min(max_y);
                self.wrapped = false;
            }
            // HPA/CHA: absolute column, row unchanged.
            b'`' | b'G' => {
                self.cursor.x = p(0, 1).saturating_sub(1).min(self.screen.width() - 1);
                self.wrapped = false;
            }
            b'I' => {
                for _ in 0..p(0, 1) {
                    self.do_tab();
                }
            }
            b'Z' => self.do_tab_backward(p(0, 1)),
            b'J' => self.erase_display(p(0, 0), self.mode.contains(ModeFlags::ERASURE_MODE)),
            b'K' => self.erase_line(p(0, 0), self.mode.contains(ModeFlags::ERASURE_MODE)),
            b'@' => {
                let idx = self.current_idx();
                self.screen.insert_chars(idx, ' ', self.attrs, p(0, 1));
            }
            b'P' => {
                let idx = self.current_idx();
                self.screen.delete_chars(idx, self.attrs, p(0, 1));
            }
            b'X' => {
                let idx = self.current_idx();
                let count = p(0, 1).min(self.screen.width() - self.cursor.x);
                for i in 0..count {
                    self.screen.put(idx + i, Cell::blank(self.attrs));
                }
            }
            b'L' => self.insert_lines(p(0, 1)),
            b'M' => self.delete_lines(p(0, 1)),
            b'S' => self.screen.scroll_up(p(0, 1), self.attrs),
            b'T' => self.screen.scroll_down(p(0, 1), self.attrs),
            b'g' => match p0(0) {
                0 => self.tabulator.clear(self.cursor.x),
                3 => self.tabulator.clear_all(),
                _ => {}
            },
            b'b' => {
                if let Some((ch, attrs)) = self.last_graphic {
                    let saved = self.attrs;
                    self.attrs = attrs;
                    for _ in 0..p(0, 1) {
                        self.put_char(ch);
                    }
                    self.attrs = saved;
                }
            }
            b'm' => self.apply_sgr(params),
            b'r' => {
                let (top, bottom) = (p(0, 1), p(1, self.screen.height()));
                self.screen.set_scroll_region(top.saturating_sub(1), bottom.saturating_sub(1));
                // Always homes to the absolute scroll-region top, regardless
                // of origin mode — cursor_to would only apply that offset
                // when DECOM is already on.
                let (region_top, _) = self.screen.scroll_region();
                self.cursor.y = region_top;
                self.cursor.x = 0;
                self.wrapped = false;
            }
            b'c' => {
                if private == Some(b'>') {
                    self.writer.write(&super::response::secondary_device_attributes(self.mode));
                } else {
                    self.writer.write(&super::response::device_attributes(self.mode));
                }
            }
            b'n' => match p0(0) {
                5 => self.writer.write(&super::response::status_ok(self.mode)),
                6 => {
                    let report =
                        super::response::cursor_position_report(self.mode, None, self.cursor.y, self.cursor.x);
                    self.writer.write(&report);
                }
                _ => {}
            },
            b's' => self.save_state(),
            b'u' => self.restore_state(),
            b'h' => params.iter().for_each(|&n| self.set_ansi_mode(n, true)),
            b'l' => params.iter().for_each(|&n| self.set_ansi_mode(n, false)),
            // Window manipulation.
            b't' => match p0(0) {
                4 => {} // Pixel resize — no pixel model to resize against.
                8 => {
                    let rows = p(1, self.screen.height());
                    let cols = p(2, self.screen.width());
                    self.resize(cols, rows);
                }
                11 => self.writer.write(&super::response::window_state_report(self.mode)),
                13 => self.writer.write(&super::response::window_position_report(self.mode)),
                14 => {
                    let (w, h) = self.size_advisor.max_terminal_size();
                    self.writer.write(&super::response::window_size_report(self.mode, 4, h, w));
                }
                18 => {
                    let (w, h) = (self.screen.width(), self.screen.height());
                    self.writer.write(&super::response::window_size_report(self.mode, 8, h, w));
                }
                19 => {
                    let (w, h) = (self.screen.width(), self.screen.height());
                    self.writer.write(&super::response::window_size_report(self.mode, 9, h, w));
                }
                20 => self.writer.write(b"\x1b]L\x1b\\"),
                21 => self.writer.write(b"\x1b]l\x1b\\"),
                n if n >= 24 => {
                    let width = self.screen.width();
                    self.resize(width, n);
                }
                _ => {}
            },
            // DECREQTPARM.
            b'x' => {
                let report = super::response::reqtparm_report(self.mode, p0(0) as u32);
                self.writer.write(&report);
            }
            _ => {}
        }
    }

    /// Standard (non-DEC-private) SM/RM modes: IRM, erasure, and LNM.
    fn set_ansi_mode(&mut self, number: u16, enable: bool) {
        match number {
            4 => self.mode.set(ModeFlags::INSERT, enable),
            6 => self.mode.set(ModeFlags::ERASURE_MODE, enable),
            20 => self.mode.set(ModeFlags::AUTO_NEWLINE, enable),
            _ => {}
        }
    }

    /// `keep_protected` preserves DECSCA-protected cells rather than
    /// blanking them — always `true` for DECSED/DECSEL (selective
    /// erase); for standard ED/EL it mirrors `ModeFlags::ERASURE_MODE`.
    fn erase_display(&mut self, param: usize, keep_protected: bool) {
        let idx = self.current_idx();
        let mode = match param {
            0 => EraseMode::ToEnd,
            1 => EraseMode::ToStart,
            _ => EraseMode::All,
        };
        self.screen.erase_screen(idx, mode, self.attrs, keep_protected);
    }

    fn erase_line(&mut self, param: usize, keep_protected: bool) {
        let idx = self.current_idx();
        let mode = match param {
            0 => EraseMode::ToEnd,
            1 => EraseMode::ToStart,
            _ => EraseMode::All,
        };
        self.screen.erase_line(idx, mode, self.attrs, keep_protected);
    }

    /// IL only takes effect when the cursor sits inside the scroll
    /// region; outside it, the command is a no-op.
    fn insert_lines(&mut self, n: usize) {
        let (top, bottom) = self.screen.scroll_region();
        if self.cursor.y < top || self.cursor.y > bottom {
            return;
        }
        let saved_top = top;
        self.screen.set_scroll_region(self.cursor.y, bottom);
        self.screen.scroll_down(n, self.attrs);
        self.screen.set_scroll_region(saved_top, bottom);
        self.cursor.x = 0;
    }

    /// DL, likewise gated on the cursor being inside the scroll region.
    fn delete_lines(&mut self, n: usize) {
        let (top, bottom) = self.screen.scroll_region();
        if self.cursor.y < top || self.cursor.y > bottom {
            return;
        }
        let saved_top = top;
        self.screen.set_scroll_region(self.cursor.y, bottom);
        self.screen.scroll_up(n, self.attrs);
        self.screen.set_scroll_region(saved_top, bottom);
        self.cursor.x = 0;
    }
}

impl<S: ScreenSink, W: HostWriter, A: SizeAdvisor> ParserHandler for Terminal<S, W, A> {
    fn plain_char(&mut self, byte: u8) {
        let ch = self.charset.map(byte);
        self.put_char(ch);
    }

    fn control(&mut self, byte: u8) {
        match byte {
            0x07 => self.sink.on_bell(),
            0x08 => self.do_backspace(),
            0x09 => self.do_tab(),
            0x0A | 0x0B | 0x0C => self.do_linefeed(),
            0x0D => self.do_carriage_return(),
            0x0E => self.charset.set_gl(GraphicSet::G1),
            0x0F => self.charset.set_gl(GraphicSet::G0),
            0x1A => self.put_char(' '),
            0x84 => self.move_down_with_scroll(), // IND (8-bit)
            0x85 => self.do_next_line(),           // NEL (8-bit)
            0x88 => self.tabulator.set(self.cursor.x), // HTS (8-bit)
            0x8D => self.move_up_with_scroll(),    // RI (8-bit)
            0x8E => self.charset.single_shift(GraphicSet::G2),
            0x8F => self.charset.single_shift(GraphicSet::G3),
            0x96 => self.attrs.set_protected(true),  // SPA (8-bit)
            0x97 => self.attrs.set_protected(false), // EPA (8-bit)
            _ => {}
        }
    }

    fn esc(&mut self, intermediates: &[u8], final_byte: u8) {
        if self.vt52_mode {
            self.dispatch_vt52_escape(final_byte);
            return;
        }

        if let [designator] = *intermediates {
            if let Some(slot) = GraphicSet::from_designator(designator) {
                if let Some(designation) = charset::designation_from_final_byte(final_byte) {
                    self.charset.designate(slot, designation);
                }
                return;
            }
        }

        match final_byte {
            b'D' => self.move_down_with_scroll(),
            b'E' => self.do_next_line(),
            b'H' => self.tabulator.set(self.cursor.x),
            b'M' => self.move_up_with_scroll(),
            b'N' => self.charset.single_shift(GraphicSet::G2),
            b'O' => self.charset.single_shift(GraphicSet::G3),
            b'7' => self.save_state(),
            b'8' => self.restore_state(),
            b'c' => self.hard_reset(),
            b'V' => self.attrs.set_protected(true),  // SPA
            b'W' => self.attrs.set_protected(false), // EPA
            b'Z' => self.writer.write(&super::response::device_attributes(self.mode)),
            _ => {}
        }
    }

    fn csi(&mut self, private: Option<u8>, params: &[u16], intermediates: &[u8], final_byte: u8) {
        self.dispatch_csi(private, params, intermediates, final_byte);
    }
}
