//! In-line and in-screen editing operations: character writes, insert,
//! delete, and erase.

use super::ScreenBuffer;
use crate::cell::{Attrs, Cell};

/// Which part of a line or screen an erase operation clears, relative
/// to the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EraseMode {
    /// From the cursor to the end.
    ToEnd,
    /// From the start to the cursor, inclusive.
    ToStart,
    /// The whole line or screen.
    All,
}

impl ScreenBuffer {
    /// Inserts `count` copies of `ch` at `idx`, shifting the rest of
    /// the line right and dropping cells pushed past the right edge.
    pub fn insert_chars(&mut self, idx: usize, ch: char, attrs: Attrs, count: usize) {
        let row = idx / self.width;
        let col = idx - row * self.width;
        let row_start = row * self.width;
        let count = count.min(self.width - col);

        for i in (col + count..self.width).rev() {
            self.cells[row_start + i] = self.cells[row_start + i - count];
        }
        for i in col..col + count {
            self.cells[row_start + i] = Cell::new(ch, attrs);
        }
        for i in row_start..row_start + self.width {
            self.mark_dirty(i);
        }
    }

    /// Removes `count` cells at `idx`, shifting the remainder of the
    /// line left and padding the vacated right portion with blanks
    /// carrying `attrs`.
    pub fn delete_chars(&mut self, idx: usize, attrs: Attrs, count: usize) {
        let row = idx / self.width;
        let col = idx - row * self.width;
        let row_start = row * self.width;
        let count = count.min(self.width - col);

        for i in col..self.width - count {
            self.cells[row_start + i] = self.cells[row_start + i + count];
        }
        for i in self.width - count..self.width {
            self.cells[row_start + i] = Cell::blank(attrs);
        }
        for i in row_start..row_start + self.width {
            self.mark_dirty(i);
        }
    }

    /// Erases part of the line containing `idx` (EL). Protected cells
    /// (DECSCA) survive unless `keep_protected` is false.
    pub fn erase_line(&mut self, idx: usize, mode: EraseMode, attrs: Attrs, keep_protected: bool) {
        let row = idx / self.width;
        let col = idx - row * self.width;
        let row_start = row * self.width;
        let (from, to) = match mode {
            EraseMode::ToEnd => (col, self.width),
            EraseMode::ToStart => (0, col + 1),
            EraseMode::All => (0, self.width),
        };
        for i in row_start + from..row_start + to {
            if keep_protected && self.cells[i].attrs.protected() {
                continue;
            }
            self.cells[i] = Cell::blank(attrs);
            self.mark_dirty(i);
        }
    }

    /// Erases part of the screen relative to `idx` (ED).
    pub fn erase_screen(&mut self, idx: usize, mode: EraseMode, attrs: Attrs, keep_protected: bool) {
        match mode {
            EraseMode::ToEnd => {
                self.erase_line(idx, EraseMode::ToEnd, attrs, keep_protected);
                let row = idx / self.width;
                self.erase_rows(row + 1..self.height, attrs, keep_protected);
            }
            EraseMode::ToStart => {
                self.erase_line(idx, EraseMode::ToStart, attrs, keep_protected);
                let row = idx / self.width;
                self.erase_rows(0..row, attrs, keep_protected);
            }
            EraseMode::All => {
                self.erase_rows(0..self.height, attrs, keep_protected);
            }
        }
    }

    fn erase_rows(&mut self, rows: std::ops::Range<usize>, attrs: Attrs, keep_protected: bool) {
        for row in rows {
            let start = row * self.width;
            for i in start..start + self.width {
                if keep_protected && self.cells[i].attrs.protected() {
                    continue;
                }
                self.cells[i] = Cell::blank(attrs);
                self.mark_dirty(i);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::EraseMode;
    use crate::cell::Attrs;
    use crate::screen::ScreenBuffer;

    #[test]
    fn insert_chars_shifts_right_and_drops_overflow() {
        let mut buf = ScreenBuffer::new(5, 1);
        for (i, ch) in "ABCDE".chars().enumerate() {
            buf.put(i, crate::cell::Cell::new(ch, Attrs::default()));
        }
        buf.insert_chars(1, 'X', Attrs::default(), 2);
        let text: String = buf.cells().iter().map(|c| c.ch).collect();
        assert_eq!(text, "AXXBC");
    }

    #[test]
    fn delete_chars_shifts_left_and_pads_blanks() {
        let mut buf = ScreenBuffer::new(5, 1);
        for (i, ch) in "ABCDE".chars().enumerate() {
            buf.put(i, crate::cell::Cell::new(ch, Attrs::default()));
        }
        buf.delete_chars(1, Attrs::default(), 2);
        let text: String = buf.cells().iter().map(|c| c.ch).collect();
        assert_eq!(text, "ADE  ");
    }

    #[test]
    fn erase_line_to_end() {
        let mut buf = ScreenBuffer::new(5, 1);
        for (i, ch) in "ABCDE".chars().enumerate() {
            buf.put(i, crate::cell::Cell::new(ch, Attrs::default()));
        }
        buf.erase_line(2, EraseMode::ToEnd, Attrs::default(), false);
        let text: String = buf.cells().iter().map(|c| c.ch).collect();
        assert_eq!(text, "AB   ");
    }

    #[test]
    fn erase_screen_all_clears_everything() {
        let mut buf = ScreenBuffer::new(3, 3);
        for i in 0..9 {
            buf.put(i, crate::cell::Cell::new('X', Attrs::default()));
        }
        buf.erase_screen(4, EraseMode::All, Attrs::default(), false);
        assert!(buf.cells().iter().all(|c| c.ch == ' '));
    }

    #[test]
    fn erase_keeps_protected_cells_when_requested() {
        let mut buf = ScreenBuffer::new(3, 1);
        let mut protected = Attrs::default();
        protected.set_protected(true);
        buf.put(1, crate::cell::Cell::new('P', protected));
        buf.erase_line(0, EraseMode::All, Attrs::default(), true);
        assert_eq!(buf.cell_at(1).ch, 'P');
        assert_eq!(buf.cell_at(0).ch, ' ');
    }
}
