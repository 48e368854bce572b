//! Scrolling within the active scroll region.
//!
//! Rows inside `[scroll_top, scroll_bottom]` rotate; rows outside the
//! region are untouched. Rotation keeps this O(width) per shifted
//! line rather than O(width * height).

use super::ScreenBuffer;
use crate::cell::{Attrs, Cell};

impl ScreenBuffer {
    /// Scrolls the region up by `n` lines: the top `n` lines are
    /// discarded, the rest move up, and `n` blank lines (carrying
    /// `attrs`) appear at the bottom of the region.
    pub fn scroll_up(&mut self, n: usize, attrs: Attrs) {
        let (top, bottom) = (self.scroll_top, self.scroll_bottom);
        let region_rows = bottom - top + 1;
        let n = n.min(region_rows);
        if n == 0 {
            return;
        }

        let width = self.width;
        let region = &mut self.cells[top * width..(bottom + 1) * width];
        region.rotate_left(n * width);
        for row in region_rows - n..region_rows {
            for cell in &mut region[row * width..(row + 1) * width] {
                *cell = Cell::blank(attrs);
            }
        }
        self.mark_all_dirty();
    }

    /// Scrolls the region down by `n` lines: the bottom `n` lines are
    /// discarded, the rest move down, and `n` blank lines appear at
    /// the top of the region.
    pub fn scroll_down(&mut self, n: usize, attrs: Attrs) {
        let (top, bottom) = (self.scroll_top, self.scroll_bottom);
        let region_rows = bottom - top + 1;
        let n = n.min(region_rows);
        if n == 0 {
            return;
        }

        let width = self.width;
        let region = &mut self.cells[top * width..(bottom + 1) * width];
        region.rotate_right(n * width);
        for row in 0..n {
            for cell in &mut region[row * width..(row + 1) * width] {
                *cell = Cell::blank(attrs);
            }
        }
        self.mark_all_dirty();
    }
}

#[cfg(test)]
mod tests {
    use crate::cell::{Attrs, Cell};
    use crate::screen::ScreenBuffer;

    fn fill_rows(buf: &mut ScreenBuffer) {
        for y in 0..buf.height() {
            let ch = char::from(b'A' + y as u8);
            for x in 0..buf.width() {
                let idx = buf.index(x, y);
                buf.put(idx, Cell::new(ch, Attrs::default()));
            }
        }
    }

    #[test]
    fn scroll_up_discards_top_and_blanks_bottom() {
        let mut buf = ScreenBuffer::new(3, 4);
        fill_rows(&mut buf);
        buf.scroll_up(1, Attrs::default());
        assert_eq!(buf.cell_at_xy(0, 0).ch, 'B');
        assert_eq!(buf.cell_at_xy(0, 1).ch, 'C');
        assert_eq!(buf.cell_at_xy(0, 2).ch, 'D');
        assert_eq!(buf.cell_at_xy(0, 3).ch, ' ');
    }

    #[test]
    fn scroll_down_discards_bottom_and_blanks_top() {
        let mut buf = ScreenBuffer::new(3, 4);
        fill_rows(&mut buf);
        buf.scroll_down(1, Attrs::default());
        assert_eq!(buf.cell_at_xy(0, 0).ch, ' ');
        assert_eq!(buf.cell_at_xy(0, 1).ch, 'A');
        assert_eq!(buf.cell_at_xy(0, 3).ch, 'C');
    }

    #[test]
    fn scroll_respects_restricted_region() {
        let mut buf = ScreenBuffer::new(3, 5);
        fill_rows(&mut buf);
        buf.set_scroll_region(1, 3);
        buf.scroll_up(1, Attrs::default());
        assert_eq!(buf.cell_at_xy(0, 0).ch, 'A'); // outside region, untouched
        assert_eq!(buf.cell_at_xy(0, 1).ch, 'C');
        assert_eq!(buf.cell_at_xy(0, 2).ch, 'D');
        assert_eq!(buf.cell_at_xy(0, 3).ch, ' ');
        assert_eq!(buf.cell_at_xy(0, 4).ch, 'E'); // outside region, untouched
    }

    #[test]
    fn scroll_by_more_than_region_height_clears_it() {
        let mut buf = ScreenBuffer::new(3, 3);
        fill_rows(&mut buf);
        buf.scroll_up(10, Attrs::default());
        assert!(buf.cells().iter().all(|c| c.ch == ' '));
    }
}
