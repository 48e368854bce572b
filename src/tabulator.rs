//! Horizontal tab stops (HTS/TBC) with a default-step fallback.

use std::collections::BTreeSet;

/// Ordered set of tab stop columns, plus a default step used when the
/// set has no stop at or past the query column.
#[derive(Debug, Clone)]
pub struct Tabulator {
    stops: BTreeSet<usize>,
    default_step: usize,
    width: usize,
}

impl Tabulator {
    /// A tabulator with no explicit stops and an 8-column default step.
    pub fn new(width: usize) -> Self {
        Self { stops: BTreeSet::new(), default_step: 8, width: width.max(1) }
    }

    /// Set a tab stop at `col` (HTS). Out-of-range columns are ignored.
    pub fn set(&mut self, col: usize) {
        if col < self.width {
            self.stops.insert(col);
        }
    }

    /// Clear the tab stop at `col` (TBC mode 0).
    pub fn clear(&mut self, col: usize) {
        self.stops.remove(&col);
    }

    /// Clear every tab stop (TBC mode 3).
    pub fn clear_all(&mut self) {
        self.stops.clear();
    }

    /// Change the fallback step. Zero disables the fallback entirely.
    pub fn set_default_step(&mut self, step: usize) {
        self.default_step = step;
    }

    pub fn resize(&mut self, width: usize) {
        self.width = width.max(1);
        self.stops.retain(|&c| c < self.width);
    }

    /// The least explicit stop at or past `from`, else the fallback
    /// step's next multiple, else the last column.
    pub fn next_tab(&self, from: usize) -> usize {
        let last_col = self.width - 1;
        if let Some(&stop) = self.stops.range(from..).next() {
            return stop.min(last_col);
        }
        if self.default_step > 0 {
            let step = self.default_step;
            let next = (from + 1).div_ceil(step) * step;
            return next.min(last_col);
        }
        last_col
    }

    /// The greatest explicit stop strictly before `from`, else column 0.
    pub fn previous_tab(&self, from: usize) -> usize {
        self.stops.range(..from).next_back().copied().unwrap_or(0)
    }

    /// Signed gap to the next tab stop.
    pub fn next_width(&self, from: usize) -> usize {
        self.next_tab(from).saturating_sub(from)
    }

    /// Signed gap to the previous tab stop.
    pub fn prev_width(&self, from: usize) -> usize {
        from.saturating_sub(self.previous_tab(from))
    }
}

#[cfg(test)]
mod tests {
    use super::Tabulator;

    #[test]
    fn next_tab_without_any_stops_falls_back_to_default_step() {
        let tab = Tabulator::new(80);
        assert_eq!(tab.next_tab(0), 8);
        assert_eq!(tab.next_tab(8), 16);
        assert_eq!(tab.next_tab(9), 16);
    }

    #[test]
    fn next_tab_prefers_explicit_stop_over_fallback() {
        let mut tab = Tabulator::new(80);
        tab.set(5);
        assert_eq!(tab.next_tab(0), 5);
    }

    #[test]
    fn next_tab_clamps_to_last_column() {
        let tab = Tabulator::new(10);
        assert_eq!(tab.next_tab(9), 9);
    }

    #[test]
    fn clear_removes_a_single_stop() {
        let mut tab = Tabulator::new(80);
        tab.set(10);
        tab.set(20);
        tab.clear(10);
        assert_eq!(tab.next_tab(0), 20);
    }

    #[test]
    fn clear_all_leaves_only_the_fallback() {
        let mut tab = Tabulator::new(80);
        tab.set(10);
        tab.clear_all();
        assert_eq!(tab.next_tab(0), 8);
    }

    #[test]
    fn previous_tab_before_any_stop_is_zero() {
        let tab = Tabulator::new(80);
        assert_eq!(tab.previous_tab(5), 0);
    }

    #[test]
    fn previous_tab_finds_nearest_stop_strictly_before() {
        let mut tab = Tabulator::new(80);
        tab.set(10);
        tab.set(20);
        assert_eq!(tab.previous_tab(20), 10);
        assert_eq!(tab.previous_tab(21), 20);
    }

    #[test]
    fn resize_drops_stops_past_new_width() {
        let mut tab = Tabulator::new(80);
        tab.set(70);
        tab.resize(40);
        assert_eq!(tab.previous_tab(80), 0);
    }

    #[test]
    fn zero_default_step_stops_at_last_column() {
        let mut tab = Tabulator::new(10);
        tab.set_default_step(0);
        assert_eq!(tab.next_tab(0), 9);
    }
}
