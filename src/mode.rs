//! Terminal mode flags (DECSET/DECRST and friends).

use bitflags::bitflags;

bitflags! {
    /// Boolean terminal modes toggled by DECSET/DECRST, SM/RM, and a
    /// handful of controller-internal bits with no direct CSI mnemonic.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ModeFlags: u32 {
        /// DECOM — cursor addressing is relative to the scroll region.
        const ORIGIN                    = 1 << 0;
        /// DECSCNM — swap default foreground/background.
        const REVERSE_VIDEO             = 1 << 1;
        /// DECAWM — wrap to the next line at the right margin.
        const AUTO_WRAP                 = 1 << 2;
        /// LNM — linefeed also performs a carriage return.
        const AUTO_NEWLINE              = 1 << 3;
        /// IRM — inserted characters push the rest of the line right.
        const INSERT                    = 1 << 4;
        /// DECCOLM — currently in 132-column mode.
        const COLUMNS_132                = 1 << 5;
        /// DECCOLM is allowed to resize the screen (mode 40 gate).
        const COLUMNS_132_ENABLE         = 1 << 6;
        /// Encode controller responses with 8-bit C1 introducers.
        const EIGHT_BIT_RESPONSES       = 1 << 7;
        /// SM/RM mode 6 — standard (non-DEC-private) ED/EL erase only
        /// unprotected cells when set.
        const ERASURE_MODE              = 1 << 8;
        /// DECRVM/reverse wraparound — backspace at column 0 moves up a line.
        const REVERSE_WRAPAROUND        = 1 << 9;
        /// DECCKM — cursor keys send application sequences, not ANSI ones.
        const APPLICATION_CURSOR_KEYS   = 1 << 10;
    }
}

#[cfg(test)]
mod tests {
    use super::ModeFlags;

    #[test]
    fn default_is_empty() {
        assert!(ModeFlags::default().is_empty());
    }

    #[test]
    fn insert_and_auto_wrap_are_independent() {
        let mut mode = ModeFlags::empty();
        mode.insert(ModeFlags::AUTO_WRAP);
        assert!(mode.contains(ModeFlags::AUTO_WRAP));
        assert!(!mode.contains(ModeFlags::INSERT));
        mode.insert(ModeFlags::INSERT);
        mode.remove(ModeFlags::AUTO_WRAP);
        assert!(mode.contains(ModeFlags::INSERT));
        assert!(!mode.contains(ModeFlags::AUTO_WRAP));
    }
}
