use bitflags::bitflags;

bitflags! {
    /// The terminal's boolean mode set. Defaults are documented per-flag;
    /// [`Modes::default`] returns the reset state.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Modes: u32 {
        /// LF also performs CR.
        const LNM = 1 << 0;
        /// Cursor keys send SS3-prefixed sequences.
        const DECCKM = 1 << 1;
        /// ANSI mode; when cleared, the VT52 grammar is used.
        const DECANM = 1 << 2;
        /// 132/80-column switch; toggling triggers a resize.
        const DECCOLM = 1 << 3;
        /// Smooth-scroll hint.
        const DECSCLM = 1 << 4;
        /// Screen-wide reverse video, XORed with `cell.negative`.
        const DECSCNM = 1 << 5;
        /// Origin mode: cursor addressing is bounded by the scroll region.
        const DECOM = 1 << 6;
        /// Autowrap.
        const DECAWM = 1 << 7;
        /// Auto key-repeat.
        const DECARM = 1 << 8;
        /// Interlace hint.
        const DECINLM = 1 << 9;
        /// Show cursor.
        const DECTCEM = 1 << 10;
        /// Keypad application mode.
        const DECKPAM = 1 << 11;
        /// Shift Out state: selects GR vs GL for the 0x20-0x7E range.
        const SHIFT_OUT = 1 << 12;
        /// XOFF received, host input blocked.
        const TRANSMIT_DISABLED = 1 << 13;
    }
}

impl Default for Modes {
    fn default() -> Self {
        Modes::DECANM | Modes::DECSCLM | Modes::DECARM | Modes::DECINLM | Modes::DECTCEM
    }
}
