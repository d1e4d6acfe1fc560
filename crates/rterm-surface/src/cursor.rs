use crate::cell::Cell;
use crate::charset::{Charset, CharsetSlot};

/// The cursor: position, rendering attributes, and the charset designation
/// state that travels with DECSC/DECRC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    pub x: usize,
    pub y: usize,
    /// Attribute block stamped into cells on write. `code_point` is unused
    /// here and ignored when the cursor's attrs are copied into a cell.
    pub attrs: Cell,
    /// SGR 8: suppresses the written code point without clearing the
    /// attribute block. Stored on the cursor, not the cell.
    pub conceal: bool,
    /// Set once a write lands in the last column with DECAWM on; the next
    /// write performs CR+LF before printing. See the deferred-wrap design
    /// note.
    pub last_column: bool,
    g0: Charset,
    g1: Charset,
    g2: Charset,
    g3: Charset,
    gl: CharsetSlot,
    gr: CharsetSlot,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            attrs: Cell::default(),
            conceal: false,
            last_column: false,
            g0: Charset::ASCII,
            g1: Charset::ASCII,
            g2: Charset::ASCII,
            g3: Charset::ASCII,
            gl: CharsetSlot::G0,
            gr: CharsetSlot::G1,
        }
    }
}

impl Cursor {
    pub fn slot(&self, slot: CharsetSlot) -> Charset {
        match slot {
            CharsetSlot::G0 => self.g0,
            CharsetSlot::G1 => self.g1,
            CharsetSlot::G2 => self.g2,
            CharsetSlot::G3 => self.g3,
        }
    }

    pub fn designate(&mut self, slot: CharsetSlot, charset: Charset) {
        match slot {
            CharsetSlot::G0 => self.g0 = charset,
            CharsetSlot::G1 => self.g1 = charset,
            CharsetSlot::G2 => self.g2 = charset,
            CharsetSlot::G3 => self.g3 = charset,
        }
    }

    pub fn shift_gl(&mut self, slot: CharsetSlot) {
        self.gl = slot;
    }

    pub fn shift_gr(&mut self, slot: CharsetSlot) {
        self.gr = slot;
    }

    pub fn gl(&self) -> CharsetSlot {
        self.gl
    }

    pub fn gr(&self) -> CharsetSlot {
        self.gr
    }

    /// The charset currently mapped into GL, which `putch` consults for
    /// bytes in the 0x20-0x7E range.
    pub fn active_gl_charset(&self) -> Charset {
        self.slot(self.gl)
    }
}
