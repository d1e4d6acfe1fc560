//! The `execute(byte)` control-code table, shared by the ANSI and VT52
//! input paths.

use rterm_surface::{CharsetSlot, Direction, Modes, Screen};

use crate::output::OutputSink;

pub fn execute<O: OutputSink>(screen: &mut Screen, sink: &mut O, answerback: &str, byte: u8) {
    match byte {
        0x05 => sink.write(answerback.as_bytes()),
        0x07 => sink.bell(),
        0x08 => screen.move_cursor(Direction::Left, 1),
        0x09 => screen.tab(),
        0x0a | 0x0b | 0x0c => {
            screen.newline();
            if screen.modes.contains(Modes::LNM) {
                screen.cursor.x = 0;
            }
        }
        0x0d => {
            screen.cursor.x = 0;
            screen.cursor.last_column = false;
        }
        0x0e => {
            screen.cursor.shift_gl(CharsetSlot::G1);
            screen.modes.insert(Modes::SHIFT_OUT);
        }
        0x0f => {
            screen.cursor.shift_gl(CharsetSlot::G0);
            screen.modes.remove(Modes::SHIFT_OUT);
        }
        0x11 => screen.modes.remove(Modes::TRANSMIT_DISABLED),
        0x13 => screen.modes.insert(Modes::TRANSMIT_DISABLED),
        _ => log::trace!("unhandled control byte {byte:#04x}"),
    }
}
