//! The VT52 sub-grammar used when DECANM is off.

use rterm_surface::{Direction, EraseMode, Modes, Screen};

use crate::control;
use crate::output::OutputSink;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum State {
    #[default]
    Ground,
    Escape,
    /// Waiting for the row byte of a `Y` direct cursor address.
    Dca1,
    /// Waiting for the column byte, with the row already read.
    Dca2,
}

/// A small Mealy machine: GROUND -> ESCAPE -> (GROUND | DCA1 -> DCA2 ->
/// GROUND). VT52 has no UTF-8 or multi-byte concept; bytes map straight
/// to code points.
#[derive(Debug, Default)]
pub struct Vt52Parser {
    state: State,
    row: usize,
}

impl Vt52Parser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step<O: OutputSink>(&mut self, screen: &mut Screen, sink: &mut O, answerback: &str, byte: u8) {
        match self.state {
            State::Ground => self.step_ground(screen, sink, answerback, byte),
            State::Escape => self.step_escape(screen, sink, byte),
            State::Dca1 => {
                self.row = byte.wrapping_sub(0x20) as usize;
                self.state = State::Dca2;
            }
            State::Dca2 => {
                let col = byte.wrapping_sub(0x20) as usize;
                screen.warpto(col, self.row);
                self.state = State::Ground;
            }
        }
    }

    fn step_ground<O: OutputSink>(&mut self, screen: &mut Screen, sink: &mut O, answerback: &str, byte: u8) {
        if byte == 0x1b {
            self.state = State::Escape;
            return;
        }
        if byte <= 0x1f {
            control::execute(screen, sink, answerback, byte);
        } else {
            screen.putch(byte as u32);
        }
    }

    fn step_escape<O: OutputSink>(&mut self, screen: &mut Screen, sink: &mut O, byte: u8) {
        self.state = State::Ground;
        match byte {
            b'A' => screen.move_cursor(Direction::Up, 1),
            b'B' => screen.move_cursor(Direction::Down, 1),
            b'C' => screen.move_cursor(Direction::Right, 1),
            b'D' => screen.move_cursor(Direction::Left, 1),
            b'F' | b'G' => {} // special graphics character set: stubbed.
            b'H' => screen.warpto(0, 0),
            b'I' => screen.revline(),
            b'J' => screen.erase_display(EraseMode::ToEnd),
            b'K' => screen.erase_line(EraseMode::ToEnd),
            b'Y' => self.state = State::Dca1,
            b'Z' => sink.write(b"\x1b/Z"),
            b'=' => screen.modes.insert(Modes::DECKPAM),
            b'>' => screen.modes.remove(Modes::DECKPAM),
            b'<' => screen.modes.insert(Modes::DECANM),
            _ => log::debug!("unknown VT52 escape {byte:#04x}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::RecordingSink;

    #[test]
    fn direct_cursor_address() {
        let mut screen = Screen::new(80, 24);
        let mut sink = RecordingSink::default();
        let mut vt52 = Vt52Parser::new();
        for &b in b"\x1bY(+" {
            vt52.step(&mut screen, &mut sink, "", b);
        }
        assert_eq!((screen.cursor.x, screen.cursor.y), (0x2b - 0x20, 0x28 - 0x20));
    }

    #[test]
    fn enters_ansi_mode() {
        let mut screen = Screen::new(80, 24);
        let mut sink = RecordingSink::default();
        let mut vt52 = Vt52Parser::new();
        screen.modes.remove(Modes::DECANM);
        for &b in b"\x1b<" {
            vt52.step(&mut screen, &mut sink, "", b);
        }
        assert!(screen.modes.contains(Modes::DECANM));
    }

    #[test]
    fn identify_reply() {
        let mut screen = Screen::new(80, 24);
        let mut sink = RecordingSink::default();
        let mut vt52 = Vt52Parser::new();
        for &b in b"\x1bZ" {
            vt52.step(&mut screen, &mut sink, "", b);
        }
        assert_eq!(sink.written, b"\x1b/Z");
    }
}
