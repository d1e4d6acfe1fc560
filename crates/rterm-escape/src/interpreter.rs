//! Ties the parser, the UTF-8 assembler, and the VT52 sub-parser together
//! and drives the screen from the byte stream a pseudoterminal produces.

use rterm_surface::{Modes, Screen};
use rterm_vte::{Actor, Parser};

use crate::esc::EscEffect;
use crate::output::OutputSink;
use crate::utf8::Utf8Decoder;
use crate::vt52::Vt52Parser;
use crate::{csi, esc, osc};

/// The full interpreter: ANSI parser, VT52 sub-parser, UTF-8 assembler, and
/// the screen they all mutate. Generic over the output sink so the
/// pseudoterminal layer can supply whatever writes bytes back to the shell.
pub struct Interpreter<O: OutputSink> {
    pub screen: Screen,
    parser: Parser,
    utf8: Utf8Decoder,
    vt52: Vt52Parser,
    answerback: String,
    pub sink: O,
}

impl<O: OutputSink> Interpreter<O> {
    pub fn new(width: usize, height: usize, answerback: impl Into<String>, sink: O) -> Self {
        Self {
            screen: Screen::new(width, height),
            parser: Parser::new(),
            utf8: Utf8Decoder::new(),
            vt52: Vt52Parser::new(),
            answerback: answerback.into(),
            sink,
        }
    }

    /// Feeds a chunk of bytes read from the pseudoterminal.
    pub fn feed(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.feed_byte(byte);
        }
    }

    fn feed_byte(&mut self, byte: u8) {
        if self.screen.modes.contains(Modes::DECANM) {
            let mut full_reset = false;
            let mut performer = Performer {
                screen: &mut self.screen,
                utf8: &mut self.utf8,
                sink: &mut self.sink,
                answerback: &self.answerback,
                full_reset: &mut full_reset,
            };
            self.parser.advance(&mut performer, byte);
            if full_reset {
                self.full_reset();
            }
        } else {
            self.vt52.step(&mut self.screen, &mut self.sink, &self.answerback, byte);
        }
    }

    /// RIS: resets the screen, the UTF-8 decoder, the VT52 sub-parser, and
    /// returns the ANSI parser to GROUND.
    pub fn full_reset(&mut self) {
        self.screen.reset();
        self.utf8.reset();
        self.vt52 = Vt52Parser::new();
        self.parser = Parser::new();
    }
}

/// Borrows the interpreter's disjoint fields for the duration of one
/// `Parser::advance` call, so the parser itself isn't also borrowed.
struct Performer<'a, O: OutputSink> {
    screen: &'a mut Screen,
    utf8: &'a mut Utf8Decoder,
    sink: &'a mut O,
    answerback: &'a str,
    full_reset: &'a mut bool,
}

impl<'a, O: OutputSink> Actor for Performer<'a, O> {
    fn print(&mut self, byte: u8) {
        for &scalar in self.utf8.feed(byte).as_slice() {
            self.screen.putch(scalar);
        }
    }

    fn execute(&mut self, byte: u8) {
        crate::control::execute(self.screen, self.sink, self.answerback, byte);
    }

    fn cancel(&mut self) {
        self.utf8.reset();
        self.screen.putch(0xfffd);
    }

    fn osc_dispatch(&mut self, params: &[&[u8]]) {
        osc::dispatch(self.screen, self.sink, params);
    }

    fn csi_dispatch(&mut self, params: &[i64], intermediates: &[u8], ignored_excess_intermediates: bool, final_byte: u8) {
        csi::dispatch(self.screen, self.sink, params, intermediates, ignored_excess_intermediates, final_byte);
    }

    fn esc_dispatch(&mut self, intermediates: &[u8], ignored_excess_intermediates: bool, final_byte: u8) {
        if esc::dispatch(self.screen, self.sink, intermediates, ignored_excess_intermediates, final_byte) == EscEffect::FullReset {
            *self.full_reset = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::RecordingSink;

    #[test]
    fn plain_text_lands_on_screen() {
        let mut terp = Interpreter::new(80, 24, "", RecordingSink::default());
        terp.feed(b"Hello");
        assert_eq!(terp.screen.cell(0, 0).code_point, b'H' as u32);
        assert_eq!((terp.screen.cursor.x, terp.screen.cursor.y), (5, 0));
    }

    #[test]
    fn sgr_and_csi_move_through_the_full_pipeline() {
        let mut terp = Interpreter::new(80, 24, "", RecordingSink::default());
        terp.feed(b"\x1b[31mX");
        assert_eq!(
            terp.screen.cell(0, 0).foreground,
            rterm_surface::Color::Indexed(1)
        );
    }

    #[test]
    fn ris_clears_the_screen_and_decoder_state() {
        let mut terp = Interpreter::new(80, 24, "", RecordingSink::default());
        terp.feed(b"hello\x1bc");
        assert_eq!(terp.screen.cell(0, 0).code_point, 0);
        assert_eq!((terp.screen.cursor.x, terp.screen.cursor.y), (0, 0));
    }

    #[test]
    fn vt52_mode_routes_around_the_ansi_parser() {
        let mut terp = Interpreter::new(80, 24, "", RecordingSink::default());
        terp.screen.modes.remove(Modes::DECANM);
        terp.feed(b"\x1bY(+A");
        assert_eq!(terp.screen.cell(0x2b - 0x20, 0x28 - 0x20).code_point, b'A' as u32);
    }

    #[test]
    fn cancel_emits_replacement_character() {
        let mut terp = Interpreter::new(80, 24, "", RecordingSink::default());
        terp.feed(&[0x18]);
        assert_eq!(terp.screen.cell(0, 0).code_point, 0xfffd);
    }
}
