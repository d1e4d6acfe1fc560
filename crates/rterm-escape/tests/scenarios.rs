//! End-to-end scenarios driving a byte stream through the parser, the
//! interpreter, and the screen together, the way a pseudoterminal's output
//! would in production.

use rterm_escape::{Interpreter, RecordingSink};
use rterm_surface::{Color, Intensity, Modes};

fn interpreter(width: usize, height: usize) -> Interpreter<RecordingSink> {
    Interpreter::new(width, height, String::new(), RecordingSink::default())
}

#[test]
fn plain_text_lands_in_the_first_row() {
    let mut term = interpreter(80, 24);
    term.feed(b"Hello");

    for (x, expected) in b"Hello".iter().enumerate() {
        assert_eq!(term.screen.cell(x, 0).code_point, *expected as u32);
    }
    assert_eq!(term.screen.cursor.x, 5);
    assert_eq!(term.screen.cursor.y, 0);
    assert!(!term.screen.cursor.last_column);
}

#[test]
fn absolute_cursor_addressing_moves_before_printing() {
    let mut term = interpreter(80, 24);
    term.feed(b"\x1b[5;10HX");

    assert_eq!(term.screen.cell(9, 4).code_point, b'X' as u32);
    assert_eq!(term.screen.cursor.x, 10);
    assert_eq!(term.screen.cursor.y, 4);
}

#[test]
fn autowrap_carries_the_next_character_to_the_next_line() {
    let mut term = interpreter(80, 24);
    term.screen.modes.insert(Modes::DECAWM);
    term.screen.cursor.x = 79;
    term.screen.cursor.y = 0;

    term.feed(b"A");
    assert_eq!(term.screen.cell(79, 0).code_point, b'A' as u32);
    assert!(term.screen.cursor.last_column);

    term.feed(b"B");
    assert_eq!(term.screen.cell(0, 1).code_point, b'B' as u32);
    assert_eq!(term.screen.cursor.x, 1);
    assert_eq!(term.screen.cursor.y, 1);
}

#[test]
fn linefeed_at_the_bottom_margin_scrolls_the_screen() {
    let mut term = interpreter(80, 24);
    for y in 0..24 {
        term.screen.cursor.x = 0;
        term.screen.cursor.y = y;
        term.screen.putch(b'0' as u32 + (y as u32 % 10));
    }
    term.screen.cursor.x = 0;
    term.screen.cursor.y = 23;

    term.feed(b"\n");

    assert_eq!(term.screen.cell(0, 0).code_point, b'1' as u32);
    assert_eq!(term.screen.cell(0, 22).code_point, b'3' as u32);
    assert!(term.screen.cell(0, 23).is_empty());
    assert_eq!(term.screen.cursor.x, 0);
    assert_eq!(term.screen.cursor.y, 23);
}

#[test]
fn sgr_bold_red_applies_and_resets() {
    let mut term = interpreter(80, 24);
    term.feed(b"\x1b[1;31mX\x1b[0mY");

    let x = term.screen.cell(0, 0);
    assert_eq!(x.intensity, Intensity::Bold);
    assert_eq!(x.foreground, Color::Indexed(1));
    assert!(!x.foreground.is_truecolor());

    let y = term.screen.cell(1, 0);
    assert_eq!(y.intensity, Intensity::Normal);
    assert_eq!(y.foreground, Color::Indexed(7));
}

#[test]
fn cursor_position_report_is_one_based() {
    let mut term = interpreter(80, 24);
    term.screen.cursor.x = 5;
    term.screen.cursor.y = 10;

    term.feed(b"\x1b[6n");

    assert_eq!(term.sink.written, b"\x1b[11;6R".to_vec());
}
