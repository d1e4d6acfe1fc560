//! `esc_dispatch` — ESC sequences with no CSI involved.

use rterm_surface::{Charset, CharsetSlot, LineDimensions, Modes, Screen};

use crate::output::OutputSink;

/// A side effect `dispatch` cannot perform itself because it only has
/// access to the screen, not the rest of the interpreter's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscEffect {
    None,
    /// `c` RIS: full reset, including the UTF-8 decoder and VT52 state.
    FullReset,
}

pub fn dispatch<O: OutputSink>(
    screen: &mut Screen,
    sink: &mut O,
    intermediates: &[u8],
    intermediates_overflowed: bool,
    final_byte: u8,
) -> EscEffect {
    if intermediates_overflowed {
        log::debug!("ESC with overflowed intermediates, final={final_byte:#04x}");
        return EscEffect::None;
    }

    match intermediates {
        [] => dispatch_simple(screen, sink, final_byte),
        [b'#'] => dispatch_hash(screen, final_byte),
        [marker @ (b'(' | b')' | b'*' | b'+')] => {
            designate_94(screen, *marker, final_byte);
            EscEffect::None
        }
        [marker @ (b'-' | b'.' | b'/')] => {
            designate_96(screen, *marker, final_byte);
            EscEffect::None
        }
        _ => {
            log::debug!("unknown ESC intermediates={intermediates:?} final={final_byte:#04x}");
            EscEffect::None
        }
    }
}

fn dispatch_simple<O: OutputSink>(screen: &mut Screen, sink: &mut O, final_byte: u8) -> EscEffect {
    match final_byte {
        b'7' => screen.save_cursor(),
        b'8' => screen.restore_cursor(),
        b'=' => screen.modes.insert(Modes::DECKPAM),
        b'>' => screen.modes.remove(Modes::DECKPAM),
        b'D' => screen.newline(),
        b'E' => {
            screen.cursor.x = 0;
            screen.newline();
        }
        b'M' => screen.revline(),
        b'H' => screen.set_tab(),
        b'F' => screen.warpto(0, screen.scroll_bottom()),
        b'Z' => sink.write(&[0x1b, b'[', b'?', b'1', b';', b'7', b'c']),
        b'c' => return EscEffect::FullReset,
        b'\\' => {}
        _ => log::debug!("unknown ESC final={final_byte:#04x}"),
    }
    EscEffect::None
}

fn dispatch_hash(screen: &mut Screen, final_byte: u8) -> EscEffect {
    match final_byte {
        b'3' => screen.set_current_line_dimensions(LineDimensions::DoubleHeightTop),
        b'4' => screen.set_current_line_dimensions(LineDimensions::DoubleHeightBottom),
        b'5' => screen.set_current_line_dimensions(LineDimensions::SingleWidth),
        b'6' => screen.set_current_line_dimensions(LineDimensions::DoubleWidth),
        b'8' => screen.fill_screen(b'E' as u32),
        _ => log::debug!("unknown ESC # final={final_byte:#04x}"),
    }
    EscEffect::None
}

fn charset_for(final_byte: u8) -> Charset {
    match final_byte {
        b'0' => Charset::DEC_SPECIAL_GRAPHICS,
        b'A' => Charset::UNITED_KINGDOM,
        b'B' => Charset::ASCII,
        _ => Charset::ASCII,
    }
}

fn designate_94(screen: &mut Screen, marker: u8, final_byte: u8) {
    let slot = match marker {
        b'(' => CharsetSlot::G0,
        b')' => CharsetSlot::G1,
        b'*' => CharsetSlot::G2,
        b'+' => CharsetSlot::G3,
        _ => unreachable!(),
    };
    screen.cursor.designate(slot, charset_for(final_byte));
}

fn designate_96(screen: &mut Screen, marker: u8, final_byte: u8) {
    let slot = match marker {
        b'-' => CharsetSlot::G1,
        b'.' => CharsetSlot::G2,
        b'/' => CharsetSlot::G3,
        _ => unreachable!(),
    };
    screen.cursor.designate(slot, charset_for(final_byte));
}
