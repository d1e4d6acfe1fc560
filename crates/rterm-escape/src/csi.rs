//! `csi_dispatch` — CSI sequences, including the `?`-private DEC mode
//! family.

use rterm_surface::{Direction, EraseMode, Modes, Screen};

use crate::output::OutputSink;
use crate::sgr;

fn param(params: &[i64], idx: usize) -> i64 {
    params.get(idx).copied().unwrap_or(0)
}

/// A movement-amount parameter: 0 or missing means `default`.
fn amount(params: &[i64], idx: usize, default: i64) -> usize {
    let v = param(params, idx);
    (if v == 0 { default } else { v }) as usize
}

pub fn dispatch<O: OutputSink>(
    screen: &mut Screen,
    sink: &mut O,
    params: &[i64],
    intermediates: &[u8],
    intermediates_overflowed: bool,
    final_byte: u8,
) {
    if intermediates_overflowed {
        log::debug!("CSI with overflowed intermediates, final={final_byte:#04x}");
        return;
    }

    match intermediates {
        [] => dispatch_ansi(screen, sink, params, final_byte),
        [b'?'] => dispatch_private(screen, params, final_byte),
        _ => log::debug!("unknown CSI intermediates={intermediates:?} final={final_byte:#04x}"),
    }
}

fn dispatch_ansi<O: OutputSink>(screen: &mut Screen, sink: &mut O, params: &[i64], final_byte: u8) {
    match final_byte {
        b'A' => screen.move_cursor(Direction::Up, amount(params, 0, 1)),
        b'B' => screen.move_cursor(Direction::Down, amount(params, 0, 1)),
        b'C' => screen.move_cursor(Direction::Right, amount(params, 0, 1)),
        b'D' => screen.move_cursor(Direction::Left, amount(params, 0, 1)),
        b'H' | b'f' => {
            let row = amount(params, 0, 1) - 1;
            let col = amount(params, 1, 1) - 1;
            let y = row + if screen.modes.contains(Modes::DECOM) {
                screen.scroll_top()
            } else {
                0
            };
            screen.warpto(col, y);
        }
        b'J' => match EraseMode::from_param(param(params, 0)) {
            Some(mode) => screen.erase_display(mode),
            None => log::debug!("unknown ED mode {}", param(params, 0)),
        },
        b'K' => match EraseMode::from_param(param(params, 0)) {
            Some(mode) => screen.erase_line(mode),
            None => log::debug!("unknown EL mode {}", param(params, 0)),
        },
        b'P' => screen.delete_character(amount(params, 0, 1)),
        b'c' => {
            if param(params, 0) == 0 {
                sink.write(&[0x1b, b'[', b'?', b'1', b';', b'7', b'c']);
            }
        }
        b'g' => match param(params, 0) {
            0 => screen.clear_tab(screen.cursor.x),
            3 => screen.clear_all_tabs(),
            other => log::debug!("unknown TBC mode {other}"),
        },
        b'h' => set_modes(screen, params, true),
        b'l' => set_modes(screen, params, false),
        b'm' => sgr::apply(screen, params),
        b'n' => dispatch_dsr(screen, sink, param(params, 0)),
        b'q' => {} // DECLL: recognized, no-op.
        b'r' => dispatch_decstbm(screen, params),
        _ => log::debug!("unknown CSI final={final_byte:#04x} params={params:?}"),
    }
}

fn set_modes(screen: &mut Screen, params: &[i64], value: bool) {
    for &p in params {
        match p {
            20 => screen.modes.set(Modes::LNM, value),
            other => log::debug!("unknown SM/RM parameter {other}"),
        }
    }
}

fn dispatch_dsr<O: OutputSink>(screen: &Screen, sink: &mut O, mode: i64) {
    match mode {
        5 => sink.write(&[0x1b, b'[', b'0', b'n']),
        6 => {
            let row = if screen.modes.contains(Modes::DECOM) {
                screen.cursor.y - screen.scroll_top() + 1
            } else {
                screen.cursor.y + 1
            };
            let col = screen.cursor.x + 1;
            sink.write(format!("\x1b[{row};{col}R").as_bytes());
        }
        other => log::debug!("unknown DSR mode {other}"),
    }
}

fn dispatch_decstbm(screen: &mut Screen, params: &[i64]) {
    let mut top = param(params, 0);
    if top == 0 {
        top = 1;
    }
    let mut bottom = param(params, 1);
    if bottom == 0 {
        bottom = screen.height() as i64;
    }
    if top < bottom {
        screen.scroll_region((top - 1) as usize, (bottom - 1) as usize);
    }
}

fn dispatch_private(screen: &mut Screen, params: &[i64], final_byte: u8) {
    let value = match final_byte {
        b'h' => true,
        b'l' => false,
        _ => {
            log::debug!("unknown private CSI final={final_byte:#04x}");
            return;
        }
    };

    for &p in params {
        match p {
            1 => screen.modes.set(Modes::DECCKM, value),
            2 => screen.modes.set(Modes::DECANM, value),
            3 => {
                let width = if value { 132 } else { 80 };
                screen.resize(width, screen.height());
                screen.erase_display(EraseMode::All);
            }
            5 => screen.modes.set(Modes::DECSCNM, value),
            6 => {
                screen.modes.set(Modes::DECOM, value);
                let y = if value { screen.scroll_top() } else { 0 };
                screen.warpto(0, y);
            }
            7 => screen.modes.set(Modes::DECAWM, value),
            8 => screen.modes.set(Modes::DECARM, value),
            25 => screen.modes.set(Modes::DECTCEM, value),
            other => log::debug!("unknown DEC private mode {other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::RecordingSink;

    #[test]
    fn cup_places_cursor_one_based() {
        let mut screen = Screen::new(80, 24);
        let mut sink = RecordingSink::default();
        dispatch(&mut screen, &mut sink, &[5, 10], &[], false, b'H');
        assert_eq!((screen.cursor.x, screen.cursor.y), (9, 4));
    }

    #[test]
    fn cursor_position_report() {
        let mut screen = Screen::new(80, 24);
        let mut sink = RecordingSink::default();
        screen.warpto(5, 10);
        dispatch(&mut screen, &mut sink, &[6], &[], false, b'n');
        assert_eq!(sink.written, b"\x1b[11;6R");
    }

    #[test]
    fn decstbm_rejects_inverted_region() {
        let mut screen = Screen::new(80, 24);
        let mut sink = RecordingSink::default();
        dispatch(&mut screen, &mut sink, &[10, 5], &[], false, b'r');
        assert_eq!((screen.scroll_top(), screen.scroll_bottom()), (0, 23));
    }

    #[test]
    fn deccolm_resizes_and_clears() {
        let mut screen = Screen::new(80, 24);
        let mut sink = RecordingSink::default();
        screen.putch(b'x' as u32);
        dispatch(&mut screen, &mut sink, &[3], &[b'?'], false, b'h');
        assert_eq!(screen.width(), 132);
        assert_eq!(screen.cell(0, 0).code_point, 0);
    }
}
