//! SGR (Select Graphic Rendition) parameter iteration.

use rterm_surface::{Blink, Cell, Color, Frame, Intensity, Screen, Underline};

/// Applies one CSI `m` sequence's parameters to the cursor's working
/// attribute block. An empty parameter list is `[0]` (reset) per the
/// usual CSI convention.
pub fn apply(screen: &mut Screen, params: &[i64]) {
    if params.is_empty() {
        reset(screen);
        return;
    }

    let mut i = 0;
    while i < params.len() {
        let p = params[i];
        match p {
            0 => reset(screen),
            1 => screen.cursor.attrs.intensity = Intensity::Bold,
            2 => screen.cursor.attrs.intensity = Intensity::Faint,
            22 => screen.cursor.attrs.intensity = Intensity::Normal,
            3 => screen.cursor.attrs.italic = true,
            23 => {
                screen.cursor.attrs.italic = false;
                screen.cursor.attrs.fraktur = false;
            }
            4 => screen.cursor.attrs.underline = Underline::Single,
            21 => screen.cursor.attrs.underline = Underline::Double,
            24 => screen.cursor.attrs.underline = Underline::None,
            5 => screen.cursor.attrs.blink = Blink::Slow,
            6 => screen.cursor.attrs.blink = Blink::Fast,
            25 => screen.cursor.attrs.blink = Blink::None,
            7 => screen.cursor.attrs.negative = true,
            27 => screen.cursor.attrs.negative = false,
            8 => screen.cursor.conceal = true,
            28 => screen.cursor.conceal = false,
            9 => screen.cursor.attrs.crossed_out = true,
            29 => screen.cursor.attrs.crossed_out = false,
            20 => screen.cursor.attrs.fraktur = true,
            30..=37 => screen.cursor.attrs.foreground = Color::Indexed((p - 30) as u8),
            40..=47 => screen.cursor.attrs.background = Color::Indexed((p - 40) as u8),
            90..=97 => screen.cursor.attrs.foreground = Color::Indexed((p - 90) as u8 + 8),
            100..=107 => screen.cursor.attrs.background = Color::Indexed((p - 100) as u8 + 8),
            38 | 48 => match extended_color(&params[i..]) {
                Some((color, consumed)) => {
                    if p == 38 {
                        screen.cursor.attrs.foreground = color;
                    } else {
                        screen.cursor.attrs.background = color;
                    }
                    i += consumed;
                    continue;
                }
                None => {
                    log::debug!("SGR {p} with insufficient parameters, aborting iteration");
                    return;
                }
            },
            39 => screen.cursor.attrs.foreground = Cell::default().foreground,
            49 => screen.cursor.attrs.background = Cell::default().background,
            51 => screen.cursor.attrs.frame = Frame::Framed,
            52 => screen.cursor.attrs.frame = Frame::Encircled,
            54 => screen.cursor.attrs.frame = Frame::None,
            53 => screen.cursor.attrs.overline = true,
            55 => screen.cursor.attrs.overline = false,
            10..=19 => screen.cursor.attrs.font = (p - 10) as u8,
            _ => log::debug!("unknown SGR parameter {p}"),
        }
        i += 1;
    }
}

fn reset(screen: &mut Screen) {
    screen.cursor.attrs = Cell::default();
    screen.cursor.conceal = false;
}

/// Parses the `2;R;G;B` or `5;N` tail following an SGR 38/48 parameter.
/// Returns the resolved color and how many parameters (including the
/// leading 38/48) were consumed.
fn extended_color(rest: &[i64]) -> Option<(Color, usize)> {
    match rest.get(1)? {
        5 => Some((Color::Indexed((*rest.get(2)?).clamp(0, 255) as u8), 3)),
        2 => {
            let r = (*rest.get(2)?).clamp(0, 255) as u8;
            let g = (*rest.get(3)?).clamp(0, 255) as u8;
            let b = (*rest.get(4)?).clamp(0, 255) as u8;
            Some((Color::Rgb(r, g, b), 5))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_red_then_reset() {
        let mut screen = Screen::new(80, 24);
        apply(&mut screen, &[1, 31]);
        assert_eq!(screen.cursor.attrs.intensity, Intensity::Bold);
        assert_eq!(screen.cursor.attrs.foreground, Color::Indexed(1));
        apply(&mut screen, &[0]);
        assert_eq!(screen.cursor.attrs, Cell::default());
    }

    #[test]
    fn truecolor_foreground() {
        let mut screen = Screen::new(80, 24);
        apply(&mut screen, &[38, 2, 10, 20, 30]);
        assert_eq!(screen.cursor.attrs.foreground, Color::Rgb(10, 20, 30));
    }

    #[test]
    fn insufficient_extended_color_params_stops_iteration() {
        let mut screen = Screen::new(80, 24);
        apply(&mut screen, &[38, 2, 10]);
        assert_eq!(screen.cursor.attrs, Cell::default());
    }
}
