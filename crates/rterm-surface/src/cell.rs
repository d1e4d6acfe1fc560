use crate::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Intensity {
    #[default]
    Normal,
    Bold,
    Faint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Blink {
    #[default]
    None,
    Slow,
    Fast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Underline {
    #[default]
    None,
    Single,
    Double,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Frame {
    #[default]
    None,
    Framed,
    Encircled,
}

/// The elementary screen unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Unicode scalar value; 0 denotes "empty" (the renderer substitutes
    /// U+0020).
    pub code_point: u32,
    pub background: Color,
    pub foreground: Color,
    /// Font index 0-9, selected by SGR 10-19.
    pub font: u8,
    pub intensity: Intensity,
    pub blink: Blink,
    pub underline: Underline,
    pub frame: Frame,
    pub italic: bool,
    /// Reverse video (SGR 7).
    pub negative: bool,
    pub crossed_out: bool,
    pub fraktur: bool,
    pub overline: bool,
}

impl Default for Cell {
    /// Default attributes: background = palette index 0, foreground =
    /// palette index 7, everything else cleared.
    fn default() -> Self {
        Self {
            code_point: 0,
            background: Color::Indexed(0),
            foreground: Color::Indexed(7),
            font: 0,
            intensity: Intensity::Normal,
            blink: Blink::None,
            underline: Underline::None,
            frame: Frame::None,
            italic: false,
            negative: false,
            crossed_out: false,
            fraktur: false,
            overline: false,
        }
    }
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        self.code_point == 0
    }
}
