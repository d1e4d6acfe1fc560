//! The 256-entry color palette and per-cell color references.

/// A color reference stored in a cell or on the cursor: either an index
/// into the palette, or a direct RGB triple. Which form is in use is the
/// discriminant itself, which doubles as the "truecolor" flag SGR 38/48
/// and the end-to-end scenarios refer to (`fg_truecolor`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Indexed(u8),
    Rgb(u8, u8, u8),
}

impl Color {
    pub fn is_truecolor(self) -> bool {
        matches!(self, Color::Rgb(..))
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::Indexed(0)
    }
}

/// An RGB triple, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// The fixed 256-entry color table: 0-15 standard/bright ANSI, 16-231 a
/// 6x6x6 color cube, 232-255 a grayscale ramp.
#[derive(Debug, Clone)]
pub struct Palette {
    entries: [Rgb; 256],
}

const CUBE_STEPS: [u8; 6] = [0x00, 0x5f, 0x87, 0xaf, 0xd7, 0xff];

const ANSI_16: [Rgb; 16] = [
    Rgb::new(0x00, 0x00, 0x00),
    Rgb::new(0xcd, 0x00, 0x00),
    Rgb::new(0x00, 0xcd, 0x00),
    Rgb::new(0xcd, 0xcd, 0x00),
    Rgb::new(0x00, 0x00, 0xee),
    Rgb::new(0xcd, 0x00, 0xcd),
    Rgb::new(0x00, 0xcd, 0xcd),
    Rgb::new(0xe5, 0xe5, 0xe5),
    Rgb::new(0x7f, 0x7f, 0x7f),
    Rgb::new(0xff, 0x00, 0x00),
    Rgb::new(0x00, 0xff, 0x00),
    Rgb::new(0xff, 0xff, 0x00),
    Rgb::new(0x5c, 0x5c, 0xff),
    Rgb::new(0xff, 0x00, 0xff),
    Rgb::new(0x00, 0xff, 0xff),
    Rgb::new(0xff, 0xff, 0xff),
];

impl Palette {
    /// Builds the factory-default palette described in the data model.
    pub fn factory() -> Self {
        let mut entries = [Rgb::default(); 256];
        entries[..16].copy_from_slice(&ANSI_16);

        let mut index = 16usize;
        for r in 0..6 {
            for g in 0..6 {
                for b in 0..6 {
                    entries[index] = Rgb::new(CUBE_STEPS[r], CUBE_STEPS[g], CUBE_STEPS[b]);
                    index += 1;
                }
            }
        }

        for step in 0..24 {
            let level = 0x08 + step * 0x0a;
            entries[232 + step as usize] = Rgb::new(level, level, level);
        }

        Self { entries }
    }

    pub fn get(&self, index: u8) -> Rgb {
        self.entries[index as usize]
    }

    /// Redefines a palette entry, used by OSC 4.
    pub fn set(&mut self, index: u8, rgb: Rgb) {
        self.entries[index as usize] = rgb;
    }

    pub fn resolve(&self, color: Color) -> Rgb {
        match color {
            Color::Indexed(i) => self.get(i),
            Color::Rgb(r, g, b) => Rgb::new(r, g, b),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::factory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_corners_match_dec_ansi() {
        let palette = Palette::factory();
        assert_eq!(palette.get(16), Rgb::new(0, 0, 0));
        assert_eq!(palette.get(231), Rgb::new(0xff, 0xff, 0xff));
    }

    #[test]
    fn grayscale_ramp_steps_by_0x0a() {
        let palette = Palette::factory();
        assert_eq!(palette.get(232), Rgb::new(0x08, 0x08, 0x08));
        assert_eq!(palette.get(255), Rgb::new(0xee, 0xee, 0xee));
    }

    #[test]
    fn truecolor_discriminant_is_the_flag() {
        assert!(!Color::Indexed(1).is_truecolor());
        assert!(Color::Rgb(1, 2, 3).is_truecolor());
    }
}
