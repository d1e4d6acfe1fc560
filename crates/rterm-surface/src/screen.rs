use log::trace;
use unicode_width::UnicodeWidthChar;

use crate::cell::Cell;
use crate::color::Palette;
use crate::cursor::Cursor;
use crate::line::{Line, LineDimensions};
use crate::mode::Modes;

/// Direction for [`Screen::move_cursor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Which portion of a display/line an erase operation covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EraseMode {
    ToEnd,
    ToStart,
    All,
}

impl EraseMode {
    pub fn from_param(param: i64) -> Option<Self> {
        match param {
            0 => Some(EraseMode::ToEnd),
            1 => Some(EraseMode::ToStart),
            2 => Some(EraseMode::All),
            _ => None,
        }
    }
}

const DEFAULT_WIDTH: usize = 80;
const DEFAULT_HEIGHT: usize = 24;
const TAB_WIDTH: usize = 8;

/// The cell grid, cursor, mode flags, palette, tab stops and scroll region
/// that the interpreter mutates.
#[derive(Debug, Clone)]
pub struct Screen {
    width: usize,
    height: usize,
    lines: Vec<Line>,
    tab_stops: Vec<bool>,
    scroll_top: usize,
    scroll_bottom: usize,
    pub palette: Palette,
    pub modes: Modes,
    pub cursor: Cursor,
    pub saved_cursor: Cursor,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl Screen {
    pub fn new(width: usize, height: usize) -> Self {
        let mut screen = Self {
            width: width.max(1),
            height: height.max(1),
            lines: Vec::new(),
            tab_stops: Vec::new(),
            scroll_top: 0,
            scroll_bottom: height.max(1) - 1,
            palette: Palette::factory(),
            modes: Modes::default(),
            cursor: Cursor::default(),
            saved_cursor: Cursor::default(),
        };
        screen.resize(screen.width, screen.height);
        screen
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    pub fn scroll_bottom(&self) -> usize {
        self.scroll_bottom
    }

    pub fn line(&self, y: usize) -> &Line {
        &self.lines[y]
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn cell(&self, x: usize, y: usize) -> &Cell {
        self.lines[y].cell(x)
    }

    /// Sets the current row's dimension attribute (DECDHL/DECDWL/DECSWL).
    pub fn set_current_line_dimensions(&mut self, dimensions: LineDimensions) {
        let y = self.cursor.y;
        self.lines[y].dimensions = dimensions;
    }

    /// DECALN: fills every cell of the grid with `code_point` at default
    /// attributes, for the screen-alignment display.
    pub fn fill_screen(&mut self, code_point: u32) {
        for line in &mut self.lines {
            for cell in line.cells_mut() {
                *cell = Cell::default();
                cell.code_point = code_point;
            }
            line.dimensions = LineDimensions::SingleWidth;
        }
    }

    pub fn tab_stop(&self, x: usize) -> bool {
        self.tab_stops.get(x).copied().unwrap_or(false)
    }

    /// Allocates a new grid, reinitializes tab stops, sets the scroll
    /// region to the full height, and homes the cursor.
    pub fn resize(&mut self, width: usize, height: usize) {
        let width = width.max(1);
        let height = height.max(1);
        self.width = width;
        self.height = height;
        self.lines = (0..height).map(|_| Line::new(width)).collect();

        self.tab_stops = vec![false; width];
        let mut col = TAB_WIDTH;
        while col < width {
            self.tab_stops[col] = true;
            col += TAB_WIDTH;
        }

        self.scroll_top = 0;
        self.scroll_bottom = height - 1;
        self.cursor.x = 0;
        self.cursor.y = 0;
        self.cursor.last_column = false;
    }

    /// As `resize`, but also restores palette and mode defaults; the saved
    /// cursor becomes equal to the live cursor.
    pub fn reset(&mut self) {
        self.resize(self.width, self.height);
        self.palette = Palette::factory();
        self.modes = Modes::default();
        self.cursor = Cursor::default();
        self.saved_cursor = self.cursor.clone();
    }

    pub fn save_cursor(&mut self) {
        self.saved_cursor = self.cursor.clone();
    }

    pub fn restore_cursor(&mut self) {
        self.cursor = self.saved_cursor.clone();
    }

    /// Clamps `x` into `[0, width-1]` and `y` into the scroll region (when
    /// DECOM is on) or `[0, height-1]`, clearing `last_column`.
    pub fn warpto(&mut self, x: usize, y: usize) {
        let max_x = self.width - 1;
        let (min_y, max_y) = if self.modes.contains(Modes::DECOM) {
            (self.scroll_top, self.scroll_bottom)
        } else {
            (0, self.height - 1)
        };
        self.cursor.x = x.min(max_x);
        self.cursor.y = y.clamp(min_y, max_y);
        self.cursor.last_column = false;
    }

    pub fn move_cursor(&mut self, dir: Direction, n: usize) {
        let (x, y) = (self.cursor.x, self.cursor.y);
        match dir {
            Direction::Up => self.warpto(x, y.saturating_sub(n)),
            Direction::Down => self.warpto(x, y.saturating_add(n)),
            Direction::Left => self.warpto(x.saturating_sub(n), y),
            Direction::Right => self.warpto(x.saturating_add(n), y),
        }
    }

    /// If `cursor.y < scroll_bottom`, increments y; else scrolls the
    /// region up by one. Clears `last_column`. Does not touch `cursor.x`.
    pub fn newline(&mut self) {
        if self.cursor.y < self.scroll_bottom {
            self.cursor.y += 1;
        } else {
            self.scroll_up(1);
        }
        self.cursor.last_column = false;
    }

    /// If `cursor.y > scroll_top`, decrements y; else scrolls the region
    /// down by one. Clears `last_column`.
    pub fn revline(&mut self) {
        if self.cursor.y > self.scroll_top {
            self.cursor.y -= 1;
        } else {
            self.scroll_down(1);
        }
        self.cursor.last_column = false;
    }

    fn scroll_up(&mut self, n: usize) {
        let fill = self.fill_cell();
        for _ in 0..n {
            self.lines.remove(self.scroll_top);
            let mut blank = Line::new(self.width);
            blank.clear_to_default(fill);
            self.lines.insert(self.scroll_bottom, blank);
        }
    }

    fn scroll_down(&mut self, n: usize) {
        let fill = self.fill_cell();
        for _ in 0..n {
            self.lines.remove(self.scroll_bottom);
            let mut blank = Line::new(self.width);
            blank.clear_to_default(fill);
            self.lines.insert(self.scroll_top, blank);
        }
    }

    /// Default-attribute cell carrying the cursor's *current* rendering
    /// attributes, used to fill lines created by scrolling and erasing.
    fn fill_cell(&self) -> Cell {
        let mut cell = self.cursor.attrs;
        cell.code_point = 0;
        cell
    }

    /// Writes code point `cp` to the current cell.
    pub fn putch(&mut self, cp: u32) {
        if self.cursor.last_column {
            self.cursor.x = 0;
            self.newline();
        }

        let cp = self.cursor.active_gl_charset().translate(cp);

        let (x, y) = (self.cursor.x, self.cursor.y);
        {
            let mut cell = self.cursor.attrs;
            cell.code_point = if self.cursor.conceal { 0 } else { cp };
            *self.lines[y].cell_mut(x) = cell;
        }

        let glyph_width = char::from_u32(cp)
            .and_then(UnicodeWidthChar::width)
            .unwrap_or(1)
            .max(1) as usize;

        let doubled = matches!(
            self.lines[y].dimensions,
            LineDimensions::DoubleWidth
                | LineDimensions::DoubleHeightTop
                | LineDimensions::DoubleHeightBottom
        );
        let increment = if doubled { glyph_width * 2 } else { glyph_width };

        if self.cursor.x + increment >= self.width {
            self.cursor.last_column = self.modes.contains(Modes::DECAWM);
        } else {
            self.cursor.x += increment;
            self.cursor.last_column = false;
        }
    }

    pub fn erase_display(&mut self, mode: EraseMode) {
        let fill = self.fill_cell();
        let (cx, cy) = (self.cursor.x, self.cursor.y);
        match mode {
            EraseMode::All => {
                for y in 0..self.height {
                    self.lines[y].clear_to_default(fill);
                }
            }
            EraseMode::ToEnd => {
                self.erase_line_from(cy, cx, self.width, fill);
                for y in (cy + 1)..self.height {
                    self.lines[y].clear_to_default(fill);
                }
            }
            EraseMode::ToStart => {
                for y in 0..cy {
                    self.lines[y].clear_to_default(fill);
                }
                self.erase_line_from(cy, 0, cx + 1, fill);
            }
        }
    }

    pub fn erase_line(&mut self, mode: EraseMode) {
        let fill = self.fill_cell();
        let (cx, cy) = (self.cursor.x, self.cursor.y);
        match mode {
            EraseMode::All => self.lines[cy].clear_to_default(fill),
            EraseMode::ToEnd => self.erase_line_from(cy, cx, self.width, fill),
            EraseMode::ToStart => self.erase_line_from(cy, 0, cx + 1, fill),
        }
    }

    /// Clears `[start, end)` of row `y`. A partial erase that reaches the
    /// end of the row end-to-end also resets that line's dimensions.
    fn erase_line_from(&mut self, y: usize, start: usize, end: usize, fill: Cell) {
        let end = end.min(self.width);
        let line = &mut self.lines[y];
        for x in start..end {
            *line.cell_mut(x) = fill;
        }
        if start == 0 && end == self.width {
            line.dimensions = LineDimensions::SingleWidth;
        }
    }

    /// Drops `n` cells starting at `cursor.x`, shifting the remainder of
    /// the row left and filling vacated cells at the right with zeros
    /// (unlike erase, this does not carry the cursor's attributes).
    pub fn delete_character(&mut self, n: usize) {
        let (x, y) = (self.cursor.x, self.cursor.y);
        let width = self.width;
        let n = n.min(width - x);
        let line = &mut self.lines[y];
        line.cells_mut().copy_within((x + n)..width, x);
        for cell in &mut line.cells_mut()[(width - n)..width] {
            *cell = Cell::default();
        }
        self.cursor.last_column = false;
    }

    /// Advances x to the next set tab stop, clamped to `width-1`.
    pub fn tab(&mut self) {
        let mut x = self.cursor.x + 1;
        while x < self.width && !self.tab_stops[x] {
            x += 1;
        }
        self.cursor.x = x.min(self.width - 1);
    }

    pub fn set_tab(&mut self) {
        let x = self.cursor.x;
        self.tab_stops[x] = true;
    }

    pub fn clear_tab(&mut self, col: usize) {
        if col < self.tab_stops.len() {
            self.tab_stops[col] = false;
        }
    }

    pub fn clear_all_tabs(&mut self) {
        self.tab_stops.iter_mut().for_each(|t| *t = false);
    }

    /// Sets the inclusive scroll region if `top < bottom`, clamping
    /// `bottom` to `height-1`; then warps to (0, scroll_top if DECOM else
    /// 0).
    pub fn scroll_region(&mut self, top: usize, bottom: usize) {
        let bottom = bottom.min(self.height - 1);
        if top >= bottom {
            trace!("ignoring scroll region top={top} bottom={bottom}: inverted bounds");
            return;
        }
        self.scroll_top = top;
        self.scroll_bottom = bottom;
        let y = if self.modes.contains(Modes::DECOM) {
            self.scroll_top
        } else {
            0
        };
        self.warpto(0, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_matches_fresh_screen() {
        let mut screen = Screen::new(80, 24);
        screen.putch(b'x' as u32);
        screen.modes.insert(Modes::DECOM);
        screen.reset();
        let fresh = Screen::new(80, 24);
        assert_eq!(screen.cursor, fresh.cursor);
        assert_eq!(screen.modes, fresh.modes);
        assert_eq!(screen.scroll_top, fresh.scroll_top);
        assert_eq!(screen.scroll_bottom, fresh.scroll_bottom);
    }

    #[test]
    fn plain_text_lands_with_default_attrs() {
        let mut screen = Screen::new(80, 24);
        for b in b"Hello" {
            screen.putch(*b as u32);
        }
        for (i, expect) in b"Hello".iter().enumerate() {
            assert_eq!(screen.cell(i, 0).code_point, *expect as u32);
        }
        assert_eq!((screen.cursor.x, screen.cursor.y), (5, 0));
        assert!(!screen.cursor.last_column);
    }

    #[test]
    fn absolute_cursor_addressing() {
        let mut screen = Screen::new(80, 24);
        screen.warpto(9, 4);
        screen.putch(b'X' as u32);
        assert_eq!(screen.cell(9, 4).code_point, b'X' as u32);
        assert_eq!((screen.cursor.x, screen.cursor.y), (10, 4));
    }

    #[test]
    fn autowrap_to_next_row() {
        let mut screen = Screen::new(80, 24);
        screen.modes.insert(Modes::DECAWM);
        screen.warpto(79, 0);
        screen.putch(b'A' as u32);
        assert!(screen.cursor.last_column);
        screen.putch(b'B' as u32);
        assert_eq!(screen.cell(79, 0).code_point, b'A' as u32);
        assert_eq!(screen.cell(0, 1).code_point, b'B' as u32);
        assert_eq!((screen.cursor.x, screen.cursor.y), (1, 1));
    }

    #[test]
    fn newline_at_bottom_scrolls_region() {
        let mut screen = Screen::new(80, 24);
        screen.warpto(0, 23);
        screen.lines[0].cell_mut(0).code_point = b'Z' as u32;
        screen.newline();
        assert_eq!(screen.cell(0, 22).code_point, 0);
        assert_eq!(screen.cell(0, 23).code_point, 0);
        assert_eq!((screen.cursor.x, screen.cursor.y), (0, 23));
    }

    #[test]
    fn scroll_region_rejects_inverted_bounds() {
        let mut screen = Screen::new(80, 24);
        screen.scroll_region(5, 5);
        assert_eq!((screen.scroll_top, screen.scroll_bottom), (0, 23));
    }

    #[test]
    fn cuf_at_last_column_without_autowrap_stays_put() {
        let mut screen = Screen::new(80, 24);
        screen.warpto(79, 0);
        screen.move_cursor(Direction::Right, 1);
        assert_eq!(screen.cursor.x, 79);
    }
}
