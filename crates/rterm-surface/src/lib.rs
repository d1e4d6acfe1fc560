//! The terminal screen model: cell grid, cursor, mode flags, palette, tab
//! stops and scroll region, plus the mutation primitives an interpreter
//! drives. This crate holds no parsing or escape-sequence logic and does
//! not depend on either the parser or the interpreter.

pub mod cell;
pub mod charset;
pub mod color;
pub mod cursor;
pub mod line;
pub mod mode;
pub mod screen;

pub use cell::{Blink, Cell, Frame, Intensity, Underline};
pub use charset::{Charset, CharsetSlot};
pub use color::{Color, Palette, Rgb};
pub use cursor::Cursor;
pub use line::{Line, LineDimensions};
pub use mode::Modes;
pub use screen::{Direction, EraseMode, Screen};
