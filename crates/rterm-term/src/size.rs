use rterm_pty::PtySize;

/// The terminal's geometry, in character cells and pixels-per-cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TerminalSize {
    pub cols: u16,
    pub rows: u16,
    pub cell_width: u16,
    pub cell_height: u16,
}

impl Default for TerminalSize {
    fn default() -> Self {
        Self {
            cols: 80,
            rows: 24,
            cell_width: 1,
            cell_height: 1,
        }
    }
}

impl From<TerminalSize> for PtySize {
    fn from(val: TerminalSize) -> Self {
        PtySize {
            rows: val.rows,
            cols: val.cols,
            cell_width: val.cell_width,
            cell_height: val.cell_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_to_pty_size_without_loss() {
        let size = TerminalSize {
            cols: 132,
            rows: 43,
            cell_width: 9,
            cell_height: 18,
        };
        let pty: PtySize = size.into();
        assert_eq!(pty.cols, 132);
        assert_eq!(pty.rows, 43);
        assert_eq!(pty.cell_width, 9);
        assert_eq!(pty.cell_height, 18);
    }
}
