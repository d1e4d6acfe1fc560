//! Feed a byte stream through the interpreter and print what it did: bytes
//! written back, titles/icon names set, and the resulting screen content.
use rterm_escape::{Interpreter, OutputSink};

#[derive(Default)]
struct LoggingSink {
    seq: usize,
}

impl OutputSink for LoggingSink {
    fn write(&mut self, bytes: &[u8]) {
        self.seq += 1;
        println!("{:02}: write {bytes:?}", self.seq);
    }

    fn bell(&mut self) {
        self.seq += 1;
        println!("{:02}: bell", self.seq);
    }

    fn set_title(&mut self, title: &str) {
        self.seq += 1;
        println!("{:02}: title = {title:?}", self.seq);
    }

    fn set_icon_name(&mut self, name: &str) {
        self.seq += 1;
        println!("{:02}: icon name = {name:?}", self.seq);
    }
}

fn main() {
    let mut term = Interpreter::new(80, 24, "", LoggingSink::default());

    let bytes = b"Hello \x1b[1mOtty\x1b[0m!\x07\x1b]0;demo\x07\x1b[6n";
    term.feed(bytes);

    print!("row 0: ");
    for x in 0..12 {
        let cell = term.screen.cell(x, 0);
        if cell.is_empty() {
            break;
        }
        print!("{}", char::from_u32(cell.code_point).unwrap_or('?'));
    }
    println!();
}
