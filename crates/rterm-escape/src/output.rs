//! The abstract channel responses are written back through.

/// Receives response bytes the interpreter writes back toward the host
/// (device-attribute replies, cursor-position reports, answerback...).
/// The pseudoterminal layer supplies a concrete implementation; this
/// crate never performs I/O directly.
pub trait OutputSink {
    fn write(&mut self, bytes: &[u8]);

    fn bell(&mut self) {}

    fn set_title(&mut self, title: &str) {
        let _ = title;
    }

    fn set_icon_name(&mut self, name: &str) {
        let _ = name;
    }
}

/// An `OutputSink` that records every write, useful in tests.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub written: Vec<u8>,
    pub bells: usize,
    pub title: Option<String>,
    pub icon_name: Option<String>,
}

impl OutputSink for RecordingSink {
    fn write(&mut self, bytes: &[u8]) {
        self.written.extend_from_slice(bytes);
    }

    fn bell(&mut self) {
        self.bells += 1;
    }

    fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }

    fn set_icon_name(&mut self, name: &str) {
        self.icon_name = Some(name.to_string());
    }
}
