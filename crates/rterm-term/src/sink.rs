use rterm_escape::OutputSink;

use crate::engine::TerminalEvent;

/// Bridges the interpreter's synchronous [`OutputSink`] calls into the
/// engine's buffer-then-drain model: response bytes accumulate for the next
/// PTY write, and title/bell notifications accumulate as queued events.
#[derive(Debug, Default)]
pub(crate) struct EngineSink {
    pending_writes: Vec<u8>,
    pending_events: Vec<TerminalEvent>,
}

impl EngineSink {
    pub(crate) fn take_writes(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.pending_writes)
    }

    pub(crate) fn drain_events(&mut self) -> std::vec::Drain<'_, TerminalEvent> {
        self.pending_events.drain(..)
    }
}

impl OutputSink for EngineSink {
    fn write(&mut self, bytes: &[u8]) {
        self.pending_writes.extend_from_slice(bytes);
    }

    fn bell(&mut self) {
        self.pending_events.push(TerminalEvent::Bell);
    }

    fn set_title(&mut self, title: &str) {
        self.pending_events.push(TerminalEvent::TitleChanged {
            title: title.to_string(),
        });
    }

    fn set_icon_name(&mut self, name: &str) {
        self.pending_events.push(TerminalEvent::IconNameChanged {
            name: name.to_string(),
        });
    }
}
