//! An in-memory [`Session`] with no child process or real pty, for tests
//! that exercise the engine's poll/feed loop without spawning anything.

use std::collections::VecDeque;
use std::process::ExitStatus;

use crate::{PtySize, Session, SessionError};

/// A `Session` backed by queues instead of a real file descriptor.
/// `push_output` feeds bytes the engine will read; `written` accumulates
/// whatever the engine writes back.
#[derive(Debug, Default)]
pub struct FakeSession {
    output: VecDeque<u8>,
    pub written: Vec<u8>,
    pub size: PtySize,
    pub closed: bool,
}

impl FakeSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues bytes as if the child process had written them to the pty.
    pub fn push_output(&mut self, bytes: &[u8]) {
        self.output.extend(bytes);
    }
}

impl Session for FakeSession {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, SessionError> {
        let mut n = 0;
        while n < buf.len() {
            match self.output.pop_front() {
                Some(byte) => {
                    buf[n] = byte;
                    n += 1;
                }
                None => break,
            }
        }
        Ok(n)
    }

    fn write(&mut self, input: &[u8]) -> Result<usize, SessionError> {
        self.written.extend_from_slice(input);
        Ok(input.len())
    }

    fn resize(&mut self, size: PtySize) -> Result<(), SessionError> {
        self.size = size;
        Ok(())
    }

    fn close(&mut self) -> Result<i32, SessionError> {
        self.closed = true;
        Ok(0)
    }

    fn try_get_child_exit_status(&mut self) -> Result<Option<ExitStatus>, SessionError> {
        Ok(None)
    }
}
