use std::process::ExitStatus;

use mio::Token;

use crate::{PtySize, SessionError};

/// Generic PTY session; the engine multiplexes I/O and lifecycle events
/// against this abstraction without caring which backend is behind it.
pub trait Session: Send {
    /// Read bytes produced by the child process from the PTY master.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, SessionError>;

    /// Write bytes into the PTY, forwarding them to the child's stdin.
    fn write(&mut self, input: &[u8]) -> Result<usize, SessionError>;

    /// Resize the underlying pseudo terminal.
    fn resize(&mut self, size: PtySize) -> Result<(), SessionError>;

    /// Terminate the session and report the child's exit code.
    fn close(&mut self) -> Result<i32, SessionError>;

    /// Poll the child process for exit status updates without blocking.
    fn try_get_child_exit_status(&mut self) -> Result<Option<ExitStatus>, SessionError>;
}

/// Integration point with Mio-based event loops.
pub trait Pollable: Send {
    fn register(
        &mut self,
        registry: &mio::Registry,
        interest: mio::Interest,
        io_token: Token,
        child_token: Token,
    ) -> Result<(), SessionError>;

    fn reregister(
        &mut self,
        registry: &mio::Registry,
        interest: mio::Interest,
        io_token: Token,
        child_token: Token,
    ) -> Result<(), SessionError>;

    fn deregister(&mut self, registry: &mio::Registry) -> Result<(), SessionError>;
}
