#[cfg(unix)]
use std::path::Path;

#[cfg(unix)]
use rterm_pty::{PtySize, UnixSession, UnixSessionBuilder, unix};

#[cfg(unix)]
use crate::channel::{TerminalEvents, TerminalHandle};
#[cfg(unix)]
use crate::engine::TerminalEngine;
#[cfg(unix)]
use crate::error::Result;
#[cfg(unix)]
use crate::options::TerminalOptions;

/// Builder for launching a local Unix PTY session wrapped in the engine.
#[cfg(unix)]
pub struct UnixTerminalBuilder {
    session: UnixSessionBuilder,
    options: TerminalOptions,
}

#[cfg(unix)]
impl UnixTerminalBuilder {
    /// Start configuring a PTY session for the provided executable.
    #[must_use]
    pub fn new(program: &str) -> Self {
        Self {
            session: unix(program),
            options: TerminalOptions::default(),
        }
    }

    /// Append a single argument to the spawned command.
    #[must_use]
    pub fn arg(mut self, arg: &str) -> Self {
        self.session = self.session.with_arg(arg);
        self
    }

    /// Append a slice of arguments to the spawned command.
    #[must_use]
    pub fn args(mut self, args: &[String]) -> Self {
        self.session = self.session.with_args(args);
        self
    }

    /// Set an environment variable for the spawned command.
    #[must_use]
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.session = self.session.with_env(key, value);
        self
    }

    /// Remove an environment variable from the spawned command.
    #[must_use]
    pub fn env_remove(mut self, key: &str) -> Self {
        self.session = self.session.with_env_remove(key);
        self
    }

    /// Configure the initial PTY size.
    #[must_use]
    pub fn size(mut self, size: PtySize) -> Self {
        self.session = self.session.with_size(size);
        self
    }

    /// Set the working directory for the child process.
    #[must_use]
    pub fn working_dir(mut self, path: &Path) -> Self {
        self.session = self.session.with_cwd(path);
        self
    }

    /// Request that the spawned process adopt the PTY as its controlling TTY.
    #[must_use]
    pub fn controlling_tty(mut self, enable: bool) -> Self {
        if enable {
            self.session = self.session.set_controlling_tty_enable();
        }
        self
    }

    /// Override engine options such as poll timeout and read buffer size.
    #[must_use]
    pub fn engine_options(mut self, options: TerminalOptions) -> Self {
        self.options = options;
        self
    }

    /// Finalize the builder and spawn the pty and engine.
    pub fn spawn(
        self,
    ) -> Result<(TerminalEngine<UnixSession>, TerminalHandle, TerminalEvents)> {
        let session = self.session.spawn()?;
        TerminalEngine::new(session, self.options)
    }
}
