//! The outer loop connecting a pseudoterminal session to the VT interpreter.
//!
//! This crate wires together the lower-level building blocks:
//! - [`rterm_pty`] for spawning and driving a pseudoterminal session,
//! - [`rterm_escape`] for interpreting the byte stream into screen mutations,
//! - [`rterm_surface`] for the in-memory screen model a renderer reads.
//!
//! Everything downstream of the screen — a window, a keyboard encoder, a
//! renderer — is an external collaborator this crate only talks to through
//! [`TerminalEvent`]/[`TerminalRequest`]; it does not implement any of them.
//!
//! Front-ends usually:
//! 1. Spawn a [`rterm_pty::Session`] (e.g. via [`builder::UnixTerminalBuilder`]).
//! 2. Wrap it in a [`TerminalEngine`], obtaining a [`TerminalHandle`] and
//!    [`TerminalEvents`].
//! 3. Drive `on_readable` / `on_writable` / `tick` based on their own
//!    readiness model (a plain poll loop or `mio`), and drain
//!    [`TerminalEvent`]s to update a renderer and window layer.

mod blink;
mod builder;
mod channel;
mod engine;
mod error;
mod options;
mod sink;
mod size;
mod snapshot;

#[cfg(unix)]
pub use builder::UnixTerminalBuilder;
pub use blink::BlinkClock;
pub use channel::{
    ChannelConfig, ChannelRecvError, ChannelSendError, ChannelTryRecvError, TerminalEvents,
    TerminalHandle, WriteBatcher,
};
pub use engine::{PollTokens, TerminalEngine, TerminalEvent, TerminalRequest};
pub use error::{Error, Result};
pub use options::TerminalOptions;
pub use size::TerminalSize;
pub use snapshot::Snapshot;

pub use rterm_escape as escape;
pub use rterm_pty as pty;
pub use rterm_surface as surface;
