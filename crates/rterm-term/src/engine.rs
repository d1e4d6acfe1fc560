//! The outer loop: polls the pseudoterminal, feeds the interpreter, and
//! exposes the result as a stream of [`TerminalEvent`]s a front-end drains
//! on its own schedule.

use std::io;
use std::time::Duration;

use log::{debug, trace};
use mio::{Interest, Registry, Token};
use rterm_escape::Interpreter;
use rterm_pty::{Pollable, Session, SessionError};

use crate::blink::BlinkClock;
use crate::channel::{build_channels, ChannelConfig, TerminalEvents, TerminalHandle};
use crate::error::{Error, Result};
use crate::options::TerminalOptions;
use crate::sink::EngineSink;
use crate::size::TerminalSize;
use crate::snapshot::Snapshot;

/// Notifications the engine emits for a front-end to drain.
#[derive(Clone, Debug, PartialEq)]
pub enum TerminalEvent {
    /// A read-only view of the screen, emitted after every batch of
    /// processed input and after every serviced request.
    Frame { snapshot: Snapshot },
    /// The child process behind the pseudoterminal has exited.
    ChildExit { code: i32 },
    /// OSC 0/2/21 set the window title.
    TitleChanged { title: String },
    /// OSC 0/1 set the icon name.
    IconNameChanged { name: String },
    /// BEL was received.
    Bell,
}

/// Requests a front-end can queue for the engine to service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TerminalRequest {
    /// Keyboard/paste input to forward to the child process.
    WriteBytes(Vec<u8>),
    /// The window was resized; propagate to the pty and the screen model.
    Resize(TerminalSize),
    /// Tear down the session on the next opportunity.
    Shutdown,
}

/// mio registration tokens an embedder uses to multiplex the pty file
/// descriptor(s) alongside its own event sources.
#[derive(Clone, Copy, Debug)]
pub struct PollTokens {
    pub io: Token,
    pub child: Token,
}

/// Owns a pseudoterminal session and the interpreter driving a screen from
/// its output; translates between the two and a request/event channel pair.
pub struct TerminalEngine<S: Session> {
    session: S,
    interpreter: Interpreter<EngineSink>,
    read_buffer: Vec<u8>,
    pending_out: Vec<u8>,
    event_tx: flume::Sender<TerminalEvent>,
    request_rx: flume::Receiver<TerminalRequest>,
    shutting_down: bool,
    blink: BlinkClock,
}

impl<S: Session> TerminalEngine<S> {
    /// Builds an engine around an already-spawned session, returning it
    /// alongside the handle/events pair a front-end uses to talk to it.
    pub fn new(
        session: S,
        options: TerminalOptions,
    ) -> Result<(Self, TerminalHandle, TerminalEvents)> {
        let (event_tx, event_rx, request_tx, request_rx) =
            build_channels(&options.channel_config);

        let interpreter = Interpreter::new(
            options.columns,
            options.rows,
            options.answerback.clone(),
            EngineSink::default(),
        );

        let engine = Self {
            session,
            interpreter,
            read_buffer: vec![0u8; options.read_buffer_capacity],
            pending_out: Vec::new(),
            event_tx,
            request_rx,
            shutting_down: false,
            blink: BlinkClock::new(options.blink_interval),
        };

        Ok((engine, TerminalHandle::new(request_tx), TerminalEvents::new(event_rx)))
    }

    /// Drains whatever the pseudoterminal has ready, feeding it to the
    /// interpreter; flushes any response bytes the interpreter produced and
    /// emits a frame. Detects child exit via EIO or a reaped status.
    pub fn on_readable(&mut self) -> Result<()> {
        loop {
            match self.session.read(&mut self.read_buffer) {
                Ok(0) => break,
                Ok(n) => {
                    self.interpreter.feed(&self.read_buffer[..n]);
                    self.drain_sink()?;
                }
                Err(SessionError::IO(err))
                    if err.kind() == io::ErrorKind::WouldBlock
                        || err.kind() == io::ErrorKind::Interrupted =>
                {
                    break;
                }
                Err(SessionError::IO(err)) if is_eio(&err) => {
                    debug!("pty read returned EIO, treating as child exit");
                    self.report_child_exit()?;
                    return Ok(());
                }
                Err(err) => return Err(err.into()),
            }
        }

        self.flush_pending_out()?;
        self.emit_frame()?;
        self.report_child_exit()
    }

    /// Flushes any response/keyboard bytes still queued for the pty.
    pub fn on_writable(&mut self) -> Result<()> {
        self.flush_pending_out()
    }

    /// Services queued [`TerminalRequest`]s and emits a frame.
    pub fn tick(&mut self) -> Result<()> {
        while let Ok(request) = self.request_rx.try_recv() {
            match request {
                TerminalRequest::WriteBytes(bytes) => {
                    self.pending_out.extend(bytes);
                    self.flush_pending_out()?;
                }
                TerminalRequest::Resize(size) => {
                    self.interpreter
                        .screen
                        .resize(size.cols as usize, size.rows as usize);
                    self.session.resize(size.into())?;
                }
                TerminalRequest::Shutdown => {
                    self.shutting_down = true;
                }
            }
        }

        if self.shutting_down {
            self.session.close()?;
        }

        self.emit_frame()
    }

    /// Current cursor/SGR blink phase: `true` means blinking cells should
    /// render hidden. Never consulted by the interpreter itself.
    pub fn blink_phase(&self) -> bool {
        self.blink.phase()
    }

    /// Advances the blink clock by `elapsed`, emitting a frame if the phase
    /// flipped so the front-end knows to redraw blinking cells.
    pub fn advance_blink(&mut self, elapsed: Duration) -> Result<()> {
        if self.blink.advance(elapsed) {
            self.emit_frame()?;
        }
        Ok(())
    }

    fn drain_sink(&mut self) -> Result<()> {
        let bytes = self.interpreter.sink.take_writes();
        self.pending_out.extend(bytes);

        let events: Vec<_> = self.interpreter.sink.drain_events().collect();
        for event in events {
            self.send_event(event)?;
        }
        Ok(())
    }

    fn flush_pending_out(&mut self) -> Result<()> {
        while !self.pending_out.is_empty() {
            match self.session.write(&self.pending_out) {
                Ok(0) => break,
                Ok(n) => {
                    self.pending_out.drain(0..n);
                }
                Err(SessionError::IO(err)) if err.kind() == io::ErrorKind::WouldBlock => break,
                Err(SessionError::IO(err)) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            }
        }
        Ok(())
    }

    fn emit_frame(&mut self) -> Result<()> {
        let snapshot = Snapshot::new(&self.interpreter.screen);
        self.send_event(TerminalEvent::Frame { snapshot })
    }

    fn report_child_exit(&mut self) -> Result<()> {
        if let Some(status) = self.session.try_get_child_exit_status()? {
            let code = exit_code(status);
            trace!("child process exited with code {code}");
            self.send_event(TerminalEvent::ChildExit { code })?;
        }
        Ok(())
    }

    fn send_event(&self, event: TerminalEvent) -> Result<()> {
        self.event_tx.try_send(event).map_err(|err| match err {
            flume::TrySendError::Full(_) => Error::EventChannelFull,
            flume::TrySendError::Disconnected(_) => Error::EventChannelClosed,
        })
    }
}

impl<S: Session + Pollable> TerminalEngine<S> {
    /// Registers the underlying session's file descriptor(s) with a mio
    /// `Registry`, multiplexed under the given tokens.
    pub fn register(&mut self, registry: &Registry, tokens: PollTokens) -> Result<()> {
        self.session
            .register(registry, Interest::READABLE, tokens.io, tokens.child)
            .map_err(Error::from)
    }

    pub fn reregister(&mut self, registry: &Registry, tokens: PollTokens, interest: Interest) -> Result<()> {
        self.session
            .reregister(registry, interest, tokens.io, tokens.child)
            .map_err(Error::from)
    }

    pub fn deregister(&mut self, registry: &Registry) -> Result<()> {
        self.session.deregister(registry).map_err(Error::from)
    }
}

fn exit_code(status: std::process::ExitStatus) -> i32 {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        return status.code().unwrap_or_else(|| 128 + status.signal().unwrap_or(0));
    }
    #[cfg(not(unix))]
    {
        status.code().unwrap_or(-1)
    }
}

#[cfg(unix)]
fn is_eio(err: &io::Error) -> bool {
    err.raw_os_error() == Some(nix::libc::EIO)
}

#[cfg(not(unix))]
fn is_eio(_err: &io::Error) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use std::{collections::VecDeque, io, process::ExitStatus};

    use rterm_pty::{PtySize, SessionError};

    use super::*;

    #[derive(Default)]
    struct FakeSession {
        reads: VecDeque<Vec<u8>>,
        exit_status: Option<ExitStatus>,
        pub written: Vec<u8>,
    }

    impl FakeSession {
        fn with_reads(reads: Vec<Vec<u8>>) -> Self {
            Self {
                reads: reads.into(),
                ..Self::default()
            }
        }

        fn with_exit(mut self, status: ExitStatus) -> Self {
            self.exit_status = Some(status);
            self
        }
    }

    impl Session for FakeSession {
        fn read(&mut self, buf: &mut [u8]) -> std::result::Result<usize, SessionError> {
            if let Some(mut chunk) = self.reads.pop_front() {
                let len = chunk.len().min(buf.len());
                buf[..len].copy_from_slice(&chunk[..len]);
                if len < chunk.len() {
                    chunk.drain(0..len);
                    self.reads.push_front(chunk);
                }
                return Ok(len);
            }
            Err(io::Error::from(io::ErrorKind::WouldBlock).into())
        }

        fn write(&mut self, input: &[u8]) -> std::result::Result<usize, SessionError> {
            self.written.extend_from_slice(input);
            Ok(input.len())
        }

        fn resize(&mut self, _size: PtySize) -> std::result::Result<(), SessionError> {
            Ok(())
        }

        fn close(&mut self) -> std::result::Result<i32, SessionError> {
            Ok(0)
        }

        fn try_get_child_exit_status(
            &mut self,
        ) -> std::result::Result<Option<ExitStatus>, SessionError> {
            Ok(self.exit_status)
        }
    }

    fn exit_ok() -> ExitStatus {
        use std::os::unix::process::ExitStatusExt;
        ExitStatusExt::from_raw(0)
    }

    #[test]
    fn emits_frame_before_child_exit() {
        let session =
            FakeSession::with_reads(vec![b"hi".to_vec()]).with_exit(exit_ok());
        let (mut engine, _handle, events) =
            TerminalEngine::new(session, TerminalOptions::default()).unwrap();

        engine.on_readable().unwrap();

        let first = events.recv().expect("frame");
        assert!(matches!(first, TerminalEvent::Frame { .. }));

        let second = events.recv().expect("child exit");
        assert!(matches!(second, TerminalEvent::ChildExit { code: 0 }));
    }

    #[test]
    fn plain_text_reaches_the_snapshot() {
        let session = FakeSession::with_reads(vec![b"Hi".to_vec()]);
        let (mut engine, _handle, events) =
            TerminalEngine::new(session, TerminalOptions::default()).unwrap();

        engine.on_readable().unwrap();

        let TerminalEvent::Frame { snapshot } = events.recv().unwrap() else {
            panic!("expected a frame");
        };
        assert_eq!(snapshot.cell(0, 0).code_point, b'H' as u32);
        assert_eq!(snapshot.cell(1, 0).code_point, b'i' as u32);
    }

    #[test]
    fn device_attributes_reply_is_written_back() {
        let session = FakeSession::with_reads(vec![b"\x1b[c".to_vec()]);
        let (mut engine, _handle, _events) =
            TerminalEngine::new(session, TerminalOptions::default()).unwrap();

        engine.on_readable().unwrap();

        assert_eq!(engine.session.written, b"\x1b[?1;7c".to_vec());
    }

    #[test]
    fn bounded_event_channel_surfaces_backpressure() {
        let session = FakeSession::with_reads(vec![b"x".to_vec()]);
        let options = TerminalOptions {
            channel_config: ChannelConfig::bounded(1),
            ..TerminalOptions::default()
        };
        let (mut engine, _handle, _events) =
            TerminalEngine::new(session, options).unwrap();

        // The frame emitted by `on_readable` fills the only slot; nothing
        // drains it, so the next one has nowhere to go.
        engine.on_readable().unwrap();
        let err = engine.tick().expect_err("event channel is full");
        assert!(matches!(err, Error::EventChannelFull));
    }

    #[test]
    fn resize_request_propagates_to_the_screen() {
        let session = FakeSession::default();
        let (mut engine, handle, events) =
            TerminalEngine::new(session, TerminalOptions::default()).unwrap();

        handle
            .send(TerminalRequest::Resize(TerminalSize {
                cols: 40,
                rows: 12,
                ..TerminalSize::default()
            }))
            .unwrap();

        engine.tick().unwrap();

        assert_eq!(engine.interpreter.screen.width(), 40);
        assert_eq!(engine.interpreter.screen.height(), 12);
        assert!(matches!(events.recv().unwrap(), TerminalEvent::Frame { .. }));
    }

    #[test]
    fn write_request_reaches_the_session() {
        let session = FakeSession::default();
        let (mut engine, handle, _events) =
            TerminalEngine::new(session, TerminalOptions::default()).unwrap();

        handle
            .send(TerminalRequest::WriteBytes(b"ls\n".to_vec()))
            .unwrap();
        engine.tick().unwrap();

        assert_eq!(engine.session.written, b"ls\n".to_vec());
    }

    #[test]
    fn blink_phase_flips_after_one_interval_and_emits_a_frame() {
        let session = FakeSession::default();
        let (mut engine, _handle, events) =
            TerminalEngine::new(session, TerminalOptions::default()).unwrap();

        assert!(!engine.blink_phase());
        engine.advance_blink(std::time::Duration::from_millis(400)).unwrap();
        assert!(engine.blink_phase());
        assert!(matches!(events.recv().unwrap(), TerminalEvent::Frame { .. }));
    }
}
