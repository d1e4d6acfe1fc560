use crate::actor::Actor;
use crate::enums::{Action, State};
use crate::params::{Intermediates, OscState, Params};
use crate::transitions::{entry_action, exit_action, transit};

/// The DEC ANSI parser state machine.
///
/// `Parser` classifies one byte at a time and reports what it means to an
/// [`Actor`]. It holds no terminal state of its own — no cursor, no grid, no
/// modes — only the bytes needed to finish the sequence currently being
/// read (collected parameters, intermediates, and any open OSC string).
#[derive(Debug, Default)]
pub struct Parser {
    state: State,
    params: Params,
    intermediates: Intermediates,
    osc: OscState,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current parser state, exposed for diagnostics only.
    pub fn is_ground(&self) -> bool {
        self.state == State::Ground
    }

    /// Feed a single byte through the state machine, invoking `actor` for
    /// whatever action results.
    pub fn advance<A: Actor>(&mut self, actor: &mut A, byte: u8) {
        let (next_state, action) = transit(self.state, byte);

        if next_state == self.state {
            self.perform(actor, action, byte);
            return;
        }

        self.perform(actor, exit_action(self.state), byte);
        self.perform(actor, action, byte);
        self.perform(actor, entry_action(next_state), byte);
        self.state = next_state;
    }

    /// Feed a full byte slice through the state machine.
    pub fn advance_all<A: Actor>(&mut self, actor: &mut A, bytes: &[u8]) {
        for &byte in bytes {
            self.advance(actor, byte);
        }
    }

    fn perform<A: Actor>(&mut self, actor: &mut A, action: Action, byte: u8) {
        match action {
            Action::None => {}
            Action::Print => actor.print(byte),
            Action::Execute => actor.execute(byte),
            Action::Cancel => actor.cancel(),
            Action::Clear => {
                self.params.clear();
                self.intermediates.clear();
            }
            Action::Collect => self.intermediates.push(byte),
            Action::Param => {
                if byte == b';' {
                    self.params.separator();
                } else {
                    self.params.digit(byte);
                }
            }
            Action::EscDispatch => actor.esc_dispatch(
                self.intermediates.as_slice(),
                self.intermediates.overflowed(),
                byte,
            ),
            Action::CsiDispatch => actor.csi_dispatch(
                self.params.as_slice(),
                self.intermediates.as_slice(),
                self.intermediates.overflowed(),
                byte,
            ),
            Action::Hook => actor.hook(
                self.params.as_slice(),
                self.intermediates.as_slice(),
                self.intermediates.overflowed(),
            ),
            Action::Put => actor.put(byte),
            Action::Unhook => actor.unhook(),
            Action::OscStart => {
                self.osc.start();
                actor.osc_start();
            }
            Action::OscPut => {
                self.osc.put(byte);
                actor.osc_put(byte);
            }
            Action::OscEnd => {
                let fields = self.osc.fields();
                actor.osc_dispatch(&fields);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        printed: Vec<u8>,
        executed: Vec<u8>,
        csi: Vec<(Vec<i64>, Vec<u8>, u8)>,
        esc: Vec<(Vec<u8>, u8)>,
        osc: Vec<Vec<Vec<u8>>>,
        cancelled: usize,
    }

    impl Actor for Recorder {
        fn print(&mut self, byte: u8) {
            self.printed.push(byte);
        }

        fn execute(&mut self, byte: u8) {
            self.executed.push(byte);
        }

        fn cancel(&mut self) {
            self.cancelled += 1;
        }

        fn csi_dispatch(&mut self, params: &[i64], intermediates: &[u8], _overflow: bool, b: u8) {
            self.csi.push((params.to_vec(), intermediates.to_vec(), b));
        }

        fn esc_dispatch(&mut self, intermediates: &[u8], _ignored_excess_intermediates: bool, b: u8) {
            self.esc.push((intermediates.to_vec(), b));
        }

        fn osc_dispatch(&mut self, params: &[&[u8]]) {
            self.osc
                .push(params.iter().map(|s| s.to_vec()).collect());
        }
    }

    #[test]
    fn prints_plain_text() {
        let mut parser = Parser::new();
        let mut actor = Recorder::default();
        parser.advance_all(&mut actor, b"hello");
        assert_eq!(actor.printed, b"hello");
    }

    #[test]
    fn executes_control_bytes() {
        let mut parser = Parser::new();
        let mut actor = Recorder::default();
        parser.advance(&mut actor, b'\n');
        assert_eq!(actor.executed, vec![b'\n']);
    }

    #[test]
    fn dispatches_csi_with_params() {
        let mut parser = Parser::new();
        let mut actor = Recorder::default();
        parser.advance_all(&mut actor, b"\x1b[1;31m");
        assert_eq!(actor.csi, vec![(vec![1, 31], vec![], b'm')]);
    }

    #[test]
    fn dispatches_csi_private_mode() {
        let mut parser = Parser::new();
        let mut actor = Recorder::default();
        parser.advance_all(&mut actor, b"\x1b[?25h");
        assert_eq!(actor.csi, vec![(vec![25], vec![b'?'], b'h')]);
    }

    #[test]
    fn csi_with_colon_ignored() {
        let mut parser = Parser::new();
        let mut actor = Recorder::default();
        parser.advance_all(&mut actor, b"\x1b[38:2:255:0:0m");
        assert!(actor.csi.is_empty());
        assert!(parser.is_ground());
    }

    #[test]
    fn dispatches_esc_sequence() {
        let mut parser = Parser::new();
        let mut actor = Recorder::default();
        parser.advance_all(&mut actor, b"\x1b(0");
        assert_eq!(actor.esc, vec![(vec![b'('], b'0')]);
    }

    #[test]
    fn dispatches_osc_with_bel() {
        let mut parser = Parser::new();
        let mut actor = Recorder::default();
        parser.advance_all(&mut actor, b"\x1b]0;title\x07");
        assert_eq!(actor.osc, vec![vec![b"0".to_vec(), b"title".to_vec()]]);
    }

    #[test]
    fn dispatches_osc_with_st() {
        let mut parser = Parser::new();
        let mut actor = Recorder::default();
        parser.advance_all(&mut actor, b"\x1b]0;title\x1b\\");
        assert_eq!(actor.osc, vec![vec![b"0".to_vec(), b"title".to_vec()]]);
        assert_eq!(actor.esc, vec![(vec![], b'\\')]);
    }

    #[test]
    fn can_cancels_sequence_and_returns_to_ground() {
        let mut parser = Parser::new();
        let mut actor = Recorder::default();
        parser.advance_all(&mut actor, b"\x1b[1;3");
        parser.advance(&mut actor, 0x18);
        assert_eq!(actor.cancelled, 1);
        assert!(parser.is_ground());
        assert!(actor.csi.is_empty());
    }

    #[test]
    fn sos_pm_apc_consume_silently_until_esc() {
        let mut parser = Parser::new();
        let mut actor = Recorder::default();
        parser.advance_all(&mut actor, b"\x1bXignored junk\x1b\\");
        assert!(actor.printed.is_empty());
        assert!(actor.executed.is_empty());
        assert_eq!(actor.esc, vec![(vec![], b'\\')]);
    }
}
