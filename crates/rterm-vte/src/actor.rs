/// Callback surface the parser drives as it classifies bytes.
///
/// The parser owns no terminal state of its own; every action it recognizes
/// is reported to an `Actor` implementation, which decides what it means.
/// `print` and `execute` are byte-level rather than `char`-level: UTF-8
/// reassembly is the interpreter's job, not the parser's, so printable bytes
/// (including multi-byte sequence continuations) are handed over one at a
/// time in the order they were read.
pub trait Actor {
    /// A printable byte (0x20..=0xFF) in GROUND state.
    fn print(&mut self, byte: u8);

    /// A C0/C1 control byte to execute immediately.
    fn execute(&mut self, byte: u8);

    /// CAN or SUB was received: the replacement character should be emitted
    /// in place of whatever was being assembled.
    fn cancel(&mut self) {}

    /// A final byte terminated a DCS sequence; passthrough is beginning.
    /// This implementation never executes DCS handlers, so the default is
    /// a no-op; the hook/put/unhook triad exists to keep the state machine
    /// honest even when nothing downstream acts on it.
    fn hook(&mut self, params: &[i64], intermediates: &[u8], ignored_excess_intermediates: bool) {
        let _ = (params, intermediates, ignored_excess_intermediates);
    }

    /// A data byte inside an open DCS passthrough.
    fn put(&mut self, byte: u8) {
        let _ = byte;
    }

    /// The DCS passthrough has ended.
    fn unhook(&mut self) {}

    /// An OSC sequence is beginning.
    fn osc_start(&mut self) {}

    /// A data byte inside an open OSC sequence.
    fn osc_put(&mut self, byte: u8) {
        let _ = byte;
    }

    /// The OSC sequence has ended; `params` are the `;`-separated slices
    /// collected since `osc_start`.
    fn osc_dispatch(&mut self, params: &[&[u8]]) {
        let _ = params;
    }

    /// A CSI sequence completed with `final_byte`.
    fn csi_dispatch(
        &mut self,
        params: &[i64],
        intermediates: &[u8],
        ignored_excess_intermediates: bool,
        final_byte: u8,
    );

    /// An ESC sequence completed with `final_byte`.
    fn esc_dispatch(&mut self, intermediates: &[u8], ignored_excess_intermediates: bool, final_byte: u8);
}
