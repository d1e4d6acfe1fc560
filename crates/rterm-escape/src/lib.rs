//! The interpreter: drives [`rterm_vte`]'s parser and VT52 sub-grammar,
//! does UTF-8 reassembly, and mutates an [`rterm_surface::Screen`] in
//! response. No pty plumbing, no rendering, no CLI parsing — those are
//! external collaborators that drive this crate through [`OutputSink`]
//! and [`Interpreter::feed`].

mod control;
mod csi;
mod esc;
mod interpreter;
mod osc;
mod output;
mod sgr;
mod utf8;
mod vt52;

pub use interpreter::Interpreter;
pub use output::{OutputSink, RecordingSink};
pub use utf8::{DecodedChars, Utf8Decoder};
pub use vt52::Vt52Parser;
