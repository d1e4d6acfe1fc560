//! DEC ANSI / VT100 byte-classifying parser state machine.
//!
//! This crate implements only the parser: it reads bytes one at a time,
//! walks Paul Flo Williams' state diagram, and reports the resulting
//! actions (print, execute, dispatch...) to an [`Actor`]. It holds no
//! cursor, no grid, no modes, and performs no UTF-8 reassembly — those are
//! the interpreter's job, built on top of this crate.

mod actor;
mod enums;
mod params;
mod parser;
mod transitions;

pub use actor::Actor;
pub use parser::Parser;
