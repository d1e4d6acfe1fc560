use std::ops::Deref;
use std::sync::Arc;

use rterm_surface::Screen;

/// A cheaply-cloneable, read-only view of the screen at one point in time.
///
/// The engine hands these out to its front-end through
/// [`crate::TerminalEvent::Frame`]; nothing here lets a renderer mutate the
/// live screen the interpreter is driving.
#[derive(Clone, Debug)]
pub struct Snapshot(Arc<Screen>);

impl Snapshot {
    pub(crate) fn new(screen: &Screen) -> Self {
        Self(Arc::new(screen.clone()))
    }
}

impl Deref for Snapshot {
    type Target = Screen;

    fn deref(&self) -> &Screen {
        &self.0
    }
}

/// Two snapshots are equal only if they share the same allocation; the
/// engine never hands out two distinct `Arc`s for what it considers the
/// same frame, so this is enough to let `TerminalEvent` derive `PartialEq`.
impl PartialEq for Snapshot {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
