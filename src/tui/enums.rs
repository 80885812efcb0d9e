//! Enumerations for TUI state management.

/// Which part of the screen receives key presses.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Focus {
    /// The compose row at the top.
    Compose,
    /// The task list; typing goes to the draft while a row is being edited.
    List,
}

/// What the event loop should do after a key press.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum KeyOutcome {
    Continue,
    Quit,
}
