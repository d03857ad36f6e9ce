use crate::app::state::DisplayEvent;

/// What the handlers tell the main loop to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Send one protocol line to the server (terminator added on the wire).
    SendLine(String),
    /// Render something for the user.
    Display(DisplayEvent),
    /// Tear the whole thing down.
    Quit,
}
