//! Session state and display events.

/// Lifecycle of the single server connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// TCP connect in flight.
    Connecting,
    /// NICK/USER sent, waiting for the server to accept us.
    Registered,
    /// RPL_WELCOME received.
    Active,
    /// QUIT sent or EOF seen, winding down.
    Closing,
    Closed,
}

/// Shared view of the one active connection: who we are and where we talk.
///
/// Owned exclusively by the main event-loop task; the reader and input
/// tasks never touch it directly, they send events instead.
#[derive(Debug)]
pub struct Session {
    pub nickname: String,
    pub current_channel: String,
    pub phase: SessionPhase,
    pub realname: String,
    pub quit_message: String,
}

impl Session {
    pub fn new(
        nickname: String,
        current_channel: String,
        realname: String,
        quit_message: String,
    ) -> Self {
        Self {
            nickname,
            current_channel,
            phase: SessionPhase::Connecting,
            realname,
            quit_message,
        }
    }

    pub fn is_closing(&self) -> bool {
        matches!(self.phase, SessionPhase::Closing | SessionPhase::Closed)
    }
}

/// Something to show the user. Produced by the dispatcher and the input
/// handler, rendered by the ui module.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayEvent {
    /// A chat line from another user.
    Chat { origin: String, text: String },
    /// Server notice, welcome text, or local status line.
    System(String),
    /// Channel member roster from RPL_NAMREPLY.
    Roster { channel: String, users: Vec<String> },
    /// Someone joined or left the channel.
    Membership { user: String, joined: bool },
    /// Unclassified server line, passed through verbatim.
    Raw(String),
    /// Usage hint or connection problem.
    Error(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_starts_connecting() {
        let s = Session::new(
            "me".into(),
            "#chan".into(),
            "realname".into(),
            "Bye".into(),
        );
        assert_eq!(s.phase, SessionPhase::Connecting);
        assert!(!s.is_closing());
    }

    #[test]
    fn test_closing_phases() {
        let mut s = Session::new("me".into(), "#c".into(), "r".into(), "q".into());
        s.phase = SessionPhase::Closing;
        assert!(s.is_closing());
        s.phase = SessionPhase::Closed;
        assert!(s.is_closing());
    }
}
