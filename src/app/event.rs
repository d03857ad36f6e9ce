/// Everything the main event loop can receive, fanned in over one channel
/// from the reader task, the input task, and the connection itself.
#[derive(Debug)]
pub enum AppEvent {
    /// One complete protocol line from the server, terminators stripped.
    ServerLine(String),

    /// One line of user input from the terminal.
    UserInput(String),

    /// Connection state changes.
    Connected,
    Disconnected { reason: String },
    ConnectionError { error: String },

    /// The user input stream closed (Ctrl-D / EOF).
    InputClosed,
}
