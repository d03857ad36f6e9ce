//! Event handling: the inbound dispatcher and the user input handler.
//!
//! Both run on the main event-loop task and are plain functions from
//! `(&mut Session, event)` to a list of [`Action`]s, so every protocol rule
//! here is testable without a socket.

use crate::app::action::Action;
use crate::app::event::AppEvent;
use crate::app::state::{DisplayEvent, Session, SessionPhase};
use crate::irc::commands::{self, ParsedCommand, UserInput};
use crate::irc::message::{self, ParsedMessage};
use tracing::{debug, trace};

pub fn handle_event(session: &mut Session, event: AppEvent) -> Vec<Action> {
    match event {
        AppEvent::ServerLine(line) => {
            trace!(line = %line, "server line");
            dispatch(session, message::parse_line(&line))
        }
        AppEvent::UserInput(line) => handle_user_input(session, &line),
        AppEvent::Connected => {
            session.phase = SessionPhase::Registered;
            vec![
                Action::SendLine(format!("NICK {}", session.nickname)),
                Action::SendLine(format!(
                    "USER {} 0 * :{}",
                    session.nickname, session.realname
                )),
                Action::Display(DisplayEvent::System(format!(
                    "Connected, registering as {}...",
                    session.nickname
                ))),
            ]
        }
        AppEvent::Disconnected { reason } => {
            session.phase = SessionPhase::Closed;
            vec![
                Action::Display(DisplayEvent::System(format!("Disconnected: {}", reason))),
                Action::Quit,
            ]
        }
        AppEvent::ConnectionError { error } => {
            session.phase = SessionPhase::Closed;
            vec![
                Action::Display(DisplayEvent::Error(format!("Connection error: {}", error))),
                Action::Quit,
            ]
        }
        AppEvent::InputClosed => {
            if session.is_closing() {
                return vec![Action::Quit];
            }
            session.phase = SessionPhase::Closing;
            vec![
                Action::SendLine(format!("QUIT :{}", session.quit_message)),
                Action::Quit,
            ]
        }
    }
}

/// Inbound dispatcher: one parsed message in, at most one display event and
/// at most one outbound line (only ever a PONG) out.
fn dispatch(session: &mut Session, msg: ParsedMessage) -> Vec<Action> {
    match msg {
        ParsedMessage::Privmsg { origin, text, .. } => {
            // Suppress the server echoing our own messages back
            if origin == session.nickname {
                return vec![];
            }
            vec![Action::Display(DisplayEvent::Chat { origin, text })]
        }
        ParsedMessage::Notice { text } => vec![Action::Display(DisplayEvent::System(text))],
        ParsedMessage::Welcome { text } => {
            session.phase = SessionPhase::Active;
            vec![
                Action::Display(DisplayEvent::System(text)),
                Action::SendLine(format!("JOIN {}", session.current_channel)),
            ]
        }
        ParsedMessage::NameReply { channel, users } => {
            let channel = channel.unwrap_or_else(|| session.current_channel.clone());
            vec![Action::Display(DisplayEvent::Roster { channel, users })]
        }
        ParsedMessage::Join { user } => {
            if user == session.nickname {
                return vec![];
            }
            vec![Action::Display(DisplayEvent::Membership { user, joined: true })]
        }
        ParsedMessage::Part { user } => {
            if user == session.nickname {
                return vec![];
            }
            vec![Action::Display(DisplayEvent::Membership {
                user,
                joined: false,
            })]
        }
        ParsedMessage::Ping { token } => {
            // Answer right away or the server will drop us
            debug!(token = %token, "PING, replying");
            vec![Action::SendLine(format!("PONG {}", token))]
        }
        ParsedMessage::Other { raw } => {
            debug!(raw = %raw, "unclassified server line");
            vec![Action::Display(DisplayEvent::Raw(raw))]
        }
    }
}

/// Apply one line of user input: mutate the session where the command says
/// so and emit the wire traffic. Only `/quit` (or EOF) ends the loop.
fn handle_user_input(session: &mut Session, line: &str) -> Vec<Action> {
    match commands::parse_input(line) {
        UserInput::Empty => vec![],
        UserInput::Invalid(hint) => vec![Action::Display(DisplayEvent::Error(hint))],
        UserInput::Chat(text) => vec![
            Action::SendLine(format!(
                "PRIVMSG {} :{}",
                session.current_channel, text
            )),
            Action::Display(DisplayEvent::Chat {
                origin: session.nickname.clone(),
                text,
            }),
        ],
        UserInput::Command(cmd) => match cmd {
            ParsedCommand::Quit { reason } => {
                session.phase = SessionPhase::Closing;
                let reason = reason.unwrap_or_else(|| session.quit_message.clone());
                vec![Action::SendLine(format!("QUIT :{}", reason)), Action::Quit]
            }
            ParsedCommand::Nick { nick } => {
                session.nickname = nick.clone();
                vec![
                    Action::SendLine(format!("NICK {}", nick)),
                    Action::Display(DisplayEvent::System(format!("Nickname set to {}", nick))),
                ]
            }
            ParsedCommand::Join { channel } => {
                session.current_channel = channel.clone();
                vec![
                    Action::SendLine(format!("JOIN {}", channel)),
                    Action::Display(DisplayEvent::System(format!("Joining {}", channel))),
                ]
            }
            ParsedCommand::List => vec![Action::SendLine("LIST".to_string())],
            ParsedCommand::Msg { target, text } => vec![
                Action::SendLine(format!("PRIVMSG {} :{}", target, text)),
                Action::Display(DisplayEvent::System(format!("-> {}: {}", target, text))),
            ],
        },
    }
}
