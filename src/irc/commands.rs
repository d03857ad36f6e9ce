//! User input parser.
//!
//! Turns one line of user input into a typed [`UserInput`]: either a
//! `/command`, plain chat text for the current channel, a usage error, or
//! a no-op for blank lines. Commands are case-insensitive.

/// A parsed user command. Each variant corresponds to a `/command`.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedCommand {
    Quit { reason: Option<String> },
    Nick { nick: String },
    Join { channel: String },
    List,
    Msg { target: String, text: String },
}

/// Classification of one user input line.
#[derive(Debug, Clone, PartialEq)]
pub enum UserInput {
    Command(ParsedCommand),
    /// Plain text addressed to the current channel.
    Chat(String),
    /// Bad arity or unknown command; the string is the usage hint.
    Invalid(String),
    Empty,
}

/// Parse a user input line into a [`UserInput`].
pub fn parse_input(input: &str) -> UserInput {
    let input = input.trim();
    if input.is_empty() {
        return UserInput::Empty;
    }
    if !input.starts_with('/') {
        return UserInput::Chat(input.to_string());
    }

    let parts: Vec<&str> = input[1..].splitn(3, ' ').collect();
    let cmd = parts.first().map(|s| s.to_lowercase()).unwrap_or_default();

    match cmd.as_str() {
        "quit" | "exit" => {
            let reason = input
                .split_once(' ')
                .map(|(_, r)| r.trim().to_string())
                .filter(|r| !r.is_empty());
            UserInput::Command(ParsedCommand::Quit { reason })
        }
        "nick" => match parts.get(1).map(|s| s.trim()) {
            Some(nick) if !nick.is_empty() && parts.len() == 2 => {
                UserInput::Command(ParsedCommand::Nick {
                    nick: nick.to_string(),
                })
            }
            _ => UserInput::Invalid("Usage: /nick <name>".to_string()),
        },
        "join" | "j" => match parts.get(1).map(|s| s.trim()) {
            Some(channel) if !channel.is_empty() && parts.len() == 2 => {
                let channel = if !channel.starts_with('#') && !channel.starts_with('&') {
                    format!("#{}", channel)
                } else {
                    channel.to_string()
                };
                UserInput::Command(ParsedCommand::Join { channel })
            }
            _ => UserInput::Invalid("Usage: /join <channel>".to_string()),
        },
        "list" => UserInput::Command(ParsedCommand::List),
        "msg" | "query" => {
            let target = parts.get(1).map(|s| s.trim()).unwrap_or_default();
            let text = parts.get(2).copied().unwrap_or_default();
            if target.is_empty() || text.is_empty() {
                UserInput::Invalid("Usage: /msg <user> <message>".to_string())
            } else {
                UserInput::Command(ParsedCommand::Msg {
                    target: target.to_string(),
                    text: text.to_string(),
                })
            }
        }
        _ => UserInput::Invalid(format!("Unknown command: /{}", cmd)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_chat() {
        assert_eq!(
            parse_input("hello world"),
            UserInput::Chat("hello world".into())
        );
    }

    #[test]
    fn test_empty_is_noop() {
        assert_eq!(parse_input(""), UserInput::Empty);
        assert_eq!(parse_input("   "), UserInput::Empty);
    }

    #[test]
    fn test_quit_with_and_without_reason() {
        assert_eq!(
            parse_input("/quit"),
            UserInput::Command(ParsedCommand::Quit { reason: None })
        );
        assert_eq!(
            parse_input("/quit gone fishing"),
            UserInput::Command(ParsedCommand::Quit {
                reason: Some("gone fishing".into())
            })
        );
    }

    #[test]
    fn test_nick_requires_one_argument() {
        assert_eq!(
            parse_input("/nick newname"),
            UserInput::Command(ParsedCommand::Nick {
                nick: "newname".into()
            })
        );
        assert!(matches!(parse_input("/nick"), UserInput::Invalid(_)));
        assert!(matches!(parse_input("/nick a b"), UserInput::Invalid(_)));
    }

    #[test]
    fn test_join_prefixes_hash() {
        assert_eq!(
            parse_input("/join rust"),
            UserInput::Command(ParsedCommand::Join {
                channel: "#rust".into()
            })
        );
        assert_eq!(
            parse_input("/join #rust"),
            UserInput::Command(ParsedCommand::Join {
                channel: "#rust".into()
            })
        );
        assert!(matches!(parse_input("/join"), UserInput::Invalid(_)));
    }

    #[test]
    fn test_msg_arity() {
        assert!(matches!(parse_input("/msg"), UserInput::Invalid(_)));
        assert!(matches!(parse_input("/msg bob"), UserInput::Invalid(_)));
        assert_eq!(
            parse_input("/msg bob hello there"),
            UserInput::Command(ParsedCommand::Msg {
                target: "bob".into(),
                text: "hello there".into(),
            })
        );
    }

    #[test]
    fn test_commands_are_case_insensitive() {
        assert_eq!(
            parse_input("/QUIT"),
            UserInput::Command(ParsedCommand::Quit { reason: None })
        );
    }

    #[test]
    fn test_unknown_command() {
        assert!(matches!(parse_input("/frobnicate"), UserInput::Invalid(_)));
    }
}
