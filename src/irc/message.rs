//! Server message parser.
//!
//! Classifies one raw protocol line into a typed [`ParsedMessage`]. IRC
//! lines can match several keywords at once, so classification follows a
//! fixed precedence: PRIVMSG, NOTICE, 001, 353, JOIN, PART, PING, then raw
//! passthrough. Anything that cannot be extracted cleanly degrades to
//! [`ParsedMessage::Other`]; parsing never fails.

/// One classified server line. Each variant carries only the fields the
/// dispatcher acts on.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedMessage {
    Privmsg {
        origin: String,
        target: String,
        text: String,
    },
    Notice {
        text: String,
    },
    /// RPL_WELCOME (001), sent once registration completes.
    Welcome {
        text: String,
    },
    /// RPL_NAMREPLY (353), the member roster of a channel.
    NameReply {
        channel: Option<String>,
        users: Vec<String>,
    },
    Join {
        user: String,
    },
    Part {
        user: String,
    },
    Ping {
        token: String,
    },
    /// Unclassified line, shown to the user verbatim.
    Other {
        raw: String,
    },
}

/// Parse a single protocol line (terminators already stripped).
///
/// Total over all inputs: a line that matches a keyword but fails field
/// extraction comes back as `Other`, never as a panic or an error.
pub fn parse_line(line: &str) -> ParsedMessage {
    if line.contains("PRIVMSG") {
        return parse_privmsg(line).unwrap_or_else(|| other(line));
    }
    if line.contains("NOTICE") {
        return match trailing(line) {
            Some(text) => ParsedMessage::Notice {
                text: text.to_string(),
            },
            None => other(line),
        };
    }
    if line.contains("001") {
        return match trailing(line) {
            Some(text) => ParsedMessage::Welcome {
                text: text.to_string(),
            },
            None => other(line),
        };
    }
    if line.contains(" 353 ") {
        return parse_name_reply(line);
    }
    if line.contains("JOIN") {
        return match origin(line) {
            Some(user) => ParsedMessage::Join {
                user: user.to_string(),
            },
            None => other(line),
        };
    }
    if line.contains("PART") {
        return match origin(line) {
            Some(user) => ParsedMessage::Part {
                user: user.to_string(),
            },
            None => other(line),
        };
    }
    if line.starts_with("PING") {
        return match line.split_whitespace().nth(1) {
            Some(token) => ParsedMessage::Ping {
                token: token.to_string(),
            },
            None => other(line),
        };
    }
    other(line)
}

fn other(line: &str) -> ParsedMessage {
    ParsedMessage::Other {
        raw: line.to_string(),
    }
}

/// Extract the origin nickname from a `:nick!user@host ...` prefix.
///
/// Requires a leading `:` and a `!` after position 1, before the first
/// space. Returns `None` otherwise, which callers turn into `Other`.
fn origin(line: &str) -> Option<&str> {
    if !line.starts_with(':') {
        return None;
    }
    let bang = line.find('!')?;
    if bang <= 1 {
        return None;
    }
    let space = line.find(' ').unwrap_or(line.len());
    if bang > space {
        return None;
    }
    Some(&line[1..bang])
}

/// Everything after the first `:` at index >= 1. The colon at index 0 is
/// the server-origin marker, never the payload marker.
fn trailing(line: &str) -> Option<&str> {
    let idx = line.get(1..)?.find(':')?;
    Some(&line[idx + 2..])
}

fn parse_privmsg(line: &str) -> Option<ParsedMessage> {
    let origin = origin(line)?.to_string();
    let mut tokens = line.split_whitespace();
    tokens.find(|t| *t == "PRIVMSG")?;
    let target = tokens.next()?.to_string();
    let text = trailing(line)?.to_string();
    Some(ParsedMessage::Privmsg {
        origin,
        target,
        text,
    })
}

fn parse_name_reply(line: &str) -> ParsedMessage {
    // ":server 353 nick = #chan :alice bob carol" — the roster follows the
    // second colon; the channel is the last #-token before it.
    let Some(names) = trailing(line) else {
        return other(line);
    };
    let marker = line.len() - names.len();
    let channel = line[..marker]
        .split_whitespace()
        .rev()
        .find(|t| t.starts_with('#') || t.starts_with('&'))
        .map(str::to_string);
    let users = names.split_whitespace().map(str::to_string).collect();
    ParsedMessage::NameReply { channel, users }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_privmsg_round_trip() {
        let msg = parse_line(":nick!user@host PRIVMSG #chan :hello there");
        assert_eq!(
            msg,
            ParsedMessage::Privmsg {
                origin: "nick".into(),
                target: "#chan".into(),
                text: "hello there".into(),
            }
        );
    }

    #[test]
    fn test_privmsg_without_bang_degrades() {
        let msg = parse_line(":server PRIVMSG #chan :hello");
        assert!(matches!(msg, ParsedMessage::Other { .. }));
    }

    #[test]
    fn test_notice_payload() {
        let msg = parse_line(":server NOTICE * :*** Looking up your hostname");
        assert_eq!(
            msg,
            ParsedMessage::Notice {
                text: "*** Looking up your hostname".into()
            }
        );
    }

    #[test]
    fn test_welcome() {
        let msg = parse_line(":server 001 me :Welcome to the network, me");
        assert_eq!(
            msg,
            ParsedMessage::Welcome {
                text: "Welcome to the network, me".into()
            }
        );
    }

    #[test]
    fn test_name_reply() {
        let msg = parse_line(":server 353 nick = #mainC :alice bob carol");
        assert_eq!(
            msg,
            ParsedMessage::NameReply {
                channel: Some("#mainC".into()),
                users: vec!["alice".into(), "bob".into(), "carol".into()],
            }
        );
    }

    #[test]
    fn test_join_and_part() {
        assert_eq!(
            parse_line(":alice!a@host JOIN #chan"),
            ParsedMessage::Join {
                user: "alice".into()
            }
        );
        assert_eq!(
            parse_line(":bob!b@host PART #chan"),
            ParsedMessage::Part { user: "bob".into() }
        );
        // No nick!user prefix, cannot name the member
        assert!(matches!(
            parse_line("JOIN #chan"),
            ParsedMessage::Other { .. }
        ));
    }

    #[test]
    fn test_ping_token() {
        assert_eq!(
            parse_line("PING :abc123"),
            ParsedMessage::Ping {
                token: ":abc123".into()
            }
        );
        // Token missing: degrade rather than guess
        assert!(matches!(parse_line("PING"), ParsedMessage::Other { .. }));
    }

    #[test]
    fn test_precedence_privmsg_beats_ping() {
        // PRIVMSG whose text mentions PING still classifies as PRIVMSG
        let msg = parse_line(":nick!u@h PRIVMSG #chan :did you see that PING?");
        assert!(matches!(msg, ParsedMessage::Privmsg { .. }));
    }

    #[test]
    fn test_total_over_junk() {
        for line in ["", ":", "!", "garbage", ":only-a-prefix", "  \t ", "::::"] {
            // must classify, never panic
            let _ = parse_line(line);
        }
        assert_eq!(
            parse_line("garbage"),
            ParsedMessage::Other {
                raw: "garbage".into()
            }
        );
    }
}
