//! Presentation: colorized console output and prompts.
//!
//! Plain line-oriented terminal output; no alternate screen, no raw mode.
//! Each rendered line carries a dim `HH:MM` timestamp, with one color role
//! per event kind.

use crate::app::state::DisplayEvent;
use crate::config::AppConfig;
use chrono::Local;
use crossterm::style::Stylize;
use std::io::{self, BufRead, Write};

fn timestamp() -> String {
    Local::now().format("%H:%M").to_string()
}

/// Render one display event to stdout.
pub fn display(event: &DisplayEvent) {
    let ts = timestamp();
    match event {
        DisplayEvent::Chat { origin, text } => {
            println!(
                "{} {} {}",
                ts.dark_grey(),
                format!("<{}>", origin).cyan(),
                text
            );
        }
        DisplayEvent::System(text) => {
            println!("{} {}", ts.dark_grey(), text.as_str().dark_green());
        }
        DisplayEvent::Roster { channel, users } => {
            println!(
                "{} {} {}",
                ts.dark_grey(),
                format!("Users in {}:", channel).yellow(),
                users.join(" ")
            );
        }
        DisplayEvent::Membership { user, joined } => {
            let verb = if *joined { "joined" } else { "left" };
            println!(
                "{} {}",
                ts.dark_grey(),
                format!("*** {} {} the channel", user, verb).magenta()
            );
        }
        DisplayEvent::Raw(raw) => {
            println!("{} {}", ts.dark_grey(), raw.as_str().dark_grey());
        }
        DisplayEvent::Error(text) => {
            println!("{} {}", ts.dark_grey(), text.as_str().red());
        }
    }
}

/// Report a fatal connection problem.
pub fn report_connection_error(message: &str) {
    eprintln!("{}", format!("Error: {}", message).red());
}

/// Startup greeting with the effective defaults.
pub fn banner(cfg: &AppConfig) {
    println!("{}", "shellchat - a minimal IRC client".bold());
    println!(
        "Nickname {}, default channel {}. Commands: /quit /nick /join /list /msg",
        cfg.nickname.as_str().cyan(),
        cfg.channel.as_str().yellow()
    );
}

/// Ask for a server address. An empty answer means "use the default".
pub fn prompt_server_address(default_host: &str, default_port: u16) -> io::Result<String> {
    print!("Server [{}:{}]: ", default_host, default_port);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
