//! Configuration data model.
//!
//! Derives `Serialize`/`Deserialize` for TOML persistence. Every field has
//! a default so the client works with no config file at all.

use serde::{Deserialize, Serialize};

use super::nickname::generate_nickname;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default server, offered at the address prompt.
    #[serde(default = "default_server")]
    pub server: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Nickname; randomized when absent.
    #[serde(default = "generate_nickname")]
    pub nickname: String,
    #[serde(default = "default_realname")]
    pub realname: String,
    /// Channel joined after registration and used for plain chat input.
    #[serde(default = "default_channel")]
    pub channel: String,
    #[serde(default = "default_quit_message")]
    pub quit_message: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            port: default_port(),
            nickname: generate_nickname(),
            realname: default_realname(),
            channel: default_channel(),
            quit_message: default_quit_message(),
        }
    }
}

fn default_server() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    6667
}

fn default_realname() -> String {
    "shellchat user".to_string()
}

fn default_channel() -> String {
    "#mainC".to_string()
}

fn default_quit_message() -> String {
    "Bye".to_string()
}
