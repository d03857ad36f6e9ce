mod app;
mod config;
mod irc;
mod ui;

use crate::app::action::Action;
use crate::app::event::AppEvent;
use crate::app::handler;
use crate::app::state::{Session, SessionPhase};
use crate::irc::connection::{self, Connection};
use anyhow::Result;
use std::io::BufRead;
use tokio::sync::mpsc;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cfg = config::load_config()?;
    // Persist so a generated nickname stays stable across runs
    if let Err(e) = config::save_config(&cfg) {
        warn!(error = %e, "could not persist config");
    }

    ui::banner(&cfg);
    let answer = ui::prompt_server_address(&cfg.server, cfg.port)?;
    let (host, port) = if answer.is_empty() {
        (cfg.server.clone(), cfg.port)
    } else {
        match connection::parse_server_address(&answer) {
            Ok(hp) => hp,
            Err(e) => {
                ui::report_connection_error(&e.to_string());
                std::process::exit(1);
            }
        }
    };

    let (event_tx, event_rx) = mpsc::unbounded_channel::<AppEvent>();

    let conn = match connection::spawn_connection(&host, port, event_tx.clone()).await {
        Ok(conn) => conn,
        Err(e) => {
            ui::report_connection_error(&e.to_string());
            std::process::exit(1);
        }
    };

    // Terminal input on a dedicated OS thread: one UserInput event per
    // line, InputClosed on EOF. A thread rather than a task, so a read
    // still parked on the keyboard never holds up runtime shutdown.
    let input_tx = event_tx.clone();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if input_tx.send(AppEvent::UserInput(line)).is_err() {
                        return;
                    }
                }
                Err(_) => break,
            }
        }
        let _ = input_tx.send(AppEvent::InputClosed);
    });

    let session = Session::new(
        cfg.nickname.clone(),
        cfg.channel.clone(),
        cfg.realname.clone(),
        cfg.quit_message.clone(),
    );

    run_event_loop(session, event_rx, conn).await;
    Ok(())
}

/// Main event loop. Owns the session; the reader, writer, and input tasks
/// only ever talk to it through the channels.
async fn run_event_loop(
    mut session: Session,
    mut event_rx: mpsc::UnboundedReceiver<AppEvent>,
    conn: Connection,
) {
    let mut should_quit = false;
    while !should_quit {
        let Some(event) = event_rx.recv().await else {
            break;
        };
        for action in handler::handle_event(&mut session, event) {
            match action {
                Action::SendLine(line) => {
                    if !conn.send_line(line) {
                        should_quit = true;
                    }
                }
                Action::Display(ev) => ui::display(&ev),
                Action::Quit => should_quit = true,
            }
        }
    }

    session.phase = SessionPhase::Closed;
    // Drains queued outbound lines (the QUIT) before dropping the socket
    conn.shutdown().await;
}

/// Diagnostics go to a log file, never the console the chat lives on.
/// Enabled only when `RUST_LOG` is set.
fn init_tracing() {
    let Ok(filter) = EnvFilter::try_from_default_env() else {
        return;
    };
    let dir = dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("shellchat");
    let _ = std::fs::create_dir_all(&dir);
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("shellchat.log"))
    {
        Ok(file) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
            .init(),
        Err(_) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
    }
}
