//! Server connection: TCP transport, line framer, and the writer funnel.
//!
//! The read half is owned by a spawned framer task that splits the byte
//! stream on newlines and forwards complete lines into the app event
//! channel. The write half is owned by a single writer task fed over a
//! channel, so the PONG responder and the user's commands can both send
//! without interleaving partial lines on the wire.

use crate::app::event::AppEvent;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("could not connect to {host}:{port}: {source}")]
    Connect {
        host: String,
        port: u16,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid server address: {0:?}")]
    BadAddress(String),
}

/// Handle to a live connection. Dropping it (via [`Connection::shutdown`])
/// releases both halves of the stream.
pub struct Connection {
    line_tx: mpsc::UnboundedSender<String>,
    writer: JoinHandle<()>,
    framer: JoinHandle<()>,
}

impl Connection {
    /// Queue one protocol line for sending. Returns `false` once the
    /// writer task has stopped.
    pub fn send_line(&self, line: String) -> bool {
        self.line_tx.send(line).is_ok()
    }

    /// Close down: let the writer drain everything already queued (the
    /// QUIT line in particular), then drop the read half.
    pub async fn shutdown(self) {
        drop(self.line_tx);
        let _ = self.writer.await;
        self.framer.abort();
    }
}

/// Connect to `host:port` and spawn the framer and writer tasks. Events
/// (including `Connected` itself) arrive on `event_tx`.
pub async fn spawn_connection(
    host: &str,
    port: u16,
    event_tx: mpsc::UnboundedSender<AppEvent>,
) -> Result<Connection, ConnectError> {
    let stream = TcpStream::connect((host, port))
        .await
        .map_err(|source| ConnectError::Connect {
            host: host.to_string(),
            port,
            source,
        })?;
    debug!(host = %host, port = port, "connected");
    let (read_half, mut write_half) = stream.into_split();

    // Surface Connected before the framer is running so registration is
    // already queued when the first server line arrives
    let _ = event_tx.send(AppEvent::Connected);

    let (line_tx, mut line_rx) = mpsc::unbounded_channel::<String>();
    let writer_tx = event_tx.clone();
    let writer = tokio::spawn(async move {
        while let Some(line) = line_rx.recv().await {
            trace!(line = %line, "send");
            let framed = format!("{}\r\n", line);
            if let Err(e) = write_half.write_all(framed.as_bytes()).await {
                let _ = writer_tx.send(AppEvent::ConnectionError {
                    error: e.to_string(),
                });
                break;
            }
            if let Err(e) = write_half.flush().await {
                let _ = writer_tx.send(AppEvent::ConnectionError {
                    error: e.to_string(),
                });
                break;
            }
        }
    });

    let framer_tx = event_tx.clone();
    let framer = tokio::spawn(async move {
        let mut reader = BufReader::new(read_half);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => {
                    let _ = framer_tx.send(AppEvent::Disconnected {
                        reason: "connection closed by server".to_string(),
                    });
                    break;
                }
                Ok(_) => {
                    if buf.last() != Some(&b'\n') {
                        // Stream ended mid-line: that is a termination,
                        // not a final partial line
                        let _ = framer_tx.send(AppEvent::Disconnected {
                            reason: "connection closed by server".to_string(),
                        });
                        break;
                    }
                    while matches!(buf.last(), Some(&(b'\n' | b'\r'))) {
                        buf.pop();
                    }
                    let line = String::from_utf8_lossy(&buf).into_owned();
                    if framer_tx.send(AppEvent::ServerLine(line)).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    let _ = framer_tx.send(AppEvent::ConnectionError {
                        error: e.to_string(),
                    });
                    break;
                }
            }
        }
    });

    Ok(Connection {
        line_tx,
        writer,
        framer,
    })
}

/// Parse a `host` or `host:port` address string. Defaults to port 6667.
pub fn parse_server_address(addr: &str) -> Result<(String, u16), ConnectError> {
    let addr = addr.trim();
    if addr.is_empty() {
        return Err(ConnectError::BadAddress(addr.to_string()));
    }
    match addr.rsplit_once(':') {
        Some((host, port)) => {
            if host.is_empty() {
                return Err(ConnectError::BadAddress(addr.to_string()));
            }
            let port = port
                .parse()
                .map_err(|_| ConnectError::BadAddress(addr.to_string()))?;
            Ok((host.to_string(), port))
        }
        None => Ok((addr.to_string(), 6667)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;
    use tokio::net::TcpListener;

    #[test]
    fn test_parse_server_address() {
        assert_eq!(
            parse_server_address("localhost").unwrap(),
            ("localhost".to_string(), 6667)
        );
        assert_eq!(
            parse_server_address("irc.example.org:6668").unwrap(),
            ("irc.example.org".to_string(), 6668)
        );
        assert!(parse_server_address("").is_err());
        assert!(parse_server_address("host:notaport").is_err());
        assert!(parse_server_address(":6667").is_err());
    }

    #[tokio::test]
    async fn test_framer_splits_lines_and_drops_trailing_partial() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            sock.write_all(b"PING :x\r\n:nick!u@h PRIVMSG #c :hi\npartial")
                .await
                .unwrap();
            // drop closes the stream mid-line
        });

        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let conn = spawn_connection(&addr.ip().to_string(), addr.port(), event_tx)
            .await
            .unwrap();
        server.await.unwrap();

        assert!(matches!(event_rx.recv().await, Some(AppEvent::Connected)));
        match event_rx.recv().await {
            Some(AppEvent::ServerLine(l)) => assert_eq!(l, "PING :x"),
            other => panic!("unexpected event: {:?}", other),
        }
        match event_rx.recv().await {
            Some(AppEvent::ServerLine(l)) => assert_eq!(l, ":nick!u@h PRIVMSG #c :hi"),
            other => panic!("unexpected event: {:?}", other),
        }
        // "partial" never shows up as a line; the stream just ends
        assert!(matches!(
            event_rx.recv().await,
            Some(AppEvent::Disconnected { .. })
        ));
        conn.shutdown().await;
    }

    #[tokio::test]
    async fn test_writer_frames_outbound_lines() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            sock.read_to_end(&mut buf).await.unwrap();
            buf
        });

        let (event_tx, mut _event_rx) = mpsc::unbounded_channel();
        let conn = spawn_connection(&addr.ip().to_string(), addr.port(), event_tx)
            .await
            .unwrap();
        assert!(conn.send_line("NICK me".to_string()));
        assert!(conn.send_line("QUIT :Bye".to_string()));
        conn.shutdown().await;

        let received = server.await.unwrap();
        assert_eq!(&received, b"NICK me\r\nQUIT :Bye\r\n");
    }
}
