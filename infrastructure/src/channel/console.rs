//! Terminal channel
//!
//! One participant sitting at the terminal: run messages are written to
//! stdout, each non-empty stdin line is one inbound message.

use async_trait::async_trait;
use huddle_application::ports::contactable::{Contactable, ContactableError, MessageListener};
use huddle_domain::ContactableConfig;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

type Writer = Box<dyn AsyncWrite + Send + Unpin>;

/// Participant reached through a line-oriented reader and writer.
pub struct ConsoleContactable {
    config: ContactableConfig,
    writer: tokio::sync::Mutex<Writer>,
    listeners: Arc<Mutex<Vec<MessageListener>>>,
}

impl ConsoleContactable {
    /// Attach to the process's stdin and stdout.
    ///
    /// Must be called inside a tokio runtime; reading stops when `shutdown`
    /// is cancelled or stdin closes.
    pub fn stdio(config: ContactableConfig, shutdown: CancellationToken) -> Arc<Self> {
        Self::with_io(
            config,
            BufReader::new(tokio::io::stdin()),
            tokio::io::stdout(),
            shutdown,
        )
    }

    /// Attach to arbitrary line-oriented IO
    pub fn with_io<R, W>(
        config: ContactableConfig,
        reader: R,
        writer: W,
        shutdown: CancellationToken,
    ) -> Arc<Self>
    where
        R: AsyncBufRead + Send + Unpin + 'static,
        W: AsyncWrite + Send + Unpin + 'static,
    {
        let contactable = Arc::new(Self {
            config,
            writer: tokio::sync::Mutex::new(Box::new(writer)),
            listeners: Arc::new(Mutex::new(Vec::new())),
        });
        tokio::spawn(read_loop(
            reader,
            Arc::clone(&contactable.listeners),
            shutdown,
        ));
        contactable
    }
}

async fn read_loop<R>(
    reader: R,
    listeners: Arc<Mutex<Vec<MessageListener>>>,
    shutdown: CancellationToken,
) where
    R: AsyncBufRead + Send + Unpin,
{
    let mut lines = reader.lines();
    loop {
        tokio::select! {
            biased;
            _ = shutdown.cancelled() => {
                debug!("Console reader stopped");
                break;
            }
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    let text = line.trim_end_matches('\r');
                    if text.is_empty() {
                        continue;
                    }
                    if let Ok(mut listeners) = listeners.lock() {
                        listeners.retain(|l| !l.is_detached());
                        for listener in listeners.iter() {
                            listener.deliver(text);
                        }
                    }
                }
                Ok(None) => {
                    debug!("Console input closed");
                    break;
                }
                Err(e) => {
                    warn!("Console read failed: {}", e);
                    break;
                }
            }
        }
    }
}

#[async_trait]
impl Contactable for ConsoleContactable {
    fn config(&self) -> ContactableConfig {
        self.config.clone()
    }

    async fn speak(&self, text: &str) -> Result<(), ContactableError> {
        let send_failed = |e: std::io::Error| ContactableError::SendFailed {
            participant: self.config.id.clone(),
            reason: e.to_string(),
        };
        let mut writer = self.writer.lock().await;
        writer
            .write_all(format!("{}\n", text).as_bytes())
            .await
            .map_err(send_failed)?;
        writer.flush().await.map_err(send_failed)?;
        Ok(())
    }

    fn listen(&self, listener: MessageListener) {
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.push(listener);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use huddle_application::ports::contactable::InboundMessage;
    use tokio::io::AsyncReadExt;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_lines_become_messages() {
        let (mut input, input_end) = tokio::io::duplex(256);
        let shutdown = CancellationToken::new();
        let console = ConsoleContactable::with_io(
            ContactableConfig::new("cli", "me"),
            BufReader::new(input_end),
            tokio::io::sink(),
            shutdown.clone(),
        );

        let (tx, mut rx) = mpsc::unbounded_channel::<InboundMessage>();
        console.listen(MessageListener::new(0, tx, CancellationToken::new()));

        input.write_all(b"0\r\n\n1\n").await.unwrap();

        assert_eq!(rx.recv().await.unwrap().text, "0");
        assert_eq!(rx.recv().await.unwrap().text, "1");
        shutdown.cancel();
    }

    #[tokio::test]
    async fn test_speak_writes_one_line_per_message() {
        let (output_end, mut output) = tokio::io::duplex(256);
        let shutdown = CancellationToken::new();
        let console = ConsoleContactable::with_io(
            ContactableConfig::new("cli", "me"),
            BufReader::new(tokio::io::empty()),
            output_end,
            shutdown,
        );

        console.speak("first").await.unwrap();
        console.speak("(0 remaining)\n0) a\n1) b").await.unwrap();
        drop(console);

        let mut written = String::new();
        output.read_to_string(&mut written).await.unwrap();
        assert_eq!(written, "first\n(0 remaining)\n0) a\n1) b\n");
    }
}
