//! Console messaging gateway: replies are written line by line to a writer,
//! stdout in the binary.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::io::{AsyncWrite, AsyncWriteExt, Stdout};
use tokio::sync::Mutex;

use crate::ports::{GatewayError, MessagingGateway};

pub struct ConsoleGateway<W = Stdout> {
    writer: Arc<Mutex<W>>,
}

impl ConsoleGateway<Stdout> {
    pub fn stdout() -> Self {
        Self::new(tokio::io::stdout())
    }
}

impl<W> ConsoleGateway<W>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    pub fn new(writer: W) -> Self {
        Self {
            writer: Arc::new(Mutex::new(writer)),
        }
    }

    /// Shared handle to the underlying writer.
    pub fn writer(&self) -> Arc<Mutex<W>> {
        Arc::clone(&self.writer)
    }

    async fn write_block(&self, room: &str, body: &str) -> Result<(), GatewayError> {
        let mut writer = self.writer.lock().await;
        let block = format!("[{}]\n{}\n", room, body.trim_end());
        writer
            .write_all(block.as_bytes())
            .await
            .map_err(|e| GatewayError::SendFailed(e.to_string()))?;
        writer
            .flush()
            .await
            .map_err(|e| GatewayError::SendFailed(e.to_string()))
    }
}

#[async_trait]
impl<W> MessagingGateway for ConsoleGateway<W>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    async fn send_text(&self, room: &str, text: &str) -> Result<(), GatewayError> {
        self.write_block(room, text).await
    }

    async fn send_formatted(&self, room: &str, html: &str) -> Result<(), GatewayError> {
        self.write_block(room, html).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn writes_room_header_and_body() {
        let gateway = ConsoleGateway::new(Vec::<u8>::new());

        gateway.send_text("!room:x", "Artikel hinzugefügt").await.unwrap();
        gateway.send_formatted("!room:x", "<table></table>\n").await.unwrap();

        let writer = gateway.writer();
        let output = String::from_utf8(writer.lock().await.clone()).unwrap();
        assert_eq!(
            output,
            "[!room:x]\nArtikel hinzugefügt\n[!room:x]\n<table></table>\n"
        );
    }
}
