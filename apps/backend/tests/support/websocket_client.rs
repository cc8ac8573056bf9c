// WebSocket client utilities for testing

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

pub struct WebSocketClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WebSocketClient {
    /// Connect, retrying until success or timeout.
    pub async fn connect_retry(
        url: &str,
        timeout: Duration,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let start = tokio::time::Instant::now();
        loop {
            match connect_async(url).await {
                Ok((stream, _)) => return Ok(Self { stream }),
                Err(err) => {
                    if start.elapsed() >= timeout {
                        return Err(Box::new(err));
                    }
                    tokio::time::sleep(Duration::from_millis(5)).await;
                }
            }
        }
    }

    /// Next message with a timeout. Server pings are skipped.
    pub async fn recv_timeout(
        &mut self,
        timeout: Duration,
    ) -> Result<Option<Message>, Box<dyn std::error::Error>> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let next = tokio::time::timeout_at(deadline, self.stream.next())
                .await
                .map_err(|_| "Timeout waiting for message")?
                .transpose()?;
            match next {
                Some(Message::Ping(_)) | Some(Message::Pong(_)) => continue,
                other => return Ok(other),
            }
        }
    }

    pub async fn send(&mut self, text: &str) -> Result<(), Box<dyn std::error::Error>> {
        self.stream.send(Message::text(text)).await?;
        Ok(())
    }

    /// Send one `{eventType, payload}` frame.
    pub async fn send_event(
        &mut self,
        event_type: &str,
        payload: Value,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let frame = json!({ "eventType": event_type, "payload": payload });
        self.send(&frame.to_string()).await
    }

    pub async fn close(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.stream.close(None).await?;
        Ok(())
    }

    /// Parse the next text message as JSON; `None` for anything else.
    pub async fn recv_json_timeout(
        &mut self,
        timeout: Duration,
    ) -> Result<Option<Value>, Box<dyn std::error::Error>> {
        match self.recv_timeout(timeout).await? {
            Some(Message::Text(text)) => Ok(Some(serde_json::from_str(text.as_str())?)),
            _ => Ok(None),
        }
    }

    /// Like `recv_json_timeout` but anything other than JSON text is an error.
    pub async fn expect_json(&mut self, timeout: Duration) -> Result<Value, Box<dyn std::error::Error>> {
        self.recv_json_timeout(timeout)
            .await?
            .ok_or_else(|| "expected a JSON text frame".into())
    }

    /// Assert nothing arrives within `wait`.
    pub async fn expect_silence(&mut self, wait: Duration) -> Result<(), Box<dyn std::error::Error>> {
        match tokio::time::timeout(wait, self.stream.next()).await {
            Err(_) => Ok(()),
            Ok(Some(Ok(Message::Ping(_)))) => Ok(()),
            Ok(other) => Err(format!("expected silence, got {other:?}").into()),
        }
    }

    /// Wait for the server to close the socket and return the close code.
    pub async fn expect_close(
        &mut self,
        timeout: Duration,
    ) -> Result<Option<CloseCode>, Box<dyn std::error::Error>> {
        match self.recv_timeout(timeout).await {
            Ok(Some(Message::Close(frame))) => Ok(frame.map(|f| f.code)),
            Ok(None) => Ok(None),
            Ok(Some(other)) => Err(format!("expected close, got {other:?}").into()),
            Err(err) => Err(err),
        }
    }
}
