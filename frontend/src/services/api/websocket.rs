//! # WebSocket Client for Live Analytics
//!
//! [`WsConnector`] opens the analytics stream and exposes it as a
//! [`FrameStream`] of text payloads. Reconnect policy lives in the store
//! (`app::connection`); this module only knows how to talk WebSocket.

use crate::core::error::{FrontendError, Result};
use crate::core::service::{FrameStream, StreamConnector};
use futures_util::{stream, SinkExt, StreamExt};
use shared::{AnalyticsSnapshot, AnalyticsUpdateMessage};
use tokio::net::TcpStream;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, trace, warn};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Production [`StreamConnector`] backed by `tokio-tungstenite`.
#[derive(Debug, Clone, Default)]
pub struct WsConnector;

#[async_trait::async_trait]
impl StreamConnector for WsConnector {
    async fn connect(&self, url: &str) -> Result<FrameStream> {
        let (ws_stream, response) = connect_async(url).await.map_err(|e| {
            warn!(url = %url, error = %e, "Failed to connect to analytics stream");
            FrontendError::network(e)
        })?;

        info!(
            url = %url,
            status = ?response.status(),
            "Analytics stream connection established"
        );
        Ok(text_frames(ws_stream))
    }
}

/// Text payloads of `ws`, answering pings along the way.
///
/// Ends on a close frame or after yielding a read/write error.
fn text_frames(ws: WsStream) -> FrameStream {
    stream::unfold(Some(ws), |state| async move {
        let mut ws = state?;
        loop {
            match ws.next().await {
                Some(Ok(Message::Text(text))) => return Some((Ok(text), Some(ws))),
                Some(Ok(Message::Ping(data))) => {
                    trace!(data_len = data.len(), "Received ping, sending pong");
                    if let Err(e) = ws.send(Message::Pong(data)).await {
                        return Some((Err(FrontendError::network(e)), None));
                    }
                }
                Some(Ok(Message::Close(frame))) => {
                    info!(
                        code = ?frame.as_ref().map(|f| f.code),
                        reason = ?frame.as_ref().map(|f| f.reason.to_string()),
                        "Analytics stream closed by server"
                    );
                    return None;
                }
                Some(Ok(_)) => trace!("Ignoring non-text WebSocket frame"),
                Some(Err(e)) => return Some((Err(FrontendError::network(e)), None)),
                None => return None,
            }
        }
    })
    .boxed()
}

/// Result of decoding one streamed text frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameDecode {
    /// A complete `analytics_update`
    Update(AnalyticsSnapshot),
    /// Valid JSON that is not an analytics update
    Ignored,
    /// Not parseable at all
    Malformed(String),
}

/// Decode a streamed text frame.
pub fn decode_frame(text: &str) -> FrameDecode {
    match serde_json::from_str::<AnalyticsUpdateMessage>(text) {
        Ok(message) => {
            let message_type = message.message_type.clone();
            match message.into_snapshot() {
                Some(snapshot) => FrameDecode::Update(snapshot),
                None => {
                    debug!(message_type = %message_type, "Ignoring non-analytics frame");
                    FrameDecode::Ignored
                }
            }
        }
        Err(e) => {
            let preview: String = text.chars().take(100).collect();
            warn!(error = %e, message_preview = %preview, "Failed to parse analytics frame");
            FrameDecode::Malformed(e.to_string())
        }
    }
}
