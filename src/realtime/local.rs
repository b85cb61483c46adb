//! In-process channel pair over tokio mpsc.

use std::sync::Arc;

use futures::StreamExt;
use tokio::sync::mpsc;

use super::{Connection, Frame, InboundEvent, MessageCount, OutboundEvent, RealtimeChannel};
use crate::error::{Error, Result};

/// Outbound side handed to the controller.
#[derive(Debug)]
pub struct LocalChannel {
    outbound: mpsc::UnboundedSender<String>,
}

impl LocalChannel {
    /// Create a connected pair: the controller's [`Connection`] and the
    /// [`LocalPeer`] playing the server.
    #[must_use]
    pub fn pair() -> (Connection, LocalPeer) {
        let (out_tx, out_rx) = mpsc::unbounded_channel();
        let (in_tx, in_rx) = mpsc::unbounded_channel::<String>();

        let frames = futures::stream::unfold(in_rx, |mut rx| async move {
            rx.recv().await.map(|frame| (frame, rx))
        })
        .boxed();

        let connection = Connection {
            channel: Arc::new(LocalChannel { outbound: out_tx }),
            frames,
        };
        let peer = LocalPeer {
            inbound: in_tx,
            outbound: out_rx,
        };
        (connection, peer)
    }
}

impl RealtimeChannel for LocalChannel {
    fn emit(&self, event: OutboundEvent) -> Result<()> {
        let frame = Frame::encode(&event)?;
        self.outbound
            .send(frame)
            .map_err(|e| Error::Channel(format!("peer disconnected: {e}")))
    }
}

/// Server side of a [`LocalChannel`] pair.
#[derive(Debug)]
pub struct LocalPeer {
    inbound: mpsc::UnboundedSender<String>,
    outbound: mpsc::UnboundedReceiver<String>,
}

impl LocalPeer {
    /// Push a raw frame to the controller.
    pub fn push_frame(&self, frame: impl Into<String>) -> Result<()> {
        self.inbound
            .send(frame.into())
            .map_err(|e| Error::Channel(format!("controller disconnected: {e}")))
    }

    /// Push a `message_count` event.
    pub fn push_count(&self, count: i64) -> Result<()> {
        self.push(&InboundEvent::MessageCount(MessageCount { count: Some(count) }))
    }

    /// Push a decoded event.
    pub fn push(&self, event: &InboundEvent) -> Result<()> {
        let frame = match event {
            InboundEvent::NewMessage(message) => Frame {
                event: super::NEW_MESSAGE.to_string(),
                data: serde_json::to_value(message)?,
            },
            InboundEvent::MessageCount(count) => Frame {
                event: super::MESSAGE_COUNT.to_string(),
                data: serde_json::to_value(count)?,
            },
        };
        self.push_frame(serde_json::to_string(&frame)?)
    }

    /// Wait for the next frame emitted by the controller.
    pub async fn next_outbound(&mut self) -> Option<Frame> {
        let text = self.outbound.recv().await?;
        serde_json::from_str(&text).ok()
    }

    /// Take an already emitted frame without waiting.
    pub fn try_outbound(&mut self) -> Option<Frame> {
        let text = self.outbound.try_recv().ok()?;
        serde_json::from_str(&text).ok()
    }

    /// Close the inbound direction, ending the controller's dispatch task.
    pub fn close(self) {
        drop(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_emit_reaches_peer() {
        let (connection, mut peer) = LocalChannel::pair();
        connection
            .channel
            .emit(OutboundEvent::SendMessage {
                conversation_id: 1,
                content: "yo".into(),
            })
            .unwrap();

        let frame = peer.next_outbound().await.unwrap();
        assert_eq!(frame.event, "send_message");
        assert_eq!(frame.data["content"], "yo");
    }

    #[tokio::test]
    async fn test_frames_stream_ends_when_peer_closes() {
        let (mut connection, peer) = LocalChannel::pair();
        peer.push_count(3).unwrap();
        peer.close();

        let first = connection.frames.next().await.unwrap();
        assert_eq!(
            Frame::decode(&first).unwrap(),
            Some(InboundEvent::MessageCount(MessageCount { count: Some(3) }))
        );
        assert!(connection.frames.next().await.is_none());
    }

    #[test]
    fn test_emit_after_peer_dropped_is_an_error() {
        let (connection, peer) = LocalChannel::pair();
        drop(peer);
        let result = connection.channel.emit(OutboundEvent::SendMessage {
            conversation_id: 1,
            content: "lost".into(),
        });
        assert!(matches!(result, Err(Error::Channel(_))));
    }
}
