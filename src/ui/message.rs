//! Chat message bubbles.

use chrono::{DateTime, Utc};

use super::{escape_html, format_time_at};
use crate::domain::ChatMessage;

/// Class list of a bubble, styled by who sent it.
#[must_use]
pub fn message_class(message: &ChatMessage) -> &'static str {
    if message.is_sender {
        "message-bubble sent"
    } else {
        "message-bubble received"
    }
}

/// Inner markup of a bubble, with the time label computed against `now`.
#[must_use]
pub fn message_markup(message: &ChatMessage, now: DateTime<Utc>) -> String {
    let content = escape_html(&message.content);
    let time = format_time_at(&message.timestamp, now);
    format!(
        r#"
        <p>{content}</p>
        <span class="text-xs opacity-75">{time}</span>
    "#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_sender_and_receiver_classes() {
        let now = Utc::now();
        let mut msg = ChatMessage {
            content: "hey".into(),
            timestamp: now.into(),
            is_sender: true,
        };
        assert_eq!(message_class(&msg), "message-bubble sent");
        msg.is_sender = false;
        assert_eq!(message_class(&msg), "message-bubble received");
    }

    #[test]
    fn test_markup_escapes_and_labels() {
        let now = Utc::now();
        let msg = ChatMessage {
            content: "<i>hi</i> & bye".into(),
            timestamp: (now - Duration::minutes(5)).into(),
            is_sender: false,
        };
        let html = message_markup(&msg, now);
        assert!(html.contains("<p>&lt;i&gt;hi&lt;/i&gt; &amp; bye</p>"));
        assert!(html.contains("5m ago"));
    }
}
