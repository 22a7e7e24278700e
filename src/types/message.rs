use serde::{Deserialize, Serialize};

/// Who authored a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// Typed (or attached) by the local user.
    User,
    /// Produced by the agent service, or synthesized when it failed.
    Bot,
}

impl Sender {
    /// Returns the display label for the sender.
    pub fn label(&self) -> &'static str {
        match self {
            Sender::User => "You",
            Sender::Bot => "Agent",
        }
    }
}

/// A single transcript entry.
///
/// Messages are immutable once appended to a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// The author of the message.
    pub sender: Sender,

    /// The message body.
    pub text: String,

    /// A document the agent produced alongside the reply, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
}

impl Message {
    /// Creates a user-authored message.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
            download_url: None,
        }
    }

    /// Creates a bot-authored message.
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
            download_url: None,
        }
    }

    /// Attaches a download link to this message.
    pub fn with_download_url(mut self, url: impl Into<String>) -> Self {
        self.download_url = Some(url.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    #[test]
    fn sender_serializes_lowercase() {
        assert_eq!(to_value(Sender::User).unwrap(), json!("user"));
        assert_eq!(to_value(Sender::Bot).unwrap(), json!("bot"));
    }

    #[test]
    fn message_omits_missing_download_url() {
        let message = Message::user("hi");
        assert_eq!(
            to_value(&message).unwrap(),
            json!({"sender": "user", "text": "hi"})
        );
    }

    #[test]
    fn message_with_download_url() {
        let message = Message::bot("done").with_download_url("http://x/download/application/a.pdf");
        assert_eq!(message.sender, Sender::Bot);
        assert_eq!(
            message.download_url.as_deref(),
            Some("http://x/download/application/a.pdf")
        );
    }
}
