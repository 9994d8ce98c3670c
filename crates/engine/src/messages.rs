use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Message {
    pub id: Uuid,
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    fn new(content: impl Into<String>, sender: Sender) -> Self {
        Self { id: Uuid::new_v4(), content: content.into(), sender, timestamp: Utc::now() }
    }
}

/// Append-only transcript. Messages are never reordered or deleted.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message::new(content, Sender::User));
    }

    pub fn push_bot(&mut self, content: impl Into<String>) {
        self.messages.push(Message::new(content, Sender::Bot));
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last_bot(&self) -> Option<&Message> {
        self.messages.iter().rev().find(|message| message.sender == Sender::Bot)
    }
}
