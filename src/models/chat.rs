use chrono::{ Local, TimeZone, Utc };
use serde::{ Serialize, Deserialize };
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub sender: Sender,
    pub content: String,
    /// Unix time in milliseconds.
    pub timestamp: i64,
    #[serde(default)]
    pub is_voice: bool,
}

impl Message {
    pub fn user(content: &str, is_voice: bool) -> Self {
        Self::new(Sender::User, content, is_voice)
    }

    pub fn bot(content: &str) -> Self {
        Self::new(Sender::Bot, content, false)
    }

    fn new(sender: Sender, content: &str, is_voice: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            sender,
            content: content.to_string(),
            timestamp: Utc::now().timestamp_millis(),
            is_voice,
        }
    }

    /// Local wall-clock time as `HH:MM`.
    pub fn time_label(&self) -> String {
        match Local.timestamp_millis_opt(self.timestamp).single() {
            Some(dt) => dt.format("%H:%M").to_string(),
            None => String::from("--:--"),
        }
    }
}

/// Append-only message log for one session.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Conversation {
    pub id: String,
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            messages: Vec::new(),
        }
    }

    pub fn push(&mut self, message: Message) -> &Message {
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    /// Bot messages in order, newest last.
    pub fn bot_messages(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|m| m.sender == Sender::Bot)
    }
}
