use serde::{ Serialize, Deserialize };
use super::chat::Message;
use super::language::Language;

/// Everything the chat controller reacts to. User actions and the completions of
/// timers and speech requests all arrive through the same queue.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatEvent {
    Open,
    Close,
    Input {
        content: String,
    },
    Chat {
        content: String,
        #[serde(default)]
        is_voice: bool,
    },
    /// Fired by the reply timer; `language` is the one active when the message was sent.
    ReplyDue {
        input: String,
        language: Language,
    },
    ToggleVoice,
    Speak {
        message_id: String,
    },
    StopSpeaking,
    SpeechStart {
        utterance: u64,
    },
    SpeechEnd {
        utterance: u64,
    },
    SpeechError {
        utterance: u64,
        message: String,
    },
    Listen,
    Transcript {
        content: String,
    },
    RecognitionError {
        message: String,
    },
    RecognitionEnd,
    SetLanguage {
        language: Language,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoiceState {
    pub listening: bool,
    pub speaking: bool,
    pub voice_enabled: bool,
}

impl Default for VoiceState {
    fn default() -> Self {
        Self {
            listening: false,
            speaking: false,
            voice_enabled: true,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Transient user-facing notification.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: Option<String>,
}

impl Notice {
    pub fn error(title: &str, description: Option<&str>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.to_string(),
            description: description.map(str::to_string),
        }
    }

    pub fn info(title: &str, description: Option<&str>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.to_string(),
            description: description.map(str::to_string),
        }
    }
}

/// What the controller hands back to the front-end after each event.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatUpdate {
    Processing,
    Message {
        message: Message,
    },
    Suggestions {
        items: Vec<String>,
    },
    Notice {
        notice: Notice,
    },
    State {
        state: VoiceState,
    },
}
