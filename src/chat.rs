use log::{ debug, warn };
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{ self, UnboundedReceiver, UnboundedSender };
use tokio::sync::watch;

use crate::agent::Saksham;
use crate::analytics::{ self, AnalyticsEvent };
use crate::config::Content;
use crate::models::chat::{ Conversation, Message, Sender };
use crate::models::events::{ ChatEvent, ChatUpdate, Notice, VoiceState };
use crate::models::language::Language;
use crate::speech::{
    RecognitionRequest,
    SpeechError,
    SpeechRecognizer,
    SpeechRequest,
    SpeechSynthesizer,
    DEFAULT_PITCH,
    DEFAULT_RATE,
};

const QUICK_REPLIES: usize = 3;

#[derive(Debug, Clone)]
pub struct ChatSettings {
    pub response_delay: Duration,
    pub voice_enabled: bool,
    pub speech_rate: f32,
    pub speech_pitch: f32,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            response_delay: Duration::from_millis(1000),
            voice_enabled: true,
            speech_rate: DEFAULT_RATE,
            speech_pitch: DEFAULT_PITCH,
        }
    }
}

/// Owns one chat session. Every input, including timer and speech completions,
/// arrives as a [`ChatEvent`] and is handled to completion before the next one.
pub struct ChatController {
    agent: Saksham,
    content: Arc<Content>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    recognizer: Arc<dyn SpeechRecognizer>,
    events: UnboundedSender<ChatEvent>,
    settings: ChatSettings,
    conversation: Conversation,
    state: VoiceState,
    language: Language,
    open: bool,
    input: String,
    follow_up: Vec<String>,
    /// Number of the most recent utterance; completions of older ones are ignored.
    utterance: u64,
    /// Publishes `utterance` to in-flight speech tasks, which stop once it moves on.
    current_utterance: watch::Sender<u64>,
}

impl ChatController {
    pub fn new(
        agent: Saksham,
        content: Arc<Content>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        recognizer: Arc<dyn SpeechRecognizer>,
        settings: ChatSettings,
        language: Language
    ) -> (Self, UnboundedReceiver<ChatEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let state = VoiceState {
            voice_enabled: settings.voice_enabled,
            ..VoiceState::default()
        };
        let controller = Self {
            agent,
            content,
            synthesizer,
            recognizer,
            events,
            settings,
            conversation: Conversation::new(),
            state,
            language,
            open: false,
            input: String::new(),
            follow_up: Vec::new(),
            utterance: 0,
            current_utterance: watch::channel(0).0,
        };
        (controller, rx)
    }

    /// Queue handle for posting events from outside the dispatcher.
    pub fn sender(&self) -> UnboundedSender<ChatEvent> {
        self.events.clone()
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn state(&self) -> VoiceState {
        self.state
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn pending_input(&self) -> &str {
        &self.input
    }

    /// First chatbot example prompts of the active language.
    pub fn quick_replies(&self) -> Vec<String> {
        self.content.i18n
            .t(self.language)
            .chatbot.examples.iter()
            .take(QUICK_REPLIES)
            .cloned()
            .collect()
    }

    /// Follow-up suggestions of the last matched intent.
    pub fn follow_up(&self) -> &[String] {
        &self.follow_up
    }

    pub fn handle(&mut self, event: ChatEvent) -> Vec<ChatUpdate> {
        match event {
            ChatEvent::Open => self.open(),
            ChatEvent::Close => {
                self.open = false;
                Vec::new()
            }
            ChatEvent::Input { content } => {
                self.input = content;
                Vec::new()
            }
            ChatEvent::Chat { content, is_voice } => self.send_message(&content, is_voice),
            ChatEvent::ReplyDue { input, language } => self.reply(&input, language),
            ChatEvent::ToggleVoice => {
                self.state.voice_enabled = !self.state.voice_enabled;
                debug!("Voice output {}", if self.state.voice_enabled { "on" } else { "off" });
                vec![self.state_update()]
            }
            ChatEvent::Speak { message_id } => self.speak_message(&message_id),
            ChatEvent::StopSpeaking => self.stop_speaking(),
            ChatEvent::SpeechStart { utterance } => {
                debug!("Utterance {} started (current {})", utterance, self.utterance);
                Vec::new()
            }
            ChatEvent::SpeechEnd { utterance } => self.finish_utterance(utterance),
            ChatEvent::SpeechError { utterance, message } => {
                warn!("Speech synthesis failed: {}", message);
                self.finish_utterance(utterance)
            }
            ChatEvent::Listen => self.listen(),
            ChatEvent::Transcript { content } => {
                self.state.listening = false;
                let mut updates = vec![self.state_update()];
                updates.extend(self.send_message(&content, true));
                updates
            }
            ChatEvent::RecognitionError { message } => {
                warn!("Speech recognition failed: {}", message);
                self.state.listening = false;
                let notices = &self.content.i18n.t(self.language).notices;
                vec![
                    self.state_update(),
                    ChatUpdate::Notice {
                        notice: Notice::error(&notices.voice_input_failed, Some(&notices.try_again)),
                    }
                ]
            }
            ChatEvent::RecognitionEnd => {
                if self.state.listening {
                    self.state.listening = false;
                    return vec![self.state_update()];
                }
                Vec::new()
            }
            ChatEvent::SetLanguage { language } => self.set_language(language),
        }
    }

    fn state_update(&self) -> ChatUpdate {
        ChatUpdate::State { state: self.state }
    }

    fn open(&mut self) -> Vec<ChatUpdate> {
        self.open = true;
        analytics::track(AnalyticsEvent::ChatbotOpened, self.language);

        let mut updates = Vec::new();
        if self.conversation.is_empty() {
            let greeting = self.content.i18n.t(self.language).chatbot.greeting.clone();
            let message = self.conversation.push(Message::bot(&greeting)).clone();
            updates.push(ChatUpdate::Message { message });
            updates.extend(self.speak(&greeting));
        }
        updates.push(ChatUpdate::Suggestions { items: self.quick_replies() });
        updates
    }

    fn send_message(&mut self, text: &str, is_voice: bool) -> Vec<ChatUpdate> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let message = self.conversation.push(Message::user(text, is_voice)).clone();
        self.input.clear();
        analytics::track(AnalyticsEvent::MessageSent, self.language);

        let due = ChatEvent::ReplyDue { input: text.to_string(), language: self.language };
        let delay = self.settings.response_delay;
        if delay.is_zero() {
            let _ = self.events.send(due);
        } else {
            let events = self.events.clone();
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                let _ = events.send(due);
            });
        }

        vec![ChatUpdate::Message { message }, ChatUpdate::Processing]
    }

    fn reply(&mut self, input: &str, language: Language) -> Vec<ChatUpdate> {
        match self.agent.reload_intents_if_changed() {
            Ok(true) => debug!("Using reloaded intent table"),
            Ok(false) => {}
            Err(e) => warn!("Keeping current intent table: {}", e),
        }

        let reply = self.agent.respond(input, language);
        let message = self.conversation.push(Message::bot(&reply.text)).clone();
        self.follow_up = reply.follow_up;

        let mut updates = vec![
            ChatUpdate::Message { message },
            ChatUpdate::Suggestions { items: self.follow_up.clone() }
        ];
        updates.extend(self.speak_in(&reply.text, language));
        updates
    }

    fn speak(&mut self, text: &str) -> Vec<ChatUpdate> {
        self.speak_in(text, self.language)
    }

    /// Starts a new utterance, cancelling the one in flight.
    fn speak_in(&mut self, text: &str, language: Language) -> Vec<ChatUpdate> {
        if !self.state.voice_enabled || !self.synthesizer.is_available() {
            return Vec::new();
        }
        if self.state.speaking {
            self.synthesizer.cancel();
        }

        let utterance = self.next_utterance();
        self.state.speaking = true;

        let request = SpeechRequest::new(
            text,
            language,
            self.settings.speech_rate,
            self.settings.speech_pitch
        );
        let synthesizer = Arc::clone(&self.synthesizer);
        let events = self.events.clone();
        let current = self.current_utterance.subscribe();
        tokio::spawn(async move {
            let _ = events.send(ChatEvent::SpeechStart { utterance });
            // dropping the speak future stops playback, even if it never started
            let result = tokio::select! {
                biased;
                _ = superseded(current, utterance) => Err(SpeechError::Cancelled),
                result = synthesizer.speak(&request) => result,
            };
            let done = match result {
                Ok(()) | Err(SpeechError::Cancelled) => ChatEvent::SpeechEnd { utterance },
                Err(e) => ChatEvent::SpeechError { utterance, message: e.to_string() },
            };
            let _ = events.send(done);
        });

        vec![self.state_update()]
    }

    fn speak_message(&mut self, message_id: &str) -> Vec<ChatUpdate> {
        if self.state.speaking {
            debug!("Replay ignored while speaking");
            return Vec::new();
        }
        let text = match self.conversation.get(message_id) {
            Some(message) if message.sender == Sender::Bot => message.content.clone(),
            _ => {
                return Vec::new();
            }
        };
        self.speak(&text)
    }

    /// Advances the utterance number, making every queued completion stale and
    /// stopping any speech task still holding an older number.
    fn next_utterance(&mut self) -> u64 {
        self.utterance += 1;
        self.current_utterance.send_replace(self.utterance);
        self.utterance
    }

    fn stop_speaking(&mut self) -> Vec<ChatUpdate> {
        self.synthesizer.cancel();
        self.next_utterance();
        if self.state.speaking {
            self.state.speaking = false;
            return vec![self.state_update()];
        }
        Vec::new()
    }

    fn finish_utterance(&mut self, utterance: u64) -> Vec<ChatUpdate> {
        if utterance != self.utterance || !self.state.speaking {
            return Vec::new();
        }
        self.state.speaking = false;
        vec![self.state_update()]
    }

    fn listen(&mut self) -> Vec<ChatUpdate> {
        if self.state.listening {
            return Vec::new();
        }
        if !self.recognizer.is_available() {
            let notices = &self.content.i18n.t(self.language).notices;
            return vec![ChatUpdate::Notice {
                notice: Notice::error(&notices.voice_not_supported, Some(&notices.type_instead)),
            }];
        }

        self.state.listening = true;
        analytics::track(AnalyticsEvent::VoiceInputUsed, self.language);

        let request = RecognitionRequest::single_shot(self.language);
        let recognizer = Arc::clone(&self.recognizer);
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = match recognizer.recognize(&request).await {
                Ok(content) => ChatEvent::Transcript { content },
                Err(e) => ChatEvent::RecognitionError { message: e.to_string() },
            };
            let _ = events.send(result);
            let _ = events.send(ChatEvent::RecognitionEnd);
        });

        vec![self.state_update()]
    }

    fn set_language(&mut self, language: Language) -> Vec<ChatUpdate> {
        if language == self.language {
            return Vec::new();
        }
        self.language = language;
        analytics::track(AnalyticsEvent::LanguageSwitched, language);
        self.follow_up.clear();
        vec![ChatUpdate::Suggestions { items: self.quick_replies() }]
    }
}

/// Resolves once the controller has moved past `utterance`.
async fn superseded(mut current: watch::Receiver<u64>, utterance: u64) {
    loop {
        if *current.borrow_and_update() != utterance {
            return;
        }
        if current.changed().await.is_err() {
            return;
        }
    }
}
