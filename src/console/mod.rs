pub mod commands;
pub mod render;

use log::{ debug, error, info };
use std::io::{ self, Write };
use std::sync::Arc;
use tokio::io::{ AsyncBufReadExt, BufReader };
use tokio::sync::mpsc::{ self, UnboundedReceiver };

use crate::app::{ AppEffect, AppEvent, AppState, View };
use crate::chat::ChatController;
use crate::config::Content;
use crate::models::events::{ ChatEvent, ChatUpdate, Notice, VoiceState };
use crate::models::language::Language;
use crate::registration::{ FieldError, RegistrationForm };
use commands::{ Command, Input };

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Terminal front-end. Owns the application state and the chat session and is
/// the only place either is mutated.
pub struct Console<W: Write> {
    content: Arc<Content>,
    app: AppState,
    chat: ChatController,
    form: RegistrationForm,
    voice: VoiceState,
    /// Last suggestion list shown, the targets of `/ask`.
    suggestions: Vec<String>,
    out: W,
}

impl<W: Write> Console<W> {
    pub fn new(content: Arc<Content>, app: AppState, chat: ChatController, out: W) -> Self {
        let voice = chat.state();
        Self {
            content,
            app,
            chat,
            form: RegistrationForm::new(),
            voice,
            suggestions: Vec::new(),
            out,
        }
    }

    pub fn app(&self) -> &AppState {
        &self.app
    }

    pub fn chat(&self) -> &ChatController {
        &self.chat
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    fn language(&self) -> Language {
        self.app.language
    }

    fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text)?;
        self.out.flush()
    }

    pub fn start(&mut self) -> io::Result<()> {
        let t = self.content.i18n.t(self.language());
        let banner = format!("{} - {}\n{}  (/help)", t.homepage.portal_name, t.chatbot.name, t.chatbot.help_text);
        self.say(&banner)?;
        self.show_view()
    }

    fn show_view(&mut self) -> io::Result<()> {
        let content = Arc::clone(&self.content);
        let language = self.language();
        let t = content.i18n.t(language);
        match self.app.view.clone() {
            View::Registration => {
                self.say(&render::registration_intro(t))?;
                self.prompt_field()
            }
            View::Homepage => {
                let schemes = self.app.displayed_schemes(&content.catalog);
                let page = render::homepage(
                    &content.i18n,
                    &content.catalog,
                    language,
                    &schemes,
                    self.app.selected_category.as_deref()
                );
                self.say(&page)
            }
            View::SchemeDetail { scheme_id } => {
                let scheme = content.directory.lookup(&scheme_id, language);
                self.say(&render::detail(&scheme, language, t))
            }
        }
    }

    fn prompt_field(&mut self) -> io::Result<()> {
        let content = Arc::clone(&self.content);
        let text = &content.i18n.t(self.language()).registration;
        match self.form.current_field() {
            Some(field) => {
                let prompt = render::field_prompt(field, text, field.value(self.form.data()));
                self.say(&prompt)
            }
            None => Ok(()),
        }
    }

    pub fn handle_line(&mut self, line: &str) -> io::Result<Flow> {
        match commands::parse_input(line) {
            Ok(Input::Text(text)) => {
                self.handle_text(&text)?;
                Ok(Flow::Continue)
            }
            Ok(Input::Command(command)) => self.handle_command(command),
            Err(e) => {
                self.say(&format!("! {}", e))?;
                Ok(Flow::Continue)
            }
        }
    }

    fn handle_text(&mut self, text: &str) -> io::Result<()> {
        if self.app.chat_open {
            self.chat.handle(ChatEvent::Input { content: text.to_string() });
            let updates = self.chat.handle(ChatEvent::Chat {
                content: text.to_string(),
                is_voice: false,
            });
            return self.show_updates(updates);
        }
        match self.app.view {
            View::Registration => self.answer_field(text),
            View::Homepage => {
                self.dispatch(AppEvent::Search(text.to_string()))?;
                self.show_view()
            }
            View::SchemeDetail { .. } => {
                let t = self.content.i18n.t(self.language());
                let hint = format!("/back {}  /apply {}  /chat", t.common.back, t.common.apply);
                self.say(&hint)
            }
        }
    }

    fn answer_field(&mut self, input: &str) -> io::Result<()> {
        let content = Arc::clone(&self.content);
        let text = &content.i18n.t(self.language()).registration;
        match self.form.answer(input, text) {
            Ok(Some(_)) => self.prompt_field(),
            Ok(None) | Err(FieldError::Complete) => self.submit_registration(),
            Err(e) => {
                debug!("Rejected registration answer: {}", e);
                self.say(&format!("! {}", e))?;
                self.prompt_field()
            }
        }
    }

    fn submit_registration(&mut self) -> io::Result<()> {
        let data = self.form.data().clone();
        self.dispatch(AppEvent::SubmitRegistration(data))?;
        if self.app.is_registered() {
            return self.show_view();
        }
        self.form.rewind();
        self.prompt_field()
    }

    fn handle_command(&mut self, command: Command) -> io::Result<Flow> {
        debug!("Command: {:?}", command);
        match command {
            Command::Help => self.say(&render::help())?,
            Command::Lang(language) => {
                let event = match language {
                    Some(language) => AppEvent::ChangeLanguage(language),
                    None => AppEvent::ToggleLanguage,
                };
                self.dispatch(event)?;
            }
            Command::Chat => self.dispatch(AppEvent::ToggleChat)?,
            Command::Voice => self.chat_event(ChatEvent::ToggleVoice)?,
            Command::Stop => self.chat_event(ChatEvent::StopSpeaking)?,
            Command::Listen => {
                if !self.app.chat_open {
                    self.dispatch(AppEvent::ToggleChat)?;
                }
                self.chat_event(ChatEvent::Listen)?;
            }
            Command::Say(n) => {
                let id = self.chat
                    .conversation()
                    .bot_messages()
                    .nth(n - 1)
                    .map(|m| m.id.clone());
                match id {
                    Some(message_id) => self.chat_event(ChatEvent::Speak { message_id })?,
                    None => self.say(&format!("! No assistant message #{}", n))?,
                }
            }
            Command::Ask(n) => {
                let Some(content) = self.suggestions.get(n - 1).cloned() else {
                    self.say(&format!("! No suggestion #{}", n))?;
                    return Ok(Flow::Continue);
                };
                if !self.app.chat_open {
                    self.dispatch(AppEvent::ToggleChat)?;
                }
                self.chat_event(ChatEvent::Chat { content, is_voice: false })?;
            }
            Command::Schemes => {
                self.dispatch(AppEvent::BackToHomepage)?;
                self.show_view()?;
            }
            Command::Category(id) => {
                if !self.content.catalog.has_category(&id) {
                    let known: Vec<&str> = self.content.catalog.category_ids().collect();
                    self.say(&format!("! Unknown category '{}' ({})", id, known.join(", ")))?;
                    return Ok(Flow::Continue);
                }
                self.dispatch(AppEvent::Search(String::new()))?;
                self.dispatch(AppEvent::SelectCategory(Some(id)))?;
                self.dispatch(AppEvent::BackToHomepage)?;
                self.show_view()?;
            }
            Command::All => {
                self.dispatch(AppEvent::Search(String::new()))?;
                self.dispatch(AppEvent::SelectCategory(None))?;
                self.dispatch(AppEvent::BackToHomepage)?;
                self.show_view()?;
            }
            Command::Search(query) => {
                self.dispatch(AppEvent::Search(query))?;
                self.dispatch(AppEvent::BackToHomepage)?;
                self.show_view()?;
            }
            Command::Scheme(id) => {
                self.dispatch(AppEvent::SelectScheme(id))?;
                self.show_view()?;
            }
            Command::Back => {
                self.dispatch(AppEvent::BackToHomepage)?;
                self.show_view()?;
            }
            Command::Apply(id) => {
                let scheme_id = match (id, &self.app.view) {
                    (Some(id), _) => id,
                    (None, View::SchemeDetail { scheme_id }) => scheme_id.clone(),
                    (None, _) => String::new(),
                };
                self.dispatch(AppEvent::Apply { scheme_id })?;
            }
            Command::Profile => {
                let content = Arc::clone(&self.content);
                let text = &content.i18n.t(self.language()).registration;
                let shown = match &self.app.registration {
                    Some(data) => render::profile(data, text),
                    None => render::profile(self.form.data(), text),
                };
                self.say(&shown)?;
            }
            Command::Quit => {
                return Ok(Flow::Quit);
            }
        }
        Ok(Flow::Continue)
    }

    fn dispatch(&mut self, event: AppEvent) -> io::Result<()> {
        let content = Arc::clone(&self.content);
        let effects = self.app.handle(event, &content.i18n);
        for effect in effects {
            match effect {
                AppEffect::Notice(notice) => self.show_notice(&notice)?,
                AppEffect::ChatOpened => self.chat_event(ChatEvent::Open)?,
                AppEffect::ChatClosed => self.chat_event(ChatEvent::Close)?,
                AppEffect::LanguageChanged(language) => {
                    info!("Language switched to {}", language);
                    self.chat_event(ChatEvent::SetLanguage { language })?;
                    self.show_view()?;
                }
            }
        }
        Ok(())
    }

    fn chat_event(&mut self, event: ChatEvent) -> io::Result<()> {
        let updates = self.chat.handle(event);
        self.show_updates(updates)
    }

    /// Handles an event the chat controller queued for itself.
    pub fn handle_chat_event(&mut self, event: ChatEvent) -> io::Result<()> {
        self.chat_event(event)
    }

    fn show_notice(&mut self, notice: &Notice) -> io::Result<()> {
        self.say(&render::notice(notice))
    }

    fn show_updates(&mut self, updates: Vec<ChatUpdate>) -> io::Result<()> {
        let content = Arc::clone(&self.content);
        let t = content.i18n.t(self.chat.language());
        for update in updates {
            match update {
                ChatUpdate::Processing => self.say(&render::thinking(t))?,
                ChatUpdate::Message { message } => self.say(&render::message(&message, t))?,
                ChatUpdate::Suggestions { items } => {
                    if let Some(line) = render::suggestions(&items) {
                        self.say(&line)?;
                    }
                    self.suggestions = items;
                }
                ChatUpdate::Notice { notice } => self.show_notice(&notice)?,
                ChatUpdate::State { state } => {
                    let previous = std::mem::replace(&mut self.voice, state);
                    if let Some(line) = render::voice_state(previous, state, t) {
                        self.say(&line)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Runs until `/quit` or end of input. Lines from stdin and the chat
    /// controller's own events are handled one at a time, in arrival order.
    pub async fn run(mut self, mut events: UnboundedReceiver<ChatEvent>) -> io::Result<()> {
        let (line_tx, mut lines) = mpsc::unbounded_channel::<String>();
        tokio::spawn(async move {
            let mut reader = BufReader::new(tokio::io::stdin()).lines();
            loop {
                match reader.next_line().await {
                    Ok(Some(line)) => {
                        if line_tx.send(line).is_err() {
                            break;
                        }
                    }
                    Ok(None) => break,
                    Err(e) => {
                        error!("Failed to read from stdin: {}", e);
                        break;
                    }
                }
            }
        });

        self.start()?;
        loop {
            tokio::select! {
                line = lines.recv() => {
                    match line {
                        Some(line) => {
                            if self.handle_line(&line)? == Flow::Quit {
                                break;
                            }
                        }
                        None => {
                            debug!("Input closed");
                            break;
                        }
                    }
                }
                Some(event) = events.recv() => self.handle_chat_event(event)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::Saksham;
    use crate::chat::ChatSettings;
    use crate::speech::NoSpeech;
    use std::time::Duration;

    fn console(language: Language) -> (Console<Vec<u8>>, UnboundedReceiver<ChatEvent>) {
        let content = Content::builtin().unwrap();
        let settings = ChatSettings {
            response_delay: Duration::ZERO,
            voice_enabled: false,
            ..ChatSettings::default()
        };
        let (chat, rx) = ChatController::new(
            Saksham::builtin().unwrap(),
            Arc::clone(&content),
            Arc::new(NoSpeech),
            Arc::new(NoSpeech),
            settings,
            language
        );
        (Console::new(content, AppState::new(language), chat, Vec::new()), rx)
    }

    fn printed(console: &Console<Vec<u8>>) -> String {
        String::from_utf8_lossy(console.output()).into_owned()
    }

    fn register(console: &mut Console<Vec<u8>>) {
        for answer in ["Asha", "9876543210", "", "123412341234", "Village Road", "", "", "", ""] {
            assert_eq!(console.handle_line(answer).unwrap(), Flow::Continue);
        }
    }

    #[tokio::test]
    async fn registration_walkthrough_reaches_homepage() {
        let (mut console, _rx) = console(Language::En);
        console.start().unwrap();
        assert!(printed(&console).contains("Full Name * (Enter your full name)"));

        register(&mut console);
        assert_eq!(console.app().view, View::Homepage);
        let out = printed(&console);
        assert!(out.contains("* Registration complete"));
        assert!(out.contains("Welcome to Government Schemes Portal"));
    }

    #[tokio::test]
    async fn answers_are_stored_as_typed() {
        let (mut console, _rx) = console(Language::En);
        // ten characters including the trailing space
        for answer in [" Asha", "987654321 ", "", "123412341234", "Village Road", "", "", "", ""] {
            console.handle_line(answer).unwrap();
        }
        assert!(console.app().is_registered());
        let data = console.app().registration.as_ref().unwrap();
        assert_eq!(data.name, " Asha");
        assert_eq!(data.mobile, "987654321 ");
    }

    #[tokio::test]
    async fn ask_sends_a_suggestion() {
        let (mut console, mut rx) = console(Language::En);
        console.handle_line("/ask 1").unwrap();
        assert!(printed(&console).contains("! No suggestion #1"));

        console.handle_line("/chat").unwrap();
        assert!(printed(&console).contains("3. What documents do I need?"));
        console.handle_line("/ask 3").unwrap();
        let user = &console.chat().conversation().messages()[1];
        assert_eq!(user.content, "What documents do I need?");

        let event = rx.recv().await.unwrap();
        console.handle_chat_event(event).unwrap();
        let bot = console.chat().conversation().messages().last().unwrap();
        assert!(bot.content.starts_with("Document requirements vary"));
    }

    #[tokio::test]
    async fn invalid_registration_starts_over() {
        let (mut console, _rx) = console(Language::En);
        for answer in ["Asha", "12345", "", "123412341234", "Village Road", "", "", "", ""] {
            console.handle_line(answer).unwrap();
        }
        assert_eq!(console.app().view, View::Registration);
        assert!(printed(&console).contains("! Please enter a valid 10-digit mobile number"));

        // earlier answers are kept, only the mobile number is retyped
        for answer in ["", "9876543210", "", "", "", "", "", "", ""] {
            console.handle_line(answer).unwrap();
        }
        assert!(console.app().is_registered());
        assert_eq!(console.app().registration.as_ref().unwrap().name, "Asha");
    }

    #[tokio::test]
    async fn text_goes_to_chat_when_open() {
        let (mut console, mut rx) = console(Language::En);
        register(&mut console);
        console.handle_line("/chat").unwrap();
        assert!(console.chat().is_open());

        console.handle_line("what documents do I need").unwrap();
        let event = rx.recv().await.unwrap();
        assert!(matches!(event, ChatEvent::ReplyDue { .. }));
        console.handle_chat_event(event).unwrap();
        assert_eq!(console.chat().conversation().len(), 3);
        assert!(printed(&console).contains("Saksham is typing..."));
    }

    #[tokio::test]
    async fn homepage_text_searches_catalog() {
        let (mut console, _rx) = console(Language::En);
        register(&mut console);
        console.handle_line("mudra").unwrap();
        assert_eq!(console.app().search_query, "mudra");
        assert!(printed(&console).contains("[mudra-yojana]"));

        console.handle_line("/category women").unwrap();
        assert_eq!(console.app().search_query, "");
        assert_eq!(console.app().selected_category.as_deref(), Some("women"));
        console.handle_line("/category space").unwrap();
        assert!(printed(&console).contains("! Unknown category 'space'"));
    }

    #[tokio::test]
    async fn scheme_detail_and_apply() {
        let (mut console, _rx) = console(Language::En);
        register(&mut console);
        console.handle_line("/scheme pm-kisan").unwrap();
        assert_eq!(console.app().view, View::SchemeDetail { scheme_id: "pm-kisan".into() });
        assert!(printed(&console).contains("== PM-KISAN Scheme =="));

        console.handle_line("/apply").unwrap();
        assert!(console.app().chat_open);
        assert!(console.chat().is_open());
        assert_eq!(console.chat().conversation().len(), 1);
    }

    #[tokio::test]
    async fn language_switch_reaches_chat() {
        let (mut console, _rx) = console(Language::En);
        console.handle_line("/lang hi").unwrap();
        assert_eq!(console.app().language, Language::Hi);
        assert_eq!(console.chat().language(), Language::Hi);
        assert!(printed(&console).contains("पूरा नाम"));
    }

    #[tokio::test]
    async fn listen_without_recognizer_and_unknown_command() {
        let (mut console, _rx) = console(Language::En);
        console.handle_line("/listen").unwrap();
        assert!(printed(&console).contains("! Voice not supported - Please type your message"));

        console.handle_line("/shcemes").unwrap();
        assert!(printed(&console).contains("did you mean '/schemes'?"));
        assert_eq!(console.handle_line("/quit").unwrap(), Flow::Quit);
    }
}
