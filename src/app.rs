use log::debug;

use crate::catalog::SchemeCatalog;
use crate::config::i18n::I18n;
use crate::models::events::Notice;
use crate::models::language::Language;
use crate::models::registration::RegistrationData;
use crate::models::scheme::SchemeSummary;
use crate::registration;

/// The page currently shown. The chatbot overlays every view.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum View {
    #[default]
    Registration,
    Homepage,
    SchemeDetail {
        scheme_id: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    SubmitRegistration(RegistrationData),
    ChangeLanguage(Language),
    ToggleLanguage,
    ToggleChat,
    SelectScheme(String),
    BackToHomepage,
    Apply {
        scheme_id: String,
    },
    Search(String),
    /// `None` clears the filter.
    SelectCategory(Option<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEffect {
    Notice(Notice),
    ChatOpened,
    ChatClosed,
    LanguageChanged(Language),
}

/// Top-level session state. Owned by the dispatcher, which is its only writer.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub language: Language,
    pub view: View,
    pub registration: Option<RegistrationData>,
    pub chat_open: bool,
    pub search_query: String,
    pub selected_category: Option<String>,
}

impl AppState {
    pub fn new(language: Language) -> Self {
        Self { language, ..Self::default() }
    }

    pub fn is_registered(&self) -> bool {
        self.registration.is_some()
    }

    pub fn handle(&mut self, event: AppEvent, i18n: &I18n) -> Vec<AppEffect> {
        match event {
            AppEvent::SubmitRegistration(data) => {
                if self.is_registered() {
                    return Vec::new();
                }
                match registration::validate(&data) {
                    Ok(()) => {
                        debug!("Registration accepted, showing homepage");
                        self.registration = Some(data);
                        self.view = View::Homepage;
                        let title = &i18n.t(self.language).notices.registered;
                        vec![AppEffect::Notice(Notice::info(title, None))]
                    }
                    Err(e) => {
                        debug!("Registration rejected: {}", e);
                        vec![AppEffect::Notice(Notice::error(e.message(i18n, self.language), None))]
                    }
                }
            }
            AppEvent::ChangeLanguage(language) => self.change_language(language),
            AppEvent::ToggleLanguage => self.change_language(self.language.toggle()),
            AppEvent::ToggleChat => {
                self.chat_open = !self.chat_open;
                vec![if self.chat_open { AppEffect::ChatOpened } else { AppEffect::ChatClosed }]
            }
            AppEvent::SelectScheme(scheme_id) => {
                if self.is_registered() {
                    debug!("Showing scheme '{}'", scheme_id);
                    self.view = View::SchemeDetail { scheme_id };
                }
                Vec::new()
            }
            AppEvent::BackToHomepage => {
                if self.is_registered() {
                    self.view = View::Homepage;
                }
                Vec::new()
            }
            AppEvent::Apply { scheme_id } => {
                debug!("Apply requested for '{}'", scheme_id);
                if self.chat_open {
                    return Vec::new();
                }
                self.chat_open = true;
                vec![AppEffect::ChatOpened]
            }
            AppEvent::Search(query) => {
                self.search_query = query;
                Vec::new()
            }
            AppEvent::SelectCategory(category) => {
                self.selected_category = category;
                Vec::new()
            }
        }
    }

    fn change_language(&mut self, language: Language) -> Vec<AppEffect> {
        if language == self.language {
            return Vec::new();
        }
        self.language = language;
        vec![AppEffect::LanguageChanged(language)]
    }

    /// Search results when a query is set, else the selected category, else the
    /// featured schemes.
    pub fn displayed_schemes(&self, catalog: &SchemeCatalog) -> Vec<SchemeSummary> {
        if !self.search_query.is_empty() {
            return catalog.search(&self.search_query, self.language);
        }
        match &self.selected_category {
            Some(category) => catalog.schemes_in(category, self.language),
            None => catalog.featured(self.language),
        }
    }
}
