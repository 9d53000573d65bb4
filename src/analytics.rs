use log::info;
use std::fmt;

use crate::models::language::Language;

pub const ANALYTICS_TARGET: &str = "saksham::analytics";

/// Usage events. Only the event name and session language are recorded, never
/// message text or profile fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticsEvent {
    ChatbotOpened,
    MessageSent,
    VoiceInputUsed,
    SchemeInquiry,
    EligibilityCheck,
    DocumentHelp,
    HumanHelpRequested,
    LanguageSwitched,
}

impl AnalyticsEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalyticsEvent::ChatbotOpened => "chatbot_opened",
            AnalyticsEvent::MessageSent => "message_sent",
            AnalyticsEvent::VoiceInputUsed => "voice_input_used",
            AnalyticsEvent::SchemeInquiry => "scheme_inquiry",
            AnalyticsEvent::EligibilityCheck => "eligibility_check",
            AnalyticsEvent::DocumentHelp => "document_help",
            AnalyticsEvent::HumanHelpRequested => "human_help_requested",
            AnalyticsEvent::LanguageSwitched => "language_switched",
        }
    }

    /// Event raised when the matcher resolves to the given intent, if any.
    pub fn for_intent(intent_id: &str) -> Option<Self> {
        match intent_id {
            "schemes_search" => Some(AnalyticsEvent::SchemeInquiry),
            "eligibility_check" => Some(AnalyticsEvent::EligibilityCheck),
            "documents" => Some(AnalyticsEvent::DocumentHelp),
            "human_help" => Some(AnalyticsEvent::HumanHelpRequested),
            _ => None,
        }
    }
}

impl fmt::Display for AnalyticsEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn track(event: AnalyticsEvent, language: Language) {
    info!(target: ANALYTICS_TARGET, "event={} language={}", event, language);
}
