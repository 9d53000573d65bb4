use serde::Deserialize;
use std::collections::BTreeMap;

use crate::models::language::{ Language, Localized };
use super::ContentError;

const BUILTIN_I18N: &str = include_str!("../../json/i18n.json");

#[derive(Deserialize, Debug, Clone)]
pub struct CommonText {
    pub home: String,
    pub register: String,
    pub schemes: String,
    pub language: String,
    pub search: String,
    pub apply: String,
    pub back: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RegistrationText {
    pub title: String,
    pub subtitle: String,
    pub personal_info: String,
    pub name: String,
    pub name_placeholder: String,
    pub mobile: String,
    pub mobile_placeholder: String,
    pub email: String,
    pub email_placeholder: String,
    pub aadhar: String,
    pub aadhar_placeholder: String,
    pub address: String,
    pub address_placeholder: String,
    pub state: String,
    pub state_placeholder: String,
    pub district: String,
    pub district_placeholder: String,
    pub income: String,
    pub income_placeholder: String,
    pub category: String,
    pub category_placeholder: String,
    /// Social category labels keyed by option value (`general`, `obc`, ...).
    pub categories: BTreeMap<String, String>,
    /// Income range labels keyed by option value (`below-2lakh`, ...).
    pub income_ranges: BTreeMap<String, String>,
    pub voice_help: String,
    pub continue_to_schemes: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Step {
    pub title: String,
    pub description: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct HomepageText {
    pub portal_name: String,
    pub welcome: String,
    pub subtitle: String,
    pub search_placeholder: String,
    pub find_schemes: String,
    /// Category titles keyed by catalog category id.
    pub categories: BTreeMap<String, String>,
    pub how_it_works: String,
    pub steps: Vec<Step>,
    pub eligibility_label: String,
    pub benefits_label: String,
    pub no_results: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ChatbotText {
    pub name: String,
    pub greeting: String,
    pub help_text: String,
    pub voice_button: String,
    pub type_message: String,
    pub voice_badge: String,
    pub thinking: String,
    pub examples: Vec<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AccessibilityText {
    pub listening: String,
    pub speaking: String,
    pub voice_on: String,
    pub voice_off: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ValidationText {
    pub required: String,
    pub invalid_email: String,
    pub invalid_mobile: String,
    pub invalid_aadhar: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct NoticeText {
    pub voice_input_failed: String,
    pub try_again: String,
    pub voice_not_supported: String,
    pub type_instead: String,
    pub registered: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct DetailText {
    pub benefit: String,
    pub beneficiaries: String,
    pub coverage: String,
    pub launch_date: String,
    pub last_date: String,
    pub objectives: String,
    pub eligibility_criteria: String,
    pub who_can_apply: String,
    pub eligible_categories: String,
    pub age_limit: String,
    pub income_limit: String,
    pub required_documents: String,
    pub how_to_apply: String,
    pub apply_online: String,
    pub offline: String,
    pub key_features: String,
    pub benefits: String,
    pub help_support: String,
    pub helpline: String,
    pub official_website: String,
    pub faqs: String,
}

/// Every user-facing string of one language.
#[derive(Deserialize, Debug, Clone)]
pub struct Translations {
    pub common: CommonText,
    pub registration: RegistrationText,
    pub homepage: HomepageText,
    pub chatbot: ChatbotText,
    pub accessibility: AccessibilityText,
    pub validation: ValidationText,
    pub notices: NoticeText,
    pub detail: DetailText,
}

#[derive(Deserialize, Debug, Clone)]
pub struct I18n {
    #[serde(flatten)]
    tables: Localized<Translations>,
}

impl I18n {
    pub fn t(&self, language: Language) -> &Translations {
        self.tables.get(language)
    }
}

pub fn load_i18n_from_str(json: &str) -> Result<I18n, ContentError> {
    serde_json::from_str(json).map_err(|source| ContentError::Parse { name: "i18n", source })
}

pub fn builtin_i18n() -> Result<I18n, ContentError> {
    load_i18n_from_str(BUILTIN_I18N)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_languages_load() {
        let i18n = builtin_i18n().unwrap();
        assert_eq!(i18n.t(Language::En).chatbot.name, "Saksham");
        assert_eq!(i18n.t(Language::Hi).chatbot.name, "सक्षम");
        assert_eq!(i18n.t(Language::Hi).accessibility.listening, "सुन रहा है...");
    }

    #[test]
    fn option_labels_share_keys_across_languages() {
        let i18n = builtin_i18n().unwrap();
        let en = &i18n.t(Language::En).registration;
        let hi = &i18n.t(Language::Hi).registration;
        assert!(en.income_ranges.keys().eq(hi.income_ranges.keys()));
        assert!(en.categories.keys().eq(hi.categories.keys()));
        assert_eq!(
            i18n.t(Language::En).homepage.categories.len(),
            i18n.t(Language::Hi).homepage.categories.len()
        );
    }

    #[test]
    fn malformed_table_is_a_parse_error() {
        match load_i18n_from_str("{\"en\": {}}") {
            Err(ContentError::Parse { name, .. }) => assert_eq!(name, "i18n"),
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }
}
