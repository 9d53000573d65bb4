use serde::{ Deserialize, Serialize };
use super::language::Language;

/// One catalog card, rendered in a single language.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeSummary {
    pub id: String,
    pub title: String,
    pub description: String,
    pub eligibility: String,
    pub benefits: String,
    pub official_url: String,
    pub category: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemeStatus {
    Active,
    Upcoming,
    Closed,
}

impl SchemeStatus {
    pub fn label(&self, language: Language) -> &'static str {
        match (language, self) {
            (Language::En, SchemeStatus::Active) => "Active",
            (Language::En, SchemeStatus::Upcoming) => "Upcoming",
            (Language::En, SchemeStatus::Closed) => "Closed",
            (Language::Hi, SchemeStatus::Active) => "सक्रिय",
            (Language::Hi, SchemeStatus::Upcoming) => "आगामी",
            (Language::Hi, SchemeStatus::Closed) => "बंद",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eligibility {
    pub criteria: Vec<String>,
    #[serde(default)]
    pub age_limit: Option<String>,
    #[serde(default)]
    pub income_limit: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationProcess {
    pub steps: Vec<String>,
    #[serde(default)]
    pub online_url: Option<String>,
    #[serde(default)]
    pub offline_process: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeDetail {
    pub id: String,
    pub title: String,
    pub description: String,
    pub ministry: String,
    pub category: String,
    pub status: SchemeStatus,
    pub launch_date: String,
    #[serde(default)]
    pub last_date: Option<String>,
    pub benefit_amount: String,
    #[serde(default)]
    pub total_beneficiaries: Option<String>,
    pub coverage: String,
    pub objectives: Vec<String>,
    pub eligibility: Eligibility,
    pub benefits: Vec<String>,
    pub documents: Vec<String>,
    pub application_process: ApplicationProcess,
    pub key_features: Vec<String>,
    pub faqs: Vec<Faq>,
    pub helpline: String,
    pub official_website: String,
}
