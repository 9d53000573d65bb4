use serde::Deserialize;
use std::collections::HashMap;

use crate::config::ContentError;
use crate::models::language::{ Language, Localized };
use crate::models::scheme::SchemeDetail;

const BUILTIN_DETAILS: &str = include_str!("../../json/scheme_details.json");

#[derive(Deserialize)]
struct DetailTable {
    schemes: Vec<Localized<SchemeDetail>>,
    generic: Localized<SchemeDetail>,
}

/// Expanded scheme records keyed by scheme id.
#[derive(Debug, Clone)]
pub struct SchemeDirectory {
    records: HashMap<String, Localized<SchemeDetail>>,
    generic: Localized<SchemeDetail>,
}

impl SchemeDirectory {
    pub fn builtin() -> Result<Self, ContentError> {
        Self::from_json(BUILTIN_DETAILS)
    }

    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let table: DetailTable = serde_json
            ::from_str(json)
            .map_err(|source| ContentError::Parse { name: "scheme detail", source })?;

        let mut records = HashMap::with_capacity(table.schemes.len());
        for record in table.schemes {
            if record.en.id != record.hi.id {
                return Err(ContentError::Inconsistent {
                    name: "scheme detail",
                    reason: format!("record ids differ: '{}' vs '{}'", record.en.id, record.hi.id),
                });
            }
            let id = record.en.id.clone();
            if records.insert(id.clone(), record).is_some() {
                return Err(ContentError::Inconsistent {
                    name: "scheme detail",
                    reason: format!("scheme '{}' is described twice", id),
                });
            }
        }
        Ok(Self { records, generic: table.generic })
    }

    /// Never fails: unknown ids get the generic record carrying the requested id.
    pub fn lookup(&self, id: &str, language: Language) -> SchemeDetail {
        match self.records.get(id) {
            Some(record) => record.get(language).clone(),
            None => {
                let mut detail = self.generic.get(language).clone();
                detail.id = id.to_string();
                detail
            }
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::scheme::SchemeStatus;

    #[test]
    fn known_scheme_in_both_languages() {
        let dir = SchemeDirectory::builtin().unwrap();
        let en = dir.lookup("pm-kisan", Language::En);
        assert_eq!(en.title, "PM-KISAN Scheme");
        assert_eq!(en.status, SchemeStatus::Active);
        assert_eq!(en.helpline, "155261 / 1800-115-526");
        assert_eq!(en.eligibility.categories, vec!["General", "OBC", "SC", "ST"]);

        let hi = dir.lookup("pm-kisan", Language::Hi);
        assert_eq!(hi.title, "पीएम-किसान योजना");
        assert_eq!(hi.official_website, en.official_website);
    }

    #[test]
    fn unknown_id_gets_generic_record() {
        let dir = SchemeDirectory::builtin().unwrap();
        let detail = dir.lookup("nonexistent-id", Language::En);
        assert_eq!(detail.id, "nonexistent-id");
        assert_eq!(detail.title, "Government Scheme");
        assert_eq!(detail.ministry, "Government of India");
        assert_eq!(detail.launch_date, "2024");
        assert_eq!(detail.benefit_amount, "Varies");
        assert_eq!(detail.helpline, "1800-XXX-XXXX");
        assert_eq!(detail.application_process.online_url.as_deref(), Some("https://www.myscheme.gov.in/"));
        assert_eq!(detail.documents, vec!["Aadhar Card", "Income Certificate"]);
        assert_eq!(detail.faqs.len(), 1);

        let hi = dir.lookup("nonexistent-id", Language::Hi);
        assert_eq!(hi.id, "nonexistent-id");
        assert_eq!(hi.title, "सरकारी योजना");
    }

    #[test]
    fn lookup_is_idempotent() {
        let dir = SchemeDirectory::builtin().unwrap();
        assert_eq!(dir.lookup("ayushman", Language::Hi), dir.lookup("ayushman", Language::Hi));
        assert_eq!(dir.lookup("xyz", Language::En), dir.lookup("xyz", Language::En));
    }

    #[test]
    fn every_detailed_record_has_matching_ids() {
        let dir = SchemeDirectory::builtin().unwrap();
        for id in ["pm-kisan", "ayushman", "crop-insurance", "mission-indradhanush"] {
            assert!(dir.contains(id), "{} missing", id);
            assert_eq!(dir.lookup(id, Language::En).id, id);
        }
    }
}
