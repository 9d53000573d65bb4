pub mod detail;

use serde::Deserialize;
use std::collections::HashSet;

use crate::config::ContentError;
use crate::config::i18n::I18n;
use crate::models::language::{ Language, Localized };
use crate::models::scheme::SchemeSummary;

const BUILTIN_SCHEMES: &str = include_str!("../../json/schemes.json");

/// Number of leading categories shown on the homepage before any filter is applied.
const FEATURED_CATEGORIES: usize = 4;

#[derive(Deserialize, Debug, Clone)]
struct SchemeRecord {
    id: String,
    title: Localized<String>,
    description: Localized<String>,
    eligibility: Localized<String>,
    benefits: Localized<String>,
    official_url: String,
}

impl SchemeRecord {
    fn render(&self, category: &str, language: Language) -> SchemeSummary {
        SchemeSummary {
            id: self.id.clone(),
            title: self.title.get(language).clone(),
            description: self.description.get(language).clone(),
            eligibility: self.eligibility.get(language).clone(),
            benefits: self.benefits.get(language).clone(),
            official_url: self.official_url.clone(),
            category: category.to_string(),
        }
    }

    fn matches(&self, needle: &str, language: Language) -> bool {
        self.title.get(language).to_lowercase().contains(needle) ||
            self.description.get(language).to_lowercase().contains(needle)
    }
}

#[derive(Deserialize, Debug, Clone)]
struct Category {
    id: String,
    schemes: Vec<SchemeRecord>,
}

/// The browsable scheme list, grouped by category in display order.
#[derive(Deserialize, Debug, Clone)]
pub struct SchemeCatalog {
    categories: Vec<Category>,
}

impl SchemeCatalog {
    pub fn builtin() -> Result<Self, ContentError> {
        Self::from_json(BUILTIN_SCHEMES)
    }

    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let catalog: SchemeCatalog = serde_json
            ::from_str(json)
            .map_err(|source| ContentError::Parse { name: "scheme catalog", source })?;

        let mut seen = HashSet::new();
        for category in &catalog.categories {
            if category.schemes.is_empty() {
                return Err(ContentError::Inconsistent {
                    name: "scheme catalog",
                    reason: format!("category '{}' has no schemes", category.id),
                });
            }
            for scheme in &category.schemes {
                if !seen.insert(scheme.id.as_str()) {
                    return Err(ContentError::Inconsistent {
                        name: "scheme catalog",
                        reason: format!("scheme '{}' is listed twice", scheme.id),
                    });
                }
            }
        }
        Ok(catalog)
    }

    pub fn category_ids(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.id.as_str())
    }

    pub fn has_category(&self, id: &str) -> bool {
        self.categories.iter().any(|c| c.id == id)
    }

    pub fn category_title<'a>(&self, i18n: &'a I18n, id: &str, language: Language) -> Option<&'a str> {
        if !self.has_category(id) {
            return None;
        }
        i18n.t(language).homepage.categories.get(id).map(String::as_str)
    }

    /// Total number of schemes across all categories.
    pub fn len(&self) -> usize {
        self.categories
            .iter()
            .map(|c| c.schemes.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn schemes_in(&self, category: &str, language: Language) -> Vec<SchemeSummary> {
        self.categories
            .iter()
            .filter(|c| c.id == category)
            .flat_map(|c| c.schemes.iter().map(move |s| s.render(&c.id, language)))
            .collect()
    }

    /// Case-insensitive substring search over localized titles and descriptions,
    /// in catalog order.
    pub fn search(&self, query: &str, language: Language) -> Vec<SchemeSummary> {
        let needle = query.to_lowercase();
        self.categories
            .iter()
            .flat_map(|c| {
                c.schemes
                    .iter()
                    .filter(|s| s.matches(&needle, language))
                    .map(move |s| s.render(&c.id, language))
            })
            .collect()
    }

    pub fn featured(&self, language: Language) -> Vec<SchemeSummary> {
        self.categories
            .iter()
            .take(FEATURED_CATEGORIES)
            .flat_map(|c| c.schemes.iter().map(move |s| s.render(&c.id, language)))
            .collect()
    }

    pub fn find(&self, id: &str, language: Language) -> Option<SchemeSummary> {
        self.categories.iter().find_map(|c| {
            c.schemes
                .iter()
                .find(|s| s.id == id)
                .map(|s| s.render(&c.id, language))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::i18n::builtin_i18n;

    fn ids(schemes: &[SchemeSummary]) -> Vec<&str> {
        schemes
            .iter()
            .map(|s| s.id.as_str())
            .collect()
    }

    #[test]
    fn categories_in_display_order() {
        let catalog = SchemeCatalog::builtin().unwrap();
        let cats: Vec<&str> = catalog.category_ids().collect();
        assert_eq!(cats, vec!["agriculture", "education", "healthcare", "housing", "employment", "women"]);
        assert_eq!(catalog.len(), 24);
    }

    #[test]
    fn schemes_in_category_are_localized() {
        let catalog = SchemeCatalog::builtin().unwrap();
        let en = catalog.schemes_in("agriculture", Language::En);
        let hi = catalog.schemes_in("agriculture", Language::Hi);
        assert_eq!(en.len(), 5);
        assert_eq!(en[0].title, "PM-KISAN Scheme");
        assert_eq!(hi[0].title, "पीएम-किसान योजना");
        assert_eq!(en[0].official_url, hi[0].official_url);
        assert!(en.iter().all(|s| s.category == "agriculture"));
        assert!(catalog.schemes_in("space", Language::En).is_empty());
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_description() {
        let catalog = SchemeCatalog::builtin().unwrap();
        assert_eq!(ids(&catalog.search("KISAN", Language::En)), vec!["pm-kisan", "kisan-credit-card"]);
        // "Rural housing scheme" only matches through the description
        assert_eq!(ids(&catalog.search("rural housing", Language::En)), vec!["pmay-gramin"]);
        assert_eq!(ids(&catalog.search("आयुष्मान", Language::Hi)), vec!["ayushman"]);
        assert!(catalog.search("zzz", Language::En).is_empty());
    }

    #[test]
    fn featured_covers_first_four_categories() {
        let catalog = SchemeCatalog::builtin().unwrap();
        let featured = catalog.featured(Language::En);
        assert_eq!(featured.len(), 5 + 5 + 4 + 3);
        assert!(featured.iter().all(|s| s.category != "employment" && s.category != "women"));
    }

    #[test]
    fn find_and_titles() {
        let catalog = SchemeCatalog::builtin().unwrap();
        let i18n = builtin_i18n().unwrap();
        let mgnrega = catalog.find("mgnrega", Language::Hi).unwrap();
        assert_eq!(mgnrega.title, "मनरेगा");
        assert_eq!(mgnrega.category, "employment");
        assert!(catalog.find("nope", Language::En).is_none());
        assert_eq!(catalog.category_title(&i18n, "women", Language::En), Some("Women & Child Welfare"));
    }

    #[test]
    fn rejects_duplicate_scheme_ids() {
        let json = r#"{"categories": [
            {"id": "a", "schemes": [{"id": "x", "title": {"en": "", "hi": ""}, "description": {"en": "", "hi": ""},
              "eligibility": {"en": "", "hi": ""}, "benefits": {"en": "", "hi": ""}, "official_url": ""}]},
            {"id": "b", "schemes": [{"id": "x", "title": {"en": "", "hi": ""}, "description": {"en": "", "hi": ""},
              "eligibility": {"en": "", "hi": ""}, "benefits": {"en": "", "hi": ""}, "official_url": ""}]}
        ]}"#;
        assert!(matches!(SchemeCatalog::from_json(json), Err(ContentError::Inconsistent { .. })));
    }
}
