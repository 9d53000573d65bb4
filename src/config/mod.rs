pub mod i18n;
pub mod intents;

use std::sync::Arc;
use log::debug;
use thiserror::Error;

use crate::catalog::SchemeCatalog;
use crate::catalog::detail::SchemeDirectory;
use i18n::I18n;
use intents::IntentError;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Embedded {name} table is malformed: {source}")]
    Parse {
        name: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("Embedded {name} table is inconsistent: {reason}")]
    Inconsistent {
        name: &'static str,
        reason: String,
    },
    #[error(transparent)]
    Intents(#[from] IntentError),
}

/// Static content shared by every component for the lifetime of the process.
#[derive(Debug)]
pub struct Content {
    pub i18n: I18n,
    pub catalog: SchemeCatalog,
    pub directory: SchemeDirectory,
}

impl Content {
    pub fn builtin() -> Result<Arc<Self>, ContentError> {
        let i18n = i18n::builtin_i18n()?;
        let catalog = SchemeCatalog::builtin()?;
        let directory = SchemeDirectory::builtin()?;
        Self::new(i18n, catalog, directory).map(Arc::new)
    }

    pub fn new(
        i18n: I18n,
        catalog: SchemeCatalog,
        directory: SchemeDirectory
    ) -> Result<Self, ContentError> {
        for language in crate::models::language::Language::ALL {
            let titles = &i18n.t(language).homepage.categories;
            for id in catalog.category_ids() {
                if !titles.contains_key(id) {
                    return Err(ContentError::Inconsistent {
                        name: "i18n",
                        reason: format!("no {} title for category '{}'", language, id),
                    });
                }
            }
        }
        debug!(
            "Content loaded: {} categories, {} schemes, {} detailed records",
            catalog.category_ids().count(),
            catalog.len(),
            directory.len()
        );
        Ok(Self { i18n, catalog, directory })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_content_is_consistent() {
        let content = Content::builtin().unwrap();
        assert_eq!(content.catalog.category_ids().count(), 6);
        assert!(content.directory.len() >= 3);
    }
}
