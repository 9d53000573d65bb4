use serde::{ Deserialize, Serialize };
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::SystemTime;
use log::info;
use thiserror::Error;

use crate::models::language::{ Language, Localized };

const BUILTIN_INTENTS: &str = include_str!("../../json/intents.json");
pub const FALLBACK_INTENT_ID: &str = "fallback";

#[derive(Debug, Error)]
pub enum IntentError {
    #[error("Intent file IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Intent JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Intent '{id}' ({language}) has no example phrases")]
    EmptyExamples {
        language: Language,
        id: String,
    },
    #[error("Intent id '{id}' is declared more than once for language '{language}'")]
    DuplicateId {
        language: Language,
        id: String,
    },
    #[error("Fallback intent for language '{language}' must have id '{expected}', found '{found}'")]
    BadFallback {
        language: Language,
        expected: &'static str,
        found: String,
    },
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Intent {
    pub id: String,
    pub name: String,
    pub examples: Vec<String>,
    pub response: String,
    #[serde(default)]
    pub follow_up: Vec<String>,
}

impl Intent {
    pub fn is_fallback(&self) -> bool {
        self.id == FALLBACK_INTENT_ID
    }
}

/// Ordered intents of one language. Declaration order is the match priority.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct IntentSet {
    pub intents: Vec<Intent>,
    pub fallback: Intent,
}

#[derive(Deserialize, Debug, Clone)]
pub struct IntentTable {
    #[serde(flatten)]
    sets: Localized<IntentSet>,
    #[serde(skip)]
    pub last_loaded: Option<SystemTime>,
}

impl IntentTable {
    pub fn for_language(&self, language: Language) -> &IntentSet {
        self.sets.get(language)
    }

    fn validate(&self) -> Result<(), IntentError> {
        for language in Language::ALL {
            let set = self.for_language(language);
            let mut seen = HashSet::new();
            for intent in &set.intents {
                if intent.examples.is_empty() {
                    return Err(IntentError::EmptyExamples {
                        language,
                        id: intent.id.clone(),
                    });
                }
                if !seen.insert(intent.id.as_str()) || intent.is_fallback() {
                    return Err(IntentError::DuplicateId {
                        language,
                        id: intent.id.clone(),
                    });
                }
            }
            if !set.fallback.is_fallback() {
                return Err(IntentError::BadFallback {
                    language,
                    expected: FALLBACK_INTENT_ID,
                    found: set.fallback.id.clone(),
                });
            }
        }
        Ok(())
    }
}

pub fn load_intents_from_str(json: &str) -> Result<Arc<IntentTable>, IntentError> {
    let mut table: IntentTable = serde_json::from_str(json)?;
    table.validate()?;
    table.last_loaded = Some(SystemTime::now());
    Ok(Arc::new(table))
}

/// The table compiled into the binary.
pub fn builtin_intents() -> Result<Arc<IntentTable>, IntentError> {
    load_intents_from_str(BUILTIN_INTENTS)
}

pub fn load_intents<P: AsRef<Path>>(path: P) -> Result<Arc<IntentTable>, IntentError> {
    let file_content = fs::read_to_string(&path)?;
    let table = load_intents_from_str(&file_content)?;
    info!("Loaded intent table from {}", path.as_ref().display());
    Ok(table)
}

pub fn reload_intents_if_changed<P: AsRef<Path>>(
    path: P,
    current: &Arc<IntentTable>
) -> Result<Option<Arc<IntentTable>>, IntentError> {
    let metadata = fs::metadata(&path)?;

    if let Ok(modified) = metadata.modified() {
        match current.last_loaded {
            Some(last_loaded) if modified <= last_loaded => {}
            Some(_) => {
                info!("Intent file changed, reloading...");
                return load_intents(path).map(Some);
            }
            None => {
                info!("No last_loaded timestamp, reloading intents...");
                return load_intents(path).map(Some);
            }
        }
    }
    Ok(None)
}
