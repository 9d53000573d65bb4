use crate::analytics::{ self, AnalyticsEvent };
use crate::config::intents::{ self, Intent, IntentError, IntentTable };
use crate::models::language::Language;

use log::{ debug, info };
use serde::Serialize;
use std::path::{ Path, PathBuf };
use std::sync::Arc;

/// What the assistant says back for one user turn.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub intent_id: String,
    pub text: String,
    pub follow_up: Vec<String>,
}

/// Rule-based assistant: resolves free text to a canned intent by substring
/// containment against the intent table of the active language.
#[derive(Clone, Debug)]
pub struct Saksham {
    intents: Arc<IntentTable>,
    intents_path: Option<PathBuf>,
}

impl Saksham {
    pub fn new(intents: Arc<IntentTable>) -> Self {
        Self { intents, intents_path: None }
    }

    pub fn builtin() -> Result<Self, IntentError> {
        Ok(Self::new(intents::builtin_intents()?))
    }

    /// Uses the table at `path` instead of the built-in one and watches it for changes.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, IntentError> {
        let table = intents::load_intents(&path)?;
        Ok(Self {
            intents: table,
            intents_path: Some(path.as_ref().to_path_buf()),
        })
    }

    pub fn intents(&self) -> &IntentTable {
        &self.intents
    }

    /// First intent, in declaration order, having an example that contains the
    /// lowercased input or is contained in it. Falls back to the language's
    /// fallback intent. Blank input never matches.
    pub fn find_best_match(&self, input: &str, language: Language) -> &Intent {
        let set = self.intents.for_language(language);
        let normalized = input.to_lowercase();
        if normalized.trim().is_empty() {
            return &set.fallback;
        }

        set.intents
            .iter()
            .find(|intent| {
                intent.examples.iter().any(|example| {
                    let example = example.to_lowercase();
                    normalized.contains(&example) || example.contains(&normalized)
                })
            })
            .unwrap_or(&set.fallback)
    }

    pub fn respond(&self, input: &str, language: Language) -> Reply {
        let intent = self.find_best_match(input, language);
        debug!("Matched intent '{}' ({})", intent.id, language);

        if let Some(event) = AnalyticsEvent::for_intent(&intent.id) {
            analytics::track(event, language);
        }

        Reply {
            intent_id: intent.id.clone(),
            text: intent.response.clone(),
            follow_up: intent.follow_up.clone(),
        }
    }

    /// Re-reads the override file when its modification time moved past the last
    /// load. Returns whether the table was replaced.
    pub fn reload_intents_if_changed(&mut self) -> Result<bool, IntentError> {
        let Some(path) = &self.intents_path else {
            return Ok(false);
        };
        match intents::reload_intents_if_changed(path, &self.intents)? {
            Some(table) => {
                self.intents = table;
                info!("Intent table successfully reloaded");
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
