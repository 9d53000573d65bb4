use serde::{ Deserialize, Serialize };
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParseLanguageError {
    message: String,
}

impl fmt::Display for ParseLanguageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ParseLanguageError {}

impl FromStr for Language {
    type Err = ParseLanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Language::En),
            "hi" | "hindi" => Ok(Language::Hi),
            _ =>
                Err(ParseLanguageError {
                    message: format!("Invalid language: '{}' (expected 'en' or 'hi')", s),
                }),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Hi];

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
        }
    }

    /// BCP-47 tag handed to speech synthesis and recognition.
    pub fn speech_tag(&self) -> &'static str {
        match self {
            Language::En => "en-US",
            Language::Hi => "hi-IN",
        }
    }

    pub fn toggle(&self) -> Language {
        match self {
            Language::En => Language::Hi,
            Language::Hi => Language::En,
        }
    }

    /// Label shown on the language switch, written in the target language.
    pub fn switch_label(&self) -> &'static str {
        match self {
            Language::En => "हिंदी",
            Language::Hi => "English",
        }
    }
}

/// A value authored once per language.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Localized<T> {
    pub en: T,
    pub hi: T,
}

impl<T> Localized<T> {
    pub fn get(&self, language: Language) -> &T {
        match language {
            Language::En => &self.en,
            Language::Hi => &self.hi,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_and_names() {
        assert_eq!("en".parse::<Language>(), Ok(Language::En));
        assert_eq!("HI".parse::<Language>(), Ok(Language::Hi));
        assert_eq!(" Hindi ".parse::<Language>(), Ok(Language::Hi));
        assert!("fr".parse::<Language>().is_err());
    }

    #[test]
    fn english_is_the_default() {
        assert_eq!(Language::default(), Language::En);
    }

    #[test]
    fn speech_tags() {
        assert_eq!(Language::En.speech_tag(), "en-US");
        assert_eq!(Language::Hi.speech_tag(), "hi-IN");
    }

    #[test]
    fn toggle_flips() {
        assert_eq!(Language::En.toggle(), Language::Hi);
        assert_eq!(Language::Hi.toggle().toggle(), Language::Hi);
    }
}
