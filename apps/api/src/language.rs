//! Supported output languages.
//!
//! A request carries a two-letter code; everything downstream (stopword lookup,
//! prompt text) works with the parsed `Language` so the code is validated once.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Languages the assistant can score and write in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    En,
    Tr,
    De,
    Fr,
    Es,
    It,
    Nl,
}

/// Codes in the order they are listed to clients.
pub const SUPPORTED_CODES: [&str; 7] = ["en", "tr", "de", "fr", "es", "it", "nl"];

impl Language {
    pub const ALL: [Language; 7] = [
        Language::En,
        Language::Tr,
        Language::De,
        Language::Fr,
        Language::Es,
        Language::It,
        Language::Nl,
    ];

    /// Exact, case-sensitive lookup. Callers lower-case user input first.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Language::En),
            "tr" => Some(Language::Tr),
            "de" => Some(Language::De),
            "fr" => Some(Language::Fr),
            "es" => Some(Language::Es),
            "it" => Some(Language::It),
            "nl" => Some(Language::Nl),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Tr => "tr",
            Language::De => "de",
            Language::Fr => "fr",
            Language::Es => "es",
            Language::It => "it",
            Language::Nl => "nl",
        }
    }

    /// English display name, used inside LLM prompts ("Write in German").
    pub fn name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Tr => "Turkish",
            Language::De => "German",
            Language::Fr => "French",
            Language::Es => "Spanish",
            Language::It => "Italian",
            Language::Nl => "Dutch",
        }
    }
}

/// Lookup for callers that only need a yes/no; request handlers parse instead.
#[allow(dead_code)]
pub fn is_supported(code: &str) -> bool {
    Language::from_code(code).is_some()
}

/// Human-readable list for validation messages: `['en', 'tr', ...]`.
pub fn supported_codes_display() -> String {
    let quoted: Vec<String> = SUPPORTED_CODES.iter().map(|c| format!("'{c}'")).collect();
    format!("[{}]", quoted.join(", "))
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported language '{0}'. Choose from {}.", supported_codes_display())]
pub struct UnsupportedLanguage(pub String);

impl FromStr for Language {
    type Err = UnsupportedLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::from_code(s).ok_or_else(|| UnsupportedLanguage(s.to_string()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
