//! Per-language stopword lists applied before embedding.
//!
//! Lists are compiled into the binary from `data/stopwords/*.txt` (one word per
//! line, `#` comments allowed) and parsed once at startup.

use std::collections::{HashMap, HashSet};

use crate::language::Language;

/// Read-only lookup. A language without a list yields the empty set.
pub trait StopwordProvider: Send + Sync {
    fn stopwords_for(&self, language: Language) -> &HashSet<String>;
}

pub struct BundledStopwords {
    lists: HashMap<Language, HashSet<String>>,
    empty: HashSet<String>,
}

impl BundledStopwords {
    /// Parses the lists for every supported language.
    pub fn load() -> Self {
        let lists = Language::ALL
            .iter()
            .map(|&language| (language, parse_list(bundled_list(language))))
            .collect();
        Self {
            lists,
            empty: HashSet::new(),
        }
    }

    /// Builds a provider from explicit lists. Languages not given have no stopwords.
    pub fn from_lists<I, W>(lists: I) -> Self
    where
        I: IntoIterator<Item = (Language, W)>,
        W: IntoIterator,
        W::Item: AsRef<str>,
    {
        let lists = lists
            .into_iter()
            .map(|(language, words)| {
                let set = words
                    .into_iter()
                    .map(|w| w.as_ref().trim().to_lowercase())
                    .filter(|w| !w.is_empty())
                    .collect();
                (language, set)
            })
            .collect();
        Self {
            lists,
            empty: HashSet::new(),
        }
    }
}

impl StopwordProvider for BundledStopwords {
    fn stopwords_for(&self, language: Language) -> &HashSet<String> {
        self.lists.get(&language).unwrap_or(&self.empty)
    }
}

fn bundled_list(language: Language) -> &'static str {
    match language {
        Language::En => include_str!("../../data/stopwords/english.txt"),
        Language::Tr => include_str!("../../data/stopwords/turkish.txt"),
        Language::De => include_str!("../../data/stopwords/german.txt"),
        Language::Fr => include_str!("../../data/stopwords/french.txt"),
        Language::Es => include_str!("../../data/stopwords/spanish.txt"),
        Language::It => include_str!("../../data/stopwords/italian.txt"),
        Language::Nl => include_str!("../../data/stopwords/dutch.txt"),
    }
}

fn parse_list(raw: &str) -> HashSet<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_lowercase)
        .collect()
}
