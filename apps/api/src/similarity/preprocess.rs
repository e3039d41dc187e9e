use std::collections::HashSet;

/// Drops every whitespace-delimited token whose lowercase form is a stopword.
///
/// Surviving tokens keep their original casing and order and are rejoined with
/// single spaces. Punctuation stays attached to its token, so `"and,"` is not
/// matched by the stopword `"and"`.
pub fn remove_stopwords(text: &str, stopwords: &HashSet<String>) -> String {
    if stopwords.is_empty() {
        return text.split_whitespace().collect::<Vec<_>>().join(" ");
    }

    text.split_whitespace()
        .filter(|token| !stopwords.contains(&token.to_lowercase()))
        .collect::<Vec<_>>()
        .join(" ")
}
