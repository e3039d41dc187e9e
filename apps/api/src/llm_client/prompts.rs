// Shared prompt fragments.
// Each generator keeps its own templates in generation/prompts.rs; this file holds
// the pieces more than one of them appends.

/// Appended to both cover-letter prompts.
pub const CONTACT_DETAILS_INSTRUCTION: &str = "\
    Please ensure that the applicant's name, email, and phone number appear at the end \
    of the letter. Do not include any other personal information such as address, \
    company address, birthdate, etc.";

/// System prompt template for both cover-letter generators. Replace `{language}`.
pub const COVER_LETTER_SYSTEM_TEMPLATE: &str = "Generate a professional cover letter in {language}, \
    with only the applicant's name, email, and phone number at the end.";

/// Fills every `{language}` placeholder with the display name.
pub fn with_language(template: &str, language_name: &str) -> String {
    template.replace("{language}", language_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_language_replaces_all_placeholders() {
        let out = with_language("in {language} and {language}", "French");
        assert_eq!(out, "in French and French");
    }

    #[test]
    fn test_system_template_mentions_contact_details() {
        let out = with_language(COVER_LETTER_SYSTEM_TEMPLATE, "Dutch");
        assert!(out.contains("in Dutch"));
        assert!(out.contains("phone number"));
    }
}
