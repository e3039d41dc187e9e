// All LLM prompt templates for the generators.
// Reuses cross-cutting fragments from llm_client::prompts.
// Every `{language}` placeholder takes the display name ("German"), never the code.

/// Cover letter from the job description alone.
/// Replace: {language}, {job_description}, {contact_details}
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = "You are an AI-powered career assistant. \
Create a formal, engaging, and professional cover letter tailored to the following job description. \
Use {language} for the letter. Ensure that the letter is concise, highlights key achievements \
relevant to the job, and maintains a confident and professional tone. The letter should be \
approximately 250-350 words.

Job Description:
{job_description}

{contact_details}";

/// Cover letter from the job description and the candidate's CV.
/// Replace: {language}, {job_description}, {cv_text}, {contact_details}
pub const COVER_LETTER_WITH_CV_PROMPT_TEMPLATE: &str = "You are an AI-powered career assistant. \
Create a cover letter in {language} that analyzes and reflects both the provided job description \
and the candidate's CV. Ensure that the letter is professionally structured, emphasizing the \
candidate's qualifications and experiences relevant to the job, and adheres to a confident and \
professional tone. The cover letter should be between 250-350 words.

Job Description:
{job_description}

CV Text:
{cv_text}

{contact_details}";

/// System prompt for the CV evaluation. Replace: {language}
pub const EVALUATION_SYSTEM_TEMPLATE: &str =
    "Provide a detailed professional evaluation in {language}.";

/// CV evaluation: strengths, gaps, final recommendation.
/// Replace: {language}, {job_description}, {cv_text}
pub const EVALUATION_PROMPT_TEMPLATE: &str = "As an HR manager, you are tasked with evaluating \
how well a candidate's CV matches the job description provided. Conduct a thorough analysis and \
provide feedback on:

1. Key strengths that align well with the job requirements.
2. Areas where the candidate may lack the necessary qualifications or experience.
3. A final recommendation on the candidate's suitability for the position.

Please deliver your evaluation in {language}.

Job Description:
{job_description}

CV Content:
{cv_text}";

/// System prompt for interview preparation. Replace: {language}
pub const INTERVIEW_SYSTEM_TEMPLATE: &str =
    "You are a professional AI career assistant writing in {language}.";

/// Ten likely interview questions with answers tailored to the CV.
/// Replace: {language}, {job_description}, {cv_text}
pub const INTERVIEW_PROMPT_TEMPLATE: &str = "You are an AI-based career assistant specializing in \
interview preparation. Based on the job description and the candidate's CV, generate 10 relevant \
interview questions that are likely to be asked, with well-structured sample answers tailored to \
the candidate's profile.

Job Description:
{job_description}

Candidate's CV:
{cv_text}

Please provide responses that are professional, detailed, and aligned with the job role. \
Use {language} language for all responses.";

/// Substitutes `{name}` placeholders in a single pass over `template`.
/// Inserted values are never rescanned, so user text containing `{cv_text}` or
/// `{language}` reaches the model verbatim. Unknown placeholders are left as is.
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let substitution = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value, close))
        });

        match substitution {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
