// Prompt template for resume-to-job-description scoring.

/// Scoring prompt template. Replace `{jd_text}` and `{resume_text}` before sending.
pub const MATCH_PROMPT_TEMPLATE: &str = r#"
You are an expert career coach and hiring analyst.

Evaluate how well the candidate matches the following job description based on:
- Required skills and technologies
- Years of experience with each skill
- Relevant job titles held
- Industry alignment
- Educational background

Return your answer strictly in the following JSON format:

{
  "match_score": float (0 to 95)
}

Only return the JSON. No explanations or commentary.

Job Description:
{jd_text}

Resume:
{resume_text}
"#;

/// Renders the scoring prompt for one resume / job description pair.
///
/// The job description is substituted first so that a literal `{resume_text}`
/// inside it is left untouched.
pub fn build_prompt(resume_text: &str, jd_text: &str) -> String {
    let (head, tail) = MATCH_PROMPT_TEMPLATE
        .split_once("{resume_text}")
        .unwrap_or((MATCH_PROMPT_TEMPLATE, ""));
    let mut prompt = head.replace("{jd_text}", jd_text);
    prompt.push_str(resume_text);
    prompt.push_str(tail);
    prompt
}
