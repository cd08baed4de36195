// All LLM prompt constants for the analysis pipeline.

/// System prompt for the generation call — enforces JSON-only output.
pub const ANALYSIS_SYSTEM: &str =
    "You are an expert career coach and ATS resume writer. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Generation prompt template.
/// Replace `{resume_text}`, `{job_description}`, `{plain_text_requirement}`
/// before sending.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Compare the resume below to the job description and produce three documents.

Return a JSON object with EXACTLY these keys (no extra fields):
{
  "analysis": "match analysis with a line 'Match Score: NN/100', then Strengths, Weaknesses, Missing Keywords, Suggestions, and ATS Tips sections",
  "rewrittenResume": "the full resume rewritten to be ATS-optimized for this job",
  "coverLetter": "a tailored one-page cover letter for this job"
}

FORMATTING RULES for rewrittenResume:
1. Plain ASCII text only: no decorative characters, emoji, tables, or columns
2. Conventional section headers: Summary, Skills, Experience, Education
3. Use "-" as the only bullet marker
4. Keep every fact from the original resume truthful; never invent employers or dates
{plain_text_requirement}

RESUME:
{resume_text}

JOB DESCRIPTION:
{job_description}"#;

/// Extra requirement appended on retries, after a validation failure.
pub const PLAIN_TEXT_REQUIREMENT: &str = "5. The FIRST lines of rewrittenResume MUST be the candidate's name followed by \
contact details (email address and phone number) on their own lines";

/// System prompt for the validation call — enforces JSON-only output.
pub const VALIDATION_SYSTEM: &str =
    "You are a strict ATS compliance reviewer. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Validation prompt template.
/// Replace `{rewritten_resume}`, `{job_description}`, `{baseline_score}`
/// before sending.
pub const VALIDATION_PROMPT_TEMPLATE: &str = r#"Review the rewritten resume below for ATS readiness against the job description.

Check, in order:
(a) the resume is plain ASCII text with no decorative characters
(b) the resume opens with the candidate's name and contact details
(c) section headers are conventional (Summary, Skills, Experience, Education)
(d) achievements are measurable (numbers, percentages, timeframes)
(e) compute a fresh 0-100 match score against the job description; the
    previous score was {baseline_score}, so justify any large movement

Return a JSON object with EXACTLY these keys:
{
  "validationSummary": "short human-readable summary of what passed and what failed",
  "improvedMatchScore": 0,
  "passesValidation": false
}

"improvedMatchScore" must be an integer 0-100 (or null if you cannot score).
"passesValidation" must be true ONLY if checks (a) through (d) all pass.

REWRITTEN RESUME:
{rewritten_resume}

JOB DESCRIPTION:
{job_description}"#;
