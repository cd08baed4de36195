//! Mock Content Builder — deterministic, template-based fallback for the
//! generative backend.
//!
//! Used whenever no LLM credential is configured, or a live call fails or
//! returns unparseable output. Always succeeds, never calls out. The template
//! resume is plain ASCII and opens with name + contact placeholders so it
//! passes the deterministic ATS validator.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::analysis::keywords::{score_and_gaps, MatchScoreGapReport};
use crate::analysis::AnalysisResult;

/// Contact placeholder block reused across the template resume and letter.
const PLACEHOLDER_NAME: &str = "Your Name";
const PLACEHOLDER_CONTACT: &str = "you@example.com | (555) 010-4477 | City, ST";

/// Cover letters name at most this many missing keywords.
const COVER_LETTER_KEYWORD_CAP: usize = 6;

/// Explicit role labels: "Title: Senior Engineer", "Role - Data Analyst", ...
static ROLE_LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:title|role|position)\s*[:-]\s*(.+)").unwrap());

/// Builds the full three-document bundle from the lexical estimator alone.
pub fn build_mock_analysis(resume_text: &str, job_description: &str) -> AnalysisResult {
    let report = score_and_gaps(resume_text, job_description);

    AnalysisResult {
        analysis: render_analysis_report(&report),
        rewritten_resume: render_template_resume(&report),
        cover_letter: render_cover_letter(job_description, &report),
    }
}

/// Infers a role name from the job description.
///
/// Order of preference: an explicit "title/role/position:" label, then the
/// first non-empty line under 90 characters, then a generic fallback.
pub fn infer_role_title(job_description: &str) -> String {
    if let Some(caps) = ROLE_LABEL_RE.captures(job_description) {
        let title = caps[1].lines().next().unwrap_or("").trim();
        if !title.is_empty() {
            return title.to_string();
        }
    }

    job_description
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && line.len() < 90)
        .map(str::to_string)
        .unwrap_or_else(|| "this role".to_string())
}

fn render_analysis_report(report: &MatchScoreGapReport) -> String {
    let strengths = if report.matched_keywords.is_empty() {
        "- Clear, readable experience summary".to_string()
    } else {
        format!(
            "- Your resume already reflects: {}",
            report.matched_keywords.join(", ")
        )
    };

    let missing = if report.missing_keywords.is_empty() {
        "- None detected; strong keyword coverage".to_string()
    } else {
        report
            .missing_keywords
            .iter()
            .map(|keyword| format!("- {keyword}"))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "Match Score: {score}/100\n\
         \n\
         Strengths:\n\
         {strengths}\n\
         \n\
         Weaknesses:\n\
         - Key terms from the job description are missing or buried\n\
         - Achievements are not consistently quantified\n\
         \n\
         Missing Keywords:\n\
         {missing}\n\
         \n\
         Suggestions:\n\
         - Mirror the job description's wording for skills you actually have\n\
         - Lead each bullet with a strong verb and a measurable outcome\n\
         - Keep formatting to plain text so ATS parsers read every line\n\
         \n\
         ATS Tips:\n\
         - Use conventional section headers (Summary, Skills, Experience, Education)\n\
         - Avoid tables, columns, and decorative characters\n\
         - Put your name and contact details on the first lines",
        score = report.score,
        strengths = strengths,
        missing = missing,
    )
}

fn render_template_resume(report: &MatchScoreGapReport) -> String {
    let core_skills = if report.missing_keywords.is_empty() {
        "Communication, collaboration, problem solving".to_string()
    } else {
        report.missing_keywords.join(", ")
    };

    format!(
        "{name}\n\
         {contact}\n\
         \n\
         PROFESSIONAL SUMMARY\n\
         Results-driven professional aligning proven experience with the target role.\n\
         \n\
         CORE SKILLS\n\
         {core_skills}\n\
         \n\
         EXPERIENCE\n\
         Most Recent Role, Company Name\n\
         - Delivered measurable results, e.g. improved a key metric by 30%\n\
         - Partnered across 3 teams to ship work tied to the skills above\n\
         \n\
         EDUCATION\n\
         Degree, Institution Name",
        name = PLACEHOLDER_NAME,
        contact = PLACEHOLDER_CONTACT,
        core_skills = core_skills,
    )
}

fn render_cover_letter(job_description: &str, report: &MatchScoreGapReport) -> String {
    let role = infer_role_title(job_description);
    let keyword_line = if report.missing_keywords.is_empty() {
        "the skills highlighted in your posting".to_string()
    } else {
        report
            .missing_keywords
            .iter()
            .take(COVER_LETTER_KEYWORD_CAP)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "Dear Hiring Manager,\n\
         \n\
         I am excited to apply for {role}. My background maps directly onto what \
         you are looking for, and I have been deliberately building depth in \
         {keywords}.\n\
         \n\
         In my most recent role I delivered quantified results under real \
         constraints, and I would bring the same focus to your team. I would \
         welcome the chance to discuss how my experience fits this opening.\n\
         \n\
         Sincerely,\n\
         {name}\n\
         {contact}",
        role = role,
        keywords = keyword_line,
        name = PLACEHOLDER_NAME,
        contact = PLACEHOLDER_CONTACT,
    )
}
