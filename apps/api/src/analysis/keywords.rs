//! Keyword/Score Estimator — deterministic lexical match scoring between a
//! resume and a job description.
//!
//! Used as the fallback scorer when no LLM backend is configured (or its
//! output cannot be parsed) and as the baseline signal for the mock report.
//! Pure functions, no failure modes: empty input yields score 0 and empty
//! keyword sets.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Alphabetic tokens of length >= 4, matched against lowercased text.
static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z]{4,}").unwrap());

/// Filler words that survive the length filter but carry no signal.
const STOPWORDS: &[&str] = &["with", "have", "this", "that", "from"];

/// Missing keywords reported to the user are capped at this many entries.
const MISSING_KEYWORD_CAP: usize = 10;

/// Lexical match score plus the keyword gap breakdown behind it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchScoreGapReport {
    /// 0–100.
    pub score: u32,
    /// Keywords found in the text, in first-seen job-description order.
    pub matched_keywords: Vec<String>,
    /// Keywords absent from the text, capped at [`MISSING_KEYWORD_CAP`].
    pub missing_keywords: Vec<String>,
}

/// Extracts significant keywords from a job description: lowercased
/// alphabetic tokens of length >= 4, stopwords removed, deduplicated
/// preserving first-seen order.
pub fn extract_keywords(job_description: &str) -> Vec<String> {
    let lowered = job_description.to_lowercase();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut keywords = Vec::new();

    for token in TOKEN_RE.find_iter(&lowered) {
        let token = token.as_str();
        if STOPWORDS.contains(&token) {
            continue;
        }
        if seen.insert(token) {
            keywords.push(token.to_string());
        }
    }

    keywords
}

/// Scores `text` against the keywords extracted from `job_description`.
///
/// A keyword matches when it appears as a substring of the lowercased text.
/// Score = round(100 * matched / total), clamped to [0, 100]; zero extracted
/// keywords yields score 0.
pub fn score_and_gaps(text: &str, job_description: &str) -> MatchScoreGapReport {
    let keywords = extract_keywords(job_description);
    if keywords.is_empty() {
        return MatchScoreGapReport {
            score: 0,
            matched_keywords: vec![],
            missing_keywords: vec![],
        };
    }

    let text_lower = text.to_lowercase();
    let total = keywords.len();
    let (matched_keywords, mut missing_keywords): (Vec<String>, Vec<String>) = keywords
        .into_iter()
        .partition(|keyword| text_lower.contains(keyword.as_str()));

    let score = ((matched_keywords.len() as f64 / total as f64) * 100.0).round() as u32;
    missing_keywords.truncate(MISSING_KEYWORD_CAP);

    MatchScoreGapReport {
        score: score.min(100),
        matched_keywords,
        missing_keywords,
    }
}
