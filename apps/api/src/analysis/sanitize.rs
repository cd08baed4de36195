//! Input sanitization for user-submitted resume and job description text.

/// Normalizes line endings to `\n`, strips control characters (keeping
/// newlines and tabs), and trims surrounding whitespace.
///
/// An input that comes back empty is rejected by the orchestrator before any
/// generation attempt.
pub fn sanitize_text(input: &str) -> String {
    let normalized = input.replace("\r\n", "\n").replace('\r', "\n");
    let cleaned: String = normalized
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect();
    cleaned.trim().to_string()
}
