use crate::error::AdvisorError;
use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};

/// Cap `s` at `max_chars` characters (not bytes), marking the cut with "...".
/// Used for catalog table columns and AI-written explanations.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let end: String = s.chars().take(max_chars).collect();
        format!("{}...", end)
    }
}

/// Join items as prose: "a", "a and b", "a, b and c".
pub fn join_natural(items: &[&str]) -> String {
    match items {
        [] => String::new(),
        [one] => one.to_string(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

/// Hex sha256 of `content`; session fingerprints are built on this.
pub fn compute_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

/// Flatten an enrichment reply to one line so raw newlines inside explanation
/// strings cannot break the JSON.
pub fn sanitize_json(s: &str) -> String {
    let cleaned: String = s
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Pull the outermost `[...]` out of an enrichment reply, ignoring code fences
/// and any prose around it.
pub fn parse_json_response<T: DeserializeOwned>(response: &str) -> Result<Vec<T>, AdvisorError> {
    let sanitized = sanitize_json(response);
    let trimmed = sanitized.trim();

    let json_str = match (trimmed.find('['), trimmed.rfind(']')) {
        (Some(start), Some(end)) if end > start => &trimmed[start..=end],
        _ => trimmed,
    };

    serde_json::from_str(json_str).map_err(|e| {
        AdvisorError::Parse(format!(
            "failed to parse JSON array: {} (response: {})",
            e,
            truncate(response, 200)
        ))
    })
}
