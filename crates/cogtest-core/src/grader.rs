//! Lenient free-text answer matching.

/// Lowercase, trim, and keep only `a..=z`.
pub fn normalize(input: &str) -> String {
    input
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase())
        .collect()
}

/// True when the normalized input equals, contains, or is contained in any
/// normalized accepted name. Inputs that normalize to nothing never match.
pub fn is_match<S: AsRef<str>>(input: &str, accepted: &[S]) -> bool {
    let answer = normalize(input);
    // An empty string is contained in every name; refuse it rather than accept
    // answers like "42".
    if answer.is_empty() {
        return false;
    }
    accepted.iter().any(|name| {
        let name = normalize(name.as_ref());
        !name.is_empty() && (name == answer || name.contains(&answer) || answer.contains(&name))
    })
}
