use subtle::ConstantTimeEq;

/// Check a caller-supplied API key against the configured one in constant time.
/// A missing header never matches.
pub fn api_key_matches(expected: &str, provided: Option<&str>) -> bool {
    let Some(provided) = provided else {
        return false;
    };
    if expected.len() != provided.len() {
        return false;
    }
    expected.as_bytes().ct_eq(provided.as_bytes()).into()
}
