//! HTTP method allowlist.

/// Methods the echo endpoint answers. OPTIONS is accepted for CORS preflight
/// and gets the regular echo response.
pub const ALLOWED_METHODS: [&str; 3] = ["GET", "POST", "OPTIONS"];

/// Check a method against the allowlist. Matching is exact and case-sensitive.
pub fn is_method_allowed(method: &str) -> bool {
    ALLOWED_METHODS.contains(&method)
}
