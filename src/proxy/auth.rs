//! Bearer credential check for protected routes.

/// Validate an `Authorization` header value against the configured secret.
///
/// The `Bearer ` prefix is optional on the presented side; the remainder is
/// compared with exact string equality. A missing header is a plain
/// `false`, never an error.
pub fn verify_token(header: Option<&str>, secret: &str) -> bool {
    let Some(value) = header else {
        return false;
    };
    let token = value.strip_prefix("Bearer ").unwrap_or(value);
    token == secret
}
