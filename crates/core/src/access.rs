//! Authorization guard for privileged endpoints.
//!
//! The check is a plain function over the caller's role set so it can be
//! invoked from any extractor or middleware and tested without HTTP.

/// Result of evaluating a caller against a required role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Deny,
}

impl AccessDecision {
    pub fn is_allowed(self) -> bool {
        self == AccessDecision::Allow
    }
}

/// Allow the caller only if `caller_roles` contains `required` exactly.
///
/// Matching is case-sensitive. An empty `required` never matches.
pub fn evaluate<S: AsRef<str>>(caller_roles: &[S], required: &str) -> AccessDecision {
    if required.is_empty() {
        return AccessDecision::Deny;
    }
    if caller_roles.iter().any(|r| r.as_ref() == required) {
        AccessDecision::Allow
    } else {
        AccessDecision::Deny
    }
}
