//! Well-known role name constants.

/// Role a caller must hold to administer roles, unless overridden by the
/// `ADMIN_ROLE` environment variable.
pub const ROLE_ADMIN: &str = "ADMIN";
