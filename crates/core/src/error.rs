use crate::store::StoreError;
use crate::types::DbId;

/// Caller-level failures raised before any role logic runs.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),
}

/// Outcome of a rejected role mutation.
///
/// Every variant except [`RoleError::Store`] is the client's fault and is
/// reported as a 400 by the API layer.
#[derive(Debug, thiserror::Error)]
pub enum RoleError {
    /// The request itself is malformed (blank name, blank username, ...).
    #[error("Invalid role: {0}")]
    Invalid(String),

    /// One or more member usernames do not exist.
    #[error("Unknown member username(s): {}", .0.join(", "))]
    UnknownMembers(Vec<String>),

    /// The update target does not exist.
    #[error("Role with id {0} does not exist")]
    RoleNotFound(DbId),

    /// Another role already holds this name.
    #[error("A role named '{0}' already exists")]
    NameTaken(String),

    /// The store refused the write for a reason other than the name.
    #[error("Role rejected by store: {0}")]
    Rejected(String),

    /// The store itself failed.
    #[error("Role store failure: {0}")]
    Store(String),
}

impl From<StoreError> for RoleError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NameTaken(name) => RoleError::NameTaken(name),
            StoreError::NotFound(id) => RoleError::RoleNotFound(id),
            StoreError::Rejected(msg) => RoleError::Rejected(msg),
            StoreError::Backend(msg) => RoleError::Store(msg),
        }
    }
}

impl RoleError {
    /// Whether the failure should be reported as a client error.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, RoleError::Store(_))
    }
}
