//! Session context
//!
//! Authentication lives outside this crate. Call sites receive an explicit
//! session context instead of consulting an ambient client, which makes the
//! no-op-when-unauthenticated persistence policy a visible branch.

/// The authenticated user, if any, behind a sequence of operations
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    /// Opaque identifier supplied by the auth layer
    pub user_id: Option<String>,
}

impl SessionContext {
    /// A session with no authenticated user
    pub fn anonymous() -> Self {
        Self { user_id: None }
    }

    /// A session for an authenticated user
    pub fn authenticated(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }
}
