// src/models/user.rs
use serde::{Deserialize, Serialize};

/// Role string the API issues to administrators.
pub const ADMIN_ROLE: &str = "ADMIN";

/// Role assumed when a login does not say otherwise.
pub const DEFAULT_ROLE: &str = "USER";

/// Who the stored session belongs to, as far as the client can tell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub role: String,
}

impl SessionUser {
    pub fn new(role: impl Into<String>) -> Self {
        Self { role: role.into() }
    }

    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}
