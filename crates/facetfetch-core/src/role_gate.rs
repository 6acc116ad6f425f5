//! Authorization seam between the role registry and privileged operations.

use async_trait::async_trait;

use crate::error::DomainError;
use crate::principal::Principal;

/// Role that may grant roles and administer quests.
pub const PLATFORM_ADMIN_ROLE: &str = "platform-admin";

/// Read-only view of role grants, consulted before privileged mutations.
#[async_trait]
pub trait RoleGate: Send + Sync {
    /// Returns whether `principal` currently holds `role`.
    async fn has_role(&self, role: &str, principal: &Principal) -> Result<bool, DomainError>;

    /// Fails with `DomainError::Unauthorized` unless `principal` holds `role`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Unauthorized` if the role is not held, or any
    /// error raised while reading the registry.
    async fn require_role(&self, role: &str, principal: &Principal) -> Result<(), DomainError> {
        if self.has_role(role, principal).await? {
            Ok(())
        } else {
            Err(DomainError::Unauthorized {
                principal: principal.clone(),
                required_role: role.to_owned(),
            })
        }
    }
}
