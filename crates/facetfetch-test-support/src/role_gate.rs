//! Test role gates — mock `RoleGate` implementations for tests.

use std::collections::HashSet;

use async_trait::async_trait;
use facetfetch_core::error::DomainError;
use facetfetch_core::principal::Principal;
use facetfetch_core::role_gate::RoleGate;

/// A role gate backed by a fixed set of `(role, principal)` grants.
#[derive(Debug, Default)]
pub struct StaticRoleGate {
    grants: HashSet<(String, Principal)>,
}

impl StaticRoleGate {
    /// Creates a gate with no grants.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a grant to the gate.
    #[must_use]
    pub fn with_grant(mut self, role: &str, principal: &Principal) -> Self {
        self.grants.insert((role.to_owned(), principal.clone()));
        self
    }
}

#[async_trait]
impl RoleGate for StaticRoleGate {
    async fn has_role(&self, role: &str, principal: &Principal) -> Result<bool, DomainError> {
        Ok(self.grants.contains(&(role.to_owned(), principal.clone())))
    }
}

/// A role gate whose reads always fail with an infrastructure error.
#[derive(Debug)]
pub struct FailingRoleGate;

#[async_trait]
impl RoleGate for FailingRoleGate {
    async fn has_role(&self, _role: &str, _principal: &Principal) -> Result<bool, DomainError> {
        Err(DomainError::Infrastructure("role registry unavailable".into()))
    }
}
