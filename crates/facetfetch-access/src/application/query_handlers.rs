//! Query handlers for the Role Registry context.
//!
//! This module contains query handlers that reconstitute the registry
//! from stored events and return read-only view DTOs.

use chrono::{DateTime, Utc};
use facetfetch_core::error::DomainError;
use facetfetch_core::principal::Principal;
use facetfetch_core::repository::EventRepository;
use serde::Serialize;
use uuid::Uuid;

use crate::application::command_handlers;
use crate::domain::role_name::RoleName;

/// Read-only view of a single role grant.
#[derive(Debug, Serialize)]
pub struct RoleGrantView {
    /// The granted role.
    pub role: String,
    /// The principal holding the role.
    pub grantee: String,
    /// The principal that issued the grant.
    pub grantor: String,
    /// When the grant was recorded.
    pub granted_at: DateTime<Utc>,
}

/// Read-only view of the role registry.
#[derive(Debug, Serialize)]
pub struct RoleRegistryView {
    /// The registry stream identifier.
    pub registry_id: Uuid,
    /// The deploying principal, if deployed.
    pub deployer: Option<String>,
    /// Grants, ordered by role then grantee.
    pub grants: Vec<RoleGrantView>,
    /// Current version (event count).
    pub version: i64,
}

/// Returns whether `principal` holds `role` in the registry.
///
/// A role name that could never have been granted is simply not held.
///
/// # Errors
///
/// Returns `DomainError` if loading or deserialization fails.
pub async fn has_role(
    registry_id: Uuid,
    role: &str,
    principal: &Principal,
    repo: &dyn EventRepository,
) -> Result<bool, DomainError> {
    let Ok(role) = RoleName::parse(role) else {
        return Ok(false);
    };
    let registry = command_handlers::load_registry(registry_id, repo).await?;
    Ok(registry.has_role(&role, principal))
}

/// Retrieves the full role registry.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if loading or deserialization fails.
pub async fn get_role_registry(
    registry_id: Uuid,
    repo: &dyn EventRepository,
) -> Result<RoleRegistryView, DomainError> {
    let registry = command_handlers::load_registry(registry_id, repo).await?;
    let grants = registry
        .grants
        .iter()
        .map(|((role, grantee), grant)| RoleGrantView {
            role: role.to_string(),
            grantee: grantee.to_string(),
            grantor: grant.grantor.to_string(),
            granted_at: grant.granted_at,
        })
        .collect();
    Ok(RoleRegistryView {
        registry_id,
        deployer: registry.deployer().map(ToString::to_string),
        grants,
        version: registry.version,
    })
}
