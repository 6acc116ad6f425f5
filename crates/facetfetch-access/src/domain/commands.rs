//! Commands for the Role Registry context.

use facetfetch_core::command::Command;
use facetfetch_core::principal::Principal;
use uuid::Uuid;

/// Command to deploy the ledger, making `deployer` its first administrator.
#[derive(Debug, Clone)]
pub struct DeployLedger {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The role registry stream.
    pub registry_id: Uuid,
    /// The deploying principal.
    pub deployer: Principal,
}

/// Command to grant a role to a principal.
///
/// `role` and `grantee` arrive unvalidated; the handler checks their shape
/// before it checks the caller's authorization.
#[derive(Debug, Clone)]
pub struct GrantRole {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The role registry stream.
    pub registry_id: Uuid,
    /// The principal issuing the grant.
    pub caller: Principal,
    /// The role to grant.
    pub role: String,
    /// The principal receiving the role.
    pub grantee: String,
}

impl Command for DeployLedger {
    fn command_type(&self) -> &'static str {
        "access.deploy_ledger"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn caller(&self) -> &Principal {
        &self.deployer
    }
}

impl Command for GrantRole {
    fn command_type(&self) -> &'static str {
        "access.grant_role"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn caller(&self) -> &Principal {
        &self.caller
    }
}
