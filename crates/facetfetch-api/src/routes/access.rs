//! Routes for the Role Registry bounded context.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use facetfetch_access::application::query_handlers::{self, RoleRegistryView};
use facetfetch_access::application::command_handlers;
use facetfetch_access::domain::commands;
use facetfetch_core::principal::Principal;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::caller::Caller;
use crate::error::ApiError;
use crate::routes::CommandResponse;
use crate::state::AppState;

/// Request body for POST /grant-role.
#[derive(Debug, Deserialize)]
pub struct GrantRoleRequest {
    /// The role to grant.
    pub role: String,
    /// The principal receiving the role.
    pub principal: String,
}

/// Response body for GET /roles/{role}/{principal}.
#[derive(Debug, Serialize)]
pub struct HasRoleResponse {
    /// The role checked.
    pub role: String,
    /// The principal checked.
    pub principal: String,
    /// Whether the principal holds the role.
    pub has_role: bool,
}

/// POST /grant-role
#[instrument(skip(state, caller, request), fields(caller = %caller, role = %request.role))]
async fn grant_role(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Json(request): Json<GrantRoleRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::GrantRole {
        correlation_id: Uuid::new_v4(),
        registry_id: state.registry_id,
        caller,
        role: request.role,
        grantee: request.principal,
    };

    info!(correlation_id = %command.correlation_id, "handling grant_role command");

    let _write = state.begin_write().await;
    let result = command_handlers::handle_grant_role(
        &command,
        state.clock.as_ref(),
        &*state.event_repository,
    )
    .await?;

    Ok(Json(CommandResponse::ok_true(&result.stored_events)))
}

/// GET /roles
async fn get_role_registry(
    State(state): State<AppState>,
) -> Result<Json<RoleRegistryView>, ApiError> {
    let view = query_handlers::get_role_registry(state.registry_id, &*state.event_repository)
        .await?;
    Ok(Json(view))
}

/// GET /roles/{role}/{principal}
async fn has_role(
    State(state): State<AppState>,
    Path((role, principal)): Path<(String, String)>,
) -> Result<Json<HasRoleResponse>, ApiError> {
    let parsed = Principal::parse(&principal)?;
    let has_role =
        query_handlers::has_role(state.registry_id, &role, &parsed, &*state.event_repository)
            .await?;
    Ok(Json(HasRoleResponse {
        role,
        principal,
        has_role,
    }))
}

/// Returns the router for the access context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/grant-role", post(grant_role))
        .route("/roles", get(get_role_registry))
        .route("/roles/{role}/{principal}", get(has_role))
}
