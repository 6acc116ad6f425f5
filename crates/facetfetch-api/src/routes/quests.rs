//! Routes for the Quest Enrollment bounded context.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use facetfetch_core::principal::Principal;
use facetfetch_core::response::LedgerResponse;
use facetfetch_quest::application::command_handlers;
use facetfetch_quest::application::query_handlers::{
    self, EnrollmentView, QuestBoardView, QuestView,
};
use facetfetch_quest::domain::commands;
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::caller::Caller;
use crate::error::ApiError;
use crate::routes::CommandResponse;
use crate::state::AppState;

/// Request body for POST /create-quest.
#[derive(Debug, Deserialize)]
pub struct CreateQuestRequest {
    /// Display title.
    pub title: String,
    /// Optional goal, such as a step count.
    pub target: Option<u64>,
    /// Optional length of the quest in days.
    pub duration_days: Option<u32>,
}

/// Request body for POST /close-quest and POST /enroll-in-quest.
#[derive(Debug, Deserialize)]
pub struct QuestRequest {
    /// The quest to act on.
    pub quest_id: u64,
}

/// POST /create-quest
#[instrument(skip(state, caller, request), fields(caller = %caller))]
async fn create_quest(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Json(request): Json<CreateQuestRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::CreateQuest {
        correlation_id: Uuid::new_v4(),
        board_id: state.board_id,
        caller,
        title: request.title,
        target: request.target,
        duration_days: request.duration_days,
    };

    info!(correlation_id = %command.correlation_id, "handling create_quest command");

    let _write = state.begin_write().await;
    let result = command_handlers::handle_create_quest(
        &command,
        state.clock.as_ref(),
        &state.role_gate(),
        &*state.event_repository,
    )
    .await?;

    let quest_id = result.quest_id.0;
    Ok(Json(CommandResponse {
        result: LedgerResponse::ok_uint(quest_id),
        event_ids: result.stored_events.iter().map(|e| e.event_id).collect(),
        quest_id: Some(quest_id),
    }))
}

/// POST /close-quest
#[instrument(skip(state, caller, request), fields(caller = %caller, quest_id = request.quest_id))]
async fn close_quest(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Json(request): Json<QuestRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::CloseQuest {
        correlation_id: Uuid::new_v4(),
        board_id: state.board_id,
        caller,
        quest_id: request.quest_id,
    };

    info!(correlation_id = %command.correlation_id, "handling close_quest command");

    let _write = state.begin_write().await;
    let result = command_handlers::handle_close_quest(
        &command,
        state.clock.as_ref(),
        &state.role_gate(),
        &*state.event_repository,
    )
    .await?;

    Ok(Json(CommandResponse::ok_true(&result.stored_events)))
}

/// POST /enroll-in-quest
#[instrument(skip(state, caller, request), fields(caller = %caller, quest_id = request.quest_id))]
async fn enroll_in_quest(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Json(request): Json<QuestRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::EnrollInQuest {
        correlation_id: Uuid::new_v4(),
        board_id: state.board_id,
        caller,
        quest_id: request.quest_id,
    };

    info!(correlation_id = %command.correlation_id, "handling enroll_in_quest command");

    let _write = state.begin_write().await;
    let result = command_handlers::handle_enroll_in_quest(
        &command,
        state.clock.as_ref(),
        &*state.event_repository,
    )
    .await?;

    Ok(Json(CommandResponse::ok_true(&result.stored_events)))
}

/// GET /
async fn list_quests(State(state): State<AppState>) -> Result<Json<QuestBoardView>, ApiError> {
    let view = query_handlers::list_quests(state.board_id, &*state.event_repository).await?;
    Ok(Json(view))
}

/// GET /{quest_id}
async fn get_quest(
    State(state): State<AppState>,
    Path(quest_id): Path<u64>,
) -> Result<Json<QuestView>, ApiError> {
    let view = query_handlers::get_quest(state.board_id, quest_id, &*state.event_repository)
        .await?;
    Ok(Json(view))
}

/// GET /{quest_id}/enrollments/{principal}
async fn get_enrollment(
    State(state): State<AppState>,
    Path((quest_id, principal)): Path<(u64, String)>,
) -> Result<Json<EnrollmentView>, ApiError> {
    let participant = Principal::parse(&principal)?;
    let view = query_handlers::get_enrollment(
        state.board_id,
        quest_id,
        &participant,
        &*state.event_repository,
    )
    .await?;
    Ok(Json(view))
}

/// Returns the router for the quest context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_quests))
        .route("/create-quest", post(create_quest))
        .route("/close-quest", post(close_quest))
        .route("/enroll-in-quest", post(enroll_in_quest))
        .route("/{quest_id}", get(get_quest))
        .route("/{quest_id}/enrollments/{principal}", get(get_enrollment))
}
