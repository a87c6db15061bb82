use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use crate::response::{success, success_empty, success_page, ApiResponse, PageData};
use crate::state::AppState;
use crate::users::dto::{CreateUserRequest, UpdateUserRequest};
use crate::users::error::UserError;
use crate::users::repo_types::{ListParams, User};
use crate::users::service;

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(mut payload): Json<CreateUserRequest>,
) -> Result<Json<ApiResponse<User>>, UserError> {
    payload.email = payload.email.trim().to_lowercase();
    payload.validate()?;

    let user = service::create(&state.db, payload).await?;
    info!(user_id = user.id, username = %user.username, "user created");
    Ok(success(user))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<User>>, UserError> {
    let user = service::get_by_id(&state.db, id).await?;
    Ok(success(user))
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ApiResponse<PageData<User>>>, UserError> {
    let (users, total) = service::list(&state.db, &params).await?;
    Ok(success_page(users, total, params.page(), params.page_size()))
}

#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(mut payload): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<User>>, UserError> {
    if let Some(email) = payload.email.take() {
        payload.email = Some(email.trim().to_lowercase());
    }
    payload.validate()?;

    let user = service::update(&state.db, id, payload).await?;
    info!(user_id = user.id, "user updated");
    Ok(success(user))
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, UserError> {
    service::delete(&state.db, id).await?;
    info!(user_id = id, "user deleted");
    Ok(success_empty())
}
