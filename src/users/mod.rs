use crate::state::AppState;
use axum::Router;

pub mod dto;
pub mod error;
pub mod handlers;
mod password;
pub mod repo;
pub mod repo_types;
pub mod service;

pub fn router() -> Router<AppState> {
    handlers::user_routes()
}
