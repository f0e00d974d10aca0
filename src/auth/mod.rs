use crate::state::AppState;
use axum::Router;

pub mod dto;
pub mod error;
pub(crate) mod extractors;
pub mod handlers;
pub mod password;
pub mod repo;
pub mod store;
pub mod token;

pub fn router() -> Router<AppState> {
    handlers::auth_routes()
}
