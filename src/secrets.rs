use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tracing::info;

use crate::{auth::extractors::AuthUser, state::AppState};

pub fn router() -> Router<AppState> {
    Router::new().route("/secrets", get(secrets))
}

/// Placeholder protected resource; only reachable with a resolvable
/// access token.
async fn secrets(AuthUser(user): AuthUser) -> Json<Value> {
    info!(user_id = %user.id, "secret served");
    Json(json!({ "secret": "This is a super secret message." }))
}
