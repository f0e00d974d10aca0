use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
};

use crate::auth::{error::ApiError, store::User};
use crate::state::AppState;

/// Resolves the bearer token in the `Authorization` header to a user
/// record. Handlers taking this extractor never run for requests with
/// a missing, empty, or unknown token; those are rejected with 401 and
/// `{"loggedOut": true}` before the handler body is reached.
pub struct AuthUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .unwrap_or("");

        // Clients send either the raw token or a Bearer-prefixed one.
        let token = header
            .strip_prefix("Bearer ")
            .or_else(|| header.strip_prefix("bearer "))
            .unwrap_or(header)
            .trim();

        if token.is_empty() {
            return Err(ApiError::Unauthorized);
        }

        match state.store.find_by_token(token).await {
            Ok(Some(user)) => Ok(AuthUser(user)),
            Ok(None) => Err(ApiError::Unauthorized),
            // A failing store is a server error, never an auth verdict.
            Err(e) => Err(e.into()),
        }
    }
}
