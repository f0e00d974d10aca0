use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginOutcome, LoginRequest, RegisterRequest, RegisterResponse},
        error::ApiError,
        password::{hash_password, verify_password},
        store::{DuplicateField, NewUser, StoreError},
        token::issue_token,
    },
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(register))
        .route("/sessions", post(login))
}

fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    payload.name = payload.name.trim().to_string();
    payload.email = payload.email.trim().to_lowercase();

    if payload.name.is_empty() {
        return Err(ApiError::validation("name", "is required"));
    }
    if payload.email.is_empty() {
        return Err(ApiError::validation("email", "is required"));
    }
    if payload.password.is_empty() {
        return Err(ApiError::validation("password", "is required"));
    }
    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::validation("email", "is not a valid email address"));
    }

    let password_hash = hash_password(&payload.password).map_err(ApiError::Internal)?;

    // The token is generated here, once per registration, and handed to
    // the store as an ordinary column value.
    let mut new_user = NewUser {
        name: payload.name,
        email: payload.email,
        password_hash,
        access_token: issue_token(),
    };

    let user = match state.store.create(new_user.clone()).await {
        Ok(user) => user,
        Err(StoreError::Duplicate(DuplicateField::AccessToken)) => {
            // Token collision, reissue once and retry.
            warn!("access token collision on insert");
            new_user.access_token = issue_token();
            state.store.create(new_user).await?
        }
        Err(e) => return Err(e.into()),
    };

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id: user.id,
            access_token: user.access_token,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<LoginOutcome>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    let user = match state.store.find_by_email(&payload.email).await? {
        Some(user) => user,
        None => {
            warn!("login failed");
            return Ok(Json(LoginOutcome::not_found()));
        }
    };

    if !verify_password(&payload.password, &user.password_hash) {
        warn!("login failed");
        return Ok(Json(LoginOutcome::not_found()));
    }

    info!(user_id = %user.id, "user logged in");
    Ok(Json(LoginOutcome::Success {
        user_id: user.id,
        access_token: user.access_token,
    }))
}
