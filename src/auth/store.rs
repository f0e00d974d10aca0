use async_trait::async_trait;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// User record as persisted. Never serialized to clients directly;
/// responses go through the DTOs in `dto.rs`.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub access_token: String,
    pub created_at: OffsetDateTime,
}

/// Fields the registration flow supplies; `id` and `created_at` are
/// assigned by the store.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub access_token: String,
}

/// Which unique column a duplicate insert collided on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateField {
    Name,
    Email,
    AccessToken,
}

impl DuplicateField {
    pub fn as_str(&self) -> &'static str {
        match self {
            DuplicateField::Name => "name",
            DuplicateField::Email => "email",
            DuplicateField::AccessToken => "accessToken",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("duplicate value for unique field {}", .0.as_str())]
    Duplicate(DuplicateField),
    #[error("store unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),
}

/// Injected store handle. Uniqueness checks and insert are atomic per
/// implementation: Postgres unique constraints for the real store, a
/// mutex-guarded scan-then-push for the in-memory test store.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, new_user: NewUser) -> Result<User, StoreError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    async fn find_by_token(&self, token: &str) -> Result<Option<User>, StoreError>;
}
