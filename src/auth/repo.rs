use async_trait::async_trait;
use sqlx::PgPool;

use crate::auth::store::{DuplicateField, NewUser, StoreError, User, UserStore};

/// Postgres-backed store. Uniqueness on `name`, `email` and
/// `access_token` is enforced by the constraints in the users table, so
/// check-then-insert races resolve to a unique violation for the loser.
#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

fn map_create_error(e: sqlx::Error) -> StoreError {
    let field = match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            match db_err.constraint() {
                Some("users_name_key") => Some(DuplicateField::Name),
                Some("users_email_key") => Some(DuplicateField::Email),
                Some("users_access_token_key") => Some(DuplicateField::AccessToken),
                // A violation on a constraint this code does not know
                // about is not an email conflict; report it as a store
                // failure rather than misnaming the field.
                _ => None,
            }
        }
        _ => None,
    };
    match field {
        Some(field) => StoreError::Duplicate(field),
        None => StoreError::Unavailable(e),
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash, access_token)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, password_hash, access_token, created_at
            "#,
        )
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(&new_user.access_token)
        .fetch_one(&self.db)
        .await
        .map_err(map_create_error)?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, access_token, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, access_token, created_at
            FROM users
            WHERE access_token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }
}
