use sqlx::PgPool;

use crate::users::error::StoreError;
use crate::users::repo_types::{ListParams, NewUser, User};

impl User {
    /// Insert a new row and return it with its server-assigned fields.
    pub async fn create(db: &PgPool, new_user: &NewUser) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, email, password_hash, status, created_at, updated_at
            "#,
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(new_user.status)
        .fetch_one(db)
        .await
        .map_err(StoreError::from_sqlx)?;
        Ok(user)
    }

    pub async fn find_by_id(db: &PgPool, id: i64) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, status, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(StoreError::from_sqlx)?;
        Ok(user)
    }

    pub async fn find_by_username(db: &PgPool, username: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, status, created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(db)
        .await
        .map_err(StoreError::from_sqlx)?;
        Ok(user)
    }

    pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, status, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await
        .map_err(StoreError::from_sqlx)?;
        Ok(user)
    }

    pub async fn exists_by_username(db: &PgPool, username: &str) -> Result<bool, StoreError> {
        let exists: bool =
            sqlx::query_scalar(r#"SELECT EXISTS (SELECT 1 FROM users WHERE username = $1)"#)
                .bind(username)
                .fetch_one(db)
                .await
                .map_err(StoreError::from_sqlx)?;
        Ok(exists)
    }

    pub async fn exists_by_email(db: &PgPool, email: &str) -> Result<bool, StoreError> {
        let exists: bool =
            sqlx::query_scalar(r#"SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)"#)
                .bind(email)
                .fetch_one(db)
                .await
                .map_err(StoreError::from_sqlx)?;
        Ok(exists)
    }

    /// Replace the mutable columns of this row and refresh `updated_at`.
    /// Returns None when the row no longer exists.
    pub async fn update(&self, db: &PgPool) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET username = $1, email = $2, status = $3, updated_at = now()
            WHERE id = $4
            RETURNING id, username, email, password_hash, status, created_at, updated_at
            "#,
        )
        .bind(&self.username)
        .bind(&self.email)
        .bind(self.status)
        .bind(self.id)
        .fetch_optional(db)
        .await
        .map_err(StoreError::from_sqlx)?;
        Ok(user)
    }

    /// Returns false when no row matched the id.
    pub async fn delete(db: &PgPool, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query(r#"DELETE FROM users WHERE id = $1"#)
            .bind(id)
            .execute(db)
            .await
            .map_err(StoreError::from_sqlx)?;
        Ok(result.rows_affected() > 0)
    }
}

/// Fetch one page of the filtered listing plus the filtered total.
///
/// The optional predicates are folded into static SQL: a NULL bind
/// disables its predicate, so one prepared statement covers every
/// filter combination.
pub async fn list(db: &PgPool, params: &ListParams) -> Result<(Vec<User>, i64), StoreError> {
    let username = params
        .username
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(|s| format!("%{s}%"));
    let email = params
        .email
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(|s| format!("%{s}%"));
    let status = params.status.map(i16::from);

    let total: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM users
        WHERE ($1::text IS NULL OR username LIKE $1)
          AND ($2::text IS NULL OR email LIKE $2)
          AND ($3::int2 IS NULL OR status = $3)
        "#,
    )
    .bind(username.as_deref())
    .bind(email.as_deref())
    .bind(status)
    .fetch_one(db)
    .await
    .map_err(StoreError::from_sqlx)?;

    let (limit, offset) = params.limit_offset();
    let users = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, password_hash, status, created_at, updated_at
        FROM users
        WHERE ($1::text IS NULL OR username LIKE $1)
          AND ($2::text IS NULL OR email LIKE $2)
          AND ($3::int2 IS NULL OR status = $3)
        ORDER BY id DESC
        LIMIT $4 OFFSET $5
        "#,
    )
    .bind(username.as_deref())
    .bind(email.as_deref())
    .bind(status)
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await
    .map_err(StoreError::from_sqlx)?;

    Ok((users, total))
}
