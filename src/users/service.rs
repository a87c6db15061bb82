use sqlx::PgPool;

use crate::users::dto::{CreateUserRequest, UpdateUserRequest};
use crate::users::error::{UniqueField, UserError};
use crate::users::password::hash_password;
use crate::users::repo;
use crate::users::repo_types::{ListParams, NewUser, User, UserStatus};

/// Create an account after checking both uniqueness constraints.
///
/// The checks and the insert are not one atomic unit; the unique indexes
/// are the real guard, and a constraint trip on insert surfaces as the
/// same `AlreadyExists` the pre-check would have produced.
pub async fn create(db: &PgPool, req: CreateUserRequest) -> Result<User, UserError> {
    if User::exists_by_username(db, &req.username).await? {
        return Err(UserError::AlreadyExists(UniqueField::Username));
    }
    if User::exists_by_email(db, &req.email).await? {
        return Err(UserError::AlreadyExists(UniqueField::Email));
    }

    let password_hash = hash_password(&req.password).map_err(UserError::PasswordHash)?;

    let user = User::create(
        db,
        &NewUser {
            username: req.username,
            email: req.email,
            password_hash,
            status: UserStatus::Active,
        },
    )
    .await?;
    Ok(user)
}

pub async fn get_by_id(db: &PgPool, id: i64) -> Result<User, UserError> {
    User::find_by_id(db, id).await?.ok_or(UserError::NotFound)
}

pub async fn list(db: &PgPool, params: &ListParams) -> Result<(Vec<User>, i64), UserError> {
    let (users, total) = repo::list(db, params).await?;
    Ok((users, total))
}

/// Merge the supplied fields into the current row and persist it.
///
/// A new username or email is rejected when another record already owns
/// it; the owning record keeping its own value is not a conflict.
pub async fn update(db: &PgPool, id: i64, req: UpdateUserRequest) -> Result<User, UserError> {
    let mut user = User::find_by_id(db, id).await?.ok_or(UserError::NotFound)?;

    if let Some(username) = req.username {
        if let Some(existing) = User::find_by_username(db, &username).await? {
            if existing.id != id {
                return Err(UserError::AlreadyExists(UniqueField::Username));
            }
        }
        user.username = username;
    }

    if let Some(email) = req.email {
        if let Some(existing) = User::find_by_email(db, &email).await? {
            if existing.id != id {
                return Err(UserError::AlreadyExists(UniqueField::Email));
            }
        }
        user.email = email;
    }

    if let Some(status) = req.status {
        user.status = status;
    }

    user.update(db).await?.ok_or(UserError::NotFound)
}

pub async fn delete(db: &PgPool, id: i64) -> Result<(), UserError> {
    let user = User::find_by_id(db, id).await?.ok_or(UserError::NotFound)?;
    if !User::delete(db, user.id).await? {
        // Row vanished between the fetch and the delete.
        return Err(UserError::NotFound);
    }
    Ok(())
}
