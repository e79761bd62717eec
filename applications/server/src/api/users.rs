/// Users API routes
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use roster_storage::users::{self, User, UserChanges};

use crate::{
    error::{Result, ServiceError},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    // Optional so a missing field reaches validation instead of dying
    // in the deserializer with a framework-worded error.
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub success: bool,
    pub data: Vec<User>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub success: bool,
    pub data: User,
}

#[derive(Debug, Serialize)]
pub struct UserDeletedResponse {
    pub success: bool,
    pub message: String,
    pub data: User,
}

/// GET /users
/// Get all users, newest first
pub async fn list_users(State(state): State<AppState>) -> Result<Json<UserListResponse>> {
    let data = users::list(&state.pool).await?;
    let count = data.len();

    Ok(Json(UserListResponse {
        success: true,
        data,
        count,
    }))
}

/// GET /users/:id
/// Get a single user by id
pub async fn get_user(
    Path(id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>> {
    let user = users::get(&state.pool, id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))?;

    Ok(Json(UserResponse {
        success: true,
        data: user,
    }))
}

/// POST /users
/// Create a new user
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    let (name, email) = validate_create(req)?;

    let user = users::create(&state.pool, &name, &email).await?;

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            success: true,
            data: user,
        }),
    ))
}

/// PUT /users/:id
/// Partially update a user; only supplied fields are replaced
pub async fn update_user(
    Path(id): Path<i32>,
    State(state): State<AppState>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>> {
    let changes = validate_update(req)?;

    let user = users::update(&state.pool, id, &changes)
        .await?
        .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))?;

    Ok(Json(UserResponse {
        success: true,
        data: user,
    }))
}

/// DELETE /users/:id
/// Delete a user, returning the removed record
pub async fn delete_user(
    Path(id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<UserDeletedResponse>> {
    let user = users::delete(&state.pool, id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))?;

    Ok(Json(UserDeletedResponse {
        success: true,
        message: "User deleted successfully".to_string(),
        data: user,
    }))
}

// Validation runs before any database access; the first violated
// constraint's message is what the caller sees.

fn validate_create(req: CreateUserRequest) -> Result<(String, String)> {
    let name = req
        .name
        .ok_or_else(|| ServiceError::Validation("name is required".to_string()))?;
    validate_name(&name).map_err(|e| ServiceError::Validation(e.to_string()))?;

    let email = req
        .email
        .ok_or_else(|| ServiceError::Validation("email is required".to_string()))?;
    validate_email(&email).map_err(|e| ServiceError::Validation(e.to_string()))?;

    Ok((name, email))
}

fn validate_update(req: UpdateUserRequest) -> Result<UserChanges> {
    if req.name.is_none() && req.email.is_none() {
        return Err(ServiceError::Validation(
            "At least one field is required".to_string(),
        ));
    }

    if let Some(name) = &req.name {
        validate_name(name).map_err(|e| ServiceError::Validation(e.to_string()))?;
    }
    if let Some(email) = &req.email {
        validate_email(email).map_err(|e| ServiceError::Validation(e.to_string()))?;
    }

    Ok(UserChanges {
        name: req.name,
        email: req.email,
    })
}

/// Validates a user name.
fn validate_name(name: &str) -> std::result::Result<(), &'static str> {
    let length = name.chars().count();

    if length < 2 {
        return Err("name must be at least 2 characters long");
    }

    if length > 100 {
        return Err("name must be at most 100 characters long");
    }

    Ok(())
}

/// Validates an email address.
fn validate_email(email: &str) -> std::result::Result<(), &'static str> {
    if !email_address::EmailAddress::is_valid(email) {
        return Err("email must be a valid email address");
    }

    Ok(())
}
