use axum::{extract::State, http::StatusCode, Json};
use ballot_core::AppState;
use ballot_models::User;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::JsonBody;

const MAX_USERNAME_LEN: usize = 150;
const MIN_PASSWORD_LEN: usize = 8;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

fn validate_credentials(username: &str, password: &str) -> Result<(), ApiError> {
    if username.trim().is_empty() || username.len() > MAX_USERNAME_LEN {
        return Err(ApiError::BadRequest("invalid username".into()));
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::BadRequest(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

fn to_model(row: ballot_db::users::UserRow) -> User {
    User {
        id: row.id,
        username: row.username,
        created_at: row.created_at,
    }
}

pub async fn register(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    if !state.config.registration_enabled {
        return Err(ApiError::Forbidden);
    }
    validate_credentials(&body.username, &body.password)?;

    let username = body.username.trim();
    if ballot_db::users::get_user_by_username(&state.db, username)
        .await?
        .is_some()
    {
        return Err(ApiError::BadRequest("username is already taken".into()));
    }

    let password_hash = ballot_core::auth::hash_password(&body.password)?;
    let user = ballot_db::users::create_user(&state.db, username, &password_hash, Utc::now())
        .await
        .map_err(|e| {
            if e.is_unique_violation() {
                ApiError::BadRequest("username is already taken".into())
            } else {
                ApiError::from(e)
            }
        })?;

    tracing::info!("registered user {} ({})", user.username, user.id);

    Ok((StatusCode::CREATED, Json(to_model(user))))
}

pub async fn login(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    let user = ballot_db::users::get_user_by_username(&state.db, body.username.trim()).await?;

    // Burn comparable time on unknown usernames to keep the response
    // timing from revealing which accounts exist.
    let valid = match &user {
        Some(u) => ballot_core::auth::verify_password(&body.password, &u.password_hash),
        None => {
            let _ = ballot_core::auth::hash_password(&body.password);
            false
        }
    };
    let Some(user) = user.filter(|_| valid) else {
        return Err(ApiError::AuthenticationRequired);
    };

    let token = ballot_core::auth::create_token(
        user.id,
        &state.config.jwt_secret,
        state.config.jwt_expiry_seconds,
    )?;

    Ok(Json(json!({
        "token": token,
        "user": to_model(user),
    })))
}
