use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{RegisterResponse, TokenResponse, UserSummary},
        jwt::{AuthUser, JwtKeys},
        password::{hash_password, verify_password},
        repo::User,
        validate,
    },
    error::ApiError,
    state::AppState,
};

pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(register))
        .route("/login", post(login))
}

pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/profile", get(profile))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let creds = validate::credentials(&payload)?;

    let hash = hash_password(&creds.password)?;
    // No existence pre-check: the unique constraint decides, so two
    // concurrent registrations cannot both succeed.
    let user = User::create(&state.db, &creds.username, &hash).await?;

    info!(username = %user.username, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            username: user.username,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<TokenResponse>, ApiError> {
    let creds = validate::credentials(&payload)?;

    let user = match User::find_by_username(&state.db, &creds.username).await? {
        Some(u) => u,
        None => {
            warn!(username = %creds.username, "login for unknown username");
            return Err(ApiError::InvalidCredentials);
        }
    };

    if !verify_password(&creds.password, &user.password_hash)? {
        warn!(username = %user.username, "login with wrong password");
        return Err(ApiError::InvalidCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.issue(&user.username)?;

    info!(username = %user.username, "user logged in");
    Ok(Json(TokenResponse { token }))
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    AuthUser(_subject): AuthUser,
) -> Result<Json<Vec<UserSummary>>, ApiError> {
    let users = User::list(&state.db).await?;
    let items = users
        .into_iter()
        .map(|u| UserSummary {
            username: u.username,
            created_at: u.created_at,
        })
        .collect();
    Ok(Json(items))
}

#[instrument(skip(state))]
pub async fn profile(
    State(state): State<AppState>,
    AuthUser(subject): AuthUser,
) -> Result<Json<UserSummary>, ApiError> {
    // The token outlives nothing server-side, so the subject may have
    // been deleted since issuance.
    let user = User::find_by_username(&state.db, &subject)
        .await?
        .ok_or(ApiError::NotFound("user"))?;

    Ok(Json(UserSummary {
        username: user.username,
        created_at: user.created_at,
    }))
}
