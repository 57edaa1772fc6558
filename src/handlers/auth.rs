use std::sync::Arc;

use crate::{
    models::{
        error::{Error, StoreError},
        user::{AuthResponse, Credentials, Preferences, StoredUser},
    },
    utils::{
        hash_password::{hash_password, verify_dummy_password, verify_password},
        jwt_encode::jwt_encode,
        state::AppState,
    },
};
use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};
use http::StatusCode;
use tracing::{info, warn};

const REGISTRATION_FAILED: &str = "Registration failed";
const LOGIN_FAILED: &str = "Login failed";

pub async fn register(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<impl IntoResponse, Error> {
    let rejected = || Error::new(StatusCode::BAD_REQUEST, REGISTRATION_FAILED);

    let Json(credentials) = payload.map_err(|e| {
        warn!(error = %e, "Malformed registration body");
        rejected()
    })?;
    if credentials.username.trim().is_empty() || credentials.password.is_empty() {
        return Err(rejected());
    }

    let password_hash = hash_password(&credentials.password).map_err(|e| {
        warn!(error = %e, "Password hashing failed");
        rejected()
    })?;

    let user = state
        .users
        .insert(StoredUser {
            username: credentials.username,
            password_hash,
            preferences: Preferences::default(),
        })
        .await
        .map_err(|e| {
            match &e {
                StoreError::Duplicate(_) => info!(error = %e, "Registration refused"),
                _ => warn!(error = %e, "Registration could not be stored"),
            }
            rejected()
        })?;

    let token = jwt_encode(
        &user.username,
        &state.config.jwt_secret,
        state.config.token_ttl_hours,
    )?;
    info!(username = %user.username, "User registered");

    Ok((StatusCode::CREATED, Json(AuthResponse { user, token })))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<impl IntoResponse, Error> {
    let rejected = || Error::new(StatusCode::BAD_REQUEST, LOGIN_FAILED);

    let Json(credentials) = payload.map_err(|_| rejected())?;
    let Some(stored) = state.users.get(&credentials.username) else {
        verify_dummy_password(&credentials.password);
        return Err(rejected());
    };

    let matches = verify_password(&credentials.password, &stored.password_hash).map_err(|e| {
        warn!(error = %e, username = %stored.username, "Stored hash unreadable");
        rejected()
    })?;
    if !matches {
        info!(username = %stored.username, "Login refused");
        return Err(rejected());
    }

    let token = jwt_encode(
        &stored.username,
        &state.config.jwt_secret,
        state.config.token_ttl_hours,
    )?;

    Ok((
        StatusCode::OK,
        Json(AuthResponse {
            user: stored.to_user(),
            token,
        }),
    ))
}
