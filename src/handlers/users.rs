use std::sync::Arc;

use crate::{
    models::{
        error::Error,
        jwt::Claims,
        user::{Preferences, PreferencesUpdate, User},
    },
    utils::state::AppState,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Extension, Json,
};
use tracing::{info, warn};

fn invalid_token() -> Error {
    Error::new(StatusCode::UNAUTHORIZED, "Invalid token")
}

pub async fn get_current_user(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<User>, Error> {
    let stored = state.users.get(&claims.sub).ok_or_else(invalid_token)?;
    Ok(Json(stored.to_user()))
}

pub async fn update_preferences(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    payload: Result<Json<PreferencesUpdate>, JsonRejection>,
) -> Result<Json<User>, Error> {
    let Json(update) = payload
        .map_err(|_| Error::new(StatusCode::BAD_REQUEST, "Update failed"))?;

    if state.users.get(&claims.sub).is_none() {
        return Err(invalid_token());
    }

    let user = state
        .users
        .update_preferences(&claims.sub, Preferences::from(update))
        .await
        .map_err(|e| {
            warn!(error = %e, "Preferences update failed");
            Error::new(StatusCode::BAD_REQUEST, "Update failed")
        })?;
    info!(username = %user.username, "Preferences updated");

    Ok(Json(user))
}
