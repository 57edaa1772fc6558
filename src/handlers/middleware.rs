use axum::{
    extract::{Request, State},
    middleware::Next,
    response::IntoResponse,
};
use headers::{authorization::Bearer, Authorization, HeaderMapExt};
use http::StatusCode;
use std::sync::Arc;
use tracing::debug;

use crate::{
    models::error::Error,
    utils::{jwt_encode::jwt_decode, state::AppState},
};

pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<impl IntoResponse, Error> {
    let bearer = req
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .ok_or((StatusCode::UNAUTHORIZED, "Authentication required"))?;

    let claims = jwt_decode(bearer.token(), &state.config.jwt_secret).map_err(|e| {
        debug!(error = %e, "Token validation failed");
        Error::new(StatusCode::UNAUTHORIZED, "Invalid token")
    })?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
