use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::{from_fn, Next},
    routing::{get, put},
    Router,
};

use crate::handlers::middleware::auth_middleware;
use crate::handlers::users::{get_current_user, update_preferences};
use crate::utils::state::AppState;

pub fn user_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/user", get(get_current_user))
        .route("/preferences", put(update_preferences))
        .route_layer(from_fn(move |req: Request, next: Next| {
            auth_middleware(State(state.clone()), req, next)
        }))
}
