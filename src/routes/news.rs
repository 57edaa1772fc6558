use std::sync::Arc;

use axum::{routing::get, Router};

use crate::{handlers::news::get_news, utils::state::AppState};

pub fn news_routes() -> Router<Arc<AppState>> {
    Router::new().route("/news", get(get_news))
}
