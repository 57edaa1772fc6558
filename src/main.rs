use std::{error::Error, sync::Arc};

use newshub::{
    routes::{init_tracing, make_app},
    utils::{config::Config, state::AppState},
};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();
    init_tracing();

    info!("Initializing application...");
    let config = Config::init()?;
    info!("Configuration loaded successfully");

    let address = config.bind_address();
    let state = Arc::new(AppState::init(config).await?);
    let app = make_app(state)?;

    let listener = TcpListener::bind(&address).await?;
    info!("Listening on http://{address}");
    axum::serve(listener, app).await?;

    Ok(())
}
