use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::{info, warn};

use pow_ledger::api::{self, AppState};
use pow_ledger::config::Settings;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let settings = Settings::from_env();
    let host = settings.host.clone();
    let port = settings.port;
    let bootstrap = settings.bootstrap_peers.clone();

    let state = web::Data::new(AppState::new(settings));
    if let Err(e) = state.node.register_nodes(bootstrap.as_slice()) {
        warn!("ignoring BOOTSTRAP_PEERS: {}", e);
    }

    info!(
        "⛓️ Starting ledger node {} at http://{host}:{port}",
        state.node.id()
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
