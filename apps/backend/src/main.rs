use actix_web::{web, App, HttpServer};
use tracing::{error, info};
use yacht_backend::config::server::ServerConfig;
use yacht_backend::middleware::{
    cors_middleware, RequestTrace, StructuredLogger, TraceSpan,
};
use yacht_backend::routes;
use yacht_backend::state::app_state::AppState;
use yacht_backend::telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    info!(
        host = %config.host,
        port = config.port,
        heartbeat_secs = config.session.heartbeat_interval.as_secs(),
        client_timeout_secs = config.session.client_timeout.as_secs(),
        report_invalid_moves = config.session.report_invalid_moves,
        seeded_dice = config.dice_seed.is_some(),
        "starting yacht backend"
    );

    let data = web::Data::new(AppState::from_config(&config));

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
