use actix_web::{web, App, HttpServer};
use cassino::config::AppConfig;
use cassino::middleware::request_span::RequestSpan;
use cassino::routes;
use cassino::state::app_state::AppState;
use cassino::telemetry;
use tracing::info;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Settings come from CASSINO_* environment variables.
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    info!(
        host = %config.host,
        port = config.port,
        countdown_secs = config.game.countdown_secs,
        scoring_rule = ?config.game.scoring_rule,
        "Starting Cassino backend"
    );

    let data = web::Data::new(AppState::in_memory(config.game));

    HttpServer::new(move || {
        App::new()
            .wrap(RequestSpan)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
