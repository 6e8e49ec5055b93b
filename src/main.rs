use actix_cors::Cors;
use actix_web::{App, HttpServer};
use bikeservice::config::Config;
use bikeservice::startup::{configure_app, init_tracing, AppState};
use tracing_actix_web::TracingLogger;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load configuration
    let config = Config::from_env().map_err(std::io::Error::other)?;
    config.validate().map_err(std::io::Error::other)?;

    init_tracing(&config.app);

    tracing::info!("Starting Bike Service");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Storage backend: {:?}", config.storage);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    let state = AppState::build(&config)
        .await
        .map_err(std::io::Error::other)?;
    let auth = state
        .auth_middleware(&config.security.realm)
        .map_err(std::io::Error::other)?;

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        App::new()
            .configure(configure_app(state.clone()))
            .wrap(auth.clone())
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
    })
    .workers(config.server.workers)
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await
}
