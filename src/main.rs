use axum::{Router, Server, middleware::from_fn};
use clap::{Arg, Command};
use projectflow::{
    AppState,
    config::Config,
    db::build_pool,
    error::{AppError, AppResult},
    init_tracing,
    middleware::logger::logger,
    routes::create_router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

fn cli() -> Command {
    Command::new("projectflow")
        .about("Team, project and task tracking API server")
        .arg(
            Arg::new("host")
                .long("host")
                .value_name("HOST")
                .help("Address to bind, overrides SERVER_HOST"),
        )
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .value_name("PORT")
                .value_parser(clap::value_parser!(u16))
                .help("Port to listen on, overrides SERVER_PORT"),
        )
}

async fn run() -> AppResult<()> {
    let matches = cli().get_matches();

    let mut config = Config::from_env()?;
    if let Some(host) = matches.get_one::<String>("host") {
        config.server_host = host.clone();
    }
    if let Some(port) = matches.get_one::<u16>("port") {
        config.server_port = *port;
    }

    init_tracing(&config);

    let db = build_pool(&config.database())?;
    let redis = redis::Client::open(config.redis_url.as_str())?;

    let addr: SocketAddr = config
        .server_address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid server address: {}", e)))?;

    let state = Arc::new(AppState::new(db, redis, config));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(create_router(state))
        .layer(cors)
        .layer(from_fn(logger));

    tracing::info!(%addr, "Server listening");
    Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("projectflow: {}", e);
        std::process::exit(1);
    }
}
