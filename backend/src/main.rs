use actix_web::{App, HttpServer};
use anyhow::Context;
use backend::config::Config;
use backend::replay::{RenderSettings, ReplayRepositoryImpl};
use backend::third_party::ReplayApiService;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // .env files have to be in place before the logger reads LOG_LEVEL
    Config::load_env_files();
    let default_level = Config::default_log_level(&Config::environment_from_env());
    env_logger::init_from_env(env_logger::Env::new().filter_or("LOG_LEVEL", default_level));

    let config = Config::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    let replay_api = ReplayApiService::new_with_config(&config.replay_api)
        .context("Failed to create replay API client")?;
    let replay_repo = ReplayRepositoryImpl::new(replay_api);
    let static_dir = config.server.static_dir.clone();
    let render_settings =
        RenderSettings::new(config.replay_api.root_url.clone()).with_static_dir(&static_dir);

    log::info!("Starting server on {}:{}", config.server.host, config.server.port);

    HttpServer::new(move || {
        App::new()
            .wrap(backend::middleware::Logger)
            .wrap(backend::middleware::cors_middleware())
            .service(backend::health::health_check)
            .configure(|cfg| {
                backend::replay::configure_routes(cfg, replay_repo.clone(), render_settings.clone())
            })
            // The search client is served from the same prefix; the API routes win
            .service(actix_files::Files::new("/replays", static_dir.clone()).index_file("index.html"))
    })
    .workers(config.server.workers)
    .bind((config.server.host.as_str(), config.server.port))
    .with_context(|| format!("Failed to bind {}:{}", config.server.host, config.server.port))?
    .run()
    .await
    .context("Server stopped with an error")
}
