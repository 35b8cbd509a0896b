use std::env;
use dotenv::dotenv;
use serde::Deserialize;
use log::{debug, info, warn};

const DEFAULT_REPLAY_API_URL: &str = "https://clover.weedl.es/~~clodown/api";
const DEFAULT_REPLAY_ROOT_URL: &str = "https://clover.weedl.es";
const DEFAULT_BACKEND_URL: &str = "http://0.0.0.0:9090";

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl Default for Environment {
    fn default() -> Self {
        Environment::Development
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Ok(Environment::Development),
            "test" => Ok(Environment::Test),
            "prod" | "production" => Ok(Environment::Production),
            _ => Err(format!("Unknown environment: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub environment: Environment,
    pub server: ServerConfig,
    pub replay_api: ReplayApiConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    /// Directory holding the compiled search client
    pub static_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReplayApiConfig {
    /// Base of the store API; `/searchreplays` and `/getreplay` are appended
    pub api_url: String,
    /// Site root the rendered replay page loads its player from
    pub root_url: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Config {
    pub(crate) fn parse_backend_url(url: &str) -> (String, u16) {
        // Parse BACKEND_URL like "http://localhost:9090" or "http://127.0.0.1:9090"
        if let Ok(parsed_url) = url::Url::parse(url) {
            let host = parsed_url.host_str().unwrap_or("127.0.0.1").to_string();
            let port = parsed_url.port().unwrap_or(9090);
            (host, port)
        } else {
            ("127.0.0.1".to_string(), 9090)
        }
    }

    pub fn load_env_files() {
        if let Ok(env_file_path) = env::var("ENV_FILE_PATH") {
            if !env_file_path.is_empty() {
                info!("Loading environment from ENV_FILE_PATH: {}", env_file_path);
                if let Err(e) = dotenv::from_filename(&env_file_path) {
                    warn!("Could not read {}: {}", env_file_path, e);
                }
                return;
            }
        }

        // Base .env is optional; .env.<env> overrides it outside development
        if let Err(e) = dotenv() {
            debug!("No .env file loaded: {}", e);
        }
        let env_file = format!(".env.{:?}", Self::environment_from_env()).to_lowercase();
        if env_file != ".env.development" {
            if let Err(e) = dotenv::from_filename(&env_file) {
                debug!("No {} file loaded: {}", env_file, e);
            }
        }
    }

    /// Environment named by `RUST_ENV`, development when unset or unknown.
    pub fn environment_from_env() -> Environment {
        env::var("RUST_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .parse()
            .unwrap_or(Environment::Development)
    }

    /// Log filter used when `LOG_LEVEL` is unset.
    pub fn default_log_level(env: &Environment) -> &'static str {
        match env {
            Environment::Development => "debug",
            Environment::Test | Environment::Production => "info",
        }
    }

    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        Self::load_env_files();

        let environment = Self::environment_from_env();

        info!("Loading configuration for environment: {:?}", environment);

        let config = Config {
            environment: environment.clone(),
            server: Self::load_server_config(&environment),
            replay_api: Self::load_replay_api_config(),
            logging: Self::load_logging_config(&environment),
        };

        config.validate()?;
        config.log_configuration();

        Ok(config)
    }

    fn load_server_config(env: &Environment) -> ServerConfig {
        let backend_url = env::var("BACKEND_URL").unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());
        let (host, port) = Self::parse_backend_url(&backend_url);
        let default_workers = match env {
            Environment::Production => 8,
            Environment::Development | Environment::Test => 1,
        };

        ServerConfig {
            // SERVER_HOST environment variable takes precedence over BACKEND_URL host
            host: env::var("SERVER_HOST").unwrap_or(host),
            port: env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(port),
            workers: env::var("BACKEND_WORKERS")
                .ok()
                .and_then(|w| w.parse().ok())
                .unwrap_or(default_workers),
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "./frontend/dist".to_string()),
        }
    }

    fn load_replay_api_config() -> ReplayApiConfig {
        let api_url = match env::var("REPLAY_API_URL") {
            Ok(url) => url,
            Err(_) => {
                warn!("REPLAY_API_URL not found in environment, using default");
                DEFAULT_REPLAY_API_URL.to_string()
            }
        };

        ReplayApiConfig {
            api_url: api_url.trim_end_matches('/').to_string(),
            root_url: env::var("REPLAY_ROOT_URL")
                .unwrap_or_else(|_| DEFAULT_REPLAY_ROOT_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            timeout_seconds: env::var("REPLAY_API_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(10),
        }
    }

    fn load_logging_config(env: &Environment) -> LoggingConfig {
        LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| Self::default_log_level(env).to_string()),
        }
    }

    pub fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        if self.server.port == 0 {
            return Err("Server port cannot be 0".into());
        }

        if self.replay_api.api_url.is_empty() {
            return Err("Replay API URL cannot be empty".into());
        }

        if url::Url::parse(&self.replay_api.api_url).is_err() {
            return Err(format!("Replay API URL is not absolute: {}", self.replay_api.api_url).into());
        }

        if self.replay_api.timeout_seconds == 0 {
            return Err("Replay API timeout cannot be 0".into());
        }

        Ok(())
    }

    fn log_configuration(&self) {
        info!("Configuration loaded successfully:");
        info!("  Environment: {:?}", self.environment);
        info!("  Server: {}:{} ({} workers)", self.server.host, self.server.port, self.server.workers);
        info!("  Static client: {}", self.server.static_dir);
        info!("  Replay API: {} (timeout {}s)", self.replay_api.api_url, self.replay_api.timeout_seconds);
        info!("  Replay root: {}", self.replay_api.root_url);
        info!("  Log level: {}", self.logging.level);
    }
}
