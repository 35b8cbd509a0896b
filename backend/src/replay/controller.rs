use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use actix_files::NamedFile;
use actix_web::http::header::ContentType;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use shared::{parse_replay_id, ReplayDetail, SharedError};

use crate::error::ApiError;
use crate::replay::query::search_params_from_query;
use crate::replay::render::{render_replay_page, ReplayPage};
use crate::replay::repository::ReplayRepository;

/// What the replay page route needs besides the repository.
#[derive(Debug, Clone)]
pub struct RenderSettings {
    /// Site root the rendered page loads its player from
    pub root_url: String,
    /// Compiled search client; its top-level files win over replay ids
    pub static_dir: Option<PathBuf>,
}

impl RenderSettings {
    pub fn new(root_url: impl Into<String>) -> Self {
        Self {
            root_url: root_url.into(),
            static_dir: None,
        }
    }

    pub fn with_static_dir(mut self, static_dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(static_dir.into());
        self
    }

    /// The file called `name` directly inside the static directory, if any.
    pub fn static_file(&self, name: &str) -> Option<PathBuf> {
        let static_dir = self.static_dir.as_ref()?;
        if Path::new(name).file_name() != Some(OsStr::new(name)) {
            return None;
        }
        let path = static_dir.join(name);
        path.is_file().then_some(path)
    }
}

async fn lookup<R>(raw_id: &str, repo: &R) -> Result<ReplayDetail, SharedError>
where
    R: ReplayRepository + ?Sized,
{
    let replay_id = parse_replay_id(raw_id)?;
    repo.find_by_id(&replay_id.id, replay_id.password.as_deref())
        .await
        .ok_or_else(|| SharedError::NotFound("replay".to_string()))
}

/// Same status and message as the JSON error, as a plain text body.
fn text_error(err: SharedError) -> HttpResponse {
    let err = ApiError::from(err);
    HttpResponse::build(err.status()).body(err.message)
}

pub async fn search_replays_handler_impl<R>(req: HttpRequest, repo: web::Data<R>) -> impl Responder
where
    R: ReplayRepository + 'static,
{
    let params = search_params_from_query(req.query_string());
    let replays = repo.search(&params).await;
    HttpResponse::Ok().json(replays)
}

pub async fn get_replay_json_handler_impl<R>(
    path: web::Path<String>,
    repo: web::Data<R>,
) -> Result<HttpResponse, ApiError>
where
    R: ReplayRepository + 'static,
{
    let replay = lookup(&path.into_inner(), repo.get_ref()).await?;
    Ok(HttpResponse::Ok().json(replay))
}

pub async fn get_replay_log_handler_impl<R>(path: web::Path<String>, repo: web::Data<R>) -> impl Responder
where
    R: ReplayRepository + 'static,
{
    match lookup(&path.into_inner(), repo.get_ref()).await {
        Ok(replay) => HttpResponse::Ok()
            .content_type(ContentType::plaintext())
            .body(replay.log),
        Err(e) => text_error(e),
    }
}

pub async fn get_replay_page_handler_impl<R>(
    req: HttpRequest,
    path: web::Path<String>,
    repo: web::Data<R>,
    settings: web::Data<RenderSettings>,
) -> HttpResponse
where
    R: ReplayRepository + 'static,
{
    let raw_id = path.into_inner();
    if let Some(file) = settings.static_file(&raw_id) {
        return match NamedFile::open_async(&file).await {
            Ok(file) => file.into_response(&req),
            Err(e) => {
                log::error!("Failed to open static file {}: {}", file.display(), e);
                HttpResponse::InternalServerError().finish()
            }
        };
    }

    match lookup(&raw_id, repo.get_ref()).await {
        Ok(replay) => {
            let page = ReplayPage::new(&settings.root_url, &replay);
            HttpResponse::Ok()
                .content_type(ContentType::html())
                .body(render_replay_page(&page))
        }
        Err(e) => text_error(e),
    }
}

/// Registers the `/replays` routes backed by `repo`.
///
/// The routes are plain resources rather than a scope so that paths they do
/// not match fall through to the static client mounted on the same prefix.
/// `search.json` comes first so it is never read as a replay id, and the
/// suffix routes come before the bare id.
pub fn configure_routes<R>(cfg: &mut web::ServiceConfig, repo: R, settings: RenderSettings)
where
    R: ReplayRepository + 'static,
{
    cfg.app_data(web::Data::new(repo))
        .app_data(web::Data::new(settings))
        .route("/replays/search.json", web::get().to(search_replays_handler_impl::<R>))
        .route("/replays/{replay_id:[^/]*}.json", web::get().to(get_replay_json_handler_impl::<R>))
        .route("/replays/{replay_id:[^/]*}.log", web::get().to(get_replay_log_handler_impl::<R>))
        .route("/replays/{replay_id}", web::get().to(get_replay_page_handler_impl::<R>));
}
