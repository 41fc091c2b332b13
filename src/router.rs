use axum::{
    Router,
    extract::FromRef,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::db::{LikeStorage, ProgressStorage, SqlitePool, UserStorage, VideoStorage};
use crate::handlers::{auth, progress, utils, videos};
use crate::service::{AuthService, CatalogService, ProgressService, TokenSigner};

#[derive(Clone)]
pub struct StudyState {
    pub auth: AuthService,
    pub catalog: CatalogService,
    pub progress: ProgressService,
}

impl StudyState {
    pub fn new(pool: SqlitePool, signer: TokenSigner) -> Self {
        let videos = VideoStorage::new(pool.clone());
        Self {
            auth: AuthService::new(UserStorage::new(pool.clone()), signer),
            catalog: CatalogService::new(videos.clone(), LikeStorage::new(pool.clone())),
            progress: ProgressService::new(ProgressStorage::new(pool), videos),
        }
    }
}

impl FromRef<StudyState> for AuthService {
    fn from_ref(state: &StudyState) -> Self {
        state.auth.clone()
    }
}

pub fn study_router(state: StudyState) -> Router {
    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/me", get(auth::me));

    let video_routes = Router::new()
        .route("/", get(videos::list_videos))
        .route("/{id}", get(videos::get_video))
        .route(
            "/{id}/like",
            post(videos::toggle_like).get(videos::like_status),
        );

    let progress_routes = Router::new()
        .route(
            "/",
            post(progress::save_progress).get(progress::all_progress),
        )
        .route("/completion", get(progress::completion))
        .route("/{video_id}", get(progress::get_progress));

    let util_routes = Router::new().route("/bitrate", post(utils::bitrate));

    // collection routes also answer with a trailing slash
    let api = Router::new()
        .route("/videos/", get(videos::list_videos))
        .route(
            "/progress/",
            post(progress::save_progress).get(progress::all_progress),
        )
        .nest("/auth", auth_routes)
        .nest("/videos", video_routes)
        .nest("/progress", progress_routes)
        .nest("/utils", util_routes);

    Router::new()
        .route("/health", get(utils::health))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
