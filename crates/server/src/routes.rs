use axum::{
    routing::{get, post},
    Json, Router,
};
use common::{backend::BackendClient, types::Health};
use service::submission::SubmissionService;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

pub mod backend;
pub mod frontend;
pub mod standalone;

/// State of deployments that own the submission store.
#[derive(Clone)]
pub struct StoreState {
    pub submissions: SubmissionService,
}

/// State of the frontend deployment; it reaches the store only through the backend.
#[derive(Clone)]
pub struct FrontendState {
    pub backend: BackendClient,
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Backend: `POST /submit`, `GET /view` (JSON).
pub fn build_backend_router(state: StoreState, cors: CorsLayer) -> Router {
    let router = Router::new()
        .route("/submit", post(backend::submit))
        .route("/view", get(backend::view))
        .route("/health", get(health))
        .with_state(state);
    with_layers(router, cors)
}

/// Frontend: `GET /`, `POST /submit` and `GET /get_data`, proxied to the backend.
pub fn build_frontend_router(state: FrontendState, cors: CorsLayer) -> Router {
    let router = Router::new()
        .route("/", get(frontend::home))
        .route("/submit", post(frontend::submit))
        .route("/get_data", get(frontend::get_data))
        .route("/health", get(health))
        .with_state(state);
    with_layers(router, cors)
}

/// Standalone: pages plus direct store access, no proxy hop.
pub fn build_standalone_router(state: StoreState, cors: CorsLayer) -> Router {
    let router = Router::new()
        .route("/", get(standalone::home))
        .route("/submit", post(backend::submit))
        .route("/view", get(standalone::view))
        .route("/health", get(health))
        .with_state(state);
    with_layers(router, cors)
}

fn with_layers(router: Router, cors: CorsLayer) -> Router {
    router.layer(cors).layer(
        TraceLayer::new_for_http()
            // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            // 响应返回时打点，包含状态码与耗时
            .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
            // 失败（5xx 等）时以 ERROR 记录
            .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
    )
}
