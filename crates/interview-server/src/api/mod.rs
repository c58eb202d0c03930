//! HTTP routes.

pub mod form;
pub mod health;
pub mod interviews;
pub mod openapi;
pub mod schemas;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use interview_attachments::AttachmentBackend;
use interview_core::constants::MAX_ATTACHMENT_BYTES;
use interview_service::InterviewService;
use interview_storage::SqliteInterviewRepository;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use self::openapi::ApiDoc;
use crate::config::ListingConfig;

/// The service as wired by the server binary.
pub type AppService = InterviewService<SqliteInterviewRepository, AttachmentBackend>;

/// Request body ceiling: one maximal attachment plus room for the text
/// fields and multipart framing. Larger images still reach validation up to
/// this limit and get a per-field violation.
const BODY_LIMIT: usize = MAX_ATTACHMENT_BYTES + 1024 * 1024;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AppService>,
    pub listing: ListingConfig,
}

impl AppState {
    pub fn new(service: AppService, listing: ListingConfig) -> Self {
        Self {
            service: Arc::new(service),
            listing,
        }
    }
}

/// Build the application router.
///
/// The OpenAPI document is served at `/api-doc/openapi.json` and browsable
/// under `/swagger-ui`.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/interviews",
            get(interviews::list).post(interviews::create),
        )
        .route(
            "/interviews/{id}",
            get(interviews::get_by_id)
                .put(interviews::update)
                .delete(interviews::delete),
        )
        .route("/search", get(interviews::search))
        .route("/search/email", get(interviews::search_by_email))
        .route("/search/company", get(interviews::search_by_company));

    Router::new()
        .nest("/api/v1", api)
        .route("/health", get(health::health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
