// Web server — the thin axum adapter over the wrapper core.
//
// The adapter extracts arguments from requests, calls into the wrapper on
// a blocking thread, and maps the core's error kinds to status codes:
// parameter validation -> 400, missing topic -> 404, everything else ->
// 500 with an opaque body. Wordcloud images are served from the static
// root at /static.

use std::sync::Arc;

use anyhow::Result;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::error::Error;
use crate::params::ParamsStore;
use crate::wrapper::ModelsWrapper;

pub mod handlers;

/// Shared application state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub wrapper: Arc<ModelsWrapper>,
    pub params: Arc<ParamsStore>,
    pub config: Arc<Config>,
}

/// Start the axum web server and block until it exits.
pub async fn run_server(
    config: Config,
    wrapper: Arc<ModelsWrapper>,
    bind: &str,
    port: u16,
) -> Result<()> {
    let state = AppState {
        wrapper,
        params: Arc::new(ParamsStore::new(&config.params_file)),
        config: Arc::new(config),
    };

    let app = build_router(state);

    let addr = format!("{bind}:{port}");
    info!("gist backend listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let user_api = Router::new()
        .route("/user/api/topics/text", get(handlers::user::topics_text))
        .route(
            "/user/api/topics/wordcloud",
            get(handlers::user::topics_wordcloud),
        )
        .route(
            "/user/api/topics/{topic_id}/documents",
            get(handlers::user::topic_documents),
        )
        .route(
            "/user/api/text/related/topics",
            post(handlers::user::text_related_topics),
        )
        .route(
            "/user/api/text/related/documents",
            post(handlers::user::text_related_docs),
        )
        .route("/user/api/text/summary", post(handlers::user::text_summary));

    let admin_api = Router::new().route(
        "/admin/api/params/{name}",
        get(handlers::admin::get_param).put(handlers::admin::update_param),
    );

    let static_root = state.config.static_root.clone();

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(user_api)
        .merge(admin_api)
        .nest_service("/static", ServeDir::new(static_root))
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::PUT,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> &'static str {
    "gist backend is running"
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "status": "ok",
        "topics": state.wrapper.num_topics(),
        "model_loaded_at": state.wrapper.loaded_at(),
    }))
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (
        status,
        axum::Json(serde_json::json!({ "error": message })),
    )
        .into_response()
}

/// Map a wrapper error to its HTTP response.
pub fn error_response(err: Error) -> Response {
    match &err {
        Error::InvalidParamRange { .. } | Error::InvalidParamMin { .. } => {
            api_error(StatusCode::BAD_REQUEST, &err.to_string())
        }
        Error::TopicNotFound { .. } => api_error(StatusCode::NOT_FOUND, &err.to_string()),
        Error::Internal(e) => {
            tracing::error!(error = %e, "wrapper operation failed");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}
