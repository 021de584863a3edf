// User API — one handler per wrapper operation.
//
// The wrapper is synchronous (params file I/O, rendering, model scoring),
// so every operation runs on a blocking thread via spawn_blocking.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::web::{api_error, error_response, AppState};

/// Run a blocking wrapper operation off the async runtime and serialize
/// its outcome.
async fn run_wrapper<T, F>(op: F) -> Response
where
    T: Serialize + Send + 'static,
    F: FnOnce() -> crate::error::Result<T> + Send + 'static,
{
    match tokio::task::spawn_blocking(op).await {
        Ok(Ok(value)) => Json(value).into_response(),
        Ok(Err(err)) => error_response(err),
        Err(join_err) => {
            tracing::error!(error = %join_err, "wrapper task failed to complete");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

#[derive(Deserialize)]
pub struct NumKeywordsQuery {
    pub num_keywords: Option<i64>,
}

#[derive(Deserialize)]
pub struct NumDocumentsQuery {
    pub num_documents: Option<i64>,
}

#[derive(Deserialize)]
pub struct RelatedTopicsRequest {
    pub text: String,
    pub max_num_topics: Option<i64>,
}

#[derive(Deserialize)]
pub struct RelatedDocsRequest {
    pub text: String,
    pub num_documents: Option<i64>,
}

#[derive(Deserialize)]
pub struct SummaryRequest {
    pub text: String,
    pub num_sentences: Option<i64>,
}

/// GET /user/api/topics/text — every topic as ranked keywords.
pub async fn topics_text(
    State(state): State<AppState>,
    Query(q): Query<NumKeywordsQuery>,
) -> Response {
    let wrapper = state.wrapper.clone();
    run_wrapper(move || wrapper.topics_as_text(q.num_keywords)).await
}

/// GET /user/api/topics/wordcloud — public locations of the wordcloud
/// image set, rendered on first use.
pub async fn topics_wordcloud(
    State(state): State<AppState>,
    Query(q): Query<NumKeywordsQuery>,
) -> Response {
    let wrapper = state.wrapper.clone();
    run_wrapper(move || wrapper.topics_wordcloud_locations(q.num_keywords)).await
}

/// GET /user/api/topics/{topic_id}/documents — the documents most
/// representative of one topic.
pub async fn topic_documents(
    State(state): State<AppState>,
    Path(topic_id): Path<i64>,
    Query(q): Query<NumDocumentsQuery>,
) -> Response {
    let wrapper = state.wrapper.clone();
    run_wrapper(move || wrapper.most_representative_docs(topic_id, q.num_documents)).await
}

/// POST /user/api/text/related/topics — topic probabilities for a text.
pub async fn text_related_topics(
    State(state): State<AppState>,
    Json(req): Json<RelatedTopicsRequest>,
) -> Response {
    let wrapper = state.wrapper.clone();
    run_wrapper(move || wrapper.text_related_topics(&req.text, req.max_num_topics)).await
}

/// POST /user/api/text/related/documents — corpus documents related to a text.
pub async fn text_related_docs(
    State(state): State<AppState>,
    Json(req): Json<RelatedDocsRequest>,
) -> Response {
    let wrapper = state.wrapper.clone();
    run_wrapper(move || wrapper.text_related_docs(&req.text, req.num_documents)).await
}

/// POST /user/api/text/summary — summarize a text. The response includes
/// the generated_by_model flag.
pub async fn text_summary(
    State(state): State<AppState>,
    Json(req): Json<SummaryRequest>,
) -> Response {
    let wrapper = state.wrapper.clone();
    run_wrapper(move || wrapper.text_summary(&req.text, req.num_sentences)).await
}
