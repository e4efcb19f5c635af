//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs parameters and basic result info.

use std::sync::Arc;
use axum::{extract::{Path, Query, State}, http::StatusCode, Json, response::{IntoResponse, Response}};
use tracing::{info, instrument, warn};

use crate::protocol::*;
use crate::state::AppState;
use crate::logic::*;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(body), fields(pinyin_len = body.pinyin.len(), count = ?body.count))]
pub async fn http_post_align(Json(body): Json<AlignIn>) -> Response {
  match do_align(&body) {
    Ok(out) => {
      info!(target: "reader", strategy = %out.strategy, syllables = out.syllables.len(), "HTTP align served");
      Json(out).into_response()
    }
    Err(e) => {
      warn!(target: "reader", error = %e, "Rejected align request");
      (StatusCode::BAD_REQUEST, Json(ErrorOut { error: e.to_string() })).into_response()
    }
  }
}

#[instrument(level = "info", skip(body), fields(text_len = body.text.len()))]
pub async fn http_post_split(Json(body): Json<SplitIn>) -> impl IntoResponse {
  Json(do_split(&body))
}

#[instrument(level = "info", skip(state, body), fields(reading_level = ?body.level))]
pub async fn http_post_visibility(
  State(state): State<Arc<AppState>>,
  Json(body): Json<VisibilityIn>,
) -> impl IntoResponse {
  Json(do_visibility(&state, &body))
}

#[instrument(level = "info", skip(state, body), fields(chinese = %body.chinese))]
pub async fn http_post_annotate(
  State(state): State<Arc<AppState>>,
  Json(body): Json<AnnotateIn>,
) -> impl IntoResponse {
  let word = do_annotate(&state, &body);
  info!(target: "reader", strategy = %word.strategy, show = word.show_pinyin, derived = word.derived_pinyin, "HTTP annotate served");
  Json(word)
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_chapters(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let list: Vec<ChapterSummary> = state
    .list_chapters()
    .await
    .into_iter()
    .map(|(key, verses)| ChapterSummary::new(key, verses))
    .collect();
  Json(list)
}

#[instrument(level = "info", skip(state), fields(reading_level = ?q.level))]
pub async fn http_get_chapter(
  State(state): State<Arc<AppState>>,
  Path((book, chapter)): Path<(String, u32)>,
  Query(q): Query<ChapterQuery>,
) -> Response {
  match chapter_at_level(&state, &book, chapter, q.level).await {
    Some(annotated) => {
      info!(target: "reader", %book, chapter, reading_level = %annotated.level, verses = annotated.verses.len(), "HTTP chapter served");
      Json(annotated).into_response()
    }
    None => {
      warn!(target: "reader", %book, chapter, "Unknown chapter requested");
      (StatusCode::NOT_FOUND, Json(ErrorOut { error: format!("unknown chapter: {book} {chapter}") })).into_response()
    }
  }
}
