use axum::{
    Router,
    extract::{Json, Path, State},
    http::StatusCode,
    response::Json as ResponseJson,
    routing::get,
};
use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, info, instrument, warn};

use crate::auth::CurrentUser;
use crate::errors::ApiError;
use crate::models::{self, Bookmark, BookmarkDraft};
use crate::{AppState, repositories::BookmarkRepository};

/// Uniform response wrapper: `{success, count?, data}`.
#[derive(Debug, Serialize)]
struct Envelope<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    count: Option<usize>,
    data: T,
}

impl<T> Envelope<T> {
    fn new(data: T) -> Self {
        Self {
            success: true,
            count: None,
            data,
        }
    }
}

impl<T> Envelope<Vec<T>> {
    fn with_count(data: Vec<T>) -> Self {
        Self {
            success: true,
            count: Some(data.len()),
            data,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BookmarkResponse {
    id: i32,
    owner: String,
    title: String,
    description: String,
    content: String,
    url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    published_at: Option<NaiveDateTime>,
    source: SourceResponse,
    created_at: NaiveDateTime,
}

#[derive(Debug, Serialize)]
struct SourceResponse {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
}

impl From<Bookmark> for BookmarkResponse {
    fn from(bookmark: Bookmark) -> Self {
        BookmarkResponse {
            id: bookmark.id,
            owner: bookmark.owner,
            title: bookmark.title,
            description: bookmark.description,
            content: bookmark.content,
            url: bookmark.url,
            image: bookmark.image,
            published_at: bookmark.published_at,
            source: SourceResponse {
                name: bookmark.source_name,
                url: bookmark.source_url,
            },
            created_at: bookmark.created_at,
        }
    }
}

fn ensure_owner(
    bookmark: &Bookmark,
    user: &CurrentUser,
    action: &'static str,
) -> Result<(), ApiError> {
    if bookmark.owner != user.0 {
        warn!(
            id = bookmark.id,
            owner = %bookmark.owner,
            user = %user.0,
            "Ownership check failed"
        );
        return Err(ApiError::Forbidden {
            user: user.0.clone(),
            action,
        });
    }
    Ok(())
}

#[instrument(skip_all, fields(user = %user.0))]
async fn list_bookmarks<S: AppState>(
    user: CurrentUser,
    State(state): State<S>,
) -> Result<ResponseJson<Envelope<Vec<BookmarkResponse>>>, ApiError> {
    debug!("Processing list bookmarks request");

    let bookmarks = state.bookmark_repo().list_by_owner(&user.0).await?;
    let data: Vec<BookmarkResponse> = bookmarks.into_iter().map(Into::into).collect();

    info!(count = data.len(), "Retrieved bookmarks");

    Ok(ResponseJson(Envelope::with_count(data)))
}

#[instrument(skip_all, fields(user = %user.0, has_content = payload.content.is_some()))]
async fn create_bookmark<S: AppState>(
    user: CurrentUser,
    State(state): State<S>,
    Json(payload): Json<BookmarkDraft>,
) -> Result<(StatusCode, ResponseJson<Envelope<BookmarkResponse>>), ApiError> {
    debug!("Processing create bookmark request");

    // The owner is always the authenticated identity, never the payload
    let new_bookmark = models::NewBookmark::new(user.0, payload)?;
    let created = state.bookmark_repo().create(&new_bookmark).await?;

    info!(id = created.id, "Created bookmark");

    Ok((
        StatusCode::CREATED,
        ResponseJson(Envelope::new(created.into())),
    ))
}

#[instrument(skip_all, fields(user = %user.0, id = %id))]
async fn get_bookmark<S: AppState>(
    user: CurrentUser,
    State(state): State<S>,
    Path(id): Path<i32>,
) -> Result<ResponseJson<Envelope<BookmarkResponse>>, ApiError> {
    debug!("Processing get bookmark request");

    let bookmark = state
        .bookmark_repo()
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound(id))?;
    ensure_owner(&bookmark, &user, "access")?;

    info!(id = bookmark.id, "Retrieved bookmark");

    Ok(ResponseJson(Envelope::new(bookmark.into())))
}

#[instrument(skip_all, fields(user = %user.0, id = %id))]
async fn update_bookmark<S: AppState>(
    user: CurrentUser,
    State(state): State<S>,
    Path(id): Path<i32>,
    Json(payload): Json<BookmarkDraft>,
) -> Result<ResponseJson<Envelope<BookmarkResponse>>, ApiError> {
    debug!("Processing update bookmark request");

    let repo = state.bookmark_repo();
    let existing = repo.find_by_id(id).await?.ok_or(ApiError::NotFound(id))?;
    ensure_owner(&existing, &user, "update")?;

    let changes = models::BookmarkChangeset::merge(&existing, payload)?;
    let updated = repo.update(id, &changes).await?;

    info!(id = updated.id, "Updated bookmark");

    Ok(ResponseJson(Envelope::new(updated.into())))
}

#[instrument(skip_all, fields(user = %user.0, id = %id))]
async fn delete_bookmark<S: AppState>(
    user: CurrentUser,
    State(state): State<S>,
    Path(id): Path<i32>,
) -> Result<ResponseJson<Envelope<Value>>, ApiError> {
    debug!("Processing delete bookmark request");

    let repo = state.bookmark_repo();
    let bookmark = repo.find_by_id(id).await?.ok_or(ApiError::NotFound(id))?;
    ensure_owner(&bookmark, &user, "delete")?;

    repo.delete(id).await?;

    info!(id, "Deleted bookmark");

    Ok(ResponseJson(Envelope::new(json!({}))))
}

pub fn create_api_v1_router<S: AppState>() -> Router<S> {
    Router::new()
        .route(
            "/bookmarks",
            get(list_bookmarks::<S>).post(create_bookmark::<S>),
        )
        .route(
            "/bookmarks/{id}",
            get(get_bookmark::<S>)
                .put(update_bookmark::<S>)
                .delete(delete_bookmark::<S>),
        )
}
