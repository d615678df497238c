use async_trait::async_trait;

use crate::errors::ApiError;
use crate::models::{Bookmark, BookmarkChangeset, NewBookmark};

/// Document-store access for the bookmark collection. Each method maps to
/// a single-record operation with the backing store's own atomicity.
#[async_trait]
pub trait BookmarkRepository: Clone + Send + Sync + 'static {
    async fn list_by_owner(&self, owner: &str) -> Result<Vec<Bookmark>, ApiError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Bookmark>, ApiError>;
    async fn create(&self, bookmark: &NewBookmark) -> Result<Bookmark, ApiError>;
    async fn update(&self, id: i32, changes: &BookmarkChangeset) -> Result<Bookmark, ApiError>;
    async fn delete(&self, id: i32) -> Result<(), ApiError>;
}
