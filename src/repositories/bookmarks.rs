use super::traits::BookmarkRepository;
use crate::errors::ApiError;
use crate::models::{Bookmark, BookmarkChangeset, NewBookmark};
use crate::schema::bookmarks;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct SqliteBookmarkRepository {
    db: Arc<Mutex<SqliteConnection>>,
}

impl SqliteBookmarkRepository {
    pub fn new(db: Arc<Mutex<SqliteConnection>>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BookmarkRepository for SqliteBookmarkRepository {
    async fn list_by_owner(&self, owner: &str) -> Result<Vec<Bookmark>, ApiError> {
        let mut conn = self.db.lock().unwrap();
        let result = bookmarks::table
            .filter(bookmarks::owner.eq(owner))
            .order(bookmarks::created_at.desc())
            .load::<Bookmark>(&mut *conn)?;
        Ok(result)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Bookmark>, ApiError> {
        let mut conn = self.db.lock().unwrap();
        let result = bookmarks::table
            .find(id)
            .first::<Bookmark>(&mut *conn)
            .optional()?;
        Ok(result)
    }

    async fn create(&self, bookmark: &NewBookmark) -> Result<Bookmark, ApiError> {
        let mut conn = self.db.lock().unwrap();
        let result = diesel::insert_into(bookmarks::table)
            .values(bookmark)
            .returning(bookmarks::all_columns)
            .get_result::<Bookmark>(&mut *conn)?;
        Ok(result)
    }

    async fn update(&self, id: i32, changes: &BookmarkChangeset) -> Result<Bookmark, ApiError> {
        let mut conn = self.db.lock().unwrap();
        let result = diesel::update(bookmarks::table.find(id))
            .set(changes)
            .returning(bookmarks::all_columns)
            .get_result::<Bookmark>(&mut *conn)?;
        Ok(result)
    }

    async fn delete(&self, id: i32) -> Result<(), ApiError> {
        let mut conn = self.db.lock().unwrap();
        diesel::delete(bookmarks::table.find(id)).execute(&mut *conn)?;
        Ok(())
    }
}
