use axum::Router;
use diesel::sqlite::SqliteConnection;
use std::sync::{Arc, Mutex};

pub mod auth;
pub mod errors;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod schema;
pub mod validation;

use auth::{IdentityProvider, StaticTokenAuth};
use repositories::{BookmarkRepository, SqliteBookmarkRepository};

/// Everything a request handler needs: the bookmark store and the
/// authentication collaborator, both injected rather than global.
pub trait AppState: Clone + Send + Sync + 'static {
    type Bookmarks: BookmarkRepository;
    type Auth: IdentityProvider;

    fn bookmark_repo(&self) -> Self::Bookmarks;
    fn identity_provider(&self) -> Self::Auth;
}

#[derive(Clone)]
pub struct DefaultAppState {
    db: Arc<Mutex<SqliteConnection>>,
    auth: StaticTokenAuth,
}

impl DefaultAppState {
    pub fn new(db: Arc<Mutex<SqliteConnection>>, auth: StaticTokenAuth) -> Self {
        Self { db, auth }
    }
}

impl AppState for DefaultAppState {
    type Bookmarks = SqliteBookmarkRepository;
    type Auth = StaticTokenAuth;

    fn bookmark_repo(&self) -> Self::Bookmarks {
        SqliteBookmarkRepository::new(self.db.clone())
    }

    fn identity_provider(&self) -> Self::Auth {
        self.auth.clone()
    }
}

pub fn create_app(state: DefaultAppState) -> Router {
    routes::create_router().with_state(state)
}
