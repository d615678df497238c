use diesel::{Connection, sqlite::SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use shelfmark::auth::StaticTokenAuth;
use std::collections::HashMap;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

pub fn establish_test_connection() -> SqliteConnection {
    let mut connection =
        SqliteConnection::establish(":memory:").expect("Failed to create in-memory database");

    connection
        .run_pending_migrations(MIGRATIONS)
        .expect("Failed to run migrations");

    connection
}

pub fn test_identity_provider() -> StaticTokenAuth {
    StaticTokenAuth::new(HashMap::from([
        ("alice-token".to_string(), "alice".to_string()),
        ("bob-token".to_string(), "bob".to_string()),
    ]))
}

pub mod test_utils {
    use super::*;
    use diesel::prelude::*;
    use shelfmark::models::Bookmark;
    use shelfmark::schema::bookmarks;

    pub fn count_bookmarks(conn: &mut SqliteConnection) -> i64 {
        bookmarks::table
            .count()
            .get_result(conn)
            .expect("Failed to count bookmarks")
    }

    pub fn get_all_bookmarks(conn: &mut SqliteConnection) -> Vec<Bookmark> {
        bookmarks::table
            .load::<Bookmark>(conn)
            .expect("Failed to load bookmarks")
    }

    pub fn get_bookmark_by_id(conn: &mut SqliteConnection, id: i32) -> Option<Bookmark> {
        bookmarks::table
            .find(id)
            .first::<Bookmark>(conn)
            .optional()
            .expect("Failed to query bookmark by id")
    }
}

pub mod server_utils {
    use super::*;
    use axum_test::TestServer;
    use shelfmark::{DefaultAppState, routes};
    use std::sync::{Arc, Mutex};

    pub fn create_test_server() -> (TestServer, Arc<Mutex<SqliteConnection>>) {
        let connection = establish_test_connection();
        let db = Arc::new(Mutex::new(connection));

        let state = DefaultAppState::new(db.clone(), test_identity_provider());
        let app = routes::create_router().with_state(state);

        let server = TestServer::new(app).unwrap();
        (server, db)
    }
}
