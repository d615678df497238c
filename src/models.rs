use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::Deserialize;

use crate::validation::{self, ValidationError};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::bookmarks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Bookmark {
    pub id: i32,
    pub owner: String,
    pub title: String,
    pub description: String,
    pub content: String,
    pub url: String,
    pub image: Option<String>,
    pub published_at: Option<NaiveDateTime>,
    pub source_name: String,
    pub source_url: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Bookmark fields as sent by clients. Create and update accept the same
/// body shape; required-field checks happen when the draft is turned into
/// a [`NewBookmark`] or [`BookmarkChangeset`].
///
/// There is deliberately no owner field here: the owner always comes from
/// the authenticated identity, and unknown body fields are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookmarkDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub url: Option<String>,
    pub image: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub source: Option<SourceDraft>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SourceDraft {
    pub name: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::bookmarks)]
pub struct NewBookmark {
    pub owner: String,
    pub title: String,
    pub description: String,
    pub content: String,
    pub url: String,
    pub image: Option<String>,
    pub published_at: Option<NaiveDateTime>,
    pub source_name: String,
    pub source_url: Option<String>,
}

impl NewBookmark {
    pub fn new(owner: String, draft: BookmarkDraft) -> Result<Self, ValidationError> {
        let title = validation::required_trimmed("title", draft.title)?;
        let description = validation::required_text("description", draft.description)?;

        let url = validation::required_text("URL", draft.url)?;
        validation::validate_url("url", &url)?;

        let source = draft.source.unwrap_or_default();
        let source_name = validation::required_text("source name", source.name)?;
        if let Some(ref source_url) = source.url {
            validation::validate_url("source url", source_url)?;
        }

        // content falls back to the description as it stands at creation
        // time; it is never re-derived afterwards
        let content = draft.content.unwrap_or_else(|| description.clone());

        Ok(NewBookmark {
            owner,
            title,
            description,
            content,
            url,
            image: draft.image,
            published_at: draft.published_at.map(|dt| dt.naive_utc()),
            source_name,
            source_url: source.url,
        })
    }
}

/// The merged result of a partial update over a stored bookmark.
///
/// Covers every client-writable column, so persisting it rewrites the full
/// row; id, owner and created_at are absent and therefore immutable.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::bookmarks)]
#[diesel(treat_none_as_null = true)]
pub struct BookmarkChangeset {
    pub title: String,
    pub description: String,
    pub content: String,
    pub url: String,
    pub image: Option<String>,
    pub published_at: Option<NaiveDateTime>,
    pub source_name: String,
    pub source_url: Option<String>,
}

impl BookmarkChangeset {
    /// Merges a draft over an existing record, validating every field the
    /// draft supplies. Omitted fields keep their stored values; a supplied
    /// source replaces the stored name/url pair wholesale.
    pub fn merge(existing: &Bookmark, draft: BookmarkDraft) -> Result<Self, ValidationError> {
        let title = match draft.title {
            Some(title) => validation::required_trimmed("title", Some(title))?,
            None => existing.title.clone(),
        };

        let description = match draft.description {
            Some(description) => validation::required_text("description", Some(description))?,
            None => existing.description.clone(),
        };

        let url = match draft.url {
            Some(url) => {
                validation::validate_url("url", &url)?;
                url
            }
            None => existing.url.clone(),
        };

        let (source_name, source_url) = match draft.source {
            Some(source) => {
                let name = validation::required_text("source name", source.name)?;
                if let Some(ref source_url) = source.url {
                    validation::validate_url("source url", source_url)?;
                }
                (name, source.url)
            }
            None => (existing.source_name.clone(), existing.source_url.clone()),
        };

        Ok(BookmarkChangeset {
            title,
            description,
            content: draft.content.unwrap_or_else(|| existing.content.clone()),
            url,
            image: draft.image.or_else(|| existing.image.clone()),
            published_at: draft
                .published_at
                .map(|dt| dt.naive_utc())
                .or(existing.published_at),
            source_name,
            source_url,
        })
    }
}
