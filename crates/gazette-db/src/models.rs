//! Row structs mirroring the SQLite tables, kept apart from the
//! gazette-types domain models: the storage layer owns the TEXT-encoded
//! id, kind, and timestamp columns and the parsing out of them.

use anyhow::{Result, anyhow};
use chrono::{DateTime, NaiveDateTime, Utc};
use uuid::Uuid;

use gazette_types::models::{Author, Category, Comment, Post, PostKind, User};

pub struct UserRow {
    pub id: String,
    pub username: String,
    pub created_at: String,
}

pub struct AuthorRow {
    pub id: String,
    pub user_id: String,
    pub rating: i64,
}

pub struct CategoryRow {
    pub id: String,
    pub name: String,
}

pub struct PostRow {
    pub id: String,
    pub author_id: String,
    pub kind: String,
    pub title: String,
    pub body: String,
    pub rating: i64,
    pub created_at: String,
}

pub struct CommentRow {
    pub id: String,
    pub post_id: String,
    pub user_id: String,
    pub body: String,
    pub rating: i64,
    pub created_at: String,
}

impl UserRow {
    pub fn into_user(self) -> Result<User> {
        Ok(User {
            id: parse_id(&self.id)?,
            username: self.username,
            created_at: parse_timestamp(&self.created_at)?,
        })
    }
}

impl AuthorRow {
    pub fn into_author(self) -> Result<Author> {
        Ok(Author {
            id: parse_id(&self.id)?,
            user_id: parse_id(&self.user_id)?,
            rating: self.rating,
        })
    }
}

impl CategoryRow {
    pub fn into_category(self) -> Result<Category> {
        Ok(Category {
            id: parse_id(&self.id)?,
            name: self.name,
        })
    }
}

impl PostRow {
    pub fn into_post(self) -> Result<Post> {
        Ok(Post {
            id: parse_id(&self.id)?,
            author_id: parse_id(&self.author_id)?,
            kind: self.kind.parse::<PostKind>()?,
            title: self.title,
            body: self.body,
            rating: self.rating,
            created_at: parse_timestamp(&self.created_at)?,
        })
    }
}

impl CommentRow {
    pub fn into_comment(self) -> Result<Comment> {
        Ok(Comment {
            id: parse_id(&self.id)?,
            post_id: parse_id(&self.post_id)?,
            user_id: parse_id(&self.user_id)?,
            body: self.body,
            rating: self.rating,
            created_at: parse_timestamp(&self.created_at)?,
        })
    }
}

fn parse_id(raw: &str) -> Result<Uuid> {
    raw.parse()
        .map_err(|e| anyhow!("Corrupt id '{}': {}", raw, e))
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    raw.parse::<DateTime<Utc>>()
        .or_else(|_| {
            // SQLite's datetime('now') is "YYYY-MM-DD HH:MM:SS" with no
            // timezone suffix; parse as naive and interpret as UTC.
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .map_err(|e| anyhow!("Corrupt timestamp '{}': {}", raw, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sqlite_default_timestamps() {
        let ts = parse_timestamp("2026-08-06 11:02:45").unwrap();
        assert_eq!(ts.to_rfc3339(), "2026-08-06T11:02:45+00:00");
    }

    #[test]
    fn rejects_garbage_timestamps() {
        assert!(parse_timestamp("last tuesday").is_err());
    }
}
