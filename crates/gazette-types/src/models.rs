use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Characters of post body shown by [`Post::preview`].
pub const PREVIEW_CHARS: usize = 124;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// Publishing identity wrapping a [`User`] one-to-one.
///
/// `rating` is a cached projection over post and comment ratings. Nothing
/// refreshes it automatically; callers decide when to recompute it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    pub id: Uuid,
    pub user_id: Uuid,
    pub rating: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
}

/// The two publishable kinds. Stored as TEXT (`"news"` / `"article"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostKind {
    News,
    Article,
}

impl PostKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostKind::News => "news",
            PostKind::Article => "article",
        }
    }
}

impl fmt::Display for PostKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown post kind '{0}', expected 'news' or 'article'")]
pub struct UnknownPostKind(String);

impl FromStr for PostKind {
    type Err = UnknownPostKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "news" => Ok(PostKind::News),
            "article" => Ok(PostKind::Article),
            other => Err(UnknownPostKind(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub kind: PostKind,
    pub title: String,
    pub body: String,
    pub rating: i64,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// First [`PREVIEW_CHARS`] characters of the body plus a literal `...`.
    ///
    /// Character-based, since bodies are routinely Cyrillic. Cuts mid-word,
    /// and the suffix is appended even when the body is shorter than the
    /// limit.
    pub fn preview(&self) -> String {
        let head: String = self.body.chars().take(PREVIEW_CHARS).collect();
        format!("{head}...")
    }
}

/// Explicit post/category join record. Carries its own id so per-pair
/// metadata can be added later without reshaping the association.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostCategory {
    pub id: Uuid,
    pub post_id: Uuid,
    pub category_id: Uuid,
}

/// A reply to a post. Any user may comment, not only authors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub body: String,
    pub rating: i64,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post_with_body(body: &str) -> Post {
        Post {
            id: Uuid::new_v4(),
            author_id: Uuid::new_v4(),
            kind: PostKind::Article,
            title: "t".into(),
            body: body.into(),
            rating: 0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn preview_truncates_long_bodies() {
        let body = "я".repeat(300);
        let preview = post_with_body(&body).preview();
        assert_eq!(preview.chars().count(), PREVIEW_CHARS + 3);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn preview_appends_suffix_to_short_bodies() {
        let preview = post_with_body("короткий текст").preview();
        assert_eq!(preview, "короткий текст...");
    }

    #[test]
    fn kind_round_trips_through_text() {
        assert_eq!("news".parse::<PostKind>().unwrap(), PostKind::News);
        assert_eq!("article".parse::<PostKind>().unwrap(), PostKind::Article);
        assert_eq!(PostKind::Article.as_str(), "article");
        assert!("essay".parse::<PostKind>().is_err());
    }
}
