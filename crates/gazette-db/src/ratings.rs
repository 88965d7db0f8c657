//! Rating mechanics: unconditional like/dislike counters on posts and
//! comments, and the author reputation projection derived from them.

use anyhow::{Result, anyhow};
use rusqlite::params;
use tracing::debug;

use crate::Database;

impl Database {
    pub fn like_post(&self, id: &str) -> Result<i64> {
        self.adjust_rating("posts", id, 1)
    }

    pub fn dislike_post(&self, id: &str) -> Result<i64> {
        self.adjust_rating("posts", id, -1)
    }

    pub fn like_comment(&self, id: &str) -> Result<i64> {
        self.adjust_rating("comments", id, 1)
    }

    pub fn dislike_comment(&self, id: &str) -> Result<i64> {
        self.adjust_rating("comments", id, -1)
    }

    /// Unconditional ±1 on the rating column, returning the new value.
    ///
    /// Repeated calls compound and concurrent callers race
    /// last-write-wins; no voter identity is recorded and no bounds
    /// apply.
    fn adjust_rating(&self, table: &str, id: &str, delta: i64) -> Result<i64> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                &format!("UPDATE {} SET rating = rating + ?1 WHERE id = ?2", table),
                params![delta, id],
            )?;
            if changed == 0 {
                return Err(anyhow!("No row '{}' in {}", id, table));
            }

            conn.query_row(
                &format!("SELECT rating FROM {} WHERE id = ?1", table),
                [id],
                |row| row.get(0),
            )
            .map_err(Into::into)
        })
    }

    /// Recompute the author's cached reputation from current post and
    /// comment state, persist it, and return it.
    ///
    /// Three components:
    /// - the summed rating of the author's posts, weighted x3;
    /// - the summed rating of comments written by the author's user,
    ///   across all posts;
    /// - for each of the author's article posts, the summed rating of
    ///   that post's comments.
    ///
    /// Empty sums count as zero, so a brand-new author lands on 0. The
    /// total can be negative. Nothing calls this automatically on
    /// like/dislike; the caller owns the refresh schedule.
    pub fn recompute_author_rating(&self, author_id: &str) -> Result<i64> {
        self.with_conn(|conn| {
            let user_id: String = conn
                .query_row(
                    "SELECT user_id FROM authors WHERE id = ?1",
                    [author_id],
                    |row| row.get(0),
                )
                .map_err(|_| anyhow!("Author not found: {}", author_id))?;

            let post_score: i64 = conn.query_row(
                "SELECT COALESCE(SUM(rating), 0) FROM posts WHERE author_id = ?1",
                [author_id],
                |row| row.get(0),
            )?;

            let comment_score: i64 = conn.query_row(
                "SELECT COALESCE(SUM(rating), 0) FROM comments WHERE user_id = ?1",
                [&user_id],
                |row| row.get(0),
            )?;

            // Each article post gets its own aggregate over its own comments.
            let mut stmt =
                conn.prepare("SELECT id FROM posts WHERE author_id = ?1 AND kind = 'article'")?;
            let article_ids = stmt
                .query_map([author_id], |row| row.get::<_, String>(0))?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            let mut article_comment_score = 0i64;
            for post_id in &article_ids {
                let sum: i64 = conn.query_row(
                    "SELECT COALESCE(SUM(rating), 0) FROM comments WHERE post_id = ?1",
                    [post_id],
                    |row| row.get(0),
                )?;
                article_comment_score += sum;
            }

            let total = post_score * 3 + comment_score + article_comment_score;
            conn.execute(
                "UPDATE authors SET rating = ?1 WHERE id = ?2",
                params![total, author_id],
            )?;

            debug!(
                "Recomputed rating for author {}: {} (posts {}, comments {}, article comments {})",
                author_id, total, post_score, comment_score, article_comment_score
            );
            Ok(total)
        })
    }
}
