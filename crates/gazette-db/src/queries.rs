use anyhow::{Result, anyhow};
use rusqlite::{Connection, OptionalExtension};

use gazette_types::models::{Author, Category, Comment, Post, PostKind, User};

use crate::Database;
use crate::models::{AuthorRow, CategoryRow, CommentRow, PostRow, UserRow};

impl Database {
    // -- Users --

    pub fn create_user(&self, id: &str, username: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (id, username) VALUES (?1, ?2)",
                (id, username),
            )?;
            Ok(())
        })
    }

    pub fn get_user(&self, id: &str) -> Result<Option<User>> {
        self.with_conn(|conn| query_user(conn, "id", id))
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.with_conn(|conn| query_user(conn, "username", username))
    }

    // -- Authors --

    pub fn create_author(&self, id: &str, user_id: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO authors (id, user_id) VALUES (?1, ?2)",
                (id, user_id),
            )?;
            Ok(())
        })
    }

    pub fn get_author(&self, id: &str) -> Result<Option<Author>> {
        self.with_conn(|conn| query_author(conn, "id", id))
    }

    pub fn get_author_by_user(&self, user_id: &str) -> Result<Option<Author>> {
        self.with_conn(|conn| query_author(conn, "user_id", user_id))
    }

    // -- Categories --

    pub fn create_category(&self, id: &str, name: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO categories (id, name) VALUES (?1, ?2)",
                (id, name),
            )?;
            Ok(())
        })
    }

    pub fn get_category_by_name(&self, name: &str) -> Result<Option<Category>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT id, name FROM categories WHERE name = ?1",
                    [name],
                    |row| {
                        Ok(CategoryRow {
                            id: row.get(0)?,
                            name: row.get(1)?,
                        })
                    },
                )
                .optional()?;

            row.map(CategoryRow::into_category).transpose()
        })
    }

    // -- Posts --

    pub fn create_post(
        &self,
        id: &str,
        author_id: &str,
        kind: PostKind,
        title: &str,
        body: &str,
    ) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO posts (id, author_id, kind, title, body) VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![id, author_id, kind.as_str(), title, body],
            )?;
            Ok(())
        })
    }

    pub fn get_post(&self, id: &str) -> Result<Option<Post>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT id, author_id, kind, title, body, rating, created_at
                     FROM posts WHERE id = ?1",
                    [id],
                    post_row,
                )
                .optional()?;

            row.map(PostRow::into_post).transpose()
        })
    }

    pub fn list_posts_by_author(&self, author_id: &str) -> Result<Vec<Post>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, author_id, kind, title, body, rating, created_at
                 FROM posts WHERE author_id = ?1
                 ORDER BY created_at",
            )?;

            let rows = stmt
                .query_map([author_id], post_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            rows.into_iter().map(PostRow::into_post).collect()
        })
    }

    /// Insert the explicit post/category join record. A duplicate pair is
    /// rejected by the schema's UNIQUE constraint.
    pub fn tag_post(&self, id: &str, post_id: &str, category_id: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO post_categories (id, post_id, category_id) VALUES (?1, ?2, ?3)",
                (id, post_id, category_id),
            )?;
            Ok(())
        })
    }

    pub fn list_categories_for_post(&self, post_id: &str) -> Result<Vec<Category>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT c.id, c.name
                 FROM categories c
                 JOIN post_categories pc ON pc.category_id = c.id
                 WHERE pc.post_id = ?1
                 ORDER BY c.name",
            )?;

            let rows = stmt
                .query_map([post_id], |row| {
                    Ok(CategoryRow {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            rows.into_iter().map(CategoryRow::into_category).collect()
        })
    }

    // -- Comments --

    pub fn create_comment(&self, id: &str, post_id: &str, user_id: &str, body: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO comments (id, post_id, user_id, body) VALUES (?1, ?2, ?3, ?4)",
                (id, post_id, user_id, body),
            )?;
            Ok(())
        })
    }

    pub fn get_comment(&self, id: &str) -> Result<Option<Comment>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT id, post_id, user_id, body, rating, created_at
                     FROM comments WHERE id = ?1",
                    [id],
                    comment_row,
                )
                .optional()?;

            row.map(CommentRow::into_comment).transpose()
        })
    }

    pub fn list_comments_for_post(&self, post_id: &str) -> Result<Vec<Comment>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, post_id, user_id, body, rating, created_at
                 FROM comments WHERE post_id = ?1
                 ORDER BY created_at",
            )?;

            let rows = stmt
                .query_map([post_id], comment_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            rows.into_iter().map(CommentRow::into_comment).collect()
        })
    }

    pub fn get_username_by_id(&self, id: &str) -> Result<String> {
        self.with_conn(|conn| {
            conn.query_row("SELECT username FROM users WHERE id = ?1", [id], |row| {
                row.get(0)
            })
            .map_err(|_| anyhow!("User not found: {}", id))
        })
    }
}

fn query_user(conn: &Connection, column: &str, value: &str) -> Result<Option<User>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT id, username, created_at FROM users WHERE {} = ?1",
        column
    ))?;

    let row = stmt
        .query_row([value], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                username: row.get(1)?,
                created_at: row.get(2)?,
            })
        })
        .optional()?;

    row.map(UserRow::into_user).transpose()
}

fn query_author(conn: &Connection, column: &str, value: &str) -> Result<Option<Author>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT id, user_id, rating FROM authors WHERE {} = ?1",
        column
    ))?;

    let row = stmt
        .query_row([value], |row| {
            Ok(AuthorRow {
                id: row.get(0)?,
                user_id: row.get(1)?,
                rating: row.get(2)?,
            })
        })
        .optional()?;

    row.map(AuthorRow::into_author).transpose()
}

fn post_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PostRow> {
    Ok(PostRow {
        id: row.get(0)?,
        author_id: row.get(1)?,
        kind: row.get(2)?,
        title: row.get(3)?,
        body: row.get(4)?,
        rating: row.get(5)?,
        created_at: row.get(6)?,
    })
}

fn comment_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<CommentRow> {
    Ok(CommentRow {
        id: row.get(0)?,
        post_id: row.get(1)?,
        user_id: row.get(2)?,
        body: row.get(3)?,
        rating: row.get(4)?,
        created_at: row.get(5)?,
    })
}

#[cfg(test)]
mod tests {
    use gazette_types::models::PostKind;
    use uuid::Uuid;

    use crate::Database;

    fn id() -> String {
        Uuid::new_v4().to_string()
    }

    #[test]
    fn user_and_author_round_trip() {
        let db = Database::open_in_memory().unwrap();

        let user_id = id();
        let author_id = id();
        db.create_user(&user_id, "ivan").unwrap();
        db.create_author(&author_id, &user_id).unwrap();

        let user = db.get_user_by_username("ivan").unwrap().unwrap();
        assert_eq!(user.id.to_string(), user_id);

        let author = db.get_author_by_user(&user_id).unwrap().unwrap();
        assert_eq!(author.id.to_string(), author_id);
        assert_eq!(author.rating, 0);

        assert!(db.get_user("not-an-id").unwrap().is_none());
    }

    #[test]
    fn duplicate_usernames_are_rejected() {
        let db = Database::open_in_memory().unwrap();

        db.create_user(&id(), "ivan").unwrap();
        assert!(db.create_user(&id(), "ivan").is_err());
    }

    #[test]
    fn duplicate_category_names_are_rejected() {
        let db = Database::open_in_memory().unwrap();

        db.create_category(&id(), "sport").unwrap();
        assert!(db.create_category(&id(), "sport").is_err());

        let category = db.get_category_by_name("sport").unwrap().unwrap();
        assert_eq!(category.name, "sport");
    }

    #[test]
    fn posts_round_trip_with_kind() {
        let db = Database::open_in_memory().unwrap();

        let user_id = id();
        let author_id = id();
        db.create_user(&user_id, "ivan").unwrap();
        db.create_author(&author_id, &user_id).unwrap();

        let post_id = id();
        db.create_post(&post_id, &author_id, PostKind::News, "Заголовок", "Текст новости")
            .unwrap();

        let post = db.get_post(&post_id).unwrap().unwrap();
        assert_eq!(post.kind, PostKind::News);
        assert_eq!(post.title, "Заголовок");
        assert_eq!(post.rating, 0);

        let posts = db.list_posts_by_author(&author_id).unwrap();
        assert_eq!(posts.len(), 1);
    }

    #[test]
    fn tagging_a_post_twice_with_the_same_category_fails() {
        let db = Database::open_in_memory().unwrap();

        let user_id = id();
        let author_id = id();
        db.create_user(&user_id, "ivan").unwrap();
        db.create_author(&author_id, &user_id).unwrap();

        let post_id = id();
        db.create_post(&post_id, &author_id, PostKind::Article, "t", "b")
            .unwrap();

        let sport = id();
        let politics = id();
        db.create_category(&sport, "sport").unwrap();
        db.create_category(&politics, "politics").unwrap();

        db.tag_post(&id(), &post_id, &sport).unwrap();
        db.tag_post(&id(), &post_id, &politics).unwrap();
        assert!(db.tag_post(&id(), &post_id, &sport).is_err());

        let categories = db.list_categories_for_post(&post_id).unwrap();
        let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["politics", "sport"]);
    }

    #[test]
    fn comments_attach_to_posts() {
        let db = Database::open_in_memory().unwrap();

        let user_id = id();
        let author_id = id();
        db.create_user(&user_id, "ivan").unwrap();
        db.create_author(&author_id, &user_id).unwrap();

        let reader_id = id();
        db.create_user(&reader_id, "olga").unwrap();

        let post_id = id();
        db.create_post(&post_id, &author_id, PostKind::Article, "t", "b")
            .unwrap();

        let comment_id = id();
        db.create_comment(&comment_id, &post_id, &reader_id, "неплохо")
            .unwrap();

        let comment = db.get_comment(&comment_id).unwrap().unwrap();
        assert_eq!(comment.body, "неплохо");
        assert_eq!(comment.rating, 0);

        assert_eq!(db.list_comments_for_post(&post_id).unwrap().len(), 1);
        assert_eq!(db.get_username_by_id(&reader_id).unwrap(), "olga");
    }

    #[test]
    fn comments_require_an_existing_post() {
        let db = Database::open_in_memory().unwrap();

        let user_id = id();
        db.create_user(&user_id, "ivan").unwrap();

        assert!(db.create_comment(&id(), &id(), &user_id, "text").is_err());
    }
}
