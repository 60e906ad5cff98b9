use super::{CommentRepository, NewsRepository, Storage, UserRepository};
use crate::error::{AppError, Result};
use crate::models::{Comment, CommentView, NewNews, News, User};
use async_trait::async_trait;
use sqlx::migrate::Migrator;
use sqlx::PgPool;
use uuid::Uuid;

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// PostgreSQL-backed repositories
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply embedded schema migrations
    pub async fn migrate(&self) -> Result<()> {
        MIGRATOR
            .run(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("migration failed: {}", e)))?;
        tracing::info!("Database migrations completed successfully");
        Ok(())
    }
}

#[async_trait]
impl NewsRepository for PgStore {
    async fn create_news(&self, news: NewNews) -> Result<News> {
        let created = sqlx::query_as::<_, News>(
            r#"
            INSERT INTO news (id, title, text, date)
            VALUES ($1, $2, $3, COALESCE($4, CURRENT_DATE))
            RETURNING id, title, text, date, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&news.title)
        .bind(&news.text)
        .bind(news.date)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn get_news(&self, news_id: Uuid) -> Result<Option<News>> {
        let news = sqlx::query_as::<_, News>(
            r#"
            SELECT id, title, text, date, created_at
            FROM news
            WHERE id = $1
            "#,
        )
        .bind(news_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(news)
    }

    async fn latest_news(&self, limit: usize) -> Result<Vec<News>> {
        let news = sqlx::query_as::<_, News>(
            r#"
            SELECT id, title, text, date, created_at
            FROM news
            ORDER BY date DESC, created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(news)
    }

    async fn delete_news(&self, news_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM news WHERE id = $1")
            .bind(news_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl CommentRepository for PgStore {
    async fn create_comment(&self, news_id: Uuid, author_id: Uuid, text: &str) -> Result<Comment> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (id, news_id, author_id, text)
            VALUES ($1, $2, $3, $4)
            RETURNING id, news_id, author_id, text, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(news_id)
        .bind(author_id)
        .bind(text)
        .fetch_one(&self.pool)
        .await?;

        Ok(comment)
    }

    async fn get_comment(&self, comment_id: Uuid) -> Result<Option<Comment>> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, news_id, author_id, text, created_at
            FROM comments
            WHERE id = $1
            "#,
        )
        .bind(comment_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(comment)
    }

    async fn comments_for_news(&self, news_id: Uuid) -> Result<Vec<CommentView>> {
        let comments = sqlx::query_as::<_, CommentView>(
            r#"
            SELECT c.id, c.news_id, c.author_id, u.username AS author, c.text, c.created_at
            FROM comments c
            JOIN users u ON u.id = c.author_id
            WHERE c.news_id = $1
            ORDER BY c.created_at ASC
            "#,
        )
        .bind(news_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    async fn update_comment(
        &self,
        comment_id: Uuid,
        author_id: Uuid,
        text: &str,
    ) -> Result<Option<Comment>> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            UPDATE comments
            SET text = $3
            WHERE id = $1 AND author_id = $2
            RETURNING id, news_id, author_id, text, created_at
            "#,
        )
        .bind(comment_id)
        .bind(author_id)
        .bind(text)
        .fetch_optional(&self.pool)
        .await?;

        Ok(comment)
    }

    async fn delete_comment(&self, comment_id: Uuid, author_id: Uuid) -> Result<Option<Comment>> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            DELETE FROM comments
            WHERE id = $1 AND author_id = $2
            RETURNING id, news_id, author_id, text, created_at
            "#,
        )
        .bind(comment_id)
        .bind(author_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(comment)
    }

    async fn count_comments(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl UserRepository for PgStore {
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User> {
        let result = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, password_hash, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
                AppError::Conflict(format!("username '{}' is already taken", username)),
            ),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn get_user(&self, user_id: Uuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

#[async_trait]
impl Storage for PgStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
