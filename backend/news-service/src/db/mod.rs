/// Storage layer for news-service
///
/// Repository traits are implemented by two backends:
/// - `postgres::PgStore`: PostgreSQL via sqlx
/// - `memory::MemoryStore`: process-local store for development and tests
///
/// Ownership is enforced inside `update_comment`/`delete_comment` themselves:
/// a row only changes when both id and author match.
pub mod memory;
pub mod postgres;

use crate::error::Result;
use crate::models::{Comment, CommentView, NewNews, News, User};
use async_trait::async_trait;
use uuid::Uuid;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait NewsRepository: Send + Sync {
    /// Insert a news item
    async fn create_news(&self, news: NewNews) -> Result<News>;

    /// Get a single news item by ID
    async fn get_news(&self, news_id: Uuid) -> Result<Option<News>>;

    /// Most recent news items, newest publication date first
    async fn latest_news(&self, limit: usize) -> Result<Vec<News>>;

    /// Delete a news item together with its comments
    async fn delete_news(&self, news_id: Uuid) -> Result<bool>;
}

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Create a new comment on a news item
    async fn create_comment(&self, news_id: Uuid, author_id: Uuid, text: &str) -> Result<Comment>;

    /// Get a single comment by ID
    async fn get_comment(&self, comment_id: Uuid) -> Result<Option<Comment>>;

    /// All comments of a news item, oldest first
    async fn comments_for_news(&self, news_id: Uuid) -> Result<Vec<CommentView>>;

    /// Update comment text if `author_id` owns it
    async fn update_comment(
        &self,
        comment_id: Uuid,
        author_id: Uuid,
        text: &str,
    ) -> Result<Option<Comment>>;

    /// Delete a comment if `author_id` owns it, returning the deleted row
    async fn delete_comment(&self, comment_id: Uuid, author_id: Uuid) -> Result<Option<Comment>>;

    /// Total number of comments
    async fn count_comments(&self) -> Result<i64>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a user; a taken username yields `AppError::Conflict`
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>>;

    async fn get_user(&self, user_id: Uuid) -> Result<Option<User>>;
}

/// Everything the service needs from a storage backend
#[async_trait]
pub trait Storage: NewsRepository + CommentRepository + UserRepository {
    /// Backend name for logs and health output
    fn backend_name(&self) -> &'static str;

    /// Cheap liveness probe
    async fn ping(&self) -> Result<()>;
}
