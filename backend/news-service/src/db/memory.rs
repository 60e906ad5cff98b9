use super::{CommentRepository, NewsRepository, Storage, UserRepository};
use crate::error::{AppError, Result};
use crate::models::{Comment, CommentView, NewNews, News, User};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-process store with the same semantics as the PostgreSQL backend.
///
/// Rows are kept in insertion order, so stable sorts break timestamp ties
/// by insertion.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    news: Vec<News>,
    comments: Vec<Comment>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fully-formed comment, keeping the caller's timestamp.
    /// Used for fixtures and data imports.
    pub async fn insert_comment(&self, comment: Comment) -> Result<()> {
        let mut tables = self.inner.write().await;
        if !tables.news.iter().any(|n| n.id == comment.news_id) {
            return Err(AppError::BadRequest(format!(
                "news {} does not exist",
                comment.news_id
            )));
        }
        tables.comments.push(comment);
        Ok(())
    }
}

#[async_trait]
impl NewsRepository for MemoryStore {
    async fn create_news(&self, news: NewNews) -> Result<News> {
        let now = Utc::now();
        let created = News {
            id: Uuid::new_v4(),
            title: news.title,
            text: news.text,
            date: news.date.unwrap_or_else(|| now.date_naive()),
            created_at: now,
        };

        self.inner.write().await.news.push(created.clone());
        Ok(created)
    }

    async fn get_news(&self, news_id: Uuid) -> Result<Option<News>> {
        let tables = self.inner.read().await;
        Ok(tables.news.iter().find(|n| n.id == news_id).cloned())
    }

    async fn latest_news(&self, limit: usize) -> Result<Vec<News>> {
        let tables = self.inner.read().await;
        let mut news = tables.news.clone();
        news.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        news.truncate(limit);
        Ok(news)
    }

    async fn delete_news(&self, news_id: Uuid) -> Result<bool> {
        let mut tables = self.inner.write().await;
        let before = tables.news.len();
        tables.news.retain(|n| n.id != news_id);
        let deleted = tables.news.len() != before;
        if deleted {
            tables.comments.retain(|c| c.news_id != news_id);
        }
        Ok(deleted)
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn create_comment(&self, news_id: Uuid, author_id: Uuid, text: &str) -> Result<Comment> {
        let comment = Comment {
            id: Uuid::new_v4(),
            news_id,
            author_id,
            text: text.to_string(),
            created_at: Utc::now(),
        };

        let mut tables = self.inner.write().await;
        if !tables.news.iter().any(|n| n.id == news_id) {
            return Err(AppError::BadRequest(format!("news {} does not exist", news_id)));
        }
        if !tables.users.iter().any(|u| u.id == author_id) {
            return Err(AppError::BadRequest(format!("user {} does not exist", author_id)));
        }
        tables.comments.push(comment.clone());
        Ok(comment)
    }

    async fn get_comment(&self, comment_id: Uuid) -> Result<Option<Comment>> {
        let tables = self.inner.read().await;
        Ok(tables.comments.iter().find(|c| c.id == comment_id).cloned())
    }

    async fn comments_for_news(&self, news_id: Uuid) -> Result<Vec<CommentView>> {
        let tables = self.inner.read().await;
        let mut comments: Vec<CommentView> = tables
            .comments
            .iter()
            .filter(|c| c.news_id == news_id)
            .map(|c| CommentView {
                id: c.id,
                news_id: c.news_id,
                author_id: c.author_id,
                author: tables
                    .users
                    .iter()
                    .find(|u| u.id == c.author_id)
                    .map(|u| u.username.clone())
                    .unwrap_or_default(),
                text: c.text.clone(),
                created_at: c.created_at,
            })
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(comments)
    }

    async fn update_comment(
        &self,
        comment_id: Uuid,
        author_id: Uuid,
        text: &str,
    ) -> Result<Option<Comment>> {
        let mut tables = self.inner.write().await;
        let updated = tables
            .comments
            .iter_mut()
            .find(|c| c.id == comment_id && c.author_id == author_id)
            .map(|c| {
                c.text = text.to_string();
                c.clone()
            });
        Ok(updated)
    }

    async fn delete_comment(&self, comment_id: Uuid, author_id: Uuid) -> Result<Option<Comment>> {
        let mut tables = self.inner.write().await;
        let position = tables
            .comments
            .iter()
            .position(|c| c.id == comment_id && c.author_id == author_id);
        Ok(position.map(|idx| tables.comments.remove(idx)))
    }

    async fn count_comments(&self) -> Result<i64> {
        Ok(self.inner.read().await.comments.len() as i64)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User> {
        let mut tables = self.inner.write().await;
        if tables.users.iter().any(|u| u.username == username) {
            return Err(AppError::Conflict(format!(
                "username '{}' is already taken",
                username
            )));
        }

        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let tables = self.inner.read().await;
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn get_user(&self, user_id: Uuid) -> Result<Option<User>> {
        let tables = self.inner.read().await;
        Ok(tables.users.iter().find(|u| u.id == user_id).cloned())
    }
}

#[async_trait]
impl Storage for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
