/// News service - home page listing and detail page data
use crate::db::{CommentRepository, NewsRepository, Storage};
use crate::error::{AppError, Result};
use crate::models::{CommentView, NewNews, News};
use chrono::{Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct NewsService {
    storage: Arc<dyn Storage>,
    count_on_home_page: usize,
}

impl NewsService {
    pub fn new(storage: Arc<dyn Storage>, count_on_home_page: usize) -> Self {
        Self {
            storage,
            count_on_home_page,
        }
    }

    pub fn count_on_home_page(&self) -> usize {
        self.count_on_home_page
    }

    /// Latest news, newest publication date first, capped at the configured count
    pub async fn home(&self) -> Result<Vec<News>> {
        self.storage.latest_news(self.count_on_home_page).await
    }

    /// Get a news item or fail with the uniform 404
    pub async fn get_news(&self, news_id: Uuid) -> Result<News> {
        self.storage
            .get_news(news_id)
            .await?
            .ok_or_else(AppError::not_found)
    }

    /// News item with its comments, oldest comment first
    pub async fn detail(&self, news_id: Uuid) -> Result<(News, Vec<CommentView>)> {
        let news = self.get_news(news_id).await?;
        let comments = self.storage.comments_for_news(news_id).await?;
        Ok((news, comments))
    }
}

/// Insert `count` sample news items dated today, yesterday, and so on
pub async fn seed_sample_news(storage: &dyn Storage, count: usize) -> Result<Vec<News>> {
    let today = Utc::now().date_naive();
    let mut created = Vec::with_capacity(count);

    for index in 0..count {
        let news = storage
            .create_news(NewNews {
                title: format!("Новость {}", index + 1),
                text: "Просто текст.".to_string(),
                date: Some(today - Duration::days(index as i64)),
            })
            .await?;
        created.push(news);
    }

    tracing::info!(count, backend = storage.backend_name(), "Seeded sample news");
    Ok(created)
}
