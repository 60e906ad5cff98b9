//! Shared fixtures for news-service integration tests
//!
//! Every test gets a fresh in-memory store with one news item, two users
//! (the comment author and another reader) and one comment by the author.
#![allow(dead_code)]

use actix_web::web;
use news_service::db::{CommentRepository, MemoryStore, NewsRepository, UserRepository};
use news_service::models::{Comment, NewNews, News, User};
use news_service::{AppState, Config};
use std::sync::Arc;

pub const COMMENT_TEXT: &str = "Текст комментария";

pub struct Fixture {
    pub store: Arc<MemoryStore>,
    pub state: web::Data<AppState>,
    pub news: News,
    pub author: User,
    pub reader: User,
    pub comment: Comment,
}

impl Fixture {
    pub async fn new() -> Self {
        Self::with_config(Config::default()).await
    }

    pub async fn with_config(config: Config) -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = web::Data::new(
            AppState::new(store.clone(), &config).expect("failed to build app state"),
        );

        let news = store
            .create_news(NewNews {
                title: "Заголовок".to_string(),
                text: "Текст".to_string(),
                date: None,
            })
            .await
            .expect("failed to create news");
        let author = store
            .create_user("author", "unused-hash")
            .await
            .expect("failed to create author");
        let reader = store
            .create_user("reader", "unused-hash")
            .await
            .expect("failed to create reader");
        let comment = store
            .create_comment(news.id, author.id, COMMENT_TEXT)
            .await
            .expect("failed to create comment");

        Self {
            store,
            state,
            news,
            author,
            reader,
            comment,
        }
    }

    pub fn bearer(&self, user: &User) -> (&'static str, String) {
        let token = self
            .state
            .accounts
            .keys()
            .issue(user.id, &user.username)
            .expect("failed to issue token");
        ("Authorization", format!("Bearer {}", token))
    }

    pub async fn comment_count(&self) -> i64 {
        self.store.count_comments().await.expect("count failed")
    }

    pub async fn stored_comment(&self) -> Option<Comment> {
        self.store
            .get_comment(self.comment.id)
            .await
            .expect("lookup failed")
    }
}

/// Initialize the full route table around a fixture's state
macro_rules! init_app {
    ($fixture:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data($fixture.state.clone())
                .wrap(news_service::middleware::IdentityMiddleware)
                .configure(news_service::routes::configure),
        )
        .await
    };
}
