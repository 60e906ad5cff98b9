/// Shared application state handed to every handler through `web::Data`
use crate::config::Config;
use crate::db::Storage;
use crate::error::{AppError, Result};
use crate::services::{AccountService, CommentService, ForbiddenWordFilter, NewsService};
use crypto_core::SessionKeys;
use std::sync::Arc;

/// Session cookie settings
#[derive(Debug, Clone)]
pub struct CookieSettings {
    pub name: String,
    pub secure: bool,
}

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub news: NewsService,
    pub comments: CommentService,
    pub accounts: AccountService,
    pub cookie: CookieSettings,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>, config: &Config) -> Result<Self> {
        let mut filter = ForbiddenWordFilter::new(
            config.moderation.forbidden_words.iter().cloned(),
            config.moderation.warning.clone(),
        );
        if let Some(path) = &config.moderation.forbidden_words_file {
            filter.extend_from_file(path)?;
        }
        tracing::info!(
            forbidden_words = filter.words().len(),
            "Comment moderation configured"
        );

        let keys = SessionKeys::from_secret(
            config.session.jwt_secret.as_bytes(),
            config.session.ttl_hours,
        )
        .map_err(|e| AppError::Config(format!("invalid session settings: {}", e)))?;

        Ok(Self {
            news: NewsService::new(storage.clone(), config.news.count_on_home_page),
            comments: CommentService::new(storage.clone(), Arc::new(filter)),
            accounts: AccountService::new(storage.clone(), Arc::new(keys)),
            cookie: CookieSettings {
                name: config.session.cookie_name.clone(),
                secure: config.session.secure_cookie,
            },
            storage,
        })
    }
}
