/// Comment service - moderation, ownership and persistence of comments
use crate::db::{CommentRepository, Storage};
use crate::error::{AppError, Result};
use crate::metrics::comments as comment_metrics;
use crate::models::forms::REQUIRED_MESSAGE;
use crate::models::{Comment, CommentForm, CommentView};
use crate::services::moderation::{ForbiddenWordFilter, ModerationResult};
use std::sync::Arc;
use uuid::Uuid;

/// Result of submitting comment text (create or edit)
#[derive(Debug)]
pub enum CommentSubmission {
    /// The comment was written
    Saved(Comment),
    /// Nothing was written; the form carries the errors to display
    Invalid(CommentForm),
}

#[derive(Clone)]
pub struct CommentService {
    storage: Arc<dyn Storage>,
    filter: Arc<ForbiddenWordFilter>,
}

impl CommentService {
    pub fn new(storage: Arc<dyn Storage>, filter: Arc<ForbiddenWordFilter>) -> Self {
        Self { storage, filter }
    }

    pub fn filter(&self) -> &ForbiddenWordFilter {
        &self.filter
    }

    /// Validate submitted text, returning the bound form with any errors
    pub fn validate_text(&self, text: &str) -> CommentForm {
        let mut form = CommentForm::with_text(text);

        if text.trim().is_empty() {
            form.add_error("text", REQUIRED_MESSAGE);
            comment_metrics::record_rejected("empty");
            return form;
        }

        if let ModerationResult::Forbidden { word } = self.filter.check(text) {
            tracing::info!(
                word_len = word.chars().count(),
                "Comment rejected by forbidden-word filter"
            );
            form.add_error("text", self.filter.warning());
            comment_metrics::record_rejected("forbidden_word");
        }

        form
    }

    /// Create a comment on `news_id` authored by `author_id`
    pub async fn create_comment(
        &self,
        news_id: Uuid,
        author_id: Uuid,
        text: &str,
    ) -> Result<CommentSubmission> {
        let form = self.validate_text(text);
        if !form.is_valid() {
            return Ok(CommentSubmission::Invalid(form));
        }

        let comment = self
            .storage
            .create_comment(news_id, author_id, text)
            .await?;
        comment_metrics::record_created();
        tracing::info!(comment_id = %comment.id, %news_id, %author_id, "Comment created");

        Ok(CommentSubmission::Saved(comment))
    }

    /// Fetch a comment for its author. Missing and not-owned comments are
    /// both reported as not found.
    pub async fn get_owned_comment(&self, comment_id: Uuid, user_id: Uuid) -> Result<Comment> {
        match self.storage.get_comment(comment_id).await? {
            Some(comment) if comment.author_id == user_id => Ok(comment),
            Some(_) => {
                tracing::warn!(%comment_id, %user_id, "Comment access denied to non-author");
                Err(AppError::not_found())
            }
            None => Err(AppError::not_found()),
        }
    }

    /// Replace the text of a comment owned by `user_id`
    pub async fn update_comment(
        &self,
        comment_id: Uuid,
        user_id: Uuid,
        text: &str,
    ) -> Result<CommentSubmission> {
        self.get_owned_comment(comment_id, user_id)
            .await
            .inspect_err(|_| comment_metrics::record_mutation("update", "not_found"))?;

        let form = self.validate_text(text);
        if !form.is_valid() {
            comment_metrics::record_mutation("update", "invalid");
            return Ok(CommentSubmission::Invalid(form));
        }

        match self.storage.update_comment(comment_id, user_id, text).await? {
            Some(comment) => {
                comment_metrics::record_mutation("update", "ok");
                tracing::info!(%comment_id, %user_id, "Comment updated");
                Ok(CommentSubmission::Saved(comment))
            }
            None => {
                comment_metrics::record_mutation("update", "not_found");
                Err(AppError::not_found())
            }
        }
    }

    /// Delete a comment owned by `user_id`, returning the deleted row
    pub async fn delete_comment(&self, comment_id: Uuid, user_id: Uuid) -> Result<Comment> {
        match self.storage.delete_comment(comment_id, user_id).await? {
            Some(comment) => {
                comment_metrics::record_mutation("delete", "ok");
                tracing::info!(%comment_id, %user_id, "Comment deleted");
                Ok(comment)
            }
            None => {
                comment_metrics::record_mutation("delete", "not_found");
                tracing::warn!(%comment_id, %user_id, "Delete of missing or foreign comment");
                Err(AppError::not_found())
            }
        }
    }

    /// Comments of a news item, oldest first
    pub async fn comments_for_news(&self, news_id: Uuid) -> Result<Vec<CommentView>> {
        self.storage.comments_for_news(news_id).await
    }
}
