/// Data models for news-service
///
/// - User: account that can log in and author comments
/// - News: published article, created by operators
/// - Comment: user-authored text attached to a news item
/// - forms: page form contexts returned to clients
pub mod forms;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use forms::{CommentForm, FormErrors, FormKind, LoginForm, SignupForm};

/// Registered user account
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Published news item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct News {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a news item; `date` defaults to today
#[derive(Debug, Clone, Deserialize)]
pub struct NewNews {
    pub title: String,
    pub text: String,
    pub date: Option<NaiveDate>,
}

/// Comment row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub news_id: Uuid,
    pub author_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Comment joined with its author's username, as listed on the detail page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CommentView {
    pub id: Uuid,
    pub news_id: Uuid,
    pub author_id: Uuid,
    pub author: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Context of the news detail page
///
/// `form` is omitted entirely for anonymous readers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsDetailPage {
    pub news: News,
    pub comments: Vec<CommentView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<CommentForm>,
}

/// Context of the home page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomePage {
    pub object_list: Vec<News>,
}

/// Context of the comment edit page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentEditPage {
    pub comment: Comment,
    pub form: CommentForm,
}

/// Context of the comment delete confirmation page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentDeletePage {
    pub comment: Comment,
}

/// Context of the login and signup pages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormPage<F> {
    pub form: F,
}
