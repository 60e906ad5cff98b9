/// Business logic layer for news-service
///
/// - News service: home page listing and detail page assembly
/// - Comment service: moderation, ownership checks and comment writes
/// - Account service: signup, login and session token issuing
/// - Moderation: forbidden-word filter
pub mod accounts;
pub mod comments;
pub mod moderation;
pub mod news;

pub use accounts::{AccountService, LoginOutcome, SignupOutcome};
pub use comments::{CommentService, CommentSubmission};
pub use moderation::{ForbiddenWordFilter, ModerationResult};
pub use news::{seed_sample_news, NewsService};
