/// HTTP handlers for news-service
///
/// - news: home page, detail page and comment submission
/// - comments: owner-only edit and delete pages
/// - users: login, logout and signup
/// - health: readiness summary and liveness probe
///
/// Pages answer with their JSON context; successful form posts redirect.
pub mod comments;
pub mod health;
pub mod news;
pub mod users;

use actix_web::http::header::LOCATION;
use actix_web::HttpResponse;

/// 302 Found to `location`
pub(crate) fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((LOCATION, location))
        .finish()
}
