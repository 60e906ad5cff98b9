/// Authentication gate for comment pages
///
/// Anonymous callers are sent to the login page with `next` set to the full
/// requested path. Ownership itself is checked in `CommentService`, which
/// answers 404 for comments the caller does not own.
use super::{CurrentUser, MaybeUser};
use crate::routes::login_redirect_url;
use actix_web::http::header::LOCATION;
use actix_web::{HttpRequest, HttpResponse};

/// 302 to the login page, returning to this request afterwards
pub fn login_redirect(req: &HttpRequest) -> HttpResponse {
    let next = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| req.path());

    HttpResponse::Found()
        .insert_header((LOCATION, login_redirect_url(next)))
        .finish()
}

/// The logged-in user, or the login redirect to return as-is
pub fn require_user(user: MaybeUser, req: &HttpRequest) -> Result<CurrentUser, HttpResponse> {
    user.0.ok_or_else(|| {
        tracing::debug!(path = %req.path(), "Anonymous request redirected to login");
        login_redirect(req)
    })
}
