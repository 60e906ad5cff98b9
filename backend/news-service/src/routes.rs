/// Route table and URL builders
///
/// Handlers never format paths by hand; redirects go through the helpers
/// below so they always agree with the registered routes.
use crate::handlers;
use crate::metrics;
use actix_web::web;
use uuid::Uuid;

pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/auth/login/";
pub const LOGOUT_PATH: &str = "/auth/logout/";
pub const SIGNUP_PATH: &str = "/auth/signup/";
pub const COMMENTS_ANCHOR: &str = "comments";

pub fn news_detail_url(news_id: Uuid) -> String {
    format!("/news/{}/", news_id)
}

/// Detail page scrolled to its comment section
pub fn comments_anchor(news_id: Uuid) -> String {
    format!("{}#{}", news_detail_url(news_id), COMMENTS_ANCHOR)
}

pub fn comment_edit_url(comment_id: Uuid) -> String {
    format!("/edit_comment/{}/", comment_id)
}

pub fn comment_delete_url(comment_id: Uuid) -> String {
    format!("/delete_comment/{}/", comment_id)
}

/// `LOGIN_PATH?next=<next>` with `/` left unescaped
pub fn login_redirect_url(next: &str) -> String {
    let encoded = urlencoding::encode(next).replace("%2F", "/");
    format!("{}?next={}", LOGIN_PATH, encoded)
}

/// Accept only local absolute paths as a post-login destination
pub fn safe_next(next: Option<&str>) -> Option<&str> {
    next.filter(|n| n.starts_with('/') && !n.starts_with("//") && !n.contains('\\'))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route(HOME_PATH, web::get().to(handlers::news::home))
        .service(
            web::resource("/news/{id}/")
                .route(web::get().to(handlers::news::news_detail))
                .route(web::post().to(handlers::news::submit_comment)),
        )
        .service(
            web::resource("/edit_comment/{id}/")
                .route(web::get().to(handlers::comments::edit_comment_page))
                .route(web::post().to(handlers::comments::edit_comment)),
        )
        .service(
            web::resource("/delete_comment/{id}/")
                .route(web::get().to(handlers::comments::delete_comment_page))
                .route(web::post().to(handlers::comments::delete_comment))
                .route(web::delete().to(handlers::comments::delete_comment)),
        )
        .service(
            web::resource(LOGIN_PATH)
                .route(web::get().to(handlers::users::login_page))
                .route(web::post().to(handlers::users::login)),
        )
        .service(
            web::resource(LOGOUT_PATH)
                .route(web::get().to(handlers::users::logout))
                .route(web::post().to(handlers::users::logout)),
        )
        .service(
            web::resource(SIGNUP_PATH)
                .route(web::get().to(handlers::users::signup_page))
                .route(web::post().to(handlers::users::signup)),
        )
        .service(
            web::scope("/api/v1/health")
                .route("", web::get().to(handlers::health::health_summary))
                .route("/live", web::get().to(handlers::health::liveness)),
        )
        .route("/metrics", web::get().to(metrics::serve_metrics));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_redirect_keeps_slashes() {
        let id = Uuid::nil();
        assert_eq!(
            login_redirect_url(&comment_edit_url(id)),
            format!("/auth/login/?next=/edit_comment/{}/", id)
        );
        assert_eq!(
            login_redirect_url("/news/?page=2"),
            "/auth/login/?next=/news/%3Fpage%3D2"
        );
    }

    #[test]
    fn test_comments_anchor() {
        let id = Uuid::nil();
        assert_eq!(comments_anchor(id), format!("/news/{}/#comments", id));
    }

    #[test]
    fn test_safe_next() {
        assert_eq!(safe_next(Some("/news/1/")), Some("/news/1/"));
        assert_eq!(safe_next(Some("//evil.example")), None);
        assert_eq!(safe_next(Some("https://evil.example")), None);
        assert_eq!(safe_next(Some("/\\evil.example")), None);
        assert_eq!(safe_next(None), None);
    }
}
