//! Comment creation, moderation, ownership and account flows

#[macro_use]
mod common;

use actix_web::http::{header, StatusCode};
use actix_web::test;
use common::{Fixture, COMMENT_TEXT};
use news_service::routes::{comment_delete_url, comment_edit_url, comments_anchor, news_detail_url};
use news_service::services::moderation::{DEFAULT_FORBIDDEN_WORDS, DEFAULT_WARNING};

const NEW_TEXT: &str = "Обновлённый текст";

fn location<B>(resp: &actix_web::dev::ServiceResponse<B>) -> String {
    resp.headers()
        .get(header::LOCATION)
        .expect("missing Location header")
        .to_str()
        .unwrap()
        .to_string()
}

#[actix_web::test]
async fn test_anonymous_user_cant_create_comment() {
    let fixture = Fixture::new().await;
    let app = init_app!(fixture);
    let before = fixture.comment_count().await;

    let req = test::TestRequest::post()
        .uri(&news_detail_url(fixture.news.id))
        .set_form(vec![("text", NEW_TEXT)])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert!(location(&resp).starts_with("/auth/login/?next="));
    assert_eq!(fixture.comment_count().await, before);
}

#[actix_web::test]
async fn test_user_can_create_comment() {
    let fixture = Fixture::new().await;
    let app = init_app!(fixture);
    let before = fixture.comment_count().await;

    let req = test::TestRequest::post()
        .uri(&news_detail_url(fixture.news.id))
        .insert_header(fixture.bearer(&fixture.reader))
        .set_form(vec![("text", NEW_TEXT)])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), comments_anchor(fixture.news.id));
    assert_eq!(fixture.comment_count().await, before + 1);

    let comments = fixture.state.comments.comments_for_news(fixture.news.id).await.unwrap();
    let created = comments.last().unwrap();
    assert_eq!(created.text, NEW_TEXT);
    assert_eq!(created.author_id, fixture.reader.id);
}

#[actix_web::test]
async fn test_user_cant_use_bad_words() {
    let fixture = Fixture::new().await;
    let app = init_app!(fixture);
    let before = fixture.comment_count().await;

    for word in DEFAULT_FORBIDDEN_WORDS {
        let text = format!("Какой-то текст, {}, еще текст", word);
        let req = test::TestRequest::post()
            .uri(&news_detail_url(fixture.news.id))
            .insert_header(fixture.bearer(&fixture.reader))
            .set_form(vec![("text", text.as_str())])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["form"]["errors"]["text"], serde_json::json!([DEFAULT_WARNING]));
        assert_eq!(body["form"]["text"], text.as_str());
        assert_eq!(fixture.comment_count().await, before);
    }
}

#[actix_web::test]
async fn test_blank_comment_is_rejected() {
    let fixture = Fixture::new().await;
    let app = init_app!(fixture);
    let before = fixture.comment_count().await;

    let req = test::TestRequest::post()
        .uri(&news_detail_url(fixture.news.id))
        .insert_header(fixture.bearer(&fixture.reader))
        .set_form(vec![("text", "   ")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(fixture.comment_count().await, before);
}

#[actix_web::test]
async fn test_author_can_edit_comment() {
    let fixture = Fixture::new().await;
    let app = init_app!(fixture);

    let req = test::TestRequest::post()
        .uri(&comment_edit_url(fixture.comment.id))
        .insert_header(fixture.bearer(&fixture.author))
        .set_form(vec![("text", NEW_TEXT)])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), comments_anchor(fixture.news.id));
    assert_eq!(fixture.stored_comment().await.unwrap().text, NEW_TEXT);
}

#[actix_web::test]
async fn test_edit_page_prefills_form() {
    let fixture = Fixture::new().await;
    let app = init_app!(fixture);

    let req = test::TestRequest::get()
        .uri(&comment_edit_url(fixture.comment.id))
        .insert_header(fixture.bearer(&fixture.author))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["form"]["text"], COMMENT_TEXT);
    assert_eq!(body["comment"]["id"], fixture.comment.id.to_string());
}

#[actix_web::test]
async fn test_author_edit_with_bad_word_keeps_text() {
    let fixture = Fixture::new().await;
    let app = init_app!(fixture);

    let req = test::TestRequest::post()
        .uri(&comment_edit_url(fixture.comment.id))
        .insert_header(fixture.bearer(&fixture.author))
        .set_form(vec![("text", "ты негодяй")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["form"]["errors"]["text"], serde_json::json!([DEFAULT_WARNING]));
    assert_eq!(fixture.stored_comment().await.unwrap().text, COMMENT_TEXT);
}

#[actix_web::test]
async fn test_user_cant_edit_comment_of_another_user() {
    let fixture = Fixture::new().await;
    let app = init_app!(fixture);

    let req = test::TestRequest::post()
        .uri(&comment_edit_url(fixture.comment.id))
        .insert_header(fixture.bearer(&fixture.reader))
        .set_form(vec![("text", NEW_TEXT)])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(fixture.stored_comment().await.unwrap().text, COMMENT_TEXT);
}

#[actix_web::test]
async fn test_author_can_delete_comment() {
    let fixture = Fixture::new().await;
    let app = init_app!(fixture);
    let before = fixture.comment_count().await;

    let req = test::TestRequest::delete()
        .uri(&comment_delete_url(fixture.comment.id))
        .insert_header(fixture.bearer(&fixture.author))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), comments_anchor(fixture.news.id));
    assert_eq!(fixture.comment_count().await, before - 1);
    assert!(fixture.stored_comment().await.is_none());
}

#[actix_web::test]
async fn test_author_can_delete_comment_with_post() {
    let fixture = Fixture::new().await;
    let app = init_app!(fixture);
    let before = fixture.comment_count().await;

    let req = test::TestRequest::post()
        .uri(&comment_delete_url(fixture.comment.id))
        .insert_header(fixture.bearer(&fixture.author))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(fixture.comment_count().await, before - 1);
}

#[actix_web::test]
async fn test_user_cant_delete_comment_of_another_user() {
    let fixture = Fixture::new().await;
    let app = init_app!(fixture);
    let before = fixture.comment_count().await;

    for req in [
        test::TestRequest::delete(),
        test::TestRequest::post(),
    ] {
        let req = req
            .uri(&comment_delete_url(fixture.comment.id))
            .insert_header(fixture.bearer(&fixture.reader))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    assert_eq!(fixture.comment_count().await, before);
    assert!(fixture.stored_comment().await.is_some());
}

#[actix_web::test]
async fn test_anonymous_cant_edit_or_delete() {
    let fixture = Fixture::new().await;
    let app = init_app!(fixture);

    let req = test::TestRequest::post()
        .uri(&comment_edit_url(fixture.comment.id))
        .set_form(vec![("text", NEW_TEXT)])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);

    let req = test::TestRequest::delete()
        .uri(&comment_delete_url(fixture.comment.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);

    assert_eq!(fixture.stored_comment().await.unwrap().text, COMMENT_TEXT);
}

#[actix_web::test]
async fn test_signup_sets_session_cookie() {
    let fixture = Fixture::new().await;
    let app = init_app!(fixture);

    let req = test::TestRequest::post()
        .uri("/auth/signup/")
        .set_form(vec![
            ("username", "newcomer"),
            ("password1", "correct-horse-battery"),
            ("password2", "correct-horse-battery"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/");
    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == "news_session")
        .expect("session cookie not set")
        .into_owned();
    assert!(cookie.http_only().unwrap_or(false));

    let req = test::TestRequest::get()
        .uri(&news_detail_url(fixture.news.id))
        .cookie(cookie)
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["form"]["form_type"], "comment");
}

#[actix_web::test]
async fn test_login_redirects_to_safe_next() {
    let fixture = Fixture::new().await;
    let app = init_app!(fixture);

    let req = test::TestRequest::post()
        .uri("/auth/signup/")
        .set_form(vec![
            ("username", "newcomer"),
            ("password1", "correct-horse-battery"),
            ("password2", "correct-horse-battery"),
        ])
        .to_request();
    test::call_service(&app, req).await;

    let next = comment_edit_url(fixture.comment.id);
    let req = test::TestRequest::post()
        .uri(&format!("/auth/login/?next={}", next))
        .set_form(vec![("username", "newcomer"), ("password", "correct-horse-battery")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), next);

    let req = test::TestRequest::post()
        .uri("/auth/login/?next=//evil.example")
        .set_form(vec![("username", "newcomer"), ("password", "correct-horse-battery")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(location(&resp), "/");

    let req = test::TestRequest::post()
        .uri("/auth/login/")
        .set_form(vec![("username", "newcomer"), ("password", "wrong-password")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["form"]["errors"]["__all__"].is_array());
}

#[actix_web::test]
async fn test_logout_clears_cookie() {
    let fixture = Fixture::new().await;
    let app = init_app!(fixture);

    let req = test::TestRequest::post().uri("/auth/logout/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == "news_session")
        .expect("removal cookie not set");
    assert_eq!(cookie.value(), "");
}
