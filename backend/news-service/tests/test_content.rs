//! Listing order, page size and comment-form visibility

#[macro_use]
mod common;

use actix_web::test;
use chrono::{Duration, Utc};
use common::Fixture;
use news_service::models::Comment;
use news_service::routes::news_detail_url;
use news_service::services::seed_sample_news;
use news_service::Config;
use uuid::Uuid;

#[actix_web::test]
async fn test_home_page_is_capped() {
    let mut config = Config::default();
    config.news.count_on_home_page = 5;
    let fixture = Fixture::with_config(config).await;
    seed_sample_news(&*fixture.store, 7).await.unwrap();
    let app = init_app!(fixture);

    let req = test::TestRequest::get().uri("/").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["object_list"].as_array().unwrap().len(), 5);
}

#[actix_web::test]
async fn test_home_page_newest_first() {
    let fixture = Fixture::new().await;
    seed_sample_news(&*fixture.store, 12).await.unwrap();
    let app = init_app!(fixture);

    let req = test::TestRequest::get().uri("/").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let dates: Vec<&str> = body["object_list"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["date"].as_str().unwrap())
        .collect();

    assert_eq!(dates.len(), 10);
    let mut sorted = dates.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(dates, sorted);
}

#[actix_web::test]
async fn test_comments_oldest_first() {
    let fixture = Fixture::new().await;
    let now = Utc::now();
    for index in 0..10 {
        fixture
            .store
            .insert_comment(Comment {
                id: Uuid::new_v4(),
                news_id: fixture.news.id,
                author_id: fixture.author.id,
                text: format!("Текст {}", index),
                created_at: now + Duration::days(10 - index),
            })
            .await
            .unwrap();
    }
    let app = init_app!(fixture);

    let req = test::TestRequest::get()
        .uri(&news_detail_url(fixture.news.id))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let timestamps: Vec<chrono::DateTime<Utc>> = body["comments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| serde_json::from_value(c["created_at"].clone()).unwrap())
        .collect();

    assert_eq!(timestamps.len(), 11);
    assert!(timestamps.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[actix_web::test]
async fn test_anonymous_has_no_form() {
    let fixture = Fixture::new().await;
    let app = init_app!(fixture);

    let req = test::TestRequest::get()
        .uri(&news_detail_url(fixture.news.id))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert!(body.get("form").is_none());
    assert!(body.get("news").is_some());
}

#[actix_web::test]
async fn test_authorized_client_has_comment_form() {
    let fixture = Fixture::new().await;
    let app = init_app!(fixture);

    let req = test::TestRequest::get()
        .uri(&news_detail_url(fixture.news.id))
        .insert_header(fixture.bearer(&fixture.reader))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["form"]["form_type"], "comment");
    assert_eq!(body["form"]["text"], "");
}
