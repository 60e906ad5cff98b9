/// News handlers - home page, detail page and comment submission
use super::redirect;
use crate::error::Result;
use crate::middleware::{require_user, MaybeUser};
use crate::models::forms::CommentFormData;
use crate::models::{CommentForm, HomePage, NewsDetailPage};
use crate::routes::comments_anchor;
use crate::services::CommentSubmission;
use crate::state::AppState;
use actix_web::{web, HttpRequest, HttpResponse};
use uuid::Uuid;

/// Latest news
pub async fn home(state: web::Data<AppState>) -> Result<HttpResponse> {
    let object_list = state.news.home().await?;
    Ok(HttpResponse::Ok().json(HomePage { object_list }))
}

/// News item with its comments; the comment form only for logged-in readers
pub async fn news_detail(
    state: web::Data<AppState>,
    news_id: web::Path<Uuid>,
    user: MaybeUser,
) -> Result<HttpResponse> {
    let (news, comments) = state.news.detail(news_id.into_inner()).await?;
    let form = user.is_authenticated().then(CommentForm::empty);

    Ok(HttpResponse::Ok().json(NewsDetailPage {
        news,
        comments,
        form,
    }))
}

/// Post a comment on a news item
pub async fn submit_comment(
    req: HttpRequest,
    state: web::Data<AppState>,
    news_id: web::Path<Uuid>,
    user: MaybeUser,
    form: web::Form<CommentFormData>,
) -> Result<HttpResponse> {
    let user = match require_user(user, &req) {
        Ok(user) => user,
        Err(redirect_to_login) => return Ok(redirect_to_login),
    };

    let news = state.news.get_news(news_id.into_inner()).await?;
    let form = form.into_inner();

    match state
        .comments
        .create_comment(news.id, user.id, &form.text)
        .await?
    {
        CommentSubmission::Saved(_) => Ok(redirect(&comments_anchor(news.id))),
        CommentSubmission::Invalid(form) => {
            let comments = state.comments.comments_for_news(news.id).await?;
            Ok(HttpResponse::Ok().json(NewsDetailPage {
                news,
                comments,
                form: Some(form),
            }))
        }
    }
}
