/// Comment handlers - edit and delete, restricted to the comment's author
use super::redirect;
use crate::error::Result;
use crate::middleware::{require_user, MaybeUser};
use crate::models::forms::CommentFormData;
use crate::models::{CommentDeletePage, CommentEditPage, CommentForm};
use crate::routes::comments_anchor;
use crate::services::CommentSubmission;
use crate::state::AppState;
use actix_web::{web, HttpRequest, HttpResponse};
use uuid::Uuid;

/// Edit page pre-filled with the current text
pub async fn edit_comment_page(
    req: HttpRequest,
    state: web::Data<AppState>,
    comment_id: web::Path<Uuid>,
    user: MaybeUser,
) -> Result<HttpResponse> {
    let user = match require_user(user, &req) {
        Ok(user) => user,
        Err(redirect_to_login) => return Ok(redirect_to_login),
    };

    let comment = state
        .comments
        .get_owned_comment(comment_id.into_inner(), user.id)
        .await?;
    let form = CommentForm::with_text(comment.text.clone());

    Ok(HttpResponse::Ok().json(CommentEditPage { comment, form }))
}

/// Replace the comment text
pub async fn edit_comment(
    req: HttpRequest,
    state: web::Data<AppState>,
    comment_id: web::Path<Uuid>,
    user: MaybeUser,
    form: web::Form<CommentFormData>,
) -> Result<HttpResponse> {
    let user = match require_user(user, &req) {
        Ok(user) => user,
        Err(redirect_to_login) => return Ok(redirect_to_login),
    };
    let comment_id = comment_id.into_inner();

    match state
        .comments
        .update_comment(comment_id, user.id, &form.text)
        .await?
    {
        CommentSubmission::Saved(comment) => Ok(redirect(&comments_anchor(comment.news_id))),
        CommentSubmission::Invalid(form) => {
            let comment = state.comments.get_owned_comment(comment_id, user.id).await?;
            Ok(HttpResponse::Ok().json(CommentEditPage { comment, form }))
        }
    }
}

/// Delete confirmation page
pub async fn delete_comment_page(
    req: HttpRequest,
    state: web::Data<AppState>,
    comment_id: web::Path<Uuid>,
    user: MaybeUser,
) -> Result<HttpResponse> {
    let user = match require_user(user, &req) {
        Ok(user) => user,
        Err(redirect_to_login) => return Ok(redirect_to_login),
    };

    let comment = state
        .comments
        .get_owned_comment(comment_id.into_inner(), user.id)
        .await?;

    Ok(HttpResponse::Ok().json(CommentDeletePage { comment }))
}

/// Delete the comment (POST from the confirmation page, or DELETE)
pub async fn delete_comment(
    req: HttpRequest,
    state: web::Data<AppState>,
    comment_id: web::Path<Uuid>,
    user: MaybeUser,
) -> Result<HttpResponse> {
    let user = match require_user(user, &req) {
        Ok(user) => user,
        Err(redirect_to_login) => return Ok(redirect_to_login),
    };

    let comment = state
        .comments
        .delete_comment(comment_id.into_inner(), user.id)
        .await?;

    Ok(redirect(&comments_anchor(comment.news_id)))
}
