/// Account handlers - login, logout and signup
///
/// A successful login or signup stores the session token in an HttpOnly
/// cookie; logout clears it. Tokens are stateless, so logout has nothing
/// to revoke server-side.
use crate::error::Result;
use crate::models::forms::{LoginFormData, SignupFormData};
use crate::models::{FormPage, LoginForm, SignupForm};
use crate::routes::{safe_next, HOME_PATH};
use crate::services::{LoginOutcome, SignupOutcome};
use crate::state::AppState;
use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use actix_web::http::header::LOCATION;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

fn session_cookie(state: &AppState, token: String) -> Cookie<'static> {
    Cookie::build(state.cookie.name.clone(), token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.cookie.secure)
        .max_age(CookieDuration::seconds(state.accounts.keys().ttl_seconds()))
        .finish()
}

fn removal_cookie(state: &AppState) -> Cookie<'static> {
    let mut cookie = Cookie::build(state.cookie.name.clone(), "")
        .path("/")
        .http_only(true)
        .finish();
    cookie.make_removal();
    cookie
}

pub async fn login_page(query: web::Query<NextQuery>) -> HttpResponse {
    let next = safe_next(query.next.as_deref()).map(str::to_string);
    HttpResponse::Ok().json(FormPage {
        form: LoginForm::new("", next),
    })
}

pub async fn login(
    state: web::Data<AppState>,
    query: web::Query<NextQuery>,
    form: web::Form<LoginFormData>,
) -> Result<HttpResponse> {
    let mut data = form.into_inner();
    if data.next.as_deref().map_or(true, str::is_empty) {
        data.next = query.into_inner().next;
    }
    let next = safe_next(data.next.as_deref())
        .unwrap_or(HOME_PATH)
        .to_string();

    match state.accounts.login(data).await? {
        LoginOutcome::LoggedIn { token, .. } => {
            Ok(HttpResponse::Found()
                .insert_header((LOCATION, next))
                .cookie(session_cookie(&state, token))
                .finish())
        }
        LoginOutcome::Invalid(form) => Ok(HttpResponse::Ok().json(FormPage { form })),
    }
}

pub async fn logout(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok()
        .cookie(removal_cookie(&state))
        .json(serde_json::json!({"logged_out": true}))
}

pub async fn signup_page() -> HttpResponse {
    HttpResponse::Ok().json(FormPage {
        form: SignupForm::new(""),
    })
}

pub async fn signup(
    state: web::Data<AppState>,
    form: web::Form<SignupFormData>,
) -> Result<HttpResponse> {
    match state.accounts.signup(form.into_inner()).await? {
        SignupOutcome::Created { token, .. } => {
            Ok(HttpResponse::Found()
                .insert_header((LOCATION, HOME_PATH))
                .cookie(session_cookie(&state, token))
                .finish())
        }
        SignupOutcome::Invalid(form) => Ok(HttpResponse::Ok().json(FormPage { form })),
    }
}
