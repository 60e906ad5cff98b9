/// Account service - signup, login and session tokens
use crate::db::{Storage, UserRepository};
use crate::error::{AppError, Result};
use crate::models::forms::{
    errors_from_validation, LoginFormData, SignupFormData, NON_FIELD_ERRORS, REQUIRED_MESSAGE,
};
use crate::models::{LoginForm, SignupForm, User};
use crypto_core::{hash_password, verify_password, SessionKeys};
use std::sync::Arc;
use validator::Validate;

pub const INVALID_USERNAME_MESSAGE: &str =
    "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.";
pub const PASSWORD_MISMATCH_MESSAGE: &str = "The two password fields didn't match.";
pub const USERNAME_TAKEN_MESSAGE: &str = "A user with that username already exists.";
pub const INVALID_LOGIN_MESSAGE: &str =
    "Please enter a correct username and password. Note that both fields may be case-sensitive.";

#[derive(Debug)]
pub enum SignupOutcome {
    Created { user: User, token: String },
    Invalid(SignupForm),
}

#[derive(Debug)]
pub enum LoginOutcome {
    LoggedIn { user: User, token: String },
    Invalid(LoginForm),
}

#[derive(Clone)]
pub struct AccountService {
    storage: Arc<dyn Storage>,
    keys: Arc<SessionKeys>,
}

fn valid_username_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_')
}

impl AccountService {
    pub fn new(storage: Arc<dyn Storage>, keys: Arc<SessionKeys>) -> Self {
        Self { storage, keys }
    }

    pub fn keys(&self) -> &SessionKeys {
        &self.keys
    }

    fn issue_token(&self, user: &User) -> Result<String> {
        Ok(self.keys.issue(user.id, &user.username)?)
    }

    /// Register a new account and log it in
    pub async fn signup(&self, data: SignupFormData) -> Result<SignupOutcome> {
        let mut form = SignupForm::new(data.username.clone());

        if let Err(validation) = data.validate() {
            form.errors = errors_from_validation(&validation);
        }
        if !data.username.is_empty() && !data.username.chars().all(valid_username_char) {
            form.add_error("username", INVALID_USERNAME_MESSAGE);
        }
        if data.password2.is_empty() {
            form.add_error("password2", REQUIRED_MESSAGE);
        } else if data.password1 != data.password2 {
            form.add_error("password2", PASSWORD_MISMATCH_MESSAGE);
        }
        if !form.errors.is_empty() {
            return Ok(SignupOutcome::Invalid(form));
        }

        let password = data.password1;
        let password_hash =
            tokio::task::spawn_blocking(move || hash_password(&password)).await??;

        let user = match self.storage.create_user(&data.username, &password_hash).await {
            Ok(user) => user,
            Err(AppError::Conflict(_)) => {
                form.add_error("username", USERNAME_TAKEN_MESSAGE);
                return Ok(SignupOutcome::Invalid(form));
            }
            Err(e) => return Err(e),
        };

        tracing::info!(user_id = %user.id, "User signed up");
        let token = self.issue_token(&user)?;
        Ok(SignupOutcome::Created { user, token })
    }

    /// Check credentials and issue a session token
    pub async fn login(&self, data: LoginFormData) -> Result<LoginOutcome> {
        let mut form = LoginForm::new(data.username.clone(), data.next.clone());

        if data.username.is_empty() {
            form.add_error("username", REQUIRED_MESSAGE);
        }
        if data.password.is_empty() {
            form.add_error("password", REQUIRED_MESSAGE);
        }
        if !form.errors.is_empty() {
            return Ok(LoginOutcome::Invalid(form));
        }

        let user = match self.storage.find_user_by_username(&data.username).await? {
            Some(user) => user,
            None => {
                tracing::info!("Login failed: unknown username");
                form.add_error(NON_FIELD_ERRORS, INVALID_LOGIN_MESSAGE);
                return Ok(LoginOutcome::Invalid(form));
            }
        };

        let password = data.password;
        let hash = user.password_hash.clone();
        let verified =
            tokio::task::spawn_blocking(move || verify_password(&password, &hash)).await??;

        if !verified {
            tracing::info!(user_id = %user.id, "Login failed: wrong password");
            form.add_error(NON_FIELD_ERRORS, INVALID_LOGIN_MESSAGE);
            return Ok(LoginOutcome::Invalid(form));
        }

        tracing::info!(user_id = %user.id, "User logged in");
        let token = self.issue_token(&user)?;
        Ok(LoginOutcome::LoggedIn { user, token })
    }
}
