/// Form payloads (what clients submit) and form contexts (what pages return)
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::{Validate, ValidationErrors};

/// Field name -> list of messages. Non-field errors use `NON_FIELD_ERRORS`.
pub type FormErrors = BTreeMap<String, Vec<String>>;

pub const NON_FIELD_ERRORS: &str = "__all__";

pub const REQUIRED_MESSAGE: &str = "This field is required.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    Comment,
    Login,
    Signup,
}

pub fn add_error(errors: &mut FormErrors, field: &str, message: impl Into<String>) {
    errors
        .entry(field.to_string())
        .or_default()
        .push(message.into());
}

/// Flatten `validator` errors into per-field messages
pub fn errors_from_validation(validation: &ValidationErrors) -> FormErrors {
    let mut errors = FormErrors::new();
    for (field, field_errors) in validation.field_errors() {
        for error in field_errors.iter() {
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| error.code.to_string());
            add_error(&mut errors, &field.to_string(), message);
        }
    }
    errors
}

// =====================================================================
// Comment form
// =====================================================================

/// Submitted comment text
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentFormData {
    #[serde(default)]
    pub text: String,
}

/// Comment form as exposed in page contexts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentForm {
    pub form_type: FormKind,
    pub text: String,
    pub errors: FormErrors,
}

impl CommentForm {
    pub fn empty() -> Self {
        Self::with_text("")
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            form_type: FormKind::Comment,
            text: text.into(),
            errors: FormErrors::new(),
        }
    }

    pub fn add_error(&mut self, field: &str, message: impl Into<String>) {
        add_error(&mut self.errors, field, message);
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

// =====================================================================
// Login form
// =====================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginFormData {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginForm {
    pub form_type: FormKind,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    pub errors: FormErrors,
}

impl LoginForm {
    pub fn new(username: impl Into<String>, next: Option<String>) -> Self {
        Self {
            form_type: FormKind::Login,
            username: username.into(),
            next,
            errors: FormErrors::new(),
        }
    }

    pub fn add_error(&mut self, field: &str, message: impl Into<String>) {
        add_error(&mut self.errors, field, message);
    }
}

// =====================================================================
// Signup form
// =====================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SignupFormData {
    #[serde(default)]
    #[validate(length(
        min = 1,
        max = 150,
        message = "Required. 150 characters or fewer."
    ))]
    pub username: String,
    #[serde(default)]
    #[validate(length(
        min = 8,
        message = "This password is too short. It must contain at least 8 characters."
    ))]
    pub password1: String,
    #[serde(default)]
    pub password2: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignupForm {
    pub form_type: FormKind,
    pub username: String,
    pub errors: FormErrors,
}

impl SignupForm {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            form_type: FormKind::Signup,
            username: username.into(),
            errors: FormErrors::new(),
        }
    }

    pub fn add_error(&mut self, field: &str, message: impl Into<String>) {
        add_error(&mut self.errors, field, message);
    }
}
