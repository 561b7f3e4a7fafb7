//! # REST API for Form Validation
//!
//! Inline checks for the user and password forms. Results are returned to the
//! caller only; they never become notifications.

use axum::{extract::State, response::Json, routing::post, Router};
use log::info;
use serde::{Deserialize, Serialize};
use shared::FormValidationResult;

use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUserForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChangeForm {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
    #[serde(default)]
    pub confirm_password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordResetForm {
    #[serde(default)]
    pub new_password: String,
    #[serde(default)]
    pub confirm_password: String,
}

#[derive(Debug, Deserialize)]
pub struct EmailForm {
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ValidationResponse {
    #[serde(flatten)]
    pub result: FormValidationResult,
    pub messages: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EmailValidationResponse {
    pub valid: bool,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/new-user", post(validate_new_user))
        .route("/password-change", post(validate_password_change))
        .route("/password-reset", post(validate_password_reset))
        .route("/email", post(validate_email))
}

fn respond(state: &AppState, result: FormValidationResult) -> Json<ValidationResponse> {
    let messages = state.form_validation_service.error_messages(&result.errors);
    Json(ValidationResponse { result, messages })
}

async fn validate_new_user(State(state): State<AppState>, Json(form): Json<NewUserForm>) -> Json<ValidationResponse> {
    info!("POST /api/validation/new-user");
    let result = state
        .form_validation_service
        .validate_new_user(&form.name, &form.email, &form.password);
    respond(&state, result)
}

async fn validate_password_change(
    State(state): State<AppState>,
    Json(form): Json<PasswordChangeForm>,
) -> Json<ValidationResponse> {
    info!("POST /api/validation/password-change");
    let result = state.form_validation_service.validate_password_change(
        &form.current_password,
        &form.new_password,
        &form.confirm_password,
    );
    respond(&state, result)
}

async fn validate_password_reset(
    State(state): State<AppState>,
    Json(form): Json<PasswordResetForm>,
) -> Json<ValidationResponse> {
    info!("POST /api/validation/password-reset");
    let result = state
        .form_validation_service
        .validate_password_reset(&form.new_password, &form.confirm_password);
    respond(&state, result)
}

async fn validate_email(State(state): State<AppState>, Json(form): Json<EmailForm>) -> Json<EmailValidationResponse> {
    Json(EmailValidationResponse {
        valid: state.form_validation_service.is_valid_email(&form.email),
    })
}
