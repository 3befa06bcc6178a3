//! Login, signup and logout pages.

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use yatube_core::domain::NewUser;
use yatube_core::error::RepoError;
use yatube_core::forms::{FormErrors, REQUIRED};
use yatube_shared::{LoginFormData, SignupFormData};

use crate::middleware::auth::{cleared_session_cookie, session_cookie};
use crate::middleware::error::AppResult;
use crate::render;
use crate::state::AppState;
use crate::urls;
use crate::views::{AccountForm, View};

const BAD_CREDENTIALS: &str =
    "Please enter a correct username and password. Note that both fields may be case-sensitive.";
const USERNAME_TAKEN: &str = "A user with that username already exists.";
const USERNAME_INVALID: &str = "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.";
const PASSWORD_TOO_SHORT: &str = "This password is too short. It must contain at least 8 characters.";
const PASSWORD_MISMATCH: &str = "The two password fields didn't match.";

const USERNAME_MAX: usize = 150;
const PASSWORD_MIN: usize = 8;

#[derive(Debug, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

/// GET /auth/login/
pub async fn login_form(query: web::Query<NextQuery>) -> HttpResponse {
    render::respond(View::Login {
        form: AccountForm::default(),
        next: query.into_inner().next,
    })
}

/// POST /auth/login/
pub async fn login(
    state: web::Data<AppState>,
    query: web::Query<NextQuery>,
    body: web::Form<LoginFormData>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let next = req.next.or(query.into_inner().next).filter(|n| !n.is_empty());

    let user = state.users.find_by_username(&req.username).await?;
    let verified = match &user {
        Some(user) => state.passwords.verify(&req.password, &user.password_hash)?,
        None => false,
    };

    let Some(user) = user.filter(|_| verified) else {
        tracing::info!(username = %req.username, "Login failed");
        let mut form = AccountForm::new(req.username);
        form.errors.add(FormErrors::NON_FIELD, BAD_CREDENTIALS);
        return Ok(render::respond(View::Login { form, next }));
    };

    tracing::info!(user_id = user.id, username = %user.username, "User logged in");
    start_session(&state, user.id, &user.username, urls::safe_next(next.as_deref()))
}

/// GET /auth/signup/
pub async fn signup_form() -> HttpResponse {
    render::respond(View::Signup {
        form: AccountForm::default(),
    })
}

/// POST /auth/signup/
pub async fn signup(
    state: web::Data<AppState>,
    body: web::Form<SignupFormData>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let mut form = AccountForm::new(req.username.trim());
    validate_signup(&req, &mut form.errors);

    if form.errors.is_empty() && state.users.find_by_username(&form.username).await?.is_some() {
        form.errors.add("username", USERNAME_TAKEN);
    }
    if !form.errors.is_empty() {
        return Ok(render::respond(View::Signup { form }));
    }

    let password_hash = state.passwords.hash(&req.password)?;
    let user = match state
        .users
        .create(NewUser::new(form.username.clone(), password_hash))
        .await
    {
        Ok(user) => user,
        Err(RepoError::Constraint(_)) => {
            form.errors.add("username", USERNAME_TAKEN);
            return Ok(render::respond(View::Signup { form }));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(user_id = user.id, username = %user.username, "User signed up");
    start_session(&state, user.id, &user.username, urls::INDEX)
}

/// GET or POST /auth/logout/
pub async fn logout() -> HttpResponse {
    HttpResponse::Found()
        .insert_header((actix_web::http::header::LOCATION, urls::INDEX))
        .cookie(cleared_session_cookie())
        .finish()
}

fn validate_signup(req: &SignupFormData, errors: &mut FormErrors) {
    let username = req.username.trim();
    if username.is_empty() {
        errors.add("username", REQUIRED);
    } else if username.chars().count() > USERNAME_MAX
        || !username
            .chars()
            .all(|c| c.is_alphanumeric() || "@.+-_".contains(c))
    {
        errors.add("username", USERNAME_INVALID);
    }

    if req.password.is_empty() {
        errors.add("password", REQUIRED);
    } else if req.password.chars().count() < PASSWORD_MIN {
        errors.add("password", PASSWORD_TOO_SHORT);
    }

    if req.password != req.password_confirm {
        errors.add("password_confirm", PASSWORD_MISMATCH);
    }
}

fn start_session(
    state: &AppState,
    user_id: i64,
    username: &str,
    location: &str,
) -> AppResult<HttpResponse> {
    let token = state.tokens.generate_token(user_id, username)?;

    Ok(HttpResponse::Found()
        .insert_header((actix_web::http::header::LOCATION, location))
        .cookie(session_cookie(token, state.tokens.expiration_seconds()))
        .finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup_data(username: &str, password: &str, confirm: &str) -> SignupFormData {
        SignupFormData {
            username: username.to_string(),
            password: password.to_string(),
            password_confirm: confirm.to_string(),
        }
    }

    #[test]
    fn test_valid_signup_has_no_errors() {
        let mut errors = FormErrors::default();
        validate_signup(&signup_data("mark.robes", "long-enough", "long-enough"), &mut errors);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_signup_errors() {
        let mut errors = FormErrors::default();
        validate_signup(&signup_data("no spaces", "short", "other"), &mut errors);

        assert_eq!(errors.field("username"), [USERNAME_INVALID.to_string()]);
        assert_eq!(errors.field("password"), [PASSWORD_TOO_SHORT.to_string()]);
        assert_eq!(errors.field("password_confirm"), [PASSWORD_MISMATCH.to_string()]);
    }

    #[test]
    fn test_blank_signup_fields_are_required() {
        let mut errors = FormErrors::default();
        validate_signup(&signup_data("  ", "", ""), &mut errors);

        assert_eq!(errors.field("username"), [REQUIRED.to_string()]);
        assert_eq!(errors.field("password"), [REQUIRED.to_string()]);
        assert!(errors.field("password_confirm").is_empty());
    }
}
