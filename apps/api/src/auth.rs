//! Session resolution — the thin boundary over cookie-based auth.
//!
//! Sign-in/sign-up flows live outside this service; by the time a request
//! reaches us the session is just an email carried in a cookie.

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

use crate::errors::AppError;

/// Cookie that carries the signed-in user's email.
pub const USER_COOKIE_KEY: &str = "resume_user_email";

/// The authenticated caller, extracted from the session cookie.
/// Handlers that take a `CurrentUser` reject unauthenticated requests 401.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub email: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(header::COOKIE)
            .and_then(|value| value.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        let email = cookie_value(header, USER_COOKIE_KEY)
            .filter(|email| !email.is_empty())
            .ok_or(AppError::Unauthorized)?;

        Ok(CurrentUser { email })
    }
}

/// Pulls a single cookie's value out of a `Cookie` header.
fn cookie_value(header: &str, name: &str) -> Option<String> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_value_found_among_others() {
        let header = "theme=dark; resume_user_email=dev@example.com; _ga=abc";
        assert_eq!(
            cookie_value(header, USER_COOKIE_KEY),
            Some("dev@example.com".to_string())
        );
    }

    #[test]
    fn test_cookie_value_absent() {
        assert_eq!(cookie_value("theme=dark", USER_COOKIE_KEY), None);
    }

    #[test]
    fn test_cookie_value_trims_pair_whitespace() {
        let header = "theme=dark;  resume_user_email=dev@example.com ";
        assert_eq!(
            cookie_value(header, USER_COOKIE_KEY),
            Some("dev@example.com".to_string())
        );
    }

    #[test]
    fn test_empty_cookie_value_is_some_empty() {
        // the extractor filters empty values into a 401
        assert_eq!(
            cookie_value("resume_user_email=", USER_COOKIE_KEY),
            Some(String::new())
        );
    }
}
