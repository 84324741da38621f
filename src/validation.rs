use async_trait::async_trait;
use axum::{
    extract::{rejection::QueryRejection, FromRequest, Query, Request},
    Json,
};
use lazy_static::lazy_static;
use regex::Regex;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::{ApiError, FieldError};
use crate::storage::Id;

/// A request body that can be checked field by field into a storage input.
pub trait Validate {
    /// Payload name used in the error message.
    const KIND: &'static str;
    type Output;

    fn validate(self) -> Result<Self::Output, Vec<FieldError>>;
}

/// JSON body extractor that runs [`Validate`] and rejects with a 400
/// listing every failing field.
pub struct Payload<T: Validate>(pub T::Output);

#[async_trait]
impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: Validate + DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<T>::from_request(req, state).await.map_err(|rej| {
            warn!(kind = T::KIND, error = %rej.body_text(), "unreadable body");
            ApiError::invalid(T::KIND, vec![FieldError::body(rej.body_text())])
        })?;
        body.validate().map(Payload).map_err(|errors| {
            warn!(kind = T::KIND, failed = errors.len(), "validation failed");
            ApiError::invalid(T::KIND, errors)
        })
    }
}

/// Unwraps query parameters, reporting bad ones the same way as bad bodies.
pub fn query<T>(params: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    params.map(|Query(p)| p).map_err(|rej| {
        warn!(error = %rej.body_text(), "bad query string");
        ApiError::invalid("query", vec![FieldError::body(rej.body_text())])
    })
}

/// Collects field errors while a body is being validated.
#[derive(Debug, Default)]
pub struct Checker {
    errors: Vec<FieldError>,
}

impl Checker {
    pub fn fail(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    /// Present and non-blank; returns the trimmed text.
    pub fn text(&mut self, field: &str, value: Option<String>) -> String {
        match value.map(|v| v.trim().to_string()) {
            Some(v) if !v.is_empty() => v,
            Some(_) => {
                self.fail(field, "Must not be empty");
                String::new()
            }
            None => {
                self.fail(field, "Required");
                String::new()
            }
        }
    }

    pub fn max_len(&mut self, field: &str, value: &str, max: usize) {
        if value.chars().count() > max {
            self.fail(field, format!("Must be at most {max} characters"));
        }
    }

    pub fn id(&mut self, field: &str, value: Option<Id>) -> Id {
        match value {
            Some(0) => {
                self.fail(field, "Must be a positive integer");
                0
            }
            Some(id) => id,
            None => {
                self.fail(field, "Required");
                0
            }
        }
    }

    pub fn finish<T>(self, output: T) -> Result<T, Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(output)
        } else {
            Err(self.errors)
        }
    }
}

/// Blank optional text becomes `None`.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub fn is_valid_username(username: &str) -> bool {
    lazy_static! {
        static ref USERNAME_RE: Regex = Regex::new(r"^[A-Za-z0-9_.-]{3,32}$").unwrap();
    }
    USERNAME_RE.is_match(username)
}

/// Ids in paths; anything but a positive integer names no entity.
pub fn parse_id(raw: &str) -> Option<Id> {
    raw.parse::<Id>().ok().filter(|id| *id > 0)
}

/// `tags=AI, Food,,` → `["AI", "Food"]`.
pub fn split_tags(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checker_collects_every_failure() {
        let mut c = Checker::default();
        assert_eq!(c.text("title", Some("  Kite  ".into())), "Kite");
        c.text("description", Some("   ".into()));
        c.text("content", None);
        c.id("ideaId", Some(0));
        assert_eq!(c.id("userId", Some(7)), 7);

        let errors = c.finish(()).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.path[0].as_str()).collect();
        assert_eq!(fields, ["description", "content", "ideaId"]);
    }

    #[test]
    fn max_len_counts_chars() {
        let mut c = Checker::default();
        c.max_len("title", "ééé", 3);
        assert!(c.finish(()).is_ok());

        let mut c = Checker::default();
        c.max_len("title", "abcd", 3);
        assert!(c.finish(()).is_err());
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("alex@example.com"));
        assert!(!is_valid_email("alex@example"));
        assert!(!is_valid_email("alex example@x.io"));
    }

    #[test]
    fn username_shape() {
        assert!(is_valid_username("alex.chen_99"));
        assert!(!is_valid_username("al"));
        assert!(!is_valid_username("alex chen"));
    }

    #[test]
    fn ids_must_be_positive_integers() {
        assert_eq!(parse_id("12"), Some(12));
        assert_eq!(parse_id("0"), None);
        assert_eq!(parse_id("-3"), None);
        assert_eq!(parse_id("abc"), None);
    }

    #[test]
    fn tags_are_trimmed_and_blank_dropped() {
        assert_eq!(split_tags(Some("AI, Food,,")), ["AI", "Food"]);
        assert!(split_tags(Some("")).is_empty());
        assert!(split_tags(None).is_empty());
    }

    #[test]
    fn optional_text_drops_blank() {
        assert_eq!(optional_text(Some(" hi ".into())), Some("hi".into()));
        assert_eq!(optional_text(Some("  ".into())), None);
        assert_eq!(optional_text(None), None);
    }
}
