//! Field-level input validation.
//!
//! Every check appends its failures to a shared [`ValidationErrors`]
//! accumulator and never stops the checks that follow, so a single response
//! reports every problem with the request. Checks return the typed value when
//! the field is present and valid.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{CreateVideoRequest, NewVideo, Resolution, UpdateVideoRequest, VideoPatch};

pub const TITLE_MAX_LEN: usize = 40;
pub const AUTHOR_MAX_LEN: usize = 20;
pub const MIN_AGE: u8 = 1;
pub const MAX_AGE: u8 = 18;

static ISO_TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}\.[0-9]{3}Z$")
        .expect("hardcoded timestamp regex is invalid")
});

/// A single validation failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldError {
    pub message: String,
    /// `None` for request-level errors such as a malformed id.
    pub field: Option<String>,
}

/// Ordered list of validation failures, serialized as `{"errorsMessages": [...]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationErrors {
    pub errors_messages: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure on a named field.
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors_messages.push(FieldError {
            message: message.into(),
            field: Some(field.to_string()),
        });
    }

    /// Record a failure that belongs to the request rather than a field.
    pub fn push_global(&mut self, message: impl Into<String>) {
        self.errors_messages.push(FieldError {
            message: message.into(),
            field: None,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors_messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors_messages.len()
    }

    #[cfg(test)]
    pub fn has_field(&self, field: &str) -> bool {
        self.errors_messages
            .iter()
            .any(|e| e.field.as_deref() == Some(field))
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<&str> = self
            .errors_messages
            .iter()
            .map(|e| e.message.as_str())
            .collect();
        write!(f, "{}", messages.join("; "))
    }
}

/// Parse a path id. Only integers are accepted; surrounding whitespace is ignored.
pub fn parse_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

/// The error reported when a path id is not an integer.
pub fn invalid_id() -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.push_global("Id should be an integer number");
    errors
}

/// Absent, `null`, `false`, `0` and `""` all count as missing.
fn is_falsy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Bool(b)) => !b,
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

fn check_required_string(
    value: Option<&Value>,
    field: &str,
    label: &str,
    max_len: usize,
    errors: &mut ValidationErrors,
) -> Option<String> {
    if is_falsy(value) {
        errors.push(field, format!("{} is required", label));
        return None;
    }

    let Some(Value::String(s)) = value else {
        errors.push(field, format!("{} should be a string", label));
        return None;
    };

    if s.chars().count() > max_len {
        errors.push(
            field,
            format!("Max length of {} is {} characters", field, max_len),
        );
        return None;
    }

    Some(s.clone())
}

pub fn check_title(value: Option<&Value>, errors: &mut ValidationErrors) -> Option<String> {
    check_required_string(value, "title", "Title", TITLE_MAX_LEN, errors)
}

pub fn check_author(value: Option<&Value>, errors: &mut ValidationErrors) -> Option<String> {
    check_required_string(value, "author", "Author", AUTHOR_MAX_LEN, errors)
}

pub fn check_available_resolutions(
    value: Option<&Value>,
    errors: &mut ValidationErrors,
) -> Option<Vec<Resolution>> {
    const FIELD: &str = "availableResolutions";

    let items = match value {
        None | Some(Value::Null) => return None,
        Some(Value::Array(items)) => items,
        Some(_) => {
            errors.push(FIELD, "AvailableResolutions should be an array");
            return None;
        }
    };

    let before = errors.len();

    if items.is_empty() {
        errors.push(FIELD, "AvailableResolutions shouldn't be an empty array");
    }

    let parsed: Option<Vec<Resolution>> = items
        .iter()
        .map(|item| item.as_str().and_then(Resolution::parse))
        .collect();
    if parsed.is_none() {
        let allowed: Vec<&str> = Resolution::ALL.iter().map(|r| r.as_str()).collect();
        errors.push(
            FIELD,
            format!("Allowed values are [ {} ]", allowed.join(", ")),
        );
    }

    if errors.len() > before {
        return None;
    }
    parsed
}

pub fn check_can_be_downloaded(
    value: Option<&Value>,
    errors: &mut ValidationErrors,
) -> Option<bool> {
    match value {
        None => None,
        Some(Value::Bool(b)) => Some(*b),
        Some(_) => {
            errors.push("canBeDownloaded", "CanBeDownloaded should be a boolean");
            None
        }
    }
}

pub fn check_min_age_restriction(
    value: Option<&Value>,
    errors: &mut ValidationErrors,
) -> Option<u8> {
    const FIELD: &str = "minAgeRestriction";

    let number = match value {
        None | Some(Value::Null) => return None,
        Some(Value::Number(n)) => n,
        Some(_) => {
            errors.push(FIELD, "MinAgeRestriction should be a number or null");
            return None;
        }
    };

    let in_range = number
        .as_f64()
        .filter(|n| n.fract() == 0.0 && *n >= f64::from(MIN_AGE) && *n <= f64::from(MAX_AGE));

    match in_range {
        Some(n) => Some(n as u8),
        None => {
            errors.push(
                FIELD,
                format!(
                    "MinAgeRestriction should be an integer from {} to {}",
                    MIN_AGE, MAX_AGE
                ),
            );
            None
        }
    }
}

pub fn check_publication_date(
    value: Option<&Value>,
    errors: &mut ValidationErrors,
) -> Option<String> {
    match value {
        None => None,
        Some(Value::String(s)) if ISO_TIMESTAMP_REGEX.is_match(s) => Some(s.clone()),
        Some(_) => {
            errors.push("publicationDate", "PublicationDate should be an ISO String");
            None
        }
    }
}

/// Validate a create request. Only title, author and resolutions are client-supplied.
pub fn validate_create(request: &CreateVideoRequest) -> Result<NewVideo, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let title = check_title(request.title.as_ref(), &mut errors);
    let author = check_author(request.author.as_ref(), &mut errors);
    let available_resolutions =
        check_available_resolutions(request.available_resolutions.as_ref(), &mut errors);

    match (title, author) {
        (Some(title), Some(author)) if errors.is_empty() => Ok(NewVideo {
            title,
            author,
            available_resolutions,
        }),
        _ => Err(errors),
    }
}

/// Validate an update request across all six mutable fields.
pub fn validate_update(request: &UpdateVideoRequest) -> Result<VideoPatch, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let title = check_title(request.title.as_ref(), &mut errors);
    let author = check_author(request.author.as_ref(), &mut errors);
    let available_resolutions =
        check_available_resolutions(request.available_resolutions.as_ref(), &mut errors);
    let can_be_downloaded =
        check_can_be_downloaded(request.can_be_downloaded.as_ref(), &mut errors);
    let min_age_restriction =
        check_min_age_restriction(request.min_age_restriction.as_ref(), &mut errors);
    let publication_date = check_publication_date(request.publication_date.as_ref(), &mut errors);

    match (title, author) {
        (Some(title), Some(author)) if errors.is_empty() => Ok(VideoPatch {
            title,
            author,
            can_be_downloaded,
            min_age_restriction,
            available_resolutions,
            publication_date,
        }),
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run<T>(check: fn(Option<&Value>, &mut ValidationErrors) -> T, value: Value) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        check(Some(&value), &mut errors);
        errors
    }

    fn messages(errors: &ValidationErrors) -> Vec<&str> {
        errors
            .errors_messages
            .iter()
            .map(|e| e.message.as_str())
            .collect()
    }

    #[test]
    fn test_title_required() {
        for falsy in [Value::Null, json!(""), json!(false), json!(0)] {
            let errors = run(check_title, falsy);
            assert_eq!(messages(&errors), vec!["Title is required"]);
        }

        let mut errors = ValidationErrors::new();
        check_title(None, &mut errors);
        assert!(errors.has_field("title"));
    }

    #[test]
    fn test_title_type_and_length() {
        let errors = run(check_title, json!(42));
        assert_eq!(messages(&errors), vec!["Title should be a string"]);

        let errors = run(check_title, json!("x".repeat(41)));
        assert_eq!(messages(&errors), vec!["Max length of title is 40 characters"]);

        let errors = run(check_title, json!("x".repeat(40)));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_author_length() {
        let errors = run(check_author, json!("a".repeat(21)));
        assert_eq!(messages(&errors), vec!["Max length of author is 20 characters"]);
        assert!(run(check_author, json!("a".repeat(20))).is_empty());
    }

    #[test]
    fn test_resolutions() {
        let mut errors = ValidationErrors::new();
        assert_eq!(check_available_resolutions(None, &mut errors), None);
        assert!(run(check_available_resolutions, Value::Null).is_empty());

        let mut errors = ValidationErrors::new();
        let parsed = check_available_resolutions(Some(&json!(["P144", "P2160"])), &mut errors);
        assert!(errors.is_empty());
        assert_eq!(parsed, Some(vec![Resolution::P144, Resolution::P2160]));

        let all = json!(["P144", "P240", "P360", "P480", "P720", "P1080", "P1440", "P2160"]);
        assert!(run(check_available_resolutions, all).is_empty());

        let errors = run(check_available_resolutions, json!("P144"));
        assert_eq!(messages(&errors), vec!["AvailableResolutions should be an array"]);

        let errors = run(check_available_resolutions, json!([]));
        assert_eq!(
            messages(&errors),
            vec!["AvailableResolutions shouldn't be an empty array"]
        );

        let errors = run(check_available_resolutions, json!(["P144", "P9000", 3]));
        assert_eq!(
            messages(&errors),
            vec!["Allowed values are [ P144, P240, P360, P480, P720, P1080, P1440, P2160 ]"]
        );
    }

    #[test]
    fn test_can_be_downloaded() {
        let mut errors = ValidationErrors::new();
        assert_eq!(check_can_be_downloaded(None, &mut errors), None);
        assert_eq!(check_can_be_downloaded(Some(&json!(true)), &mut errors), Some(true));
        assert!(errors.is_empty());

        assert_eq!(run(check_can_be_downloaded, Value::Null).len(), 1);
        assert_eq!(run(check_can_be_downloaded, json!("true")).len(), 1);
    }

    #[test]
    fn test_min_age_restriction() {
        assert!(run(check_min_age_restriction, Value::Null).is_empty());
        assert!(run(check_min_age_restriction, json!(1)).is_empty());
        assert!(run(check_min_age_restriction, json!(18)).is_empty());
        assert!(run(check_min_age_restriction, json!(12.0)).is_empty());

        let errors = run(check_min_age_restriction, json!("16"));
        assert_eq!(messages(&errors), vec!["MinAgeRestriction should be a number or null"]);

        for bad in [json!(0), json!(19), json!(-3), json!(5.5)] {
            let errors = run(check_min_age_restriction, bad);
            assert_eq!(
                messages(&errors),
                vec!["MinAgeRestriction should be an integer from 1 to 18"]
            );
        }
    }

    #[test]
    fn test_publication_date() {
        let mut errors = ValidationErrors::new();
        let parsed = check_publication_date(Some(&json!("2024-09-22T10:30:00.000Z")), &mut errors);
        assert_eq!(parsed.as_deref(), Some("2024-09-22T10:30:00.000Z"));
        assert!(errors.is_empty());

        for bad in [
            json!("2024-09-22T10:30:00Z"),
            json!("2024-09-22"),
            json!("2024-09-22T10:30:00.000+01:00"),
            Value::Null,
            json!(1727000000),
            json!("٢٠٢٤-09-22T10:30:00.000Z"),
        ] {
            let errors = run(check_publication_date, bad);
            assert_eq!(messages(&errors), vec!["PublicationDate should be an ISO String"]);
        }
    }

    #[test]
    fn test_validate_create_accumulates() {
        let request = CreateVideoRequest {
            title: None,
            author: Some(json!("a".repeat(25))),
            available_resolutions: Some(json!(["P1"])),
        };

        let errors = validate_create(&request).unwrap_err();
        let fields: Vec<_> = errors
            .errors_messages
            .iter()
            .map(|e| e.field.as_deref().unwrap())
            .collect();
        assert_eq!(fields, vec!["title", "author", "availableResolutions"]);
    }

    #[test]
    fn test_validate_update_builds_patch() {
        let request: UpdateVideoRequest = serde_json::from_value(json!({
            "title": "New",
            "author": "Someone",
            "canBeDownloaded": true,
            "minAgeRestriction": null
        }))
        .unwrap();

        let patch = validate_update(&request).unwrap();
        assert_eq!(patch.title, "New");
        assert_eq!(patch.can_be_downloaded, Some(true));
        assert_eq!(patch.min_age_restriction, None);
        assert_eq!(patch.available_resolutions, None);
        assert_eq!(patch.publication_date, None);
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("12"), Some(12));
        assert_eq!(parse_id(" 3 "), Some(3));
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id("1.5"), None);
        assert_eq!(parse_id("1.0"), None);
        assert_eq!(parse_id("1e0"), None);
        assert_eq!(invalid_id().errors_messages[0].field, None);
    }
}
