//! Client-side input checks. Run before any network call.
//!
//! Checks short-circuit: only the first failing field is reported.

use super::entities::QueryParams;
use super::errors::{ValidationError, ValidationKind};
use super::form::{FormField, QueryForm};
use chrono::NaiveDate;

/// Wire and picker format for dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Username must be non-blank, start with `@` and be at least two characters.
pub fn validate_username(username: &str) -> Result<&str, ValidationError> {
    if username.trim().is_empty() {
        return Err(ValidationError::new(
            FormField::Username,
            ValidationKind::MissingUsername,
        ));
    }
    if username.chars().count() < 2 || !username.starts_with('@') {
        return Err(ValidationError::new(
            FormField::Username,
            ValidationKind::InvalidUsername,
        ));
    }
    Ok(username)
}

/// Order: token, from, to, then date format and range.
pub fn validate_query(form: &QueryForm) -> Result<QueryParams, ValidationError> {
    let token = form.token.trim();
    if token.is_empty() {
        return Err(ValidationError::new(
            FormField::Query,
            ValidationKind::MissingToken,
        ));
    }
    if form.from.trim().is_empty() {
        return Err(ValidationError::new(
            FormField::From,
            ValidationKind::MissingFrom,
        ));
    }
    if form.to.trim().is_empty() {
        return Err(ValidationError::new(FormField::To, ValidationKind::MissingTo));
    }

    let from = parse_date(&form.from)
        .ok_or_else(|| ValidationError::new(FormField::From, ValidationKind::MalformedDate))?;
    let to = parse_date(&form.to)
        .ok_or_else(|| ValidationError::new(FormField::To, ValidationKind::MalformedDate))?;
    if from > to {
        return Err(ValidationError::new(
            FormField::To,
            ValidationKind::InvertedRange,
        ));
    }

    Ok(QueryParams {
        token: token.to_string(),
        from,
        to,
        classifier_model: form.classifier_model,
        training_config: form.training_config,
    })
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn form(token: &str, from: &str, to: &str) -> QueryForm {
        QueryForm {
            token: token.into(),
            from: from.into(),
            to: to.into(),
            ..QueryForm::default()
        }
    }

    #[test]
    fn test_username_rules() {
        assert_eq!(validate_username("@alice"), Ok("@alice"));
        assert_eq!(
            validate_username("   ").unwrap_err().kind,
            ValidationKind::MissingUsername
        );
        assert_eq!(
            validate_username("@").unwrap_err().kind,
            ValidationKind::InvalidUsername
        );
        assert_eq!(
            validate_username("alice").unwrap_err().kind,
            ValidationKind::InvalidUsername
        );
    }

    #[test]
    fn test_query_short_circuits_on_token() {
        let err = validate_query(&form("", "", "")).unwrap_err();
        assert_eq!(err.field, FormField::Query);
        assert_eq!(err.kind, ValidationKind::MissingToken);
    }

    #[test]
    fn test_query_reports_from_before_to() {
        let err = validate_query(&form("abc", " ", "")).unwrap_err();
        assert_eq!(err.field, FormField::From);

        let err = validate_query(&form("abc", "2014-12-01", "")).unwrap_err();
        assert_eq!(err.field, FormField::To);
        assert_eq!(err.kind, ValidationKind::MissingTo);
    }

    #[test]
    fn test_query_rejects_bad_dates() {
        let err = validate_query(&form("abc", "01.12.2014", "2014-12-02")).unwrap_err();
        assert_eq!(err, ValidationError::new(FormField::From, ValidationKind::MalformedDate));

        let err = validate_query(&form("abc", "2014-12-05", "2014-12-01")).unwrap_err();
        assert_eq!(err, ValidationError::new(FormField::To, ValidationKind::InvertedRange));
    }

    #[test]
    fn test_query_valid() {
        let params = validate_query(&form(" abc123 ", "2014-12-01", "2014-12-01")).unwrap();
        assert_eq!(params.token, "abc123");
        assert_eq!(format_date(params.from), "2014-12-01");
        assert_eq!(params.from, params.to);
    }

    proptest! {
        #[test]
        fn prop_usernames_without_at_prefix_rejected(s in "[^@].{0,30}") {
            prop_assert!(validate_username(&s).is_err());
        }

        #[test]
        fn prop_at_prefixed_usernames_accepted(s in "@[a-zA-Z0-9_]{1,15}") {
            prop_assert_eq!(validate_username(&s), Ok(s.as_str()));
        }
    }
}
