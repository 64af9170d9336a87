//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::{
    CompanyDraftError, Error, GuestSignInError, LoginValidationError, ReservationDraftError,
};

/// Build an `invalid_request` error naming the offending field.
pub(crate) fn field_error(message: impl Into<String>, field: &str, code: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code,
    }))
}

pub(crate) fn map_login_validation_error(err: &LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyUsername => {
            field_error(err.to_string(), "username", "empty_username")
        }
        LoginValidationError::EmptyPassword => {
            field_error(err.to_string(), "password", "empty_password")
        }
    }
}

pub(crate) fn map_guest_sign_in_error(err: &GuestSignInError) -> Error {
    let field = match err {
        GuestSignInError::EmptyGuestCode => "guestCode",
        GuestSignInError::EmptyClientName => "clientName",
    };
    field_error(err.to_string(), field, "required")
}

pub(crate) fn map_company_draft_error(err: &CompanyDraftError) -> Error {
    field_error(err.to_string(), err.field(), "required")
}

pub(crate) fn map_reservation_draft_error(err: &ReservationDraftError) -> Error {
    field_error(err.to_string(), err.field(), err.code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;
    use serde_json::Value;

    fn detail<'a>(error: &'a Error, key: &str) -> Option<&'a str> {
        error.details().and_then(|d| d.get(key)).and_then(Value::as_str)
    }

    #[rstest]
    #[case(ReservationDraftError::InvalidEmail, "email", "invalid_email")]
    #[case(ReservationDraftError::MissingPhone, "phone", "required")]
    fn reservation_errors_name_field_and_code(
        #[case] err: ReservationDraftError,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let error = map_reservation_draft_error(&err);
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(detail(&error, "field"), Some(field));
        assert_eq!(detail(&error, "code"), Some(code));
    }

    #[rstest]
    fn guest_errors_use_wire_field_names() {
        let error = map_guest_sign_in_error(&GuestSignInError::EmptyGuestCode);
        assert_eq!(detail(&error, "field"), Some("guestCode"));
    }
}
