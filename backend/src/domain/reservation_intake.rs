//! Public reservation form and the staff view of recent reservations.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use regex::Regex;
use tracing::{info, warn};

use crate::domain::ports::{ListQuery, RecordStore, ReservationIntakeCommand};
use crate::domain::{Collection, Error, Feedback, Record, Reservation, encode_fields};

/// Number of recent reservations paged through by staff.
pub const RECENT_RESERVATION_LIMIT: u32 = 100;
/// Reservations shown per page.
pub const RESERVATIONS_PER_PAGE: usize = 10;

/// Validation errors for the public reservation form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReservationDraftError {
    #[error("name is required")]
    MissingName,
    #[error("email is required")]
    MissingEmail,
    #[error("email address is not valid")]
    InvalidEmail,
    #[error("phone is required")]
    MissingPhone,
    #[error("phone may only contain digits, spaces, dashes, plus signs and parentheses")]
    InvalidPhone,
}

impl ReservationDraftError {
    /// Form field the error refers to.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingName => "name",
            Self::MissingEmail | Self::InvalidEmail => "email",
            Self::MissingPhone | Self::InvalidPhone => "phone",
        }
    }

    /// Machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingName | Self::MissingEmail | Self::MissingPhone => "required",
            Self::InvalidEmail => "invalid_email",
            Self::InvalidPhone => "invalid_phone",
        }
    }
}

/// Trimmed and validated reservation input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationDraft(Reservation);

impl ReservationDraft {
    /// Trim every field and validate.
    ///
    /// # Examples
    /// ```
    /// use intake::domain::{ReservationDraft, ReservationDraftError};
    ///
    /// let draft = ReservationDraft::try_from_parts(" Jo ", "jo@example.com", "+1 (555) 010-2000", "")
    ///     .expect("valid reservation");
    /// assert_eq!(draft.reservation().name, "Jo");
    ///
    /// let err = ReservationDraft::try_from_parts("Jo", "jo@example", "555", "")
    ///     .expect_err("missing tld");
    /// assert_eq!(err, ReservationDraftError::InvalidEmail);
    /// ```
    pub fn try_from_parts(
        name: &str,
        email: &str,
        phone: &str,
        special_requests: &str,
    ) -> Result<Self, ReservationDraftError> {
        let name = name.trim();
        let email = email.trim();
        let phone = phone.trim();

        if name.is_empty() {
            return Err(ReservationDraftError::MissingName);
        }
        if email.is_empty() {
            return Err(ReservationDraftError::MissingEmail);
        }
        if !is_valid_email(email) {
            return Err(ReservationDraftError::InvalidEmail);
        }
        if phone.is_empty() {
            return Err(ReservationDraftError::MissingPhone);
        }
        if !is_valid_phone(phone) {
            return Err(ReservationDraftError::InvalidPhone);
        }

        Ok(Self(Reservation {
            name: name.to_owned(),
            email: email.to_owned(),
            phone: phone.to_owned(),
            special_requests: special_requests.trim().to_owned(),
        }))
    }

    /// The validated reservation fields.
    pub fn reservation(&self) -> &Reservation {
        &self.0
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static PHONE_RE: OnceLock<Regex> = OnceLock::new();

/// `local@domain.tld` with a tld of two or more letters.
fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Presence is checked separately; this only constrains the characters.
fn phone_regex() -> &'static Regex {
    PHONE_RE.get_or_init(|| {
        let pattern = r"^[0-9+\s()-]*$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("phone regex failed to compile: {error}"))
    })
}

fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

fn is_valid_phone(phone: &str) -> bool {
    phone_regex().is_match(phone)
}

/// Result of a public reservation submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationReceipt {
    /// The stored reservation.
    pub record: Record<Reservation>,
}

impl ReservationReceipt {
    /// Confirmation banner for the public form.
    #[must_use]
    pub fn feedback(&self) -> Feedback {
        Feedback::reservation_received()
    }
}

/// One page of recent reservations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationPage {
    pub reservations: Vec<Record<Reservation>>,
    pub page: usize,
    /// `ceil(total / per page)`; zero when there are no reservations.
    pub total_pages: usize,
    pub total: usize,
}

impl ReservationPage {
    /// Slice `rows` into the requested page, clamping the page number.
    #[must_use]
    pub fn from_rows(rows: Vec<Record<Reservation>>, requested: usize) -> Self {
        let total = rows.len();
        let total_pages = total.div_ceil(RESERVATIONS_PER_PAGE);
        let page = requested.clamp(1, total_pages.max(1));
        let reservations = rows
            .into_iter()
            .skip((page - 1) * RESERVATIONS_PER_PAGE)
            .take(RESERVATIONS_PER_PAGE)
            .collect();
        Self {
            reservations,
            page,
            total_pages,
            total,
        }
    }
}

/// Public reservation intake and the staff reservation pages.
#[derive(Clone)]
pub struct ReservationIntakeService {
    store: Arc<dyn RecordStore>,
}

impl ReservationIntakeService {
    /// Create a service over `store`.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ReservationIntakeCommand for ReservationIntakeService {
    async fn submit(&self, draft: &ReservationDraft) -> Result<ReservationReceipt, Error> {
        let fields = encode_fields(draft.reservation())
            .map_err(|err| Error::internal(format!("failed to encode reservation: {err}")))?;
        let row = self.store.create(Collection::Reservations, fields).await?;
        info!(record_id = %row.id, "reservation received");
        let record = row
            .decode::<Reservation>()
            .map_err(|err| Error::internal(format!("stored reservation unreadable: {err}")))?;
        Ok(ReservationReceipt { record })
    }

    async fn recent_page(&self, page: usize) -> Result<ReservationPage, Error> {
        let rows = self
            .store
            .list(
                Collection::Reservations,
                &ListQuery::newest(1, RECENT_RESERVATION_LIMIT),
            )
            .await?;
        let records = rows
            .iter()
            .filter_map(|row| match row.decode::<Reservation>() {
                Ok(record) => Some(record),
                Err(error) => {
                    warn!(record_id = %row.id, %error, "skipping unreadable reservation");
                    None
                }
            })
            .collect();
        Ok(ReservationPage::from_rows(records, page))
    }
}
