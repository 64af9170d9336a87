//! Timed feedback directives returned alongside flow outcomes.
//!
//! The server never runs timers. Each outcome carries the notice to show,
//! how long it stays visible, and an optional delayed navigation. Clients
//! apply the directive and cancel any pending navigation if the view is torn
//! down first.

use std::time::Duration;

/// Views a client can be directed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Landing page with the public reservation form.
    Home,
    /// Guest code entry.
    GuestSignIn,
    /// Retainer agreement review and signing.
    Agreement,
    /// Dedicated page shown when a guest code does not match.
    CodeError,
}

impl View {
    /// Stable identifier used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::GuestSignIn => "guest_sign_in",
            Self::Agreement => "agreement",
            Self::CodeError => "code_error",
        }
    }
}

/// Presentation style of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Transient banner across the view.
    Banner,
    /// Blocking modal that dismisses itself.
    Modal,
    /// Inline message next to the form.
    Inline,
    /// Success acknowledgement.
    Acknowledgement,
}

impl NoticeKind {
    /// Stable identifier used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Banner => "banner",
            Self::Modal => "modal",
            Self::Inline => "inline",
            Self::Acknowledgement => "acknowledgement",
        }
    }
}

/// A message with an auto-dismiss duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: &'static str,
    pub dismiss_after: Duration,
}

/// A navigation that fires after a delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    pub target: View,
    pub after: Duration,
}

/// Combined feedback directive for one outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Feedback {
    pub notice: Option<Notice>,
    pub navigation: Option<Navigation>,
}

pub const CODE_INVALID_MESSAGE: &str = "The code did not match. Please contact us for assistance.";
pub const NAME_MISMATCH_MESSAGE: &str = "The name does not match our records for this code.";
pub const DUPLICATE_MESSAGE: &str = "Error! Duplicate value entered.";
pub const THANK_YOU_MESSAGE: &str = "Thank you!";
pub const RESERVATION_RECEIVED_MESSAGE: &str = "You have submitted information. Thank you!";
pub const ALREADY_SUBMITTED_MESSAGE: &str = "This form has already been submitted.";

const CODE_INVALID_DELAY: Duration = Duration::from_millis(1_500);
const NAME_MISMATCH_DISMISS: Duration = Duration::from_secs(3);
const DUPLICATE_DISMISS: Duration = Duration::from_secs(5);
const ACKNOWLEDGEMENT_DISMISS: Duration = Duration::from_secs(2);
const RESERVATION_BANNER_DISMISS: Duration = Duration::from_secs(5);

impl Feedback {
    /// Banner, then the code-error view after 1.5s.
    #[must_use]
    pub fn code_invalid() -> Self {
        Self {
            notice: Some(Notice {
                kind: NoticeKind::Banner,
                message: CODE_INVALID_MESSAGE,
                dismiss_after: CODE_INVALID_DELAY,
            }),
            navigation: Some(Navigation {
                target: View::CodeError,
                after: CODE_INVALID_DELAY,
            }),
        }
    }

    /// Inline error for 3s; the guest may retry.
    #[must_use]
    pub fn name_mismatch() -> Self {
        Self {
            notice: Some(Notice {
                kind: NoticeKind::Inline,
                message: NAME_MISMATCH_MESSAGE,
                dismiss_after: NAME_MISMATCH_DISMISS,
            }),
            navigation: None,
        }
    }

    /// Immediate navigation to the agreement view.
    #[must_use]
    pub fn proceed_to_agreement() -> Self {
        Self {
            notice: None,
            navigation: Some(Navigation {
                target: View::Agreement,
                after: Duration::ZERO,
            }),
        }
    }

    /// Blocking modal for 5s with no navigation.
    #[must_use]
    pub fn duplicate() -> Self {
        Self {
            notice: Some(Notice {
                kind: NoticeKind::Modal,
                message: DUPLICATE_MESSAGE,
                dismiss_after: DUPLICATE_DISMISS,
            }),
            navigation: None,
        }
    }

    /// Acknowledgement followed by navigation once it is dismissed.
    #[must_use]
    pub fn acknowledged_then(target: View) -> Self {
        Self {
            notice: Some(Notice {
                kind: NoticeKind::Acknowledgement,
                message: THANK_YOU_MESSAGE,
                dismiss_after: ACKNOWLEDGEMENT_DISMISS,
            }),
            navigation: Some(Navigation {
                target,
                after: ACKNOWLEDGEMENT_DISMISS,
            }),
        }
    }

    /// Thank-you banner shown after a public reservation.
    #[must_use]
    pub fn reservation_received() -> Self {
        Self {
            notice: Some(Notice {
                kind: NoticeKind::Banner,
                message: RESERVATION_RECEIVED_MESSAGE,
                dismiss_after: RESERVATION_BANNER_DISMISS,
            }),
            navigation: None,
        }
    }

    /// Inline reminder that the view instance already submitted.
    #[must_use]
    pub fn already_submitted() -> Self {
        Self {
            notice: Some(Notice {
                kind: NoticeKind::Inline,
                message: ALREADY_SUBMITTED_MESSAGE,
                dismiss_after: NAME_MISMATCH_DISMISS,
            }),
            navigation: None,
        }
    }
}
