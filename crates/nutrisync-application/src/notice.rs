//! User-facing results of session actions.

use nutrisync_core::error::NutriError;
use serde::Serialize;

/// Broad category of a notice, used by front-ends to pick styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    /// The service rejected the input.
    Validation,
    /// The service could not be reached.
    Connectivity,
    /// The service answered, but not usefully.
    Service,
    /// Local storage failed.
    Storage,
    /// Anything else.
    Internal,
}

/// A message to show the user after an action failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<&NutriError> for Notice {
    fn from(err: &NutriError) -> Self {
        match err {
            NutriError::Validation(message) => Notice::new(NoticeKind::Validation, message.clone()),
            NutriError::Network(_) => Notice::new(
                NoticeKind::Connectivity,
                "Could not reach the nutrition service. Check your connection and try again.",
            ),
            NutriError::Service { status, .. } => Notice::new(
                NoticeKind::Service,
                format!("The nutrition service is unavailable right now (status {}).", status),
            ),
            NutriError::UnexpectedResponse { .. } => Notice::new(
                NoticeKind::Service,
                "The nutrition service sent a response this client does not understand.",
            ),
            NutriError::MalformedPersistedState(_)
            | NutriError::Io { .. }
            | NutriError::Serialization { .. }
            | NutriError::Migration(_) => Notice::new(
                NoticeKind::Storage,
                format!("Saved session data could not be updated: {}", err),
            ),
            NutriError::UnknownField(_) | NutriError::Config(_) | NutriError::Internal(_) => {
                Notice::new(NoticeKind::Internal, err.to_string())
            }
        }
    }
}

impl From<NutriError> for Notice {
    fn from(err: NutriError) -> Self {
        Notice::from(&err)
    }
}

/// What an action did to the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "notice", rename_all = "snake_case")]
pub enum ActionOutcome {
    /// The session changed.
    Applied,
    /// Nothing to do (hydration already full, blank chat message...).
    Unchanged,
    /// A newer request or a restart made this response obsolete; it was dropped.
    Superseded,
    /// The action failed; the session is as it was before.
    Failed(Notice),
}

impl ActionOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, ActionOutcome::Applied)
    }

    pub fn notice(&self) -> Option<&Notice> {
        match self {
            ActionOutcome::Failed(notice) => Some(notice),
            _ => None,
        }
    }
}
