//! Session state model.

use serde::{Deserialize, Serialize};

use crate::form::{FormInput, PlanProfile};
use crate::plan::PlanResult;
use crate::session::hydration::HydrationLevel;
use crate::session::progress::ProgressSeries;

/// Which screen the session is on.
///
/// Holding a plan is what puts the session on the dashboard; there is no
/// separate flag.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "plan")]
pub enum SessionState {
    /// No plan yet: the form is shown.
    #[default]
    Empty,
    /// A plan has been generated or rehydrated: the dashboard is shown.
    Populated(PlanResult),
}

impl SessionState {
    pub fn plan(&self) -> Option<&PlanResult> {
        match self {
            SessionState::Empty => None,
            SessionState::Populated(plan) => Some(plan),
        }
    }

    pub fn is_populated(&self) -> bool {
        matches!(self, SessionState::Populated(_))
    }
}

/// One exchange in the chat box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEntry {
    pub user_text: String,
    pub ai_reply: String,
}

/// Everything one client session holds.
///
/// Only the plan (with its form snapshot) outlives the process; the
/// accumulators start over on every launch.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    pub form: FormInput,
    pub state: SessionState,
    pub hydration: HydrationLevel,
    pub chat: Vec<ChatEntry>,
    pub progress: ProgressSeries,
    /// Latest food image analysis, if any.
    pub food_analysis: Option<String>,
}

impl Session {
    /// Creates an empty session whose form uses the given profile.
    pub fn new(profile: PlanProfile) -> Self {
        Self {
            form: FormInput::new(profile),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_empty() {
        let session = Session::new(PlanProfile::Goal);
        assert_eq!(session.state, SessionState::Empty);
        assert!(session.state.plan().is_none());
        assert_eq!(session.hydration.liters(), 0.0);
        assert!(session.chat.is_empty());
        assert!(session.progress.is_empty());
        assert!(session.food_analysis.is_none());
    }

    #[test]
    fn test_populated_exposes_plan() {
        let state = SessionState::Populated(PlanResult::with_calories(2000.0));
        assert!(state.is_populated());
        assert_eq!(state.plan().and_then(|p| p.calories), Some(2000.0));
    }
}
