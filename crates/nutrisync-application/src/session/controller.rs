use std::future::Future;
use std::sync::Arc;

use nutrisync_core::api::NutritionApi;
use nutrisync_core::error::Result;
use nutrisync_core::form::{FormField, FormInput, PlanProfile, PlanRequest, coerce_number};
use nutrisync_core::plan::SavedPlan;
use nutrisync_core::repository::PlanRepository;
use nutrisync_core::session::{ChatEntry, ProgressSeries, Session, SessionState};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use super::tokens::{RequestSlot, RequestTicket};
use crate::notice::{ActionOutcome, Notice};
use crate::view_model::SessionView;

/// Session data plus the request slots guarding it.
struct ControllerState {
    session: Session,
    plan_requests: RequestSlot,
    progress_requests: RequestSlot,
    food_requests: RequestSlot,
}

/// The single owner of a client session.
///
/// `SessionController` is responsible for:
/// - Rehydrating the saved plan on startup
/// - Applying form edits
/// - Running the remote actions and committing their results
/// - Persisting the plan, and removing it on restart
/// - Assembling the read model for presentation
///
/// Remote failures never escape an action: they come back as
/// [`ActionOutcome::Failed`] with the session left untouched. The lock is
/// never held across a remote call, so the controller can be shared through
/// an `Arc` and a newer action can supersede an in-flight one.
pub struct SessionController {
    api: Arc<dyn NutritionApi>,
    repository: Arc<dyn PlanRepository>,
    inner: Mutex<ControllerState>,
}

impl SessionController {
    /// Creates a controller and rehydrates the saved plan, if any.
    ///
    /// An unreadable record is logged and treated as absent; startup
    /// always succeeds.
    pub async fn start(
        api: Arc<dyn NutritionApi>,
        repository: Arc<dyn PlanRepository>,
        profile: PlanProfile,
    ) -> Self {
        let mut session = Session::new(profile);

        match repository.load().await {
            Ok(Some(saved)) => {
                if let Some(form) = saved.form {
                    session.form = form;
                }
                session.state = SessionState::Populated(saved.plan);
                info!(saved_at = ?saved.saved_at, "Rehydrated saved plan");
            }
            Ok(None) => debug!("No saved plan; starting with an empty session"),
            Err(e) => warn!(error = %e, "Ignoring unreadable saved plan"),
        }

        Self {
            api,
            repository,
            inner: Mutex::new(ControllerState {
                session,
                plan_requests: RequestSlot::new(),
                progress_requests: RequestSlot::new(),
                food_requests: RequestSlot::new(),
            }),
        }
    }

    // ============================================================================
    // Reads
    // ============================================================================

    /// Returns a copy of the whole session.
    pub async fn snapshot(&self) -> Session {
        self.inner.lock().await.session.clone()
    }

    pub async fn state(&self) -> SessionState {
        self.inner.lock().await.session.state.clone()
    }

    pub async fn form(&self) -> FormInput {
        self.inner.lock().await.session.form.clone()
    }

    /// Whether a plan request is awaiting its response.
    pub async fn is_loading(&self) -> bool {
        self.inner.lock().await.plan_requests.is_pending()
    }

    /// Assembles the read model. Derived values are recomputed on every call.
    pub async fn view(&self) -> SessionView {
        let inner = self.inner.lock().await;
        SessionView::assemble_with_loading(&inner.session, inner.plan_requests.is_pending())
    }

    // ============================================================================
    // Actions
    // ============================================================================

    /// Replaces one form field.
    pub async fn set_field(&self, field: FormField, raw: impl Into<String>) {
        let raw = raw.into();
        debug!(%field, "Form field updated");
        self.inner.lock().await.session.form.set_field(field, raw);
    }

    /// Submits the form and commits the generated plan.
    ///
    /// A newer submission or a restart supersedes this one.
    pub async fn submit(&self) -> ActionOutcome {
        let (form, ticket) = {
            let mut inner = self.inner.lock().await;
            (inner.session.form.clone(), inner.plan_requests.issue())
        };
        let request = PlanRequest::from_form(&form);
        info!(generation = ticket.generation(), "Requesting plan");

        let Some(result) = run_until_superseded(&ticket, self.api.generate_plan(&request)).await
        else {
            debug!(generation = ticket.generation(), "Plan request superseded");
            return ActionOutcome::Superseded;
        };

        let mut inner = self.inner.lock().await;
        if !inner.plan_requests.complete(&ticket) {
            debug!(generation = ticket.generation(), "Dropping stale plan response");
            return ActionOutcome::Superseded;
        }

        match result {
            Ok(plan) => {
                inner.session.state = SessionState::Populated(plan.clone());
                if let Err(e) = self.repository.save(&SavedPlan::new(plan, form)).await {
                    error!(error = %e, "Failed to persist plan; it will not survive a restart");
                }
                info!("Plan committed");
                ActionOutcome::Applied
            }
            Err(e) => {
                warn!(error = %e, "Plan request failed");
                ActionOutcome::Failed(Notice::from(&e))
            }
        }
    }

    /// Drops the plan and its saved record, returning to the form.
    ///
    /// Any plan request still in flight is cancelled so it cannot
    /// repopulate the session afterwards.
    pub async fn restart(&self) -> ActionOutcome {
        let mut inner = self.inner.lock().await;
        inner.plan_requests.invalidate();
        inner.session.state = SessionState::Empty;
        info!("Session restarted");

        match self.repository.clear().await {
            Ok(()) => ActionOutcome::Applied,
            Err(e) => {
                error!(error = %e, "Failed to remove saved plan");
                ActionOutcome::Failed(Notice::from(&e))
            }
        }
    }

    /// Adds half a liter of water, up to the daily target.
    pub async fn add_water(&self) -> ActionOutcome {
        let mut inner = self.inner.lock().await;
        if inner.session.hydration.add_water() {
            debug!(liters = inner.session.hydration.liters(), "Water added");
            ActionOutcome::Applied
        } else {
            ActionOutcome::Unchanged
        }
    }

    /// Sends a chat message and appends the exchange to the transcript.
    ///
    /// Blank messages are ignored.
    pub async fn send_chat(&self, message: &str) -> ActionOutcome {
        let message = message.trim();
        if message.is_empty() {
            return ActionOutcome::Unchanged;
        }

        match self.api.send_chat_message(message).await {
            Ok(reply) => {
                let mut inner = self.inner.lock().await;
                inner.session.chat.push(ChatEntry {
                    user_text: message.to_string(),
                    ai_reply: reply,
                });
                ActionOutcome::Applied
            }
            Err(e) => {
                warn!(error = %e, "Chat message failed");
                ActionOutcome::Failed(Notice::from(&e))
            }
        }
    }

    /// Records a weight and replaces the progress series with the returned history.
    pub async fn track_weight(&self, raw_weight: &str) -> ActionOutcome {
        let weight = coerce_number(raw_weight);
        let ticket = self.inner.lock().await.progress_requests.issue();

        let Some(result) = run_until_superseded(&ticket, self.api.track_progress(weight)).await
        else {
            return ActionOutcome::Superseded;
        };

        let mut inner = self.inner.lock().await;
        if !inner.progress_requests.complete(&ticket) {
            return ActionOutcome::Superseded;
        }

        match result {
            Ok(history) => {
                debug!(points = history.len(), "Progress history received");
                inner.session.progress = ProgressSeries::from_weights(history);
                ActionOutcome::Applied
            }
            Err(e) => {
                warn!(error = %e, "Progress tracking failed");
                ActionOutcome::Failed(Notice::from(&e))
            }
        }
    }

    /// Sends a food photo for analysis and keeps the latest analysis text.
    pub async fn analyze_food(&self, image: &[u8]) -> ActionOutcome {
        let ticket = self.inner.lock().await.food_requests.issue();
        debug!(bytes = image.len(), "Sending food image");

        let Some(result) =
            run_until_superseded(&ticket, self.api.analyze_food_image(image)).await
        else {
            return ActionOutcome::Superseded;
        };

        let mut inner = self.inner.lock().await;
        if !inner.food_requests.complete(&ticket) {
            return ActionOutcome::Superseded;
        }

        match result {
            Ok(analysis) => {
                inner.session.food_analysis = Some(analysis);
                ActionOutcome::Applied
            }
            Err(e) => {
                warn!(error = %e, "Food analysis failed");
                ActionOutcome::Failed(Notice::from(&e))
            }
        }
    }
}

/// Awaits `request` unless the ticket is cancelled first.
///
/// Returns `None` when a newer request (or a reset) took over.
async fn run_until_superseded<T, F>(ticket: &RequestTicket, request: F) -> Option<Result<T>>
where
    F: Future<Output = Result<T>>,
{
    tokio::select! {
        _ = ticket.cancelled() => None,
        result = request => Some(result),
    }
}
