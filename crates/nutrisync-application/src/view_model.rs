//! Read model assembled from a session for presentation.
//!
//! Nothing here is cached: every value is derived from the session each time
//! a view is assembled.

use nutrisync_core::analytics::{PredictionPoint, compute_insight, compute_weight_prediction};
use nutrisync_core::form::{FormInput, PlanProfile};
use nutrisync_core::plan::PlanResult;
use nutrisync_core::session::hydration::CAPACITY_LITERS;
use nutrisync_core::session::{ChatEntry, HydrationLevel, ProgressPoint, Session, SessionState};
use serde::Serialize;

/// What the front-end should render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum SessionView {
    Form(FormView),
    Dashboard(DashboardView),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormView {
    pub form: FormInput,
    /// A plan request is in flight.
    pub loading: bool,
}

/// One headline metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tile {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HydrationView {
    pub liters: f64,
    pub capacity: f64,
    pub percent: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub tiles: Vec<Tile>,
    pub recommendation: Option<String>,
    pub insight: &'static str,
    pub hydration: HydrationView,
    pub prediction: Vec<PredictionPoint>,
    pub chat: Vec<ChatEntry>,
    pub progress: Vec<ProgressPoint>,
    pub food_analysis: Option<String>,
    /// A newer plan request is in flight.
    pub refreshing: bool,
}

impl SessionView {
    /// Assembles the view for a session with no plan request in flight.
    pub fn assemble(session: &Session) -> Self {
        Self::assemble_with_loading(session, false)
    }

    pub fn assemble_with_loading(session: &Session, loading: bool) -> Self {
        match &session.state {
            SessionState::Empty => SessionView::Form(FormView {
                form: session.form.clone(),
                loading,
            }),
            SessionState::Populated(plan) => {
                SessionView::Dashboard(DashboardView::assemble(session, plan, loading))
            }
        }
    }

    pub fn is_dashboard(&self) -> bool {
        matches!(self, SessionView::Dashboard(_))
    }
}

impl DashboardView {
    fn assemble(session: &Session, plan: &PlanResult, refreshing: bool) -> Self {
        let form = &session.form;
        let prediction =
            compute_weight_prediction(form.weight_value(), &form.selection).collect();

        Self {
            tiles: tiles(plan),
            recommendation: plan.ai_plan.clone(),
            insight: compute_insight(insight_goal(form, plan)),
            hydration: HydrationView::from_level(&session.hydration),
            prediction,
            chat: session.chat.clone(),
            progress: session.progress.points().to_vec(),
            food_analysis: session.food_analysis.clone(),
            refreshing,
        }
    }
}

impl HydrationView {
    pub fn from_level(level: &HydrationLevel) -> Self {
        let liters = level.liters();
        Self {
            liters,
            capacity: CAPACITY_LITERS,
            percent: level.percent(),
            label: format!("{} / {} Liters", liters, CAPACITY_LITERS),
        }
    }
}

/// Activity forms carry no goal, so the service's echoed goal is preferred there.
fn insight_goal<'a>(form: &'a FormInput, plan: &'a PlanResult) -> &'a str {
    match form.profile {
        PlanProfile::Goal => form.selection.as_str(),
        PlanProfile::Activity => plan.goal.as_deref().unwrap_or(&form.selection),
    }
}

fn tiles(plan: &PlanResult) -> Vec<Tile> {
    let mut tiles = Vec::new();
    if let Some(score) = plan.smart_score {
        tiles.push(Tile {
            label: "Smart Score",
            value: format!("{}%", score),
        });
    }
    if let Some(calories) = plan.calories {
        tiles.push(Tile {
            label: "Calories",
            value: calories.to_string(),
        });
    }
    if let Some(protein) = plan.protein {
        tiles.push(Tile {
            label: "Protein",
            value: format!("{} g", protein),
        });
    }
    if let Some(bmi) = plan.bmi {
        tiles.push(Tile {
            label: "BMI",
            value: bmi.to_string(),
        });
    }
    if let Some(goal) = &plan.goal {
        tiles.push(Tile {
            label: "Goal",
            value: goal.clone(),
        });
    }
    tiles
}
