//! Application layer for NutriSync.
//!
//! Owns the session controller that coordinates the input model, the plan
//! service, durable storage and the dashboard read model.

pub mod notice;
pub mod session;
pub mod view_model;

pub use notice::{ActionOutcome, Notice, NoticeKind};
pub use session::SessionController;
pub use view_model::{DashboardView, FormView, HydrationView, SessionView, Tile};
