//! Session domain: the state discriminator and the per-session accumulators.

pub mod hydration;
pub mod model;
pub mod progress;

pub use hydration::HydrationLevel;
pub use model::{ChatEntry, Session, SessionState};
pub use progress::{ProgressPoint, ProgressSeries};
