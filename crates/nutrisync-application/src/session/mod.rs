//! Session control: the single owner of all session state.

pub mod controller;
pub mod tokens;

pub use controller::SessionController;
pub use tokens::{RequestSlot, RequestTicket};
