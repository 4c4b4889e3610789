//! Request tokens for latest-wins remote calls.
//!
//! Each channel (plan, progress, food analysis) owns a [`RequestSlot`].
//! Issuing a new ticket cancels the previous one and bumps the generation,
//! so a response that arrives late can be recognized and dropped.
//!
//! A slot only counts as pending while the newest ticket is alive. Dropping
//! that ticket, for example when the task awaiting the response is aborted,
//! clears the pending flag without any explicit call.

use std::sync::{Arc, Weak};

use tokio_util::sync::CancellationToken;

/// Proof that a request was issued at a given generation.
#[derive(Debug, Clone)]
pub struct RequestTicket {
    generation: u64,
    token: CancellationToken,
    _in_flight: Arc<()>,
}

impl RequestTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once a newer request or a reset has taken over.
    pub async fn cancelled(&self) {
        self.token.cancelled().await
    }
}

/// Tracks the newest request of one channel.
#[derive(Debug, Default)]
pub struct RequestSlot {
    generation: u64,
    token: CancellationToken,
    in_flight: Weak<()>,
}

impl RequestSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new request, cancelling whatever was in flight.
    pub fn issue(&mut self) -> RequestTicket {
        self.advance();
        let in_flight = Arc::new(());
        self.in_flight = Arc::downgrade(&in_flight);
        RequestTicket {
            generation: self.generation,
            token: self.token.clone(),
            _in_flight: in_flight,
        }
    }

    /// Cancels the in-flight request, if any, without starting a new one.
    pub fn invalidate(&mut self) {
        self.advance();
        self.in_flight = Weak::new();
    }

    /// Marks the ticket's request as finished.
    ///
    /// Returns `false` when the ticket is stale; its result must be dropped.
    pub fn complete(&mut self, ticket: &RequestTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.in_flight = Weak::new();
        true
    }

    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Whether the newest request is still awaiting its response.
    pub fn is_pending(&self) -> bool {
        self.in_flight.strong_count() > 0
    }

    fn advance(&mut self) {
        self.token.cancel();
        self.token = CancellationToken::new();
        self.generation += 1;
    }
}
