//! Navigation signals emitted by the intake form
//!
//! The form does not route anywhere itself. It publishes signals on a
//! [`SignalBus`] and whatever presentation layer is attached (a router, a
//! terminal prompt, a test) subscribes and reacts.
//!
//! ```text
//! IntakeForm::submit ──▶ SignalBus::publish(SubmissionSucceeded) ──▶ router ──▶ confirmation view
//! IntakeForm::close  ──▶ SignalBus::publish(CloseRequested)      ──▶ router ──▶ hide form
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// One-shot navigation transition requested by the intake form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "signal", rename_all = "snake_case")]
pub enum NavigationSignal {
    /// A creation request was acknowledged; show the confirmation view
    SubmissionSucceeded { order_id: Uuid },
    /// The form was dismissed
    CloseRequested,
}

impl NavigationSignal {
    pub fn name(&self) -> &'static str {
        match self {
            NavigationSignal::SubmissionSucceeded { .. } => "submission_succeeded",
            NavigationSignal::CloseRequested => "close_requested",
        }
    }
}

/// Envelope wrapping a signal with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalEnvelope {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub signal: NavigationSignal,
}

impl SignalEnvelope {
    pub fn new(signal: NavigationSignal) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            signal,
        }
    }
}

/// Broadcast-based signal bus
///
/// Cheap to clone. Signals published while nobody listens are dropped.
#[derive(Debug, Clone)]
pub struct SignalBus {
    sender: broadcast::Sender<SignalEnvelope>,
}

impl SignalBus {
    /// Create a new bus buffering up to `capacity` signals per lagging receiver
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish a signal, returning how many receivers will see it
    pub fn publish(&self, signal: NavigationSignal) -> usize {
        tracing::debug!(signal = signal.name(), "publishing navigation signal");
        // send() only fails when there are no receivers
        self.sender.send(SignalEnvelope::new(signal)).unwrap_or(0)
    }

    /// Subscribe to signals published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<SignalEnvelope> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for SignalBus {
    fn default() -> Self {
        Self::new(64)
    }
}
