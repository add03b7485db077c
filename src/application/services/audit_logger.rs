//! Non-blocking dispatch of access-log events.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::{SendTimeoutError, TrySendError};
use tracing::{error, warn};

use crate::domain::access_event::AccessEvent;

/// Hands access events to the background [`crate::domain::audit_worker::AuditWorker`].
///
/// The queue is bounded. When it is full, `record` waits at most
/// `enqueue_timeout` for a free slot and then drops the event. Store failures
/// never reach this side of the channel.
#[derive(Clone)]
pub struct AuditLogger {
    sender: mpsc::Sender<AccessEvent>,
    enqueue_timeout: Duration,
}

impl AuditLogger {
    pub fn new(sender: mpsc::Sender<AccessEvent>, enqueue_timeout: Duration) -> Self {
        Self {
            sender,
            enqueue_timeout,
        }
    }

    /// Dispatches one event for persistence.
    ///
    /// Never fails and never waits on the log store.
    pub async fn record(&self, event: AccessEvent) {
        let event = match self.sender.try_send(event) {
            Ok(()) => return,
            Err(TrySendError::Closed(event)) => {
                metrics::counter!("access_log_dropped_total").increment(1);
                error!(path = %event.path, status = %event.status, "Audit queue closed, access log dropped");
                return;
            }
            Err(TrySendError::Full(event)) => event,
        };

        match self.sender.send_timeout(event, self.enqueue_timeout).await {
            Ok(()) => {}
            Err(SendTimeoutError::Timeout(event)) => {
                metrics::counter!("access_log_dropped_total").increment(1);
                warn!(path = %event.path, status = %event.status, "Audit queue full, access log dropped");
            }
            Err(SendTimeoutError::Closed(event)) => {
                metrics::counter!("access_log_dropped_total").increment(1);
                error!(path = %event.path, status = %event.status, "Audit queue closed, access log dropped");
            }
        }
    }

    /// Returns true once the worker has stopped consuming.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Free slots currently available in the queue.
    pub fn capacity(&self) -> usize {
        self.sender.capacity()
    }

    pub fn max_capacity(&self) -> usize {
        self.sender.max_capacity()
    }
}
