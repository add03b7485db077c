//! Background worker persisting access-log records.
//!
//! Drains the bounded audit queue and writes each event as one
//! [`AccessLog`] row. Writes run concurrently up to a configured limit and are
//! retried with exponential backoff. Nothing here can reach an HTTP response:
//! by the time an event is dequeued the response has already been produced.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinSet};
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::domain::access_event::AccessEvent;
use crate::domain::entities::AccessLog;
use crate::domain::repositories::AccessLogRepository;
use crate::error::AppError;

/// What the worker does once a record could not be written after all retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop the worker and report the fault to the process supervisor.
    Halt,
    /// Report the fault and keep consuming the queue.
    Log,
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "halt" => Ok(FailurePolicy::Halt),
            "log" => Ok(FailurePolicy::Log),
            other => Err(format!("unknown audit failure policy '{other}'")),
        }
    }
}

/// Faults escaping the audit pipeline.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("failed to write access log {id} after {attempts} attempts: {source}")]
    WriteFailed {
        id: Uuid,
        attempts: usize,
        #[source]
        source: AppError,
    },
    #[error("access log writer task failed: {0}")]
    Task(#[from] JoinError),
}

/// Tuning knobs for [`AuditWorker`].
#[derive(Debug, Clone)]
pub struct AuditWorkerSettings {
    /// Maximum number of inserts in flight at once.
    pub concurrency: usize,
    /// Additional attempts after the first failed insert.
    pub retries: usize,
    /// Scale of the exponential backoff between attempts.
    pub retry_base_delay: Duration,
    pub failure_policy: FailurePolicy,
}

/// Consumes [`AccessEvent`]s and writes them through an [`AccessLogRepository`].
pub struct AuditWorker {
    rx: mpsc::Receiver<AccessEvent>,
    repository: Arc<dyn AccessLogRepository>,
    settings: AuditWorkerSettings,
}

impl AuditWorker {
    pub fn new(
        rx: mpsc::Receiver<AccessEvent>,
        repository: Arc<dyn AccessLogRepository>,
        settings: AuditWorkerSettings,
    ) -> Self {
        Self {
            rx,
            repository,
            settings,
        }
    }

    /// Runs until every sender is dropped and all in-flight writes settle.
    ///
    /// # Errors
    ///
    /// With [`FailurePolicy::Halt`], returns the first [`AuditError`] encountered.
    /// In-flight writes are aborted in that case.
    pub async fn run(mut self) -> Result<(), AuditError> {
        let concurrency = self.settings.concurrency.max(1);
        let policy = self.settings.failure_policy;
        let mut in_flight: JoinSet<Result<(), AuditError>> = JoinSet::new();

        info!(concurrency, ?policy, "Audit worker started");

        loop {
            tokio::select! {
                maybe_event = self.rx.recv(), if in_flight.len() < concurrency => {
                    let Some(event) = maybe_event else { break };
                    let log = AccessLog::from_event(event);
                    in_flight.spawn(write_with_retry(
                        self.repository.clone(),
                        log,
                        self.settings.clone(),
                    ));
                }
                Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                    handle_outcome(policy, joined)?;
                }
            }
        }

        while let Some(joined) = in_flight.join_next().await {
            handle_outcome(policy, joined)?;
        }

        info!("Audit queue closed, worker stopped");
        Ok(())
    }
}

async fn write_with_retry(
    repository: Arc<dyn AccessLogRepository>,
    log: AccessLog,
    settings: AuditWorkerSettings,
) -> Result<(), AuditError> {
    let factor = u64::try_from(settings.retry_base_delay.as_millis())
        .unwrap_or(u64::MAX)
        .max(1);
    let strategy = ExponentialBackoff::from_millis(2)
        .factor(factor)
        .max_delay(Duration::from_secs(5))
        .map(jitter)
        .take(settings.retries);

    let repository = repository.as_ref();
    let log = &log;
    let result = Retry::spawn(strategy, move || async move {
        repository.insert(log).await.inspect_err(|e| {
            warn!(id = %log.id, error = %e, "Access log insert attempt failed");
        })
    })
    .await;

    match result {
        Ok(()) => {
            metrics::counter!("access_log_written_total").increment(1);
            debug!(id = %log.id, path = %log.path, status = %log.status, "Access log written");
            Ok(())
        }
        Err(source) => Err(AuditError::WriteFailed {
            id: log.id,
            attempts: settings.retries + 1,
            source,
        }),
    }
}

fn handle_outcome(
    policy: FailurePolicy,
    joined: Result<Result<(), AuditError>, JoinError>,
) -> Result<(), AuditError> {
    let err = match joined {
        Ok(Ok(())) => return Ok(()),
        Ok(Err(e)) => e,
        Err(e) => AuditError::from(e),
    };

    metrics::counter!("access_log_write_failures_total").increment(1);
    error!(error = %err, "Access log lost");

    match policy {
        FailurePolicy::Halt => Err(err),
        FailurePolicy::Log => Ok(()),
    }
}
