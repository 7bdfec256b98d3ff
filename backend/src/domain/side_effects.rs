//! Background execution of audit and email side effects.
//!
//! Handlers submit [`SideEffect`] jobs to a bounded queue and return without
//! waiting. A single [`SideEffectWorker`] drains the queue, runs each job
//! under the collaborator timeout, and logs failures. Nothing a job does can
//! change the response the handler already decided on.
//!
//! When the queue is full or the worker has stopped, the job is dropped with a
//! warning.

use std::sync::Arc;

use tokio::sync::mpsc::{self, Receiver, Sender, error::TrySendError};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::ports::{ActivityLog, MailTransport};
use super::{ActivityRecord, CollaboratorTimeout, OutgoingEmail, TraceId};

/// Default number of queued jobs before submissions are dropped.
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

/// Work performed after a response has been decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SideEffect {
    RecordActivity(ActivityRecord),
    SendWelcomeEmail(OutgoingEmail),
}

impl SideEffect {
    /// Short label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RecordActivity(_) => "record_activity",
            Self::SendWelcomeEmail(_) => "send_welcome_email",
        }
    }
}

/// A queued side effect together with the trace id of the request that
/// produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideEffectJob {
    effect: SideEffect,
    trace_id: Option<TraceId>,
}

impl SideEffectJob {
    pub fn effect(&self) -> &SideEffect {
        &self.effect
    }

    pub fn trace_id(&self) -> Option<TraceId> {
        self.trace_id
    }

    pub fn into_effect(self) -> SideEffect {
        self.effect
    }
}

/// Cloneable handle used by services to enqueue side effects.
#[derive(Debug, Clone)]
pub struct SideEffectDispatcher {
    sender: Sender<SideEffectJob>,
}

impl SideEffectDispatcher {
    /// Create a dispatcher and the receiving end of its queue.
    ///
    /// `capacity` is clamped to at least one slot.
    pub fn channel(capacity: usize) -> (Self, Receiver<SideEffectJob>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, receiver)
    }

    /// Queue `effect` without waiting. Returns `false` if it was dropped.
    pub fn submit(&self, effect: SideEffect) -> bool {
        let kind = effect.kind();
        let job = SideEffectJob {
            effect,
            trace_id: TraceId::current(),
        };
        match self.sender.try_send(job) {
            Ok(()) => {
                debug!(side_effect = kind, "side effect queued");
                true
            }
            Err(TrySendError::Full(_)) => {
                warn!(side_effect = kind, "side-effect queue full; job dropped");
                false
            }
            Err(TrySendError::Closed(_)) => {
                warn!(side_effect = kind, "side-effect worker stopped; job dropped");
                false
            }
        }
    }
}

/// Collaborators the worker calls.
#[derive(Clone)]
pub struct SideEffectPorts {
    pub activity_log: Arc<dyn ActivityLog>,
    pub mail: Arc<dyn MailTransport>,
}

/// Consumes queued jobs one at a time.
pub struct SideEffectWorker {
    receiver: Receiver<SideEffectJob>,
    ports: SideEffectPorts,
    timeout: CollaboratorTimeout,
}

impl SideEffectWorker {
    pub fn new(
        receiver: Receiver<SideEffectJob>,
        ports: SideEffectPorts,
        timeout: CollaboratorTimeout,
    ) -> Self {
        Self {
            receiver,
            ports,
            timeout,
        }
    }

    /// Run until every dispatcher handle has been dropped.
    pub async fn run(mut self) {
        while let Some(job) = self.receiver.recv().await {
            self.execute(job).await;
        }
        info!("side-effect worker stopped");
    }

    /// Execute one job inside the originating request's trace scope.
    ///
    /// Returns `true` when the collaborator call succeeded.
    pub async fn execute(&self, job: SideEffectJob) -> bool {
        let SideEffectJob { effect, trace_id } = job;
        TraceId::scope_optional(trace_id, self.perform(effect)).await
    }

    async fn perform(&self, effect: SideEffect) -> bool {
        let kind = effect.kind();
        let outcome = match &effect {
            SideEffect::RecordActivity(record) => self
                .timeout
                .run(self.ports.activity_log.append(record))
                .await
                .map_err(|failure| failure.to_string()),
            SideEffect::SendWelcomeEmail(email) => self
                .timeout
                .run(self.ports.mail.send(email))
                .await
                .map_err(|failure| failure.to_string()),
        };
        match outcome {
            Ok(()) => {
                debug!(side_effect = kind, "side effect completed");
                true
            }
            Err(message) => {
                let trace_id = TraceId::current().map(|id| id.to_string());
                error!(side_effect = kind, trace_id, error = %message, "side effect failed");
                false
            }
        }
    }
}

/// Start the worker on the current Tokio runtime and return its dispatcher.
pub fn spawn_side_effects(
    capacity: usize,
    ports: SideEffectPorts,
    timeout: CollaboratorTimeout,
) -> (SideEffectDispatcher, JoinHandle<()>) {
    let (dispatcher, receiver) = SideEffectDispatcher::channel(capacity);
    let worker = SideEffectWorker::new(receiver, ports, timeout);
    (dispatcher, tokio::spawn(worker.run()))
}
