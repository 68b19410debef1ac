use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinError;
use tracing::{Instrument, debug, info_span, warn};

use crate::broker::Delivery;
use crate::consumer::codec::{self, Payload};
use crate::consumer::subscriptions::MessageType;
use crate::consumer::timeout::{Bounded, run_bounded};
use crate::handler::Handler;

/// Terminal outcome of handling one message.
///
/// Every variant is followed by acknowledgment; none of them triggers a retry
/// or redelivery. A message that fails is consumed and gone. That is a
/// deliberate trade of possible data loss for consumer liveness: a poison
/// message must not block its queue through perpetual redelivery.
#[derive(Debug)]
pub enum Outcome {
    /// The body did not decode; the handler was never invoked.
    DecodeFailed,
    /// The handler completed normally.
    Handled,
    /// The handler exceeded its deadline and its task was aborted.
    TimedOut,
    /// The handler returned an error or panicked.
    Faulted(FaultReport),
}

/// Description of an unexpected fault, destined for the last-resort channel.
#[derive(Debug)]
pub struct FaultReport {
    pub description: String,
    pub context: String,
}

impl FaultReport {
    fn from_error(error: &(dyn std::error::Error + 'static)) -> Self {
        let mut context = String::new();
        let mut source = error.source();
        while let Some(cause) = source {
            context.push_str(&format!("caused by: {cause}\n"));
            source = cause.source();
        }
        Self {
            description: error.to_string(),
            context,
        }
    }

    fn from_join_error(error: JoinError) -> Self {
        let description = match error.try_into_panic() {
            Ok(panic) => {
                let message = panic
                    .downcast_ref::<&str>()
                    .copied()
                    .map(str::to_owned)
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "opaque panic payload".to_string());
                format!("handler panicked: {message}")
            }
            Err(error) => format!("handler task failed: {error}"),
        };
        Self {
            description,
            context: String::new(),
        }
    }
}

/// Handles one delivery end to end.
///
/// The failsafe contract: whatever happens inside (decode failure, handler
/// error, handler panic, timeout), control reaches the acknowledgment at the
/// bottom of this function, exactly once per delivery. Faults are reported on
/// the last-resort channel, never propagated to the listener.
pub async fn receive(
    kind: MessageType,
    delivery: Delivery,
    handler: Arc<dyn Handler>,
    deadline: Duration,
) -> Outcome {
    let Delivery { queue, body, ack } = delivery;

    let outcome = match codec::decode(&body) {
        None => Outcome::DecodeFailed,
        Some(payload) => dispatch(kind, payload, handler, deadline).await,
    };

    match &outcome {
        Outcome::Handled => debug!(queue = %queue, kind = kind.as_str(), "message handled"),
        Outcome::TimedOut => warn!(
            queue = %queue,
            kind = kind.as_str(),
            "handler deadline exceeded, message dropped"
        ),
        Outcome::Faulted(report) => report_failsafe(report),
        Outcome::DecodeFailed => {}
    }

    if let Err(e) = ack.ack() {
        report_failsafe(&FaultReport::from_error(&e));
    }

    outcome
}

/// Invokes the handler on its own task, under the timeout guard.
///
/// The spawned task isolates panics (they come back as a `JoinError` instead
/// of unwinding through the listener) and gives the timeout path something to
/// abort. Abortion is cooperative; the handler's side effects are not
/// guaranteed to stop, only the wait for them is.
async fn dispatch(
    kind: MessageType,
    payload: Payload,
    handler: Arc<dyn Handler>,
    deadline: Duration,
) -> Outcome {
    let span = info_span!(
        "message",
        kind = kind.as_str(),
        uuid = tracing::field::Empty
    );
    if let Some(uuid) = codec::correlation_id(&payload) {
        span.record("uuid", uuid);
    }

    let task = tokio::spawn(async move { handler.handle(kind, payload).await }.instrument(span));
    let abort = task.abort_handle();

    match run_bounded(deadline, task).await {
        Bounded::TimedOut => {
            abort.abort();
            Outcome::TimedOut
        }
        Bounded::Completed(Ok(Ok(()))) => Outcome::Handled,
        Bounded::Completed(Ok(Err(e))) => Outcome::Faulted(FaultReport::from_error(e.as_ref())),
        Bounded::Completed(Err(join)) => Outcome::Faulted(FaultReport::from_join_error(join)),
    }
}

/// Last-resort reporting channel.
///
/// Deliberately a bare write to stderr with no dependency on the structured
/// logging path, so it still fires when the logger itself is the broken
/// thing.
fn report_failsafe(report: &FaultReport) {
    eprintln!("!!!FAILSAFE!!! {}", report.description);
    if !report.context.is_empty() {
        eprintln!("{}", report.context);
    }
}
