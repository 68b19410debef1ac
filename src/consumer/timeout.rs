use std::future::Future;
use std::time::Duration;

/// Outcome of running work under a wall-clock deadline.
#[derive(Debug)]
pub enum Bounded<T> {
    /// The work finished before the deadline.
    Completed(T),
    /// The deadline elapsed first. Terminal for this attempt; there is no
    /// retry.
    TimedOut,
}

/// Runs `work` under a hard deadline.
///
/// Cancellation is cooperative: the future stops being polled once the
/// deadline elapses, but a caller that spawned the work onto its own task
/// must abort that task itself if it wants the work to stop running.
pub async fn run_bounded<F: Future>(deadline: Duration, work: F) -> Bounded<F::Output> {
    match tokio::time::timeout(deadline, work).await {
        Ok(value) => Bounded::Completed(value),
        Err(_) => Bounded::TimedOut,
    }
}
