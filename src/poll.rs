//! Bounded polling for asynchronous resource-state convergence.
//!
//! A predicate is evaluated at a fixed interval until it holds or the attempt
//! budget in [`PollOptions`] is spent. Running out of attempts is reported as
//! `false`, not as an error. Errors raised by a fallible predicate stop the
//! loop and reach the caller unchanged.

use std::convert::Infallible;
use std::future::Future;
use std::thread;

use crate::PollOptions;

/// Polls `predicate` with the default budget (20 attempts, 2 s apart).
pub fn wait_until<F>(predicate: F) -> bool
where
    F: FnMut() -> bool,
{
    wait_until_with(&PollOptions::default(), predicate)
}

/// Polls `predicate` on the calling thread until it returns `true` or
/// `opts.max_attempts` evaluations have failed.
pub fn wait_until_with<F>(opts: &PollOptions, mut predicate: F) -> bool
where
    F: FnMut() -> bool,
{
    match try_wait_until_with(opts, || Ok::<_, Infallible>(predicate())) {
        Ok(done) => done,
        Err(never) => match never {},
    }
}

/// Fallible variant of [`wait_until_with`]. The first `Err` from `predicate`
/// ends polling and is returned as is.
pub fn try_wait_until_with<F, E>(opts: &PollOptions, mut predicate: F) -> Result<bool, E>
where
    F: FnMut() -> Result<bool, E>,
{
    for attempt in 0..opts.max_attempts {
        if predicate()? {
            return Ok(true);
        }
        if is_last(opts, attempt) {
            break;
        }
        log_retry(opts, attempt);
        thread::sleep(opts.interval);
    }
    log_exhausted(opts);
    Ok(false)
}

/// Async variant of [`wait_until_with`]; sleeps with `tokio::time::sleep`.
pub async fn wait_until_async<F, Fut>(opts: &PollOptions, mut predicate: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let outcome = try_wait_until_async(opts, || {
        let check = predicate();
        async move { Ok::<_, Infallible>(check.await) }
    })
    .await;

    match outcome {
        Ok(done) => done,
        Err(never) => match never {},
    }
}

/// Async variant of [`try_wait_until_with`].
pub async fn try_wait_until_async<F, Fut, E>(
    opts: &PollOptions,
    mut predicate: F,
) -> Result<bool, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool, E>>,
{
    for attempt in 0..opts.max_attempts {
        if predicate().await? {
            return Ok(true);
        }
        if is_last(opts, attempt) {
            break;
        }
        log_retry(opts, attempt);
        tokio::time::sleep(opts.interval).await;
    }
    log_exhausted(opts);
    Ok(false)
}

fn is_last(opts: &PollOptions, attempt: u32) -> bool {
    attempt + 1 >= opts.max_attempts
}

#[allow(unused_variables)]
fn log_retry(opts: &PollOptions, attempt: u32) {
    #[cfg(feature = "tracing")]
    tracing::debug!(
        attempt = attempt + 1,
        max_attempts = opts.max_attempts,
        "condition not met, retrying after {:?}",
        opts.interval
    );
}

#[allow(unused_variables)]
fn log_exhausted(opts: &PollOptions) {
    #[cfg(feature = "tracing")]
    tracing::debug!(
        max_attempts = opts.max_attempts,
        "condition not met, attempt budget exhausted"
    );
}
