//! Bounded fan-out over a list of work items

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::domain::error::{AppError, Result};

/// Semaphore sized to `limit`, clamped to what tokio can hold
pub fn concurrency_slots(limit: usize) -> Arc<Semaphore> {
    Arc::new(Semaphore::new(limit.clamp(1, Semaphore::MAX_PERMITS)))
}

/// Run `f` over every item with at most `slots` futures in flight.
///
/// Results come back in completion order. The first error is returned and
/// the remaining tasks are aborted; each task holds an owned permit, so its
/// slot is released however it ends.
pub async fn map_bounded<T, R, F, Fut>(
    items: Vec<T>,
    slots: Arc<Semaphore>,
    f: F,
) -> Result<Vec<R>>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> Fut,
    Fut: Future<Output = Result<R>> + Send + 'static,
{
    let mut workers: JoinSet<Result<R>> = JoinSet::new();
    for item in items {
        let slots = slots.clone();
        let work = f(item);
        workers.spawn(async move {
            let _slot = slots
                .acquire_owned()
                .await
                .map_err(|e| AppError::Internal(format!("Concurrency slots closed: {}", e)))?;
            work.await
        });
    }

    let mut results = Vec::with_capacity(workers.len());
    while let Some(joined) = workers.join_next().await {
        results.push(joined.map_err(AppError::from).and_then(|result| result)?);
    }

    Ok(results)
}
