//! Bounded fan-out over independent inputs.
//!
//! Used to run one project listing per user with at most `max_concurrent`
//! listings in flight. Results come back in input order regardless of which
//! future finishes first.

use std::future::Future;

use futures::stream::{FuturesUnordered, StreamExt};
use log::debug;

use crate::error::Result;

/// Run `fetch` for every input, at most `max_concurrent` at a time.
///
/// Returns one result per input, in input order. The first error aborts the
/// whole run and drops any requests still in flight.
///
/// # Example
///
/// ```ignore
/// let per_user = fetch_each(users, |email| list_for(client, email), 8).await?;
/// ```
pub async fn fetch_each<I, T, F, Fut>(
    inputs: Vec<I>,
    fetch: F,
    max_concurrent: usize,
) -> Result<Vec<T>>
where
    F: Fn(I) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let total = inputs.len();
    if total == 0 {
        return Ok(Vec::new());
    }

    let max_concurrent = max_concurrent.max(1);
    debug!("Fetching {} inputs with max {} concurrent", total, max_concurrent);

    let make_future = |index: usize, input: I| {
        let fut = fetch(input);
        async move { (index, fut.await) }
    };

    let mut slots: Vec<Option<T>> = (0..total).map(|_| None).collect();
    let mut futures = FuturesUnordered::new();
    let mut pending = inputs.into_iter().enumerate();

    // Seed initial batch up to max_concurrent
    for (index, input) in pending.by_ref().take(max_concurrent) {
        futures.push(make_future(index, input));
    }

    // Keep the pool full until every input has been fetched
    while let Some((index, result)) = futures.next().await {
        slots[index] = Some(result?);

        if let Some((next_index, next_input)) = pending.next() {
            futures.push(make_future(next_index, next_input));
        }
    }

    Ok(slots.into_iter().flatten().collect())
}
