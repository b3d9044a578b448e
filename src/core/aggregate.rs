use crate::core::limiter::RequestLimiter;
use crate::domain::model::{DeckEntry, DeckStat};
use crate::utils::error::Result;
use std::future::Future;
use tokio::task::JoinSet;

/// Fetches a statistic for every deck name under the limiter's cap.
///
/// Output order matches input order regardless of completion order. A
/// failed fetch degrades that entry to `stat: None` and never aborts
/// the batch; the function returns only after every item has resolved.
pub async fn aggregate_deck_stats<F, Fut>(
    names: Vec<String>,
    limiter: &RequestLimiter,
    fetch_one: F,
) -> Vec<DeckEntry>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<DeckStat>> + Send + 'static,
{
    let mut entries: Vec<DeckEntry> = names.iter().map(DeckEntry::new).collect();
    if entries.is_empty() {
        return entries;
    }

    let mut tasks = JoinSet::new();
    for (index, name) in names.into_iter().enumerate() {
        let semaphore = limiter.semaphore();
        // The future is lazy; the fetch does not start until it is
        // polled, which happens only once a slot is held.
        let fetch = fetch_one(name.clone());
        tasks.spawn(async move {
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => return (index, None),
            };
            match fetch.await {
                Ok(stat) => (index, Some(stat)),
                Err(err) => {
                    tracing::debug!(deck = %name, error = %err, "deck stat fetch failed");
                    (index, None)
                }
            }
        });
    }

    while let Some(joined) = tasks.join_next().await {
        if let Ok((index, stat)) = joined {
            entries[index].stat = stat;
        }
    }

    entries
}
