//! Concurrent story metadata resolution with bounded retry.

use std::sync::Arc;
use std::time::Duration;

use backoff::ExponentialBackoff;
use backoff::backoff::Backoff;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::error::TrackerError;

use super::extract::StoryReference;
use super::record::StoryRecord;
use super::tracker::StoryTracker;

/// Retry policy: 3 attempts per lookup, base 1s, max 30s.
const MAX_ATTEMPTS: u32 = 3;
const INITIAL_INTERVAL_SECS: u64 = 1;
const MAX_INTERVAL_SECS: u64 = 30;

/// Outcome of resolving a batch of references.
///
/// `records` preserves the order references were first seen in the commit
/// range. `unresolved` lists references dropped with a warning, kept for
/// diagnostics.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub records: Vec<StoryRecord>,
    pub unresolved: Vec<StoryReference>,
}

impl Resolution {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Resolve story references concurrently.
///
/// Lookups are independent reads, so they run as parallel tasks; results are
/// re-sorted to the original reference order before returning, never
/// completion order. A single unresolvable story is dropped with a warning.
/// Auth and connection-level failures abort the whole batch, and dropping
/// the task set abandons any in-flight lookups.
pub async fn resolve_stories<T>(
    tracker: Arc<T>,
    references: &[StoryReference],
) -> Result<Resolution, TrackerError>
where
    T: StoryTracker + 'static,
{
    let mut tasks = JoinSet::new();
    for (index, reference) in references.iter().cloned().enumerate() {
        let tracker = Arc::clone(&tracker);
        tasks.spawn(async move {
            let result = fetch_with_retry(tracker.as_ref(), &reference).await;
            (index, reference, result)
        });
    }

    let mut resolved: Vec<Option<StoryRecord>> = vec![None; references.len()];
    let mut unresolved: Vec<(usize, StoryReference)> = Vec::new();

    while let Some(joined) = tasks.join_next().await {
        let (index, reference, result) = joined.map_err(|e| TrackerError::Transport {
            message: e.to_string(),
        })?;

        match result {
            Ok(record) => resolved[index] = Some(record),
            Err(e) if e.is_fatal() => {
                warn!(story = %reference, error = %e, "Aborting story resolution");
                return Err(e);
            }
            Err(e) => {
                warn!(story = %reference, error = %e, "Skipping unresolvable story");
                unresolved.push((index, reference));
            }
        }
    }

    unresolved.sort_by_key(|(index, _)| *index);

    Ok(Resolution {
        records: resolved.into_iter().flatten().collect(),
        unresolved: unresolved.into_iter().map(|(_, r)| r).collect(),
    })
}

/// Single-story lookup with bounded exponential backoff on transient failures.
///
/// Transport failures that survive all attempts surface as
/// [`TrackerError::Unavailable`]; per-story HTTP failures keep their original
/// error so the caller can drop just that story.
async fn fetch_with_retry<T>(
    tracker: &T,
    reference: &StoryReference,
) -> Result<StoryRecord, TrackerError>
where
    T: StoryTracker + ?Sized,
{
    let mut backoff = ExponentialBackoff {
        initial_interval: Duration::from_secs(INITIAL_INTERVAL_SECS),
        max_interval: Duration::from_secs(MAX_INTERVAL_SECS),
        max_elapsed_time: None,
        ..Default::default()
    };

    let mut attempts = 0;
    loop {
        attempts += 1;

        match tracker.fetch_story(reference).await {
            Ok(record) => return Ok(record),
            Err(e) if e.is_transient() && attempts < MAX_ATTEMPTS => {
                debug!(story = %reference, attempt = attempts, error = %e, "Retrying story lookup");
                if let Some(wait) = backoff.next_backoff() {
                    tokio::time::sleep(wait).await;
                }
            }
            Err(TrackerError::Transport { message }) => {
                return Err(TrackerError::Unavailable { attempts, message });
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::story::record::StoryKind;
    use crate::story::tracker::MockStoryTracker;

    fn refs(numbers: &[u64]) -> Vec<StoryReference> {
        numbers.iter().map(|n| StoryReference::new("SC", *n)).collect()
    }

    fn record_for(reference: &StoryReference, kind: StoryKind) -> StoryRecord {
        StoryRecord {
            id: reference.id().to_string(),
            title: format!("Story {}", reference.number()),
            kind,
        }
    }

    #[tokio::test]
    async fn test_resolves_in_original_order() {
        let mut mock = MockStoryTracker::new();
        mock.expect_fetch_story()
            .returning(|r| Ok(record_for(r, StoryKind::Feature)));

        let references = refs(&[30, 10, 20]);
        let resolution = resolve_stories(Arc::new(mock), &references).await.unwrap();

        let ids: Vec<&str> = resolution.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["SC-30", "SC-10", "SC-20"]);
        assert!(resolution.unresolved.is_empty());
    }

    #[tokio::test]
    async fn test_not_found_is_dropped_with_warning() {
        let mut mock = MockStoryTracker::new();
        mock.expect_fetch_story().returning(|r| {
            if r.number() == 99 {
                Err(TrackerError::StoryNotFound(r.id().to_string()))
            } else {
                Ok(record_for(r, StoryKind::Bug))
            }
        });

        let references = refs(&[10, 99, 20]);
        let resolution = resolve_stories(Arc::new(mock), &references).await.unwrap();

        let ids: Vec<&str> = resolution.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["SC-10", "SC-20"]);
        assert_eq!(resolution.unresolved.len(), 1);
        assert_eq!(resolution.unresolved[0].id(), "SC-99");
    }

    #[tokio::test]
    async fn test_auth_failure_aborts_batch() {
        let mut mock = MockStoryTracker::new();
        mock.expect_fetch_story()
            .returning(|_| Err(TrackerError::AuthFailed { status: 401 }));

        let references = refs(&[10, 20]);
        let result = resolve_stories(Arc::new(mock), &references).await;

        assert!(matches!(result, Err(TrackerError::AuthFailed { .. })));
    }

    #[tokio::test]
    async fn test_transport_failure_becomes_unavailable_after_retries() {
        let mut mock = MockStoryTracker::new();
        mock.expect_fetch_story()
            .times(MAX_ATTEMPTS as usize)
            .returning(|_| {
                Err(TrackerError::Transport {
                    message: "connection refused".to_string(),
                })
            });

        let references = refs(&[10]);
        let result = resolve_stories(Arc::new(mock), &references).await;

        match result {
            Err(TrackerError::Unavailable { attempts, .. }) => {
                assert_eq!(attempts, MAX_ATTEMPTS);
            }
            other => panic!("Expected Unavailable, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_reference_set_resolves_to_empty() {
        let mock = MockStoryTracker::new();
        let resolution = resolve_stories(Arc::new(mock), &[]).await.unwrap();
        assert!(resolution.is_empty());
        assert!(resolution.unresolved.is_empty());
    }
}
