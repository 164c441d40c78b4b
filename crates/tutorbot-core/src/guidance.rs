//! Batch learning-path retrieval.
//!
//! Fetches learning paths for several students concurrently with bounded
//! parallelism. Failures are kept per student so one bad response does not
//! hide the others.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::Semaphore;

use crate::traits::{LearningPath, LearningPathRequest, LearningPathSource};

/// Outcome of fetching one student's learning path.
#[derive(Debug)]
pub struct GuidanceOutcome {
    pub request: LearningPathRequest,
    pub result: anyhow::Result<LearningPath>,
    pub elapsed: Duration,
}

impl GuidanceOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Fetch learning paths for every request, at most `parallelism` at a time.
///
/// Outcomes are returned in request order.
pub async fn fetch_learning_paths(
    source: Arc<dyn LearningPathSource>,
    requests: Vec<LearningPathRequest>,
    parallelism: usize,
) -> Vec<GuidanceOutcome> {
    let semaphore = Arc::new(Semaphore::new(parallelism.max(1)));
    let mut futures = FuturesUnordered::new();

    for (position, request) in requests.into_iter().enumerate() {
        let source = Arc::clone(&source);
        let semaphore = Arc::clone(&semaphore);
        futures.push(async move {
            let start = Instant::now();
            let result = match semaphore.acquire_owned().await {
                Ok(_permit) => source.fetch(&request).await,
                Err(_) => Err(anyhow::anyhow!("semaphore closed")),
            };
            (
                position,
                GuidanceOutcome {
                    request,
                    result,
                    elapsed: start.elapsed(),
                },
            )
        });
    }

    let mut outcomes = Vec::with_capacity(futures.len());
    while let Some((position, outcome)) = futures.next().await {
        match &outcome.result {
            Ok(_) => tracing::debug!(student = %outcome.request.student_id, "learning path fetched"),
            Err(e) => tracing::warn!(
                student = %outcome.request.student_id,
                "learning path fetch failed: {e:#}"
            ),
        }
        outcomes.push((position, outcome));
    }

    outcomes.sort_by_key(|(position, _)| *position);
    outcomes.into_iter().map(|(_, o)| o).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    struct StubSource {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    #[async_trait]
    impl LearningPathSource for StubSource {
        fn name(&self) -> &str {
            "stub"
        }

        async fn fetch(&self, request: &LearningPathRequest) -> anyhow::Result<LearningPath> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if request.student_id == "broken" {
                anyhow::bail!("backend returned 500");
            }
            Ok(LearningPath {
                student_id: request.student_id.clone(),
                personality: request.personality.clone(),
                ..Default::default()
            })
        }
    }

    fn req(id: &str) -> LearningPathRequest {
        LearningPathRequest {
            student_id: id.into(),
            personality: "IAS".into(),
        }
    }

    #[tokio::test]
    async fn keeps_request_order_and_failures() {
        let source = Arc::new(StubSource {
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        });
        let outcomes = fetch_learning_paths(
            source,
            vec![req("a"), req("broken"), req("c")],
            4,
        )
        .await;

        let ids: Vec<&str> = outcomes.iter().map(|o| o.request.student_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "broken", "c"]);
        assert!(outcomes[0].is_ok());
        assert!(!outcomes[1].is_ok());
        assert_eq!(outcomes[2].result.as_ref().unwrap().student_id, "c");
    }

    #[tokio::test]
    async fn respects_parallelism() {
        let source = Arc::new(StubSource {
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        });
        let requests = (0..6).map(|i| req(&format!("s{i}"))).collect();
        let outcomes = fetch_learning_paths(source.clone(), requests, 2).await;
        assert_eq!(outcomes.len(), 6);
        assert!(source.peak.load(Ordering::SeqCst) <= 2);
    }
}
