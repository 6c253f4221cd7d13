use crate::core::evaluator::SnipeabilityEvaluator;
use crate::domain::model::{Batch, SnipeabilityResult};
use crate::domain::ports::ExpirationOracle;
use crate::utils::error::{Result, SnipeError};
use crate::utils::validation::validate_positive_number;
use futures::future::try_join_all;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub const DEFAULT_BATCH_SIZE: usize = 10;
pub const DEFAULT_PACING_DELAY: Duration = Duration::from_millis(1000);

/// 將網域分批查詢：批次內並行，批次之間依序執行並間隔固定延遲
pub struct BatchScheduler<O: ExpirationOracle + ?Sized> {
    evaluator: Arc<SnipeabilityEvaluator<O>>,
    batch_size: usize,
    pacing_delay: Duration,
}

impl<O: ExpirationOracle + ?Sized + 'static> BatchScheduler<O> {
    pub fn new(
        evaluator: Arc<SnipeabilityEvaluator<O>>,
        batch_size: usize,
        pacing_delay: Duration,
    ) -> Result<Self> {
        validate_positive_number("batch.size", batch_size, 1)?;
        Ok(Self {
            evaluator,
            batch_size,
            pacing_delay,
        })
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn pacing_delay(&self) -> Duration {
        self.pacing_delay
    }

    /// Evaluates every domain, returning results in input order.
    ///
    /// Per-domain lookup failures are reported inside the results. The call
    /// itself only fails on empty input or when a lookup task dies.
    pub async fn evaluate_many(&self, domains: &[String]) -> Result<Vec<SnipeabilityResult>> {
        if domains.is_empty() {
            return Err(SnipeError::InvalidInput {
                message: "'domains' must be a non-empty list".to_string(),
            });
        }

        let batches = partition(domains, self.batch_size);
        let total_batches = batches.len();
        let started = Instant::now();
        tracing::info!(
            "📦 Checking {} domains in {} batches of up to {}",
            domains.len(),
            total_batches,
            self.batch_size
        );

        let mut results = Vec::with_capacity(domains.len());
        for batch in &batches {
            let batch_results = self.process_batch(batch).await.map_err(|e| {
                tracing::error!("❌ Batch {}/{} aborted: {}", batch.index + 1, total_batches, e);
                e
            })?;

            let failed = batch_results.iter().filter(|r| r.error().is_some()).count();
            tracing::info!(
                "✅ Batch {}/{} done ({} domains, {} failed)",
                batch.index + 1,
                total_batches,
                batch.len(),
                failed
            );
            results.extend(batch_results);

            if batch.index + 1 < total_batches {
                tokio::time::sleep(self.pacing_delay).await;
            }
        }

        tracing::info!(
            "🏁 Checked {} domains in {:?}",
            results.len(),
            started.elapsed()
        );
        Ok(results)
    }

    async fn process_batch(&self, batch: &Batch<'_>) -> Result<Vec<SnipeabilityResult>> {
        tracing::debug!(
            "📡 Batch {}: fetching {} expirations starting at #{}",
            batch.index + 1,
            batch.len(),
            batch.offset
        );

        let lookups = batch.domains.iter().map(|domain| {
            let evaluator = Arc::clone(&self.evaluator);
            let domain = domain.clone();
            tokio::spawn(async move { evaluator.evaluate(&domain).await })
        });

        // 依送出順序收集，與完成順序無關
        try_join_all(lookups)
            .await
            .map_err(|e| SnipeError::AggregateFailure {
                message: format!("lookup task in batch {} failed: {}", batch.index + 1, e),
            })
    }
}

/// Splits `domains` into consecutive chunks of `batch_size` (the last may be shorter).
pub fn partition(domains: &[String], batch_size: usize) -> Vec<Batch<'_>> {
    domains
        .chunks(batch_size.max(1))
        .enumerate()
        .map(|(index, chunk)| Batch {
            index,
            offset: index * batch_size.max(1),
            domains: chunk,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::StubOracle;
    use crate::domain::ports::FixedClock;
    use chrono::{TimeZone, Utc};

    const EXPIRY: u64 = 1_600_000_000;

    fn names(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("name{}.eth", i)).collect()
    }

    fn scheduler(
        oracle: StubOracle,
        batch_size: usize,
        pacing_delay: Duration,
    ) -> (Arc<StubOracle>, BatchScheduler<StubOracle>) {
        let oracle = Arc::new(oracle);
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let evaluator = Arc::new(SnipeabilityEvaluator::with_clock(
            Arc::clone(&oracle),
            Arc::new(FixedClock(now)),
        ));
        let scheduler = BatchScheduler::new(evaluator, batch_size, pacing_delay).unwrap();
        (oracle, scheduler)
    }

    fn registered(domains: &[String]) -> StubOracle {
        domains
            .iter()
            .fold(StubOracle::new(), |oracle, d| oracle.with_expiration(d, EXPIRY))
    }

    #[test]
    fn test_partition_sizes() {
        let domains = names(5);
        let batches = partition(&domains, 2);
        let sizes: Vec<usize> = batches.iter().map(|b| b.len()).collect();
        assert_eq!(sizes, vec![2, 2, 1]);
        assert_eq!(batches[2].offset, 4);
        assert_eq!(batches[2].domains, &domains[4..]);
    }

    #[test]
    fn test_partition_larger_than_input() {
        let domains = names(3);
        let batches = partition(&domains, 10);
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].len(), 3);
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let oracle = Arc::new(StubOracle::new());
        let evaluator = Arc::new(SnipeabilityEvaluator::new(oracle));
        assert!(BatchScheduler::new(evaluator, 0, DEFAULT_PACING_DELAY).is_err());
    }

    #[tokio::test]
    async fn test_empty_input_is_invalid() {
        let (oracle, scheduler) = scheduler(StubOracle::new(), 2, Duration::from_millis(1));
        let err = scheduler.evaluate_many(&[]).await.unwrap_err();
        assert!(matches!(err, SnipeError::InvalidInput { .. }));
        assert_eq!(oracle.call_count(), 0);
    }

    #[tokio::test]
    async fn test_batches_are_paced() {
        let domains = names(5);
        let delay = Duration::from_millis(50);
        let (oracle, scheduler) = scheduler(registered(&domains), 2, delay);

        let started = Instant::now();
        let results = scheduler.evaluate_many(&domains).await.unwrap();

        assert!(started.elapsed() >= delay * 2);
        assert_eq!(results.len(), 5);
        assert_eq!(oracle.call_count(), 5);
    }

    #[tokio::test]
    async fn test_order_preserved_when_later_lookups_finish_first() {
        let domains = names(4);
        let oracle = domains
            .iter()
            .enumerate()
            .fold(registered(&domains), |oracle, (i, d)| {
                oracle.with_delay(d, Duration::from_millis(40 - 10 * i as u64))
            });
        let (_, scheduler) = scheduler(oracle, 4, Duration::from_millis(1));

        let results = scheduler.evaluate_many(&domains).await.unwrap();
        let order: Vec<&str> = results.iter().map(|r| r.domain.as_str()).collect();
        assert_eq!(order, domains.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_lookups_run_concurrently_within_batch_only() {
        let domains = names(6);
        let oracle = domains.iter().fold(registered(&domains), |oracle, d| {
            oracle.with_delay(d, Duration::from_millis(30))
        });
        let (oracle, scheduler) = scheduler(oracle, 3, Duration::from_millis(1));

        scheduler.evaluate_many(&domains).await.unwrap();
        assert_eq!(oracle.max_in_flight(), 3);
    }

    #[tokio::test]
    async fn test_failure_does_not_affect_siblings() {
        let domains = names(3);
        let oracle = registered(&domains).with_failure(&domains[1]);
        let (_, scheduler) = scheduler(oracle, 3, Duration::from_millis(1));

        let results = scheduler.evaluate_many(&domains).await.unwrap();
        assert!(results[0].evaluation().is_some());
        assert_eq!(results[1].domain, domains[1]);
        assert_eq!(results[1].error(), Some("Failed to check expiration"));
        assert!(results[2].evaluation().is_some());
    }

    #[tokio::test]
    async fn test_batch_and_single_paths_agree() {
        let domains = names(3);
        let (_, scheduler) = scheduler(registered(&domains), 2, Duration::from_millis(1));

        let batched = scheduler.evaluate_many(&domains).await.unwrap();
        for (domain, result) in domains.iter().zip(&batched) {
            assert_eq!(&scheduler.evaluator.evaluate(domain).await, result);
        }
    }

    #[tokio::test]
    async fn test_panicking_lookup_aborts_whole_call() {
        let domains = names(4);
        let oracle = registered(&domains).with_panic(&domains[3]);
        let (_, scheduler) = scheduler(oracle, 2, Duration::from_millis(1));

        let err = scheduler.evaluate_many(&domains).await.unwrap_err();
        assert!(matches!(err, SnipeError::AggregateFailure { .. }));
    }
}
