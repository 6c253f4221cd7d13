use alloy_primitives::B256;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use ens_sniper::{
    label_hash, BatchScheduler, ExpirationOracle, FixedClock, OracleError, SnipeError,
    SnipeabilityEvaluator,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Answers from a fixed table and records when each lookup started.
struct TableOracle {
    table: HashMap<B256, u64>,
    started: Mutex<Vec<(B256, Instant)>>,
}

impl TableOracle {
    fn new(entries: &[(&str, u64)]) -> Self {
        Self {
            table: entries.iter().map(|(d, ts)| (label_hash(d), *ts)).collect(),
            started: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ExpirationOracle for TableOracle {
    async fn get_expiration(&self, label_hash: B256) -> Result<u64, OracleError> {
        self.started.lock().unwrap().push((label_hash, Instant::now()));
        self.table
            .get(&label_hash)
            .copied()
            .ok_or_else(|| OracleError::Transport("connection reset".to_string()))
    }
}

fn scheduler_with(
    oracle: Arc<TableOracle>,
    batch_size: usize,
    delay: Duration,
) -> BatchScheduler<TableOracle> {
    let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let evaluator = SnipeabilityEvaluator::with_clock(oracle, Arc::new(FixedClock(now)));
    BatchScheduler::new(Arc::new(evaluator), batch_size, delay).unwrap()
}

#[tokio::test]
async fn test_five_domains_in_batches_of_two() {
    let domains: Vec<String> = ["a1.eth", "b2.eth", "c3.eth", "d4.eth", "e5.eth"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let entries: Vec<(&str, u64)> = domains.iter().map(|d| (d.as_str(), 1_600_000_000)).collect();
    let oracle = Arc::new(TableOracle::new(&entries));
    let delay = Duration::from_millis(60);
    let scheduler = scheduler_with(Arc::clone(&oracle), 2, delay);

    let started = Instant::now();
    let results = scheduler.evaluate_many(&domains).await.unwrap();

    assert!(started.elapsed() >= delay * 2);
    assert_eq!(results.len(), 5);
    for (domain, result) in domains.iter().zip(&results) {
        assert_eq!(&result.domain, domain);
        assert!(result.is_snipeable());
    }

    // 第三批 (e5) 必須在前兩批之後、至少隔兩次延遲才開始
    let starts = oracle.started.lock().unwrap();
    let first = starts.iter().map(|(_, t)| *t).min().unwrap();
    let (_, last_batch_start) = starts
        .iter()
        .find(|(h, _)| *h == label_hash("e5.eth"))
        .unwrap();
    assert!(last_batch_start.duration_since(first) >= delay * 2);
}

#[tokio::test]
async fn test_unknown_domain_fails_alone() {
    let oracle = Arc::new(TableOracle::new(&[("known.eth", 1_600_000_000)]));
    let scheduler = scheduler_with(oracle, 10, Duration::from_millis(1));
    let domains = vec!["known.eth".to_string(), "unknown.eth".to_string()];

    let results = scheduler.evaluate_many(&domains).await.unwrap();

    assert!(results[0].evaluation().is_some());
    assert_eq!(results[1].domain, "unknown.eth");
    assert_eq!(results[1].error(), Some("Failed to check expiration"));
}

#[tokio::test]
async fn test_empty_input_rejected() {
    let oracle = Arc::new(TableOracle::new(&[]));
    let scheduler = scheduler_with(oracle, 2, Duration::from_millis(1));

    let err = scheduler.evaluate_many(&[]).await.unwrap_err();
    assert!(matches!(err, SnipeError::InvalidInput { .. }));
}
