use crate::core::hash::label_hash;
use crate::domain::ports::ExpirationOracle;
use crate::utils::error::OracleError;
use alloy_primitives::B256;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// In-memory registrar keyed by domain, with optional failures, delays and panics.
#[derive(Default)]
pub struct StubOracle {
    expirations: HashMap<B256, u64>,
    failing: HashSet<B256>,
    panicking: HashSet<B256>,
    delays: HashMap<B256, Duration>,
    calls: Mutex<Vec<B256>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl StubOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_expiration(mut self, domain: &str, timestamp: u64) -> Self {
        self.expirations.insert(label_hash(domain), timestamp);
        self
    }

    pub fn with_failure(mut self, domain: &str) -> Self {
        self.failing.insert(label_hash(domain));
        self
    }

    pub fn with_panic(mut self, domain: &str) -> Self {
        self.panicking.insert(label_hash(domain));
        self
    }

    pub fn with_delay(mut self, domain: &str, delay: Duration) -> Self {
        self.delays.insert(label_hash(domain), delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ExpirationOracle for StubOracle {
    async fn get_expiration(&self, label_hash: B256) -> Result<u64, OracleError> {
        self.calls.lock().unwrap().push(label_hash);
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        if let Some(delay) = self.delays.get(&label_hash) {
            tokio::time::sleep(*delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.panicking.contains(&label_hash) {
            panic!("stub oracle asked to panic");
        }
        if self.failing.contains(&label_hash) {
            return Err(OracleError::Rpc {
                code: 3,
                message: "execution reverted".to_string(),
            });
        }
        self.expirations
            .get(&label_hash)
            .copied()
            .ok_or_else(|| OracleError::Decode("unknown label".to_string()))
    }
}
