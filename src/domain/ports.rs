use crate::domain::model::SnipeabilityResult;
use crate::utils::error::{OracleError, Result};
use alloy_primitives::B256;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;

/// Read access to the registrar's expiry table.
#[async_trait]
pub trait ExpirationOracle: Send + Sync {
    /// Expiry (unix seconds) of the name whose label hashes to `label_hash`.
    async fn get_expiration(&self, label_hash: B256) -> std::result::Result<u64, OracleError>;
}

#[async_trait]
impl<T: ExpirationOracle + ?Sized> ExpirationOracle for Arc<T> {
    async fn get_expiration(&self, label_hash: B256) -> std::result::Result<u64, OracleError> {
        (**self).get_expiration(label_hash).await
    }
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// 固定時間，測試與重播用
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn domain_column(&self) -> &str;
    fn output_path(&self) -> &str;
    fn batch_size(&self) -> usize;
    fn pacing_delay(&self) -> Duration;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<String>>;
    async fn transform(&self, domains: Vec<String>) -> Result<Vec<SnipeabilityResult>>;
    async fn load(&self, results: Vec<SnipeabilityResult>) -> Result<String>;
}
