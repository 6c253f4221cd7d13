use crate::adapters::csv_source::{parse_csv_column, unique_domains};
use crate::adapters::store::{merge_results, JsonResultStore};
use crate::core::evaluator::SnipeabilityEvaluator;
use crate::core::scheduler::BatchScheduler;
use crate::core::{ConfigProvider, ExpirationOracle, Pipeline, SnipeabilityResult, Storage};
use crate::utils::error::Result;
use std::sync::Arc;

/// CSV of domains in, merged JSON results out.
pub struct SnipePipeline<S, C, O>
where
    S: Storage + Clone,
    C: ConfigProvider,
    O: ExpirationOracle + ?Sized + 'static,
{
    storage: S,
    config: C,
    scheduler: BatchScheduler<O>,
}

impl<S, C, O> SnipePipeline<S, C, O>
where
    S: Storage + Clone,
    C: ConfigProvider,
    O: ExpirationOracle + ?Sized + 'static,
{
    pub fn new(storage: S, config: C, oracle: Arc<O>) -> Result<Self> {
        let evaluator = Arc::new(SnipeabilityEvaluator::new(oracle));
        Self::with_evaluator(storage, config, evaluator)
    }

    pub fn with_evaluator(
        storage: S,
        config: C,
        evaluator: Arc<SnipeabilityEvaluator<O>>,
    ) -> Result<Self> {
        let scheduler = BatchScheduler::new(evaluator, config.batch_size(), config.pacing_delay())?;
        Ok(Self {
            storage,
            config,
            scheduler,
        })
    }

    fn result_store(&self) -> JsonResultStore<S> {
        JsonResultStore::new(self.storage.clone(), self.config.output_path())
    }
}

#[async_trait::async_trait]
impl<S, C, O> Pipeline for SnipePipeline<S, C, O>
where
    S: Storage + Clone,
    C: ConfigProvider,
    O: ExpirationOracle + ?Sized + 'static,
{
    async fn extract(&self) -> Result<Vec<String>> {
        tracing::debug!(
            "Reading column '{}' from {}",
            self.config.domain_column(),
            self.config.input_path()
        );
        let data = self.storage.read_file(self.config.input_path()).await?;
        let values = parse_csv_column(&data, self.config.domain_column())?;
        let read = values.len();

        let domains = unique_domains(values);
        if domains.len() < read {
            tracing::debug!("Dropped {} blank or repeated rows", read - domains.len());
        }
        Ok(domains)
    }

    async fn transform(&self, domains: Vec<String>) -> Result<Vec<SnipeabilityResult>> {
        self.scheduler.evaluate_many(&domains).await
    }

    async fn load(&self, results: Vec<SnipeabilityResult>) -> Result<String> {
        let store = self.result_store();
        let existing = store.load_existing().await?;
        let previous = existing.len();

        let merged = merge_results(existing, results);
        tracing::debug!(
            "Writing {} results ({} previously stored) to {}",
            merged.len(),
            previous,
            store.path()
        );
        store.save(&merged).await?;

        Ok(store.path().to_string())
    }
}
