use crate::core::{Pipeline, ScanSummary};
use crate::utils::error::Result;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct ScanReport {
    pub output_path: String,
    pub summary: ScanSummary,
    pub elapsed: Duration,
}

pub struct ScanEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ScanEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<ScanReport> {
        let started = Instant::now();
        tracing::info!("🚀 Starting ENS expiration scan");

        // Extract
        let domains = self.pipeline.extract().await?;
        tracing::info!("📥 Loaded {} domains", domains.len());

        // Transform
        let results = self.pipeline.transform(domains).await?;
        let summary = ScanSummary::from_results(&results);
        tracing::info!(
            "🔄 Evaluated {} domains: {} snipeable, {} failed",
            summary.total,
            summary.snipeable,
            summary.failed
        );

        // Load
        let output_path = self.pipeline.load(results).await?;
        tracing::info!("💾 Results saved to: {}", output_path);

        Ok(ScanReport {
            output_path,
            summary,
            elapsed: started.elapsed(),
        })
    }
}
