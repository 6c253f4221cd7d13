pub mod engine;
pub mod evaluator;
pub mod hash;
pub mod pipeline;
pub mod pricing;
pub mod scheduler;

#[cfg(test)]
pub(crate) mod test_support;

pub use crate::domain::model::{
    Batch, DomainQuery, Evaluation, Outcome, ScanSummary, SnipeabilityResult,
};
pub use crate::domain::ports::{Clock, ConfigProvider, ExpirationOracle, Pipeline, Storage};
pub use crate::utils::error::Result;
