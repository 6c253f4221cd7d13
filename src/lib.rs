pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::SnipeConfig;

pub use crate::adapters::{JsonResultStore, LocalStorage, RpcExpirationOracle};
pub use crate::core::engine::{ScanEngine, ScanReport};
pub use crate::core::evaluator::SnipeabilityEvaluator;
pub use crate::core::hash::label_hash;
pub use crate::core::pipeline::SnipePipeline;
pub use crate::core::pricing::{net_reg_price, premium_price, reg_price};
pub use crate::core::scheduler::BatchScheduler;
pub use crate::domain::model::{Evaluation, Outcome, ScanSummary, SnipeabilityResult};
pub use crate::domain::ports::{Clock, ExpirationOracle, FixedClock, SystemClock};
pub use crate::utils::error::{LookupError, OracleError, Result, SnipeError};
