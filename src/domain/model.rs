use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top-level suffix stripped from a name to obtain its label.
pub const ENS_SUFFIX: &str = ".eth";

/// 到期後還不能被他人註冊的寬限期
pub const GRACE_PERIOD_DAYS: i64 = 90;

/// A name as the caller supplied it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DomainQuery {
    raw_name: String,
}

impl DomainQuery {
    pub fn new(raw_name: impl Into<String>) -> Self {
        Self {
            raw_name: raw_name.into(),
        }
    }

    pub fn raw_name(&self) -> &str {
        &self.raw_name
    }

    /// The name with a trailing `.eth` removed, if there was one.
    pub fn label(&self) -> &str {
        strip_suffix(&self.raw_name)
    }
}

pub fn strip_suffix(name: &str) -> &str {
    name.strip_suffix(ENS_SUFFIX).unwrap_or(name)
}

/// Raw registrar answer for one domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpirationRecord<'a> {
    pub domain: &'a str,
    pub expiration_timestamp: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub expiration_date: DateTime<Utc>,
    pub grace_end: DateTime<Utc>,
    pub snipeable: bool,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Outcome {
    Evaluated(Evaluation),
    Failed { error: String },
}

/// 單一網域的評估結果；成功欄位與 `error` 只會有其中一組
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnipeabilityResult {
    pub domain: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl SnipeabilityResult {
    pub fn evaluated(domain: impl Into<String>, evaluation: Evaluation) -> Self {
        Self {
            domain: domain.into(),
            outcome: Outcome::Evaluated(evaluation),
        }
    }

    pub fn failed(domain: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            outcome: Outcome::Failed {
                error: error.into(),
            },
        }
    }

    pub fn evaluation(&self) -> Option<&Evaluation> {
        match &self.outcome {
            Outcome::Evaluated(evaluation) => Some(evaluation),
            Outcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Evaluated(_) => None,
            Outcome::Failed { error } => Some(error),
        }
    }

    pub fn is_snipeable(&self) -> bool {
        self.evaluation().is_some_and(|e| e.snipeable)
    }
}

/// A contiguous slice of the input processed together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Batch<'a> {
    pub index: usize,
    pub offset: usize,
    pub domains: &'a [String],
}

impl Batch<'_> {
    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

/// Counts reported at the end of a scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    pub total: usize,
    pub snipeable: usize,
    pub failed: usize,
}

impl ScanSummary {
    pub fn from_results(results: &[SnipeabilityResult]) -> Self {
        results.iter().fold(Self::default(), |mut summary, result| {
            summary.total += 1;
            if result.error().is_some() {
                summary.failed += 1;
            } else if result.is_snipeable() {
                summary.snipeable += 1;
            }
            summary
        })
    }
}
