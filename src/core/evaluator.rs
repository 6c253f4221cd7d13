use crate::core::hash::label_hash;
use crate::core::pricing::net_reg_price_at;
use crate::domain::model::{
    DomainQuery, Evaluation, ExpirationRecord, SnipeabilityResult, GRACE_PERIOD_DAYS,
};
use crate::domain::ports::{Clock, ExpirationOracle, SystemClock};
use crate::utils::error::{LookupError, OracleError, LOOKUP_FAILURE_MESSAGE};
use chrono::{DateTime, TimeDelta, Utc};
use std::sync::Arc;

/// Checks a single domain against the registrar and prices it.
pub struct SnipeabilityEvaluator<O: ExpirationOracle + ?Sized> {
    oracle: Arc<O>,
    clock: Arc<dyn Clock>,
}

impl<O: ExpirationOracle + ?Sized> SnipeabilityEvaluator<O> {
    pub fn new(oracle: Arc<O>) -> Self {
        Self::with_clock(oracle, Arc::new(SystemClock))
    }

    pub fn with_clock(oracle: Arc<O>, clock: Arc<dyn Clock>) -> Self {
        Self { oracle, clock }
    }

    pub async fn lookup<'a>(
        &self,
        query: &'a DomainQuery,
    ) -> Result<ExpirationRecord<'a>, LookupError> {
        let hash = label_hash(query.label());
        tracing::debug!("🔎 {}: labelhash {}", query.raw_name(), hash);

        let expiration_timestamp = self
            .oracle
            .get_expiration(hash)
            .await
            .map_err(|e| LookupError::new(query.raw_name(), e))?;

        Ok(ExpirationRecord {
            domain: query.raw_name(),
            expiration_timestamp,
        })
    }

    /// Derives dates, flag and price from a registrar answer at `now`.
    pub fn assess(
        &self,
        record: &ExpirationRecord<'_>,
        now: DateTime<Utc>,
    ) -> Result<Evaluation, LookupError> {
        let expiration_date = i64::try_from(record.expiration_timestamp)
            .ok()
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
            .and_then(|date| {
                date.checked_add_signed(TimeDelta::days(GRACE_PERIOD_DAYS))
                    .map(|grace_end| (date, grace_end))
            });
        let Some((expiration_date, grace_end)) = expiration_date else {
            return Err(LookupError::new(
                record.domain,
                OracleError::OutOfRange(record.expiration_timestamp.to_string()),
            ));
        };

        Ok(Evaluation {
            expiration_date,
            grace_end,
            snipeable: now > grace_end,
            price: net_reg_price_at(record.domain, grace_end, now),
        })
    }

    pub async fn try_evaluate(&self, domain: &str) -> Result<Evaluation, LookupError> {
        let query = DomainQuery::new(domain);
        let record = self.lookup(&query).await?;
        self.assess(&record, self.clock.now())
    }

    /// Lookup failures become an `error` result instead of propagating.
    pub async fn evaluate(&self, domain: &str) -> SnipeabilityResult {
        match self.try_evaluate(domain).await {
            Ok(evaluation) => {
                tracing::debug!(
                    "✅ {}: grace ends {}, snipeable={}, price={:.2}",
                    domain,
                    evaluation.grace_end,
                    evaluation.snipeable,
                    evaluation.price
                );
                SnipeabilityResult::evaluated(domain, evaluation)
            }
            Err(e) => {
                tracing::warn!("⚠️ Error checking ENS domain ({}): {}", domain, e);
                SnipeabilityResult::failed(domain, LOOKUP_FAILURE_MESSAGE)
            }
        }
    }
}
