//! What to do when a catalog fetch fails.

use super::{CrawlError, CrawlItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureDecision {
    /// Give up on the item and move on.
    Skip,
    /// Fetch the item again.
    Retry,
}

/// Decides the fate of a failed fetch. `attempt` starts at 1.
pub trait FailurePolicy: Send + Sync {
    fn on_failure(&self, item: CrawlItem, attempt: u32, error: &CrawlError) -> FailureDecision;
}

/// Log the failure and never retry.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAndSkip;

impl FailurePolicy for LogAndSkip {
    fn on_failure(&self, item: CrawlItem, _attempt: u32, error: &CrawlError) -> FailureDecision {
        tracing::warn!(item = %item, error = %error, "Catalog fetch failed, skipping");
        FailureDecision::Skip
    }
}

/// Retry transient failures up to `max_attempts` fetches in total.
#[derive(Debug, Clone, Copy)]
pub struct BoundedRetry {
    pub max_attempts: u32,
}

impl BoundedRetry {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }
}

impl FailurePolicy for BoundedRetry {
    fn on_failure(&self, item: CrawlItem, attempt: u32, error: &CrawlError) -> FailureDecision {
        if !error.is_transient() {
            tracing::error!(item = %item, error = %error, "Catalog fetch failed with non-retryable error");
            return FailureDecision::Skip;
        }

        if attempt < self.max_attempts {
            tracing::warn!(
                item = %item,
                attempt = attempt,
                max_attempts = self.max_attempts,
                error = %error,
                "Catalog fetch failed, retrying..."
            );
            FailureDecision::Retry
        } else {
            tracing::error!(
                item = %item,
                attempts = attempt,
                error = %error,
                "Catalog fetch failed after all retry attempts"
            );
            FailureDecision::Skip
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::CatalogError;
    use kinograph_domain::MovieId;

    const ITEM: CrawlItem = CrawlItem::Movie(MovieId::new(1000));

    #[test]
    fn log_and_skip_never_retries() {
        let error = CrawlError::from(CatalogError::Status(503));
        assert_eq!(LogAndSkip.on_failure(ITEM, 1, &error), FailureDecision::Skip);
    }

    #[test]
    fn bounded_retry_stops_at_the_limit() {
        let policy = BoundedRetry::new(3);
        let error = CrawlError::from(CatalogError::Request("connection reset".into()));

        assert_eq!(policy.on_failure(ITEM, 1, &error), FailureDecision::Retry);
        assert_eq!(policy.on_failure(ITEM, 2, &error), FailureDecision::Retry);
        assert_eq!(policy.on_failure(ITEM, 3, &error), FailureDecision::Skip);
    }

    #[test]
    fn bounded_retry_skips_permanent_failures() {
        let policy = BoundedRetry::new(3);
        let error = CrawlError::from(CatalogError::Status(404));
        assert_eq!(policy.on_failure(ITEM, 1, &error), FailureDecision::Skip);
    }
}
