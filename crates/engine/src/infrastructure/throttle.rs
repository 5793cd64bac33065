//! Outbound request pacing for the crawler.

use std::time::Duration;

use async_trait::async_trait;

use crate::infrastructure::ports::ThrottlePort;

/// Sleeps a fixed duration before every request.
pub struct FixedDelayThrottle {
    delay: Duration,
}

impl FixedDelayThrottle {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl ThrottlePort for FixedDelayThrottle {
    async fn wait(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

/// Never waits.
pub struct NoThrottle;

#[async_trait]
impl ThrottlePort for NoThrottle {
    async fn wait(&self) {}
}
