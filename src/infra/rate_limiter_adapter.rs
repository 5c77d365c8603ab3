use crate::app::ports::RateLimiterPort;
use crate::config::RateLimitConfig;
use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;

/// Sleeps a fixed base delay plus a random jitter before each outbound request.
/// Requests are issued one at a time, so every pause holds up the whole run.
#[derive(Debug, Clone)]
pub struct JitterRateLimiter {
    base_delay: Duration,
    max_jitter: Duration,
}

impl JitterRateLimiter {
    pub fn new(base_delay: Duration, max_jitter: Duration) -> Self {
        Self { base_delay, max_jitter }
    }

    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::new(config.base_delay(), config.max_jitter())
    }

    /// Base delay plus a uniform draw from `[0, max_jitter)`.
    pub fn next_delay(&self) -> Duration {
        let jitter_ms = self.max_jitter.as_millis() as u64;
        let jitter = if jitter_ms == 0 {
            0
        } else {
            rand::thread_rng().gen_range(0..jitter_ms)
        };
        self.base_delay + Duration::from_millis(jitter)
    }
}

#[async_trait]
impl RateLimiterPort for JitterRateLimiter {
    async fn pause(&self) {
        let delay = self.next_delay();
        tracing::trace!("Pausing {:?} before request", delay);
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_stays_within_bounds() {
        let limiter = JitterRateLimiter::new(Duration::from_millis(100), Duration::from_millis(40));
        for _ in 0..200 {
            let delay = limiter.next_delay();
            assert!(delay >= Duration::from_millis(100));
            assert!(delay < Duration::from_millis(140));
        }
    }

    #[test]
    fn zero_jitter_is_exactly_the_base_delay() {
        let limiter = JitterRateLimiter::new(Duration::from_millis(5), Duration::ZERO);
        assert_eq!(limiter.next_delay(), Duration::from_millis(5));
    }

    #[tokio::test(start_paused = true)]
    async fn pause_sleeps_for_the_delay() {
        let limiter = JitterRateLimiter::new(Duration::from_secs(1), Duration::ZERO);
        let started = tokio::time::Instant::now();
        limiter.pause().await;
        assert!(started.elapsed() >= Duration::from_secs(1));
    }
}
