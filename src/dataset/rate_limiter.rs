use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::{sleep, Duration, Instant};

/// Soft client-side budget of requests per minute.
pub struct RateLimiter {
    state: Arc<Mutex<RateLimitState>>,
    requests_per_minute: u32,
}

struct RateLimitState {
    requests_this_minute: u32,
    minute_start: Instant,
}

impl RateLimiter {
    pub fn new(requests_per_minute: u32) -> Self {
        Self {
            state: Arc::new(Mutex::new(RateLimitState {
                requests_this_minute: 0,
                minute_start: Instant::now(),
            })),
            requests_per_minute: requests_per_minute.max(1),
        }
    }

    pub async fn wait(&self) {
        let mut state = self.state.lock().await;

        let minute_elapsed = state.minute_start.elapsed();
        if minute_elapsed < Duration::from_secs(60) {
            if state.requests_this_minute >= self.requests_per_minute {
                let wait_time = Duration::from_secs(60) - minute_elapsed;
                drop(state);
                tracing::debug!("Soft rate limiting, waiting {:?}", wait_time);
                sleep(wait_time).await;
                state = self.state.lock().await;
                state.requests_this_minute = 0;
                state.minute_start = Instant::now();
            }
        } else {
            state.requests_this_minute = 0;
            state.minute_start = Instant::now();
        }

        state.requests_this_minute += 1;
    }

    pub async fn requests_this_minute(&self) -> u32 {
        self.state.lock().await.requests_this_minute
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(120)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_under_budget_does_not_block() {
        let limiter = RateLimiter::new(3);
        let result = tokio::time::timeout(Duration::from_secs(1), async {
            limiter.wait().await;
            limiter.wait().await;
            limiter.wait().await;
        })
        .await;

        assert!(result.is_ok());
        assert_eq!(limiter.requests_this_minute().await, 3);
    }

    #[tokio::test]
    async fn test_over_budget_blocks() {
        let limiter = RateLimiter::new(1);
        limiter.wait().await;
        let result = tokio::time::timeout(Duration::from_millis(50), limiter.wait()).await;
        assert!(result.is_err());
    }
}
