// Rate limiting for Reddit API calls with exponential backoff.
//
// Reddit expects unauthenticated clients to stay around 60 requests per
// minute. This module provides a sliding-window rate limiter that
// throttles requests to stay under that limit, plus a retry wrapper that
// handles 429 (Too Many Requests) responses with exponential backoff
// and jitter.
//
// The limiter is shared across all concurrent tasks via &self, using
// interior mutability (Mutex) so callers need no outer lock.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::reddit::FetchError;

/// Mutable limiter state. One lock guards both the window and the
/// last-request stamp so the two pacing checks stay consistent when
/// tasks race.
#[derive(Default)]
struct State {
    /// Timestamps of recent requests within the current window.
    stamps: VecDeque<Instant>,
    /// Timestamp of the most recent request.
    last_request: Option<Instant>,
}

/// A sliding-window rate limiter for API calls.
///
/// Tracks request timestamps in a sliding window and pauses when the
/// configured limit is reached. Thread-safe via interior mutability so
/// it can be shared across concurrent tasks.
pub struct RateLimiter {
    state: Mutex<State>,
    /// Maximum number of requests allowed per window.
    max_requests: u32,
    /// Duration of the sliding window.
    window: Duration,
    /// Minimum delay between consecutive requests to avoid bursts.
    min_delay: Duration,
}

impl RateLimiter {
    /// Create a new rate limiter.
    ///
    /// - `max_requests_per_window`: how many requests are allowed in the window
    /// - `window_seconds`: the sliding window duration in seconds
    /// - `min_delay_ms`: minimum milliseconds between consecutive requests
    pub fn new(max_requests_per_window: u32, window_seconds: u64, min_delay_ms: u64) -> Self {
        Self {
            state: Mutex::new(State::default()),
            max_requests: max_requests_per_window,
            window: Duration::from_secs(window_seconds),
            min_delay: Duration::from_millis(min_delay_ms),
        }
    }

    /// Wait until a request may proceed, then record it.
    ///
    /// Two constraints apply: the minimum delay since the previous
    /// request, and the sliding-window cap. Both are evaluated under a
    /// single lock, and a slot is only claimed once neither requires a
    /// wait, so concurrent tasks cannot slip between the checks. The
    /// lock is always dropped before sleeping.
    pub async fn acquire(&self) {
        loop {
            let wait = {
                let now = Instant::now();
                let mut state = self.state.lock().unwrap();

                // Evict requests that have fallen outside the window
                while let Some(&oldest) = state.stamps.front() {
                    if now.duration_since(oldest) > self.window {
                        state.stamps.pop_front();
                    } else {
                        break;
                    }
                }

                let delay_wait = match state.last_request {
                    Some(last) => {
                        let elapsed = now.duration_since(last);
                        if elapsed < self.min_delay {
                            Some(self.min_delay - elapsed)
                        } else {
                            None
                        }
                    }
                    None => None,
                };

                let window_wait = if (state.stamps.len() as u32) < self.max_requests {
                    None
                } else {
                    // Window is full. Wait until the oldest stamp expires.
                    let oldest = *state.stamps.front().unwrap();
                    Some((oldest + self.window).duration_since(now))
                };

                // None < Some(_), so this picks the longer of the two waits.
                match delay_wait.max(window_wait) {
                    None => {
                        state.stamps.push_back(now);
                        state.last_request = Some(now);
                        None
                    }
                    Some(wait) => Some(wait),
                }
            }; // Lock is dropped here

            match wait {
                None => return, // Acquired successfully
                Some(wait) => {
                    debug!(
                        delay_ms = wait.as_millis() as u64,
                        "Rate limit: waiting before next request"
                    );
                    tokio::time::sleep(wait).await;
                }
            }
        }
    }

    #[cfg(test)]
    fn recorded(&self) -> usize {
        self.state.lock().unwrap().stamps.len()
    }
}

/// Maximum number of retry attempts on rate-limit (429) errors.
const MAX_RETRIES: u32 = 5;

/// Base delay for exponential backoff (doubles each retry).
const BASE_BACKOFF: Duration = Duration::from_secs(2);

/// Maximum backoff delay to cap exponential growth.
const MAX_BACKOFF: Duration = Duration::from_secs(60);

/// Retry an async operation with exponential backoff on rate-limit errors.
///
/// If the operation fails with a 429, it is retried up to `MAX_RETRIES`
/// times with exponentially increasing delays plus jitter. All other
/// errors are returned immediately.
///
/// The rate limiter's `acquire()` is called before each attempt so the
/// sliding window is respected even during retries.
pub async fn with_retry<F, Fut, T>(
    rate_limiter: &RateLimiter,
    operation: F,
) -> Result<T, FetchError>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<T, FetchError>>,
{
    let mut attempt = 0u32;

    loop {
        rate_limiter.acquire().await;

        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !err.is_rate_limited() || attempt >= MAX_RETRIES {
                    return Err(err);
                }

                attempt += 1;

                // Exponential backoff: base * 2^attempt, capped at MAX_BACKOFF
                let backoff = BASE_BACKOFF
                    .saturating_mul(1u32 << attempt)
                    .min(MAX_BACKOFF);

                // Jitter of 0.75x to 1.25x, derived from the clock's
                // nanosecond component rather than pulling in `rand`.
                let nanos = std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .unwrap_or_default()
                    .subsec_nanos();
                let jitter_factor = 0.75 + (nanos % 500) as f64 / 1000.0;
                let jittered = Duration::from_secs_f64(backoff.as_secs_f64() * jitter_factor);

                warn!(
                    attempt = attempt,
                    max_retries = MAX_RETRIES,
                    backoff_secs = jittered.as_secs_f64(),
                    "Rate limited (429), retrying in {:.1}s (attempt {}/{})",
                    jittered.as_secs_f64(),
                    attempt,
                    MAX_RETRIES,
                );

                tokio::time::sleep(jittered).await;
            }
        }
    }
}
