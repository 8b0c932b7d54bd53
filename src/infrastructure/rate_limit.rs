use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Sliding-window limiter keyed by an arbitrary string, in practice
/// `checkout:<client-ip>`. State is in-process only, so limits reset on
/// restart and are per instance.
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    hits: Mutex<HashMap<String, VecDeque<Instant>>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed { remaining: u32 },
    Limited { retry_after: Duration },
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            hits: Mutex::new(HashMap::new()),
        }
    }

    pub fn check(&self, key: &str) -> RateDecision {
        self.check_at(key, Instant::now())
    }

    fn check_at(&self, key: &str, now: Instant) -> RateDecision {
        let mut hits = self.hits.lock();
        let bucket = hits.entry(key.to_string()).or_default();

        while bucket
            .front()
            .is_some_and(|hit| now.duration_since(*hit) >= self.window)
        {
            bucket.pop_front();
        }

        if bucket.len() as u32 >= self.max_requests {
            let oldest = bucket.front().copied().unwrap_or(now);
            let retry_after = self.window.saturating_sub(now.duration_since(oldest));
            return RateDecision::Limited { retry_after };
        }

        bucket.push_back(now);
        RateDecision::Allowed {
            remaining: self.max_requests - bucket.len() as u32,
        }
    }
}
