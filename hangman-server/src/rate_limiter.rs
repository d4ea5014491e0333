use std::net::IpAddr;
use std::time::{Duration, Instant};

use dashmap::DashMap;

/// Token bucket: starts full, one token back every `refill_rate`.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    tokens: u32,
    max_tokens: u32,
    refill_rate: Duration,
    last_refill: Instant,
}

impl RateLimiter {
    pub fn new(max_tokens: u32, refill_rate: Duration) -> Self {
        Self {
            tokens: max_tokens,
            max_tokens,
            refill_rate,
            last_refill: Instant::now(),
        }
    }

    pub fn check_rate_limit(&mut self) -> bool {
        self.refill_tokens();

        if self.tokens > 0 {
            self.tokens -= 1;
            true
        } else {
            false
        }
    }

    fn refill_tokens(&mut self) {
        let refill_nanos = self.refill_rate.as_nanos().max(1);
        let earned = self.last_refill.elapsed().as_nanos() / refill_nanos;
        if earned == 0 {
            return;
        }

        let missing = self.max_tokens - self.tokens;
        if earned >= u128::from(missing) {
            self.tokens = self.max_tokens;
            self.last_refill = Instant::now();
        } else {
            // earned < missing <= u32::MAX
            let earned = earned as u32;
            self.tokens += earned;
            self.last_refill += self.refill_rate * earned;
        }
    }

    pub fn remaining_tokens(&mut self) -> u32 {
        self.refill_tokens();
        self.tokens
    }

    fn is_full(&mut self) -> bool {
        self.remaining_tokens() == self.max_tokens
    }
}

/// One bucket per client address. Requests without a known address share a bucket.
#[derive(Debug)]
pub struct ClientRateLimits {
    buckets: DashMap<Option<IpAddr>, RateLimiter>,
    burst: u32,
    refill_rate: Duration,
}

impl ClientRateLimits {
    pub fn new(burst: u32, refill_rate: Duration) -> Self {
        Self {
            buckets: DashMap::new(),
            burst,
            refill_rate,
        }
    }

    pub fn check(&self, client: Option<IpAddr>) -> bool {
        self.buckets
            .entry(client)
            .or_insert_with(|| RateLimiter::new(self.burst, self.refill_rate))
            .check_rate_limit()
    }

    /// Drop buckets that have refilled completely; they carry no state.
    pub fn purge_full(&self) -> usize {
        let before = self.buckets.len();
        self.buckets.retain(|_, limiter| !limiter.is_full());
        before.saturating_sub(self.buckets.len())
    }
}
