//! Fixed-window request budget per client IP.

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use thiserror::Error;

use crate::errors::AppError;

/// Expired windows are swept once this many clients are tracked.
const SWEEP_THRESHOLD: usize = 10_000;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid rate limit '{0}'. Use e.g. '10 per minute' or '100/hour'.")]
pub struct InvalidRateLimit(String);

/// `max_requests` per `window`, e.g. "10 per minute".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitRule {
    pub max_requests: u32,
    pub window: Duration,
}

impl Default for RateLimitRule {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window: Duration::from_secs(60),
        }
    }
}

impl FromStr for RateLimitRule {
    type Err = InvalidRateLimit;

    /// Accepts `N per <unit>` and `N/<unit>` with unit second, minute, hour or day.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidRateLimit(s.to_string());
        let normalized = s.trim().to_lowercase();

        let (count, unit) = normalized
            .split_once(" per ")
            .or_else(|| normalized.split_once('/'))
            .ok_or_else(invalid)?;

        let max_requests: u32 = count.trim().parse().map_err(|_| invalid())?;
        if max_requests == 0 {
            return Err(invalid());
        }

        let secs = match unit.trim().trim_end_matches('s') {
            "second" | "sec" => 1,
            "minute" | "min" => 60,
            "hour" => 3600,
            "day" => 86_400,
            _ => return Err(invalid()),
        };

        Ok(Self {
            max_requests,
            window: Duration::from_secs(secs),
        })
    }
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

/// Counts requests per IP. Shared through `AppState`.
pub struct RateLimiter {
    rule: RateLimitRule,
    windows: Mutex<HashMap<IpAddr, Window>>,
}

impl RateLimiter {
    pub fn new(rule: RateLimitRule) -> Self {
        Self {
            rule,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Records one request. `Err` carries the seconds until the window resets.
    pub fn check_at(&self, ip: IpAddr, now: Instant) -> Result<(), u64> {
        let mut windows = match self.windows.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if windows.len() >= SWEEP_THRESHOLD {
            let period = self.rule.window;
            windows.retain(|_, w| now.saturating_duration_since(w.started) < period);
        }

        let window = windows.entry(ip).or_insert(Window {
            started: now,
            count: 0,
        });

        let elapsed = now.saturating_duration_since(window.started);
        if elapsed >= self.rule.window {
            *window = Window {
                started: now,
                count: 0,
            };
        }

        if window.count >= self.rule.max_requests {
            let remaining = self
                .rule
                .window
                .saturating_sub(now.saturating_duration_since(window.started));
            return Err(remaining.as_secs().max(1));
        }

        window.count += 1;
        Ok(())
    }

    pub fn check(&self, ip: IpAddr) -> Result<(), u64> {
        self.check_at(ip, Instant::now())
    }
}

/// Rejects the request with 429 once the client's budget for the window is spent.
pub async fn rate_limit_middleware(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ip = client_ip(&request);

    if let Err(retry_after_secs) = limiter.check(ip) {
        tracing::warn!("Rate limit exceeded for {ip}");
        return Err(AppError::RateLimited { retry_after_secs });
    }

    Ok(next.run(request).await)
}

/// Peer address from `ConnectInfo`; unspecified when served without it (tests).
fn client_ip(request: &Request) -> IpAddr {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}
