//! Client-side request throttling.
//!
//! Two independent guards run before every upstream request:
//!
//! - **Cooldown**: after the API answers with a rate-limit error the resume
//!   time is stored and every attempt before it is refused locally.
//! - **Hourly budget**: an advisory counter of requests in the current
//!   window. The window opens with the first request and lasts one hour.
//!
//! Both live in the session file so they survive between runs. Neither is a
//! real rate limiter; the API still enforces its own quota.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::fetch::FetchError;

fn window() -> TimeDelta {
    TimeDelta::hours(1)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Throttle {
    /// No request may be sent before this instant.
    pub cooldown_until: Option<DateTime<Utc>>,
    /// First request of the current budget window.
    pub window_start: Option<DateTime<Utc>>,
    pub requests_in_window: u32,
}

impl Throttle {
    /// Refuse the request if a cooldown is active or the budget is spent.
    pub fn check(&self, now: DateTime<Utc>, max_per_hour: u32) -> Result<(), FetchError> {
        if let Some(until) = self.cooldown_until
            && now < until
        {
            return Err(FetchError::CoolingDown { until });
        }
        if let Some(resets_at) = self.budget_resets_at(now)
            && self.requests_in_window >= max_per_hour
        {
            return Err(FetchError::BudgetExhausted { resets_at });
        }
        Ok(())
    }

    /// Count one request against the budget, opening a new window if needed.
    pub fn record_request(&mut self, now: DateTime<Utc>) {
        if self.budget_resets_at(now).is_some() {
            self.requests_in_window += 1;
        } else {
            self.window_start = Some(now);
            self.requests_in_window = 1;
        }
    }

    /// Suspend requests for `seconds`. Returns the resume instant.
    pub fn enter_cooldown(&mut self, now: DateTime<Utc>, seconds: u64) -> DateTime<Utc> {
        let until = i64::try_from(seconds)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .and_then(|d| now.checked_add_signed(d))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.cooldown_until = Some(until);
        until
    }

    pub fn cooldown_remaining(&self, now: DateTime<Utc>) -> Option<TimeDelta> {
        self.cooldown_until
            .filter(|until| now < *until)
            .map(|until| until - now)
    }

    /// End of the current window, if one is open at `now`.
    pub fn budget_resets_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.window_start
            .map(|start| start + window())
            .filter(|resets_at| now < *resets_at)
    }

    pub fn budget_remaining(&self, now: DateTime<Utc>, max_per_hour: u32) -> u32 {
        match self.budget_resets_at(now) {
            Some(_) => max_per_hour.saturating_sub(self.requests_in_window),
            None => max_per_hour,
        }
    }
}

/// Render a countdown as `1h 02m 05s`, `2m 05s`, or `5s`. Negative is `0s`.
pub fn format_remaining(delta: TimeDelta) -> String {
    let total = delta.num_seconds().max(0);
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
    if hours > 0 {
        format!("{hours}h {minutes:02}m {seconds:02}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds:02}s")
    } else {
        format!("{seconds}s")
    }
}
