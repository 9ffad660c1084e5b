// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Retry with exponential backoff.
//!
//! Only idempotent tenant calls go through [`retry`]; a POST that times out
//! may already have created the resource.

use std::future::Future;
use std::time::Duration;

use reqwest::StatusCode;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
	/// Total attempts including the first one.
	pub max_attempts: u32,
	pub base_delay: Duration,
	pub max_delay: Duration,
	pub backoff_factor: f64,
	/// Scale each delay by a random factor in `[0.5, 1.5)`.
	pub jitter: bool,
}

impl Default for RetryConfig {
	fn default() -> Self {
		Self {
			max_attempts: 3,
			base_delay: Duration::from_millis(200),
			max_delay: Duration::from_secs(5),
			backoff_factor: 2.0,
			jitter: true,
		}
	}
}

impl RetryConfig {
	pub fn single_attempt() -> Self {
		Self {
			max_attempts: 1,
			..Self::default()
		}
	}

	/// Pause before retry number `retry_number` (zero-based).
	fn backoff(&self, retry_number: u32) -> Duration {
		let growth = self.backoff_factor.powi(retry_number.min(i32::MAX as u32) as i32);
		let secs = (self.base_delay.as_secs_f64() * growth).min(self.max_delay.as_secs_f64());
		let factor = if self.jitter { 0.5 + fastrand::f64() } else { 1.0 };
		Duration::from_secs_f64(secs * factor)
	}
}

/// Errors that know whether another attempt could succeed.
pub trait RetryableError {
	fn is_retryable(&self) -> bool;
}

/// Rate limiting, request timeout and server-side failures.
pub fn is_retryable_status(status: StatusCode) -> bool {
	matches!(
		status,
		StatusCode::TOO_MANY_REQUESTS | StatusCode::REQUEST_TIMEOUT
	) || status.is_server_error()
}

impl RetryableError for reqwest::Error {
	fn is_retryable(&self) -> bool {
		self.is_timeout()
			|| self.is_connect()
			|| self.status().is_some_and(is_retryable_status)
	}
}

/// Call `operation` until it succeeds, fails permanently, or
/// `config.max_attempts` calls have been made.
pub async fn retry<F, Fut, T, E>(config: &RetryConfig, mut operation: F) -> Result<T, E>
where
	F: FnMut() -> Fut,
	Fut: Future<Output = Result<T, E>>,
	E: RetryableError + std::fmt::Debug,
{
	let max_attempts = config.max_attempts.max(1);

	for attempt in 1.. {
		let err = match operation().await {
			Ok(value) => {
				if attempt > 1 {
					debug!(attempt, "succeeded after retry");
				}
				return Ok(value);
			}
			Err(err) => err,
		};

		if !err.is_retryable() || attempt >= max_attempts {
			if err.is_retryable() {
				warn!(error = ?err, attempt, max_attempts, "giving up after repeated failures");
			}
			return Err(err);
		}

		let pause = config.backoff(attempt - 1);
		warn!(
			error = ?err,
			attempt,
			max_attempts,
			delay_ms = pause.as_millis(),
			"transient failure, retrying"
		);
		tokio::time::sleep(pause).await;
	}

	unreachable!("attempt counter is unbounded")
}
