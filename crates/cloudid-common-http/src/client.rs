// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP client construction with a consistent User-Agent header.

use reqwest::{Client, ClientBuilder};

/// Creates a client builder carrying the cloudid User-Agent.
///
/// # Example
/// ```ignore
/// let client = cloudid_common_http::builder()
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// ```
pub fn builder() -> ClientBuilder {
	Client::builder().user_agent(user_agent())
}

/// Returns the User-Agent sent to the tenant.
///
/// Format: `cloudid/{version} ({os}-{arch})`
pub fn user_agent() -> String {
	format!(
		"cloudid/{} ({}-{})",
		env!("CARGO_PKG_VERSION"),
		std::env::consts::OS,
		std::env::consts::ARCH
	)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::time::Duration;

	#[test]
	fn user_agent_names_product_version_and_platform() {
		let ua = user_agent();
		assert!(ua.starts_with("cloudid/"));
		assert!(ua.contains(env!("CARGO_PKG_VERSION")));
		assert!(ua.contains(std::env::consts::OS));
	}

	#[test]
	fn builder_builds() {
		assert!(builder().timeout(Duration::from_secs(5)).build().is_ok());
	}
}
