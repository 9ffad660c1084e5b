// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Connection settings for a tenant.

use std::env;
use std::net::IpAddr;
use std::time::Duration;

use cloudid_common_config::{load_secret_env, Secret, SecretString};
use cloudid_common_http::RetryConfig;
use url::{Host, Url};

use crate::error::ClientError;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const ENV_TENANT_URL: &str = "CLOUDID_TENANT_URL";
pub const ENV_USERNAME: &str = "CLOUDID_USERNAME";
pub const ENV_PASSWORD: &str = "CLOUDID_PASSWORD";

/// Tenant URL and basic-auth credentials.
///
/// The password is held as a [`SecretString`] and never printed by `Debug`.
#[derive(Clone)]
pub struct ClientConfig {
	tenant_url: Url,
	username: String,
	password: SecretString,
	timeout: Duration,
	pub retry_config: RetryConfig,
}

impl std::fmt::Debug for ClientConfig {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ClientConfig")
			.field("tenant_url", &self.tenant_url.as_str())
			.field("username", &self.username)
			.field("password", &self.password)
			.field("timeout", &self.timeout)
			.field("retry_config", &self.retry_config)
			.finish()
	}
}

impl ClientConfig {
	/// Validate a tenant URL.
	///
	/// Requirements:
	/// - Must be an absolute URL with a host
	/// - Must use HTTPS, except for loopback hosts where plain HTTP is allowed
	/// - Must not carry a query or fragment
	fn validate_tenant_url(raw: &str) -> Result<Url, ClientError> {
		let url = Url::parse(raw)
			.map_err(|e| ClientError::Config(format!("invalid tenant URL '{raw}': {e}")))?;

		let host = url
			.host()
			.ok_or_else(|| ClientError::Config(format!("tenant URL '{raw}' must include a host")))?;

		match url.scheme() {
			"https" => {}
			"http" if is_loopback(&host) => {}
			other => {
				return Err(ClientError::Config(format!(
					"tenant URL must use https, got '{other}'"
				)))
			}
		}

		if url.query().is_some() || url.fragment().is_some() {
			return Err(ClientError::Config(format!(
				"tenant URL '{raw}' must not carry a query or fragment"
			)));
		}

		Ok(url)
	}

	pub fn new(
		tenant_url: &str,
		username: impl Into<String>,
		password: impl Into<String>,
	) -> Result<Self, ClientError> {
		let username = username.into();
		if username.is_empty() {
			return Err(ClientError::Config("username must not be empty".to_string()));
		}

		Ok(Self {
			tenant_url: Self::validate_tenant_url(tenant_url)?,
			username,
			password: Secret::new(password.into()),
			timeout: DEFAULT_TIMEOUT,
			retry_config: RetryConfig::default(),
		})
	}

	/// Create configuration from environment variables.
	///
	/// - `CLOUDID_TENANT_URL`: tenant base URL
	/// - `CLOUDID_USERNAME`: technical user or client id
	/// - `CLOUDID_PASSWORD`: its password (or `CLOUDID_PASSWORD_FILE`)
	pub fn from_env() -> Result<Self, ClientError> {
		let tenant_url = env::var(ENV_TENANT_URL)
			.map_err(|_| ClientError::Config(format!("{ENV_TENANT_URL} not set")))?;
		let username = env::var(ENV_USERNAME)
			.map_err(|_| ClientError::Config(format!("{ENV_USERNAME} not set")))?;
		let password = load_secret_env(ENV_PASSWORD)
			.map_err(|e| ClientError::Config(e.to_string()))?
			.ok_or_else(|| ClientError::Config(format!("{ENV_PASSWORD} not set")))?;

		let mut config = Self::new(&tenant_url, username, String::new())?;
		config.password = password;
		Ok(config)
	}

	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	pub fn with_retry_config(mut self, config: RetryConfig) -> Self {
		self.retry_config = config;
		self
	}

	pub fn tenant_url(&self) -> &Url {
		&self.tenant_url
	}

	pub fn username(&self) -> &str {
		&self.username
	}

	pub(crate) fn password(&self) -> &str {
		self.password.expose()
	}

	pub fn timeout(&self) -> Duration {
		self.timeout
	}

	/// Absolute URL for an API path such as `/scim/Users/123`.
	///
	/// Any path already on the tenant URL is kept as a prefix.
	pub fn endpoint(&self, path: &str) -> String {
		format!(
			"{}/{}",
			self.tenant_url.as_str().trim_end_matches('/'),
			path.trim_start_matches('/')
		)
	}
}

fn is_loopback(host: &Host<&str>) -> bool {
	match host {
		Host::Domain(domain) => domain.eq_ignore_ascii_case("localhost"),
		Host::Ipv4(ip) => IpAddr::V4(*ip).is_loopback(),
		Host::Ipv6(ip) => IpAddr::V6(*ip).is_loopback(),
	}
}
