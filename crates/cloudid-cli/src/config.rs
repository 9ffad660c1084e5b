// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Layered CLI configuration.
//!
//! Precedence, lowest first: built-in defaults, TOML file, `CLOUDID_*`
//! environment, command-line flags.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use cloudid_client::ClientConfig;
use cloudid_common_config::{load_secret_env, SecretString};
use cloudid_common_http::RetryConfig;
use serde::Deserialize;
use tracing::{debug, trace};

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// I/O error reading config file
	#[error("I/O error reading {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// TOML parsing error
	#[error("TOML parse error in {path}: {source}")]
	TomlParse {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("environment error: {0}")]
	Env(String),

	#[error("missing required setting: {0}")]
	MissingField(&'static str),

	#[error("invalid value for {field}: {message}")]
	InvalidValue { field: String, message: String },
}

impl ConfigError {
	pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
		Self::InvalidValue {
			field: field.into(),
			message: message.into(),
		}
	}
}

/// Partial configuration - every field optional so layers can be merged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigLayer {
	#[serde(default)]
	pub tenant: Option<TenantLayer>,
	#[serde(default)]
	pub logging: Option<LoggingLayer>,
	#[serde(default)]
	pub retry: Option<RetryLayer>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TenantLayer {
	#[serde(default)]
	pub url: Option<String>,
	#[serde(default)]
	pub username: Option<String>,
	#[serde(default)]
	pub password: Option<SecretString>,
	#[serde(default)]
	pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingLayer {
	#[serde(default)]
	pub level: Option<String>,
	#[serde(default)]
	pub format: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetryLayer {
	#[serde(default)]
	pub max_attempts: Option<u32>,
	#[serde(default)]
	pub base_delay_ms: Option<u64>,
	#[serde(default)]
	pub max_delay_ms: Option<u64>,
}

impl ConfigLayer {
	/// Merge another layer into this one. Other layer takes precedence.
	pub fn merge(&mut self, other: ConfigLayer) {
		merge_option(&mut self.tenant, other.tenant, TenantLayer::merge);
		merge_option(&mut self.logging, other.logging, LoggingLayer::merge);
		merge_option(&mut self.retry, other.retry, RetryLayer::merge);
	}
}

fn merge_option<T, F>(target: &mut Option<T>, source: Option<T>, merge_fn: F)
where
	F: FnOnce(&mut T, T),
{
	match (target.as_mut(), source) {
		(Some(t), Some(s)) => merge_fn(t, s),
		(None, Some(s)) => *target = Some(s),
		_ => {}
	}
}

fn merge_field<T>(target: &mut Option<T>, source: Option<T>) {
	if source.is_some() {
		*target = source;
	}
}

impl TenantLayer {
	fn merge(&mut self, other: TenantLayer) {
		merge_field(&mut self.url, other.url);
		merge_field(&mut self.username, other.username);
		merge_field(&mut self.password, other.password);
		merge_field(&mut self.timeout_secs, other.timeout_secs);
	}
}

impl LoggingLayer {
	fn merge(&mut self, other: LoggingLayer) {
		merge_field(&mut self.level, other.level);
		merge_field(&mut self.format, other.format);
	}
}

impl RetryLayer {
	fn merge(&mut self, other: RetryLayer) {
		merge_field(&mut self.max_attempts, other.max_attempts);
		merge_field(&mut self.base_delay_ms, other.base_delay_ms);
		merge_field(&mut self.max_delay_ms, other.max_delay_ms);
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
	Error,
	Warn,
	#[default]
	Info,
	Debug,
	Trace,
}

impl FromStr for LogLevel {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"error" => Ok(Self::Error),
			"warn" => Ok(Self::Warn),
			"info" => Ok(Self::Info),
			"debug" => Ok(Self::Debug),
			"trace" => Ok(Self::Trace),
			other => Err(ConfigError::invalid_value(
				"logging.level",
				format!("unknown level '{other}'"),
			)),
		}
	}
}

impl LogLevel {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Error => "error",
			Self::Warn => "warn",
			Self::Info => "info",
			Self::Debug => "debug",
			Self::Trace => "trace",
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
	#[default]
	Pretty,
	Compact,
	Json,
}

impl FromStr for LogFormat {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"pretty" => Ok(Self::Pretty),
			"compact" => Ok(Self::Compact),
			"json" => Ok(Self::Json),
			other => Err(ConfigError::invalid_value(
				"logging.format",
				format!("unknown format '{other}'"),
			)),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoggingConfig {
	pub level: LogLevel,
	pub format: LogFormat,
}

#[derive(Debug, Clone, Default)]
pub struct TenantSettings {
	pub url: Option<String>,
	pub username: Option<String>,
	pub password: Option<SecretString>,
	pub timeout: Option<Duration>,
}

/// The resolved configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
	pub tenant: TenantSettings,
	pub logging: LoggingConfig,
	pub retry: RetryConfig,
}

impl CliConfig {
	/// Apply defaults to a merged layer and validate what is present.
	///
	/// Tenant settings are only checked by [`Self::client_config`].
	pub fn finalize(layer: ConfigLayer) -> Result<Self, ConfigError> {
		let logging = layer.logging.unwrap_or_default();
		let logging = LoggingConfig {
			level: logging
				.level
				.as_deref()
				.map(str::parse::<LogLevel>)
				.transpose()?
				.unwrap_or_default(),
			format: logging
				.format
				.as_deref()
				.map(str::parse::<LogFormat>)
				.transpose()?
				.unwrap_or_default(),
		};

		let retry_layer = layer.retry.unwrap_or_default();
		let mut retry = RetryConfig::default();
		if let Some(max_attempts) = retry_layer.max_attempts {
			if max_attempts == 0 {
				return Err(ConfigError::invalid_value("retry.max_attempts", "must be at least 1"));
			}
			retry.max_attempts = max_attempts;
		}
		if let Some(ms) = retry_layer.base_delay_ms {
			retry.base_delay = Duration::from_millis(ms);
		}
		if let Some(ms) = retry_layer.max_delay_ms {
			retry.max_delay = Duration::from_millis(ms);
		}
		if retry.base_delay > retry.max_delay {
			return Err(ConfigError::invalid_value(
				"retry.base_delay_ms",
				"must not exceed retry.max_delay_ms",
			));
		}

		let tenant = layer.tenant.unwrap_or_default();
		Ok(Self {
			tenant: TenantSettings {
				url: tenant.url,
				username: tenant.username,
				password: tenant.password,
				timeout: tenant.timeout_secs.map(Duration::from_secs),
			},
			logging,
			retry,
		})
	}

	/// Build the client configuration; fails if a tenant setting is missing.
	pub fn client_config(&self) -> Result<ClientConfig, ConfigError> {
		let url = self.tenant.url.as_deref().ok_or(ConfigError::MissingField("tenant.url"))?;
		let username = self
			.tenant
			.username
			.as_deref()
			.ok_or(ConfigError::MissingField("tenant.username"))?;
		let password = self
			.tenant
			.password
			.as_ref()
			.ok_or(ConfigError::MissingField("tenant.password"))?;

		let mut config = ClientConfig::new(url, username, password.expose().as_str())
			.map_err(|e| ConfigError::invalid_value("tenant", e.to_string()))?
			.with_retry_config(self.retry.clone());
		if let Some(timeout) = self.tenant.timeout {
			config = config.with_timeout(timeout);
		}
		Ok(config)
	}
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
	pub config_file: Option<PathBuf>,
	pub tenant_url: Option<String>,
	pub username: Option<String>,
	pub log_level: Option<String>,
	pub log_format: Option<String>,
}

impl CliOverrides {
	fn to_layer(&self) -> ConfigLayer {
		let mut layer = ConfigLayer::default();
		if self.tenant_url.is_some() || self.username.is_some() {
			layer.tenant = Some(TenantLayer {
				url: self.tenant_url.clone(),
				username: self.username.clone(),
				..Default::default()
			});
		}
		if self.log_level.is_some() || self.log_format.is_some() {
			layer.logging = Some(LoggingLayer {
				level: self.log_level.clone(),
				format: self.log_format.clone(),
			});
		}
		layer
	}
}

/// `$XDG_CONFIG_HOME/cloudid/config.toml`, or the platform equivalent.
pub fn default_config_path() -> Option<PathBuf> {
	dirs::config_dir().map(|dir| dir.join("cloudid").join("config.toml"))
}

/// Read one TOML file. A missing file is an error only when `required`.
pub fn load_file(path: &Path, required: bool) -> Result<ConfigLayer, ConfigError> {
	if !required && !path.exists() {
		debug!(path = %path.display(), "config file not found, skipping");
		return Ok(ConfigLayer::default());
	}

	debug!(path = %path.display(), "loading config file");
	let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
		path: path.to_path_buf(),
		source,
	})?;

	toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
		path: path.to_path_buf(),
		source,
	})
}

/// Build a layer from `CLOUDID_*` variables.
///
/// The password goes through [`load_secret_env`], so `CLOUDID_PASSWORD_FILE`
/// works too.
pub fn load_env() -> Result<ConfigLayer, ConfigError> {
	let password =
		load_secret_env("CLOUDID_PASSWORD").map_err(|e| ConfigError::Env(e.to_string()))?;
	env_layer(std::env::vars(), password)
}

fn env_layer(
	vars: impl Iterator<Item = (String, String)>,
	password: Option<SecretString>,
) -> Result<ConfigLayer, ConfigError> {
	let mut layer = ConfigLayer::default();

	if let Some(password) = password {
		trace!("loaded tenant password from environment");
		layer.tenant.get_or_insert_with(TenantLayer::default).password = Some(password);
	}

	for (key, value) in vars {
		if !key.starts_with("CLOUDID_") {
			continue;
		}
		let value = value.trim().to_string();
		if value.is_empty() {
			continue;
		}

		trace!(key = %key, "processing env var");

		match key.as_str() {
			"CLOUDID_TENANT_URL" => {
				layer.tenant.get_or_insert_with(TenantLayer::default).url = Some(value);
			}
			"CLOUDID_USERNAME" => {
				layer.tenant.get_or_insert_with(TenantLayer::default).username = Some(value);
			}
			"CLOUDID_TIMEOUT_SECS" => {
				layer.tenant.get_or_insert_with(TenantLayer::default).timeout_secs =
					Some(parse_number(&key, &value)?);
			}
			"CLOUDID_LOG_LEVEL" => {
				layer.logging.get_or_insert_with(LoggingLayer::default).level = Some(value);
			}
			"CLOUDID_LOG_FORMAT" => {
				layer.logging.get_or_insert_with(LoggingLayer::default).format = Some(value);
			}
			"CLOUDID_RETRY_MAX_ATTEMPTS" => {
				layer.retry.get_or_insert_with(RetryLayer::default).max_attempts =
					Some(parse_number(&key, &value)?);
			}
			"CLOUDID_RETRY_BASE_DELAY_MS" => {
				layer.retry.get_or_insert_with(RetryLayer::default).base_delay_ms =
					Some(parse_number(&key, &value)?);
			}
			"CLOUDID_RETRY_MAX_DELAY_MS" => {
				layer.retry.get_or_insert_with(RetryLayer::default).max_delay_ms =
					Some(parse_number(&key, &value)?);
			}
			_ => {}
		}
	}

	Ok(layer)
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
	value
		.parse()
		.map_err(|_| ConfigError::invalid_value(key, format!("expected a number, got '{value}'")))
}

/// Load every layer and resolve the final configuration.
pub fn load_config(overrides: &CliOverrides) -> Result<CliConfig, ConfigError> {
	let mut layer = ConfigLayer::default();

	match &overrides.config_file {
		Some(path) => layer.merge(load_file(path, true)?),
		None => {
			if let Some(path) = default_config_path() {
				layer.merge(load_file(&path, false)?);
			}
		}
	}

	layer.merge(load_env()?);
	layer.merge(overrides.to_layer());

	CliConfig::finalize(layer)
}
