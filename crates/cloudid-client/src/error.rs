// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the tenant clients.

use cloudid_common_http::RetryableError;
use cloudid_scim::ScimError;
use thiserror::Error;

/// Errors returned by the transport and the resource clients.
#[derive(Debug, Error)]
pub enum ClientError {
	/// Network-level error during HTTP communication.
	#[error("network error: {0}")]
	Network(#[from] reqwest::Error),

	#[error("request timed out")]
	Timeout,

	/// The tenant rejected the credentials (401 or 403).
	#[error("tenant rejected the configured credentials")]
	Unauthorized,

	#[error("resource not found: {0}")]
	NotFound(String),

	/// The tenant answered with a non-success status.
	#[error("tenant API error: {status} - {message}")]
	Api { status: u16, message: String },

	#[error("invalid response from tenant: {0}")]
	InvalidResponse(String),

	#[error("configuration error: {0}")]
	Config(String),

	/// A header the operation depends on was absent from the response.
	#[error("response is missing the {0} header")]
	MissingHeader(&'static str),

	/// Decoding, extension merge or custom-schema validation failed.
	#[error(transparent)]
	Scim(#[from] ScimError),
}

impl RetryableError for ClientError {
	fn is_retryable(&self) -> bool {
		match self {
			ClientError::Network(e) => e.is_retryable(),
			ClientError::Timeout => true,
			ClientError::Api { status, .. } => *status == 429 || *status >= 500,
			ClientError::Unauthorized
			| ClientError::NotFound(_)
			| ClientError::InvalidResponse(_)
			| ClientError::Config(_)
			| ClientError::MissingHeader(_)
			| ClientError::Scim(_) => false,
		}
	}
}
