// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The seam between resource clients and HTTP.
//!
//! Resource clients describe a call as an [`ApiRequest`] and hand it to a
//! [`Transport`]. [`HttpTransport`] is the real implementation; tests script
//! their own.

use std::collections::HashMap;

use async_trait::async_trait;
use cloudid_common_http::retry;
use cloudid_scim::{merge_extensions, ScimError};
use reqwest::header::{HeaderMap, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde_json::Value;
use tracing::{debug, error, instrument, trace};

use crate::config::ClientConfig;
use crate::error::ClientError;

/// Which media type a family of endpoints speaks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeaderProfile {
	/// `/scim/*` endpoints.
	#[default]
	Scim,
	/// The plain REST endpoints (applications, identity providers).
	Json,
}

impl HeaderProfile {
	pub fn media_type(self) -> &'static str {
		match self {
			HeaderProfile::Scim => "application/scim+json",
			HeaderProfile::Json => "application/json",
		}
	}
}

/// One call against the tenant.
#[derive(Debug, Clone)]
pub struct ApiRequest {
	pub method: Method,
	pub path: String,
	pub query: Vec<(&'static str, String)>,
	pub body: Option<Value>,
	/// Custom-schema string merged into `body` before sending.
	pub extensions: Option<String>,
	pub profile: HeaderProfile,
	/// Response headers to hand back in [`ApiResponse::headers`].
	pub capture: Vec<&'static str>,
}

impl ApiRequest {
	pub fn new(method: Method, path: impl Into<String>) -> Self {
		Self {
			method,
			path: path.into(),
			query: Vec::new(),
			body: None,
			extensions: None,
			profile: HeaderProfile::default(),
			capture: Vec::new(),
		}
	}

	pub fn get(path: impl Into<String>) -> Self {
		Self::new(Method::GET, path)
	}

	pub fn post(path: impl Into<String>) -> Self {
		Self::new(Method::POST, path)
	}

	pub fn put(path: impl Into<String>) -> Self {
		Self::new(Method::PUT, path)
	}

	pub fn delete(path: impl Into<String>) -> Self {
		Self::new(Method::DELETE, path)
	}

	pub fn json(mut self, body: Value) -> Self {
		self.body = Some(body);
		self
	}

	/// Attach a custom-schema string. Blank strings are dropped.
	pub fn extensions(mut self, extensions: Option<&str>) -> Self {
		self.extensions = extensions
			.filter(|e| !e.trim().is_empty())
			.map(str::to_string);
		self
	}

	pub fn profile(mut self, profile: HeaderProfile) -> Self {
		self.profile = profile;
		self
	}

	pub fn capture(mut self, header: &'static str) -> Self {
		self.capture.push(header);
		self
	}

	pub fn query(mut self, key: &'static str, value: impl ToString) -> Self {
		self.query.push((key, value.to_string()));
		self
	}

	/// GET, PUT and DELETE can be repeated safely; POST cannot.
	pub fn is_idempotent(&self) -> bool {
		self.method == Method::GET || self.method == Method::PUT || self.method == Method::DELETE
	}

	/// The body as it goes on the wire, with custom schemas merged in.
	pub fn wire_body(&self) -> Result<Option<Value>, ClientError> {
		match (&self.body, &self.extensions) {
			(Some(body), Some(extensions)) => Ok(Some(merge_extensions(body.clone(), extensions)?)),
			(None, Some(_)) => Err(ClientError::Config(
				"custom schemas need a request body to merge into".to_string(),
			)),
			(body, None) => Ok(body.clone()),
		}
	}
}

/// A successful response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiResponse {
	pub status: u16,
	/// `None` when the tenant sent no body.
	pub body: Option<Value>,
	/// Captured headers, keyed by lowercase name.
	pub headers: HashMap<String, String>,
}

impl ApiResponse {
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers
			.get(&name.to_ascii_lowercase())
			.map(String::as_str)
	}
}

#[async_trait]
pub trait Transport: Send + Sync {
	async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ClientError>;
}

/// [`Transport`] over HTTPS with basic authentication.
#[derive(Debug, Clone)]
pub struct HttpTransport {
	http_client: Client,
	config: ClientConfig,
}

impl HttpTransport {
	pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
		let http_client = cloudid_common_http::builder()
			.timeout(config.timeout())
			.build()
			.map_err(|e| ClientError::Config(format!("failed to build HTTP client: {e}")))?;

		Ok(Self {
			http_client,
			config,
		})
	}

	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	async fn send(&self, request: &ApiRequest, body: Option<&Value>) -> Result<ApiResponse, ClientError> {
		let url = self.config.endpoint(&request.path);
		let media_type = request.profile.media_type();

		debug!(url = %url, "sending request to tenant");

		let mut builder = self
			.http_client
			.request(request.method.clone(), &url)
			.basic_auth(self.config.username(), Some(self.config.password()))
			.header(ACCEPT, media_type);

		if !request.query.is_empty() {
			builder = builder.query(&request.query);
		}

		if let Some(body) = body {
			let bytes = serde_json::to_vec(body).map_err(ScimError::Encode)?;
			trace!(body = %body, "request body");
			builder = builder.header(CONTENT_TYPE, media_type).body(bytes);
		}

		let response = builder.send().await.map_err(|e| {
			if e.is_timeout() {
				error!("request timed out");
				return ClientError::Timeout;
			}
			error!(error = %e, "network error during tenant request");
			ClientError::Network(e)
		})?;

		let status = response.status().as_u16();
		debug!(status, "received response from tenant");

		let headers = capture_headers(response.headers(), &request.capture);
		let text = response.text().await.map_err(|e| {
			error!(error = %e, "failed to read response body");
			ClientError::Network(e)
		})?;

		if !(200..300).contains(&status) {
			let err = error_for_status(status, &request.path, &text);
			error!(status, error = %err, "tenant API error");
			return Err(err);
		}

		trace!(body = %text, "response body");

		let body = if text.trim().is_empty() {
			None
		} else {
			Some(serde_json::from_str(&text).map_err(|e| {
				error!(error = %e, "failed to parse tenant response");
				ClientError::InvalidResponse(format!("JSON parse error: {e}"))
			})?)
		};

		Ok(ApiResponse {
			status,
			body,
			headers,
		})
	}
}

#[async_trait]
impl Transport for HttpTransport {
	#[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
	async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
		let body = request.wire_body()?;

		if request.is_idempotent() {
			retry(&self.config.retry_config, || self.send(&request, body.as_ref())).await
		} else {
			self.send(&request, body.as_ref()).await
		}
	}
}

fn capture_headers(headers: &HeaderMap, names: &[&'static str]) -> HashMap<String, String> {
	names
		.iter()
		.filter_map(|name| {
			headers
				.get(*name)
				.and_then(|value| value.to_str().ok())
				.map(|value| (name.to_ascii_lowercase(), value.to_string()))
		})
		.collect()
}

fn error_for_status(status: u16, path: &str, body: &str) -> ClientError {
	match status {
		401 | 403 => ClientError::Unauthorized,
		404 => ClientError::NotFound(path.to_string()),
		_ => ClientError::Api {
			status,
			message: api_error_message(body),
		},
	}
}

/// The human-readable part of an error body.
///
/// SCIM endpoints put it in `detail`, the REST endpoints in
/// `error.message`; anything else is returned as-is.
pub(crate) fn api_error_message(body: &str) -> String {
	let parsed = match serde_json::from_str::<Value>(body) {
		Ok(value) => value,
		Err(_) => return body.trim().to_string(),
	};

	parsed
		.get("detail")
		.and_then(Value::as_str)
		.or_else(|| parsed.pointer("/error/message").and_then(Value::as_str))
		.map(str::to_string)
		.unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn only_post_is_not_idempotent() {
		assert!(ApiRequest::get("/scim/Users").is_idempotent());
		assert!(ApiRequest::put("/scim/Users/1").is_idempotent());
		assert!(ApiRequest::delete("/scim/Users/1").is_idempotent());
		assert!(!ApiRequest::post("/scim/Users").is_idempotent());
	}

	#[test]
	fn blank_extensions_are_dropped() {
		let request = ApiRequest::post("/scim/Users").extensions(Some("  \n"));
		assert!(request.extensions.is_none());
	}

	#[test]
	fn wire_body_merges_extensions() {
		let request = ApiRequest::post("/scim/Users")
			.json(json!({"userName": "jdoe"}))
			.extensions(Some(r#"{"urn:x:ext":{"a":1}}"#));

		assert_eq!(
			request.wire_body().unwrap(),
			Some(json!({"userName": "jdoe", "urn:x:ext": {"a": 1}}))
		);
	}

	#[test]
	fn wire_body_surfaces_merge_conflicts() {
		let request = ApiRequest::put("/scim/Users/1")
			.json(json!({"userName": "jdoe"}))
			.extensions(Some(r#"{"userName":"other"}"#));

		assert!(matches!(
			request.wire_body(),
			Err(ClientError::Scim(ScimError::ExtensionConflict(_)))
		));
	}

	#[test]
	fn extensions_without_body_are_rejected() {
		let request = ApiRequest::delete("/scim/Users/1").extensions(Some(r#"{"urn:x":{}}"#));
		assert!(matches!(request.wire_body(), Err(ClientError::Config(_))));
	}

	#[test]
	fn response_headers_are_case_insensitive() {
		let response = ApiResponse {
			status: 201,
			body: None,
			headers: HashMap::from([("location".to_string(), "/Applications/v1/abc".to_string())]),
		};
		assert_eq!(response.header("Location"), Some("/Applications/v1/abc"));
		assert_eq!(response.header("ETag"), None);
	}

	#[test]
	fn error_message_prefers_scim_detail() {
		let body = r#"{"schemas":["urn:ietf:params:scim:api:messages:2.0:Error"],"status":"409","detail":"userName already taken"}"#;
		assert_eq!(api_error_message(body), "userName already taken");
	}

	#[test]
	fn error_message_reads_rest_error_object() {
		let body = r#"{"error":{"code":400,"message":"name must not be blank"}}"#;
		assert_eq!(api_error_message(body), "name must not be blank");
	}

	#[test]
	fn error_message_falls_back_to_raw_text() {
		assert_eq!(api_error_message(" Bad Gateway \n"), "Bad Gateway");
		assert_eq!(api_error_message(r#"{"other":1}"#), r#"{"other":1}"#);
	}

	#[test]
	fn statuses_map_to_error_variants() {
		assert!(matches!(error_for_status(401, "/x", ""), ClientError::Unauthorized));
		assert!(matches!(error_for_status(403, "/x", ""), ClientError::Unauthorized));
		assert!(matches!(error_for_status(404, "/x", ""), ClientError::NotFound(p) if p == "/x"));
		assert!(matches!(
			error_for_status(409, "/x", r#"{"detail":"dup"}"#),
			ClientError::Api { status: 409, message } if message == "dup"
		));
	}
}
