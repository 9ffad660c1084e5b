// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! One client per resource family.

mod applications;
mod groups;
mod identity_providers;
mod schemas;
mod users;

pub use applications::ApplicationsClient;
pub use groups::GroupsClient;
pub use identity_providers::IdentityProvidersClient;
pub use schemas::SchemasClient;
pub use users::UsersClient;

use cloudid_scim::{ListResponse, ScimError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::ClientError;
use crate::transport::{ApiRequest, ApiResponse, Transport};

/// Items requested per SCIM list page.
pub const PAGE_SIZE: u64 = 100;

pub(crate) const LOCATION: &str = "Location";

pub(crate) fn to_body<T: Serialize>(record: &T) -> Result<Value, ClientError> {
	Ok(serde_json::to_value(record).map_err(ScimError::Encode)?)
}

/// `base/{id}` with the id percent-encoded.
pub(crate) fn resource_path(base: &str, id: &str) -> Result<String, ClientError> {
	if id.trim().is_empty() {
		return Err(ClientError::Config("resource id must not be empty".to_string()));
	}
	Ok(format!("{base}/{}", urlencoding::encode(id)))
}

/// Decode a list envelope or other body that is not a Domain Record.
pub(crate) fn decode_envelope<T: DeserializeOwned>(body: Option<Value>) -> Result<T, ClientError> {
	let body = match body {
		None | Some(Value::Null) => return Err(ScimError::NilResponse.into()),
		Some(body) => body,
	};
	Ok(serde_json::from_value(body).map_err(ScimError::Decode)?)
}

/// The id of a created resource, taken from the last segment of `Location`.
pub(crate) fn location_id(response: &ApiResponse) -> Result<String, ClientError> {
	let location = response
		.header(LOCATION)
		.ok_or(ClientError::MissingHeader(LOCATION))?;

	location
		.trim_end_matches('/')
		.rsplit('/')
		.next()
		.filter(|segment| !segment.is_empty())
		.map(str::to_string)
		.ok_or_else(|| ClientError::InvalidResponse(format!("no resource id in Location '{location}'")))
}

/// Fetch every item of a SCIM collection, [`PAGE_SIZE`] at a time.
pub(crate) async fn list_all(transport: &dyn Transport, base: &str) -> Result<Vec<Value>, ClientError> {
	let mut items = Vec::new();
	let mut start_index = 1u64;

	loop {
		let request = ApiRequest::get(base)
			.query("startIndex", start_index)
			.query("count", PAGE_SIZE);
		let response = transport.execute(request).await?;
		let page: ListResponse = decode_envelope(response.body)?;

		let received = page.resources.len() as u64;
		debug!(
			start_index,
			received,
			total_results = page.total_results,
			"fetched list page"
		);

		items.extend(page.resources);
		if received == 0 || items.len() as u64 >= page.total_results {
			break;
		}
		start_index += received;
	}

	Ok(items)
}
