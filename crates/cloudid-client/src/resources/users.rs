// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! SCIM users, the only resource that carries custom schemas.

use cloudid_scim::{decode, validate_extensions, Decoded, User};
use tracing::{debug, instrument, warn};

use super::{list_all, resource_path, to_body};
use crate::error::ClientError;
use crate::transport::{ApiRequest, ApiResponse, Transport};

pub const USERS_PATH: &str = "/scim/Users";

pub struct UsersClient<'a> {
	transport: &'a dyn Transport,
}

impl<'a> UsersClient<'a> {
	pub fn new(transport: &'a dyn Transport) -> Self {
		Self { transport }
	}

	/// Create a user, optionally with custom schemas.
	///
	/// When custom schemas are sent, the response must carry them back
	/// unchanged. A mismatch is returned as an error even though the user now
	/// exists on the tenant.
	#[instrument(skip(self, user, extensions), fields(user_name = %user.user_name))]
	pub async fn create(&self, user: &User, extensions: Option<&str>) -> Result<Decoded<User>, ClientError> {
		let request = ApiRequest::post(USERS_PATH)
			.json(to_body(user)?)
			.extensions(extensions);
		let response = self.transport.execute(request).await?;
		finish_write(response, extensions)
	}

	#[instrument(skip(self))]
	pub async fn get(&self, id: &str) -> Result<Decoded<User>, ClientError> {
		let response = self
			.transport
			.execute(ApiRequest::get(resource_path(USERS_PATH, id)?))
			.await?;
		Ok(decode(response.body.as_ref(), true)?)
	}

	/// Replace a user. Custom schemas are validated as for [`Self::create`].
	#[instrument(skip(self, user, extensions))]
	pub async fn update(
		&self,
		id: &str,
		user: &User,
		extensions: Option<&str>,
	) -> Result<Decoded<User>, ClientError> {
		let request = ApiRequest::put(resource_path(USERS_PATH, id)?)
			.json(to_body(user)?)
			.extensions(extensions);
		let response = self.transport.execute(request).await?;
		finish_write(response, extensions)
	}

	#[instrument(skip(self))]
	pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
		self
			.transport
			.execute(ApiRequest::delete(resource_path(USERS_PATH, id)?))
			.await?;
		debug!("user deleted");
		Ok(())
	}

	#[instrument(skip(self))]
	pub async fn list(&self) -> Result<Vec<Decoded<User>>, ClientError> {
		let items = list_all(self.transport, USERS_PATH).await?;
		items
			.iter()
			.map(|item| decode(Some(item), true).map_err(ClientError::from))
			.collect()
	}
}

fn finish_write(response: ApiResponse, extensions: Option<&str>) -> Result<Decoded<User>, ClientError> {
	let decoded = decode::<User>(response.body.as_ref(), true)?;

	if let (Some(sent), Some(raw)) = (
		extensions.filter(|e| !e.trim().is_empty()),
		response.body.as_ref(),
	) {
		if let Err(e) = validate_extensions(raw, sent) {
			warn!(error = %e, user_id = ?decoded.record.id, "tenant did not keep the custom schemas");
			return Err(e.into());
		}
	}

	Ok(decoded)
}
