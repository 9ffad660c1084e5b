// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use cloudid_scim::{decode_record, IdentityProvider, IdentityProviderList};
use tracing::{debug, instrument};

use super::{decode_envelope, location_id, resource_path, to_body, LOCATION};
use crate::error::ClientError;
use crate::transport::{ApiRequest, HeaderProfile, Transport};

pub const IDENTITY_PROVIDERS_PATH: &str = "/IdentityProviders/v1";

/// Corporate identity providers. Same write-then-read flow as applications.
pub struct IdentityProvidersClient<'a> {
	transport: &'a dyn Transport,
}

impl<'a> IdentityProvidersClient<'a> {
	pub fn new(transport: &'a dyn Transport) -> Self {
		Self { transport }
	}

	#[instrument(skip(self, idp), fields(display_name = %idp.display_name))]
	pub async fn create(&self, idp: &IdentityProvider) -> Result<IdentityProvider, ClientError> {
		let request = ApiRequest::post(IDENTITY_PROVIDERS_PATH)
			.profile(HeaderProfile::Json)
			.json(to_body(idp)?)
			.capture(LOCATION);
		let response = self.transport.execute(request).await?;

		let id = location_id(&response)?;
		debug!(id = %id, "identity provider created");
		self.get(&id).await
	}

	#[instrument(skip(self))]
	pub async fn get(&self, id: &str) -> Result<IdentityProvider, ClientError> {
		let request = ApiRequest::get(resource_path(IDENTITY_PROVIDERS_PATH, id)?)
			.profile(HeaderProfile::Json);
		let response = self.transport.execute(request).await?;
		Ok(decode_record(response.body.as_ref())?)
	}

	#[instrument(skip(self, idp))]
	pub async fn update(&self, id: &str, idp: &IdentityProvider) -> Result<IdentityProvider, ClientError> {
		let request = ApiRequest::put(resource_path(IDENTITY_PROVIDERS_PATH, id)?)
			.profile(HeaderProfile::Json)
			.json(to_body(idp)?);
		self.transport.execute(request).await?;
		self.get(id).await
	}

	#[instrument(skip(self))]
	pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
		let request = ApiRequest::delete(resource_path(IDENTITY_PROVIDERS_PATH, id)?)
			.profile(HeaderProfile::Json);
		self.transport.execute(request).await?;
		debug!("identity provider deleted");
		Ok(())
	}

	#[instrument(skip(self))]
	pub async fn list(&self) -> Result<Vec<IdentityProvider>, ClientError> {
		let request = ApiRequest::get(IDENTITY_PROVIDERS_PATH).profile(HeaderProfile::Json);
		let response = self.transport.execute(request).await?;
		let list: IdentityProviderList = decode_envelope(response.body)?;

		list
			.identity_providers
			.iter()
			.map(|item| decode_record(Some(item)).map_err(ClientError::from))
			.collect()
	}
}
