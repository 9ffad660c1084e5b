// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Applications on the plain REST API.
//!
//! Writes answer without a body, so every write is followed by a read.

use cloudid_scim::{decode_record, Application, ApplicationList};
use tracing::{debug, instrument};

use super::{decode_envelope, location_id, resource_path, to_body, LOCATION};
use crate::error::ClientError;
use crate::transport::{ApiRequest, HeaderProfile, Transport};

pub const APPLICATIONS_PATH: &str = "/Applications/v1";

pub struct ApplicationsClient<'a> {
	transport: &'a dyn Transport,
}

impl<'a> ApplicationsClient<'a> {
	pub fn new(transport: &'a dyn Transport) -> Self {
		Self { transport }
	}

	#[instrument(skip(self, application), fields(name = %application.name))]
	pub async fn create(&self, application: &Application) -> Result<Application, ClientError> {
		let request = ApiRequest::post(APPLICATIONS_PATH)
			.profile(HeaderProfile::Json)
			.json(to_body(application)?)
			.capture(LOCATION);
		let response = self.transport.execute(request).await?;

		let id = location_id(&response)?;
		debug!(id = %id, "application created");
		self.get(&id).await
	}

	#[instrument(skip(self))]
	pub async fn get(&self, id: &str) -> Result<Application, ClientError> {
		let request =
			ApiRequest::get(resource_path(APPLICATIONS_PATH, id)?).profile(HeaderProfile::Json);
		let response = self.transport.execute(request).await?;
		Ok(decode_record(response.body.as_ref())?)
	}

	#[instrument(skip(self, application))]
	pub async fn update(&self, id: &str, application: &Application) -> Result<Application, ClientError> {
		let request = ApiRequest::put(resource_path(APPLICATIONS_PATH, id)?)
			.profile(HeaderProfile::Json)
			.json(to_body(application)?);
		self.transport.execute(request).await?;
		self.get(id).await
	}

	#[instrument(skip(self))]
	pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
		let request =
			ApiRequest::delete(resource_path(APPLICATIONS_PATH, id)?).profile(HeaderProfile::Json);
		self.transport.execute(request).await?;
		debug!("application deleted");
		Ok(())
	}

	#[instrument(skip(self))]
	pub async fn list(&self) -> Result<Vec<Application>, ClientError> {
		let request = ApiRequest::get(APPLICATIONS_PATH).profile(HeaderProfile::Json);
		let response = self.transport.execute(request).await?;
		let list: ApplicationList = decode_envelope(response.body)?;

		list
			.applications
			.iter()
			.map(|item| decode_record(Some(item)).map_err(ClientError::from))
			.collect()
	}
}
