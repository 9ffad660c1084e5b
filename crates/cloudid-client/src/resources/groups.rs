// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use cloudid_scim::{decode_record, Group};
use tracing::{debug, instrument};

use super::{list_all, resource_path, to_body};
use crate::error::ClientError;
use crate::transport::{ApiRequest, Transport};

pub const GROUPS_PATH: &str = "/scim/Groups";

pub struct GroupsClient<'a> {
	transport: &'a dyn Transport,
}

impl<'a> GroupsClient<'a> {
	pub fn new(transport: &'a dyn Transport) -> Self {
		Self { transport }
	}

	#[instrument(skip(self, group), fields(display_name = %group.display_name))]
	pub async fn create(&self, group: &Group) -> Result<Group, ClientError> {
		let request = ApiRequest::post(GROUPS_PATH).json(to_body(group)?);
		let response = self.transport.execute(request).await?;
		Ok(decode_record(response.body.as_ref())?)
	}

	#[instrument(skip(self))]
	pub async fn get(&self, id: &str) -> Result<Group, ClientError> {
		let response = self
			.transport
			.execute(ApiRequest::get(resource_path(GROUPS_PATH, id)?))
			.await?;
		Ok(decode_record(response.body.as_ref())?)
	}

	#[instrument(skip(self, group))]
	pub async fn update(&self, id: &str, group: &Group) -> Result<Group, ClientError> {
		let request = ApiRequest::put(resource_path(GROUPS_PATH, id)?).json(to_body(group)?);
		let response = self.transport.execute(request).await?;
		Ok(decode_record(response.body.as_ref())?)
	}

	#[instrument(skip(self))]
	pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
		self
			.transport
			.execute(ApiRequest::delete(resource_path(GROUPS_PATH, id)?))
			.await?;
		debug!("group deleted");
		Ok(())
	}

	#[instrument(skip(self))]
	pub async fn list(&self) -> Result<Vec<Group>, ClientError> {
		let items = list_all(self.transport, GROUPS_PATH).await?;
		items
			.iter()
			.map(|item| decode_record(Some(item)).map_err(ClientError::from))
			.collect()
	}
}
