// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Custom schema definitions. The tenant does not support replacing them.

use cloudid_scim::{decode_record, Schema};
use tracing::{debug, instrument};

use super::{list_all, resource_path, to_body};
use crate::error::ClientError;
use crate::transport::{ApiRequest, Transport};

pub const SCHEMAS_PATH: &str = "/scim/Schemas";

pub struct SchemasClient<'a> {
	transport: &'a dyn Transport,
}

impl<'a> SchemasClient<'a> {
	pub fn new(transport: &'a dyn Transport) -> Self {
		Self { transport }
	}

	#[instrument(skip(self, schema), fields(schema_id = %schema.id))]
	pub async fn create(&self, schema: &Schema) -> Result<Schema, ClientError> {
		let request = ApiRequest::post(SCHEMAS_PATH).json(to_body(schema)?);
		let response = self.transport.execute(request).await?;
		Ok(decode_record(response.body.as_ref())?)
	}

	#[instrument(skip(self))]
	pub async fn get(&self, id: &str) -> Result<Schema, ClientError> {
		let response = self
			.transport
			.execute(ApiRequest::get(resource_path(SCHEMAS_PATH, id)?))
			.await?;
		Ok(decode_record(response.body.as_ref())?)
	}

	#[instrument(skip(self))]
	pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
		self
			.transport
			.execute(ApiRequest::delete(resource_path(SCHEMAS_PATH, id)?))
			.await?;
		debug!("schema deleted");
		Ok(())
	}

	#[instrument(skip(self))]
	pub async fn list(&self) -> Result<Vec<Schema>, ClientError> {
		let items = list_all(self.transport, SCHEMAS_PATH).await?;
		items
			.iter()
			.map(|item| decode_record(Some(item)).map_err(ClientError::from))
			.collect()
	}
}
