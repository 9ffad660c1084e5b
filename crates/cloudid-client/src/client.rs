// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::resources::{
	ApplicationsClient, GroupsClient, IdentityProvidersClient, SchemasClient, UsersClient,
};
use crate::transport::{HttpTransport, Transport};

/// Entry point handing out the per-resource clients over one transport.
#[derive(Clone)]
pub struct CloudIdClient {
	transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for CloudIdClient {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("CloudIdClient").finish_non_exhaustive()
	}
}

impl CloudIdClient {
	pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
		Ok(Self::with_transport(Arc::new(HttpTransport::new(config)?)))
	}

	pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
		Self { transport }
	}

	pub fn users(&self) -> UsersClient<'_> {
		UsersClient::new(self.transport.as_ref())
	}

	pub fn groups(&self) -> GroupsClient<'_> {
		GroupsClient::new(self.transport.as_ref())
	}

	pub fn schemas(&self) -> SchemasClient<'_> {
		SchemasClient::new(self.transport.as_ref())
	}

	pub fn applications(&self) -> ApplicationsClient<'_> {
		ApplicationsClient::new(self.transport.as_ref())
	}

	pub fn identity_providers(&self) -> IdentityProvidersClient<'_> {
		IdentityProvidersClient::new(self.transport.as_ref())
	}
}
