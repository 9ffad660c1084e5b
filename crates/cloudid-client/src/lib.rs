// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Clients for the identity service tenant APIs.
//!
//! Users, groups and schemas live under `/scim`; applications and corporate
//! identity providers under their own versioned REST paths. All calls go
//! through a [`Transport`], so resource logic can be tested without HTTP.

mod client;
pub mod config;
pub mod error;
pub mod resources;
pub mod transport;

pub use client::CloudIdClient;
pub use config::ClientConfig;
pub use error::ClientError;
pub use resources::{
	ApplicationsClient, GroupsClient, IdentityProvidersClient, SchemasClient, UsersClient, PAGE_SIZE,
};
pub use transport::{ApiRequest, ApiResponse, HeaderProfile, HttpTransport, Transport};
