// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Domain records exchanged with the identity service.

mod application;
mod group;
mod identity_provider;
mod schema;
mod user;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use application::{
	AdvancedAssertionAttribute, Application, ApplicationList, AssertionAttribute,
	AuthenticationRule, AuthenticationSchema, SsoType, SubjectNameIdentifier,
};
pub use group::{Group, GroupExtension, GroupMember};
pub use identity_provider::{
	IdentityFederation, IdentityProvider, IdentityProviderList, LoginHintConfiguration,
	OidcConfiguration, Saml2Configuration, SamlEndpoint, SigningCertificate,
};
pub use schema::{Schema, SchemaAttribute};
pub use user::{Email, Name, PhoneNumber, SapUserExtension, User};

#[cfg(test)]
pub(crate) use user::full_user;

pub const SCHEMA_CORE_USER: &str = "urn:ietf:params:scim:schemas:core:2.0:User";
pub const SCHEMA_SAP_USER: &str = "urn:ietf:params:scim:schemas:extension:sap:2.0:User";
pub const SCHEMA_CORE_GROUP: &str = "urn:ietf:params:scim:schemas:core:2.0:Group";
pub const SCHEMA_SAP_GROUP: &str = "urn:sap:cloud:scim:schemas:extension:custom:2.0:Group";
pub const SCHEMA_CORE_SCHEMA: &str = "urn:ietf:params:scim:schemas:core:2.0:Schema";
pub const SCHEMA_LIST_RESPONSE: &str = "urn:ietf:params:scim:api:messages:2.0:ListResponse";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub resource_type: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub created: Option<DateTime<Utc>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub last_modified: Option<DateTime<Utc>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub location: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub version: Option<String>,
}

/// SCIM list envelope. Items stay raw so each one can be decoded, and for
/// users split into record and custom schemas, on its own.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse {
	#[serde(default)]
	pub schemas: Vec<String>,
	#[serde(default)]
	pub total_results: u64,
	#[serde(default)]
	pub items_per_page: Option<u64>,
	#[serde(default)]
	pub start_index: Option<u64>,
	#[serde(rename = "Resources", default)]
	pub resources: Vec<Value>,
}

/// Write-only string such as an initial password or an OIDC client secret.
///
/// Serializes as-is because it has to reach the tenant; only `Debug` is
/// redacted.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SensitiveString(String);

impl SensitiveString {
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	pub fn expose(&self) -> &str {
		&self.0
	}
}

impl fmt::Debug for SensitiveString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("SensitiveString([REDACTED])")
	}
}
