// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};

use super::{Meta, SensitiveString, SCHEMA_CORE_USER, SCHEMA_SAP_USER};
use crate::fields::WireFields;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Name {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub formatted: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub family_name: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub given_name: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub middle_name: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub honorific_prefix: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub honorific_suffix: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Email {
	pub value: String,
	#[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
	pub email_type: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub display: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub primary: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneNumber {
	pub value: String,
	#[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
	pub phone_type: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub primary: Option<bool>,
}

/// Attributes under the tenant's built-in user extension.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SapUserExtension {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub user_id: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub send_mail: Option<bool>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub mail_verified: Option<bool>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub schemas: Vec<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub external_id: Option<String>,
	pub user_name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<Name>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub display_name: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub nick_name: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub user_type: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub preferred_language: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub locale: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub timezone: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub active: Option<bool>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub emails: Vec<Email>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub phone_numbers: Vec<PhoneNumber>,
	/// Initial password. Write-only; the tenant never returns it.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub password: Option<SensitiveString>,
	#[serde(
		rename = "urn:ietf:params:scim:schemas:extension:sap:2.0:User",
		default,
		skip_serializing_if = "Option::is_none"
	)]
	pub sap_extension: Option<SapUserExtension>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub meta: Option<Meta>,
}

impl User {
	/// A user carrying the core schema URN and the given login name.
	pub fn new(user_name: impl Into<String>) -> Self {
		Self {
			schemas: vec![SCHEMA_CORE_USER.to_string()],
			user_name: user_name.into(),
			..Default::default()
		}
	}
}

impl WireFields for User {
	const WIRE_FIELDS: &'static [&'static str] = &[
		"id",
		"schemas",
		"externalId",
		"userName",
		"name",
		"displayName",
		"nickName",
		"title",
		"userType",
		"preferredLanguage",
		"locale",
		"timezone",
		"active",
		"emails",
		"phoneNumbers",
		"password",
		SCHEMA_SAP_USER,
		"meta",
	];
}

#[cfg(test)]
pub(crate) fn full_user() -> User {
	User {
		id: Some("5a4b9c2e-0000-4f00-8000-000000000001".to_string()),
		schemas: vec![SCHEMA_CORE_USER.to_string(), SCHEMA_SAP_USER.to_string()],
		external_id: Some("ext-1".to_string()),
		user_name: "jdoe".to_string(),
		name: Some(Name {
			family_name: Some("Doe".to_string()),
			given_name: Some("Jane".to_string()),
			..Default::default()
		}),
		display_name: Some("Jane Doe".to_string()),
		nick_name: Some("jd".to_string()),
		title: Some("Engineer".to_string()),
		user_type: Some("employee".to_string()),
		preferred_language: Some("en".to_string()),
		locale: Some("en_US".to_string()),
		timezone: Some("Europe/Berlin".to_string()),
		active: Some(true),
		emails: vec![Email {
			value: "jane.doe@example.com".to_string(),
			email_type: Some("work".to_string()),
			display: None,
			primary: Some(true),
		}],
		phone_numbers: vec![PhoneNumber {
			value: "+49 30 1234".to_string(),
			phone_type: Some("work".to_string()),
			primary: None,
		}],
		password: Some(SensitiveString::new("Initial#Pass1")),
		sap_extension: Some(SapUserExtension {
			send_mail: Some(false),
			mail_verified: Some(true),
			status: Some("active".to_string()),
			..Default::default()
		}),
		meta: Some(Meta {
			resource_type: Some("User".to_string()),
			..Default::default()
		}),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::fields::{declared_keys, serialized_keys};

	#[test]
	fn wire_fields_match_serde_keys() {
		assert_eq!(serialized_keys(&full_user()), declared_keys::<User>());
	}

	#[test]
	fn new_user_has_core_schema() {
		let user = User::new("jdoe");
		assert_eq!(user.schemas, vec![SCHEMA_CORE_USER.to_string()]);
		assert_eq!(user.user_name, "jdoe");
	}

	#[test]
	fn debug_hides_password() {
		let debug = format!("{:?}", full_user());
		assert!(!debug.contains("Initial#Pass1"));
	}
}
