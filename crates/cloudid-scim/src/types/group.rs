// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};

use super::{Meta, SCHEMA_CORE_GROUP, SCHEMA_SAP_GROUP};
use crate::fields::WireFields;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMember {
	pub value: String,
	#[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
	pub member_type: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub display: Option<String>,
	#[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
	pub reference: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupExtension {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub schemas: Vec<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub external_id: Option<String>,
	pub display_name: String,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub members: Vec<GroupMember>,
	#[serde(
		rename = "urn:sap:cloud:scim:schemas:extension:custom:2.0:Group",
		default,
		skip_serializing_if = "Option::is_none"
	)]
	pub group_extension: Option<GroupExtension>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub meta: Option<Meta>,
}

impl Group {
	pub fn new(display_name: impl Into<String>) -> Self {
		Self {
			schemas: vec![SCHEMA_CORE_GROUP.to_string()],
			display_name: display_name.into(),
			..Default::default()
		}
	}
}

impl WireFields for Group {
	const WIRE_FIELDS: &'static [&'static str] = &[
		"id",
		"schemas",
		"externalId",
		"displayName",
		"members",
		SCHEMA_SAP_GROUP,
		"meta",
	];
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::fields::{declared_keys, serialized_keys};

	#[test]
	fn wire_fields_match_serde_keys() {
		let group = Group {
			id: Some("g-1".to_string()),
			schemas: vec![SCHEMA_CORE_GROUP.to_string(), SCHEMA_SAP_GROUP.to_string()],
			external_id: Some("ext".to_string()),
			display_name: "Admins".to_string(),
			members: vec![GroupMember {
				value: "u-1".to_string(),
				member_type: Some("User".to_string()),
				..Default::default()
			}],
			group_extension: Some(GroupExtension {
				name: Some("admins".to_string()),
				description: Some("Tenant administrators".to_string()),
			}),
			meta: Some(Meta::default()),
		};

		assert_eq!(serialized_keys(&group), declared_keys::<Group>());
	}

	#[test]
	fn member_reference_uses_dollar_ref() {
		let member: GroupMember = serde_json::from_str(
			r#"{"value":"u-1","$ref":"https://tenant.example.com/scim/Users/u-1","type":"User"}"#,
		)
		.unwrap();

		assert_eq!(
			member.reference.as_deref(),
			Some("https://tenant.example.com/scim/Users/u-1")
		);
		assert_eq!(member.member_type.as_deref(), Some("User"));
	}
}
