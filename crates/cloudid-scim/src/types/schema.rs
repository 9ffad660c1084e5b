// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};

use super::{Meta, SCHEMA_CORE_SCHEMA};
use crate::fields::WireFields;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaAttribute {
	pub name: String,
	#[serde(rename = "type")]
	pub attr_type: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub multi_valued: Option<bool>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub required: Option<bool>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub canonical_values: Vec<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub case_exact: Option<bool>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub mutability: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub returned: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub uniqueness: Option<String>,
}

/// A custom schema definition registered on the tenant.
///
/// The `id` is the schema identifier users later put at the top level of
/// their custom-schema JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
	pub id: String,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub schemas: Vec<String>,
	pub name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(default)]
	pub attributes: Vec<SchemaAttribute>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub meta: Option<Meta>,
}

impl Schema {
	pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			schemas: vec![SCHEMA_CORE_SCHEMA.to_string()],
			name: name.into(),
			..Default::default()
		}
	}
}

impl WireFields for Schema {
	const WIRE_FIELDS: &'static [&'static str] =
		&["id", "schemas", "name", "description", "attributes", "meta"];
}
