// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::fmt;

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScimError {
	#[error("response is nil")]
	NilResponse,
	#[error("failed to decode response: {0}")]
	Decode(#[source] serde_json::Error),
	#[error("failed to serialize custom schemas: {0}")]
	Strip(#[source] serde_json::Error),
	#[error("expected a JSON object, got {0}")]
	NotAnObject(&'static str),
	#[error("invalid custom schemas: {0}")]
	InvalidExtension(String),
	#[error("failed to serialize response: {0}")]
	Encode(#[source] serde_json::Error),
	#[error("custom schema {0} not found in response")]
	SchemaNotFound(String),
	#[error("attribute {path} not found in response")]
	AttributeMissing { path: AttributePath },
	#[error(
		"mismatch between response and request in attribute {path}, request sent: {} but response received: {}",
		DisplayValue(.expected),
		DisplayValue(.actual)
	)]
	Mismatch {
		path: AttributePath,
		expected: Value,
		actual: Value,
	},
	#[error("attribute {path} is nested deeper than custom schemas allow")]
	NestingTooDeep { path: AttributePath },
	#[error("custom schema key {0} collides with a key already in the request body")]
	ExtensionConflict(String),
}

/// Dotted location of an attribute inside a custom schema, starting with the
/// schema identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributePath(Vec<String>);

impl AttributePath {
	pub fn root(segment: impl Into<String>) -> Self {
		Self(vec![segment.into()])
	}

	pub fn child(&self, segment: impl Into<String>) -> Self {
		let mut segments = self.0.clone();
		segments.push(segment.into());
		Self(segments)
	}

	pub fn segments(&self) -> &[String] {
		&self.0
	}

	/// Number of levels below the schema identifier.
	pub fn depth(&self) -> usize {
		self.0.len().saturating_sub(1)
	}
}

impl fmt::Display for AttributePath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0.join("."))
	}
}

/// Renders a value the way mismatch messages quote it: strings in double
/// quotes, booleans bare, numbers with two decimals, anything else as
/// compact JSON.
pub struct DisplayValue<'a>(pub &'a Value);

impl fmt::Display for DisplayValue<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.0 {
			Value::String(s) => write!(f, "\"{s}\""),
			Value::Bool(b) => write!(f, "{b}"),
			Value::Number(n) => match n.as_f64() {
				Some(v) => write!(f, "{v:.2}"),
				None => write!(f, "{n}"),
			},
			other => write!(f, "{other}"),
		}
	}
}

pub(crate) fn kind_of(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "boolean",
		Value::Number(_) => "number",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn path_joins_segments_with_dots() {
		let path = AttributePath::root("urn:x:ext").child("address").child("city");
		assert_eq!(path.to_string(), "urn:x:ext.address.city");
		assert_eq!(path.depth(), 2);
	}

	#[test]
	fn values_render_by_kind() {
		assert_eq!(DisplayValue(&json!("test")).to_string(), "\"test\"");
		assert_eq!(DisplayValue(&json!(false)).to_string(), "false");
		assert_eq!(DisplayValue(&json!(1)).to_string(), "1.00");
		assert_eq!(DisplayValue(&json!(2.5)).to_string(), "2.50");
		assert_eq!(DisplayValue(&json!(null)).to_string(), "null");
		assert_eq!(DisplayValue(&json!([1, "a"])).to_string(), "[1,\"a\"]");
	}

	#[test]
	fn mismatch_message_wording() {
		let err = ScimError::Mismatch {
			path: AttributePath::root("schema_id").child("attr"),
			expected: json!("test"),
			actual: json!("new_test"),
		};
		assert_eq!(
			err.to_string(),
			"mismatch between response and request in attribute schema_id.attr, request sent: \"test\" but response received: \"new_test\""
		);
	}
}
