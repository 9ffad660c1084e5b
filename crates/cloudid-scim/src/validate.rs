// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Checking that the tenant kept the custom schemas a request sent.
//!
//! The tenant may reformat values (key order, `1` vs `1.0`) and add
//! attributes of its own, so the check is one-directional: everything that
//! was sent must come back equal, anything extra in the response is fine.

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{kind_of, AttributePath, ScimError};
use crate::extension::parse_extensions;

/// Levels of objects allowed below a schema's attribute map.
pub const MAX_NESTING: usize = 1;

/// Confirm every attribute of `extension_request` is present and equal in
/// `response`.
///
/// When the request text (without its outer braces) occurs verbatim in the
/// serialized response, it is accepted without parsing.
pub fn validate_extensions(response: &Value, extension_request: &str) -> Result<(), ScimError> {
	let response_text = serde_json::to_string(response).map_err(ScimError::Encode)?;

	let trimmed = extension_request.trim();
	let inner = trimmed
		.strip_prefix('{')
		.and_then(|rest| rest.strip_suffix('}'))
		.unwrap_or(trimmed);
	if response_text.contains(inner) {
		debug!("custom schemas echoed verbatim");
		return Ok(());
	}

	for (schema_id, expected) in parse_extensions(extension_request)? {
		let expected = match expected {
			Value::Object(expected) => expected,
			other => {
				return Err(ScimError::InvalidExtension(format!(
					"schema {schema_id} must map to an object, got {}",
					kind_of(&other)
				)))
			}
		};

		let actual = response
			.get(&schema_id)
			.ok_or_else(|| ScimError::SchemaNotFound(schema_id.clone()))?;

		let path = AttributePath::root(schema_id);
		match actual {
			Value::Object(actual) => compare_attributes(&path, &expected, actual)?,
			other => {
				return Err(ScimError::Mismatch {
					path,
					expected: Value::Object(expected),
					actual: other.clone(),
				})
			}
		}
	}

	debug!("custom schemas matched attribute by attribute");
	Ok(())
}

/// Compare the attributes sent under `path` with those received.
///
/// Stops at the first missing or differing attribute.
pub fn compare_attributes(
	path: &AttributePath,
	expected: &Map<String, Value>,
	actual: &Map<String, Value>,
) -> Result<(), ScimError> {
	for (key, expected_value) in expected {
		let attr_path = path.child(key.as_str());
		let actual_value = actual
			.get(key)
			.ok_or_else(|| ScimError::AttributeMissing {
				path: attr_path.clone(),
			})?;
		compare_values(&attr_path, expected_value, actual_value)?;
	}
	Ok(())
}

/// Arrays of equal length are compared element by element under an index
/// segment (`urn:x:ext.tags.0`), so an object inside an array counts as a
/// nested level.
fn compare_values(path: &AttributePath, expected: &Value, actual: &Value) -> Result<(), ScimError> {
	let equal = match (expected, actual) {
		(Value::String(e), Value::String(a)) => e == a,
		(Value::Number(e), Value::Number(a)) => e.as_f64() == a.as_f64(),
		(Value::Bool(e), Value::Bool(a)) => e == a,
		(Value::Null, Value::Null) => true,
		(Value::Array(e), Value::Array(a)) if e.len() == a.len() => {
			for (index, (e, a)) in e.iter().zip(a).enumerate() {
				compare_values(&path.child(index.to_string()), e, a)?;
			}
			return Ok(());
		}
		(Value::Object(e), Value::Object(a)) => {
			if path.depth() > MAX_NESTING {
				return Err(ScimError::NestingTooDeep { path: path.clone() });
			}
			return compare_attributes(path, e, a);
		}
		_ => false,
	};

	if equal {
		Ok(())
	} else {
		Err(ScimError::Mismatch {
			path: path.clone(),
			expected: expected.clone(),
			actual: actual.clone(),
		})
	}
}
