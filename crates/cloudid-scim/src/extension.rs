// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Separating custom schemas from records, and putting them back.
//!
//! A custom-schema string is a JSON object whose top-level keys are schema
//! identifiers:
//!
//! ```json
//! {"urn:acme:ext:badge": {"number": "42", "active": true}}
//! ```
//!
//! On the way out it is merged into the record's request body; on the way
//! back everything the record type does not declare is split off again.

use serde_json::{Map, Value};

use crate::error::{kind_of, ScimError};
use crate::fields::WireFields;

/// Copy of `raw` without the top-level keys `T` declares.
///
/// Only top-level keys are considered. The input is never modified.
pub fn strip_declared_fields<T: WireFields>(raw: &Map<String, Value>) -> Map<String, Value> {
	raw
		.iter()
		.filter(|(key, _)| !T::declares(key))
		.map(|(key, value)| (key.clone(), value.clone()))
		.collect()
}

/// Serialize whatever `raw` carries beyond `T`'s declared fields.
///
/// Returns an empty string when nothing is left over.
pub fn extract_extensions<T: WireFields>(raw: &Value) -> Result<String, ScimError> {
	let object = raw
		.as_object()
		.ok_or_else(|| ScimError::NotAnObject(kind_of(raw)))?;

	let remainder = strip_declared_fields::<T>(object);
	if remainder.is_empty() {
		return Ok(String::new());
	}

	serde_json::to_string(&remainder).map_err(ScimError::Strip)
}

/// Parse a custom-schema string into its top-level object.
///
/// Blank input yields an empty map.
pub fn parse_extensions(extensions: &str) -> Result<Map<String, Value>, ScimError> {
	if extensions.trim().is_empty() {
		return Ok(Map::new());
	}

	match serde_json::from_str::<Value>(extensions) {
		Ok(Value::Object(map)) => Ok(map),
		Ok(other) => Err(ScimError::InvalidExtension(format!(
			"expected a JSON object, got {}",
			kind_of(&other)
		))),
		Err(e) => Err(ScimError::InvalidExtension(e.to_string())),
	}
}

/// Merge a custom-schema string into an outgoing request body.
///
/// Both sides must be JSON objects. A schema identifier that is already a
/// key of `body` is rejected rather than overwritten.
pub fn merge_extensions(body: Value, extensions: &str) -> Result<Value, ScimError> {
	let additions = parse_extensions(extensions)?;
	if additions.is_empty() {
		return Ok(body);
	}

	let mut object = match body {
		Value::Object(object) => object,
		other => return Err(ScimError::NotAnObject(kind_of(&other))),
	};

	for (key, value) in additions {
		if object.contains_key(&key) {
			return Err(ScimError::ExtensionConflict(key));
		}
		object.insert(key, value);
	}

	Ok(Value::Object(object))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::types::{full_user, Group, User, SCHEMA_SAP_USER};
	use proptest::prelude::*;
	use serde_json::json;

	#[test]
	fn strips_exactly_the_declared_keys() {
		let raw = json!({
			"id": "u-1",
			"userName": "jdoe",
			"emails": [{"value": "a@example.com"}],
			SCHEMA_SAP_USER: {"sendMail": true},
			"urn:x:ext": {"a": 1},
			"UserName": "case matters"
		});

		let remainder = strip_declared_fields::<User>(raw.as_object().unwrap());
		let keys: Vec<&str> = remainder.keys().map(String::as_str).collect();
		assert_eq!(keys, vec!["UserName", "urn:x:ext"]);
	}

	#[test]
	fn nested_keys_named_like_declared_fields_survive() {
		let raw = json!({"userName": "jdoe", "urn:x:ext": {"userName": "nested", "id": 7}});

		let extensions = extract_extensions::<User>(&raw).unwrap();
		let parsed: Value = serde_json::from_str(&extensions).unwrap();
		assert_eq!(parsed, json!({"urn:x:ext": {"userName": "nested", "id": 7}}));
	}

	#[test]
	fn no_remainder_is_empty_string() {
		let raw = serde_json::to_value(full_user()).unwrap();
		assert_eq!(extract_extensions::<User>(&raw).unwrap(), "");
	}

	#[test]
	fn input_is_not_modified() {
		let raw = json!({"displayName": "Admins", "urn:x:ext": {"a": 1}});
		let before = raw.clone();

		let _ = extract_extensions::<Group>(&raw).unwrap();
		assert_eq!(raw, before);
	}

	#[test]
	fn non_object_input_is_rejected() {
		assert!(matches!(
			extract_extensions::<User>(&json!([1, 2])),
			Err(ScimError::NotAnObject("array"))
		));
	}

	#[test]
	fn merge_adds_schema_keys_to_body() {
		let body = serde_json::to_value(User::new("jdoe")).unwrap();
		let merged = merge_extensions(body, r#"{"urn:x:ext":{"badge":"42"}}"#).unwrap();

		assert_eq!(merged["userName"], json!("jdoe"));
		assert_eq!(merged["urn:x:ext"], json!({"badge": "42"}));
	}

	#[test]
	fn merge_with_blank_extensions_is_noop() {
		let body = json!({"userName": "jdoe"});
		assert_eq!(merge_extensions(body.clone(), "  ").unwrap(), body);
	}

	#[test]
	fn merge_rejects_collisions() {
		let body = json!({"userName": "jdoe"});
		assert!(matches!(
			merge_extensions(body, r#"{"userName":"other"}"#),
			Err(ScimError::ExtensionConflict(key)) if key == "userName"
		));
	}

	#[test]
	fn merge_rejects_non_object_extensions() {
		let body = json!({"userName": "jdoe"});
		assert!(matches!(
			merge_extensions(body.clone(), "[1]"),
			Err(ScimError::InvalidExtension(_))
		));
		assert!(matches!(
			merge_extensions(body, "{not json"),
			Err(ScimError::InvalidExtension(_))
		));
	}

	fn arb_scalar() -> impl Strategy<Value = Value> {
		prop_oneof![
			any::<bool>().prop_map(Value::from),
			any::<i32>().prop_map(Value::from),
			"[a-z]{0,8}".prop_map(Value::from),
		]
	}

	fn arb_raw() -> impl Strategy<Value = Map<String, Value>> {
		let declared = proptest::sample::select(User::WIRE_FIELDS.to_vec()).prop_map(String::from);
		let key = prop_oneof![declared, "[a-zA-Z:]{1,12}"];
		proptest::collection::btree_map(key, arb_scalar(), 0..12)
			.prop_map(|entries| entries.into_iter().collect())
	}

	fn arb_extensions() -> impl Strategy<Value = Map<String, Value>> {
		proptest::collection::btree_map(
			"urn:[a-z]{1,6}:ext",
			proptest::collection::btree_map("[a-z]{1,6}", arb_scalar(), 1..4),
			0..3,
		)
		.prop_map(|schemas| {
			schemas
				.into_iter()
				.map(|(k, attrs)| (k, Value::Object(attrs.into_iter().collect())))
				.collect()
		})
	}

	proptest! {
		#[test]
		fn no_declared_key_survives_stripping(raw in arb_raw()) {
			let remainder = strip_declared_fields::<User>(&raw);
			for key in User::WIRE_FIELDS {
				prop_assert!(!remainder.contains_key(*key));
			}
			for (key, value) in &raw {
				if !User::declares(key) {
					prop_assert_eq!(remainder.get(key), Some(value));
				}
			}
		}

		#[test]
		fn stripping_is_idempotent(raw in arb_raw()) {
			let once = strip_declared_fields::<User>(&raw);
			let twice = strip_declared_fields::<User>(&once);
			prop_assert_eq!(once, twice);
		}

		#[test]
		fn merge_then_extract_recovers_extensions(extensions in arb_extensions()) {
			let body = serde_json::to_value(full_user()).unwrap();
			let text = serde_json::to_string(&extensions).unwrap();

			let merged = merge_extensions(body, &text).unwrap();
			let extracted = extract_extensions::<User>(&merged).unwrap();

			prop_assert_eq!(parse_extensions(&extracted).unwrap(), extensions);
		}
	}
}
