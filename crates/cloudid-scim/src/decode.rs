// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Typed decoding of raw tenant responses.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::trace;

use crate::error::ScimError;
use crate::extension::extract_extensions;
use crate::fields::WireFields;

/// A decoded record plus the serialized custom schemas found next to it.
///
/// `extensions` is empty when extraction was not requested or the response
/// carried nothing beyond the record's declared fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T> {
	pub record: T,
	pub extensions: String,
}

impl<T> Decoded<T> {
	pub fn has_extensions(&self) -> bool {
		!self.extensions.is_empty()
	}

	pub fn into_record(self) -> T {
		self.record
	}
}

/// Decode `raw` into `T`.
///
/// Keys `T` does not declare are ignored by the typed decode. With
/// `extract` set they are also serialized into
/// [`Decoded::extensions`].
pub fn decode<T>(raw: Option<&Value>, extract: bool) -> Result<Decoded<T>, ScimError>
where
	T: DeserializeOwned + WireFields,
{
	let raw = match raw {
		None | Some(Value::Null) => return Err(ScimError::NilResponse),
		Some(raw) => raw,
	};

	let record = T::deserialize(raw).map_err(ScimError::Decode)?;

	let extensions = if extract {
		extract_extensions::<T>(raw)?
	} else {
		String::new()
	};
	trace!(
		record = std::any::type_name::<T>(),
		extension_bytes = extensions.len(),
		"decoded response"
	);

	Ok(Decoded { record, extensions })
}

/// Decode `raw` into `T`, discarding anything `T` does not declare.
pub fn decode_record<T>(raw: Option<&Value>) -> Result<T, ScimError>
where
	T: DeserializeOwned + WireFields,
{
	decode(raw, false).map(Decoded::into_record)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::types::{full_user, Email, Group, User};
	use proptest::prelude::*;
	use serde_json::json;

	#[test]
	fn missing_response_is_nil_error() {
		assert!(matches!(
			decode::<User>(None, true),
			Err(ScimError::NilResponse)
		));
		assert!(matches!(
			decode::<User>(Some(&Value::Null), false),
			Err(ScimError::NilResponse)
		));
	}

	#[test]
	fn unknown_keys_are_ignored_without_extraction() {
		let raw = json!({
			"userName": "jdoe",
			"urn:x:ext": {"badge": "42"},
			"somethingNew": true
		});

		let decoded = decode::<User>(Some(&raw), false).unwrap();
		assert_eq!(decoded.record.user_name, "jdoe");
		assert!(!decoded.has_extensions());
	}

	#[test]
	fn extraction_returns_undeclared_keys() {
		let raw = json!({
			"id": "u-1",
			"userName": "jdoe",
			"meta": {"resourceType": "User"},
			"urn:ietf:params:scim:schemas:extension:sap:2.0:User": {"sendMail": false},
			"urn:x:ext": {"badge": "42", "level": 3}
		});

		let decoded = decode::<User>(Some(&raw), true).unwrap();
		assert_eq!(decoded.record.id.as_deref(), Some("u-1"));
		assert_eq!(
			decoded.record.sap_extension.as_ref().unwrap().send_mail,
			Some(false)
		);

		let extensions: Value = serde_json::from_str(&decoded.extensions).unwrap();
		assert_eq!(extensions, json!({"urn:x:ext": {"badge": "42", "level": 3}}));
	}

	#[test]
	fn type_mismatch_is_decode_error() {
		let raw = json!({"userName": 42});
		assert!(matches!(
			decode::<User>(Some(&raw), false),
			Err(ScimError::Decode(_))
		));
	}

	#[test]
	fn decode_record_works_for_non_extension_resources() {
		let raw = json!({"id": "g-1", "displayName": "Admins", "members": []});
		let group: Group = decode_record(Some(&raw)).unwrap();
		assert_eq!(group.display_name, "Admins");
	}

	#[test]
	fn fully_populated_user_round_trips() {
		let user = full_user();
		let raw = serde_json::to_value(&user).unwrap();

		let decoded = decode::<User>(Some(&raw), true).unwrap();
		assert_eq!(decoded.record, user);
		assert!(!decoded.has_extensions());
	}

	fn arb_email() -> impl Strategy<Value = Email> {
		(
			"[a-z]{1,8}@[a-z]{1,8}\\.com",
			proptest::option::of("work|home"),
			proptest::option::of(any::<bool>()),
		)
			.prop_map(|(value, email_type, primary)| Email {
				value,
				email_type: email_type.map(String::from),
				display: None,
				primary,
			})
	}

	fn arb_user() -> impl Strategy<Value = User> {
		(
			"[a-zA-Z0-9._-]{1,16}",
			proptest::option::of("[a-zA-Z ]{0,20}"),
			proptest::option::of(any::<bool>()),
			proptest::option::of("[a-f0-9-]{8,36}"),
			proptest::collection::vec(arb_email(), 0..3),
		)
			.prop_map(|(user_name, display_name, active, id, emails)| User {
				id,
				user_name,
				display_name,
				active,
				emails,
				..User::new("placeholder")
			})
	}

	proptest! {
		#[test]
		fn encode_then_decode_is_identity(user in arb_user()) {
			let raw = serde_json::to_value(&user).unwrap();
			let decoded = decode::<User>(Some(&raw), true).unwrap();
			prop_assert_eq!(decoded.record, user);
			prop_assert!(decoded.extensions.is_empty());
		}
	}
}
