// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Declared wire keys per record type.

/// The closed set of top-level JSON keys a record declares.
///
/// Entries are spelled exactly as serde writes them (after `rename_all` and
/// `rename`). Anything else found at the top level of a response is treated
/// as custom-schema data.
pub trait WireFields {
	const WIRE_FIELDS: &'static [&'static str];

	fn declares(key: &str) -> bool {
		Self::WIRE_FIELDS.contains(&key)
	}
}

/// Test helper: the set of top-level keys serde produces for `value`.
#[cfg(test)]
pub(crate) fn serialized_keys<T: serde::Serialize>(value: &T) -> std::collections::BTreeSet<String> {
	match serde_json::to_value(value).unwrap() {
		serde_json::Value::Object(map) => map.keys().cloned().collect(),
		other => panic!("expected object, got {other}"),
	}
}

/// Test helper: `T::WIRE_FIELDS` as a set.
#[cfg(test)]
pub(crate) fn declared_keys<T: WireFields>() -> std::collections::BTreeSet<String> {
	T::WIRE_FIELDS.iter().map(|k| k.to_string()).collect()
}
