// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Identity service records and custom-schema reconciliation.
//!
//! Users carry arbitrary custom schemas next to their typed attributes. This
//! crate merges them into outgoing bodies, splits them back out of responses
//! and checks that the tenant kept what was sent.

pub mod decode;
pub mod error;
pub mod extension;
pub mod fields;
pub mod types;
pub mod validate;

pub use decode::{decode, decode_record, Decoded};
pub use error::{AttributePath, DisplayValue, ScimError};
pub use extension::{extract_extensions, merge_extensions, parse_extensions, strip_declared_fields};
pub use fields::WireFields;
pub use types::{
	Application, ApplicationList, Group, IdentityProvider, IdentityProviderList, ListResponse, Meta,
	Schema, SchemaAttribute, SensitiveString, User,
};
pub use validate::{compare_attributes, validate_extensions, MAX_NESTING};
