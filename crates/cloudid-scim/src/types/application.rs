// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::fields::WireFields;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SsoType {
	OpenIdConnect,
	Saml2,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectNameIdentifier {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub source: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssertionAttribute {
	pub assertion_attribute_name: String,
	pub user_attribute_name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub inherited: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedAssertionAttribute {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub source: Option<String>,
	pub attribute_name: String,
	pub attribute_value: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub inherited: Option<bool>,
}

/// Rule routing authentication to a specific identity provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationRule {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub user_type: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub user_group: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub user_email_domain: Option<String>,
	pub identity_provider_id: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub ip_network_range: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationSchema {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub sso_type: Option<SsoType>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub subject_name_identifier: Option<SubjectNameIdentifier>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub subject_name_identifier_function: Option<String>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub assertion_attributes: Vec<AssertionAttribute>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub advanced_assertion_attributes: Vec<AdvancedAssertionAttribute>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub default_authenticating_idp_id: Option<String>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub conditional_authentication: Vec<AuthenticationRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	pub name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub parent_application_id: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub multi_tenant_app: Option<bool>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub global_account: Option<String>,
	#[serde(
		rename = "urn:sap:identity:application:schemas:extension:sci:1.0:Authentication",
		default,
		skip_serializing_if = "Option::is_none"
	)]
	pub authentication_schema: Option<AuthenticationSchema>,
}

impl Application {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Default::default()
		}
	}
}

impl WireFields for Application {
	const WIRE_FIELDS: &'static [&'static str] = &[
		"id",
		"name",
		"description",
		"parentApplicationId",
		"multiTenantApp",
		"globalAccount",
		"urn:sap:identity:application:schemas:extension:sci:1.0:Authentication",
	];
}

/// Envelope returned by the applications listing endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationList {
	#[serde(default)]
	pub total_results: Option<u64>,
	#[serde(default)]
	pub applications: Vec<Value>,
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::fields::{declared_keys, serialized_keys};
	use serde_json::json;

	#[test]
	fn wire_fields_match_serde_keys() {
		let app = Application {
			id: Some("app-1".to_string()),
			name: "Portal".to_string(),
			description: Some("Customer portal".to_string()),
			parent_application_id: Some("app-0".to_string()),
			multi_tenant_app: Some(false),
			global_account: Some("ga".to_string()),
			authentication_schema: Some(AuthenticationSchema::default()),
		};

		assert_eq!(serialized_keys(&app), declared_keys::<Application>());
	}

	#[test]
	fn authentication_schema_round_trips_rules() {
		let raw = json!({
			"name": "Portal",
			"urn:sap:identity:application:schemas:extension:sci:1.0:Authentication": {
				"ssoType": "openIdConnect",
				"subjectNameIdentifier": {"source": "Identity Directory", "value": "mail"},
				"assertionAttributes": [
					{"assertionAttributeName": "email", "userAttributeName": "mail", "inherited": false}
				],
				"conditionalAuthentication": [
					{"userEmailDomain": "example.com", "identityProviderId": "idp-1"}
				]
			}
		});

		let app: Application = serde_json::from_value(raw.clone()).unwrap();
		let auth = app.authentication_schema.as_ref().unwrap();
		assert_eq!(auth.sso_type, Some(SsoType::OpenIdConnect));
		assert_eq!(auth.conditional_authentication[0].identity_provider_id, "idp-1");
		assert_eq!(serde_json::to_value(&app).unwrap(), raw);
	}

	#[test]
	fn unknown_sso_type_is_rejected() {
		let result: Result<SsoType, _> = serde_json::from_value(json!("kerberos"));
		assert!(result.is_err());
	}
}
