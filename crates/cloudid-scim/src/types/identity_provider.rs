// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Meta, SensitiveString};
use crate::fields::WireFields;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityFederation {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub use_local_user_store: Option<bool>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub allow_local_users_only: Option<bool>,
	#[serde(
		rename = "applyLocalIdPAuthnChecks",
		default,
		skip_serializing_if = "Option::is_none"
	)]
	pub apply_local_idp_authn_checks: Option<bool>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub required_groups: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginHintConfiguration {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub login_hint_type: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub send_method: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OidcConfiguration {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub discovery_url: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub issuer: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub jwks_uri: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub client_id: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub client_secret: Option<SensitiveString>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub subject_name_identifier: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub token_endpoint_auth_method: Option<String>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub scopes: Vec<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub pkce_enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SamlEndpoint {
	pub binding_name: String,
	pub location: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub response_location: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub default: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningCertificate {
	pub base64_certificate: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub dn: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub default: Option<bool>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub valid_from: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub valid_to: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Saml2Configuration {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub digest_algorithm: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub include_scoping: Option<bool>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name_id_format: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub allow_create: Option<String>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub sso_endpoints: Vec<SamlEndpoint>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub slo_endpoints: Vec<SamlEndpoint>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub certificates_for_signing: Vec<SigningCertificate>,
}

/// Corporate identity provider federated with the tenant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityProvider {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	pub display_name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
	pub idp_type: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub logout_url: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub forward_all_sso_requests: Option<bool>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub identity_federation: Option<IdentityFederation>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub login_hint_configuration: Option<LoginHintConfiguration>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub oidc_configuration: Option<OidcConfiguration>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub saml2_configuration: Option<Saml2Configuration>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub meta: Option<Meta>,
}

impl IdentityProvider {
	pub fn new(display_name: impl Into<String>) -> Self {
		Self {
			display_name: display_name.into(),
			..Default::default()
		}
	}
}

impl WireFields for IdentityProvider {
	const WIRE_FIELDS: &'static [&'static str] = &[
		"id",
		"displayName",
		"name",
		"type",
		"logoutUrl",
		"forwardAllSsoRequests",
		"identityFederation",
		"loginHintConfiguration",
		"oidcConfiguration",
		"saml2Configuration",
		"meta",
	];
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityProviderList {
	#[serde(default)]
	pub total_results: Option<u64>,
	#[serde(default)]
	pub identity_providers: Vec<Value>,
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::fields::{declared_keys, serialized_keys};
	use serde_json::json;

	#[test]
	fn wire_fields_match_serde_keys() {
		let idp = IdentityProvider {
			id: Some("idp-1".to_string()),
			display_name: "Corporate AD".to_string(),
			name: Some("corp-ad".to_string()),
			idp_type: Some("microsoftADFS".to_string()),
			logout_url: Some("https://adfs.example.com/logout".to_string()),
			forward_all_sso_requests: Some(false),
			identity_federation: Some(IdentityFederation::default()),
			login_hint_configuration: Some(LoginHintConfiguration::default()),
			oidc_configuration: Some(OidcConfiguration::default()),
			saml2_configuration: Some(Saml2Configuration::default()),
			meta: Some(Meta::default()),
		};

		assert_eq!(serialized_keys(&idp), declared_keys::<IdentityProvider>());
	}

	#[test]
	fn identity_federation_uses_idp_spelling() {
		let federation = IdentityFederation {
			apply_local_idp_authn_checks: Some(true),
			required_groups: vec!["admins".to_string()],
			..Default::default()
		};

		assert_eq!(
			serde_json::to_value(&federation).unwrap(),
			json!({"applyLocalIdPAuthnChecks": true, "requiredGroups": ["admins"]})
		);
	}

	#[test]
	fn oidc_client_secret_is_sent_but_not_debugged() {
		let oidc = OidcConfiguration {
			client_id: Some("client".to_string()),
			client_secret: Some(SensitiveString::new("oidc-secret")),
			..Default::default()
		};

		assert_eq!(serde_json::to_value(&oidc).unwrap()["clientSecret"], json!("oidc-secret"));
		assert!(!format!("{oidc:?}").contains("oidc-secret"));
	}
}
