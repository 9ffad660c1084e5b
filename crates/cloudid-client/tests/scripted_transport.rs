// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Resource-client flows against an in-memory transport.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cloudid_client::{ApiRequest, ApiResponse, ClientError, CloudIdClient, HeaderProfile, Transport};
use cloudid_scim::{IdentityProvider, ScimError, User};
use reqwest::Method;
use serde_json::{json, Value};

/// Replays queued responses and records every request it was given.
#[derive(Default)]
struct ScriptedTransport {
	responses: Mutex<VecDeque<Result<ApiResponse, ClientError>>>,
	requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
	fn reply(self, status: u16, body: Option<Value>) -> Self {
		self.responses.lock().unwrap().push_back(Ok(ApiResponse {
			status,
			body,
			headers: HashMap::new(),
		}));
		self
	}

	fn reply_with_location(self, location: &str) -> Self {
		self.responses.lock().unwrap().push_back(Ok(ApiResponse {
			status: 201,
			body: None,
			headers: HashMap::from([("location".to_string(), location.to_string())]),
		}));
		self
	}

	fn requests(&self) -> Vec<ApiRequest> {
		self.requests.lock().unwrap().clone()
	}
}

#[async_trait]
impl Transport for ScriptedTransport {
	async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
		self.requests.lock().unwrap().push(request);
		self
			.responses
			.lock()
			.unwrap()
			.pop_front()
			.unwrap_or_else(|| Err(ClientError::InvalidResponse("script exhausted".to_string())))
	}
}

fn client(transport: ScriptedTransport) -> (CloudIdClient, Arc<ScriptedTransport>) {
	let transport = Arc::new(transport);
	(CloudIdClient::with_transport(transport.clone()), transport)
}

#[tokio::test]
async fn user_update_sends_custom_schemas_alongside_the_body() {
	let (client, transport) = client(ScriptedTransport::default().reply(
		200,
		Some(json!({
			"id": "u-1",
			"userName": "jdoe",
			"urn:x:ext": {"a": 1.0, "b": false}
		})),
	));

	let decoded = client
		.users()
		.update("u-1", &User::new("jdoe"), Some(r#"{"urn:x:ext":{"a":1,"b":false}}"#))
		.await
		.unwrap();
	assert!(decoded.has_extensions());

	let requests = transport.requests();
	assert_eq!(requests.len(), 1);
	assert_eq!(requests[0].method, Method::PUT);
	assert_eq!(requests[0].path, "/scim/Users/u-1");
	assert_eq!(requests[0].profile, HeaderProfile::Scim);
	assert_eq!(
		requests[0].extensions.as_deref(),
		Some(r#"{"urn:x:ext":{"a":1,"b":false}}"#)
	);
}

#[tokio::test]
async fn user_update_reports_flipped_boolean() {
	let (client, _) = client(ScriptedTransport::default().reply(
		200,
		Some(json!({
			"id": "u-1",
			"userName": "jdoe",
			"urn:x:ext": {"a": 1, "b": true}
		})),
	));

	let err = client
		.users()
		.update("u-1", &User::new("jdoe"), Some(r#"{"urn:x:ext":{"a":1,"b":false}}"#))
		.await
		.unwrap_err();

	let message = err.to_string();
	assert!(message.contains("urn:x:ext.b"), "{message}");
	assert!(message.ends_with("request sent: false but response received: true"));
}

#[tokio::test]
async fn user_write_without_custom_schemas_skips_validation() {
	let (client, transport) = client(ScriptedTransport::default().reply(
		201,
		Some(json!({"id": "u-2", "userName": "jdoe", "urn:x:ext": {"server": "default"}})),
	));

	let decoded = client.users().create(&User::new("jdoe"), None).await.unwrap();

	assert!(decoded.has_extensions());
	assert!(transport.requests()[0].extensions.is_none());
}

#[tokio::test]
async fn empty_write_response_is_nil_error() {
	let (client, _) = client(ScriptedTransport::default().reply(201, None));

	let err = client.users().create(&User::new("jdoe"), None).await.unwrap_err();
	assert!(matches!(err, ClientError::Scim(ScimError::NilResponse)));
}

#[tokio::test]
async fn group_list_stops_at_an_empty_page() {
	let (client, transport) = client(
		ScriptedTransport::default()
			.reply(
				200,
				Some(json!({
					"totalResults": 5,
					"Resources": [{"id": "g-1", "displayName": "One"}, {"id": "g-2", "displayName": "Two"}]
				})),
			)
			.reply(200, Some(json!({"totalResults": 5, "Resources": []}))),
	);

	let groups = client.groups().list().await.unwrap();
	assert_eq!(groups.len(), 2);

	let requests = transport.requests();
	assert_eq!(requests.len(), 2);
	assert_eq!(requests[1].query, vec![("startIndex", "3".to_string()), ("count", "100".to_string())]);
}

#[tokio::test]
async fn identity_provider_create_reads_back_by_location() {
	let (client, transport) = client(
		ScriptedTransport::default()
			.reply_with_location("/IdentityProviders/v1/idp-9")
			.reply(
				200,
				Some(json!({
					"id": "idp-9",
					"displayName": "Corporate AD",
					"type": "microsoftADFS",
					"identityFederation": {"useLocalUserStore": true}
				})),
			),
	);

	let idp = client
		.identity_providers()
		.create(&IdentityProvider::new("Corporate AD"))
		.await
		.unwrap();

	assert_eq!(idp.id.as_deref(), Some("idp-9"));
	assert_eq!(idp.idp_type.as_deref(), Some("microsoftADFS"));

	let requests = transport.requests();
	assert_eq!(requests[0].method, Method::POST);
	assert_eq!(requests[0].profile, HeaderProfile::Json);
	assert_eq!(requests[0].capture, vec!["Location"]);
	assert_eq!(requests[1].method, Method::GET);
	assert_eq!(requests[1].path, "/IdentityProviders/v1/idp-9");
}

#[tokio::test]
async fn identity_provider_update_rereads_the_resource() {
	let (client, transport) = client(
		ScriptedTransport::default()
			.reply(204, None)
			.reply(200, Some(json!({"id": "idp-9", "displayName": "Renamed"}))),
	);

	let idp = client
		.identity_providers()
		.update("idp-9", &IdentityProvider::new("Renamed"))
		.await
		.unwrap();
	assert_eq!(idp.display_name, "Renamed");

	let methods: Vec<Method> = transport.requests().into_iter().map(|r| r.method).collect();
	assert_eq!(methods, vec![Method::PUT, Method::GET]);
}

#[tokio::test]
async fn application_list_decodes_each_item() {
	let (client, _) = client(ScriptedTransport::default().reply(
		200,
		Some(json!({
			"totalResults": 2,
			"applications": [
				{"id": "a-1", "name": "billing"},
				{"id": "a-2", "name": "portal", "multiTenantApp": true}
			]
		})),
	));

	let apps = client.applications().list().await.unwrap();
	assert_eq!(apps.len(), 2);
	assert_eq!(apps[1].multi_tenant_app, Some(true));
}

#[tokio::test]
async fn empty_ids_never_reach_the_transport() {
	let (client, transport) = client(ScriptedTransport::default());

	assert!(matches!(client.schemas().get("").await, Err(ClientError::Config(_))));
	assert!(transport.requests().is_empty());
}
