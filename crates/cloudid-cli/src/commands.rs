// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Resource subcommands. Every command prints one JSON document.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;
use cloudid_client::CloudIdClient;
use cloudid_scim::{merge_extensions, Application, Decoded, Group, IdentityProvider, Schema, User};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, instrument};

#[derive(Subcommand, Debug)]
pub enum Command {
	/// Manage SCIM users and their custom schemas
	Users {
		#[command(subcommand)]
		action: UserAction,
	},
	/// Manage SCIM groups
	Groups {
		#[command(subcommand)]
		action: RecordAction,
	},
	/// Manage custom schema definitions
	Schemas {
		#[command(subcommand)]
		action: SchemaAction,
	},
	/// Manage applications
	Applications {
		#[command(subcommand)]
		action: RecordAction,
	},
	/// Manage corporate identity providers
	IdentityProviders {
		#[command(subcommand)]
		action: RecordAction,
	},
}

#[derive(Subcommand, Debug)]
pub enum UserAction {
	/// Create a user from a JSON file
	Create {
		#[arg(long)]
		file: PathBuf,
		/// JSON file mapping schema ids to custom attributes
		#[arg(long)]
		custom_schemas: Option<PathBuf>,
	},
	Get {
		id: String,
	},
	/// Replace a user from a JSON file
	Update {
		id: String,
		#[arg(long)]
		file: PathBuf,
		/// JSON file mapping schema ids to custom attributes
		#[arg(long)]
		custom_schemas: Option<PathBuf>,
	},
	Delete {
		id: String,
	},
	List,
}

#[derive(Subcommand, Debug)]
pub enum RecordAction {
	/// Create from a JSON file
	Create {
		#[arg(long)]
		file: PathBuf,
	},
	Get {
		id: String,
	},
	/// Replace from a JSON file
	Update {
		id: String,
		#[arg(long)]
		file: PathBuf,
	},
	Delete {
		id: String,
	},
	List,
}

#[derive(Subcommand, Debug)]
pub enum SchemaAction {
	/// Create from a JSON file
	Create {
		#[arg(long)]
		file: PathBuf,
	},
	Get {
		id: String,
	},
	Delete {
		id: String,
	},
	List,
}

#[instrument(skip_all)]
pub async fn run(client: &CloudIdClient, command: Command) -> Result<Value> {
	match command {
		Command::Users { action } => run_users(client, action).await,
		Command::Groups { action } => run_groups(client, action).await,
		Command::Schemas { action } => run_schemas(client, action).await,
		Command::Applications { action } => run_applications(client, action).await,
		Command::IdentityProviders { action } => run_identity_providers(client, action).await,
	}
}

async fn run_users(client: &CloudIdClient, action: UserAction) -> Result<Value> {
	let users = client.users();
	match action {
		UserAction::Create {
			file,
			custom_schemas,
		} => {
			let user: User = read_record(&file)?;
			let extensions = read_custom_schemas(custom_schemas.as_deref())?;
			user_output(users.create(&user, extensions.as_deref()).await?)
		}
		UserAction::Get { id } => user_output(users.get(&id).await?),
		UserAction::Update {
			id,
			file,
			custom_schemas,
		} => {
			let user: User = read_record(&file)?;
			let extensions = read_custom_schemas(custom_schemas.as_deref())?;
			user_output(users.update(&id, &user, extensions.as_deref()).await?)
		}
		UserAction::Delete { id } => {
			users.delete(&id).await?;
			Ok(deleted(&id))
		}
		UserAction::List => {
			let listed = users
				.list()
				.await?
				.into_iter()
				.map(user_output)
				.collect::<Result<Vec<_>>>()?;
			Ok(Value::Array(listed))
		}
	}
}

async fn run_groups(client: &CloudIdClient, action: RecordAction) -> Result<Value> {
	let groups = client.groups();
	match action {
		RecordAction::Create { file } => to_output(&groups.create(&read_record::<Group>(&file)?).await?),
		RecordAction::Get { id } => to_output(&groups.get(&id).await?),
		RecordAction::Update { id, file } => {
			to_output(&groups.update(&id, &read_record::<Group>(&file)?).await?)
		}
		RecordAction::Delete { id } => {
			groups.delete(&id).await?;
			Ok(deleted(&id))
		}
		RecordAction::List => to_output(&groups.list().await?),
	}
}

async fn run_schemas(client: &CloudIdClient, action: SchemaAction) -> Result<Value> {
	let schemas = client.schemas();
	match action {
		SchemaAction::Create { file } => {
			to_output(&schemas.create(&read_record::<Schema>(&file)?).await?)
		}
		SchemaAction::Get { id } => to_output(&schemas.get(&id).await?),
		SchemaAction::Delete { id } => {
			schemas.delete(&id).await?;
			Ok(deleted(&id))
		}
		SchemaAction::List => to_output(&schemas.list().await?),
	}
}

async fn run_applications(client: &CloudIdClient, action: RecordAction) -> Result<Value> {
	let applications = client.applications();
	match action {
		RecordAction::Create { file } => {
			to_output(&applications.create(&read_record::<Application>(&file)?).await?)
		}
		RecordAction::Get { id } => to_output(&applications.get(&id).await?),
		RecordAction::Update { id, file } => to_output(
			&applications
				.update(&id, &read_record::<Application>(&file)?)
				.await?,
		),
		RecordAction::Delete { id } => {
			applications.delete(&id).await?;
			Ok(deleted(&id))
		}
		RecordAction::List => to_output(&applications.list().await?),
	}
}

async fn run_identity_providers(client: &CloudIdClient, action: RecordAction) -> Result<Value> {
	let idps = client.identity_providers();
	match action {
		RecordAction::Create { file } => {
			to_output(&idps.create(&read_record::<IdentityProvider>(&file)?).await?)
		}
		RecordAction::Get { id } => to_output(&idps.get(&id).await?),
		RecordAction::Update { id, file } => {
			to_output(&idps.update(&id, &read_record::<IdentityProvider>(&file)?).await?)
		}
		RecordAction::Delete { id } => {
			idps.delete(&id).await?;
			Ok(deleted(&id))
		}
		RecordAction::List => to_output(&idps.list().await?),
	}
}

fn read_record<T: DeserializeOwned>(path: &Path) -> Result<T> {
	debug!(path = %path.display(), "reading record");
	let content = std::fs::read_to_string(path)
		.with_context(|| format!("failed to read {}", path.display()))?;
	serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

/// The custom-schema file is passed on as text; it is parsed when merged.
fn read_custom_schemas(path: Option<&Path>) -> Result<Option<String>> {
	path
		.map(|path| {
			std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
		})
		.transpose()
}

/// A user with its custom schemas put back next to the typed attributes.
fn user_output(decoded: Decoded<User>) -> Result<Value> {
	let body = serde_json::to_value(&decoded.record)?;
	Ok(merge_extensions(body, &decoded.extensions)?)
}

fn to_output<T: Serialize>(value: &T) -> Result<Value> {
	Ok(serde_json::to_value(value)?)
}

fn deleted(id: &str) -> Value {
	json!({ "deleted": id })
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	#[test]
	fn records_are_read_from_json_files() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		write!(file, r#"{{"userName": "jdoe", "active": true}}"#).unwrap();

		let user: User = read_record(file.path()).unwrap();
		assert_eq!(user.user_name, "jdoe");
		assert_eq!(user.active, Some(true));
	}

	#[test]
	fn unreadable_record_names_the_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("missing.json");

		let err = read_record::<User>(&path).unwrap_err();
		assert!(err.to_string().contains("missing.json"));
	}

	#[test]
	fn custom_schemas_are_optional() {
		assert!(read_custom_schemas(None).unwrap().is_none());
	}

	#[test]
	fn user_output_puts_custom_schemas_back() {
		let decoded = Decoded {
			record: User::new("jdoe"),
			extensions: r#"{"urn:x:ext":{"a":1}}"#.to_string(),
		};

		let output = user_output(decoded).unwrap();
		assert_eq!(output["userName"], json!("jdoe"));
		assert_eq!(output["urn:x:ext"], json!({"a": 1}));
	}

	#[test]
	fn user_output_without_custom_schemas_is_the_record() {
		let decoded = Decoded {
			record: User::new("jdoe"),
			extensions: String::new(),
		};
		assert_eq!(
			user_output(decoded).unwrap(),
			serde_json::to_value(User::new("jdoe")).unwrap()
		);
	}
}
