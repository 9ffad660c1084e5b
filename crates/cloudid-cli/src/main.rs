// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! cloudid - manage users, groups, schemas, applications and corporate
//! identity providers of an identity service tenant.
//!
//! Results are printed to stdout as JSON; logs go to stderr.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cloudid_client::CloudIdClient;

mod commands;
mod config;

use commands::Command;
use config::{load_config, CliOverrides, LogFormat, LoggingConfig};

#[derive(Parser, Debug)]
#[command(name = "cloudid", version, about, long_about = None)]
struct Args {
	/// Path to a configuration file
	#[arg(short, long)]
	config: Option<PathBuf>,

	/// Tenant base URL (overrides config)
	#[arg(long)]
	tenant_url: Option<String>,

	/// Technical user (overrides config)
	#[arg(long)]
	username: Option<String>,

	/// Log level (overrides config)
	#[arg(short, long)]
	log_level: Option<String>,

	/// Log format: pretty, compact or json (overrides config)
	#[arg(long)]
	log_format: Option<String>,

	#[command(subcommand)]
	command: Command,
}

impl Args {
	fn overrides(&self) -> CliOverrides {
		CliOverrides {
			config_file: self.config.clone(),
			tenant_url: self.tenant_url.clone(),
			username: self.username.clone(),
			log_level: self.log_level.clone(),
			log_format: self.log_format.clone(),
		}
	}
}

fn init_tracing(logging: &LoggingConfig) {
	let level = logging.level.as_str();
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		EnvFilter::new(format!(
			"cloudid={level},cloudid_client={level},cloudid_scim={level},cloudid_common_http={level}"
		))
	});

	match logging.format {
		LogFormat::Json => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().json().with_writer(std::io::stderr))
				.init();
		}
		LogFormat::Compact => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().compact().with_writer(std::io::stderr))
				.init();
		}
		LogFormat::Pretty => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().with_writer(std::io::stderr))
				.init();
		}
	}
}

#[tokio::main]
async fn main() -> Result<()> {
	let args = Args::parse();

	let config = load_config(&args.overrides()).context("failed to load configuration")?;
	init_tracing(&config.logging);
	debug!(?config, "configuration loaded");

	let client_config = config.client_config().context("incomplete tenant configuration")?;
	let client = CloudIdClient::new(client_config).context("failed to create tenant client")?;

	let output = commands::run(&client, args.command).await?;
	println!("{}", serde_json::to_string_pretty(&output)?);

	Ok(())
}
