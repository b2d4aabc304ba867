/*
	Copyright 2021 Integritee AG and Supercomputing Systems AG

	Licensed under the Apache License, Version 2.0 (the "License");
	you may not use this file except in compliance with the License.
	You may obtain a copy of the License at

		http://www.apache.org/licenses/LICENSE-2.0

	Unless required by applicable law or agreed to in writing, software
	distributed under the License is distributed on an "AS IS" BASIS,
	WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
	See the License for the specific language governing permissions and
	limitations under the License.

*/

//! rb-register: registers a device against the provisioning API, waits until an operator
//! claims it and stores the certificate handed out with the claim.

mod config;
mod device_type;
mod error;
mod finish;
mod hardware;
mod identity_store;
mod provisioning;
mod shutdown;

use crate::{
	config::{Cli, Config},
	error::ServiceResult,
	hardware::{device_descriptor, SystemHardwareFacts},
	provisioning::{provision, ProvisioningOutcome, Retry},
	shutdown::ShutdownSignal,
};
use clap::Parser;
use log::*;
use rbr_identity_cache::IdentityCache;
use rbr_provisioning_client::{ClientConfig, ProvisioningClient};
use std::{convert::TryFrom, process};

fn main() {
	let cli = Cli::parse();

	let default_level = if cli.debug { "debug" } else { "info" };
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
		.format_timestamp(Some(env_logger::TimestampPrecision::Millis))
		.init();

	if let Err(e) = run(&cli) {
		error!("{}", e);
		error!("Halted");
		process::exit(1);
	}
}

fn run(cli: &Cli) -> ServiceResult<()> {
	let config = Config::try_from(cli)?;
	info!("*** Starting rb-register {}", env!("CARGO_PKG_VERSION"));

	let shutdown = ShutdownSignal::install()?;
	let descriptor =
		device_descriptor(&SystemHardwareFacts::default(), config.device_type, &config.secret)?;

	let mut client = ProvisioningClient::new(ClientConfig {
		url: config.url.clone(),
		descriptor,
		insecure: config.insecure,
		timeout: config.timeout,
	})?;

	let mut cache = config.db_path.as_ref().map(IdentityCache::open).transpose()?;
	let retry = Retry { interval: config.sleep, shutdown: &shutdown };

	let outcome = provision(&mut client, cache.as_mut(), &config.secret, &retry)?;

	if let Some(cache) = cache {
		cache.close()?;
	}

	let (certificate, node_name) = match outcome {
		ProvisioningOutcome::Claimed { certificate, node_name } => (certificate, node_name),
		ProvisioningOutcome::Interrupted => {
			info!("Interrupted before the device has been claimed");
			return Ok(())
		},
	};

	finish::write_certificate(&config.cert_file, &certificate)?;
	finish::write_node_name(config.node_name_file.as_deref(), &node_name)?;

	info!("Calling finish script");
	if let Err(e) = finish::run_finish_script(&config.script, &config.script_log) {
		error!("Finish script {} failed: {}", config.script.display(), e);
	}

	info!("Done");
	Ok(())
}
