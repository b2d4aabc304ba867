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

use crate::{device_type::resolve_device_type, error::Error};
use clap::Parser;
use rbr_settings::{
	api::{DEFAULT_HASH, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SLEEP_SECS, DEFAULT_URL},
	files::{DEFAULT_CERT_FILE, DEFAULT_SCRIPT_FILE, DEFAULT_SCRIPT_LOG_FILE},
};
use std::{convert::TryFrom, path::PathBuf, time::Duration};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[clap(name = "rb-register")]
#[clap(version = VERSION)]
#[clap(author = "Integritee AG <hello@integritee.network>")]
#[clap(about = "register this device and fetch its client certificate", long_about = None)]
pub struct Cli {
	/// url of the registration API
	#[clap(long, default_value_t = String::from(DEFAULT_URL))]
	pub url: String,

	/// hash identifying this device
	#[clap(long, default_value_t = String::from(DEFAULT_HASH))]
	pub hash: String,

	/// device type, an alias (ap, proxy, ips, ips-generic, exporter, intrusion-proxy) or a numeric code
	#[clap(long = "type")]
	pub device_type: String,

	/// seconds to wait between two requests
	#[clap(long, default_value_t = DEFAULT_SLEEP_SECS)]
	pub sleep: u64,

	/// do not validate the server certificate
	#[clap(long)]
	pub no_check_certificate: bool,

	/// file to store the certificate in
	#[clap(long, default_value_t = String::from(DEFAULT_CERT_FILE))]
	pub cert: String,

	/// file to store the node name in
	#[clap(long)]
	pub nodename: Option<String>,

	/// location of the database that remembers the UUID across restarts
	#[clap(long)]
	pub db: Option<String>,

	/// script to call once the certificate has been stored
	#[clap(long, default_value_t = String::from(DEFAULT_SCRIPT_FILE))]
	pub script: String,

	/// file to store the output of the finish script in
	#[clap(long, default_value_t = String::from(DEFAULT_SCRIPT_LOG_FILE))]
	pub script_log: String,

	/// request timeout in seconds, 0 waits forever
	#[clap(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
	pub timeout: u64,

	/// show debug messages
	#[clap(short, long)]
	pub debug: bool,
}

/// Validated run configuration of the registration service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
	pub url: String,
	pub secret: String,
	pub device_type: u32,
	pub sleep: Duration,
	pub insecure: bool,
	/// `None` lets requests wait for the server indefinitely
	pub timeout: Option<Duration>,
	pub cert_file: PathBuf,
	pub node_name_file: Option<PathBuf>,
	pub db_path: Option<PathBuf>,
	pub script: PathBuf,
	pub script_log: PathBuf,
}

impl TryFrom<&Cli> for Config {
	type Error = Error;

	fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
		Ok(Config {
			url: cli.url.clone(),
			secret: cli.hash.clone(),
			device_type: resolve_device_type(&cli.device_type)?,
			sleep: Duration::from_secs(cli.sleep),
			insecure: cli.no_check_certificate,
			timeout: Some(cli.timeout).filter(|secs| *secs > 0).map(Duration::from_secs),
			cert_file: PathBuf::from(&cli.cert),
			node_name_file: non_empty_path(&cli.nodename),
			db_path: non_empty_path(&cli.db),
			script: PathBuf::from(&cli.script),
			script_log: PathBuf::from(&cli.script_log),
		})
	}
}

fn non_empty_path(value: &Option<String>) -> Option<PathBuf> {
	value.as_deref().filter(|v| !v.is_empty()).map(PathBuf::from)
}
