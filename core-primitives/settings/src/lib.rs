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

//! Common settings for the registration service. It is strictly `no_std`

#![no_std]

pub mod files {
	/// certificate received once the device has been claimed
	pub static DEFAULT_CERT_FILE: &str = "/opt/rb/etc/chef/client.pem";
	/// script called after the certificate has been obtained
	pub static DEFAULT_SCRIPT_FILE: &str = "/opt/rb/bin/rb_register_finish.sh";
	/// stdout of the finish script
	pub static DEFAULT_SCRIPT_LOG_FILE: &str = "/var/log/rb-register/finish.log";
}

/// Settings concerning the registration API
pub mod api {
	pub static DEFAULT_URL: &str = "http://localhost";
	pub static DEFAULT_HASH: &str = "00000000-0000-0000-0000-000000000000";
	// time between two requests that did not advance the registration, in s
	pub const DEFAULT_SLEEP_SECS: u64 = 300;
	pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
}

/// Known device aliases and their numeric device type
pub mod device {
	pub static DEVICE_TYPE_ALIASES: &[(&str, u32)] = &[
		("ap", 20),
		("proxy", 31),
		("ips", 32),
		("ips-generic", 33),
		("exporter", 41),
		("intrusion-proxy", 98),
	];
}
