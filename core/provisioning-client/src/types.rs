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

use crate::error::{Error, Result};
use std::time::Duration;
use url::Url;

/// Registration progress of a device. Only ever moves forward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum DeviceStatus {
	#[default]
	Unregistered,
	Registered,
	Claimed,
}

/// Static facts describing the device, sent with every register request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDescriptor {
	pub cpus: u32,
	/// total memory as reported by the kernel, in kB
	pub memory: u64,
	pub device_type: u32,
	pub secret: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
	pub url: String,
	pub descriptor: DeviceDescriptor,
	/// skip TLS certificate validation
	pub insecure: bool,
	pub timeout: Option<Duration>,
}

impl ClientConfig {
	/// Checks that every mandatory field is set and returns the parsed service URL.
	pub fn validate(&self) -> Result<Url> {
		if self.url.is_empty() {
			return Err(Error::Config("Url not provided".into()))
		}
		if self.descriptor.secret.is_empty() {
			return Err(Error::Config("Hash not provided".into()))
		}
		if self.descriptor.cpus == 0 {
			return Err(Error::Config("CPU number not provided".into()))
		}
		if self.descriptor.memory == 0 {
			return Err(Error::Config("Memory not provided".into()))
		}
		if self.descriptor.device_type == 0 {
			return Err(Error::Config("Device type not provided".into()))
		}

		Url::parse(&self.url).map_err(|e| Error::Config(format!("Invalid url {}: {}", self.url, e)))
	}
}
