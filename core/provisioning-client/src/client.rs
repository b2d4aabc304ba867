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

use crate::{
	error::{Error, Result},
	messages::{
		RegisterRequest, RegisterResponse, VerifyRequest, VerifyResponse, CLAIMED_STATUS,
		REGISTERED_STATUS, REGISTER_ORDER, VERIFY_ORDER,
	},
	types::{ClientConfig, DeviceDescriptor, DeviceStatus},
};
use log::*;
use rbr_rest_client::{
	http_client::{HttpClient, SendHttpRequest},
	http_client_builder::HttpClientBuilder,
	rest_client::RestClient,
	RestPost,
};

/// What the device knows about itself on the API side.
#[derive(Debug, Default)]
struct DeviceIdentity {
	status: DeviceStatus,
	identifier: Option<String>,
	certificate: Option<String>,
	node_name: Option<String>,
}

/// Talks to the registration API on behalf of one device and keeps track of how far
/// the registration has progressed.
pub struct ProvisioningClient<H> {
	rest_client: RestClient<H>,
	descriptor: DeviceDescriptor,
	identity: DeviceIdentity,
}

impl ProvisioningClient<HttpClient> {
	/// Creates a client using a `reqwest` based HTTP client, honouring the
	/// `insecure` and `timeout` settings of the configuration.
	pub fn new(config: ClientConfig) -> Result<Self> {
		let mut builder = HttpClientBuilder::default().accept_invalid_certs(config.insecure);
		if let Some(timeout) = config.timeout {
			builder = builder.timeout(timeout);
		}
		let http_client = builder.build().map_err(Error::Transport)?;

		Self::with_http_client(config, http_client)
	}
}

impl<H> ProvisioningClient<H>
where
	H: SendHttpRequest,
{
	pub fn with_http_client(config: ClientConfig, http_client: H) -> Result<Self> {
		let url = config.validate().map_err(|e| {
			warn!("{}", e);
			e
		})?;

		Ok(ProvisioningClient {
			rest_client: RestClient::new(http_client, url),
			descriptor: config.descriptor,
			identity: DeviceIdentity::default(),
		})
	}

	/// Asks the API for an identifier in exchange for the device secret.
	///
	/// Returns `Ok(None)` while the API has not registered the device yet.
	pub fn register(&mut self) -> Result<Option<String>> {
		if self.identity.status >= DeviceStatus::Registered {
			return Err(Error::AlreadyRegistered)
		}

		let request = RegisterRequest {
			order: REGISTER_ORDER,
			cpus: self.descriptor.cpus,
			memory: self.descriptor.memory,
			device_type: self.descriptor.device_type,
			secret: &self.descriptor.secret,
		};

		debug!(
			"Register request: cpus {}, memory {}, type {}",
			request.cpus, request.memory, request.device_type
		);
		let response: RegisterResponse = self.rest_client.post_capture(&request)?;
		debug!("Register response: status {}, uuid {}", response.status, response.identifier);

		if response.status != REGISTERED_STATUS {
			debug!("Device not registered yet (status: {})", response.status);
			return Ok(None)
		}
		if response.identifier.is_empty() {
			return Err(Error::MissingIdentifier)
		}
		if !response.secret.is_empty() && response.secret != self.descriptor.secret {
			warn!("Register response echoed a different hash");
		}

		info!("Got UUID: {}", response.identifier);
		self.identity.identifier = Some(response.identifier.clone());
		self.identity.status = DeviceStatus::Registered;

		Ok(Some(response.identifier))
	}

	/// Sends the identifier along with the device secret and expects a certificate once
	/// the device has been claimed.
	///
	/// `Ok(())` with `is_claimed() == false` means the device still waits for its claim.
	pub fn verify(&mut self, identifier: &str) -> Result<()> {
		if self.identity.status == DeviceStatus::Claimed {
			return Err(Error::AlreadyClaimed)
		}
		if identifier.is_empty() {
			return Err(Error::Config("UUID not provided".into()))
		}

		let request = VerifyRequest {
			order: VERIFY_ORDER,
			secret: &self.descriptor.secret,
			identifier,
		};

		debug!("Verify request: uuid {}", identifier);
		let response: VerifyResponse = self.rest_client.post_capture(&request)?;
		debug!("Verify response: status {}", response.status);

		match response.status.as_str() {
			REGISTERED_STATUS => {
				debug!("Waiting to be claimed");
				Ok(())
			},
			CLAIMED_STATUS => {
				info!("Device claimed as {}", response.node_name);
				self.identity.identifier = Some(identifier.to_string());
				self.identity.certificate = Some(response.certificate);
				self.identity.node_name = Some(response.node_name);
				self.identity.status = DeviceStatus::Claimed;
				Ok(())
			},
			_ => Err(Error::UnknownStatus(response.status)),
		}
	}

	pub fn status(&self) -> DeviceStatus {
		self.identity.status
	}

	/// A claimed device counts as registered.
	pub fn is_registered(&self) -> bool {
		self.identity.status >= DeviceStatus::Registered
	}

	pub fn is_claimed(&self) -> bool {
		self.identity.status == DeviceStatus::Claimed
	}

	pub fn identifier(&self) -> Option<&str> {
		self.identity.identifier.as_deref()
	}

	/// The certificate exactly as received from the API.
	pub fn certificate(&self) -> Result<&str> {
		self.claimed_field(&self.identity.certificate)
	}

	pub fn node_name(&self) -> Result<&str> {
		self.claimed_field(&self.identity.node_name)
	}

	pub fn http_client(&self) -> &H {
		self.rest_client.http_client()
	}

	fn claimed_field<'a>(&self, field: &'a Option<String>) -> Result<&'a str> {
		match (self.identity.status, field) {
			(DeviceStatus::Claimed, Some(value)) => Ok(value.as_str()),
			_ => Err(Error::NotClaimed),
		}
	}
}
