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

//! Drives a device from unknown to claimed, retrying every "not yet" answer of the API
//! after a fixed interval.

use crate::{error::ServiceResult, identity_store::IdentityStore, shutdown::ShutdownSignal};
use log::*;
use rbr_provisioning_client::ProvisioningClient;
use rbr_rest_client::http_client::SendHttpRequest;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisioningOutcome {
	Claimed { certificate: String, node_name: String },
	Interrupted,
}

/// Retry settings shared by the registration and the verification loop.
pub struct Retry<'a> {
	pub interval: Duration,
	pub shutdown: &'a ShutdownSignal,
}

impl Retry<'_> {
	/// Sleeps until the next attempt, returns false if the operator interrupted us.
	fn pause(&self, reason: &str) -> bool {
		info!("{}, next attempt in {}s", reason, self.interval.as_secs());
		!self.shutdown.wait(self.interval)
	}
}

/// Obtains the identifier of the device, from the store if it is known already,
/// otherwise by registering until the API hands one out.
///
/// A freshly obtained identifier is persisted before it is returned. `None` means
/// the loop has been interrupted.
pub fn registration_process<H, S>(
	client: &mut ProvisioningClient<H>,
	mut store: Option<&mut S>,
	secret: &str,
	retry: &Retry,
) -> ServiceResult<Option<String>>
where
	H: SendHttpRequest,
	S: IdentityStore,
{
	if let Some(store) = store.as_mut() {
		if let Some(identifier) = store.load(secret)? {
			info!("Device already registered with UUID {}", identifier);
			return Ok(Some(identifier))
		}
	}

	loop {
		if let Some(identifier) = client.register()? {
			if let Some(store) = store.as_mut() {
				store.store(secret, &identifier)?;
			}
			return Ok(Some(identifier))
		}

		if !retry.pause("Device not registered yet") {
			return Ok(None)
		}
	}
}

/// Verifies the identifier until the device has been claimed. Returns false if
/// the loop has been interrupted.
pub fn verification_process<H>(
	client: &mut ProvisioningClient<H>,
	identifier: &str,
	retry: &Retry,
) -> ServiceResult<bool>
where
	H: SendHttpRequest,
{
	loop {
		client.verify(identifier)?;
		if client.is_claimed() {
			return Ok(true)
		}

		if !retry.pause("Device not claimed yet") {
			return Ok(false)
		}
	}
}

pub fn provision<H, S>(
	client: &mut ProvisioningClient<H>,
	store: Option<&mut S>,
	secret: &str,
	retry: &Retry,
) -> ServiceResult<ProvisioningOutcome>
where
	H: SendHttpRequest,
	S: IdentityStore,
{
	let identifier = match registration_process(client, store, secret, retry)? {
		Some(identifier) => identifier,
		None => return Ok(ProvisioningOutcome::Interrupted),
	};

	if !verification_process(client, &identifier, retry)? {
		return Ok(ProvisioningOutcome::Interrupted)
	}

	Ok(ProvisioningOutcome::Claimed {
		certificate: client.certificate()?.to_string(),
		node_name: client.node_name()?.to_string(),
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{error::Error, identity_store::tests::MemoryIdentityStore};
	use rbr_provisioning_client::{ClientConfig, DeviceDescriptor, Error as ProvisioningError};
	use rbr_rest_client::mocks::http_client_mock::HttpClientMock;

	const SECRET: &str = "abc";
	const UNREGISTERED: &str = r#"{"status":"unregistered"}"#;
	const REGISTERED_U1: &str = r#"{"status":"registered","hash":"abc","uuid":"u1"}"#;
	const PENDING_CLAIM: &str = r#"{"status":"registered"}"#;
	const CLAIMED: &str = r#"{"status":"claimed","cert":"C","nodename":"N"}"#;

	fn client(responses: Vec<(u16, &str)>) -> ProvisioningClient<HttpClientMock> {
		let config = ClientConfig {
			url: "https://example.com/api".to_string(),
			descriptor: DeviceDescriptor {
				cpus: 2,
				memory: 1024,
				device_type: 32,
				secret: SECRET.to_string(),
			},
			insecure: false,
			timeout: None,
		};
		ProvisioningClient::with_http_client(config, HttpClientMock::with_responses(responses))
			.unwrap()
	}

	fn retry(shutdown: &ShutdownSignal) -> Retry {
		Retry { interval: Duration::from_millis(1), shutdown }
	}

	fn claimed() -> ProvisioningOutcome {
		ProvisioningOutcome::Claimed { certificate: "C".to_string(), node_name: "N".to_string() }
	}

	fn request_bodies(client: &ProvisioningClient<HttpClientMock>) -> Vec<String> {
		client.http_client().requests().into_iter().filter_map(|r| r.body).collect()
	}

	#[test]
	fn cached_identifier_skips_registration() {
		let (_sender, shutdown) = ShutdownSignal::channel();
		let mut store = MemoryIdentityStore::with_entry(SECRET, "u1");
		let mut client = client(vec![(200, CLAIMED)]);

		let outcome = provision(&mut client, Some(&mut store), SECRET, &retry(&shutdown)).unwrap();

		assert_eq!(outcome, claimed());
		let bodies = request_bodies(&client);
		assert_eq!(bodies.len(), 1);
		assert!(bodies[0].contains(r#""order":"verify""#));
		assert!(bodies[0].contains(r#""uuid":"u1""#));
	}

	#[test]
	fn registration_is_retried_and_persisted() {
		let (_sender, shutdown) = ShutdownSignal::channel();
		let mut store = MemoryIdentityStore::default();
		let mut client = client(vec![
			(200, UNREGISTERED),
			(200, UNREGISTERED),
			(200, REGISTERED_U1),
			(200, PENDING_CLAIM),
			(200, CLAIMED),
		]);

		let outcome = provision(&mut client, Some(&mut store), SECRET, &retry(&shutdown)).unwrap();

		assert_eq!(outcome, claimed());
		assert_eq!(store.entries.get(SECRET).map(String::as_str), Some("u1"));
		assert_eq!(client.http_client().request_count(), 5);
	}

	#[test]
	fn provisioning_works_without_store() {
		let (_sender, shutdown) = ShutdownSignal::channel();
		let mut client = client(vec![(200, REGISTERED_U1), (200, CLAIMED)]);

		let outcome =
			provision(&mut client, None::<&mut MemoryIdentityStore>, SECRET, &retry(&shutdown))
				.unwrap();

		assert_eq!(outcome, claimed());
		assert_eq!(client.identifier(), Some("u1"));
	}

	#[test]
	fn interrupt_stops_registration_without_further_requests() {
		let (sender, shutdown) = ShutdownSignal::channel();
		sender.send(()).unwrap();
		let mut client = client(vec![(200, UNREGISTERED), (200, REGISTERED_U1)]);

		let outcome =
			provision(&mut client, None::<&mut MemoryIdentityStore>, SECRET, &retry(&shutdown))
				.unwrap();

		assert_eq!(outcome, ProvisioningOutcome::Interrupted);
		assert_eq!(client.http_client().request_count(), 1);
	}

	#[test]
	fn interrupt_stops_verification_without_further_requests() {
		let (sender, shutdown) = ShutdownSignal::channel();
		sender.send(()).unwrap();
		let mut store = MemoryIdentityStore::with_entry(SECRET, "u1");
		let mut client = client(vec![(200, PENDING_CLAIM), (200, CLAIMED)]);

		let outcome = provision(&mut client, Some(&mut store), SECRET, &retry(&shutdown)).unwrap();

		assert_eq!(outcome, ProvisioningOutcome::Interrupted);
		assert_eq!(client.http_client().request_count(), 1);
	}

	#[test]
	fn server_error_halts_provisioning() {
		let (_sender, shutdown) = ShutdownSignal::channel();
		let mut client = client(vec![(500, "oops"), (200, REGISTERED_U1)]);

		let result =
			provision(&mut client, None::<&mut MemoryIdentityStore>, SECRET, &retry(&shutdown));

		match result {
			Err(Error::Provisioning(e)) => assert!(e.is_transport()),
			other => panic!("unexpected outcome: {:?}", other),
		}
		assert_eq!(client.http_client().request_count(), 1);
	}

	#[test]
	fn unknown_verify_status_halts_provisioning() {
		let (_sender, shutdown) = ShutdownSignal::channel();
		let mut store = MemoryIdentityStore::with_entry(SECRET, "u1");
		let mut client = client(vec![(200, r#"{"status":"banned"}"#)]);

		let result = provision(&mut client, Some(&mut store), SECRET, &retry(&shutdown));

		assert!(matches!(
			result,
			Err(Error::Provisioning(ProvisioningError::UnknownStatus(ref status))) if status == "banned"
		));
	}

	#[test]
	fn failing_store_halts_provisioning() {
		let (_sender, shutdown) = ShutdownSignal::channel();
		let mut store = MemoryIdentityStore { read_only: true, ..Default::default() };
		let mut client = client(vec![(200, REGISTERED_U1), (200, CLAIMED)]);

		let result = provision(&mut client, Some(&mut store), SECRET, &retry(&shutdown));

		assert!(matches!(result, Err(Error::Io(_))));
		assert_eq!(client.http_client().request_count(), 1);
	}

	#[test]
	fn verification_is_retried_until_claimed() {
		let (_sender, shutdown) = ShutdownSignal::channel();
		let mut client = client(vec![(200, PENDING_CLAIM), (200, PENDING_CLAIM), (200, CLAIMED)]);

		assert!(verification_process(&mut client, "u1", &retry(&shutdown)).unwrap());
		assert_eq!(client.http_client().request_count(), 3);
		assert_eq!(client.certificate().unwrap(), "C");
		assert_eq!(client.node_name().unwrap(), "N");
	}
}
