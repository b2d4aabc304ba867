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

//! Client side of the device registration protocol.
//!
//! A device first trades its secret (the "hash") and its hardware facts for an identifier
//! (`register`), then polls with that identifier until an operator has claimed it
//! (`verify`). The claim hands out a client certificate and a node name.
//!
//! Both operations are single blocking requests. Responses that mean "not yet" are not
//! errors, it is up to the caller to retry them.

pub mod client;
pub mod error;
pub mod messages;
pub mod types;

pub use client::ProvisioningClient;
pub use error::{Error, Result};
pub use types::{ClientConfig, DeviceDescriptor, DeviceStatus};
