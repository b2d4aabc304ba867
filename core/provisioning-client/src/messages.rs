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

//! JSON messages exchanged with the registration API. Both operations share one endpoint,
//! the `order` field tells them apart.

use serde::{Deserialize, Serialize};

pub const REGISTER_ORDER: &str = "register";
pub const VERIFY_ORDER: &str = "verify";

pub const REGISTERED_STATUS: &str = "registered";
pub const CLAIMED_STATUS: &str = "claimed";

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RegisterRequest<'a> {
	pub order: &'a str,
	pub cpus: u32,
	pub memory: u64,
	#[serde(rename = "type")]
	pub device_type: u32,
	#[serde(rename = "hash")]
	pub secret: &'a str,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterResponse {
	#[serde(default)]
	pub status: String,
	#[serde(default, rename = "hash")]
	pub secret: String,
	#[serde(default, rename = "uuid")]
	pub identifier: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct VerifyRequest<'a> {
	pub order: &'a str,
	#[serde(rename = "hash")]
	pub secret: &'a str,
	#[serde(rename = "uuid")]
	pub identifier: &'a str,
}

/// `cert` and `nodename` are only sent along with the "claimed" status.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyResponse {
	#[serde(default)]
	pub status: String,
	#[serde(default, rename = "cert")]
	pub certificate: String,
	#[serde(default, rename = "nodename")]
	pub node_name: String,
}
