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

//! Blocking JSON REST client, supporting SSL/TLS
//!
//! Every request is a JSON body POSTed to a single base URL, the reply body is
//! decoded from JSON as well.

pub mod error;
pub mod http_client;
pub mod http_client_builder;
pub mod rest_client;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

use crate::error::Error;

/// REST HTTP POST trait
///
/// Provides the POST verb for a JSON REST API
pub trait RestPost {
	/// Make a POST request and capture returned body.
	fn post_capture<T, K>(&self, data: &T) -> Result<K, Error>
	where
		T: serde::Serialize,
		K: serde::de::DeserializeOwned;
}
