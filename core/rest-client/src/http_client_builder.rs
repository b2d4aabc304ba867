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

use crate::{error::Error, http_client::HttpClient};
use std::time::Duration;

/// Builder for `HttpClient`
#[derive(Default)]
pub struct HttpClientBuilder {
	/// Request timeout
	timeout: Option<Duration>,

	/// Skip validation of the server certificate
	accept_invalid_certs: bool,
}

impl HttpClientBuilder {
	/// Set request timeout
	///
	/// Default is no timeout
	pub fn timeout(mut self, timeout: Duration) -> Self {
		self.timeout = Some(timeout);
		self
	}

	/// Accept any server certificate, including self-signed and expired ones.
	///
	/// Default is no
	pub fn accept_invalid_certs(mut self, value: bool) -> Self {
		self.accept_invalid_certs = value;
		self
	}

	/// Create `HttpClient` with the configuration in this builder
	pub fn build(self) -> Result<HttpClient, Error> {
		HttpClient::new(self.timeout, self.accept_invalid_certs)
	}
}
