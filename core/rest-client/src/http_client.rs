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

use crate::error::Error;
use log::*;
use reqwest::{
	blocking::Client,
	header::{HeaderValue, CONTENT_TYPE},
	Method, StatusCode,
};
use std::time::Duration;
use url::Url;

pub type EncodedBody = Vec<u8>;

/// Simple trait to send HTTP request, based on the blocking `reqwest` client.
///
/// Automatically upgrades to TLS in case the URL contains 'https'
pub trait SendHttpRequest {
	fn send_request(
		&self,
		url: &Url,
		method: Method,
		maybe_body: Option<String>,
	) -> Result<(StatusCode, EncodedBody), Error>;
}

/// HTTP client implementation
///
/// wrapper for the `reqwest` library that adds the JSON headers and body to a request
pub struct HttpClient {
	client: Client,
}

impl HttpClient {
	pub fn new(timeout: Option<Duration>, accept_invalid_certs: bool) -> Result<Self, Error> {
		let pkg_version = env!("CARGO_PKG_VERSION");

		// the blocking client would otherwise fall back to its own 30s default
		let mut builder = Client::builder()
			.user_agent(format!("rb-register/{}", pkg_version))
			.danger_accept_invalid_certs(accept_invalid_certs)
			.timeout(timeout);

		if let Some(timeout) = timeout {
			builder = builder.connect_timeout(timeout);
		}

		if accept_invalid_certs {
			warn!("TLS certificate validation is disabled");
		}

		let client = builder.build().map_err(Error::HttpClientError)?;
		Ok(HttpClient { client })
	}
}

impl SendHttpRequest for HttpClient {
	fn send_request(
		&self,
		url: &Url,
		method: Method,
		maybe_body: Option<String>,
	) -> Result<(StatusCode, EncodedBody), Error> {
		trace!("url: {}", url);

		let mut request = self.client.request(method, url.clone());

		if let Some(body) = maybe_body {
			trace!("set request body: {}", body);
			request = request
				.header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
				.body(body);
		} else {
			debug!("no body to send");
		}

		let response = request.send().map_err(map_send_error)?;
		let status_code = response.status();
		let encoded_body = response.bytes().map_err(map_send_error)?.to_vec();

		Ok((status_code, encoded_body))
	}
}

fn map_send_error(e: reqwest::Error) -> Error {
	if e.is_timeout() {
		Error::TimeoutError
	} else {
		Error::ReqwestError(e)
	}
}
