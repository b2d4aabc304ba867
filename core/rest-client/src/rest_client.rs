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

use crate::{error::Error, http_client::SendHttpRequest, RestPost};
use log::*;
use reqwest::Method;
use url::Url;

/// REST client to make JSON POST requests against a single endpoint.
pub struct RestClient<H> {
	http_client: H,
	baseurl: Url,
}

impl<H> RestClient<H>
where
	H: SendHttpRequest,
{
	/// Construct new client on top of the given HTTP client.
	///
	/// Use `HttpClientBuilder` to configure the HTTP client.
	pub fn new(http_client: H, baseurl: Url) -> Self {
		RestClient { http_client, baseurl }
	}

	/// The underlying HTTP client.
	pub fn http_client(&self) -> &H {
		&self.http_client
	}

	fn make_request(&self, method: Method, maybe_body: Option<String>) -> Result<String, Error> {
		let (status_code, encoded_body) =
			self.http_client.send_request(&self.baseurl, method, maybe_body)?;

		// redirects are followed by the HTTP client, anything from 400 on is a failure
		if status_code.is_client_error() || status_code.is_server_error() {
			let reason = String::from(status_code.canonical_reason().unwrap_or("none"));
			return Err(Error::HttpError(status_code.as_u16(), reason))
		}

		let body = String::from_utf8_lossy(&encoded_body).to_string();

		trace!("response status: {}", status_code);
		trace!("response body: {}", body);
		Ok(body)
	}
}

impl<H> RestPost for RestClient<H>
where
	H: SendHttpRequest,
{
	/// Make a POST request and capture returned body.
	fn post_capture<T, K>(&self, data: &T) -> Result<K, Error>
	where
		T: serde::Serialize,
		K: serde::de::DeserializeOwned,
	{
		let data = serde_json::to_string(data).map_err(Error::SerializeParseError)?;

		let body = self.make_request(Method::POST, Some(data))?;
		serde_json::from_str(body.as_str()).map_err(|err| Error::DeserializeParseError(err, body))
	}
}
