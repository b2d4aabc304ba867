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
	error::Error,
	http_client::{EncodedBody, SendHttpRequest},
};
use reqwest::{Method, StatusCode};
use std::{cell::RefCell, collections::VecDeque};
use url::Url;

/// Request as seen by the HTTP client mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
	pub url: String,
	pub method: String,
	pub body: Option<String>,
}

/// HTTP client mock - to be used in unit tests
///
/// Replies with the scripted `(status code, body)` pairs in order and records every request.
/// Once the script is exhausted, requests fail like an unreachable server would.
#[derive(Default)]
pub struct HttpClientMock {
	responses: RefCell<VecDeque<(u16, String)>>,
	requests: RefCell<Vec<RecordedRequest>>,
}

impl HttpClientMock {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_responses<I, S>(responses: I) -> Self
	where
		I: IntoIterator<Item = (u16, S)>,
		S: Into<String>,
	{
		let mock = Self::new();
		responses.into_iter().for_each(|(status, body)| mock.push_response(status, body));
		mock
	}

	pub fn push_response<S: Into<String>>(&self, status: u16, body: S) {
		self.responses.borrow_mut().push_back((status, body.into()));
	}

	/// All requests sent so far, oldest first.
	pub fn requests(&self) -> Vec<RecordedRequest> {
		self.requests.borrow().clone()
	}

	pub fn request_count(&self) -> usize {
		self.requests.borrow().len()
	}
}

impl SendHttpRequest for HttpClientMock {
	fn send_request(
		&self,
		url: &Url,
		method: Method,
		maybe_body: Option<String>,
	) -> Result<(StatusCode, EncodedBody), Error> {
		self.requests.borrow_mut().push(RecordedRequest {
			url: url.to_string(),
			method: method.to_string(),
			body: maybe_body,
		});

		let (status, body) = self.responses.borrow_mut().pop_front().ok_or(Error::RequestError)?;
		let status_code = StatusCode::from_u16(status).map_err(|_| Error::InvalidValue)?;

		Ok((status_code, body.into_bytes()))
	}
}
