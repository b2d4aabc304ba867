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

use rbr_rest_client::error::Error as RestClientError;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid client configuration: {0}")]
	Config(String),
	#[error("This device is already registered")]
	AlreadyRegistered,
	#[error("This device is already claimed")]
	AlreadyClaimed,
	#[error("Device is not yet claimed")]
	NotClaimed,
	#[error("Unknown status: {0}")]
	UnknownStatus(String),
	#[error("Device registered without receiving an UUID")]
	MissingIdentifier,
	#[error("Request failed: {0}")]
	Transport(RestClientError),
	#[error("Could not decode response: {0} ({1})")]
	Decode(serde_json::Error, String),
}

impl Error {
	/// The request did not reach the server or the server refused it.
	pub fn is_transport(&self) -> bool {
		matches!(self, Error::Transport(_))
	}

	pub fn is_decode(&self) -> bool {
		matches!(self, Error::Decode(..))
	}

	/// The server answered something the protocol does not allow, or the operation
	/// does not fit the current registration state.
	pub fn is_protocol(&self) -> bool {
		matches!(
			self,
			Error::AlreadyRegistered |
				Error::AlreadyClaimed |
				Error::NotClaimed |
				Error::UnknownStatus(_) |
				Error::MissingIdentifier
		)
	}
}

impl From<RestClientError> for Error {
	fn from(e: RestClientError) -> Self {
		match e {
			RestClientError::DeserializeParseError(err, body) => Error::Decode(err, body),
			other => Error::Transport(other),
		}
	}
}
