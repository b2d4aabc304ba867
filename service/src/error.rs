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

use rbr_identity_cache::Error as IdentityCacheError;
use rbr_provisioning_client::Error as ProvisioningError;

pub type ServiceResult<T> = Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("{0}")]
	Provisioning(#[from] ProvisioningError),
	#[error("Identity cache: {0}")]
	IdentityCache(#[from] IdentityCacheError),
	#[error("{0}")]
	Io(#[from] std::io::Error),
	#[error("Invalid device type: {0}")]
	InvalidDeviceType(String),
	#[error("Could not determine hardware facts: {0}")]
	HardwareFacts(String),
}
