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

use crate::error::ServiceResult;
use rbr_identity_cache::IdentityCache;

/// Remembers the identifier handed out for a device secret, so that a restarted service
/// does not register the device a second time.
pub trait IdentityStore {
	fn load(&self, secret: &str) -> ServiceResult<Option<String>>;

	fn store(&mut self, secret: &str, identifier: &str) -> ServiceResult<()>;
}

impl IdentityStore for IdentityCache {
	fn load(&self, secret: &str) -> ServiceResult<Option<String>> {
		Ok(IdentityCache::load(self, secret)?)
	}

	fn store(&mut self, secret: &str, identifier: &str) -> ServiceResult<()> {
		Ok(IdentityCache::store(self, secret, identifier)?)
	}
}
