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

//! Persistent mapping from a device secret to the identifier the registration API
//! handed out for it, so a restarted device does not register a second time.

mod cache;
mod error;

pub use cache::{CacheEntry, IdentityCache, DEVICES_COLUMN_FAMILY};
pub use error::{Error, Result};
