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

use crate::error::{Error, Result};
use codec::{Decode, Encode};
use log::*;
use rocksdb::{ColumnFamily, IteratorMode, Options, DB};
use std::path::Path;

/// Identity cache DB structure:
/// DEVICES_COLUMN_FAMILY: encoded hash -> CacheEntry (hash, UUID)
pub const DEVICES_COLUMN_FAMILY: &str = "devices";

/// A device secret together with the identifier obtained for it.
#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
	pub secret: String,
	pub identifier: String,
}

/// Interface struct to rocks DB
///
/// Entries are written once and never updated. A single process is expected to own the
/// database, RocksDB refuses a second concurrent opener.
pub struct IdentityCache {
	db: DB,
}

impl IdentityCache {
	/// Opens the cache at the given location, creating the database and the devices
	/// column family on first use.
	pub fn open<P: AsRef<Path>>(path: P) -> Result<IdentityCache> {
		let mut options = Options::default();
		options.create_if_missing(true);
		options.create_missing_column_families(true);

		let db = DB::open_cf(&options, path.as_ref(), [DEVICES_COLUMN_FAMILY])?;
		let cache = IdentityCache { db };
		cache.devices()?;

		debug!("Opened identity cache at {:?}", path.as_ref());
		Ok(cache)
	}

	/// Scans all entries for the given secret. Absence is not an error.
	pub fn load(&self, secret: &str) -> Result<Option<String>> {
		let devices = self.devices()?;

		for item in self.db.iterator_cf(devices, IteratorMode::Start) {
			let (_, encoded_entry) = item?;
			let entry = CacheEntry::decode(&mut encoded_entry.as_ref())?;

			if entry.secret == secret {
				debug!("Loaded UUID from DB: {}", entry.identifier);
				return Ok(Some(entry.identifier))
			}
		}

		Ok(None)
	}

	/// Inserts a new entry, fails if the secret is already present.
	pub fn store(&mut self, secret: &str, identifier: &str) -> Result<()> {
		let devices = self.devices()?;
		let key = secret.encode();

		if self.db.get_pinned_cf(devices, &key)?.is_some() {
			return Err(Error::DuplicateSecret(secret.to_string()))
		}

		let entry = CacheEntry { secret: secret.to_string(), identifier: identifier.to_string() };
		self.db.put_cf(devices, key, entry.encode())?;

		info!("Stored UUID on DB: {}", identifier);
		Ok(())
	}

	/// Flushes pending writes and releases the database.
	pub fn close(self) -> Result<()> {
		let devices = self.devices()?;
		self.db.flush_cf(devices)?;
		Ok(())
	}

	fn devices(&self) -> Result<&ColumnFamily> {
		self.db
			.cf_handle(DEVICES_COLUMN_FAMILY)
			.ok_or(Error::MissingColumnFamily(DEVICES_COLUMN_FAMILY))
	}
}
