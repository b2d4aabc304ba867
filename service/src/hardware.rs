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

use crate::error::{Error, ServiceResult};
use log::*;
use rbr_provisioning_client::DeviceDescriptor;
use std::{convert::TryFrom, fs, path::PathBuf, thread};

#[cfg(test)]
use mockall::*;

static PROC_MEMINFO: &str = "/proc/meminfo";

/// Hardware facts reported to the API when registering.
#[cfg_attr(test, automock)]
pub trait HardwareFacts {
	fn cpu_count(&self) -> ServiceResult<u32>;

	/// total memory in kB
	fn memory_size(&self) -> ServiceResult<u64>;
}

/// Reads the hardware facts of the machine the service runs on.
pub struct SystemHardwareFacts {
	meminfo: PathBuf,
}

impl Default for SystemHardwareFacts {
	fn default() -> Self {
		Self::with_meminfo(PROC_MEMINFO)
	}
}

impl SystemHardwareFacts {
	/// Reads the memory size from a meminfo formatted file other than `/proc/meminfo`.
	pub fn with_meminfo<P: Into<PathBuf>>(meminfo: P) -> Self {
		SystemHardwareFacts { meminfo: meminfo.into() }
	}
}

impl HardwareFacts for SystemHardwareFacts {
	fn cpu_count(&self) -> ServiceResult<u32> {
		let cpus = thread::available_parallelism()?.get();
		u32::try_from(cpus).map_err(|_| Error::HardwareFacts(format!("{} CPUs", cpus)))
	}

	fn memory_size(&self) -> ServiceResult<u64> {
		let meminfo = fs::read_to_string(&self.meminfo)?;
		parse_mem_total(&meminfo).ok_or_else(|| {
			Error::HardwareFacts(format!("no MemTotal in {}", self.meminfo.display()))
		})
	}
}

fn parse_mem_total(meminfo: &str) -> Option<u64> {
	meminfo
		.lines()
		.find_map(|line| line.strip_prefix("MemTotal:"))
		.and_then(|value| value.split_whitespace().next())
		.and_then(|kb| kb.parse().ok())
}

/// Collects everything the register request needs to know about this device.
pub fn device_descriptor<F: HardwareFacts>(
	facts: &F,
	device_type: u32,
	secret: &str,
) -> ServiceResult<DeviceDescriptor> {
	let descriptor = DeviceDescriptor {
		cpus: facts.cpu_count()?,
		memory: facts.memory_size()?,
		device_type,
		secret: secret.to_string(),
	};

	debug!(
		"CPUs: {}, memory: {} kB, device type: {}",
		descriptor.cpus, descriptor.memory, descriptor.device_type
	);
	Ok(descriptor)
}

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::tempdir;

	const MEMINFO: &str = "MemTotal:       16318412 kB\n\
		MemFree:         1795344 kB\n\
		MemAvailable:    9456112 kB\n";

	#[test]
	fn mem_total_is_parsed_in_kb() {
		assert_eq!(parse_mem_total(MEMINFO), Some(16318412));
	}

	#[test]
	fn missing_mem_total_is_none() {
		assert_eq!(parse_mem_total("MemFree: 1795344 kB\n"), None);
		assert_eq!(parse_mem_total("MemTotal: lots\n"), None);
	}

	#[test]
	fn system_facts_read_the_meminfo_file() {
		let dir = tempdir().unwrap();
		let meminfo = dir.path().join("meminfo");
		fs::write(&meminfo, MEMINFO).unwrap();

		let facts = SystemHardwareFacts::with_meminfo(&meminfo);

		assert_eq!(facts.memory_size().unwrap(), 16318412);
		assert!(facts.cpu_count().unwrap() > 0);
	}

	#[test]
	fn unreadable_meminfo_is_an_error() {
		let dir = tempdir().unwrap();
		let facts = SystemHardwareFacts::with_meminfo(dir.path().join("missing"));

		assert!(matches!(facts.memory_size(), Err(Error::Io(_))));
	}

	#[test]
	fn descriptor_combines_facts_with_device_settings() {
		let mut facts = MockHardwareFacts::new();
		facts.expect_cpu_count().times(1).returning(|| Ok(4));
		facts.expect_memory_size().times(1).returning(|| Ok(2048));

		let descriptor = device_descriptor(&facts, 32, "abc").unwrap();

		assert_eq!(
			descriptor,
			DeviceDescriptor { cpus: 4, memory: 2048, device_type: 32, secret: "abc".to_string() }
		);
	}

	#[test]
	fn failing_facts_yield_no_descriptor() {
		let mut facts = MockHardwareFacts::new();
		facts.expect_cpu_count().returning(|| Ok(4));
		facts
			.expect_memory_size()
			.returning(|| Err(Error::HardwareFacts("no MemTotal".to_string())));

		assert!(matches!(device_descriptor(&facts, 32, "abc"), Err(Error::HardwareFacts(_))));
	}
}
