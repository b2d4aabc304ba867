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
use rbr_settings::device::DEVICE_TYPE_ALIASES;

/// Maps a device-type alias, or a plain numeric code, to the code sent to the API.
pub fn resolve_device_type(value: &str) -> ServiceResult<u32> {
	if let Some((_, code)) = DEVICE_TYPE_ALIASES.iter().find(|(alias, _)| *alias == value) {
		return Ok(*code)
	}

	match value.trim().parse::<u32>() {
		Ok(code) if code > 0 => Ok(code),
		_ => Err(Error::InvalidDeviceType(value.to_string())),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn aliases_resolve_to_their_codes() {
		assert_eq!(resolve_device_type("ap").unwrap(), 20);
		assert_eq!(resolve_device_type("proxy").unwrap(), 31);
		assert_eq!(resolve_device_type("ips").unwrap(), 32);
		assert_eq!(resolve_device_type("ips-generic").unwrap(), 33);
		assert_eq!(resolve_device_type("exporter").unwrap(), 41);
		assert_eq!(resolve_device_type("intrusion-proxy").unwrap(), 98);
	}

	#[test]
	fn numeric_codes_are_taken_as_is() {
		assert_eq!(resolve_device_type("7").unwrap(), 7);
		assert_eq!(resolve_device_type("32").unwrap(), 32);
	}

	#[test]
	fn unknown_alias_and_zero_are_rejected() {
		for value in ["", "0", "-3", "IPS", "router"] {
			assert!(
				matches!(resolve_device_type(value), Err(Error::InvalidDeviceType(ref v)) if v == value),
				"{} should be rejected",
				value
			);
		}
	}
}
