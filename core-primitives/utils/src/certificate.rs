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

//! String hygiene for the certificate handed out by the registration API.
//!
//! The API transports the PEM text with escaped line breaks and, depending on the
//! server version, wrapped in quotes. Nothing here looks into the certificate itself.

/// Converts literal `\n` sequences into line breaks and removes every double quote.
pub fn clean_certificate(raw: &str) -> String {
	raw.replace("\\n", "\n").replace('"', "")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn escaped_line_breaks_are_converted() {
		let raw = "-----BEGIN CERTIFICATE-----\\nMIIB\\n-----END CERTIFICATE-----";

		assert_eq!(
			clean_certificate(raw),
			"-----BEGIN CERTIFICATE-----\nMIIB\n-----END CERTIFICATE-----"
		);
	}

	#[test]
	fn quotes_are_stripped() {
		assert_eq!(clean_certificate("\"a\\nb\""), "a\nb");
	}

	#[test]
	fn real_line_breaks_are_kept() {
		assert_eq!(clean_certificate("a\nb"), "a\nb");
	}

	#[test]
	fn empty_certificate_stays_empty() {
		assert_eq!(clean_certificate(""), "");
	}
}
