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
use log::*;
use rbr_utils::clean_certificate;
use std::{
	fs::{self, File},
	path::Path,
	process::{Child, Command},
};

/// Stores the certificate, once cleaned from its JSON escaping.
///
/// An empty certificate leaves the file untouched.
pub fn write_certificate(path: &Path, certificate: &str) -> ServiceResult<()> {
	if certificate.is_empty() {
		warn!("Received an empty certificate, not writing {}", path.display());
		return Ok(())
	}

	fs::write(path, clean_certificate(certificate))?;
	debug!("Certificate saved on {}", path.display());
	Ok(())
}

/// Stores the node name if a file has been configured for it.
pub fn write_node_name(path: Option<&Path>, node_name: &str) -> ServiceResult<()> {
	match path {
		Some(path) if !node_name.is_empty() => {
			fs::write(path, node_name)?;
			debug!("Nodename saved on {}", path.display());
		},
		_ => debug!("Nodename not saved"),
	}
	Ok(())
}

/// Starts the finish script with its stdout going to `log_file`. The script is not
/// waited for.
pub fn run_finish_script(script: &Path, log_file: &Path) -> ServiceResult<Child> {
	let log = File::create(log_file)?;
	let child = Command::new(script).stdout(log).spawn()?;

	debug!("Finish script {} started with pid {}", script.display(), child.id());
	Ok(child)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::Error;
	use std::os::unix::fs::PermissionsExt;
	use tempfile::tempdir;

	#[test]
	fn certificate_is_cleaned_before_writing() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("client.pem");

		write_certificate(&path, "\"-----BEGIN-----\\nMIIB\\n-----END-----\"").unwrap();

		assert_eq!(fs::read_to_string(&path).unwrap(), "-----BEGIN-----\nMIIB\n-----END-----");
	}

	#[test]
	fn empty_certificate_is_not_written() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("client.pem");

		write_certificate(&path, "").unwrap();

		assert!(!path.exists());
	}

	#[test]
	fn certificate_write_failure_is_an_error() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("missing").join("client.pem");

		assert!(matches!(write_certificate(&path, "C"), Err(Error::Io(_))));
	}

	#[test]
	fn node_name_is_written_only_when_configured() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("nodename");

		write_node_name(None, "N").unwrap();
		write_node_name(Some(&path), "").unwrap();
		assert!(!path.exists());

		write_node_name(Some(&path), "N").unwrap();
		assert_eq!(fs::read_to_string(&path).unwrap(), "N");
	}

	#[test]
	fn finish_script_output_goes_to_log_file() {
		let dir = tempdir().unwrap();
		let script = dir.path().join("finish.sh");
		let log = dir.path().join("finish.log");
		fs::write(&script, "#!/bin/sh\necho finished\n").unwrap();
		fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

		let mut child = run_finish_script(&script, &log).unwrap();

		assert!(child.wait().unwrap().success());
		assert_eq!(fs::read_to_string(&log).unwrap(), "finished\n");
	}

	#[test]
	fn missing_finish_script_is_an_error() {
		let dir = tempdir().unwrap();

		let result = run_finish_script(&dir.path().join("missing.sh"), &dir.path().join("log"));

		assert!(matches!(result, Err(Error::Io(_))));
	}
}
