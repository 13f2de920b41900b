//! Module that contains all logic for spawning the "ytdl" command
use std::{
	ffi::OsString,
	path::Path,
	process::{
		Command,
		Output,
		Stdio,
	},
	sync::LazyLock,
};

use regex::Regex;

use crate::error::IOErrorToError;

/// Binary name to spawn for the youtube-dl process, when no explicit path is configured
pub const YTDL_BIN_NAME: &str = "yt-dlp";

/// Resolve which program to invoke for youtube-dl.
/// An explicitly configured path wins, otherwise [`YTDL_BIN_NAME`] is looked up via PATH.
#[must_use]
pub fn resolve_ytdl_bin(custom_path: Option<&Path>) -> OsString {
	return custom_path.map_or_else(|| return OsString::from(YTDL_BIN_NAME), |v| return v.as_os_str().to_owned());
}

/// Create a new ytdl [Command] instance
#[inline]
#[must_use]
pub fn base_ytdl(custom_path: Option<&Path>) -> Command {
	return Command::new(resolve_ytdl_bin(custom_path));
}

/// Test if ytdl is installed and reachable and return the version found.
///
/// This function is not automatically called in the library, it is recommended to run this in any binary trying to run libvidl.
pub fn require_ytdl_installed(custom_path: Option<&Path>) -> Result<String, crate::Error> {
	return match ytdl_version(custom_path) {
		Ok(v) => Ok(v),
		Err(err) => {
			log::error!("Could not start or find youtube-dl! Error: {}", err);

			return Err(crate::Error::custom_ioerror_location(
				std::io::ErrorKind::NotFound,
				"Youtube-DL(p) Version could not be determined, is it installed and reachable?",
				format!("{} in PATH", resolve_ytdl_bin(custom_path).to_string_lossy()),
			));
		},
	};
}

/// Regex to parse the version from a "youtube-dl --version" output
/// cap1: version (date)
static YTDL_VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	return Regex::new(r"(?mi)^(\d{4}\.\d{1,2}\.\d{1,2})").unwrap();
});

/// Get Version of ytdl
#[inline]
pub fn ytdl_version(custom_path: Option<&Path>) -> Result<String, crate::Error> {
	let mut cmd = base_ytdl(custom_path);
	cmd.arg("--version");

	let command_output: Output = cmd
		.stderr(Stdio::null())
		.stdout(Stdio::piped())
		.stdin(Stdio::null())
		.spawn()
		.attach_location_err("ytdl spawn")?
		.wait_with_output()
		.attach_location_err("ytdl wait_with_output")?;

	if !command_output.status.success() {
		return Err(crate::Error::command_unsuccessful("YTDL did not successfully exit!"));
	}

	let as_string = String::from_utf8(command_output.stdout)?;

	return ytdl_parse_version(&as_string);
}

/// Internal Function to parse the input to a ytdl version with regex
#[inline]
fn ytdl_parse_version(input: &str) -> Result<String, crate::Error> {
	return Ok(YTDL_VERSION_REGEX
		.captures_iter(input)
		.next()
		.ok_or_else(|| return crate::Error::no_captures("YTDL Version could not be determined"))?[1]
		.to_owned());
}

#[cfg(test)]
mod test {
	use std::path::PathBuf;

	use super::*;

	#[test]
	fn test_ytdl_parse_version_invalid_input() {
		assert_eq!(
			ytdl_parse_version("hello"),
			Err(crate::Error::no_captures("YTDL Version could not be determined"))
		);
	}

	#[test]
	fn test_ytdl_parse_version_valid_static_input() {
		let ytdl_output = "2021.12.27";

		assert_eq!(ytdl_parse_version(ytdl_output), Ok("2021.12.27".to_owned()));
	}

	#[test]
	fn test_resolve_ytdl_bin() {
		assert_eq!(OsString::from(YTDL_BIN_NAME), resolve_ytdl_bin(None));
		assert_eq!(
			OsString::from("/some/where/yt-dlp"),
			resolve_ytdl_bin(Some(&PathBuf::from("/some/where/yt-dlp")))
		);
	}

	#[test]
	#[ignore = "CI Install not present currently"]
	fn test_ytdl_spawn() {
		assert!(ytdl_version(None).is_ok());
	}
}
