//! Module that contains all logic for spawning the "ffmpeg" command
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

/// Binary name to spawn for the ffmpeg process, when no explicit location is configured
pub const FFMPEG_BIN_NAME: &str = "ffmpeg";

/// Resolve which program to invoke for ffmpeg.
/// "custom_location" is a directory (matching ytdl's "--ffmpeg-location"), otherwise [`FFMPEG_BIN_NAME`] is looked up via PATH.
#[must_use]
pub fn resolve_ffmpeg_bin(custom_location: Option<&Path>) -> OsString {
	return custom_location.map_or_else(
		|| return OsString::from(FFMPEG_BIN_NAME),
		|v| return v.join(FFMPEG_BIN_NAME).into_os_string(),
	);
}

/// Create a new ffmpeg [Command] instance
#[inline]
#[must_use]
pub fn base_ffmpeg(custom_location: Option<&Path>) -> Command {
	let mut cmd = Command::new(resolve_ffmpeg_bin(custom_location));

	// explicitly disable interactive mode
	cmd.arg("-nostdin");

	return cmd;
}

/// Test if ffmpeg is installed and reachable.
/// ytdl needs it for the merge and audio-extraction post-processing steps.
pub fn require_ffmpeg_installed(custom_location: Option<&Path>) -> Result<(), crate::Error> {
	if let Err(err) = ffmpeg_version(custom_location) {
		log::error!("Could not start or find ffmpeg! Error: {}", err);

		return Err(crate::Error::custom_ioerror_location(
			std::io::ErrorKind::NotFound,
			"FFmpeg Version could not be determined, is it installed and reachable?",
			format!("{} in PATH", resolve_ffmpeg_bin(custom_location).to_string_lossy()),
		));
	}

	return Ok(());
}

/// Regex to parse the version from a "ffmpeg -version" output
/// cap1: version
static FFMPEG_VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	return Regex::new(r"(?mi)^ffmpeg version ([a-z0-9.-]+) Copyright").unwrap();
});

/// Get Version of `ffmpeg`
#[inline]
pub fn ffmpeg_version(custom_location: Option<&Path>) -> Result<String, crate::Error> {
	let mut cmd = base_ffmpeg(custom_location);
	cmd.arg("-version");

	let command_output: Output = cmd
		.stderr(Stdio::null())
		.stdout(Stdio::piped())
		.stdin(Stdio::null())
		.spawn()
		.attach_location_err("ffmpeg spawn")?
		.wait_with_output()
		.attach_location_err("ffmpeg wait_with_output")?;

	if !command_output.status.success() {
		return Err(crate::Error::command_unsuccessful("FFMPEG did not successfully exit!"));
	}

	let as_string = String::from_utf8(command_output.stdout)?;

	return ffmpeg_parse_version(&as_string);
}

/// Internal Function to parse the input to a ffmpeg version with regex
#[inline]
fn ffmpeg_parse_version(input: &str) -> Result<String, crate::Error> {
	return Ok(FFMPEG_VERSION_REGEX
		.captures_iter(input)
		.next()
		.ok_or_else(|| return crate::Error::no_captures("FFMPEG Version could not be determined"))?[1]
		.to_owned());
}
