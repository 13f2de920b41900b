//! Utility functions for the binary

use crate::clap_conf::CliDerive;
use indicatif::{
	ProgressBar,
	ProgressDrawTarget,
};
use std::{
	io::Error as ioError,
	path::{
		Path,
		PathBuf,
	},
};

/// Directory name appended to the platform download directory for the default output path
const DEFAULT_OUT_DIR_NAME: &str = "vidl-out";

/// Map a [`crate::Error`] to a [ioError] for returning out of main
/// The stored backtrace is logged here because the io variant cannot carry it
pub fn error_to_ioerror(err: crate::Error) -> ioError {
	debug!("error backtrace:\n{}", err.get_backtrace());

	return ioError::new(std::io::ErrorKind::Other, err.to_string());
}

/// Helper function to set the progressbar to a draw target if mode is interactive
pub fn set_progressbar(bar: &ProgressBar, main_args: &CliDerive) {
	if main_args.is_interactive() {
		bar.set_draw_target(ProgressDrawTarget::stderr());
	}
}

/// Get the default download directory, creating it if it does not exist yet
/// Falls back to the home directory (or the current directory) with a warning when creation fails
pub fn default_download_dir() -> PathBuf {
	let base = dirs::download_dir()
		.or_else(dirs::home_dir)
		.unwrap_or_else(|| return PathBuf::from("."));
	let dir = base.join(DEFAULT_OUT_DIR_NAME);

	if let Err(err) = std::fs::create_dir_all(&dir) {
		warn!("Could not create default download directory \"{}\": {}", dir.display(), err);

		return dirs::home_dir().unwrap_or_else(|| return PathBuf::from("."));
	}

	return dir;
}

/// Test if Youtube-DL(p) is installed and reachable, including required dependencies like ffmpeg
/// Returns the found youtube-dl version
pub fn require_ytdl_installed(main_args: &CliDerive) -> Result<String, ioError> {
	require_ffmpeg_installed(main_args.ffmpeg_location.as_deref())?;

	return libvidl::spawn::ytdl::require_ytdl_installed(main_args.ytdl_path.as_deref())
		.map_err(|err| return ioError::new(std::io::ErrorKind::NotFound, err.to_string()));
}

/// Test if FFMPEG is installed and reachable
pub fn require_ffmpeg_installed(ffmpeg_location: Option<&Path>) -> Result<(), ioError> {
	return libvidl::spawn::ffmpeg::require_ffmpeg_installed(ffmpeg_location)
		.map_err(|err| return ioError::new(std::io::ErrorKind::NotFound, err.to_string()));
}
