//! Module for the [`DownloadOptions`] trait

use std::path::Path;

use crate::data::quality::QualitySelector;

/// Options provided by the caller of a download operation.
/// The front-end implements this on its own state type.
pub trait DownloadOptions {
	/// Get the url to download
	fn get_url(&self) -> &str;

	/// Get the directory downloaded files should be placed in.
	/// The directory is created if it does not exist yet.
	fn download_path(&self) -> &Path;

	/// Get the quality to request from yt-dlp
	fn quality(&self) -> QualitySelector;

	/// Get whether the url should be treated as a playlist
	fn playlist(&self) -> bool;

	/// Get the directory the ffmpeg binary is in, if not resolved via PATH
	fn ffmpeg_location(&self) -> Option<&Path>;

	/// Get the path of the yt-dlp binary to use, if not resolved via PATH
	fn ytdl_path(&self) -> Option<&Path>;

	/// Get whether the lines yt-dlp outputs should be logged
	fn print_command_log(&self) -> bool;
}
