//! Module for the State Struct for the download command

use std::path::PathBuf;

use libvidl::{
	data::quality::QualitySelector,
	main::download::DownloadOptions,
};

use crate::clap_conf::CliDerive;

/// Struct to keep configuration data for the [`DownloadOptions`] trait
///
/// Owns all of its data so it can be moved onto the download worker thread
#[derive(Debug, PartialEq, Clone)]
pub struct DownloadState {
	/// The URL to be downloaded
	current_url:       String,
	/// The Path to download to
	download_path:     PathBuf,
	/// The quality to request from ytdl
	quality:           QualitySelector,
	/// Treat the url as a playlist
	playlist:          bool,
	/// Directory the ffmpeg binary is in, if not resolvable via PATH
	ffmpeg_location:   Option<PathBuf>,
	/// Path of the ytdl binary to use, if not resolvable via PATH
	ytdl_path:         Option<PathBuf>,
	/// Print youtube-dl stdout as trace logs
	print_command_log: bool,
}

impl DownloadState {
	/// Create a new instance of [`DownloadState`] from the parsed arguments
	pub fn new(main_args: &CliDerive) -> Self {
		return Self {
			current_url:       main_args.url.clone(),
			download_path:     main_args
				.output_path
				.clone()
				.expect("Expected \"check\" to have set a output path"),
			quality:           main_args.quality,
			playlist:          main_args.playlist,
			ffmpeg_location:   main_args.ffmpeg_location.clone(),
			ytdl_path:         main_args.ytdl_path.clone(),
			print_command_log: main_args.print_youtubedl_stdout,
		};
	}
}

impl DownloadOptions for DownloadState {
	fn get_url(&self) -> &str {
		// check against "current_url" still being empty
		assert!(
			!self.current_url.is_empty(),
			"Expected \"current_url\" to not be empty at this point"
		);

		return &self.current_url;
	}

	fn download_path(&self) -> &std::path::Path {
		return self.download_path.as_path();
	}

	fn quality(&self) -> QualitySelector {
		return self.quality;
	}

	fn playlist(&self) -> bool {
		return self.playlist;
	}

	fn ffmpeg_location(&self) -> Option<&std::path::Path> {
		return self.ffmpeg_location.as_deref();
	}

	fn ytdl_path(&self) -> Option<&std::path::Path> {
		return self.ytdl_path.as_deref();
	}

	fn print_command_log(&self) -> bool {
		return self.print_command_log;
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_new_takes_all_options() {
		let tempdir = tempfile::Builder::new()
			.prefix("vidl-test-state-")
			.tempdir()
			.expect("Expected a temp dir to be created");

		let main_args = CliDerive {
			verbosity:              0,
			output_path:            Some(tempdir.as_ref().to_owned()),
			quality:                QualitySelector::MaxHeight(720),
			playlist:               true,
			ffmpeg_location:        Some(PathBuf::from("/opt/ffmpeg/bin")),
			ytdl_path:              Some(PathBuf::from("/opt/yt-dlp/yt-dlp")),
			print_youtubedl_stdout: true,
			explicit_tty:           None,
			force_color:            false,
			url:                    "someURL".to_owned(),
		};

		let state = DownloadState::new(&main_args);

		assert_eq!("someURL", state.get_url());
		assert_eq!(tempdir.as_ref(), state.download_path());
		assert_eq!(QualitySelector::MaxHeight(720), state.quality());
		assert_eq!(true, state.playlist());
		assert_eq!(Some(std::path::Path::new("/opt/ffmpeg/bin")), state.ffmpeg_location());
		assert_eq!(Some(std::path::Path::new("/opt/yt-dlp/yt-dlp")), state.ytdl_path());
		assert_eq!(true, state.print_command_log());
	}

	#[test]
	#[should_panic(expected = "current_url")]
	fn test_get_url_panics_on_empty() {
		let main_args = CliDerive {
			verbosity:              0,
			output_path:            Some(PathBuf::from("/tmp/vidl-out")),
			quality:                QualitySelector::Best,
			playlist:               false,
			ffmpeg_location:        None,
			ytdl_path:              None,
			print_youtubedl_stdout: false,
			explicit_tty:           None,
			force_color:            false,
			url:                    String::new(),
		};

		let state = DownloadState::new(&main_args);

		let _ = state.get_url();
	}
}
