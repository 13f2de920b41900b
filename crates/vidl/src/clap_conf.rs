//! Module for Clap related structs (derived)

#![deny(missing_docs)] // comments are used for "--help" generation, so it should always be defined

use clap::Parser;
use libvidl::data::quality::QualitySelector;
use std::path::PathBuf;

/// Trait to check and transform all Command Structures
trait Check {
	/// Check and transform self to be correct
	fn check(&mut self) -> Result<(), crate::Error>;
}

#[derive(Debug, Parser, Clone, PartialEq)]
#[command(author, version = env!("VIDL_VERSION"), about, long_about = None)]
#[command(bin_name("vidl"))]
#[command(args_override_self(true))] // specifying a argument multiple times overwrites the earlier ones
#[command(disable_help_subcommand(true))] // Disable subcommand "help", only "-h --help" should be used
pub struct CliDerive {
	/// Set Logging verbosity (0 - Default - WARN, 1 - INFO, 2 - DEBUG, 3 - TRACE)
	#[arg(short, long, action = clap::ArgAction::Count, env = "VIDL_VERBOSITY")]
	pub verbosity: u8,
	/// Directory to place downloaded files in, defaults to the platform download directory plus "vidl-out"
	#[arg(short, long = "output", env = "VIDL_OUT")]
	pub output_path: Option<PathBuf>,
	/// Quality to request, "best", "audio" or a height cap like "720p"
	#[arg(short, long, default_value = "best", env = "VIDL_QUALITY")]
	pub quality: QualitySelector,
	/// Treat the URL as a playlist, prefixing file names with the playlist index
	#[arg(short, long)]
	pub playlist: bool,
	/// Directory the ffmpeg binary is in, for when ffmpeg is not resolvable via PATH
	#[arg(long = "ffmpeg-location", env = "VIDL_FFMPEG_LOCATION")]
	pub ffmpeg_location: Option<PathBuf>,
	/// Path of the yt-dlp binary to use, for when yt-dlp is not resolvable via PATH
	#[arg(long = "ytdl-path", env = "VIDL_YTDL_PATH")]
	pub ytdl_path: Option<PathBuf>,
	/// Print yt-dlp stdout
	/// This will still require logging verbosity set to 3 or "RUST_LOG=trace"
	#[arg(long = "youtubedl-stdout")]
	pub print_youtubedl_stdout: bool,
	/// Explicitly set interactive / not interactive
	#[arg(long = "interactive")]
	pub explicit_tty: Option<bool>,
	/// Force Color to be active in any mode
	#[arg(long = "color")]
	pub force_color: bool,

	/// The URL to download
	pub url: String,
}

impl CliDerive {
	/// Execute clap::Parser::parse and apply custom validation and transformation logic
	pub fn custom_parse() -> Result<Self, crate::Error> {
		let mut parsed = Self::parse();

		Check::check(&mut parsed)?;

		return Ok(parsed);
	}

	/// Get if the mode is interactive or not
	#[must_use]
	pub fn is_interactive(&self) -> bool {
		if let Some(explicit) = self.explicit_tty {
			return explicit;
		}

		use is_terminal::IsTerminal as _;

		return std::io::stdout().is_terminal() && std::io::stdin().is_terminal();
	}

	/// Get if the colors are enabled or not
	#[must_use]
	pub fn enable_colors(&self) -> bool {
		return self.force_color | self.is_interactive();
	}
}

impl Check for CliDerive {
	fn check(&mut self) -> Result<(), crate::Error> {
		self.url = self.url.trim().to_owned();

		if self.url.is_empty() {
			return Err(crate::Error::other("A URL to download is required"));
		}

		if self.output_path.is_none() {
			self.output_path = Some(crate::utils::default_download_dir());
		}

		return Ok(());
	}
}

#[cfg(test)]
mod test {
	use super::*;

	/// Get a default instance for testing, with a output path set so "check" does not touch the filesystem
	fn default_cli(url: &str) -> CliDerive {
		return CliDerive {
			verbosity:              0,
			output_path:            Some(PathBuf::from("/tmp/vidl-out")),
			quality:                QualitySelector::Best,
			playlist:               false,
			ffmpeg_location:        None,
			ytdl_path:              None,
			print_youtubedl_stdout: false,
			explicit_tty:           None,
			force_color:            false,
			url:                    url.to_owned(),
		};
	}

	#[test]
	fn test_check_keeps_valid_input() {
		let init_default = default_cli("https://youtube.com/watch?v=-----------");

		let mut cloned = init_default.clone();
		assert!(cloned.check().is_ok());
		assert_eq!(init_default, cloned);
	}

	#[test]
	fn test_check_trims_url() {
		let mut args = default_cli("  https://youtube.com/watch?v=-----------  ");

		assert!(args.check().is_ok());
		assert_eq!("https://youtube.com/watch?v=-----------", args.url);
	}

	#[test]
	fn test_check_rejects_empty_url() {
		let mut args = default_cli("   ");

		let err = args.check().expect_err("Expected a empty url to be rejected");
		assert_eq!(crate::Error::other("A URL to download is required"), err);
	}

	#[test]
	fn test_is_interactive_explicit() {
		let mut explicit_disable = default_cli("someURL");
		explicit_disable.explicit_tty = Some(false);

		assert_eq!(false, explicit_disable.is_interactive());

		let mut explicit_enable = default_cli("someURL");
		explicit_enable.explicit_tty = Some(true);

		assert_eq!(true, explicit_enable.is_interactive());
	}

	#[test]
	fn test_enable_colors_forced() {
		let mut forced = default_cli("someURL");
		forced.explicit_tty = Some(false);
		forced.force_color = true;

		assert_eq!(true, forced.enable_colors());
	}

	#[test]
	fn test_enable_colors_interactive() {
		let mut explicit_disable = default_cli("someURL");
		explicit_disable.explicit_tty = Some(false);

		assert_eq!(false, explicit_disable.enable_colors());

		let mut explicit_enable = default_cli("someURL");
		explicit_enable.explicit_tty = Some(true);

		assert_eq!(true, explicit_enable.enable_colors());
	}
}
