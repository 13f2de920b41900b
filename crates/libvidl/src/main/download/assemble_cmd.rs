use std::ffi::OsString;

use crate::error::IOErrorToError as _;

use super::download_options::DownloadOptions;

/// Output file template for single media downloads
const OUTPUT_TEMPLATE_SINGLE: &str = "%(title)s.%(ext)s";
/// Output file template for playlist downloads, prefixed with the playlist index
const OUTPUT_TEMPLATE_PLAYLIST: &str = "%(playlist_index)s - %(title)s.%(ext)s";

/// Internal Struct for easily adding various types that resolve to [`OsString`] and output a [`Vec<OsString>`]
/// exists because [std::process::Command] is too overkill to use for a argument collection for having to use [duct] later
#[derive(Debug)]
struct ArgsHelper(Vec<OsString>);
impl ArgsHelper {
	/// Create a new instance of ArgsHelper
	pub fn new() -> Self {
		return Self(Vec::default());
	}

	/// Add a new Argument to the list, added at the end and converted to a [`OsString`]
	/// Returns the input reference to "self" for chaining
	pub fn arg<U>(&mut self, arg: U) -> &mut Self
	where
		U: Into<OsString>,
	{
		self.0.push(arg.into());

		return self;
	}

	/// Convert Self to the inner value
	/// Consumes self
	pub fn into_inner(self) -> Vec<OsString> {
		return self.0;
	}
}

impl From<ArgsHelper> for Vec<OsString> {
	fn from(v: ArgsHelper) -> Self {
		return v.into_inner();
	}
}

/// Helper Function to assemble all ytdl command arguments
/// Returns a list of arguments for yt-dlp in order
///
/// Also ensures the download directory exists.
#[inline]
pub fn assemble_ytdl_command<A: DownloadOptions>(options: &A) -> Result<Vec<OsString>, crate::Error> {
	let mut ytdl_args = ArgsHelper::new();

	let output_dir = options.download_path();
	debug!("YTDL Output dir is \"{}\"", output_dir.to_string_lossy());

	// "create_dir_all" would also error on this, but with a less helpful message
	if output_dir.exists() && !output_dir.is_dir() {
		return Err(crate::Error::not_a_directory(
			"Download path exists but is not a directory",
			output_dir,
		));
	}

	std::fs::create_dir_all(output_dir).attach_path_err(output_dir)?;

	// tell ytdl where ffmpeg is, if it is not resolvable via PATH
	if let Some(ffmpeg_location) = options.ffmpeg_location() {
		ytdl_args.arg("--ffmpeg-location").arg(ffmpeg_location);
	}

	let quality = options.quality();

	// set the format that should be downloaded
	ytdl_args.arg("-f").arg(quality.format_expression());

	// apply options to make output audio-only
	if quality.is_audio_only() {
		// set ytdl to always extract the audio, if it is not already audio-only
		ytdl_args.arg("-x");
		// set the output audio format
		ytdl_args.arg("--audio-format").arg("mp3");
	}

	// set the output path template for ytdl
	let output_template = if options.playlist() {
		OUTPUT_TEMPLATE_PLAYLIST
	} else {
		OUTPUT_TEMPLATE_SINGLE
	};
	ytdl_args.arg("-o").arg(output_dir.join(output_template));

	// ensure ytdl is printing progress reports
	ytdl_args.arg("--progress");
	// ensure ytdl prints the progress reports on a new line
	ytdl_args.arg("--newline");

	// apply the url to download
	ytdl_args.arg(options.get_url());

	// make the playlist handling explicit in both directions
	if options.playlist() {
		ytdl_args.arg("--yes-playlist");
	} else {
		ytdl_args.arg("--no-playlist");
	}

	return Ok(ytdl_args.into());
}
