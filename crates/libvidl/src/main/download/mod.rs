//! Module for running yt-dlp downloads

use assemble_cmd::assemble_ytdl_command;
use parse_linetype::LineType;
use std::{
	io::{
		BufRead,
		BufReader,
	},
	time::Duration,
};

use crate::{
	cancel::CancelToken,
	error::IOErrorToError,
	spawn::ytdl::resolve_ytdl_bin,
};

pub use download_options::DownloadOptions;

mod assemble_cmd;
mod download_options;
mod parse_linetype;

/// Status message for a successfully finished download
pub const SUCCESS_MESSAGE: &str = "Download completed successfully!";
/// Status message for a canceled download
pub const CANCELED_MESSAGE: &str = "Download canceled.";
/// Status message for the audio extraction post-processing phase
pub const PHASE_EXTRACTING_AUDIO: &str = "Extracting audio...";
/// Status message for the stream merging post-processing phase
pub const PHASE_MERGING: &str = "Merging video and audio...";

/// Enum for relaying what is currently happening in a download
/// The [`DownloadProgress::Finished`] variant is emitted exactly once per download and always last
#[derive(Debug, Clone, PartialEq)]
pub enum DownloadProgress {
	/// Variant representing a new textual status for the current phase
	/// values: (status text)
	Phase(String),
	/// Variant representing that the download percentage has changed
	/// always emitted directly after the [`DownloadProgress::Phase`] carrying the same percentage
	/// values: (percent, 0.0 to 100.0)
	Percent(f64),
	/// Variant representing that the download has come to an end, successful or not
	/// values: (success, final status text)
	Finished(bool, String),
}

/// How the line loop in [`handle_stdout`] ended
#[derive(Debug, PartialEq, Clone, Copy)]
enum LineEnd {
	/// All lines were consumed (the process closed its stdout)
	Eof,
	/// The cancellation token was triggered between lines
	Canceled,
}

/// Download a single URL, relaying progress through "pgcb"
/// Assumes ytdl and ffmpeg have already been checked to exist and work (like using [`crate::spawn::ytdl::ytdl_version`])
///
/// Never returns a error: all faults are relayed as a unsuccessful [`DownloadProgress::Finished`]
pub fn run_download<A: DownloadOptions, C: FnMut(DownloadProgress)>(options: &A, mut pgcb: C, cancel: &CancelToken) {
	if let Err(err) = try_run_download(options, &mut pgcb, cancel) {
		pgcb(DownloadProgress::Finished(
			false,
			format!("An unexpected error occurred: {err}"),
		));
	}
}

/// Spawn ytdl and drive it to completion
/// Emits [`DownloadProgress::Finished`] itself in all cases except a [`Err`] return
fn try_run_download<A: DownloadOptions, C: FnMut(DownloadProgress)>(
	options: &A,
	pgcb: &mut C,
	cancel: &CancelToken,
) -> Result<(), crate::Error> {
	let ytdl_child = {
		let args = assemble_ytdl_command(options)?;

		// stderr is captured separately so it can be reported on a non-0 exit,
		// "unchecked" so a non-0 exit does not surface as a reader error
		duct::cmd(resolve_ytdl_bin(options.ytdl_path()), args)
			.stderr_capture()
			.unchecked()
			.reader()
			.attach_location_err("duct ytdl reader")?
	};

	let stdout_reader = BufReader::new(&ytdl_child);

	if handle_stdout(options, pgcb, stdout_reader, cancel) == LineEnd::Canceled {
		ytdl_child.kill().attach_location_err("duct ytdl kill")?;
		pgcb(DownloadProgress::Finished(false, CANCELED_MESSAGE.to_owned()));

		return Ok(());
	}

	return wait_and_finish(&ytdl_child, pgcb, cancel);
}

/// Wait for the spawned ytdl to exit and relay the final [`DownloadProgress::Finished`]
fn wait_and_finish<C: FnMut(DownloadProgress)>(
	ytdl_child: &duct::ReaderHandle,
	pgcb: &mut C,
	cancel: &CancelToken,
) -> Result<(), crate::Error> {
	// wait loop, because somehow a "ReaderHandle" does not implement "wait", only "try_wait", but have to wait for it to exit here
	let output = loop {
		if cancel.is_cancelled() {
			ytdl_child.kill().attach_location_err("duct ytdl kill")?;
			pgcb(DownloadProgress::Finished(false, CANCELED_MESSAGE.to_owned()));

			return Ok(());
		}

		if let Some(output) = ytdl_child.try_wait().attach_location_err("duct ytdl wait")? {
			break output;
		}

		std::thread::sleep(Duration::from_millis(100)); // sleep to same some time between the next wait (to not cause constant cpu spike)
	};

	if output.status.success() {
		pgcb(DownloadProgress::Finished(true, SUCCESS_MESSAGE.to_owned()));

		return Ok(());
	}

	let code = output
		.status
		.code()
		.map_or_else(|| return "unknown".to_owned(), |v| return v.to_string());
	let stderr = String::from_utf8_lossy(&output.stderr);
	let stderr = stderr.trim();

	warn!("youtube-dl exited with a non-0 code: {code}");

	pgcb(DownloadProgress::Finished(
		false,
		format!("Download failed with exit code {code}.\n\nError:\n{stderr}"),
	));

	return Ok(());
}

/// Helper function to handle the output from a spawned ytdl command
/// The cancellation token is checked between lines, a cancel during a blocking read is only noticed on the next line
#[inline]
fn handle_stdout<A: DownloadOptions, C: FnMut(DownloadProgress), R: BufRead>(
	options: &A,
	pgcb: &mut C,
	reader: R,
	cancel: &CancelToken,
) -> LineEnd {
	// cache the bool for "print_command_log" to not execute the function for every line (should be a static value)
	let print_stdout = options.print_command_log();

	// HACK: .lines() iter never exits on non-0 exit codes in duct, see https://github.com/oconnor663/duct.rs/issues/112
	for line in reader.lines() {
		if cancel.is_cancelled() {
			return LineEnd::Canceled;
		}

		let line = match line {
			Ok(v) => v,
			Err(err) => {
				debug!("duct lines reader errored: {}", err);
				break; // handle it as a non-breaking case, because in 99% of cases it is just a error of "command ... exited with code ?"
			},
		};

		// only print STDOUT to output when requested
		if print_stdout {
			trace!("ytdl [STDOUT]: \"{}\"", line);
		}

		let Some(linetype) = LineType::try_from_line(&line) else {
			continue;
		};

		match linetype {
			LineType::Download => {
				if let Some(percent) = linetype.try_get_download_percent(&line) {
					// the textual status always comes before the numeric value
					pgcb(DownloadProgress::Phase(format!("Downloading... {percent:.1}%")));
					pgcb(DownloadProgress::Percent(percent));
				}
			},
			LineType::ExtractAudio => pgcb(DownloadProgress::Phase(PHASE_EXTRACTING_AUDIO.to_owned())),
			LineType::Merger => pgcb(DownloadProgress::Phase(PHASE_MERGING.to_owned())),
		}
	}

	return LineEnd::Eof;
}
