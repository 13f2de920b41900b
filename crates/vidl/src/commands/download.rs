//! Module for the main download flow

use crate::{
	clap_conf::CliDerive,
	state::DownloadState,
	utils,
};
use colored::{
	Color,
	Colorize,
};
use indicatif::{
	ProgressBar,
	ProgressStyle,
};
use libvidl::{
	cancel::CancelToken,
	main::{
		download::DownloadProgress,
		relay::DownloadRelay,
	},
};
use std::{
	io::Error as ioError,
	sync::{
		LazyLock,
		mpsc::Receiver,
	},
	time::Duration,
};

/// Static for easily referencing the 100% length for a progressbar
const PG_PERCENT_100: u64 = 100;
/// How long the final status stays visible before the idle line is printed
const RESET_DELAY: Duration = Duration::from_secs(3);

/// Progressbar style for downloads
static DOWNLOAD_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
	return ProgressStyle::default_bar()
		.template("[{elapsed_precise}] [{bar:40.cyan/blue}] {percent:>3}% {msg}")
		.expect("Expected the download progress template to be valid")
		.progress_chars("#>-");
});

/// Handler function for the "download" command
/// This function is mainly to keep the code structured and sorted
pub fn command_download(main_args: &CliDerive, cancel: CancelToken) -> Result<(), ioError> {
	let ytdl_version = utils::require_ytdl_installed(main_args)?;
	info!("Using youtube-dl version {ytdl_version}");

	let state = DownloadState::new(main_args);

	let mut relay = DownloadRelay::new();
	let receiver = relay.submit(state, cancel).map_err(utils::error_to_ioerror)?;

	let bar: ProgressBar = ProgressBar::hidden().with_style(DOWNLOAD_STYLE.clone());
	bar.set_length(PG_PERCENT_100);
	utils::set_progressbar(&bar, main_args);

	let finished = drain_updates(&receiver, &bar, main_args.is_interactive());

	relay.reclaim().map_err(utils::error_to_ioerror)?;

	let Some((success, message)) = finished else {
		return Err(ioError::new(
			std::io::ErrorKind::UnexpectedEof,
			"The download worker ended without a final status",
		));
	};

	if success {
		println!("{}", message.color(Color::Green));
	} else {
		eprintln!("{}", message.color(Color::Red));
	}

	if main_args.is_interactive() {
		// keep the final status visible for a moment before going back to idle
		std::thread::sleep(RESET_DELAY);
		println!("{}", "Idle".color(Color::BrightBlack));
	}

	// if the download failed, exit with an non-zero error code
	if !success {
		warn!("Exiting with non-zero code, because of a previous Error");
		std::process::exit(1);
	}

	return Ok(());
}

/// Drain the progress channel until it disconnects, driving the display
/// Returns the final status, [`None`] if the worker ended without sending one
fn drain_updates(
	receiver: &Receiver<DownloadProgress>,
	bar: &ProgressBar,
	interactive: bool,
) -> Option<(bool, String)> {
	let mut finished: Option<(bool, String)> = None;

	for progress in receiver.iter() {
		match progress {
			DownloadProgress::Percent(percent) => bar.set_position(percent.round() as u64),
			DownloadProgress::Phase(text) => {
				if interactive {
					bar.set_message(text);
				} else {
					println!("{text}");
				}
			},
			DownloadProgress::Finished(success, message) => {
				bar.finish_and_clear();
				finished = Some((success, message));
			},
		}
	}

	return finished;
}

#[cfg(test)]
mod test {
	use std::sync::mpsc;

	use super::*;

	#[test]
	fn test_drain_updates_returns_final_status() {
		let (tx, rx) = mpsc::channel();

		tx.send(DownloadProgress::Phase("Downloading... 42.5%".to_owned()))
			.expect("Expected the receiver to be alive");
		tx.send(DownloadProgress::Percent(42.5))
			.expect("Expected the receiver to be alive");
		tx.send(DownloadProgress::Finished(true, "done".to_owned()))
			.expect("Expected the receiver to be alive");
		drop(tx);

		let bar = ProgressBar::hidden();
		bar.set_length(PG_PERCENT_100);

		let finished = drain_updates(&rx, &bar, true);

		assert_eq!(Some((true, "done".to_owned())), finished);
		assert_eq!(43, bar.position()); // 42.5 rounded
		assert!(bar.is_finished());
	}

	#[test]
	fn test_drain_updates_without_final_status() {
		let (tx, rx) = mpsc::channel();

		tx.send(DownloadProgress::Percent(10.0))
			.expect("Expected the receiver to be alive");
		drop(tx);

		let bar = ProgressBar::hidden();
		bar.set_length(PG_PERCENT_100);

		let finished = drain_updates(&rx, &bar, true);

		assert_eq!(None, finished);
	}
}
