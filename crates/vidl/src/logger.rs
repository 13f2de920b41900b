//! Module for all Logger related things

use colored::{
	Color,
	Colorize,
};
use flexi_logger::{
	DeferredNow,
	Logger,
	LoggerHandle,
	Record,
	style,
};
use std::io::Error as ioError;
use time::{
	format_description::FormatItem,
	macros::format_description,
};

/// Fallback name for threads that have not been given one
const UNNAMED_THREAD: &str = "<unnamed>";

/// Function for setting up the logger
/// This function is mainly to keep the code structured and sorted
#[inline]
pub fn setup_logger() -> Result<LoggerHandle, ioError> {
	let handle = Logger::try_with_env_or_str("warn")
		.expect("Expected flexi_logger to be able to parse env or string")
		.adaptive_format_for_stderr(flexi_logger::AdaptiveFormat::Custom(log_format, color_log_format))
		.log_to_stderr()
		.start()
		.expect("Expected flexi_logger to be able to start");

	return Ok(handle);
}

/// ISO 8601 Time Format for logging
pub const ISO8601_TIME_FORMAT: &[FormatItem<'static>] = format_description!(
	// format to be "1977-11-30T13:30:30.000+0200"
	"[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3][offset_hour sign:mandatory][offset_minute]"
);

/// Logging format for non-interactive output, not colored and not padded
/// The thread name is included to tell the download worker apart from the cli thread
///
/// Example Lines:
/// `[2022-03-02T13:42:43.374+0100 ERROR main vidl::commands::download]: test line`
/// `[2022-03-02T13:42:43.374+0100 WARN download-worker libvidl::main::download]: test line`
pub fn log_format(w: &mut dyn std::io::Write, now: &mut DeferredNow, record: &Record) -> Result<(), std::io::Error> {
	return write!(
		w,
		"[{} {} {} {}]: {}",
		now.format(ISO8601_TIME_FORMAT),
		record.level(),
		std::thread::current().name().unwrap_or(UNNAMED_THREAD),
		record.module_path().unwrap_or("<unnamed module>"),
		&record.args()
	);
}

/// Logging format for a tty, colored and with a padded level
///
/// Example Lines:
/// `[2022-03-02T13:42:43.374+0100 ERROR main vidl::commands::download]: test line`
/// `[2022-03-02T13:42:43.374+0100 WARN  download-worker libvidl::main::download]: test line`
pub fn color_log_format(
	w: &mut dyn std::io::Write,
	now: &mut DeferredNow,
	record: &Record,
) -> Result<(), std::io::Error> {
	let level = record.level();
	return write!(
		w,
		"[{} {} {} {}]: {}",
		now.format(ISO8601_TIME_FORMAT).color(Color::BrightBlack), // Bright Black = Grey
		style(level).paint(format!("{:5}", level)), // pad level to 5 characters, cannot be done in the string itself, because of the color characters
		std::thread::current().name().unwrap_or(UNNAMED_THREAD),
		record.module_path().unwrap_or("<unnamed module>"),
		&record.args() // dont apply any color to the input, so that the input can dynamically set the color
	);
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_log_format_plain() {
		let mut out = Vec::new();

		log_format(
			&mut out,
			&mut DeferredNow::new(),
			&log::Record::builder()
				.args(format_args!("some test line"))
				.level(log::Level::Info)
				.module_path(Some("vidl::logger"))
				.build(),
		)
		.expect("Expected the format to write");

		let out = String::from_utf8(out).expect("Expected the format output to be utf8");

		assert!(out.starts_with('['));
		assert!(out.contains(" INFO "));
		assert!(out.contains(" vidl::logger]: "));
		assert!(out.ends_with("]: some test line"));
	}
}
