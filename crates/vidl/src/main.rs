#![allow(clippy::needless_return)]
#![warn(clippy::implicit_return)]

#[macro_use]
extern crate log;

use flexi_logger::LogSpecification;
use libvidl::*;
use std::io::Error as ioError;

mod clap_conf;
use clap_conf::CliDerive;

mod commands;
mod logger;
mod state;
mod utils;

/// Main
fn main() -> Result<(), ioError> {
	let mut logger_handle = logger::setup_logger()?;

	let cli_matches = CliDerive::custom_parse().map_err(utils::error_to_ioerror)?;

	log::info!("CLI Verbosity is {}", cli_matches.verbosity);

	// apply cli "verbosity" argument to the log level
	logger_handle.set_new_spec(
		match cli_matches.verbosity {
			0 => LogSpecification::parse("warn"),
			1 => LogSpecification::parse("info"),
			2 => LogSpecification::parse("debug"),
			3 => LogSpecification::parse("trace"),
			_ => {
				return Err(ioError::new(
					std::io::ErrorKind::Other,
					"Expected verbosity integer range between 0 and 3 (inclusive)",
				));
			},
		}
		.expect("Expected LogSpecification to parse correctly"),
	);

	colored::control::set_override(cli_matches.enable_colors());

	// wire Ctrl-C to the cancellation token the download worker checks
	let cancel = cancel::CancelToken::new();
	{
		let cancel = cancel.clone();
		ctrlc::set_handler(move || {
			info!("Cancellation requested");
			cancel.cancel();
		})
		.map_err(|err| {
			return ioError::new(
				std::io::ErrorKind::Other,
				format!("Failed to set the Ctrl-C handler: {err}"),
			);
		})?;
	}

	return commands::download::command_download(&cli_matches, cancel);
}
