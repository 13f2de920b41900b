//! Module for the [`DownloadRelay`] between a front-end and a download worker thread

use std::{
	sync::mpsc,
	thread::JoinHandle,
};

use crate::{
	cancel::CancelToken,
	error::{
		CustomThreadJoin,
		IOErrorToError,
	},
	main::download::{
		DownloadOptions,
		DownloadProgress,
		run_download,
	},
};

/// States the relay can be in
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum RelayState {
	/// No download is active, a new one can be submitted
	Idle,
	/// A download worker is active, submissions are rejected
	Running,
}

/// Handle owning the download worker thread
/// At most one download is active at a time, a submit while [`RelayState::Running`] is rejected synchronously
///
/// Progress arrives on the returned channel, ending with exactly one [`DownloadProgress::Finished`],
/// after which the channel disconnects and [`DownloadRelay::reclaim`] joins the worker
#[derive(Debug)]
pub struct DownloadRelay {
	state:  RelayState,
	worker: Option<JoinHandle<()>>,
}

impl Default for DownloadRelay {
	fn default() -> Self {
		return Self::new();
	}
}

impl DownloadRelay {
	/// Create a new relay in [`RelayState::Idle`]
	#[must_use]
	pub fn new() -> Self {
		return Self {
			state:  RelayState::Idle,
			worker: None,
		};
	}

	/// Get the current state
	#[must_use]
	pub fn state(&self) -> RelayState {
		return self.state;
	}

	/// Check if a download worker is currently active
	#[must_use]
	pub fn is_running(&self) -> bool {
		return self.state == RelayState::Running;
	}

	/// Start a download on a worker thread
	/// Returns the receiving end of the progress channel
	///
	/// Errors with [`crate::Error::is_download_in_progress`] while a download is active, without changing any state
	pub fn submit<A>(&mut self, options: A, cancel: CancelToken) -> Result<mpsc::Receiver<DownloadProgress>, crate::Error>
	where
		A: DownloadOptions + Send + 'static,
	{
		return self.submit_job(move |emit| run_download(&options, emit, &cancel));
	}

	/// Spawn "job" on the worker thread, with the busy check applied
	/// The sending end of the progress channel is dropped when the job returns
	fn submit_job<F>(&mut self, job: F) -> Result<mpsc::Receiver<DownloadProgress>, crate::Error>
	where
		F: FnOnce(&mut dyn FnMut(DownloadProgress)) + Send + 'static,
	{
		if self.state == RelayState::Running {
			return Err(crate::Error::download_in_progress(
				"A download is already in progress. Please wait.",
			));
		}

		let (tx, rx) = mpsc::channel::<DownloadProgress>();

		let handle = std::thread::Builder::new()
			.name("download-worker".to_owned())
			.spawn(move || {
				// send errors mean the receiver is gone, events are dropped then
				job(&mut |progress| {
					let _ = tx.send(progress);
				});
			})
			.attach_location_err("download worker spawn")?;

		self.worker = Some(handle);
		self.state = RelayState::Running;

		return Ok(rx);
	}

	/// Join the finished worker thread and return to [`RelayState::Idle`]
	/// Meant to be called after the progress channel has disconnected
	pub fn reclaim(&mut self) -> Result<(), crate::Error> {
		if let Some(handle) = self.worker.take() {
			handle.join_err()?;
		}

		self.state = RelayState::Idle;

		return Ok(());
	}
}

#[cfg(test)]
mod test {
	use std::sync::mpsc::TryRecvError;

	use super::*;

	#[test]
	fn test_events_arrive_in_order_and_disconnect() {
		let mut relay = DownloadRelay::new();
		assert_eq!(RelayState::Idle, relay.state());

		let rx = relay
			.submit_job(|emit| {
				emit(DownloadProgress::Phase("Downloading... 0.0%".to_owned()));
				emit(DownloadProgress::Percent(0.0));
				emit(DownloadProgress::Finished(true, "done".to_owned()));
			})
			.expect("Expected the job to be submitted");

		assert!(relay.is_running());

		let events: Vec<DownloadProgress> = rx.iter().collect();
		assert_eq!(
			vec![
				DownloadProgress::Phase("Downloading... 0.0%".to_owned()),
				DownloadProgress::Percent(0.0),
				DownloadProgress::Finished(true, "done".to_owned()),
			],
			events
		);

		assert!(relay.reclaim().is_ok());
		assert_eq!(RelayState::Idle, relay.state());
	}

	#[test]
	fn test_busy_submit_is_rejected() {
		let mut relay = DownloadRelay::new();

		// channel to keep the first job alive until the busy check has been done
		let (release_tx, release_rx) = mpsc::channel::<()>();

		let rx = relay
			.submit_job(move |emit| {
				release_rx.recv().expect("Expected the release sender to be alive");
				emit(DownloadProgress::Finished(true, "done".to_owned()));
			})
			.expect("Expected the first job to be submitted");

		assert!(relay.is_running());

		// no event yet, the first job is still blocked
		assert_eq!(Err(TryRecvError::Empty), rx.try_recv());

		let second = relay.submit_job(|emit| {
			emit(DownloadProgress::Finished(true, "never".to_owned()));
		});

		let err = second.expect_err("Expected the second submit to be rejected");
		assert!(err.is_download_in_progress());
		assert!(relay.is_running());

		release_tx.send(()).expect("Expected the first job to still be running");

		let events: Vec<DownloadProgress> = rx.iter().collect();
		assert_eq!(vec![DownloadProgress::Finished(true, "done".to_owned())], events);

		assert!(relay.reclaim().is_ok());
		assert_eq!(RelayState::Idle, relay.state());
	}

	#[test]
	fn test_resubmit_after_reclaim() {
		let mut relay = DownloadRelay::new();

		for round in 0..2 {
			let rx = relay
				.submit_job(move |emit| {
					emit(DownloadProgress::Finished(true, format!("round {round}")));
				})
				.expect("Expected the job to be submitted");

			let events: Vec<DownloadProgress> = rx.iter().collect();
			assert_eq!(
				vec![DownloadProgress::Finished(true, format!("round {round}"))],
				events
			);

			assert!(relay.reclaim().is_ok());
			assert_eq!(RelayState::Idle, relay.state());
		}
	}

	#[test]
	fn test_reclaim_without_worker_is_ok() {
		let mut relay = DownloadRelay::new();

		assert!(relay.reclaim().is_ok());
		assert_eq!(RelayState::Idle, relay.state());
	}
}
