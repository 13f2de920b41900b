//! Module for the cancellation token shared between the front-end and the download worker

use std::sync::{
	Arc,
	atomic::{
		AtomicBool,
		Ordering,
	},
};

/// Shared flag to request a running download to stop.
///
/// Checked by the worker between line reads and while waiting for process exit.
/// Cloning is cheap, all clones refer to the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
	/// Create a new, not-yet-cancelled token
	#[must_use]
	pub fn new() -> Self {
		return Self(Arc::new(AtomicBool::new(false)));
	}

	/// Request cancellation; observed by all clones
	pub fn cancel(&self) {
		self.0.store(true, Ordering::SeqCst);
	}

	/// Get whether cancellation has been requested
	#[must_use]
	pub fn is_cancelled(&self) -> bool {
		return self.0.load(Ordering::SeqCst);
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_clones_share_state() {
		let token = CancelToken::new();
		let cloned = token.clone();

		assert!(!token.is_cancelled());
		assert!(!cloned.is_cancelled());

		cloned.cancel();

		assert!(token.is_cancelled());
		assert!(cloned.is_cancelled());
	}
}
