//! Navigation lock and active-index bookkeeping.

use thiserror::Error;

/// Why a programmatic navigation was dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum NavError {
	/// A previous navigation has not settled yet.
	#[error("a navigation is already in flight")]
	Locked,
	/// No section is registered at `index`.
	#[error("section {index} out of range ({count} registered)")]
	OutOfRange {
		/// Requested section.
		index: usize,
		/// Sections registered at the time.
		count: usize,
	},
	/// The deck has unmounted.
	#[error("section deck is no longer mounted")]
	Detached,
}

/// Identifies one accepted navigation; only the latest ticket may unlock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavTicket(u64);

/// Active-section bookkeeping shared by the observer and the navigator.
///
/// While `locked`, observer reports are remembered but not shown; the last
/// one becomes visible when the navigation settles.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavigationState {
	active: Option<usize>,
	locked: bool,
	deferred: Option<usize>,
	generation: u64,
}

impl NavigationState {
	/// Unlocked, with no active section.
	pub fn new() -> Self {
		Self::default()
	}

	/// Visible active index.
	pub fn active_index(&self) -> Option<usize> {
		self.active
	}

	/// True between an accepted navigation and its settle.
	pub fn is_locked(&self) -> bool {
		self.locked
	}

	/// Start a navigation to `index` out of `count` sections. The target
	/// becomes active immediately.
	pub fn begin(&mut self, index: usize, count: usize) -> Result<NavTicket, NavError> {
		if self.locked {
			return Err(NavError::Locked);
		}
		if index >= count {
			return Err(NavError::OutOfRange { index, count });
		}
		self.locked = true;
		self.deferred = None;
		self.active = Some(index);
		self.generation += 1;
		Ok(NavTicket(self.generation))
	}

	/// Unlock after the settle timeout. Stale tickets are ignored. Returns
	/// whether the lock was released.
	pub fn settle(&mut self, ticket: NavTicket) -> bool {
		if !self.locked || ticket.0 != self.generation {
			return false;
		}
		self.locked = false;
		if let Some(index) = self.deferred.take() {
			self.active = Some(index);
		}
		true
	}

	/// Apply an observer report. Returns the newly visible index, if it
	/// changed.
	pub fn observe(&mut self, index: usize) -> Option<usize> {
		if self.locked {
			self.deferred = Some(index);
			return None;
		}
		if self.active == Some(index) {
			return None;
		}
		self.active = Some(index);
		self.active
	}
}
