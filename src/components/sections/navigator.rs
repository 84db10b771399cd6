use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

use leptos::leptos_dom::helpers::{TimeoutHandle, set_timeout_with_handle};
use leptos::prelude::*;
use log::{debug, error};
use web_sys::{Element, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

use super::state::{NavError, NavTicket, NavigationState};

/// Long enough to outlast a typical smooth scroll. The browser gives no
/// completion signal, so this is an approximation.
pub const DEFAULT_SETTLE: Duration = Duration::from_millis(1200);

/// Owner of [`NavigationState`]: drives smooth scrolling to a section and
/// publishes the active index.
#[derive(Clone)]
pub struct ScrollNavigator {
	state: Rc<RefCell<NavigationState>>,
	sections: Rc<RefCell<BTreeMap<usize, Element>>>,
	settle_timer: Rc<RefCell<Option<TimeoutHandle>>>,
	settle_after: Duration,
	active: RwSignal<Option<usize>>,
	count: RwSignal<usize>,
}

impl ScrollNavigator {
	/// `settle_after` is how long a navigation holds the lock.
	pub fn new(settle_after: Duration) -> Self {
		Self {
			state: Rc::new(RefCell::new(NavigationState::new())),
			sections: Rc::default(),
			settle_timer: Rc::default(),
			settle_after,
			active: RwSignal::new(None),
			count: RwSignal::new(0),
		}
	}

	/// Externally visible active index.
	pub fn active_index(&self) -> ReadSignal<Option<usize>> {
		self.active.read_only()
	}

	/// Number of registered sections.
	pub fn section_count(&self) -> ReadSignal<usize> {
		self.count.read_only()
	}

	/// True while a navigation is settling.
	pub fn is_locked(&self) -> bool {
		self.state.borrow().is_locked()
	}

	/// Make `element` the scroll target for `index`.
	pub fn register(&self, index: usize, element: Element) {
		let count = {
			let mut sections = self.sections.borrow_mut();
			sections.insert(index, element);
			sections.len()
		};
		self.count.set(count);
	}

	/// Returns the element that was registered for `index`.
	pub fn unregister(&self, index: usize) -> Option<Element> {
		let (removed, count) = {
			let mut sections = self.sections.borrow_mut();
			(sections.remove(&index), sections.len())
		};
		self.count.set(count);
		removed
	}

	/// Smooth-scroll section `index` to the middle of the viewport.
	///
	/// Dropped (not queued) while a previous navigation is still settling.
	/// `index` must be a registered section; gaps left by unmounted panels
	/// are not bridged.
	pub fn go_to(&self, index: usize) -> Result<(), NavError> {
		let ticket = {
			let sections = self.sections.borrow();
			let mut state = self.state.borrow_mut();
			if !state.is_locked() && !sections.contains_key(&index) {
				return Err(NavError::OutOfRange {
					index,
					count: sections.len(),
				});
			}
			// Indices stay sparse after a middle panel unmounts.
			let bound = sections.keys().next_back().map_or(0, |last| last + 1);
			state.begin(index, bound)?
		};
		debug!("navigating to section {}", index);
		self.active.set(Some(index));

		if let Some(element) = self.sections.borrow().get(&index) {
			let options = ScrollIntoViewOptions::new();
			options.set_behavior(ScrollBehavior::Smooth);
			options.set_block(ScrollLogicalPosition::Center);
			element.scroll_into_view_with_scroll_into_view_options(&options);
		}

		self.cancel_pending();
		let this = self.clone();
		match set_timeout_with_handle(move || this.settle(ticket), self.settle_after) {
			Ok(handle) => *self.settle_timer.borrow_mut() = Some(handle),
			Err(err) => {
				error!("could not schedule navigation settle: {:?}", err);
				self.settle(ticket);
			}
		}
		Ok(())
	}

	/// Observer-driven update; held back while a navigation is in flight.
	pub fn observe(&self, index: usize) {
		let changed = self.state.borrow_mut().observe(index);
		if let Some(index) = changed {
			self.active.set(Some(index));
		}
	}

	/// Clear the pending settle timer, if any.
	pub fn cancel_pending(&self) {
		if let Some(handle) = self.settle_timer.borrow_mut().take() {
			handle.clear();
		}
	}

	fn settle(&self, ticket: NavTicket) {
		let visible = {
			let mut state = self.state.borrow_mut();
			if !state.settle(ticket) {
				return;
			}
			state.active_index()
		};
		self.settle_timer.borrow_mut().take();
		debug!("navigation settled at {:?}", visible);
		self.active.set(visible);
	}
}
