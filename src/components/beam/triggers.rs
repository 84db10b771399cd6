use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::{debug, trace};
use wasm_bindgen::prelude::*;

use super::types::Trigger;

type Callback = Rc<RefCell<dyn FnMut(Trigger)>>;

#[derive(Default)]
struct Registry {
	next_id: u64,
	entries: Vec<(u64, Callback)>,
}

/// Fan-out of recompute triggers for one beam container.
///
/// Each subscriber runs exactly once per fired trigger. Subscriptions are
/// released by dropping the returned [`Subscription`], so a beam that has
/// been unmounted can never be called again.
#[derive(Clone, Default)]
pub struct RecomputeBus {
	registry: Rc<RefCell<Registry>>,
	resize: Rc<RefCell<Option<WindowListener>>>,
}

/// Handle keeping one subscriber registered; dropping it unsubscribes.
#[must_use = "dropping a Subscription immediately unsubscribes"]
pub struct Subscription {
	id: u64,
	registry: Weak<RefCell<Registry>>,
}

impl Drop for Subscription {
	fn drop(&mut self) {
		if let Some(registry) = self.registry.upgrade() {
			registry.borrow_mut().entries.retain(|(id, _)| *id != self.id);
			trace!("beam subscription {} released", self.id);
		}
	}
}

impl RecomputeBus {
	/// An empty bus with no window listener attached.
	pub fn new() -> Self {
		Self::default()
	}

	/// Register `callback` for every later trigger until the returned handle
	/// is dropped.
	pub fn subscribe(&self, callback: impl FnMut(Trigger) + 'static) -> Subscription {
		let mut registry = self.registry.borrow_mut();
		let id = registry.next_id;
		registry.next_id += 1;
		let callback: Callback = Rc::new(RefCell::new(callback));
		registry.entries.push((id, callback));
		trace!("beam subscription {} added", id);
		Subscription {
			id,
			registry: Rc::downgrade(&self.registry),
		}
	}

	/// Run every current subscriber once. Returns how many ran.
	pub fn fire(&self, trigger: Trigger) -> usize {
		dispatch(&self.registry, trigger)
	}

	/// Number of live subscriptions.
	pub fn len(&self) -> usize {
		self.registry.borrow().entries.len()
	}

	/// True when nothing is subscribed.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Attach the window `resize` listener. Calling this again is a no-op.
	pub fn listen_window_resize(&self) -> Result<(), JsValue> {
		let mut slot = self.resize.borrow_mut();
		if slot.is_some() {
			return Ok(());
		}
		let registry = Rc::downgrade(&self.registry);
		*slot = Some(WindowListener::attach("resize", move || {
			if let Some(registry) = registry.upgrade() {
				dispatch(&registry, Trigger::Resize);
			}
		})?);
		Ok(())
	}

	/// Remove the window listener. Subscribers stay registered.
	pub fn detach(&self) {
		self.resize.borrow_mut().take();
	}
}

fn dispatch(registry: &Rc<RefCell<Registry>>, trigger: Trigger) -> usize {
	// Snapshot first so callbacks may (un)subscribe without a double borrow.
	let callbacks: Vec<Callback> = registry
		.borrow()
		.entries
		.iter()
		.map(|(_, cb)| cb.clone())
		.collect();
	debug!("{:?}: recomputing {} beam(s)", trigger, callbacks.len());
	for cb in &callbacks {
		(&mut *cb.borrow_mut())(trigger);
	}
	callbacks.len()
}

/// A window event listener that is removed when dropped.
struct WindowListener {
	event: &'static str,
	callback: Closure<dyn FnMut()>,
}

impl WindowListener {
	fn attach(event: &'static str, handler: impl FnMut() + 'static) -> Result<Self, JsValue> {
		let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
		let callback = Closure::<dyn FnMut()>::new(handler);
		window.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
		Ok(Self { event, callback })
	}
}

impl Drop for WindowListener {
	fn drop(&mut self) {
		if let Some(window) = web_sys::window() {
			let _ = window
				.remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
		}
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;

	use super::*;

	fn counter(bus: &RecomputeBus) -> (Rc<Cell<usize>>, Subscription) {
		let count = Rc::new(Cell::new(0));
		let seen = count.clone();
		let sub = bus.subscribe(move |_| seen.set(seen.get() + 1));
		(count, sub)
	}

	#[test]
	fn each_resize_recomputes_each_beam_once() {
		let bus = RecomputeBus::new();
		let (a, _sa) = counter(&bus);
		let (b, _sb) = counter(&bus);
		let (c, _sc) = counter(&bus);

		assert_eq!(bus.fire(Trigger::Resize), 3);
		assert_eq!((a.get(), b.get(), c.get()), (1, 1, 1));
	}

	#[test]
	fn dropped_subscription_sees_no_further_triggers() {
		let bus = RecomputeBus::new();
		let (gone, sub) = counter(&bus);
		let (kept, _keep) = counter(&bus);
		drop(sub);

		for _ in 0..5 {
			bus.fire(Trigger::Resize);
		}
		assert_eq!(gone.get(), 0);
		assert_eq!(kept.get(), 5);
		assert_eq!(bus.len(), 1);
	}

	#[test]
	fn subscription_outliving_bus_is_harmless() {
		let bus = RecomputeBus::new();
		let (_, sub) = counter(&bus);
		drop(bus);
		drop(sub);
	}

	#[test]
	fn callback_may_unsubscribe_during_dispatch() {
		let bus = RecomputeBus::new();
		let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
		let inner = slot.clone();
		*slot.borrow_mut() = Some(bus.subscribe(move |_| {
			inner.borrow_mut().take();
		}));

		assert_eq!(bus.fire(Trigger::Refresh), 1);
		assert!(bus.is_empty());
		assert_eq!(bus.fire(Trigger::Refresh), 0);
	}
}
