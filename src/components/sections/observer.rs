//! `IntersectionObserver` adapter feeding a [`SectionTracker`].

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, trace};
use thiserror::Error;
use wasm_bindgen::prelude::*;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use super::tracker::{IntersectionSample, SectionTracker};

/// Attribute carrying a panel's index, read back from observer entries.
pub const INDEX_ATTR: &str = "data-section-index";

/// Options passed to the platform observer.
#[derive(Clone, Debug, PartialEq)]
pub struct ObserverConfig {
	/// Ratios at which the browser reports a section.
	pub thresholds: Vec<f64>,
	/// CSS margin applied to the viewport before intersecting.
	pub root_margin: String,
}

impl Default for ObserverConfig {
	fn default() -> Self {
		Self {
			thresholds: vec![0.3, 0.7],
			root_margin: "-10% 0px -10% 0px".into(),
		}
	}
}

impl ObserverConfig {
	/// The smallest configured threshold; crossing it makes a section active.
	pub fn activation_threshold(&self) -> f64 {
		self.thresholds
			.iter()
			.copied()
			.filter(|t| t.is_finite())
			.reduce(f64::min)
			.unwrap_or(0.0)
	}
}

/// Failure to start observing.
#[derive(Debug, Error)]
pub enum ObserveError {
	/// The browser refused to construct an `IntersectionObserver`.
	#[error("IntersectionObserver unavailable: {0}")]
	Unavailable(String),
}

/// `IntersectionObserver` over the registered section panels.
///
/// Dropping it disconnects the platform observer.
pub struct SectionObserver {
	observer: IntersectionObserver,
	tracker: Rc<RefCell<SectionTracker>>,
	_callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl SectionObserver {
	/// `on_active` receives each batch's winning section index.
	pub fn new(
		config: &ObserverConfig,
		mut on_active: impl FnMut(usize) + 'static,
	) -> Result<Self, ObserveError> {
		let tracker = Rc::new(RefCell::new(SectionTracker::new(
			config.activation_threshold(),
		)));

		let tracker_cb = tracker.clone();
		let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
			move |entries: js_sys::Array, _: IntersectionObserver| {
				let batch: Vec<IntersectionSample> = entries
					.iter()
					.filter_map(|entry| sample(entry.unchecked_into()))
					.collect();
				let winner = tracker_cb.borrow_mut().apply(&batch);
				if let Some(index) = winner {
					trace!("section {} crossed into view", index);
					on_active(index);
				}
			},
		);

		let thresholds: js_sys::Array = config
			.thresholds
			.iter()
			.map(|t| JsValue::from_f64(*t))
			.collect();
		let init = IntersectionObserverInit::new();
		init.set_threshold(&thresholds);
		init.set_root_margin(&config.root_margin);

		let observer =
			IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
				.map_err(|err| ObserveError::Unavailable(format!("{:?}", err)))?;

		Ok(Self {
			observer,
			tracker,
			_callback: callback,
		})
	}

	/// Start observing `element` as section `index`.
	pub fn register(&self, index: usize, element: &Element) {
		if self.tracker.borrow_mut().register(index) {
			debug!("observing section {}", index);
		}
		self.observer.observe(element);
	}

	/// Stop observing `element` and forget section `index`.
	pub fn unregister(&self, index: usize, element: &Element) {
		self.observer.unobserve(element);
		if self.tracker.borrow_mut().unregister(index) {
			debug!("stopped observing section {}", index);
		}
	}
}

impl Drop for SectionObserver {
	fn drop(&mut self) {
		self.observer.disconnect();
	}
}

fn sample(entry: IntersectionObserverEntry) -> Option<IntersectionSample> {
	let index = entry.target().get_attribute(INDEX_ATTR)?.parse().ok()?;
	Some(IntersectionSample {
		index,
		is_intersecting: entry.is_intersecting(),
		ratio: entry.intersection_ratio(),
	})
}
